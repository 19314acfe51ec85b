//! Default exercise library, workout plans and statistics.
//!
//! These seed each collection the first time the application runs (or when a
//! stored collection can no longer be read).

use crate::types::*;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Seed data, built once and cloned into each fresh application state
pub struct SeedData {
    pub exercises: Vec<Exercise>,
    pub plans: Vec<WorkoutPlan>,
    pub stats: WorkoutStats,
}

static SEED: Lazy<SeedData> = Lazy::new(build_seed);

/// Get a reference to the cached seed data
pub fn seed() -> &'static SeedData {
    &SEED
}

pub fn default_exercises() -> Vec<Exercise> {
    SEED.exercises.clone()
}

pub fn default_plans() -> Vec<WorkoutPlan> {
    SEED.plans.clone()
}

pub fn default_stats() -> WorkoutStats {
    SEED.stats.clone()
}

#[allow(clippy::too_many_arguments)]
fn exercise(
    id: &str,
    name: &str,
    category: ExerciseCategory,
    muscle: &str,
    equipment: &str,
    difficulty: Difficulty,
    description: &str,
    instructions: &[&str],
) -> Exercise {
    let steps = instructions
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step))
        .collect::<Vec<_>>()
        .join("\n");

    Exercise {
        id: id.into(),
        name: name.into(),
        category,
        muscle: muscle.into(),
        equipment: equipment.into(),
        description: Some(description.into()),
        instructions: Some(steps),
        difficulty: Some(difficulty),
        video_url: None,
    }
}

fn prescription(name: &str, sets: u32, reps: &str, weight: f64, rest_time: u32) -> WorkoutExercise {
    WorkoutExercise {
        name: name.into(),
        sets,
        reps: reps.into(),
        weight,
        rest_time,
    }
}

fn build_seed() -> SeedData {
    use Difficulty::*;
    use ExerciseCategory::*;

    // ========================================================================
    // Exercises
    // ========================================================================

    let exercises = vec![
        exercise(
            "1",
            "PANCA PIANA",
            Petto,
            "Pettorale",
            "Bilanciere",
            Intermedio,
            "Esercizio fondamentale per lo sviluppo del petto",
            &[
                "Sdraiati sulla panca con i piedi ben piantati a terra",
                "Afferra il bilanciere con presa leggermente più ampia delle spalle",
                "Abbassa il bilanciere al petto controllando il movimento",
                "Spingi verso l'alto contraendo i pettorali",
            ],
        ),
        exercise(
            "2",
            "SQUAT",
            Gambe,
            "Quadricipiti",
            "Bilanciere",
            Avanzato,
            "Il re degli esercizi per le gambe",
            &[
                "Posiziona il bilanciere sui trapezi",
                "Piedi larghezza spalle, punte leggermente verso l'esterno",
                "Scendi mantenendo il petto alto e le ginocchia in linea",
                "Risali spingendo sui talloni",
            ],
        ),
        exercise(
            "3",
            "STACCO",
            Schiena,
            "Dorsali",
            "Bilanciere",
            Esperto,
            "Esercizio completo per tutta la catena posteriore",
            &[
                "Bilanciere a terra, piedi sotto la sbarra",
                "Afferra con presa mista o doppia",
                "Mantieni la schiena dritta e solleva",
                "Estendi completamente anche e ginocchia",
            ],
        ),
        exercise(
            "4",
            "MILITARY PRESS",
            Spalle,
            "Deltoidi",
            "Bilanciere",
            Intermedio,
            "Sviluppo della forza delle spalle",
            &[
                "In piedi, bilanciere all'altezza delle spalle",
                "Core contratto, piedi larghezza anche",
                "Spingi verso l'alto mantenendo il controllo",
                "Abbassa lentamente alla posizione iniziale",
            ],
        ),
        exercise(
            "5",
            "CURL BICIPITI",
            Braccia,
            "Bicipiti",
            "Manubri",
            Principiante,
            "Isolamento per i bicipiti",
            &[
                "In piedi, manubri ai lati",
                "Gomiti fermi lungo il corpo",
                "Fletti l'avambraccio contraendo il bicipite",
                "Abbassa controllando il movimento",
            ],
        ),
        exercise(
            "6",
            "FRENCH PRESS",
            Braccia,
            "Tricipiti",
            "Bilanciere",
            Intermedio,
            "Isolamento per i tricipiti",
            &[
                "Sdraiato, bilanciere sopra il petto",
                "Gomiti fissi, abbassa verso la fronte",
                "Estendi solo l'avambraccio",
                "Contrai i tricipiti nella fase concentrica",
            ],
        ),
        exercise(
            "7",
            "PLANK",
            Core,
            "Addominali",
            "Corpo libero",
            Principiante,
            "Stabilizzazione del core",
            &[
                "Posizione di flessione sui gomiti",
                "Corpo in linea retta",
                "Contrai addominali e glutei",
                "Mantieni la posizione respirando normalmente",
            ],
        ),
        exercise(
            "8",
            "TRAZIONI",
            Schiena,
            "Dorsali",
            "Sbarra",
            Avanzato,
            "Esercizio a corpo libero per la schiena",
            &[
                "Appendi alla sbarra con presa prona",
                "Tira il corpo verso l'alto",
                "Porta il mento sopra la sbarra",
                "Abbassa controllando il movimento",
            ],
        ),
    ];

    // ========================================================================
    // Plans
    // ========================================================================

    let plans = vec![
        WorkoutPlan {
            id: "1".into(),
            name: "PUSH DAY".into(),
            description: "Petto, spalle e tricipiti".into(),
            exercises: vec![
                prescription("PANCA PIANA", 4, "8-10", 80.0, 120),
                prescription("PANCA INCLINATA", 3, "10-12", 70.0, 90),
                prescription("MILITARY PRESS", 4, "8-10", 50.0, 120),
                prescription("ALZATE LATERALI", 3, "12-15", 15.0, 60),
            ],
            difficulty: "INTERMEDIO".into(),
            duration: "45-60 min".into(),
            last_used: Some("2 giorni fa".into()),
        },
        WorkoutPlan {
            id: "2".into(),
            name: "PULL DAY".into(),
            description: "Schiena e bicipiti".into(),
            exercises: vec![
                prescription("STACCO", 4, "6-8", 120.0, 180),
                prescription("TRAZIONI", 4, "8-10", 0.0, 120),
                prescription("REMATORE", 3, "10-12", 80.0, 90),
                prescription("CURL BICIPITI", 3, "12-15", 20.0, 60),
            ],
            difficulty: "AVANZATO".into(),
            duration: "50-65 min".into(),
            last_used: Some("1 giorno fa".into()),
        },
        WorkoutPlan {
            id: "3".into(),
            name: "LEG DAY".into(),
            description: "Gambe complete".into(),
            exercises: vec![
                prescription("SQUAT", 4, "8-10", 100.0, 180),
                prescription("LEG PRESS", 3, "12-15", 200.0, 120),
                prescription("AFFONDI", 3, "10/gamba", 20.0, 90),
                prescription("CALF RAISES", 4, "15-20", 80.0, 60),
            ],
            difficulty: "INTERMEDIO".into(),
            duration: "60-75 min".into(),
            last_used: Some("3 giorni fa".into()),
        },
    ];

    let stats = WorkoutStats {
        total_workouts: 47,
        weekly_workouts: 12,
        total_volume: 8200.0,
        weekly_volume: 8200.0,
        streak: 7,
        completion_rate: 85.0,
    };

    SeedData {
        exercises,
        plans,
        stats,
    }
}

impl SeedData {
    /// Validate the seed data for consistency
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let mut exercise_ids = HashSet::new();
        for ex in &self.exercises {
            if ex.id.is_empty() {
                errors.push(format!("Exercise '{}' has empty ID", ex.name));
            }
            if !exercise_ids.insert(ex.id.as_str()) {
                errors.push(format!("Duplicate exercise ID '{}'", ex.id));
            }
            if ex.name.trim().is_empty() {
                errors.push(format!("Exercise '{}' has empty name", ex.id));
            }
            if ex.muscle.trim().is_empty() || ex.equipment.trim().is_empty() {
                errors.push(format!("Exercise '{}' is missing muscle or equipment", ex.id));
            }
        }

        let mut plan_ids = HashSet::new();
        for plan in &self.plans {
            if !plan_ids.insert(plan.id.as_str()) {
                errors.push(format!("Duplicate plan ID '{}'", plan.id));
            }
            if plan.name.trim().is_empty() {
                errors.push(format!("Plan '{}' has empty name", plan.id));
            }
            if plan.exercises.is_empty() {
                errors.push(format!("Plan '{}' has no exercises", plan.id));
            }
            for (i, prescribed) in plan.exercises.iter().enumerate() {
                if prescribed.sets == 0 {
                    errors.push(format!(
                        "Plan '{}': exercise {} ('{}') has zero sets",
                        plan.id, i, prescribed.name
                    ));
                }
                if !prescribed.weight.is_finite() || prescribed.weight < 0.0 {
                    errors.push(format!(
                        "Plan '{}': exercise {} ('{}') has invalid weight {}",
                        plan.id, i, prescribed.name, prescribed.weight
                    ));
                }
            }
        }

        errors
    }

    /// Run [`SeedData::validate`], logging each problem and failing if any
    pub fn check(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }
        for error in &errors {
            tracing::warn!("Seed data: {}", error);
        }
        Err(Error::SeedValidation(errors.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_loads() {
        let seed = seed();
        assert_eq!(seed.exercises.len(), 8);
        assert_eq!(seed.plans.len(), 3);
        assert_eq!(seed.stats.total_workouts, 47);
    }

    #[test]
    fn test_seed_validates() {
        let errors = seed().validate();
        assert!(errors.is_empty(), "Seed data has validation errors: {:?}", errors);
    }

    #[test]
    fn test_instructions_are_numbered() {
        let squat = default_exercises()
            .into_iter()
            .find(|e| e.name == "SQUAT")
            .unwrap();
        let instructions = squat.instructions.unwrap();
        assert!(instructions.starts_with("1. Posiziona"));
        assert_eq!(instructions.lines().count(), 4);
    }

    #[test]
    fn test_seed_plans_have_sets() {
        for plan in default_plans() {
            let total: u32 = plan.exercises.iter().map(|e| e.sets).sum();
            assert!(total > 0, "Plan {} has no sets", plan.name);
        }
    }

    #[test]
    fn test_validate_flags_zero_sets() {
        let mut data = SeedData {
            exercises: default_exercises(),
            plans: default_plans(),
            stats: default_stats(),
        };
        data.plans[0].exercises[1].sets = 0;

        let errors = data.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("zero sets"));
    }

    #[test]
    fn test_check_rejects_duplicate_ids() {
        assert!(seed().check().is_ok());

        let mut data = SeedData {
            exercises: default_exercises(),
            plans: default_plans(),
            stats: default_stats(),
        };
        data.exercises[1].id = data.exercises[0].id.clone();

        match data.check() {
            Err(Error::SeedValidation(msg)) => assert!(msg.contains("Duplicate exercise ID '1'")),
            other => panic!("expected seed validation error, got {:?}", other),
        }
    }
}
