//! Exercise library: CRUD over a flat collection of exercise definitions.

use crate::{Difficulty, Error, Exercise, ExerciseCategory, ExercisePatch, NewExercise, Result};
use std::cmp::Ordering;
use std::str::FromStr;
use uuid::Uuid;

/// Generate an id not accepted by `taken`
pub(crate) fn fresh_id<F>(taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    loop {
        let id = Uuid::new_v4().simple().to_string();
        if !taken(&id) {
            return id;
        }
    }
}

/// Trim an optional free-text field, dropping it when blank
fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn require(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("exercise {} is required", what)));
    }
    Ok(())
}

/// The exercise library
#[derive(Clone, Debug, Default)]
pub struct ExerciseCatalog {
    exercises: Vec<Exercise>,
}

impl ExerciseCatalog {
    pub fn new(exercises: Vec<Exercise>) -> Self {
        Self { exercises }
    }

    pub fn list(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn get(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Validate, normalise and append a new exercise.
    ///
    /// The name is trimmed and upper-cased. Names need not be unique.
    pub fn add(&mut self, new: NewExercise) -> Result<Exercise> {
        require(&new.name, "name")?;
        require(&new.muscle, "muscle")?;
        require(&new.equipment, "equipment")?;

        let id = fresh_id(|candidate| self.get(candidate).is_some());
        let exercise = Exercise {
            id,
            name: new.name.trim().to_uppercase(),
            category: new.category,
            muscle: new.muscle.trim().to_string(),
            equipment: new.equipment.trim().to_string(),
            description: clean_optional(new.description),
            instructions: clean_optional(new.instructions),
            difficulty: new.difficulty,
            video_url: clean_optional(new.video_url),
        };

        tracing::info!("Added exercise {} ({})", exercise.name, exercise.id);
        self.exercises.push(exercise.clone());
        Ok(exercise)
    }

    /// Merge `patch` over the exercise with `id`.
    ///
    /// Returns `Ok(false)` when no exercise matches. A patch that blanks a
    /// required field is rejected and nothing changes.
    pub fn update(&mut self, id: &str, patch: ExercisePatch) -> Result<bool> {
        let Some(current) = self.exercises.iter_mut().find(|e| e.id == id) else {
            tracing::debug!("update_exercise: no exercise with id {}", id);
            return Ok(false);
        };

        let mut merged = current.clone();
        if let Some(name) = patch.name {
            require(&name, "name")?;
            merged.name = name.trim().to_uppercase();
        }
        if let Some(category) = patch.category {
            merged.category = category;
        }
        if let Some(muscle) = patch.muscle {
            require(&muscle, "muscle")?;
            merged.muscle = muscle.trim().to_string();
        }
        if let Some(equipment) = patch.equipment {
            require(&equipment, "equipment")?;
            merged.equipment = equipment.trim().to_string();
        }
        if patch.description.is_some() {
            merged.description = clean_optional(patch.description);
        }
        if patch.instructions.is_some() {
            merged.instructions = clean_optional(patch.instructions);
        }
        if let Some(difficulty) = patch.difficulty {
            merged.difficulty = Some(difficulty);
        }
        if patch.video_url.is_some() {
            merged.video_url = clean_optional(patch.video_url);
        }

        *current = merged;
        tracing::info!("Updated exercise {}", id);
        Ok(true)
    }

    /// Remove the exercise with `id`; plans that copied its name are untouched
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.exercises.len();
        self.exercises.retain(|e| e.id != id);
        let removed = self.exercises.len() != before;
        if removed {
            tracing::info!("Deleted exercise {}", id);
        }
        removed
    }

    /// Add a copy of the exercise with `id` under a fresh id, its name
    /// suffixed with `" - COPIA"`. `Ok(None)` when no exercise matches.
    pub fn duplicate(&mut self, id: &str) -> Result<Option<Exercise>> {
        let Some(source) = self.get(id) else {
            tracing::debug!("duplicate_exercise: no exercise with id {}", id);
            return Ok(None);
        };

        let copy = NewExercise {
            name: format!("{} - COPIA", source.name),
            category: source.category,
            muscle: source.muscle.clone(),
            equipment: source.equipment.clone(),
            description: source.description.clone(),
            instructions: source.instructions.clone(),
            difficulty: source.difficulty,
            video_url: source.video_url.clone(),
        };
        self.add(copy).map(Some)
    }

    /// Filter and sort the library without modifying it
    pub fn query(&self, query: &ExerciseQuery) -> Vec<&Exercise> {
        let mut matches: Vec<&Exercise> = self
            .exercises
            .iter()
            .filter(|e| query.matches(e))
            .collect();

        matches.sort_by(|a, b| {
            let ordering = query.sort.compare(a, b);
            if query.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        matches
    }
}

// ============================================================================
// Library Queries
// ============================================================================

/// Field used to order query results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    Name,
    Category,
    Muscle,
    Difficulty,
}

impl SortField {
    fn key<'a>(&self, exercise: &'a Exercise) -> &'a str {
        match self {
            SortField::Name => &exercise.name,
            SortField::Category => exercise.category.label(),
            SortField::Muscle => &exercise.muscle,
            SortField::Difficulty => exercise.difficulty.map(|d| d.label()).unwrap_or(""),
        }
    }

    fn compare(&self, a: &Exercise, b: &Exercise) -> Ordering {
        self.key(a).to_lowercase().cmp(&self.key(b).to_lowercase())
    }
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortField::Name),
            "category" => Ok(SortField::Category),
            "muscle" => Ok(SortField::Muscle),
            "difficulty" => Ok(SortField::Difficulty),
            other => Err(Error::validation(format!("unknown sort field '{}'", other))),
        }
    }
}

/// Search, filter and sort options over the exercise library
#[derive(Clone, Debug, Default)]
pub struct ExerciseQuery {
    /// Case-insensitive substring matched against name or muscle
    pub search: Option<String>,
    pub category: Option<ExerciseCategory>,
    /// Case-insensitive exact match
    pub equipment: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub sort: SortField,
    pub descending: bool,
}

impl ExerciseQuery {
    fn matches(&self, exercise: &Exercise) -> bool {
        if let Some(term) = self.search.as_deref().map(str::to_lowercase) {
            let hit = exercise.name.to_lowercase().contains(&term)
                || exercise.muscle.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }
        if self.category.is_some_and(|c| c != exercise.category) {
            return false;
        }
        if let Some(equipment) = &self.equipment {
            if !exercise.equipment.eq_ignore_ascii_case(equipment.trim()) {
                return false;
            }
        }
        if self.difficulty.is_some() && self.difficulty != exercise.difficulty {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_exercises;

    fn seeded() -> ExerciseCatalog {
        ExerciseCatalog::new(default_exercises())
    }

    #[test]
    fn test_add_normalises_and_assigns_unique_id() {
        let mut catalog = seeded();

        let added = catalog
            .add(NewExercise::new(
                "  rematore ",
                ExerciseCategory::Schiena,
                " Dorsali ",
                "Bilanciere",
            ))
            .unwrap();

        assert_eq!(added.name, "REMATORE");
        assert_eq!(added.muscle, "Dorsali");
        assert_eq!(catalog.len(), 9);
        assert_eq!(
            catalog.list().iter().filter(|e| e.id == added.id).count(),
            1
        );
    }

    #[test]
    fn test_add_allows_duplicate_names() {
        let mut catalog = seeded();
        let a = catalog
            .add(NewExercise::new("squat", ExerciseCategory::Gambe, "Quadricipiti", "Bilanciere"))
            .unwrap();
        assert_eq!(a.name, "SQUAT");
        assert_eq!(catalog.list().iter().filter(|e| e.name == "SQUAT").count(), 2);
    }

    #[test]
    fn test_add_rejects_missing_fields() {
        let mut catalog = seeded();
        let before = catalog.list().to_vec();

        let result = catalog.add(NewExercise::new("  ", ExerciseCategory::Core, "Addominali", "Tappetino"));
        assert!(matches!(result, Err(Error::Validation(_))));

        let result = catalog.add(NewExercise::new("Crunch", ExerciseCategory::Core, "", "Tappetino"));
        assert!(matches!(result, Err(Error::Validation(_))));

        let result = catalog.add(NewExercise::new("Crunch", ExerciseCategory::Core, "Addominali", " "));
        assert!(matches!(result, Err(Error::Validation(_))));

        assert_eq!(catalog.list(), before.as_slice());
    }

    #[test]
    fn test_update_merges_fields() {
        let mut catalog = seeded();

        let updated = catalog
            .update(
                "7",
                ExercisePatch {
                    name: Some("plank laterale".into()),
                    difficulty: Some(Difficulty::Intermedio),
                    ..ExercisePatch::default()
                },
            )
            .unwrap();

        assert!(updated);
        let plank = catalog.get("7").unwrap();
        assert_eq!(plank.name, "PLANK LATERALE");
        assert_eq!(plank.difficulty, Some(Difficulty::Intermedio));
        assert_eq!(plank.muscle, "Addominali");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut catalog = seeded();
        let before = catalog.list().to_vec();

        let updated = catalog
            .update(
                "does-not-exist",
                ExercisePatch {
                    name: Some("X".into()),
                    ..ExercisePatch::default()
                },
            )
            .unwrap();

        assert!(!updated);
        assert_eq!(catalog.list(), before.as_slice());
    }

    #[test]
    fn test_update_rejecting_blank_name_leaves_record() {
        let mut catalog = seeded();
        let before = catalog.list().to_vec();

        let result = catalog.update(
            "1",
            ExercisePatch {
                muscle: Some("Petto alto".into()),
                name: Some("   ".into()),
                ..ExercisePatch::default()
            },
        );

        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(catalog.list(), before.as_slice());
    }

    #[test]
    fn test_delete() {
        let mut catalog = seeded();
        assert!(catalog.delete("3"));
        assert!(catalog.get("3").is_none());
        assert_eq!(catalog.len(), 7);

        let before = catalog.list().to_vec();
        assert!(!catalog.delete("3"));
        assert_eq!(catalog.list(), before.as_slice());
    }

    #[test]
    fn test_duplicate_copies_fields_under_new_id() {
        let mut catalog = seeded();
        let source = catalog
            .add(
                NewExercise::new("hip thrust", ExerciseCategory::Gambe, "Glutei", "Bilanciere")
                    .with_difficulty(Difficulty::Avanzato)
                    .with_description("Spinta d'anca"),
            )
            .unwrap();

        let copy = catalog.duplicate(&source.id).unwrap().unwrap();

        assert_ne!(copy.id, source.id);
        assert_eq!(copy.name, "HIP THRUST - COPIA");
        assert_eq!(copy.category, ExerciseCategory::Gambe);
        assert_eq!(copy.muscle, "Glutei");
        assert_eq!(copy.difficulty, Some(Difficulty::Avanzato));
        assert_eq!(copy.description.as_deref(), Some("Spinta d'anca"));
        assert_eq!(catalog.get(&source.id), Some(&source));
        assert_eq!(catalog.get(&copy.id), Some(&copy));
        assert_eq!(catalog.len(), 10);
    }

    #[test]
    fn test_duplicate_unknown_id_is_noop() {
        let mut catalog = seeded();
        let before = catalog.list().to_vec();
        assert_eq!(catalog.duplicate("nope").unwrap(), None);
        assert_eq!(catalog.list(), before.as_slice());
    }

    #[test]
    fn test_query_search_matches_name_or_muscle() {
        let catalog = seeded();

        let query = ExerciseQuery {
            search: Some("dors".into()),
            ..ExerciseQuery::default()
        };
        let names: Vec<_> = catalog.query(&query).iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["STACCO", "TRAZIONI"]);
    }

    #[test]
    fn test_query_filters_and_sorts_descending() {
        let catalog = seeded();

        let query = ExerciseQuery {
            category: Some(ExerciseCategory::Braccia),
            descending: true,
            ..ExerciseQuery::default()
        };
        let names: Vec<_> = catalog.query(&query).iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["FRENCH PRESS", "CURL BICIPITI"]);

        let query = ExerciseQuery {
            equipment: Some("manubri".into()),
            ..ExerciseQuery::default()
        };
        assert_eq!(catalog.query(&query).len(), 1);
    }

    #[test]
    fn test_query_sort_by_difficulty() {
        let catalog = seeded();
        let query = ExerciseQuery {
            difficulty: Some(Difficulty::Principiante),
            sort: SortField::Muscle,
            ..ExerciseQuery::default()
        };
        let muscles: Vec<_> = catalog.query(&query).iter().map(|e| e.muscle.as_str()).collect();
        assert_eq!(muscles, vec!["Addominali", "Bicipiti"]);
    }

    #[test]
    fn test_sort_field_parse() {
        assert_eq!("Muscle".parse::<SortField>().unwrap(), SortField::Muscle);
        assert!("weight".parse::<SortField>().is_err());
    }
}
