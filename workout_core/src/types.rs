//! Core domain types for the workout tracker.
//!
//! This module defines the records owned by the data layer:
//! - Exercises and their classification enums
//! - Plan prescriptions and workout plans
//! - The single active workout session
//! - Rolling workout statistics
//!
//! Every persisted record serializes with camelCase keys so the stored JSON
//! mirrors the entity shapes (`restTime`, `lastUsed`, `completedSets`, ...).

use crate::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Exercise Types
// ============================================================================

/// Muscle-group category of an exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExerciseCategory {
    Petto,
    Schiena,
    Spalle,
    Braccia,
    Gambe,
    Core,
    Cardio,
    Funzionale,
}

impl ExerciseCategory {
    pub const ALL: [ExerciseCategory; 8] = [
        ExerciseCategory::Petto,
        ExerciseCategory::Schiena,
        ExerciseCategory::Spalle,
        ExerciseCategory::Braccia,
        ExerciseCategory::Gambe,
        ExerciseCategory::Core,
        ExerciseCategory::Cardio,
        ExerciseCategory::Funzionale,
    ];

    /// Stored label, e.g. `"PETTO"`
    pub fn label(&self) -> &'static str {
        match self {
            ExerciseCategory::Petto => "PETTO",
            ExerciseCategory::Schiena => "SCHIENA",
            ExerciseCategory::Spalle => "SPALLE",
            ExerciseCategory::Braccia => "BRACCIA",
            ExerciseCategory::Gambe => "GAMBE",
            ExerciseCategory::Core => "CORE",
            ExerciseCategory::Cardio => "CARDIO",
            ExerciseCategory::Funzionale => "FUNZIONALE",
        }
    }
}

impl fmt::Display for ExerciseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for ExerciseCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label() == wanted)
            .ok_or_else(|| Error::validation(format!("unknown category '{}'", s)))
    }
}

/// Difficulty rating of an exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Principiante,
    Intermedio,
    Avanzato,
    Esperto,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Principiante,
        Difficulty::Intermedio,
        Difficulty::Avanzato,
        Difficulty::Esperto,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Principiante => "PRINCIPIANTE",
            Difficulty::Intermedio => "INTERMEDIO",
            Difficulty::Avanzato => "AVANZATO",
            Difficulty::Esperto => "ESPERTO",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.label() == wanted)
            .ok_or_else(|| Error::validation(format!("unknown difficulty '{}'", s)))
    }
}

/// An exercise definition in the library
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub category: ExerciseCategory,
    pub muscle: String,
    pub equipment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

/// Fields for creating an exercise (the id is assigned by the catalog)
#[derive(Clone, Debug, PartialEq)]
pub struct NewExercise {
    pub name: String,
    pub category: ExerciseCategory,
    pub muscle: String,
    pub equipment: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub video_url: Option<String>,
}

impl NewExercise {
    pub fn new(
        name: impl Into<String>,
        category: ExerciseCategory,
        muscle: impl Into<String>,
        equipment: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            muscle: muscle.into(),
            equipment: equipment.into(),
            description: None,
            instructions: None,
            difficulty: None,
            video_url: None,
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update of an exercise; `None` leaves the field untouched
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExercisePatch {
    pub name: Option<String>,
    pub category: Option<ExerciseCategory>,
    pub muscle: Option<String>,
    pub equipment: Option<String>,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub video_url: Option<String>,
}

// ============================================================================
// Plan Types
// ============================================================================

/// One exercise prescription inside a plan.
///
/// The name is copied from the library at attachment time; it is not a
/// reference, so renaming or deleting the source exercise leaves plans alone.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    pub name: String,
    pub sets: u32,
    pub reps: String,
    /// Kilograms
    pub weight: f64,
    /// Seconds
    pub rest_time: u32,
}

/// A named, ordered template of exercise prescriptions
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub id: String,
    pub name: String,
    pub description: String,
    pub exercises: Vec<WorkoutExercise>,
    pub difficulty: String,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<String>,
}

/// Fields for creating a plan; plans always start without exercises
#[derive(Clone, Debug, PartialEq)]
pub struct NewPlan {
    pub name: String,
    pub description: String,
    pub difficulty: String,
    pub duration: String,
}

impl NewPlan {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            difficulty: "INTERMEDIO".into(),
            duration: "45-60 min".into(),
        }
    }
}

/// Partial update of a plan; `None` leaves the field untouched
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlanPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub exercises: Option<Vec<WorkoutExercise>>,
    pub difficulty: Option<String>,
    pub duration: Option<String>,
    pub last_used: Option<String>,
}

// ============================================================================
// Session Types
// ============================================================================

/// The single in-progress execution of a plan.
///
/// `exercises` is a frozen copy of the plan at start time and
/// `completed_sets[i].len() == exercises[i].sets` for every `i`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    pub plan_id: String,
    pub plan_name: String,
    pub start_time: DateTime<Utc>,
    pub exercises: Vec<WorkoutExercise>,
    pub completed_sets: Vec<Vec<bool>>,
    pub current_exercise: usize,
    pub current_set: usize,
    pub is_active: bool,
}

/// Partial update of the active session, applied atomically
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionPatch {
    pub completed_sets: Option<Vec<Vec<bool>>>,
    pub current_exercise: Option<usize>,
    pub current_set: Option<usize>,
    pub is_active: Option<bool>,
}

// ============================================================================
// Statistics
// ============================================================================

/// Rolling workout counters
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStats {
    pub total_workouts: u32,
    pub weekly_workouts: u32,
    pub total_volume: f64,
    pub weekly_volume: f64,
    pub streak: u32,
    pub completion_rate: f64,
}
