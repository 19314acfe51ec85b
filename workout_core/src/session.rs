//! Active workout session state machine.
//!
//! A session is started from a plan, advanced one set at a time and finally
//! completed (or abandoned) by the application handle. "Complete" is never
//! stored: it is derived from the completion matrix.

use crate::{Error, Result, SessionPatch, WorkoutExercise, WorkoutPlan, WorkoutSession};
use chrono::{DateTime, Duration, Utc};

/// What a completed set moved the session to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Same exercise, next set; the rest timer starts
    NextSet,
    /// First set of the following exercise
    NextExercise,
    /// Last set of the last exercise; indices stay put
    Finished,
}

/// Completion summary of a session
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionProgress {
    pub completed: usize,
    pub total: usize,
    pub percent: f64,
    pub is_complete: bool,
}

impl WorkoutSession {
    /// Start a session from a snapshot of `plan`.
    ///
    /// Fails with a validation error when the plan has no exercises or a
    /// prescription has zero sets.
    pub fn start(plan: &WorkoutPlan, now: DateTime<Utc>) -> Result<Self> {
        if plan.exercises.is_empty() {
            return Err(Error::validation(format!(
                "plan '{}' has no exercises",
                plan.name
            )));
        }
        for exercise in &plan.exercises {
            exercise.validate()?;
        }

        let completed_sets = plan
            .exercises
            .iter()
            .map(|e| vec![false; e.sets as usize])
            .collect();

        Ok(Self {
            plan_id: plan.id.clone(),
            plan_name: plan.name.clone(),
            start_time: now,
            exercises: plan.exercises.clone(),
            completed_sets,
            current_exercise: 0,
            current_set: 0,
            is_active: true,
        })
    }

    /// Whether the session can be shown and advanced.
    ///
    /// An invalid session must be treated exactly like no session.
    pub fn is_valid(&self) -> bool {
        !self.exercises.is_empty() && self.current_exercise < self.exercises.len()
    }

    /// The exercise currently being performed
    pub fn current(&self) -> Option<&WorkoutExercise> {
        self.exercises.get(self.current_exercise)
    }

    /// Mark the current set done and move on.
    ///
    /// Returns `None` without touching anything if the session is invalid.
    pub fn complete_set(&mut self) -> Option<Advance> {
        if !self.is_valid() {
            return None;
        }

        let (ex, set) = (self.current_exercise, self.current_set);
        if let Some(done) = self.completed_sets.get_mut(ex).and_then(|row| row.get_mut(set)) {
            *done = true;
        }

        let sets = self.exercises[ex].sets as usize;
        let advance = if set + 1 < sets {
            self.current_set += 1;
            Advance::NextSet
        } else if ex + 1 < self.exercises.len() {
            self.current_exercise += 1;
            self.current_set = 0;
            Advance::NextExercise
        } else {
            Advance::Finished
        };

        tracing::debug!(
            "Completed set {}/{} of {}: {:?}",
            set + 1,
            sets,
            self.exercises[ex].name,
            advance
        );
        Some(advance)
    }

    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets as usize).sum()
    }

    pub fn completed_count(&self) -> usize {
        self.completed_sets
            .iter()
            .flatten()
            .filter(|done| **done)
            .count()
    }

    pub fn is_complete(&self) -> bool {
        let total = self.total_sets();
        total > 0 && self.completed_count() == total
    }

    pub fn progress(&self) -> SessionProgress {
        let total = self.total_sets();
        let completed = self.completed_count();
        let percent = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64 * 100.0
        };

        SessionProgress {
            completed,
            total,
            percent,
            is_complete: total > 0 && completed == total,
        }
    }

    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        now - self.start_time
    }

    /// Apply a partial patch atomically.
    ///
    /// The patched session must keep the matrix shape and index bounds;
    /// otherwise the session is left as it was.
    pub fn apply(&mut self, patch: SessionPatch) -> Result<()> {
        let mut next = self.clone();
        if let Some(completed_sets) = patch.completed_sets {
            next.completed_sets = completed_sets;
        }
        if let Some(current_exercise) = patch.current_exercise {
            next.current_exercise = current_exercise;
        }
        if let Some(current_set) = patch.current_set {
            next.current_set = current_set;
        }
        if let Some(is_active) = patch.is_active {
            next.is_active = is_active;
        }

        next.check_shape()?;
        *self = next;
        Ok(())
    }

    /// Verify the completion matrix mirrors the exercise list and the
    /// indices point inside it
    pub fn check_shape(&self) -> Result<()> {
        if self.completed_sets.len() != self.exercises.len() {
            return Err(Error::InvalidSession(format!(
                "completion matrix has {} rows for {} exercises",
                self.completed_sets.len(),
                self.exercises.len()
            )));
        }
        for (i, (row, exercise)) in self.completed_sets.iter().zip(&self.exercises).enumerate() {
            if row.len() != exercise.sets as usize {
                return Err(Error::InvalidSession(format!(
                    "row {} has {} entries but '{}' has {} sets",
                    i,
                    row.len(),
                    exercise.name,
                    exercise.sets
                )));
            }
        }

        if self.exercises.is_empty() {
            return Ok(());
        }
        let Some(current) = self.current() else {
            return Err(Error::InvalidSession(format!(
                "current exercise {} out of range",
                self.current_exercise
            )));
        };
        if self.current_set >= current.sets as usize {
            return Err(Error::InvalidSession(format!(
                "current set {} out of range for '{}'",
                self.current_set, current.name
            )));
        }
        Ok(())
    }
}
