//! Workout plan catalog: named plans holding ordered exercise prescriptions.

use crate::exercises::fresh_id;
use crate::{Error, Exercise, NewPlan, PlanPatch, Result, WorkoutExercise, WorkoutPlan};

impl WorkoutExercise {
    /// Prescribe a library exercise, copying its current name
    pub fn from_exercise(
        exercise: &Exercise,
        sets: u32,
        reps: impl Into<String>,
        weight: f64,
        rest_time: u32,
    ) -> Self {
        Self {
            name: exercise.name.clone(),
            sets,
            reps: reps.into(),
            weight,
            rest_time,
        }
    }

    /// Check the prescription can drive a session
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("prescribed exercise needs a name"));
        }
        if self.sets == 0 {
            return Err(Error::validation(format!(
                "'{}' must have at least one set",
                self.name
            )));
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(Error::validation(format!(
                "'{}' has invalid weight {}",
                self.name, self.weight
            )));
        }
        Ok(())
    }
}

/// The plan catalog
#[derive(Clone, Debug, Default)]
pub struct PlanCatalog {
    plans: Vec<WorkoutPlan>,
}

impl PlanCatalog {
    pub fn new(plans: Vec<WorkoutPlan>) -> Self {
        Self { plans }
    }

    pub fn list(&self) -> &[WorkoutPlan] {
        &self.plans
    }

    pub fn get(&self, id: &str) -> Option<&WorkoutPlan> {
        self.plans.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut WorkoutPlan> {
        self.plans.iter_mut().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Create an empty plan. Name is trimmed and upper-cased.
    pub fn add(&mut self, new: NewPlan) -> Result<WorkoutPlan> {
        if new.name.trim().is_empty() {
            return Err(Error::validation("plan name is required"));
        }
        if new.description.trim().is_empty() {
            return Err(Error::validation("plan description is required"));
        }

        let plan = WorkoutPlan {
            id: fresh_id(|candidate| self.get(candidate).is_some()),
            name: new.name.trim().to_uppercase(),
            description: new.description.trim().to_string(),
            exercises: Vec::new(),
            difficulty: new.difficulty,
            duration: new.duration,
            last_used: None,
        };

        tracing::info!("Added plan {} ({})", plan.name, plan.id);
        self.plans.push(plan.clone());
        Ok(plan)
    }

    /// Append a prescription. `Ok(false)` if the plan does not exist.
    pub fn add_exercise(&mut self, plan_id: &str, exercise: WorkoutExercise) -> Result<bool> {
        exercise.validate()?;

        let Some(plan) = self.get_mut(plan_id) else {
            tracing::debug!("add_exercise_to_plan: no plan with id {}", plan_id);
            return Ok(false);
        };

        tracing::info!("Added {} to plan {}", exercise.name, plan.name);
        plan.exercises.push(exercise);
        Ok(true)
    }

    /// Remove the prescription at `index`, shifting later ones down.
    ///
    /// Unknown plans and out-of-range indices return `None` and change nothing.
    pub fn remove_exercise(&mut self, plan_id: &str, index: usize) -> Option<WorkoutExercise> {
        let plan = self.get_mut(plan_id)?;
        if index >= plan.exercises.len() {
            tracing::debug!(
                "remove_exercise_from_plan: index {} out of range for plan {}",
                index,
                plan_id
            );
            return None;
        }

        let removed = plan.exercises.remove(index);
        tracing::info!("Removed {} from plan {}", removed.name, plan.name);
        Some(removed)
    }

    /// Merge `patch` over the plan. `Ok(false)` if the plan does not exist.
    pub fn update(&mut self, plan_id: &str, patch: PlanPatch) -> Result<bool> {
        if self.get(plan_id).is_none() {
            tracing::debug!("update_plan: no plan with id {}", plan_id);
            return Ok(false);
        }
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(Error::validation("plan name is required"));
            }
        }
        if let Some(description) = &patch.description {
            if description.trim().is_empty() {
                return Err(Error::validation("plan description is required"));
            }
        }
        if let Some(exercises) = &patch.exercises {
            for exercise in exercises {
                exercise.validate()?;
            }
        }

        let Some(plan) = self.get_mut(plan_id) else {
            return Ok(false);
        };

        if let Some(name) = patch.name {
            plan.name = name.trim().to_uppercase();
        }
        if let Some(description) = patch.description {
            plan.description = description.trim().to_string();
        }
        if let Some(exercises) = patch.exercises {
            plan.exercises = exercises;
        }
        if let Some(difficulty) = patch.difficulty {
            plan.difficulty = difficulty;
        }
        if let Some(duration) = patch.duration {
            plan.duration = duration;
        }
        if let Some(last_used) = patch.last_used {
            plan.last_used = Some(last_used);
        }

        tracing::info!("Updated plan {}", plan_id);
        Ok(true)
    }

    pub fn delete(&mut self, plan_id: &str) -> bool {
        let before = self.plans.len();
        self.plans.retain(|p| p.id != plan_id);
        let removed = self.plans.len() != before;
        if removed {
            tracing::info!("Deleted plan {}", plan_id);
        }
        removed
    }

    /// Stamp the plan's `lastUsed` marker
    pub fn mark_used(&mut self, plan_id: &str, label: &str) -> bool {
        match self.get_mut(plan_id) {
            Some(plan) => {
                plan.last_used = Some(label.to_string());
                true
            }
            None => false,
        }
    }
}
