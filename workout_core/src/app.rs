//! Application state handle.
//!
//! [`WorkoutApp`] owns every collection (exercises, plans, the active
//! session, stats) plus the rest timer, and is the only way frontends read or
//! change them. Each mutation writes the affected collection back to the
//! store before returning.

use crate::catalog::{default_exercises, default_plans, default_stats, seed};
use crate::exercises::{ExerciseCatalog, ExerciseQuery};
use crate::plans::PlanCatalog;
use crate::session::Advance;
use crate::store::{
    load_json, save_json, KeyValueStore, EXERCISES_KEY, PLANS_KEY, SESSION_KEY, STATS_KEY,
};
use crate::timer::{rest_seconds, RestTimer, Tick};
use crate::{
    Config, Error, Exercise, ExercisePatch, NewExercise, NewPlan, PlanPatch, Result,
    SessionPatch, WorkoutExercise, WorkoutPlan, WorkoutSession, WorkoutStats,
};
use chrono::Utc;

pub struct WorkoutApp<S: KeyValueStore> {
    store: S,
    config: Config,
    exercises: ExerciseCatalog,
    plans: PlanCatalog,
    session: Option<WorkoutSession>,
    stats: WorkoutStats,
    timer: RestTimer,
}

impl<S: KeyValueStore> WorkoutApp<S> {
    /// Load every collection from `store`, seeding the ones that are missing
    /// or unreadable
    pub fn load(store: S, config: &Config) -> Result<Self> {
        seed().check()?;

        let mut app = Self {
            timer: RestTimer::new(config.timer.default_rest_seconds),
            store,
            config: config.clone(),
            exercises: ExerciseCatalog::default(),
            plans: PlanCatalog::default(),
            session: None,
            stats: WorkoutStats::default(),
        };

        match load_json::<Vec<Exercise>, _>(&app.store, EXERCISES_KEY)? {
            Some(exercises) => app.exercises = ExerciseCatalog::new(exercises),
            None => {
                tracing::info!("Seeding default exercise library");
                app.exercises = ExerciseCatalog::new(default_exercises());
                app.persist_exercises()?;
            }
        }

        match load_json::<Vec<WorkoutPlan>, _>(&app.store, PLANS_KEY)? {
            Some(plans) => app.plans = PlanCatalog::new(plans),
            None => {
                tracing::info!("Seeding default workout plans");
                app.plans = PlanCatalog::new(default_plans());
                app.persist_plans()?;
            }
        }

        match load_json::<WorkoutStats, _>(&app.store, STATS_KEY)? {
            Some(stats) => app.stats = stats,
            None => {
                app.stats = default_stats();
                app.persist_stats()?;
            }
        }

        if app.config.session.persist {
            app.session = load_json::<WorkoutSession, _>(&app.store, SESSION_KEY)?
                .filter(|session| {
                    let usable = session.is_valid() && session.check_shape().is_ok();
                    if !usable {
                        tracing::warn!(
                            "Discarding stored session for plan {}: inconsistent state",
                            session.plan_id
                        );
                    }
                    usable
                });
        }
        app.rearm_timer();

        tracing::debug!(
            "Loaded {} exercises, {} plans, session active: {}",
            app.exercises.len(),
            app.plans.len(),
            app.session.is_some()
        );
        Ok(app)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // ========================================================================
    // Exercises
    // ========================================================================

    pub fn list_exercises(&self) -> &[Exercise] {
        self.exercises.list()
    }

    pub fn get_exercise(&self, id: &str) -> Option<&Exercise> {
        self.exercises.get(id)
    }

    pub fn query_exercises(&self, query: &ExerciseQuery) -> Vec<&Exercise> {
        self.exercises.query(query)
    }

    pub fn add_exercise(&mut self, new: NewExercise) -> Result<Exercise> {
        let exercise = self.exercises.add(new)?;
        self.persist_exercises()?;
        Ok(exercise)
    }

    /// `Ok(false)` when no exercise has `id`
    pub fn update_exercise(&mut self, id: &str, patch: ExercisePatch) -> Result<bool> {
        let updated = self.exercises.update(id, patch)?;
        if updated {
            self.persist_exercises()?;
        }
        Ok(updated)
    }

    /// Copy an exercise under a fresh id. `Ok(None)` when no exercise has `id`
    pub fn duplicate_exercise(&mut self, id: &str) -> Result<Option<Exercise>> {
        let copy = self.exercises.duplicate(id)?;
        if copy.is_some() {
            self.persist_exercises()?;
        }
        Ok(copy)
    }

    pub fn delete_exercise(&mut self, id: &str) -> Result<bool> {
        let deleted = self.exercises.delete(id);
        if deleted {
            self.persist_exercises()?;
        }
        Ok(deleted)
    }

    // ========================================================================
    // Plans
    // ========================================================================

    pub fn list_plans(&self) -> &[WorkoutPlan] {
        self.plans.list()
    }

    pub fn get_plan(&self, id: &str) -> Option<&WorkoutPlan> {
        self.plans.get(id)
    }

    pub fn add_plan(&mut self, new: NewPlan) -> Result<WorkoutPlan> {
        let plan = self.plans.add(new)?;
        self.persist_plans()?;
        Ok(plan)
    }

    pub fn update_plan(&mut self, plan_id: &str, patch: PlanPatch) -> Result<bool> {
        let updated = self.plans.update(plan_id, patch)?;
        if updated {
            self.persist_plans()?;
        }
        Ok(updated)
    }

    /// Delete a plan. An active session started from it keeps running on
    /// its own copy of the exercises.
    pub fn delete_plan(&mut self, plan_id: &str) -> Result<bool> {
        let deleted = self.plans.delete(plan_id);
        if deleted {
            self.persist_plans()?;
        }
        Ok(deleted)
    }

    pub fn add_exercise_to_plan(&mut self, plan_id: &str, exercise: WorkoutExercise) -> Result<bool> {
        let added = self.plans.add_exercise(plan_id, exercise)?;
        if added {
            self.persist_plans()?;
        }
        Ok(added)
    }

    /// Prescribe a library exercise into a plan, copying its current name
    pub fn prescribe_exercise(
        &mut self,
        plan_id: &str,
        exercise_id: &str,
        sets: u32,
        reps: &str,
        weight: f64,
        rest_time: u32,
    ) -> Result<bool> {
        let exercise = self
            .exercises
            .get(exercise_id)
            .ok_or_else(|| Error::NotFound(format!("exercise '{}'", exercise_id)))?;
        let prescribed = WorkoutExercise::from_exercise(exercise, sets, reps, weight, rest_time);
        self.add_exercise_to_plan(plan_id, prescribed)
    }

    pub fn remove_exercise_from_plan(
        &mut self,
        plan_id: &str,
        index: usize,
    ) -> Result<Option<WorkoutExercise>> {
        let removed = self.plans.remove_exercise(plan_id, index);
        if removed.is_some() {
            self.persist_plans()?;
        }
        Ok(removed)
    }

    // ========================================================================
    // Session
    // ========================================================================

    /// The active session, if it passes the validity guard
    pub fn session(&self) -> Option<&WorkoutSession> {
        self.session.as_ref().filter(|s| s.is_valid())
    }

    /// Start a session from `plan_id`, replacing any session in progress
    pub fn start_session(&mut self, plan_id: &str) -> Result<&WorkoutSession> {
        let plan = self
            .plans
            .get(plan_id)
            .ok_or_else(|| Error::NotFound(format!("plan '{}'", plan_id)))?;
        let session = WorkoutSession::start(plan, Utc::now())?;

        if let Some(previous) = &self.session {
            tracing::info!(
                "Discarding session for {} started at {}",
                previous.plan_name,
                previous.start_time
            );
        }
        tracing::info!(
            "Started {} with {} exercises ({} sets)",
            session.plan_name,
            session.exercises.len(),
            session.total_sets()
        );

        let first_rest = session.current().map(|e| e.rest_time).unwrap_or(0);
        self.timer
            .reset_to(rest_seconds(first_rest, self.config.timer.default_rest_seconds));
        if self.config.session.persist {
            save_json(&mut self.store, SESSION_KEY, &session)?;
        }

        Ok(&*self.session.insert(session))
    }

    /// Mark the current set done. `Ok(None)` when no valid session exists.
    pub fn complete_set(&mut self) -> Result<Option<Advance>> {
        let Some(session) = self.session.as_mut() else {
            return Ok(None);
        };
        let Some(advance) = session.complete_set() else {
            return Ok(None);
        };

        let next_rest = session.current().map(|e| e.rest_time).unwrap_or(0);
        let next_rest = rest_seconds(next_rest, self.config.timer.default_rest_seconds);
        self.timer.on_advance(advance, next_rest);

        self.persist_session()?;
        Ok(Some(advance))
    }

    /// Apply a partial update to the session. `Ok(false)` without a session.
    pub fn update_session(&mut self, patch: SessionPatch) -> Result<bool> {
        let Some(session) = self.session.as_mut() else {
            return Ok(false);
        };

        let previous_exercise = session.current_exercise;
        session.apply(patch)?;
        if session.current_exercise != previous_exercise {
            self.rearm_timer();
        }

        self.persist_session()?;
        Ok(true)
    }

    /// Finish the session, complete or not.
    ///
    /// Bumps the workout counters, stamps the plan's `lastUsed` and clears
    /// the session. Returns `Ok(false)` when there was nothing to complete.
    pub fn complete_session(&mut self) -> Result<bool> {
        let Some(session) = self.session.as_ref() else {
            return Ok(false);
        };

        let progress = session.progress();
        let plan_id = session.plan_id.clone();
        tracing::info!(
            "Completing {}: {}/{} sets",
            session.plan_name,
            progress.completed,
            progress.total
        );

        // Memory is only touched once the store has accepted the change
        if self.config.session.persist {
            self.store.remove(SESSION_KEY)?;
        }
        let mut stats = self.stats.clone();
        stats.record_completion();
        save_json(&mut self.store, STATS_KEY, &stats)?;

        self.session = None;
        self.stats = stats;

        if self
            .plans
            .mark_used(&plan_id, &self.config.plans.last_used_label)
        {
            self.persist_plans()?;
        }

        self.rearm_timer();
        Ok(true)
    }

    // ========================================================================
    // Stats
    // ========================================================================

    pub fn stats(&self) -> &WorkoutStats {
        &self.stats
    }

    // ========================================================================
    // Rest timer
    // ========================================================================

    pub fn timer(&self) -> &RestTimer {
        &self.timer
    }

    pub fn start_timer(&mut self) {
        self.timer.start();
    }

    pub fn pause_timer(&mut self) {
        self.timer.pause();
    }

    pub fn toggle_timer(&mut self) {
        self.timer.toggle();
    }

    /// Stop and rearm with the rest of the exercise current right now
    pub fn reset_timer(&mut self) {
        self.rearm_timer();
    }

    /// One-second tick. Without a valid session the timer is stopped
    /// instead.
    pub fn tick_timer(&mut self) -> Tick {
        if self.session().is_none() {
            self.timer.pause();
            return Tick::Idle;
        }
        self.timer.tick()
    }

    fn current_rest(&self) -> u32 {
        let rest = self
            .session()
            .and_then(|s| s.current())
            .map(|e| e.rest_time)
            .unwrap_or(0);
        rest_seconds(rest, self.config.timer.default_rest_seconds)
    }

    fn rearm_timer(&mut self) {
        let rest = self.current_rest();
        self.timer.reset_to(rest);
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    fn persist_exercises(&mut self) -> Result<()> {
        save_json(&mut self.store, EXERCISES_KEY, self.exercises.list())
    }

    fn persist_plans(&mut self) -> Result<()> {
        save_json(&mut self.store, PLANS_KEY, self.plans.list())
    }

    fn persist_stats(&mut self) -> Result<()> {
        save_json(&mut self.store, STATS_KEY, &self.stats)
    }

    fn persist_session(&mut self) -> Result<()> {
        if !self.config.session.persist {
            return Ok(());
        }
        match &self.session {
            Some(session) => save_json(&mut self.store, SESSION_KEY, session),
            None => self.store.remove(SESSION_KEY),
        }
    }
}
