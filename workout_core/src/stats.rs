//! Rolling workout statistics.
//!
//! Only completing a session changes the counters. Volume and completion rate
//! are carried as stored; nothing recomputes them and nothing resets the
//! weekly counters.

use crate::WorkoutStats;

impl WorkoutStats {
    /// Count one finished (or abandoned) session
    pub fn record_completion(&mut self) {
        self.total_workouts = self.total_workouts.saturating_add(1);
        self.weekly_workouts = self.weekly_workouts.saturating_add(1);
        self.streak = self.streak.saturating_add(1);

        tracing::info!(
            "Recorded workout: total={} weekly={} streak={}",
            self.total_workouts,
            self.weekly_workouts,
            self.streak
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_stats;

    #[test]
    fn test_record_completion_increments_counters() {
        let mut stats = default_stats();
        stats.record_completion();

        assert_eq!(stats.total_workouts, 48);
        assert_eq!(stats.weekly_workouts, 13);
        assert_eq!(stats.streak, 8);
    }

    #[test]
    fn test_record_completion_leaves_volume_alone() {
        let mut stats = default_stats();
        let before = stats.clone();
        stats.record_completion();

        assert_eq!(stats.total_volume, before.total_volume);
        assert_eq!(stats.weekly_volume, before.weekly_volume);
        assert_eq!(stats.completion_rate, before.completion_rate);
    }

    #[test]
    fn test_counters_saturate() {
        let mut stats = WorkoutStats {
            total_workouts: u32::MAX,
            ..WorkoutStats::default()
        };
        stats.record_completion();
        assert_eq!(stats.total_workouts, u32::MAX);
        assert_eq!(stats.weekly_workouts, 1);
    }
}
