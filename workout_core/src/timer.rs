//! Rest countdown shown between sets.
//!
//! The timer is a plain value that the host ticks once per second. It never
//! gates set completion. When it reaches zero it stops and rearms itself with
//! the full rest duration.

use crate::session::Advance;

/// Rest used when an exercise has no positive `restTime`
pub const DEFAULT_REST_SECONDS: u32 = 90;

/// Resolve an exercise's rest time, falling back when it is not positive
pub fn rest_seconds(rest_time: u32, fallback: u32) -> u32 {
    if rest_time > 0 {
        rest_time
    } else {
        fallback.max(1)
    }
}

/// Format seconds as `m:ss`
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Result of one tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Timer is not running; nothing changed
    Idle,
    Running { remaining: u32 },
    /// Countdown hit zero; the timer stopped and was rearmed
    Elapsed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestTimer {
    duration: u32,
    remaining: u32,
    running: bool,
}

impl Default for RestTimer {
    fn default() -> Self {
        Self::new(DEFAULT_REST_SECONDS)
    }
}

impl RestTimer {
    /// Create a stopped timer armed with `duration` seconds
    pub fn new(duration: u32) -> Self {
        let duration = duration.max(1);
        Self {
            duration,
            remaining: duration,
            running: false,
        }
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        if self.remaining == 0 {
            self.remaining = self.duration;
        }
        self.running = true;
    }

    /// Stop ticking, keeping the remaining time
    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Stop and rearm with the current duration
    pub fn reset(&mut self) {
        self.remaining = self.duration;
        self.running = false;
    }

    /// Stop and rearm with a new duration
    pub fn reset_to(&mut self, duration: u32) {
        self.duration = duration.max(1);
        self.reset();
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> Tick {
        if !self.running {
            return Tick::Idle;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            tracing::debug!("Rest timer elapsed after {}s", self.duration);
            self.reset();
            return Tick::Elapsed;
        }
        Tick::Running {
            remaining: self.remaining,
        }
    }

    /// React to a completed set.
    ///
    /// A new set starts the countdown where it stands; a new exercise rearms
    /// it with that exercise's rest and leaves it stopped.
    pub fn on_advance(&mut self, advance: Advance, next_rest: u32) {
        match advance {
            Advance::NextSet => self.start(),
            Advance::NextExercise => self.reset_to(next_rest),
            Advance::Finished => {}
        }
    }

    pub fn percent_remaining(&self) -> f64 {
        self.remaining as f64 / self.duration as f64 * 100.0
    }

    /// Remaining time as `m:ss`
    pub fn clock(&self) -> String {
        format_clock(self.remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down_while_running() {
        let mut timer = RestTimer::new(90);
        timer.start();
        for _ in 0..5 {
            timer.tick();
        }
        assert_eq!(timer.remaining(), 85);
        assert!(timer.is_running());
    }

    #[test]
    fn test_stops_and_rearms_at_zero() {
        let mut timer = RestTimer::new(90);
        timer.start();

        for _ in 0..89 {
            assert!(matches!(timer.tick(), Tick::Running { .. }));
        }
        assert_eq!(timer.remaining(), 1);

        assert_eq!(timer.tick(), Tick::Elapsed);
        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), 90);
        assert_eq!(timer.tick(), Tick::Idle);
    }

    #[test]
    fn test_pause_keeps_remaining() {
        let mut timer = RestTimer::new(60);
        timer.start();
        timer.tick();
        timer.tick();
        timer.toggle();

        assert!(!timer.is_running());
        assert_eq!(timer.tick(), Tick::Idle);
        assert_eq!(timer.remaining(), 58);

        timer.toggle();
        assert_eq!(timer.tick(), Tick::Running { remaining: 57 });
    }

    #[test]
    fn test_reset_to_new_duration_stops() {
        let mut timer = RestTimer::new(60);
        timer.start();
        timer.tick();

        timer.reset_to(120);
        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), 120);
        assert_eq!(timer.duration(), 120);
    }

    #[test]
    fn test_on_advance() {
        let mut timer = RestTimer::new(60);
        timer.start();
        timer.tick();

        timer.on_advance(Advance::NextSet, 999);
        assert!(timer.is_running());
        assert_eq!(timer.remaining(), 59);

        timer.on_advance(Advance::NextExercise, 180);
        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), 180);

        timer.on_advance(Advance::Finished, 30);
        assert_eq!(timer.remaining(), 180);
    }

    #[test]
    fn test_rest_seconds_fallback() {
        assert_eq!(rest_seconds(120, 90), 120);
        assert_eq!(rest_seconds(0, 90), 90);
        assert_eq!(rest_seconds(0, 0), 1);
    }

    #[test]
    fn test_clock_formatting() {
        assert_eq!(format_clock(90), "1:30");
        assert_eq!(format_clock(5), "0:05");
        assert_eq!(format_clock(180), "3:00");

        let mut timer = RestTimer::new(120);
        timer.start();
        timer.tick();
        assert_eq!(timer.clock(), "1:59");
        assert!((timer.percent_remaining() - 119.0 / 120.0 * 100.0).abs() < 1e-9);
    }
}
