use std::time::Duration;

use crate::error::{Result, SimError};

/// Largest value [`StepScheduler::progress_fraction`] reports.
const MAX_PROGRESS: f64 = 1.0 - f64::EPSILON;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

/// Turns frame time into discrete generation steps.
///
/// Elapsed time accumulates against `interval`. When a tick crosses the
/// threshold the interval is subtracted (the remainder carries over) and one
/// advance is signalled. At most one advance fires per tick, even when more
/// than one interval has built up.
#[derive(Clone, Debug)]
pub struct StepScheduler {
    accumulated: Duration,
    interval: Duration,
    state: RunState,
}

impl StepScheduler {
    /// Create a paused scheduler
    pub fn new(interval: Duration) -> Result<Self> {
        check_interval(interval)?;
        Ok(Self {
            accumulated: Duration::ZERO,
            interval,
            state: RunState::Paused,
        })
    }

    /// Feed elapsed wall-clock time. Returns true when one generation should
    /// advance. Inert while paused.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if self.state == RunState::Paused {
            return false;
        }

        self.accumulated = self.accumulated.saturating_add(elapsed);
        if self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            true
        } else {
            false
        }
    }

    /// Progress toward the next step in `[0, 1)`, for display
    pub fn progress_fraction(&self) -> f64 {
        let fraction = self.accumulated.as_secs_f64() / self.interval.as_secs_f64();
        fraction.min(MAX_PROGRESS)
    }

    /// Multiply the interval by `factor`. The accumulator is kept, so the
    /// progress bar does not snap.
    pub fn set_interval_scale(&mut self, factor: f64) -> Result<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(SimError::InvalidConfiguration(format!(
                "interval scale factor must be positive and finite, got {factor}"
            )));
        }
        let scaled = Duration::try_from_secs_f64(self.interval.as_secs_f64() * factor)
            .map_err(|e| {
                SimError::InvalidConfiguration(format!("scaled interval is unrepresentable: {e}"))
            })?;
        check_interval(scaled)?;

        self.interval = scaled;
        log::info!("Step interval: {:?}", self.interval);
        Ok(())
    }

    /// Flip between running and paused, returning the new state
    pub fn toggle_pause(&mut self) -> RunState {
        self.state = match self.state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
        };
        self.state
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.state = if paused {
            RunState::Paused
        } else {
            RunState::Running
        };
    }

    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }
}

fn check_interval(interval: Duration) -> Result<()> {
    if interval.is_zero() {
        return Err(SimError::InvalidConfiguration(
            "step interval must be positive".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(100);

    fn running() -> StepScheduler {
        let mut scheduler = StepScheduler::new(INTERVAL).unwrap();
        scheduler.set_paused(false);
        scheduler
    }

    #[test]
    fn test_starts_paused() {
        let scheduler = StepScheduler::new(INTERVAL).unwrap();
        assert_eq!(scheduler.state(), RunState::Paused);
        assert_eq!(scheduler.accumulated(), Duration::ZERO);
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(matches!(
            StepScheduler::new(Duration::ZERO),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_single_full_tick_fires_once() {
        let mut scheduler = running();
        assert!(scheduler.tick(INTERVAL));
        assert_eq!(scheduler.accumulated(), Duration::ZERO);
        assert!(!scheduler.tick(Duration::ZERO));
    }

    #[test]
    fn test_split_ticks_fire_once() {
        let mut scheduler = running();
        let fired = (0..10)
            .filter(|_| scheduler.tick(INTERVAL / 10))
            .count();
        assert_eq!(fired, 1);
        assert_eq!(scheduler.accumulated(), Duration::ZERO);
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut scheduler = running();
        assert!(!scheduler.tick(Duration::from_millis(70)));
        assert!(scheduler.tick(Duration::from_millis(70)));
        assert_eq!(scheduler.accumulated(), Duration::from_millis(40));
        assert!(scheduler.tick(Duration::from_millis(60)));
        assert_eq!(scheduler.accumulated(), Duration::ZERO);
    }

    #[test]
    fn test_at_most_one_advance_per_tick() {
        let mut scheduler = running();
        assert!(scheduler.tick(INTERVAL * 3));
        assert_eq!(scheduler.accumulated(), INTERVAL * 2);
        // The backlog drains one step per tick.
        assert!(scheduler.tick(Duration::ZERO));
        assert!(scheduler.tick(Duration::ZERO));
        assert!(!scheduler.tick(Duration::ZERO));
    }

    #[test]
    fn test_paused_ticks_are_inert() {
        let mut scheduler = running();
        scheduler.tick(Duration::from_millis(30));
        scheduler.set_paused(true);

        for _ in 0..50 {
            assert!(!scheduler.tick(INTERVAL));
        }
        assert_eq!(scheduler.accumulated(), Duration::from_millis(30));

        scheduler.toggle_pause();
        assert!(!scheduler.tick(Duration::from_millis(69)));
        assert!(scheduler.tick(Duration::from_millis(1)));
        assert!(!scheduler.tick(Duration::ZERO));
    }

    #[test]
    fn test_toggle_pause() {
        let mut scheduler = StepScheduler::new(INTERVAL).unwrap();
        assert_eq!(scheduler.toggle_pause(), RunState::Running);
        assert!(!scheduler.is_paused());
        assert_eq!(scheduler.toggle_pause(), RunState::Paused);
        assert!(scheduler.is_paused());
    }

    #[test]
    fn test_progress_monotonic_and_below_one() {
        let mut scheduler = running();
        let mut last = scheduler.progress_fraction();
        assert_eq!(last, 0.0);

        for _ in 0..9 {
            assert!(!scheduler.tick(Duration::from_millis(11)));
            let progress = scheduler.progress_fraction();
            assert!(progress >= last);
            assert!(progress < 1.0);
            last = progress;
        }

        assert!(scheduler.tick(Duration::from_millis(11)));
        let after = scheduler.progress_fraction();
        assert!((0.0..1.0).contains(&after));
        assert!(after < last);
    }

    #[test]
    fn test_progress_capped_below_one_with_backlog() {
        let mut scheduler = running();
        scheduler.tick(INTERVAL * 5);
        assert!(scheduler.progress_fraction() < 1.0);
    }

    #[test]
    fn test_scale_compounds() {
        let mut twice = StepScheduler::new(INTERVAL).unwrap();
        twice.set_interval_scale(1.25).unwrap();
        twice.set_interval_scale(0.8).unwrap();

        let mut once = StepScheduler::new(INTERVAL).unwrap();
        once.set_interval_scale(1.25 * 0.8).unwrap();

        let (a, b) = (twice.interval(), once.interval());
        let diff = if a > b { a - b } else { b - a };
        assert!(diff <= Duration::from_nanos(1), "diff was {diff:?}");
    }

    #[test]
    fn test_scale_keeps_accumulator() {
        let mut scheduler = running();
        scheduler.tick(Duration::from_millis(50));
        scheduler.set_interval_scale(2.0).unwrap();
        assert_eq!(scheduler.interval(), Duration::from_millis(200));
        assert_eq!(scheduler.accumulated(), Duration::from_millis(50));
        assert!((scheduler.progress_fraction() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_shrinking_interval_below_accumulator_fires_next_tick() {
        let mut scheduler = running();
        scheduler.tick(Duration::from_millis(90));
        scheduler.set_interval_scale(0.5).unwrap();
        assert!(scheduler.tick(Duration::ZERO));
        assert_eq!(scheduler.accumulated(), Duration::from_millis(40));
    }

    #[test]
    fn test_invalid_scale_leaves_state() {
        let mut scheduler = running();
        scheduler.tick(Duration::from_millis(10));
        for factor in [0.0, -1.0, f64::NAN, f64::INFINITY, 1e-30, 1e300] {
            assert!(
                matches!(
                    scheduler.set_interval_scale(factor),
                    Err(SimError::InvalidConfiguration(_))
                ),
                "factor {factor} accepted"
            );
        }
        assert_eq!(scheduler.interval(), INTERVAL);
        assert_eq!(scheduler.accumulated(), Duration::from_millis(10));
        assert!(!scheduler.is_paused());
    }
}
