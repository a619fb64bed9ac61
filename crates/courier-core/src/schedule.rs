//! Fixed backoff schedule used between attempts of a request task.
//!
//! The schedule is an explicit list of delays: entry `i` is how long to wait before
//! retry `i + 1`, and the length of the list is the retry budget. It is built once and
//! shared read-only between all tasks.
use std::time::Duration;

use courier_model::BackoffConfig;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("backoff schedule must contain at least one delay")]
    Empty,

    #[error("attempt index {index} is out of range for a schedule of {len} delays")]
    OutOfRange { index: u32, len: u32 },
}

/// Ordered, immutable list of retry delays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackoffSchedule {
    delays: Vec<Duration>,
}

impl BackoffSchedule {
    /// Build a schedule from explicit delays.
    pub fn new(delays: Vec<Duration>) -> Result<Self, ScheduleError> {
        if delays.is_empty() {
            return Err(ScheduleError::Empty);
        }
        Ok(Self { delays })
    }

    /// Build a schedule from its declarative form.
    pub fn from_config(cfg: &BackoffConfig) -> Result<Self, ScheduleError> {
        let plateau = Duration::from_millis(cfg.plateau_ms);
        let delays = cfg
            .ramp_ms
            .iter()
            .copied()
            .map(Duration::from_millis)
            .chain(std::iter::repeat_n(plateau, cfg.plateau_repeats as usize))
            .collect();
        Self::new(delays)
    }

    /// The default schedule: 1s, 5s, 10s, 30s, 60s, 2m, 4m, 10m, 30m, 60m, then 72 hours of hourly retries.
    pub fn standard() -> Self {
        let cfg = BackoffConfig::default();
        Self::from_config(&cfg).expect("default backoff config must be non-empty")
    }

    /// Build a schedule from a ramp followed by as many `plateau` delays as needed
    /// for the total retry window to reach `window`.
    ///
    /// A zero `plateau` adds nothing after the ramp. Stops once the running total
    /// would exceed `Duration::MAX`.
    pub fn covering(
        ramp: &[Duration],
        plateau: Duration,
        window: Duration,
    ) -> Result<Self, ScheduleError> {
        let mut delays = ramp.to_vec();
        let mut total = saturating_sum(&delays);

        if !plateau.is_zero() {
            while total < window {
                delays.push(plateau);
                match total.checked_add(plateau) {
                    Some(next) => total = next,
                    None => break,
                }
            }
        }
        Self::new(delays)
    }

    /// Delay before the retry that follows attempt `attempt_index` (0-based prior retry count).
    pub fn delay_for(&self, attempt_index: u32) -> Result<Duration, ScheduleError> {
        self.delays
            .get(attempt_index as usize)
            .copied()
            .ok_or(ScheduleError::OutOfRange {
                index: attempt_index,
                len: self.max_attempts(),
            })
    }

    /// Retry budget: the number of delays in the schedule.
    pub fn max_attempts(&self) -> u32 {
        u32::try_from(self.delays.len()).unwrap_or(u32::MAX)
    }

    /// Sum of all delays: the longest a task can keep retrying. Saturates at `Duration::MAX`.
    pub fn total_window(&self) -> Duration {
        saturating_sum(&self.delays)
    }

    /// Iterate over the delays in order.
    pub fn iter(&self) -> impl Iterator<Item = Duration> + '_ {
        self.delays.iter().copied()
    }
}

fn saturating_sum(delays: &[Duration]) -> Duration {
    delays
        .iter()
        .fold(Duration::ZERO, |acc, d| acc.saturating_add(*d))
}

impl Default for BackoffSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: u64 = 60;

    #[test]
    fn standard_schedule_starts_with_fixed_ramp() {
        let s = BackoffSchedule::standard();
        let first: Vec<_> = s.iter().take(5).collect();
        assert_eq!(
            first,
            vec![
                Duration::from_secs(1),
                Duration::from_secs(5),
                Duration::from_secs(10),
                Duration::from_secs(30),
                Duration::from_secs(60),
            ]
        );
    }

    #[test]
    fn standard_schedule_ramps_then_plateaus_at_one_hour() {
        let s = BackoffSchedule::standard();
        assert_eq!(s.max_attempts(), 82);
        assert_eq!(s.delay_for(5).unwrap(), Duration::from_secs(2 * MIN));
        assert_eq!(s.delay_for(9).unwrap(), Duration::from_secs(60 * MIN));
        for i in 9..s.max_attempts() {
            assert_eq!(s.delay_for(i).unwrap(), Duration::from_secs(60 * MIN));
        }
    }

    #[test]
    fn every_index_below_budget_is_defined() {
        let s = BackoffSchedule::standard();
        for i in 0..s.max_attempts() {
            assert!(s.delay_for(i).is_ok(), "delay_for({i}) must be defined");
        }
    }

    #[test]
    fn index_at_budget_is_out_of_range() {
        let s = BackoffSchedule::standard();
        let err = s.delay_for(s.max_attempts()).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::OutOfRange {
                index: 82,
                len: 82
            }
        );
        assert!(s.delay_for(u32::MAX).is_err());
    }

    #[test]
    fn empty_schedule_is_rejected() {
        assert_eq!(BackoffSchedule::new(vec![]), Err(ScheduleError::Empty));

        let cfg = BackoffConfig {
            ramp_ms: vec![],
            plateau_ms: 1_000,
            plateau_repeats: 0,
        };
        assert_eq!(BackoffSchedule::from_config(&cfg), Err(ScheduleError::Empty));
    }

    #[test]
    fn from_config_appends_plateau() {
        let cfg = BackoffConfig {
            ramp_ms: vec![10, 20],
            plateau_ms: 50,
            plateau_repeats: 3,
        };
        let s = BackoffSchedule::from_config(&cfg).unwrap();
        let ms: Vec<u128> = s.iter().map(|d| d.as_millis()).collect();
        assert_eq!(ms, vec![10, 20, 50, 50, 50]);
        assert_eq!(s.total_window(), Duration::from_millis(180));
    }

    #[test]
    fn covering_extends_plateau_until_window_is_reached() {
        let ramp = [Duration::from_secs(1), Duration::from_secs(5)];
        let s = BackoffSchedule::covering(&ramp, Duration::from_secs(10), Duration::from_secs(30))
            .unwrap();

        assert_eq!(s.max_attempts(), 5);
        assert!(s.total_window() >= Duration::from_secs(30));
    }

    #[test]
    fn covering_with_zero_plateau_keeps_only_ramp() {
        let ramp = [Duration::from_secs(1)];
        let s = BackoffSchedule::covering(&ramp, Duration::ZERO, Duration::from_secs(3600))
            .unwrap();
        assert_eq!(s.max_attempts(), 1);
    }

    #[test]
    fn covering_near_duration_max_stops_without_overflow() {
        let plateau = Duration::MAX / 2 + Duration::from_secs(1);
        let s = BackoffSchedule::covering(&[], plateau, Duration::MAX).unwrap();

        assert_eq!(s.max_attempts(), 2);
        assert_eq!(s.total_window(), Duration::MAX);
    }

    #[test]
    fn total_window_saturates() {
        let cfg = BackoffConfig {
            ramp_ms: vec![],
            plateau_ms: u64::MAX,
            plateau_repeats: 3,
        };
        let s = BackoffSchedule::from_config(&cfg).unwrap();
        assert_eq!(s.max_attempts(), 3);
        assert_eq!(s.total_window(), Duration::MAX);
    }
}
