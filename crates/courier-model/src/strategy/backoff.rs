use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

const MIN_MS: u64 = 60_000;

/// Declarative form of the backoff schedule.
///
/// The schedule is a short explicit ramp followed by a long plateau of a constant delay:
/// `ramp_ms[0], ramp_ms[1], .., plateau_ms x plateau_repeats`.
/// Entry `i` is the delay before retry `i + 1`; the number of entries is the retry budget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackoffConfig {
    /// Explicit delays applied first, in order.
    pub ramp_ms: Vec<u64>,
    /// Constant delay repeated after the ramp.
    pub plateau_ms: u64,
    /// How many times `plateau_ms` is repeated.
    pub plateau_repeats: u32,
}

impl BackoffConfig {
    /// Total number of schedule entries (retry budget).
    pub fn len(&self) -> usize {
        self.ramp_ms.len() + self.plateau_repeats as usize
    }

    /// Returns `true` if the configuration yields no delays at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validate the configuration.
    ///
    /// Rules:
    /// - at least one entry overall;
    /// - `plateau_ms` must be non-zero when it is repeated.
    pub fn validate(&self) -> ModelResult<()> {
        if self.is_empty() {
            return Err(ModelError::Invalid(
                "backoff schedule must contain at least one delay".into(),
            ));
        }
        if self.plateau_repeats > 0 && self.plateau_ms == 0 {
            return Err(ModelError::Invalid(
                "backoff plateauMs cannot be zero when plateauRepeats > 0".into(),
            ));
        }
        Ok(())
    }
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            ramp_ms: vec![
                1_000,
                5_000,
                10_000,
                30_000,
                MIN_MS,
                2 * MIN_MS,
                4 * MIN_MS,
                10 * MIN_MS,
                30 * MIN_MS,
                60 * MIN_MS,
            ],
            plateau_ms: 60 * MIN_MS,
            plateau_repeats: 72,
        }
    }
}
