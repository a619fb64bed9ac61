use std::fmt;

/// Attempt counter owned by the scheduling infrastructure.
///
/// `retry_count` starts at 0 for the first invocation and grows by exactly one on every re-invocation.
/// `max_attempts` is the retry budget derived from the backoff schedule:
/// a task is invoked at most `max_attempts + 1` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttemptContext {
    retry_count: u32,
    max_attempts: u32,
}

impl AttemptContext {
    /// Create a context for an arbitrary point of the lifecycle.
    pub const fn new(retry_count: u32, max_attempts: u32) -> Self {
        Self {
            retry_count,
            max_attempts,
        }
    }

    /// Context of the very first invocation.
    pub const fn first(max_attempts: u32) -> Self {
        Self::new(0, max_attempts)
    }

    /// Number of retries already performed.
    pub const fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// Retry budget.
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// 1-based number of the current attempt.
    pub const fn attempt_number(&self) -> u32 {
        self.retry_count.saturating_add(1)
    }

    /// Upper bound on invocations: the first attempt plus every retry.
    pub const fn total_attempts(&self) -> u32 {
        self.max_attempts.saturating_add(1)
    }

    /// Returns `true` once no retry is left.
    pub const fn is_exhausted(&self) -> bool {
        self.retry_count >= self.max_attempts
    }

    /// Context of the following invocation.
    pub const fn next(&self) -> Self {
        Self::new(self.retry_count.saturating_add(1), self.max_attempts)
    }
}

impl fmt::Display for AttemptContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "attempt {} of {}",
            self.attempt_number(),
            self.total_attempts()
        )
    }
}
