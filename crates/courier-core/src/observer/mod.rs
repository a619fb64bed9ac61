//! Observation capability injected into request tasks.
//!
//! Tasks never log through a process-wide handle: every notable step of an attempt is reported
//! to an [`AttemptObserver`] supplied at construction time. The default implementation
//! ([`TracingObserver`]) turns those notifications into structured `tracing` events;
//! [`NoOpObserver`] discards them.
mod backend;
pub use backend::{AttemptObserver, ObserverHandle};

mod noop;
pub use noop::NoOpObserver;

mod logging;
pub use logging::TracingObserver;

use std::sync::Arc;

/// Create a no-op observer handle.
#[inline]
pub fn noop_observer() -> ObserverHandle {
    Arc::new(NoOpObserver)
}

/// Create an observer handle that logs via `tracing`.
#[inline]
pub fn tracing_observer() -> ObserverHandle {
    Arc::new(TracingObserver)
}
