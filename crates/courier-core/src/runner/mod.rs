//! Runner abstraction used by `courier-core` to build taskvisor tasks from a [`RequestSpec`].
//!
//! Concrete runners implement this trait and are plugged into the router.
mod error;
pub use error::RunnerError;

mod id;
pub use id::make_run_id;

use courier_model::{RequestSpec, TaskVariant};
use taskvisor::TaskRef;

/// Generic task runner used by the core layer.
///
/// A runner is responsible for:
/// - deciding whether it can handle a given [`TaskVariant`] (`supports`)
/// - building a concrete [`TaskRef`] that the supervisor can execute (`build_task`)
pub trait Runner: Send + Sync {
    /// Runner name used in logs, diagnostics and run ids.
    fn name(&self) -> &'static str;

    /// Returns `true` if this runner executes tasks of `variant`.
    fn supports(&self, variant: TaskVariant) -> bool;

    /// Build a concrete [`TaskRef`] named `run_id` that performs `spec` to completion.
    fn build_task(&self, spec: &RequestSpec, run_id: &str) -> Result<TaskRef, RunnerError>;
}
