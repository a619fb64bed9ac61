//! Per-invocation types of the request task: the attempt counter handed in by the
//! scheduling infrastructure and the outcome handed back.
mod context;
pub use context::AttemptContext;

mod outcome;
pub use outcome::{ResponseOutcome, RetryDirective, RetryReason, TaskFailure, TaskOutcome, TaskState};
