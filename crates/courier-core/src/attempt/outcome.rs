use std::{fmt, time::Duration};

use courier_model::{RetryCodes, StatusCode};
use thiserror::Error;

use crate::{
    attempt::AttemptContext,
    result::TaskResult,
    transport::{RawResponse, TransportError},
};

/// Classification of a single attempt.
///
/// A response can only be inspected through the variants that carry one,
/// so a failed exchange can never be mistaken for a received response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseOutcome {
    /// The request never produced a response.
    TransportFailure(TransportError),
    /// A response whose status is in the configured retry set.
    RetryableServerResponse(RawResponse),
    /// Any other response; it terminates the task.
    FinalResponse(RawResponse),
}

impl ResponseOutcome {
    /// Classify the result of one exchange against the retry set.
    pub fn classify(result: Result<RawResponse, TransportError>, codes: &RetryCodes) -> Self {
        match result {
            Err(e) => ResponseOutcome::TransportFailure(e),
            Ok(resp) if codes.contains(resp.status) => ResponseOutcome::RetryableServerResponse(resp),
            Ok(resp) => ResponseOutcome::FinalResponse(resp),
        }
    }
}

/// Why a retry was requested.
#[derive(Debug, Clone, PartialEq)]
pub enum RetryReason {
    Transport(TransportError),
    Status(StatusCode),
}

impl fmt::Display for RetryReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryReason::Transport(e) => write!(f, "{e}"),
            RetryReason::Status(code) => write!(f, "status {code}"),
        }
    }
}

/// Instruction to re-invoke the same task after `countdown` with the `next` context.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryDirective {
    pub countdown: Duration,
    pub next: AttemptContext,
    pub reason: RetryReason,
}

/// Terminal failures of a task.
///
/// Non-2xx statuses outside of the retry set are *not* failures: they are returned as results.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TaskFailure {
    #[error("retries exhausted after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: String },

    #[error("malformed response body (status {status}): {reason}")]
    MalformedResponseBody { status: StatusCode, reason: String },

    #[error("permanent transport failure: {0}")]
    Transport(String),

    #[error("request could not be built: {0}")]
    Request(String),
}

impl TaskFailure {
    /// Short stable label for logs and metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskFailure::RetriesExhausted { .. } => "retries_exhausted",
            TaskFailure::MalformedResponseBody { .. } => "malformed_body",
            TaskFailure::Transport(_) => "transport",
            TaskFailure::Request(_) => "request",
        }
    }
}

/// Result of one invocation of the request task.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    /// Terminate and hand `TaskResult` to the caller.
    Done(TaskResult),
    /// Ask the infrastructure for another invocation.
    Retry(RetryDirective),
    /// Terminate with a failure.
    Failed(TaskFailure),
}

/// Lifecycle state of a task instance across invocations.
///
/// `Pending -> attempt -> {Success, PermanentFailure, RetryScheduled -> Pending}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    RetryScheduled,
    Success,
    PermanentFailure,
}

impl TaskState {
    /// Returns `true` for states that end the lifecycle.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Success | TaskState::PermanentFailure)
    }
}

impl TaskOutcome {
    /// State the task moves to after this outcome.
    pub fn state(&self) -> TaskState {
        match self {
            TaskOutcome::Done(_) => TaskState::Success,
            TaskOutcome::Retry(_) => TaskState::RetryScheduled,
            TaskOutcome::Failed(_) => TaskState::PermanentFailure,
        }
    }

    /// Returns `true` if no further invocation will happen.
    pub fn is_terminal(&self) -> bool {
        self.state().is_terminal()
    }
}
