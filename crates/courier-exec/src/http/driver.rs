use std::sync::Arc;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use courier_core::{HttpTask, TaskFailure, TaskOutcome, TaskResult};
use courier_model::RequestSpec;

/// Why a driven task did not produce a result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DriveError {
    #[error(transparent)]
    Failed(#[from] TaskFailure),

    #[error("task canceled")]
    Canceled,
}

/// Re-invokes an [`HttpTask`] until it terminates.
///
/// Each retry directive is honoured with a tokio timer raced against the cancellation token,
/// so a pending retry never holds a worker thread.
#[derive(Debug, Clone)]
pub struct RetryDriver {
    task: Arc<HttpTask>,
}

impl RetryDriver {
    pub fn new(task: HttpTask) -> Self {
        Self {
            task: Arc::new(task),
        }
    }

    /// The driven task.
    pub fn task(&self) -> &HttpTask {
        &self.task
    }

    /// Run `spec` from its first attempt to a terminal outcome.
    pub async fn drive(
        &self,
        spec: &RequestSpec,
        cancel: CancellationToken,
    ) -> Result<TaskResult, DriveError> {
        let mut ctx = self.task.first_context();

        loop {
            let outcome = tokio::select! {
                out = self.task.attempt(spec, ctx) => out,
                _ = cancel.cancelled() => return Err(DriveError::Canceled),
            };

            match outcome {
                TaskOutcome::Done(result) => return Ok(result),
                TaskOutcome::Failed(failure) => return Err(failure.into()),
                TaskOutcome::Retry(directive) => {
                    trace!(countdown = ?directive.countdown, next = %directive.next, "waiting for retry");
                    tokio::select! {
                        _ = tokio::time::sleep(directive.countdown) => {}
                        _ = cancel.cancelled() => {
                            debug!(url = %spec.url, "cancellation requested while waiting for retry");
                            return Err(DriveError::Canceled);
                        }
                    }
                    ctx = directive.next;
                }
            }
        }
    }
}
