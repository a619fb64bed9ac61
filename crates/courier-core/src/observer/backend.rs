use std::sync::Arc;

use courier_model::{RequestSpec, StatusCode};

use crate::attempt::{AttemptContext, RetryDirective, RetryReason, TaskFailure};

/// Receives the notable events of request task attempts.
///
/// Implementations are injected into [`crate::HttpTask`] and shared by all of its invocations,
/// so they must be cheap and non-blocking.
pub trait AttemptObserver: Send + Sync + 'static {
    /// An attempt is about to put the request on the wire.
    fn attempt_started(&self, spec: &RequestSpec, ctx: &AttemptContext);

    /// The attempt failed transiently and a retry was scheduled.
    fn retry_scheduled(&self, spec: &RequestSpec, ctx: &AttemptContext, directive: &RetryDirective);

    /// The attempt failed transiently but the retry budget is spent.
    fn retries_exhausted(&self, spec: &RequestSpec, ctx: &AttemptContext, reason: &RetryReason);

    /// A final response outside of `[200, 300)` was received.
    fn non_success_response(&self, spec: &RequestSpec, ctx: &AttemptContext, status: StatusCode);

    /// A final 2xx response was received.
    fn completed(&self, spec: &RequestSpec, ctx: &AttemptContext, status: StatusCode);

    /// The task terminated with a failure.
    fn failed(&self, spec: &RequestSpec, ctx: &AttemptContext, failure: &TaskFailure);
}

/// Shared handle to an observer.
pub type ObserverHandle = Arc<dyn AttemptObserver>;
