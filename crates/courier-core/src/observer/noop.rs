use courier_model::{RequestSpec, StatusCode};

use crate::attempt::{AttemptContext, RetryDirective, RetryReason, TaskFailure};
use crate::observer::backend::AttemptObserver;

/// Observer that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl AttemptObserver for NoOpObserver {
    #[inline(always)]
    fn attempt_started(&self, _: &RequestSpec, _: &AttemptContext) {}

    #[inline(always)]
    fn retry_scheduled(&self, _: &RequestSpec, _: &AttemptContext, _: &RetryDirective) {}

    #[inline(always)]
    fn retries_exhausted(&self, _: &RequestSpec, _: &AttemptContext, _: &RetryReason) {}

    #[inline(always)]
    fn non_success_response(&self, _: &RequestSpec, _: &AttemptContext, _: StatusCode) {}

    #[inline(always)]
    fn completed(&self, _: &RequestSpec, _: &AttemptContext, _: StatusCode) {}

    #[inline(always)]
    fn failed(&self, _: &RequestSpec, _: &AttemptContext, _: &TaskFailure) {}
}
