use std::time::Duration;

use courier_model::{RequestSpec, StatusCode};
use tracing::{debug, error, info, warn};

use crate::attempt::{AttemptContext, RetryDirective, RetryReason, TaskFailure};
use crate::observer::backend::AttemptObserver;

/// Observer emitting structured `tracing` events.
///
/// Every event carries `method` and `url`; attempt events also carry `attempt` and `of`
/// (the 1-based attempt number and the maximum number of invocations).
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

fn delay_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl AttemptObserver for TracingObserver {
    fn attempt_started(&self, spec: &RequestSpec, ctx: &AttemptContext) {
        debug!(
            method = %spec.method,
            url = %spec.url,
            attempt = ctx.attempt_number(),
            of = ctx.total_attempts(),
            "sending request",
        );
    }

    fn retry_scheduled(&self, spec: &RequestSpec, ctx: &AttemptContext, directive: &RetryDirective) {
        let delay_ms = delay_millis(directive.countdown);
        match &directive.reason {
            RetryReason::Transport(e) => warn!(
                method = %spec.method,
                url = %spec.url,
                delay_ms,
                attempt = ctx.attempt_number(),
                of = ctx.total_attempts(),
                error = %e,
                "transport failure while sending {} {}, retrying in {:?} ({})",
                spec.method,
                spec.url,
                directive.countdown,
                ctx,
            ),
            RetryReason::Status(status) => warn!(
                method = %spec.method,
                url = %spec.url,
                status_code = *status,
                delay_ms,
                attempt = ctx.attempt_number(),
                of = ctx.total_attempts(),
                "got response ({}), retrying in {:?} ({})",
                status,
                directive.countdown,
                ctx,
            ),
        }
    }

    fn retries_exhausted(&self, spec: &RequestSpec, ctx: &AttemptContext, reason: &RetryReason) {
        error!(
            method = %spec.method,
            url = %spec.url,
            attempt = ctx.attempt_number(),
            of = ctx.total_attempts(),
            reason = %reason,
            "retries exhausted",
        );
    }

    fn non_success_response(&self, spec: &RequestSpec, ctx: &AttemptContext, status: StatusCode) {
        warn!(
            method = %spec.method,
            url = %spec.url,
            status_code = status,
            attempt = ctx.attempt_number(),
            "got response ({status}), returning response info",
        );
    }

    fn completed(&self, spec: &RequestSpec, ctx: &AttemptContext, status: StatusCode) {
        info!(
            method = %spec.method,
            url = %spec.url,
            status_code = status,
            attempt = ctx.attempt_number(),
            "request completed",
        );
    }

    fn failed(&self, spec: &RequestSpec, ctx: &AttemptContext, failure: &TaskFailure) {
        error!(
            method = %spec.method,
            url = %spec.url,
            attempt = ctx.attempt_number(),
            kind = failure.as_label(),
            reason = %failure,
            "request task failed",
        );
    }
}
