//! The request task: one HTTP attempt per invocation.
//!
//! [`HttpTask::attempt`] sends the request once, classifies what happened and returns a
//! [`TaskOutcome`]. It never sleeps and never loops: waiting between attempts and calling
//! it again with the next [`AttemptContext`] is the job of the scheduling infrastructure.
use std::{sync::Arc, time::Duration};

use serde_json::Value;
use tracing::trace;

use courier_model::{
    ExhaustionPolicy, HttpTaskConfig, Payload, RequestSpec, ResultShape, RetryCodes, TaskVariant,
};

use crate::{
    attempt::{AttemptContext, ResponseOutcome, RetryDirective, RetryReason, TaskFailure, TaskOutcome},
    error::CoreError,
    observer::{ObserverHandle, tracing_observer},
    result::{ResponseInfo, TaskResult},
    schedule::BackoffSchedule,
    transport::{OutgoingRequest, RawResponse, TransportHandle},
};


/// Retrying HTTP request task.
///
/// Holds everything an attempt needs that does not change between invocations:
/// the variant, the retry set, the result policies, the shared schedule, the transport and the observer.
/// A single instance serves any number of concurrent task instances.
#[derive(Clone)]
pub struct HttpTask {
    variant: TaskVariant,
    retry_codes: RetryCodes,
    result_shape: ResultShape,
    on_exhausted: ExhaustionPolicy,
    timeout: Duration,
    schedule: Arc<BackoffSchedule>,
    transport: TransportHandle,
    observer: ObserverHandle,
}

impl HttpTask {
    /// Build a task from validated configuration.
    ///
    /// The backoff schedule is derived from `config.backoff`; logging goes through [`crate::TracingObserver`].
    pub fn new(
        variant: TaskVariant,
        config: &HttpTaskConfig,
        transport: TransportHandle,
    ) -> Result<Self, CoreError> {
        config.validate()?;
        let schedule = BackoffSchedule::from_config(&config.backoff)?;

        Ok(Self {
            variant,
            retry_codes: config.retry_codes.clone(),
            result_shape: config.result_shape,
            on_exhausted: config.on_exhausted,
            timeout: Duration::from_millis(config.timeout_ms),
            schedule: Arc::new(schedule),
            transport,
            observer: tracing_observer(),
        })
    }

    /// Replace the schedule (e.g. to share one instance between variants).
    pub fn with_schedule(mut self, schedule: Arc<BackoffSchedule>) -> Self {
        self.schedule = schedule;
        self
    }

    /// Replace the observer.
    pub fn with_observer(mut self, observer: ObserverHandle) -> Self {
        self.observer = observer;
        self
    }

    /// Task variant.
    pub fn variant(&self) -> TaskVariant {
        self.variant
    }

    /// Shared backoff schedule.
    pub fn schedule(&self) -> &Arc<BackoffSchedule> {
        &self.schedule
    }

    /// Context for the first invocation of a new task instance.
    pub fn first_context(&self) -> AttemptContext {
        AttemptContext::first(self.schedule.max_attempts())
    }

    /// Invocation entry point with untyped arguments.
    ///
    /// Parses `method`, validates `url` and performs attempt number `retry_count + 1`.
    pub async fn run(
        &self,
        method: &str,
        url: &str,
        retry_count: u32,
        payload: Payload,
    ) -> Result<TaskOutcome, CoreError> {
        let spec = RequestSpec::parse(method, url, payload)?;
        let ctx = AttemptContext::new(retry_count, self.schedule.max_attempts());
        Ok(self.attempt(&spec, ctx).await)
    }

    /// Perform exactly one attempt of `spec`.
    ///
    /// Exhaustion is decided by the schedule: a transient failure at `retry_count >= max_attempts`
    /// terminates the task instead of producing a retry directive.
    pub async fn attempt(&self, spec: &RequestSpec, ctx: AttemptContext) -> TaskOutcome {
        self.observer.attempt_started(spec, &ctx);

        let request = match self.build_request(spec) {
            Ok(r) => r,
            Err(failure) => return self.fail(spec, &ctx, failure),
        };
        trace!(request = %request, "request built");

        let sent = self.transport.send(request).await;
        match ResponseOutcome::classify(sent, &self.retry_codes) {
            ResponseOutcome::TransportFailure(e) if !e.is_retryable() => {
                self.fail(spec, &ctx, TaskFailure::Transport(e.to_string()))
            }
            ResponseOutcome::TransportFailure(e) => {
                self.retry_or_exhaust(spec, ctx, RetryReason::Transport(e), None)
            }
            ResponseOutcome::RetryableServerResponse(resp) => {
                self.retry_or_exhaust(spec, ctx, RetryReason::Status(resp.status), Some(resp))
            }
            ResponseOutcome::FinalResponse(resp) => self.finish(spec, &ctx, resp),
        }
    }

    fn build_request(&self, spec: &RequestSpec) -> Result<OutgoingRequest, TaskFailure> {
        let body = spec
            .payload
            .to_body()
            .map_err(|e| TaskFailure::Request(format!("payload is not serializable: {e}")))?;

        Ok(OutgoingRequest {
            method: spec.method,
            url: spec.url.clone(),
            body,
            timeout: self.timeout,
        })
    }

    fn retry_or_exhaust(
        &self,
        spec: &RequestSpec,
        ctx: AttemptContext,
        reason: RetryReason,
        last: Option<RawResponse>,
    ) -> TaskOutcome {
        let Ok(countdown) = self.schedule.delay_for(ctx.retry_count()) else {
            self.observer.retries_exhausted(spec, &ctx, &reason);
            return match self.on_exhausted {
                ExhaustionPolicy::Fail => self.fail(
                    spec,
                    &ctx,
                    TaskFailure::RetriesExhausted {
                        attempts: ctx.attempt_number(),
                        last: reason.to_string(),
                    },
                ),
                ExhaustionPolicy::Surface => TaskOutcome::Done(
                    last.map(|resp| TaskResult::Response(ResponseInfo::from_response(spec, resp)))
                        .unwrap_or(TaskResult::Empty),
                ),
            };
        };

        let directive = RetryDirective {
            countdown,
            next: ctx.next(),
            reason,
        };
        self.observer.retry_scheduled(spec, &ctx, &directive);
        TaskOutcome::Retry(directive)
    }

    fn finish(&self, spec: &RequestSpec, ctx: &AttemptContext, resp: RawResponse) -> TaskOutcome {
        let status = resp.status;
        if !resp.is_success() {
            self.observer.non_success_response(spec, ctx, status);
            return TaskOutcome::Done(TaskResult::Response(ResponseInfo::from_response(spec, resp)));
        }
        if self.variant.ignore_result() {
            self.observer.completed(spec, ctx, status);
            return TaskOutcome::Done(TaskResult::Empty);
        }

        let json: Value = match serde_json::from_str(&resp.text) {
            Ok(v) => v,
            Err(e) => {
                return self.fail(
                    spec,
                    ctx,
                    TaskFailure::MalformedResponseBody {
                        status,
                        reason: e.to_string(),
                    },
                );
            }
        };
        self.observer.completed(spec, ctx, status);

        match self.result_shape {
            ResultShape::RawJson => TaskOutcome::Done(TaskResult::Json(json)),
            ResultShape::StructuredEnvelope => TaskOutcome::Done(TaskResult::Response(
                ResponseInfo::from_response(spec, resp).with_json(json),
            )),
        }
    }

    fn fail(&self, spec: &RequestSpec, ctx: &AttemptContext, failure: TaskFailure) -> TaskOutcome {
        self.observer.failed(spec, ctx, &failure);
        TaskOutcome::Failed(failure)
    }
}

impl std::fmt::Debug for HttpTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTask")
            .field("variant", &self.variant)
            .field("retry_codes", &self.retry_codes)
            .field("result_shape", &self.result_shape)
            .field("on_exhausted", &self.on_exhausted)
            .field("timeout", &self.timeout)
            .field("max_attempts", &self.schedule.max_attempts())
            .field("transport", &self.transport.name())
            .finish()
    }
}
