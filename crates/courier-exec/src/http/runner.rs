use taskvisor::{TaskError, TaskFn, TaskRef};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use courier_core::{HttpTask, Runner, RunnerError};
use courier_model::{RequestSpec, TaskVariant};

use super::{
    driver::{DriveError, RetryDriver},
    sink::{SinkHandle, TaskReport},
};

/// Runner that executes request tasks of one [`TaskVariant`].
pub struct HttpRunner {
    /// Runner name.
    name: &'static str,
    driver: RetryDriver,
    /// Optional destination for terminal reports.
    sink: Option<SinkHandle>,
}

impl HttpRunner {
    /// Create a runner for the variant of `task`, without a result sink.
    pub fn new(name: &'static str, task: HttpTask) -> Self {
        Self {
            name,
            driver: RetryDriver::new(task),
            sink: None,
        }
    }

    /// Publish every terminal report into `sink`.
    pub fn with_sink(mut self, sink: SinkHandle) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Variant served by this runner.
    pub fn variant(&self) -> TaskVariant {
        self.driver.task().variant()
    }
}

impl Runner for HttpRunner {
    fn name(&self) -> &'static str {
        self.name
    }

    fn supports(&self, variant: TaskVariant) -> bool {
        self.variant() == variant
    }

    fn build_task(&self, spec: &RequestSpec, run_id: &str) -> Result<TaskRef, RunnerError> {
        spec.validate()?;
        trace!(task = %run_id, method = %spec.method, url = %spec.url, "building request task");

        let spec = spec.clone();
        let driver = self.driver.clone();
        let sink = self.sink.clone();
        let run_id = run_id.to_string();

        let task: TaskRef = TaskFn::arc(run_id.clone(), move |cancel: CancellationToken| {
            let spec = spec.clone();
            let driver = driver.clone();
            let sink = sink.clone();
            let run_id = run_id.clone();

            async move { execute(&driver, &spec, &run_id, sink.as_ref(), cancel).await }
        });
        Ok(task)
    }
}

/// Drive one task to completion, publish its report and translate the end state for taskvisor.
///
/// Terminal failures are fatal: the backoff schedule already spent every retry.
/// Publishing is raced against `cancel`; a report that cannot be delivered before
/// cancellation is dropped.
pub(crate) async fn execute(
    driver: &RetryDriver,
    spec: &RequestSpec,
    run_id: &str,
    sink: Option<&SinkHandle>,
    cancel: CancellationToken,
) -> Result<(), TaskError> {
    let result = driver.drive(spec, cancel.clone()).await;

    let outcome = match &result {
        Ok(_) => Ok(()),
        Err(DriveError::Canceled) => {
            debug!(task = %run_id, "request task canceled");
            Err(TaskError::Canceled)
        }
        Err(DriveError::Failed(failure)) => Err(TaskError::Fatal {
            reason: failure.to_string(),
        }),
    };

    if let Some(sink) = sink {
        let report = TaskReport {
            run_id: run_id.to_string(),
            variant: driver.task().variant(),
            result,
        };
        tokio::select! {
            _ = sink.publish(report) => {}
            _ = cancel.cancelled() => {
                debug!(task = %run_id, "canceled while publishing; report dropped");
            }
        }
    }
    outcome
}
