//! HTTP request runners for `courier_model::TaskVariant`.
//!
//! Translates request specs into `TaskRef` instances that drive an [`courier_core::HttpTask`]
//! over a shared `reqwest` client, honouring its backoff schedule between attempts.
mod driver;
mod runner;
mod sink;
mod transport;

pub use driver::{DriveError, RetryDriver};
pub use runner::HttpRunner;
pub use sink::{ChannelSink, ResultSink, SinkHandle, TaskReport};
pub use transport::ReqwestTransport;

use std::sync::Arc;

use courier_core::{BackoffSchedule, HttpTask, RunnerRouter, TransportHandle};
use courier_model::{HttpTaskConfig, TaskVariant};

use crate::ExecError;

/// Runner name used for both built-in variants.
pub const HTTP_RUNNER_NAME: &str = "courier";

/// Register runners for both request variants in the given router.
///
/// Both runners share one transport and one backoff schedule built from `config`.
/// After this call, any submission of `TaskVariant::Http` or `TaskVariant::HttpWithResult`
/// is handled by an [`HttpRunner`] publishing into `sink`.
pub fn register_http_runners(
    router: &mut RunnerRouter,
    config: &HttpTaskConfig,
    transport: TransportHandle,
    sink: Option<SinkHandle>,
) -> Result<(), ExecError> {
    config
        .validate()
        .map_err(|e| ExecError::InvalidRunnerConfig(e.to_string()))?;
    let schedule = Arc::new(
        BackoffSchedule::from_config(&config.backoff)
            .map_err(|e| ExecError::InvalidRunnerConfig(e.to_string()))?,
    );

    for variant in [TaskVariant::Http, TaskVariant::HttpWithResult] {
        let task = HttpTask::new(variant, config, Arc::clone(&transport))?
            .with_schedule(Arc::clone(&schedule));
        let mut runner = HttpRunner::new(HTTP_RUNNER_NAME, task);
        if let Some(sink) = &sink {
            runner = runner.with_sink(Arc::clone(sink));
        }
        router.register(Arc::new(runner));
    }
    Ok(())
}

/// Register both runners over a fresh [`ReqwestTransport`].
pub fn register_reqwest_runners(
    router: &mut RunnerRouter,
    config: &HttpTaskConfig,
    sink: Option<SinkHandle>,
) -> Result<(), ExecError> {
    let transport: TransportHandle = Arc::new(ReqwestTransport::new()?);
    register_http_runners(router, config, transport, sink)
}
