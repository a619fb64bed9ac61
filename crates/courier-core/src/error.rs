use courier_model::ModelError;
use thiserror::Error;

use crate::{runner::RunnerError, schedule::ScheduleError};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("no suitable runner for task variant: {0}")]
    NoRunner(String),

    #[error("supervisor error: {0}")]
    Supervisor(String),

    #[error("invalid request: {0}")]
    Model(#[from] ModelError),

    #[error("invalid backoff schedule: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("runner error: {0}")]
    Runner(#[from] RunnerError),
}
