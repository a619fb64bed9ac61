use courier_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("invalid runner configuration: {0}")]
    InvalidRunnerConfig(String),

    #[error("http client error: {0}")]
    Client(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<reqwest::Error> for ExecError {
    fn from(e: reqwest::Error) -> Self {
        ExecError::Client(e.to_string())
    }
}
