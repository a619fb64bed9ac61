use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("invalid request: {0}")]
    InvalidSpec(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<courier_model::ModelError> for RunnerError {
    fn from(e: courier_model::ModelError) -> Self {
        RunnerError::InvalidSpec(e.to_string())
    }
}
