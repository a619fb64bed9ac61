use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown http method: {0}")]
    UnknownMethod(String),

    #[error("unknown task variant: {0}")]
    UnknownVariant(String),

    #[error("unknown result shape: {0}")]
    UnknownResultShape(String),

    #[error("unknown exhaustion policy: {0}")]
    UnknownExhaustion(String),

    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid model: {0}")]
    Invalid(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
