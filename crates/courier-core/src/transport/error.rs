use std::time::Duration;

use thiserror::Error;

/// Failure to obtain any response from the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("connection error during exchange: {0}")]
    Io(String),

    #[error("invalid request: {0}")]
    Invalid(String),

    #[error("transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Returns `true` for network-level conditions worth another attempt.
    ///
    /// Invalid requests and unclassified client errors will fail the same way every time.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TransportError::Connect(_) | TransportError::Timeout(_) | TransportError::Io(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_failures_are_retryable() {
        assert!(TransportError::Connect("refused".into()).is_retryable());
        assert!(TransportError::Timeout(Duration::from_secs(10)).is_retryable());
        assert!(TransportError::Io("reset by peer".into()).is_retryable());
    }

    #[test]
    fn request_errors_are_permanent() {
        assert!(!TransportError::Invalid("bad header".into()).is_retryable());
        assert!(!TransportError::Other("boom".into()).is_retryable());
    }
}
