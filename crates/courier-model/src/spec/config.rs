use serde::{Deserialize, Serialize};

use crate::{
    domain::{DEFAULT_TIMEOUT_MS, TimeoutMs},
    error::{ModelError, ModelResult},
    strategy::{BackoffConfig, ExhaustionPolicy, ResultShape, RetryCodes},
};

/// Configuration shared by every request task of a process.
///
/// Covers:
/// - which responses are transient (`retry_codes`);
/// - how long to wait between attempts and how many are allowed (`backoff`);
/// - the per-attempt transport timeout (`timeout_ms`);
/// - what a finished task returns (`result_shape`, `on_exhausted`).
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpTaskConfig {
    /// Status codes retried on the backoff schedule.
    pub retry_codes: RetryCodes,
    /// Shape of a successful result for result-carrying tasks.
    pub result_shape: ResultShape,
    /// Behaviour once the retry budget is spent.
    pub on_exhausted: ExhaustionPolicy,
    /// Transport timeout for a single attempt.
    pub timeout_ms: TimeoutMs,
    /// Delay schedule between attempts.
    pub backoff: BackoffConfig,
}

impl HttpTaskConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> ModelResult<()> {
        if self.timeout_ms == 0 {
            return Err(ModelError::Invalid("timeoutMs cannot be zero".into()));
        }
        self.retry_codes.validate()?;
        self.backoff.validate()
    }
}

impl Default for HttpTaskConfig {
    fn default() -> Self {
        Self {
            retry_codes: RetryCodes::default(),
            result_shape: ResultShape::default(),
            on_exhausted: ExhaustionPolicy::default(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            backoff: BackoffConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let cfg = HttpTaskConfig::default();
        assert_eq!(cfg.timeout_ms, 10_000);
        assert_eq!(cfg.result_shape, ResultShape::StructuredEnvelope);
        assert_eq!(cfg.on_exhausted, ExhaustionPolicy::Fail);
        assert!(!cfg.retry_codes.contains(500));
        assert_eq!(cfg.backoff.len(), 82);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn serde_uses_defaults_for_missing_fields() {
        let cfg: HttpTaskConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, HttpTaskConfig::default());
    }

    #[test]
    fn partial_deserialization() {
        let json = r#"{"retryCodes": [500, 503], "resultShape": "rawJson", "timeoutMs": 2500}"#;
        let cfg: HttpTaskConfig = serde_json::from_str(json).unwrap();

        assert!(cfg.retry_codes.contains(500));
        assert!(!cfg.retry_codes.contains(408));
        assert_eq!(cfg.result_shape, ResultShape::RawJson);
        assert_eq!(cfg.timeout_ms, 2_500);
        assert_eq!(cfg.backoff, BackoffConfig::default());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let cfg = HttpTaskConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ModelError::Invalid(_))));
    }
}
