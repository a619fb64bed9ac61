use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{ModelError, ModelResult};

/// What a task reports once its retry budget is spent.
///
/// Strategies:
/// - `Fail`: terminate with a `RetriesExhausted` failure.
/// - `Surface`: terminate successfully with a best-effort result
///   (the last retryable response, or nothing if the last attempt never reached the server).
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExhaustionPolicy {
    #[default]
    Fail,
    Surface,
}

impl FromStr for ExhaustionPolicy {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" | "error" | "" => Ok(ExhaustionPolicy::Fail),
            "surface" | "result" => Ok(ExhaustionPolicy::Surface),
            other => Err(ModelError::UnknownExhaustion(other.to_string())),
        }
    }
}
