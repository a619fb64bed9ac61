use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{ModelError, ModelResult};

/// Shape of the value returned by a result-carrying task on a 2xx response.
///
/// Strategies:
/// - `StructuredEnvelope`: the full response description (`method`, `url`, `data`, `status_code`, `text`, `headers`, `json`).
/// - `RawJson`: only the parsed JSON body.
///
/// Non-2xx responses always produce the envelope (without `json`), whatever the shape.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResultShape {
    /// Return the parsed JSON body directly.
    RawJson,
    /// Return the structured response envelope with the parsed body under `json`.
    #[default]
    StructuredEnvelope,
}

impl FromStr for ResultShape {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw-json" | "raw" | "json" => Ok(ResultShape::RawJson),
            "structured-envelope" | "envelope" | "structured" | "" => {
                Ok(ResultShape::StructuredEnvelope)
            }
            other => Err(ModelError::UnknownResultShape(other.to_string())),
        }
    }
}
