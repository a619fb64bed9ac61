use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{ModelError, ModelResult};

/// Registered flavours of the request task.
///
/// Both share the whole retry machinery and differ only in what a 2xx response returns.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskVariant {
    /// Fire-and-forget: a successful call returns nothing.
    #[default]
    Http,
    /// A successful call returns the parsed JSON body.
    HttpWithResult,
}

impl TaskVariant {
    /// Returns `true` when 2xx bodies are discarded.
    pub fn ignore_result(&self) -> bool {
        matches!(self, TaskVariant::Http)
    }

    /// Returns the variant as a static string.
    pub fn name(&self) -> &'static str {
        match self {
            TaskVariant::Http => "http",
            TaskVariant::HttpWithResult => "http-with-result",
        }
    }
}

impl FromStr for TaskVariant {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" | "" => Ok(TaskVariant::Http),
            "http-with-result" | "httpwithresult" | "with-result" => {
                Ok(TaskVariant::HttpWithResult)
            }
            other => Err(ModelError::UnknownVariant(other.to_string())),
        }
    }
}
