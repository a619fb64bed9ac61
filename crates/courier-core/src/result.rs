//! Terminal values returned to the caller of a request task.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use courier_model::{HttpMethod, Payload, RequestSpec, StatusCode};

use crate::transport::RawResponse;

/// Structured description of a finished call.
///
/// Field names are part of the result contract:
/// `{method, url, data, status_code, text, headers}` plus `json` for parsed 2xx bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseInfo {
    pub method: HttpMethod,
    pub url: String,
    /// Payload that was sent.
    pub data: Payload,
    pub status_code: StatusCode,
    /// Raw response body.
    pub text: String,
    /// Lower-cased response headers.
    pub headers: BTreeMap<String, String>,
    /// Parsed body, only present for 2xx responses of result-carrying tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<Value>,
}

impl ResponseInfo {
    /// Describe `response` as the answer to `spec`, without a parsed body.
    pub fn from_response(spec: &RequestSpec, response: RawResponse) -> Self {
        Self {
            method: spec.method,
            url: spec.url.clone(),
            data: spec.payload.clone(),
            status_code: response.status,
            text: response.text,
            headers: response.headers,
            json: None,
        }
    }

    /// Attach the parsed body.
    pub fn with_json(mut self, json: Value) -> Self {
        self.json = Some(json);
        self
    }
}

/// Value a task hands back when it terminates normally.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskResult {
    /// Nothing: fire-and-forget success, or a best-effort exhaustion without a response.
    Empty,
    /// Bare parsed JSON body.
    Json(Value),
    /// Structured envelope.
    Response(ResponseInfo),
}

impl TaskResult {
    /// Returns `true` for [`TaskResult::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, TaskResult::Empty)
    }

    /// Status code carried by the result, if any.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            TaskResult::Response(info) => Some(info.status_code),
            _ => None,
        }
    }

    /// Convert into the JSON value delivered on the result channel (`None` for empty results).
    pub fn into_value(self) -> serde_json::Result<Option<Value>> {
        match self {
            TaskResult::Empty => Ok(None),
            TaskResult::Json(v) => Ok(Some(v)),
            TaskResult::Response(info) => serde_json::to_value(info).map(Some),
        }
    }
}
