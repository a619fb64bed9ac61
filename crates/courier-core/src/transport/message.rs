use std::{collections::BTreeMap, fmt, time::Duration};

use courier_model::{HttpMethod, StatusCode};

/// Fully built request for a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Absolute target URL.
    pub url: String,
    /// JSON-serialized payload.
    pub body: String,
    /// Upper bound for the whole exchange.
    pub timeout: Duration,
}

impl fmt::Display for OutgoingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OutgoingRequest({} {}, body={}B, timeout={:?})",
            self.method,
            self.url,
            self.body.len(),
            self.timeout
        )
    }
}

/// Response as received from the server, before any classification.
///
/// Header names are stored lower-cased; repeated headers are joined with `", "`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// Status code.
    pub status: StatusCode,
    /// Lower-cased header map.
    pub headers: BTreeMap<String, String>,
    /// Body decoded as text.
    pub text: String,
}

impl RawResponse {
    /// Create a response without headers.
    pub fn new(status: StatusCode, text: impl Into<String>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            text: text.into(),
        }
    }

    /// Builder-style helper appending a header.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.append_header(name, value);
        self
    }

    /// Append a header, lower-casing its name and folding repeats into one value.
    pub fn append_header(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        self.headers
            .entry(name.to_ascii_lowercase())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.clone());
    }

    /// Returns `true` for statuses in `[200, 300)`.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
