use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    domain::{HttpMethod, Payload},
    error::{ModelError, ModelResult},
};

/// One logical HTTP call.
///
/// `RequestSpec` describes *what* is sent on every attempt of a task:
/// - the HTTP verb (`method`);
/// - an absolute http(s) target (`url`);
/// - the key–value data serialized as the JSON body (`payload`).
///
/// The spec never changes between attempts: retries resend exactly the same request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSpec {
    /// HTTP method used for every attempt.
    pub method: HttpMethod,
    /// Absolute target URL.
    pub url: String,
    /// Request data, sent as a JSON object body regardless of method.
    #[serde(default, skip_serializing_if = "Payload::is_empty")]
    pub payload: Payload,
}

impl RequestSpec {
    /// Create a spec with an empty payload.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            payload: Payload::new(),
        }
    }

    /// Parse untyped invocation arguments into a validated spec.
    ///
    /// ```rust
    /// # use courier_model::{HttpMethod, Payload, RequestSpec};
    /// let spec = RequestSpec::parse("post", "https://example.com/hooks", Payload::new()).unwrap();
    /// assert_eq!(spec.method, HttpMethod::Post);
    /// ```
    pub fn parse(method: &str, url: &str, payload: Payload) -> ModelResult<Self> {
        let spec = Self {
            method: method.parse()?,
            url: url.to_string(),
            payload,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Builder-style helper replacing the payload.
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    /// Validate the spec before it is scheduled.
    ///
    /// Rules:
    /// - `url` parses as an absolute URL;
    /// - the scheme is `http` or `https`;
    /// - the URL carries a host.
    pub fn validate(&self) -> ModelResult<()> {
        let invalid = |reason: &str| ModelError::InvalidUrl {
            url: self.url.clone(),
            reason: reason.to_string(),
        };

        let parsed = Url::parse(&self.url).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if parsed.host_str().is_none() {
            return Err(invalid("missing host"));
        }
        Ok(())
    }
}
