use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, header::CONTENT_TYPE};
use tracing::trace;

use courier_core::{OutgoingRequest, RawResponse, Transport, TransportError};
use courier_model::{CONTENT_TYPE_JSON, HttpMethod};

use crate::ExecError;

/// [`Transport`] backed by a shared `reqwest` client.
///
/// Timeouts are applied per request from [`OutgoingRequest::timeout`] and cover the whole exchange,
/// body included.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with a default client.
    pub fn new() -> Result<Self, ExecError> {
        let client = Client::builder()
            .user_agent(concat!("courier/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    fn name(&self) -> &'static str {
        "reqwest"
    }

    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError> {
        trace!(request = %request, "sending via reqwest");
        let timeout = request.timeout;

        let response = self
            .client
            .request(to_method(request.method), &request.url)
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .body(request.body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_error(&e, timeout))?;

        let mut raw = RawResponse::new(response.status().as_u16(), String::new());
        for (name, value) in response.headers() {
            raw.append_header(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
        }
        raw.text = response.text().await.map_err(|e| map_error(&e, timeout))?;
        Ok(raw)
    }
}

fn to_method(m: HttpMethod) -> Method {
    match m {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Head => Method::HEAD,
        HttpMethod::Options => Method::OPTIONS,
    }
}

/// Classify a client error; the order matters since a connect timeout is both.
fn map_error(e: &reqwest::Error, timeout: Duration) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(timeout)
    } else if e.is_connect() {
        TransportError::Connect(e.to_string())
    } else if e.is_builder() {
        TransportError::Invalid(e.to_string())
    } else if e.is_request() || e.is_body() || e.is_decode() {
        TransportError::Io(e.to_string())
    } else {
        TransportError::Other(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use super::*;

    fn req(method: HttpMethod, url: String, body: &str) -> OutgoingRequest {
        OutgoingRequest {
            method,
            url,
            body: body.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    #[tokio::test]
    async fn sends_json_body_with_content_type_for_every_method() {
        let server = MockServer::start().await;
        for m in ["GET", "POST", "PUT", "DELETE", "PATCH"] {
            Mock::given(method(m))
                .and(path("/hook"))
                .and(header("content-type", "application/json"))
                .and(body_json(json!({"id": 7})))
                .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
                .expect(1)
                .mount(&server)
                .await;
        }

        let transport = ReqwestTransport::new().expect("transport");
        for m in [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Delete,
            HttpMethod::Patch,
        ] {
            let resp = transport
                .send(req(m, format!("{}/hook", server.uri()), r#"{"id":7}"#))
                .await
                .expect("response");
            assert_eq!(resp.status, 200, "method {m}");
        }
    }

    #[tokio::test]
    async fn echo_round_trip_reproduces_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/echo"))
            .respond_with(|r: &Request| ResponseTemplate::new(200).set_body_bytes(r.body.clone()))
            .mount(&server)
            .await;

        let body = r#"{"job":"sync","tags":["a","b"]}"#;
        let transport = ReqwestTransport::new().expect("transport");
        let resp = transport
            .send(req(HttpMethod::Post, format!("{}/echo", server.uri()), body))
            .await
            .expect("response");

        let echoed: serde_json::Value = serde_json::from_str(&resp.text).unwrap();
        assert_eq!(echoed, json!({"job": "sync", "tags": ["a", "b"]}));
    }

    #[tokio::test]
    async fn error_statuses_are_responses_not_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(503)
                    .set_body_string("busy")
                    .append_header("X-Retry", "a")
                    .append_header("X-Retry", "b"),
            )
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().expect("transport");
        let resp = transport
            .send(req(HttpMethod::Post, server.uri(), "{}"))
            .await
            .expect("response");

        assert_eq!(resp.status, 503);
        assert_eq!(resp.text, "busy");
        assert_eq!(resp.headers.get("x-retry").map(String::as_str), Some("a, b"));
    }

    #[tokio::test]
    async fn refused_connection_is_a_connect_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = ReqwestTransport::new().expect("transport");
        let err = transport
            .send(req(HttpMethod::Get, format!("http://{addr}/"), "{}"))
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Connect(_)), "got {err:?}");
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn slow_server_hits_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().expect("transport");
        let mut r = req(HttpMethod::Get, server.uri(), "{}");
        r.timeout = Duration::from_millis(50);

        let err = transport.send(r).await.unwrap_err();
        assert_eq!(err, TransportError::Timeout(Duration::from_millis(50)));
    }

    #[tokio::test]
    async fn malformed_url_is_not_retryable() {
        let transport = ReqwestTransport::new().expect("transport");
        let err = transport
            .send(req(HttpMethod::Get, "not a url".into(), "{}"))
            .await
            .unwrap_err();

        assert!(!err.is_retryable(), "got {err:?}");
    }
}
