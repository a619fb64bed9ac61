//! Transport seam used by the request task to put one request on the wire.
//!
//! The task never talks to an HTTP client directly: it builds an [`OutgoingRequest`],
//! hands it to a [`Transport`] and classifies whatever comes back.
//! Concrete transports (reqwest, test fakes) live outside of this crate.
mod error;
pub use error::TransportError;

mod message;
pub use message::{OutgoingRequest, RawResponse};

use std::sync::Arc;

use async_trait::async_trait;

/// Sends a single request and returns the raw response.
///
/// Implementations must:
/// - attach `Content-Type: application/json` and send [`OutgoingRequest::body`] for every method;
/// - bound the call by [`OutgoingRequest::timeout`] and report expiry as [`TransportError::Timeout`];
/// - return any received response as `Ok`, whatever its status.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Transport name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Perform the call.
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError>;
}

/// Shared handle to a transport.
pub type TransportHandle = Arc<dyn Transport>;
