//! Common model-level constants.
//!
//! Wire-level values shared by the task, the transport and the tests.

/// Content type attached to every outgoing request, regardless of method.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Transport timeout applied to a single attempt (10 seconds).
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
