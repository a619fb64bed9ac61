mod method;
pub use method::HttpMethod;

mod payload;
pub use payload::Payload;

mod constants;
pub use constants::{CONTENT_TYPE_JSON, DEFAULT_TIMEOUT_MS};

/// Timeout value in milliseconds.
///
/// Used for the per-attempt transport timeout.
pub type TimeoutMs = u64;

/// Numeric HTTP status code as received from the wire.
pub type StatusCode = u16;
