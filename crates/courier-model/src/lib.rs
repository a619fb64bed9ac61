mod domain;
pub use domain::{CONTENT_TYPE_JSON, DEFAULT_TIMEOUT_MS};
pub use domain::{HttpMethod, Payload, StatusCode, TimeoutMs};

mod error;
pub use error::{ModelError, ModelResult};

mod spec;
pub use spec::{HttpTaskConfig, RequestSpec};

mod strategy;
pub use strategy::{BackoffConfig, ExhaustionPolicy, ResultShape, RetryCodes, TaskVariant};
