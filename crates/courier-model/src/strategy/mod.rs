mod backoff;
pub use backoff::BackoffConfig;

mod exhaustion;
pub use exhaustion::ExhaustionPolicy;

mod retry;
pub use retry::RetryCodes;

mod shape;
pub use shape::ResultShape;

mod variant;
pub use variant::TaskVariant;
