mod error;
pub use error::ExecError;

#[cfg(feature = "http")]
pub mod http;
