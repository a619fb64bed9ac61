mod config;
pub use config::HttpTaskConfig;

mod request;
pub use request::RequestSpec;
