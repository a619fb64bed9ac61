mod spec;

pub use spec::{to_backoff_policy, to_controller_spec, to_task_spec};
