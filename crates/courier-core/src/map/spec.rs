use std::time::Duration;

use taskvisor::{BackoffPolicy, AdmissionPolicy, ControllerSpec, JitterPolicy, RestartPolicy, TaskRef, TaskSpec};

/// Supervisor-level backoff for request tasks.
///
/// Request tasks are never restarted by the supervisor, so this only needs to be a valid policy.
pub fn to_backoff_policy() -> BackoffPolicy {
    BackoffPolicy {
        first: Duration::from_millis(0),
        max: Duration::from_millis(0),
        jitter: JitterPolicy::None,
        factor: 1.0,
    }
}

/// Wrap a request task into a one-shot task spec.
///
/// Retries are driven by the task's own backoff schedule, so the supervisor never restarts it
/// and no supervisor timeout bounds the whole retry window.
pub fn to_task_spec(task: TaskRef) -> TaskSpec {
    TaskSpec::new(task, RestartPolicy::Never, to_backoff_policy(), None)
}

/// Controller spec for a request task; every submission gets its own queued slot.
pub fn to_controller_spec(task: TaskRef) -> ControllerSpec {
    ControllerSpec {
        admission: AdmissionPolicy::Queue,
        task_spec: to_task_spec(task),
    }
}
