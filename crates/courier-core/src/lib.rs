pub mod attempt;
pub mod error;
pub mod map;
pub mod observer;
pub mod result;
pub mod router;
pub mod runner;
pub mod schedule;
pub mod supervisor;
pub mod task;
pub mod transport;

pub use attempt::{AttemptContext, RetryDirective, RetryReason, TaskFailure, TaskOutcome, TaskState};
pub use observer::{
    AttemptObserver, NoOpObserver, ObserverHandle, TracingObserver, noop_observer,
};
pub use result::{ResponseInfo, TaskResult};
pub use schedule::{BackoffSchedule, ScheduleError};
pub use task::HttpTask;
pub use transport::{OutgoingRequest, RawResponse, Transport, TransportError, TransportHandle};

pub mod prelude {
    pub use crate::error::CoreError;
    pub use crate::router::RunnerRouter;
    pub use crate::runner::{Runner, RunnerError, make_run_id};
    pub use crate::supervisor::SupervisorApi;
}

pub use prelude::*;
