#![cfg(feature = "subscriber")]

//! Supervisor event logging for request tasks.
//!
//! Request tasks are submitted as one-shot taskvisor jobs: retries happen inside the task,
//! so the supervisor only sees a task start, then either stop (a result was produced)
//! or die (a terminal failure). Everything else is routine bookkeeping logged at trace/debug.

use std::borrow::Borrow;

use async_trait::async_trait;
use taskvisor::{Event, EventKind, Subscribe};
use tracing::{debug, error, info, trace, warn};

/// Subscriber that logs taskvisor events of request tasks.
#[derive(Default)]
pub struct Subscriber;

/// On overflow, events are dropped and `SubscriberOverflow` is emitted.
const SUBSCRIBER_QUEUE_CAPACITY: usize = 2048;

#[async_trait]
impl Subscribe for Subscriber {
    async fn on_event(&self, event: &Event) {
        log_event(event);
    }

    fn name(&self) -> &'static str {
        "courier-subscriber"
    }

    fn queue_capacity(&self) -> usize {
        SUBSCRIBER_QUEUE_CAPACITY
    }
}

fn log_event<E: View>(e: E) {
    let msg = message_for(e.kind());

    match e.kind() {
        EventKind::ControllerSubmitted => debug!(run_id = e.run_id(), "{msg}"),
        EventKind::TaskStarting => info!(run_id = e.run_id(), "{msg}"),
        EventKind::TaskStopped => info!(run_id = e.run_id(), "{msg}"),
        EventKind::TaskFailed | EventKind::ActorDead => {
            error!(run_id = e.run_id(), reason = e.reason(), "{msg}")
        }
        EventKind::TimeoutHit => {
            warn!(run_id = e.run_id(), timeout_ms = e.timeout_ms(), "{msg}")
        }
        EventKind::ControllerRejected => warn!(run_id = e.run_id(), reason = e.reason(), "{msg}"),
        EventKind::SubscriberPanicked | EventKind::SubscriberOverflow => {
            error!(run_id = e.run_id(), reason = e.reason(), "{msg}")
        }
        EventKind::ShutdownRequested | EventKind::AllStoppedWithinGrace => info!("{msg}"),
        EventKind::GraceExceeded => warn!("{msg}"),
        _ => trace!(run_id = e.run_id(), kind = ?e.kind(), "{msg}"),
    }
}

/// Field accessors with defaults for absent values.
trait View {
    fn run_id(&self) -> &str;
    fn reason(&self) -> &str;
    fn timeout_ms(&self) -> u32;
    fn kind(&self) -> EventKind;
}

impl<T> View for T
where
    T: Borrow<Event>,
{
    #[inline]
    fn run_id(&self) -> &str {
        self.borrow().task.as_deref().unwrap_or("unknown")
    }

    #[inline]
    fn reason(&self) -> &str {
        self.borrow().reason.as_deref().unwrap_or("unknown")
    }

    #[inline]
    fn timeout_ms(&self) -> u32 {
        self.borrow().timeout_ms.unwrap_or(0)
    }

    #[inline]
    fn kind(&self) -> EventKind {
        self.borrow().kind
    }
}

#[inline]
fn message_for(kind: EventKind) -> &'static str {
    match kind {
        EventKind::ControllerSubmitted => "request task submitted",
        EventKind::TaskStarting => "request task started",
        EventKind::TaskStopped => "request task finished",
        EventKind::TaskFailed => "request task failed",
        EventKind::ActorDead => "request task terminated permanently",
        EventKind::TimeoutHit => "request task exceeded its supervisor timeout",
        EventKind::ControllerRejected => "request task rejected by controller",
        EventKind::SubscriberOverflow => "event dropped for a subscriber",
        EventKind::SubscriberPanicked => "subscriber panicked while processing an event",
        EventKind::ShutdownRequested => "shutdown requested",
        EventKind::AllStoppedWithinGrace => "all request tasks stopped within grace period",
        EventKind::GraceExceeded => "grace exceeded; some request tasks did not stop in time",
        _ => "supervisor event",
    }
}
