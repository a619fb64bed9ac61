use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use courier_core::TaskResult;
use courier_model::TaskVariant;

use super::driver::DriveError;

/// Terminal report of one submitted request task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskReport {
    /// Run id the task was submitted under.
    pub run_id: String,
    pub variant: TaskVariant,
    pub result: Result<TaskResult, DriveError>,
}

/// Destination for task reports.
#[async_trait]
pub trait ResultSink: Send + Sync + 'static {
    async fn publish(&self, report: TaskReport);
}

/// Shared handle to a result sink.
pub type SinkHandle = Arc<dyn ResultSink>;

/// Sink forwarding reports into a bounded mpsc channel.
///
/// A dropped receiver is not an error: reports are discarded.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<TaskReport>,
}

impl ChannelSink {
    /// Create a sink and the receiving end of its channel.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<TaskReport>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

#[async_trait]
impl ResultSink for ChannelSink {
    async fn publish(&self, report: TaskReport) {
        if let Err(e) = self.tx.send(report).await {
            debug!(run_id = %e.0.run_id, "result receiver dropped; report discarded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(run_id: &str) -> TaskReport {
        TaskReport {
            run_id: run_id.to_string(),
            variant: TaskVariant::Http,
            result: Ok(TaskResult::Empty),
        }
    }

    #[tokio::test]
    async fn reports_are_delivered_in_order() {
        let (sink, mut rx) = ChannelSink::new(4);
        sink.publish(report("a")).await;
        sink.publish(report("b")).await;

        assert_eq!(rx.recv().await.unwrap().run_id, "a");
        assert_eq!(rx.recv().await.unwrap().run_id, "b");
    }

    #[tokio::test]
    async fn dropped_receiver_is_tolerated() {
        let (sink, rx) = ChannelSink::new(1);
        drop(rx);
        sink.publish(report("lost")).await;
    }
}
