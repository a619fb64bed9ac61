//! High-level API over taskvisor `Supervisor` used by courier-core.
//! - Owns a `Supervisor` instance.
//! - Uses `RunnerRouter` to build request tasks.
//! - Submits tasks via the controller as one-shot jobs.
use std::sync::Arc;

use courier_model::{RequestSpec, TaskVariant};
use taskvisor::{ControllerConfig, Subscribe, Supervisor, SupervisorConfig};
use tracing::{debug, error, info, instrument};

use crate::{error::CoreError, map::to_controller_spec, router::RunnerRouter};

/// Thin wrapper around taskvisor [`Supervisor`] with a runner router.
pub struct SupervisorApi {
    sup: Arc<Supervisor>,
    router: RunnerRouter,
}

impl SupervisorApi {
    /// Create a supervisor with explicit configs and start its run loop in background.
    ///
    /// `sup_cfg`: supervisor settings
    /// `ctrl_cfg`: controller settings
    /// `subscribers`: event subscribers
    /// `router`: runner router (one runner per task variant)
    pub async fn new(
        sup_cfg: SupervisorConfig,
        ctrl_cfg: ControllerConfig,
        subscribers: Vec<Arc<dyn Subscribe>>,
        router: RunnerRouter,
    ) -> Result<Self, CoreError> {
        if router.is_empty() {
            return Err(CoreError::NoRunner("router has no registered runners".into()));
        }
        let sup = Supervisor::builder(sup_cfg)
            .with_subscribers(subscribers)
            .with_controller(ctrl_cfg)
            .build();

        let runner = Arc::clone(&sup);
        tokio::spawn(async move {
            if let Err(e) = runner.run(Vec::new()).await {
                error!(error = %e, "supervisor run loop exited with error");
            }
        });
        sup.wait_ready().await;
        info!("supervisor is ready to accept tasks");
        Ok(Self { sup, router })
    }

    /// Get a clone of the underlying supervisor handle.
    pub fn supervisor(&self) -> Arc<Supervisor> {
        Arc::clone(&self.sup)
    }

    /// Build and submit a request task, returning its run id.
    ///
    /// Steps:
    /// 1. Ask the router to validate the spec, pick a runner and build a `TaskRef`.
    /// 2. Wrap it into a one-shot `ControllerSpec`.
    /// 3. Submit the controller spec to the supervisor.
    #[instrument(level = "debug", skip(self, spec, variant), fields(variant = variant.name(), method = %spec.method, url = %spec.url))]
    pub async fn submit(&self, spec: &RequestSpec, variant: TaskVariant) -> Result<String, CoreError> {
        let built = self.router.build(spec, variant)?;

        debug!(run_id = %built.run_id, "submitting via controller");
        self.sup
            .submit(to_controller_spec(built.task))
            .await
            .map_err(|e| CoreError::Supervisor(e.to_string()))?;
        Ok(built.run_id)
    }
}
