//! Runner router that selects an appropriate `Runner` implementation for a given task variant.
//!
//! The router checks registered runners in order and delegates task construction
//! to the first one that reports `supports(variant) == true`.
use std::sync::Arc;

use courier_model::{RequestSpec, TaskVariant};
use taskvisor::TaskRef;
use tracing::{debug, instrument, trace};

use crate::{
    error::CoreError,
    runner::{Runner, make_run_id},
};

/// Task built by a runner, together with the run id it was registered under.
pub struct BuiltTask {
    /// Taskvisor task name.
    pub run_id: String,
    /// Task body.
    pub task: TaskRef,
}

/// Router that selects an appropriate [`Runner`] for a given [`TaskVariant`].
///
/// Runners are checked in the order they were registered.
#[derive(Default)]
pub struct RunnerRouter {
    runners: Vec<Arc<dyn Runner>>,
}

impl RunnerRouter {
    /// Create an empty router.
    #[inline]
    pub fn new() -> Self {
        Self {
            runners: Vec::new(),
        }
    }

    /// Register a new runner.
    ///
    /// Runners are queried in the order they are registered; the first one that reports `supports(variant) == true` is used.
    #[inline]
    pub fn register(&mut self, runner: Arc<dyn Runner>) {
        self.runners.push(runner);
    }

    /// Number of registered runners.
    pub fn len(&self) -> usize {
        self.runners.len()
    }

    /// Returns `true` if no runner is registered.
    pub fn is_empty(&self) -> bool {
        self.runners.is_empty()
    }

    /// Pick the first runner that claims to support the given variant.
    pub fn pick(&self, variant: TaskVariant) -> Option<&Arc<dyn Runner>> {
        self.runners.iter().find(|r| r.supports(variant))
    }

    /// Validate `spec` and build a task for it using the selected runner.
    #[instrument(level = "debug", skip(self, spec, variant), fields(variant = variant.name(), url = %spec.url))]
    pub fn build(&self, spec: &RequestSpec, variant: TaskVariant) -> Result<BuiltTask, CoreError> {
        trace!(spec = ?spec, "router received spec");
        spec.validate()?;

        let r = self
            .pick(variant)
            .ok_or_else(|| CoreError::NoRunner(variant.name().to_string()))?;

        let run_id = make_run_id(r.name(), variant.name());
        let task = r.build_task(spec, &run_id).map_err(CoreError::from)?;
        debug!(runner = r.name(), run_id = %run_id, "runner built task successfully");
        Ok(BuiltTask { run_id, task })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::RunnerError;

    use courier_model::HttpMethod;
    use taskvisor::{TaskError, TaskFn};
    use tokio_util::sync::CancellationToken;

    struct FireAndForgetDummy;

    impl Runner for FireAndForgetDummy {
        fn name(&self) -> &'static str {
            "fire-and-forget"
        }

        fn supports(&self, variant: TaskVariant) -> bool {
            variant == TaskVariant::Http
        }

        fn build_task(&self, _spec: &RequestSpec, run_id: &str) -> Result<TaskRef, RunnerError> {
            Ok(TaskFn::arc(
                run_id.to_string(),
                |_ctx: CancellationToken| async move { Ok::<(), TaskError>(()) },
            ))
        }
    }

    struct Failing;

    impl Runner for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn supports(&self, _variant: TaskVariant) -> bool {
            true
        }

        fn build_task(&self, _spec: &RequestSpec, _run_id: &str) -> Result<TaskRef, RunnerError> {
            Err(RunnerError::Internal("boom".into()))
        }
    }

    fn mk_spec() -> RequestSpec {
        RequestSpec::new(HttpMethod::Post, "https://example.com/hook")
    }

    #[test]
    fn build_uses_registered_runner() {
        let mut router = RunnerRouter::new();
        router.register(Arc::new(FireAndForgetDummy));

        match router.build(&mk_spec(), TaskVariant::Http) {
            Ok(built) => assert!(built.run_id.starts_with("fire-and-forget-http-")),
            Err(e) => panic!("expected built task, got error: {e:?}"),
        }
    }

    #[test]
    fn build_fails_when_no_runner_supports_variant() {
        let mut router = RunnerRouter::new();
        router.register(Arc::new(FireAndForgetDummy));

        match router.build(&mk_spec(), TaskVariant::HttpWithResult) {
            Err(CoreError::NoRunner(v)) => assert_eq!(v, "http-with-result"),
            Ok(_) => panic!("expected CoreError::NoRunner, got Ok(..)"),
            Err(e) => panic!("expected CoreError::NoRunner, got {e:?}"),
        }
    }

    #[test]
    fn build_rejects_invalid_url_before_routing() {
        let mut router = RunnerRouter::new();
        router.register(Arc::new(FireAndForgetDummy));

        let spec = RequestSpec::new(HttpMethod::Get, "ftp://example.com/file");
        assert!(matches!(
            router.build(&spec, TaskVariant::Http),
            Err(CoreError::Model(_))
        ));
    }

    #[test]
    fn pick_respects_registration_order() {
        let mut router = RunnerRouter::new();
        router.register(Arc::new(FireAndForgetDummy));
        router.register(Arc::new(Failing));
        assert_eq!(router.len(), 2);

        assert_eq!(router.pick(TaskVariant::Http).unwrap().name(), "fire-and-forget");
        assert_eq!(router.pick(TaskVariant::HttpWithResult).unwrap().name(), "failing");
        assert!(matches!(
            router.build(&mk_spec(), TaskVariant::HttpWithResult),
            Err(CoreError::Runner(RunnerError::Internal(_)))
        ));
    }
}
