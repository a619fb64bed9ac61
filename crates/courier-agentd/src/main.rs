mod settings;

use std::sync::Arc;

use anyhow::bail;
use tracing::{error, info, warn};

use courier_core::{RunnerRouter, SupervisorApi};
use courier_exec::http::{ChannelSink, TaskReport, register_reqwest_runners};
use courier_model::RequestSpec;
use courier_observe::{Subscriber, init_logger};
use taskvisor::{ControllerConfig, Subscribe, SupervisorConfig};

use crate::settings::Settings;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    // 1) settings + logger
    let settings = Settings::from_env()?;
    init_logger(&settings.logger)?;
    info!("logger initialized");

    let urls: Vec<String> = std::env::args().skip(1).collect();
    if urls.is_empty() {
        bail!("usage: courier-agentd <url>...");
    }

    // 2) subscribers
    let subscribers: Vec<Arc<dyn Subscribe>> = vec![Arc::new(Subscriber)];

    // 3) router + runners
    let (sink, mut reports) = ChannelSink::new(urls.len());
    let mut router = RunnerRouter::new();
    register_reqwest_runners(&mut router, &settings.task, Some(Arc::new(sink)))?;

    // 4) SupervisorApi
    let api = SupervisorApi::new(
        SupervisorConfig::default(),
        ControllerConfig::default(),
        subscribers,
        router,
    )
    .await?;

    // 5) requests
    let mut pending = 0usize;
    for url in &urls {
        let spec = RequestSpec::parse(settings.method.as_str(), url, settings.payload.clone())?;
        let run_id = api.submit(&spec, settings.variant).await?;
        info!(run_id = %run_id, method = %spec.method, url = %spec.url, "request submitted");
        pending += 1;
    }

    while pending > 0 {
        tokio::select! {
            Some(report) = reports.recv() => {
                pending -= 1;
                print_report(report)?;
            }
            _ = tokio::signal::ctrl_c() => {
                warn!(pending, "interrupted; abandoning pending requests");
                break;
            }
        }
    }
    Ok(())
}

fn print_report(report: TaskReport) -> anyhow::Result<()> {
    match report.result {
        Ok(result) => {
            let value = result.into_value()?;
            println!("{} {}", report.run_id, serde_json::to_string(&value)?);
        }
        Err(e) => error!(run_id = %report.run_id, error = %e, "request failed"),
    }
    Ok(())
}
