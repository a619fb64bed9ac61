use anyhow::{Context, bail};

use courier_model::{HttpMethod, HttpTaskConfig, Payload, TaskVariant};
use courier_observe::{LoggerConfig, LoggerFormat, LoggerLevel};

/// Daemon settings read from the environment.
///
/// - `COURIER_LOG`: log filter expression (default `info`)
/// - `COURIER_LOG_FORMAT`: `text` or `json` (default `text`)
/// - `COURIER_CONFIG`: path to a JSON `HttpTaskConfig` (optional)
/// - `COURIER_METHOD`: HTTP method of submitted requests (default `POST`)
/// - `COURIER_VARIANT`: `http` or `http-with-result` (default `http-with-result`)
/// - `COURIER_PAYLOAD`: JSON object sent as the body (default `{}`)
#[derive(Clone, Debug)]
pub struct Settings {
    pub logger: LoggerConfig,
    pub task: HttpTaskConfig,
    pub method: HttpMethod,
    pub variant: TaskVariant,
    pub payload: Payload,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let level: LoggerLevel = var("COURIER_LOG")
            .unwrap_or_else(|| "info".to_string())
            .parse()
            .context("Invalid COURIER_LOG")?;
        let format: LoggerFormat = var("COURIER_LOG_FORMAT")
            .unwrap_or_else(|| "text".to_string())
            .parse()
            .context("Invalid COURIER_LOG_FORMAT")?;

        let task = match var("COURIER_CONFIG") {
            Some(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("Cannot read COURIER_CONFIG at {path}"))?;
                let cfg: HttpTaskConfig =
                    serde_json::from_str(&raw).context("Invalid COURIER_CONFIG contents")?;
                cfg.validate().context("Invalid COURIER_CONFIG contents")?;
                cfg
            }
            None => HttpTaskConfig::default(),
        };

        let method: HttpMethod = var("COURIER_METHOD")
            .unwrap_or_else(|| "POST".to_string())
            .parse()
            .context("Invalid COURIER_METHOD")?;
        let variant: TaskVariant = var("COURIER_VARIANT")
            .unwrap_or_else(|| "http-with-result".to_string())
            .parse()
            .context("Invalid COURIER_VARIANT")?;

        let payload = match var("COURIER_PAYLOAD") {
            Some(raw) => match serde_json::from_str::<serde_json::Value>(&raw)
                .context("Invalid COURIER_PAYLOAD")?
            {
                serde_json::Value::Object(map) => Payload::from(map),
                other => bail!("COURIER_PAYLOAD must be a JSON object, got {other}"),
            },
            None => Payload::new(),
        };

        Ok(Self {
            logger: LoggerConfig {
                format,
                level,
                ..Default::default()
            },
            task,
            method,
            variant,
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let s = Settings::from_lookup(lookup(&[])).unwrap();

        assert_eq!(s.logger.level.as_str(), "info");
        assert_eq!(s.logger.format, LoggerFormat::Text);
        assert_eq!(s.method, HttpMethod::Post);
        assert_eq!(s.variant, TaskVariant::HttpWithResult);
        assert!(s.payload.is_empty());
        assert_eq!(s.task.timeout_ms, 10_000);
    }

    #[test]
    fn reads_overrides() {
        let s = Settings::from_lookup(lookup(&[
            ("COURIER_LOG", "courier_core=debug,info"),
            ("COURIER_LOG_FORMAT", "json"),
            ("COURIER_METHOD", "put"),
            ("COURIER_VARIANT", "http"),
            ("COURIER_PAYLOAD", r#"{"id": 1}"#),
        ]))
        .unwrap();

        assert_eq!(s.logger.format, LoggerFormat::Json);
        assert_eq!(s.method, HttpMethod::Put);
        assert_eq!(s.variant, TaskVariant::Http);
        assert_eq!(s.payload.get("id"), Some(&serde_json::json!(1)));
    }

    #[test]
    fn rejects_non_object_payload_and_bad_method() {
        assert!(Settings::from_lookup(lookup(&[("COURIER_PAYLOAD", "[1, 2]")])).is_err());
        assert!(Settings::from_lookup(lookup(&[("COURIER_METHOD", "TELEPORT")])).is_err());
        assert!(Settings::from_lookup(lookup(&[("COURIER_CONFIG", "/nonexistent/courier.json")])).is_err());
    }
}
