//! Telemetry initialization and configuration

use std::sync::Once;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{directive}': {reason}")]
    InvalidFilter { directive: String, reason: String },

    #[error("failed to install OTLP pipeline: {0}")]
    Otlp(String),

    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Log output encoding for the console layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Configuration for the telemetry system
#[derive(Debug, Clone, Default)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub otlp_endpoint: Option<String>,
    pub default_level: Option<String>,
    pub log_directives: Vec<String>,
    pub format: LogFormat,
}

impl TelemetryConfig {
    /// Create a new configuration with the given service name.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into(), ..Default::default() }
    }

    /// Enable OTLP export to the specified endpoint.
    pub fn with_otlp(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = Some(endpoint.into());
        self
    }

    /// Set the default log level (e.g., "debug", "info").
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.default_level = Some(level.into());
        self
    }

    /// Add a custom tracing directive (e.g., "kit_engine=debug").
    pub fn with_log_directive(mut self, directive: impl Into<String>) -> Self {
        self.log_directives.push(directive.into());
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Supported variables:
    /// - `SERVICE_NAME`: The name of the service (default: "campaign-kit")
    /// - `OTLP_ENDPOINT`: OTLP collector endpoint (e.g., "http://localhost:4317")
    /// - `LOG_LEVEL`: Default log level when `RUST_LOG` is unset (default: "info")
    /// - `LOG_FORMAT`: `json` for structured output, anything else for text
    pub fn from_env() -> Self {
        let service_name =
            std::env::var("SERVICE_NAME").unwrap_or_else(|_| "campaign-kit".to_string());
        let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok().filter(|v| !v.is_empty());
        let default_level = std::env::var("LOG_LEVEL").ok();
        let format = match std::env::var("LOG_FORMAT") {
            Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Self { service_name, otlp_endpoint, default_level, log_directives: Vec::new(), format }
    }

    fn build_filter(&self) -> Result<EnvFilter, TelemetryError> {
        let mut filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => {
                let level = self.default_level.as_deref().unwrap_or("info");
                EnvFilter::try_new(level).map_err(|e| TelemetryError::InvalidFilter {
                    directive: level.to_string(),
                    reason: e.to_string(),
                })?
            }
        };

        for directive in &self.log_directives {
            let parsed = directive.parse().map_err(|e: tracing_subscriber::filter::ParseError| {
                let reason = e.to_string();
                TelemetryError::InvalidFilter { directive: directive.clone(), reason }
            })?;
            filter = filter.add_directive(parsed);
        }
        Ok(filter)
    }
}

/// Initialize telemetry with basic console logging
pub fn init_telemetry(service_name: &str) -> Result<(), TelemetryError> {
    init_with_config(TelemetryConfig::new(service_name))
}

/// Initialize telemetry with OpenTelemetry OTLP export
pub fn init_with_otlp(service_name: &str, endpoint: &str) -> Result<(), TelemetryError> {
    init_with_config(TelemetryConfig::new(service_name).with_otlp(endpoint))
}

/// Shutdown telemetry and flush any pending spans
pub fn shutdown_telemetry() {
    opentelemetry::global::shutdown_tracer_provider();
}

/// Install the global subscriber. Only the first call has any effect.
pub fn init_with_config(config: TelemetryConfig) -> Result<(), TelemetryError> {
    let mut result = Ok(());
    INIT.call_once(|| result = install(&config));
    result
}

fn install(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    use tracing_subscriber::fmt;

    let filter = config.build_filter()?;

    let (text_layer, json_layer) = match config.format {
        LogFormat::Text => {
            (Some(fmt::layer().with_target(true).with_line_number(true)), None)
        }
        LogFormat::Json => (None, Some(fmt::layer().json().with_current_span(true))),
    };

    let otlp_layer = match &config.otlp_endpoint {
        Some(endpoint) => {
            use opentelemetry_otlp::WithExportConfig;
            use tracing_opentelemetry::OpenTelemetryLayer;

            let tracer = opentelemetry_otlp::new_pipeline()
                .tracing()
                .with_exporter(opentelemetry_otlp::new_exporter().tonic().with_endpoint(endpoint))
                .with_trace_config(opentelemetry_sdk::trace::config().with_resource(
                    opentelemetry_sdk::Resource::new(vec![opentelemetry::KeyValue::new(
                        "service.name",
                        config.service_name.clone(),
                    )]),
                ))
                .install_batch(opentelemetry_sdk::runtime::Tokio)
                .map_err(|e| TelemetryError::Otlp(e.to_string()))?;
            Some(OpenTelemetryLayer::new(tracer))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .with(otlp_layer)
        .try_init()
        .map_err(|e| TelemetryError::Install(e.to_string()))?;

    tracing::info!(
        service.name = config.service_name,
        otlp.enabled = config.otlp_endpoint.is_some(),
        log.level = config.default_level.as_deref().unwrap_or("env"),
        log.format = ?config.format,
        "Telemetry system initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accumulates_directives() {
        let config = TelemetryConfig::new("kit")
            .with_log_level("debug")
            .with_log_directive("hyper=warn")
            .with_log_directive("kit_engine=trace")
            .with_format(LogFormat::Json);
        assert_eq!(config.service_name, "kit");
        assert_eq!(config.log_directives.len(), 2);
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.build_filter().is_ok());
    }

    #[test]
    fn invalid_directive_is_reported() {
        let config = TelemetryConfig::new("kit").with_log_directive("kit_engine=loud");
        assert!(matches!(config.build_filter(), Err(TelemetryError::InvalidFilter { .. })));
    }
}
