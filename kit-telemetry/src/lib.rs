//! # kit-telemetry
//!
//! One place to set up logging for Campaign Kit binaries: an `EnvFilter`
//! driven by `RUST_LOG`/`LOG_LEVEL`, a text or JSON console layer, and an
//! optional OTLP exporter.

pub mod init;

pub use init::{
    LogFormat, TelemetryConfig, TelemetryError, init_telemetry, init_with_config, init_with_otlp,
    shutdown_telemetry,
};

// Re-export tracing so downstream crates share one version.
pub use tracing::{Level, debug, error, info, instrument, trace, warn};
