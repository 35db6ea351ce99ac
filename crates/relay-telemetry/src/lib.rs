//! Arize telemetry bootstrap.
//!
//! Builds an OTLP/HTTP span exporter pointed at the Arize collector,
//! installs a batch tracer provider, and hands back a guard that flushes
//! on shutdown. Callers receive their tracer from the guard rather than
//! from ambient global state, so the conversation code stays testable
//! against an in-memory provider.

mod config;
mod provider;

pub use config::ArizeConfig;
pub use provider::{init, TelemetryGuard};

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("exporter build error: {0}")]
    ExporterBuild(String),
    #[error("telemetry shutdown error: {0}")]
    Shutdown(String),
}
