//! OTLP tracer-provider setup and shutdown guard.

use std::collections::HashMap;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::{SpanExporter, WithExportConfig, WithHttpConfig};
use opentelemetry_sdk::trace::{SdkTracer, SdkTracerProvider};
use opentelemetry_sdk::Resource;
use tracing::debug;

use crate::{ArizeConfig, TelemetryError};

const SERVICE_NAME: &str = "relay";
const TRACER_NAME: &str = "relay-telemetry";

/// Owns the tracer provider; shuts it down (flushing pending spans) on drop.
pub struct TelemetryGuard {
    provider: SdkTracerProvider,
}

impl TelemetryGuard {
    /// Tracer handed to the conversation code explicitly.
    pub fn tracer(&self) -> SdkTracer {
        self.provider.tracer(TRACER_NAME)
    }

    /// Flush pending spans and shut the provider down.
    pub fn shutdown(&self) -> Result<(), TelemetryError> {
        self.provider
            .shutdown()
            .map_err(|e| TelemetryError::Shutdown(e.to_string()))
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        // Best effort; a second shutdown after an explicit one is an error
        // the SDK reports, which we ignore here.
        let _ = self.provider.shutdown();
    }
}

/// Install a batch OTLP/HTTP pipeline pointed at the Arize collector.
///
/// The provider is also set globally so tracing layers added later can
/// find it, but callers should take their tracer from the returned guard.
pub fn init(config: &ArizeConfig) -> Result<TelemetryGuard, TelemetryError> {
    let mut headers = HashMap::new();
    if let Some(api_key) = &config.api_key {
        headers.insert("authorization".to_string(), format!("Bearer {api_key}"));
    }
    headers.insert("x-arize-space-id".to_string(), config.space_id.clone());
    headers.insert(
        "x-arize-project-name".to_string(),
        config.project_name.clone(),
    );

    debug!(endpoint = %config.endpoint, project = %config.project_name, "initializing OTLP exporter");

    let exporter = SpanExporter::builder()
        .with_http()
        .with_endpoint(config.endpoint.clone())
        .with_headers(headers)
        .build()
        .map_err(|e| TelemetryError::ExporterBuild(e.to_string()))?;

    let resource = Resource::builder()
        .with_service_name(SERVICE_NAME)
        .with_attribute(KeyValue::new(
            "openinference.project.name",
            config.project_name.clone(),
        ))
        .build();

    let provider = SdkTracerProvider::builder()
        .with_resource(resource)
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    Ok(TelemetryGuard { provider })
}

#[cfg(test)]
mod tests {
    use opentelemetry::trace::{Span, Tracer};
    use opentelemetry_sdk::trace::InMemorySpanExporter;

    use super::*;

    #[test]
    fn guard_tracer_exports_spans_and_shuts_down_cleanly() {
        let exporter = InMemorySpanExporter::default();
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(exporter.clone())
            .build();
        let guard = TelemetryGuard { provider };

        let tracer = guard.tracer();
        let mut span = tracer.start("startup");
        span.end();

        // Shutdown clears the in-memory buffer, so read spans first.
        let spans = exporter.get_finished_spans().unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].name, "startup");

        guard.shutdown().unwrap();
        assert!(exporter.get_finished_spans().unwrap().is_empty());
    }
}
