//! Tracing initialization and subscriber setup.
//!
//! This module configures the tracing subscriber with OpenTelemetry
//! integration, setting up the complete observability pipeline from `tracing`
//! macros to file export.

use super::export;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber with file-based OTLP export.
///
/// Sets up a pipeline that filters spans by the configured trace level,
/// serializes them to OTLP JSON, and appends them to a rotating file at
/// `<data dir>/stockdeck-otlp.json`.
///
/// The trace level comes from `config.trace_level`, defaulting to `"info"`.
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Silently does nothing if directory creation fails (observability is
///   optional)
/// - Idempotent: only the first call installs a subscriber
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        "Stockdeck",
    )]);

    let trace_file = data_dir.join("stockdeck-otlp.json");
    let provider = export::create_tracer_provider(trace_file, resource);

    let tracer = provider.tracer("Stockdeck");
    let otel_layer = OpenTelemetryLayer::new(tracer);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer);

    let _ = subscriber.try_init();
}
