//! File-based OTLP span export.
//!
//! Implements a custom `SpanExporter` that serializes span batches to OTLP
//! JSON and appends them to a rotating file instead of sending them over the
//! network. The plugin runs in Zellij's wasm sandbox, so file export is the
//! only practical way to get traces out for offline analysis.

use super::file_writer::RotatingWriter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::Value as JsonValue;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Span exporter writing OTLP JSON lines to a rotating file.
///
/// Each exported batch becomes one line: a complete OTLP document with
/// `resourceSpans`, `scopeSpans`, and `spans` arrays.
struct FileSpanExporter {
    writer: RotatingWriter,
    resource: Resource,
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    const fn new(file_path: PathBuf, resource: Resource) -> Self {
        Self {
            writer: RotatingWriter::new(file_path),
            resource,
            is_shutdown: AtomicBool::new(false),
        }
    }

    fn format_batch(&self, batch: &[SpanData]) -> JsonValue {
        let resource_attrs: Vec<JsonValue> = self
            .resource
            .iter()
            .map(|(k, v)| {
                serde_json::json!({
                    "key": k.to_string(),
                    "value": format_attribute_value(v)
                })
            })
            .collect();

        let spans_json: Vec<JsonValue> = batch.iter().map(format_span).collect();

        serde_json::json!({
            "resourceSpans": [{
                "resource": {
                    "attributes": resource_attrs
                },
                "scopeSpans": [{
                    "scope": {
                        "name": "Stockdeck",
                    },
                    "spans": spans_json
                }]
            }]
        })
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        let json_string = self.format_batch(&batch).to_string();

        match self.writer.write_line(&json_string) {
            Ok(()) => Box::pin(std::future::ready(Ok(()))),
            Err(e) => Box::pin(std::future::ready(Err(TraceError::from(e.to_string())))),
        }
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, res: &Resource) {
        let _ = res;
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("writer", &self.writer)
            .field("is_shutdown", &self.is_shutdown)
            .finish()
    }
}

/// Formats one span as an OTLP JSON object: hex IDs, nanosecond timestamps,
/// attribute/event/link arrays, and the status code triple.
fn format_span(span: &SpanData) -> JsonValue {
    let (status_code, status_message) = format_status(&span.status);

    serde_json::json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": if span.parent_span_id == opentelemetry::trace::SpanId::INVALID {
            String::new()
        } else {
            format!("{:016x}", span.parent_span_id)
        },
        "name": span.name,
        "kind": span_kind_to_int(&span.span_kind),
        "startTimeUnixNano": format!("{}", unix_nanos(span.start_time)),
        "endTimeUnixNano": format!("{}", unix_nanos(span.end_time)),
        "attributes": format_attributes(&span.attributes),
        "events": format_events(&span.events),
        "links": format_links(&span.links),
        "status": {
            "code": status_code,
            "message": status_message,
        },
    })
}

fn unix_nanos(time: std::time::SystemTime) -> u128 {
    time.duration_since(std::time::SystemTime::UNIX_EPOCH)
        .unwrap_or(std::time::Duration::from_secs(0))
        .as_nanos()
}

const fn span_kind_to_int(kind: &opentelemetry::trace::SpanKind) -> u8 {
    match kind {
        opentelemetry::trace::SpanKind::Internal => 1,
        opentelemetry::trace::SpanKind::Server => 2,
        opentelemetry::trace::SpanKind::Client => 3,
        opentelemetry::trace::SpanKind::Producer => 4,
        opentelemetry::trace::SpanKind::Consumer => 5,
    }
}

fn format_attributes(attributes: &[opentelemetry::KeyValue]) -> Vec<JsonValue> {
    attributes
        .iter()
        .map(|kv| {
            serde_json::json!({
                "key": kv.key.to_string(),
                "value": format_attribute_value(&kv.value)
            })
        })
        .collect()
}

fn format_attribute_value(value: &opentelemetry::Value) -> JsonValue {
    use opentelemetry::Value;

    match value {
        Value::Bool(b) => serde_json::json!({ "boolValue": b }),
        // OTLP carries 64-bit ints as strings.
        Value::I64(i) => serde_json::json!({ "intValue": i.to_string() }),
        Value::F64(f) => serde_json::json!({ "doubleValue": f }),
        Value::String(s) => serde_json::json!({ "stringValue": s.to_string() }),
        Value::Array(_arr) => {
            serde_json::json!({ "stringValue": format!("{:?}", value) })
        }
    }
}

fn format_events(events: &[opentelemetry::trace::Event]) -> Vec<JsonValue> {
    events
        .iter()
        .map(|event| {
            serde_json::json!({
                "timeUnixNano": format!("{}", unix_nanos(event.timestamp)),
                "name": event.name,
                "attributes": format_attributes(&event.attributes),
            })
        })
        .collect()
}

fn format_links(links: &[opentelemetry::trace::Link]) -> Vec<JsonValue> {
    links
        .iter()
        .map(|link| {
            serde_json::json!({
                "traceId": format!("{:032x}", link.span_context.trace_id()),
                "spanId": format!("{:016x}", link.span_context.span_id()),
                "attributes": format_attributes(&link.attributes),
            })
        })
        .collect()
}

fn format_status(status: &opentelemetry::trace::Status) -> (u8, String) {
    match status {
        opentelemetry::trace::Status::Unset => (0, String::new()),
        opentelemetry::trace::Status::Ok => (1, String::new()),
        opentelemetry::trace::Status::Error { description } => (2, description.to_string()),
    }
}

/// Creates a tracer provider exporting to the given trace file.
///
/// Uses the simple (immediate, non-batched) export strategy: the plugin is
/// event-driven and may be suspended at any time, so buffering spans risks
/// losing them.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(file_path, resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
