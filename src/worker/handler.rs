//! Worker thread implementation for asynchronous payload parsing.
//!
//! This module implements the Zellij worker thread interface, handling report
//! payload parsing off the main plugin rendering loop. It includes distributed
//! tracing support for cross-thread observability.
//!
//! Parsing is all-or-nothing: the worker returns either the full validated
//! brand list or a single error for the whole payload. The view-state engine
//! never sees a partially decoded report.

use crate::domain::parse_report;
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker thread state for handling parse operations.
///
/// This struct runs on a separate thread spawned by Zellij and processes
/// messages sent from the main plugin thread. The worker is stateless; the
/// struct exists to carry the `ZellijWorker` implementation.
#[derive(Serialize, Deserialize, Default)]
pub struct ReportWorker {}

impl ReportWorker {
    /// Handles the `ParseReport` message.
    ///
    /// Decodes the raw body into typed brand records. Any decode failure
    /// rejects the whole payload.
    fn handle_parse_report(body: &str) -> WorkerResponse {
        match parse_report(body) {
            Ok(brands) => {
                tracing::debug!(brand_count = brands.len(), "report payload parsed");
                WorkerResponse::ReportParsed { brands }
            }
            Err(e) => {
                tracing::debug!(error = %e, "report payload rejected");
                WorkerResponse::Error {
                    message: format!("parse report: {e}"),
                }
            }
        }
    }

    /// Attaches the parent trace context from a message to the current thread.
    ///
    /// This function reconstructs the OpenTelemetry context from the serialized
    /// trace information in the message, allowing spans created in the worker
    /// thread to be linked to their parent spans in the main thread.
    ///
    /// Returns a context guard that must be held for the duration of the
    /// operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_context = match message {
            WorkerMessage::ParseReport { trace_context, .. } => trace_context,
        }
        .as_ref()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes a worker message and returns the appropriate response.
    ///
    /// This is the main message handling entry point, dispatching to specific
    /// handlers based on the message variant. Automatically attaches trace
    /// context and creates a tracing span for the operation.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::ParseReport { body, .. } => Self::handle_parse_report(&body),
        }
    }
}

/// Initializes tracing for the worker thread.
///
/// Sets up the same tracing configuration as the main thread, ensuring logs
/// from both threads are written to the same file.
fn init_worker_tracing() {
    use crate::observability;
    use crate::Config;

    let config = Config::default();
    observability::init_tracing(&config);
}

/// Tracks whether worker tracing has been initialized.
///
/// Used to ensure tracing is only set up once per worker thread lifetime.
static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for ReportWorker {
    /// Handles incoming messages from the main plugin thread.
    ///
    /// This is the Zellij worker interface entry point. It:
    /// 1. Initializes tracing on first message (once per worker lifetime)
    /// 2. Deserializes the message payload
    /// 3. Processes the message via `handle_message`
    /// 4. Serializes and sends the response back to the main thread
    ///
    /// # Arguments
    ///
    /// * `message` - Message name used for routing the response
    /// * `payload` - JSON-serialized `WorkerMessage`
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.load(std::sync::atomic::Ordering::Relaxed) {
            init_worker_tracing();
            WORKER_TRACING_INITIALIZED.store(true, std::sync::atomic::Ordering::Relaxed);
        }

        let worker_message: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                return;
            }
        };

        let response = self.handle_message(worker_message);

        match serde_json::to_string(&response) {
            Ok(payload) => {
                let plugin_message = PluginMessage {
                    name: message,
                    payload,
                    worker_name: None,
                };
                post_message_to_plugin(plugin_message);
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker response");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_message_returns_full_brand_list() {
        let body = r#"[
            {
                "Marque": "Acme",
                "Totaux": {"Valeur Stock Total ($)": 100.0, "Coût Total ($)": 40.0},
                "Produits": [
                    {"Produit": "Widget", "Coût par article ($)": 4.0, "Stock": 10,
                     "V60": 1, "V120": 2, "V180": 3, "V365": 4,
                     "Suggestion (3m)": 2.0, "Alerte": "✅ OK", "is_deleted": false}
                ]
            }
        ]"#;

        let mut worker = ReportWorker::default();
        let response = worker.handle_message(WorkerMessage::ParseReport {
            body: body.to_string(),
            trace_context: None,
        });

        match response {
            WorkerResponse::ReportParsed { brands } => {
                assert_eq!(brands.len(), 1);
                assert_eq!(brands[0].brand, "Acme");
            }
            WorkerResponse::Error { message } => panic!("unexpected error: {message}"),
        }
    }

    #[test]
    fn malformed_payload_yields_a_single_error() {
        let mut worker = ReportWorker::default();
        let response = worker.handle_message(WorkerMessage::ParseReport {
            body: "<html>gateway timeout</html>".to_string(),
            trace_context: None,
        });

        assert!(matches!(response, WorkerResponse::Error { .. }));
    }
}
