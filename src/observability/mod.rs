//! OpenTelemetry-based observability with file-based trace export.
//!
//! This module provides distributed tracing infrastructure for the plugin,
//! using OpenTelemetry OTLP format with file-based exporting. Traces are
//! written to JSON files for offline analysis and debugging.
//!
//! # Architecture
//!
//! ```text
//! tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON file
//! ```
//!
//! # Features
//!
//! - **File-Based Export**: Traces written to `<data dir>/stockdeck-otlp.json`
//! - **Automatic Rotation**: Files rotate at 10MB with 3-backup retention
//! - **OTLP Format**: Standard OpenTelemetry Protocol JSON format
//!
//! # Modules
//!
//! - [`init`]: Tracing initialization and subscriber setup
//! - [`export`]: File-based span exporter and OTLP JSON serialization
//! - [`file_writer`]: Rotating file writer with size-based rotation

mod export;
mod file_writer;
mod init;

pub use init::init_tracing;
