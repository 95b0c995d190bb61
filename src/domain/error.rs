//! Error types for the Stockdeck plugin.
//!
//! This module defines the centralized error type [`StockdeckError`] and a type
//! alias [`Result`] for convenient error handling throughout the plugin. All
//! errors are implemented using the `thiserror` crate for automatic `Error`
//! trait implementation.
//!
//! The view-state engine itself is infallible; it operates over in-memory
//! state that has already been validated at the loader boundary. Every variant
//! here belongs to a collaborator: the HTTP fetch, payload parsing in the
//! worker, or theming.

use thiserror::Error;

/// The main error type for Stockdeck plugin operations.
///
/// Consolidates all error conditions that can occur outside the core engine,
/// from report fetching and payload validation to configuration and theme
/// loading issues.
#[derive(Debug, Error)]
pub enum StockdeckError {
    /// The report endpoint answered with a non-success status code.
    ///
    /// Carries the HTTP status so the status surface can show it alongside
    /// the retry hint.
    #[error("Report request failed with HTTP status {0}")]
    Http(u16),

    /// The report payload could not be parsed or validated.
    ///
    /// Materialization is all-or-nothing: a payload error means no section
    /// is built and the previous state (if any) stays untouched.
    #[error("Payload error: {0}")]
    Payload(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically
    /// converts from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

/// A specialized `Result` type for Stockdeck operations.
///
/// This is a type alias for `std::result::Result<T, StockdeckError>` that
/// simplifies function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, StockdeckError>;
