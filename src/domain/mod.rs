//! Core domain types shared across the plugin.
//!
//! This module holds the typed report payload model and the centralized error
//! type. The payload types form the inbound data contract with the report
//! backend and are validated once, at the worker boundary, so the view-state
//! engine never handles missing or mistyped fields.
//!
//! # Modules
//!
//! - [`error`]: Centralized error enum and `Result` alias
//! - [`report`]: Typed brand/product payload records and parse entry point

pub mod error;
pub mod report;

pub use error::{Result, StockdeckError};
pub use report::{parse_report, BrandReport, BrandTotals, ProductRecord, StockLevel};
