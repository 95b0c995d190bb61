//! Stockdeck: a Zellij plugin dashboard for per-brand inventory and sales.
//!
//! Stockdeck fetches a brand-grouped inventory/sales report over HTTP and
//! presents it as a paginated terminal dashboard:
//! - One brand section per page, with product rows and a totals line
//! - Free-text search across product rows and brand names
//! - A brand picker for exact-brand filtering
//! - Animated two-phase fade transitions between pages, driven by host timers
//! - Background payload parsing via a Zellij worker thread
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← View-state engine
//! │  - Event handling                                   │  ← Filters, paging
//! │  - Action dispatching                               │  ← Fade scheduling
//! └─────────────────────────────────────────────────────┘
//!         │                                  │
//! ┌───────────────────┐            ┌───────────────────┐
//! │ UI Layer (ui/)    │            │ Worker (worker/)  │
//! │ - View models     │            │ - Payload parsing │
//! │ - Rendering       │            │ - IPC bridge      │
//! │ - Theming         │            │                   │
//! └───────────────────┘            └───────────────────┘
//!         │                                  │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Error types (domain/error)                       │
//! │  - Report payload model (domain/report)             │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! The plugin is configured via Zellij's plugin configuration:
//!
//! ```kdl
//! // ~/.config/zellij/layouts/default.kdl
//! pane {
//!     plugin location="file:/path/to/stockdeck.wasm" {
//!         report_url "http://127.0.0.1:5000/report"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Lifecycle
//!
//! 1. **Plugin Load** (`main.rs`): parse configuration, initialize tracing,
//!    create `AppState`, subscribe to events, request web permission
//! 2. **Fetch**: on permission grant, issue the report HTTP request
//! 3. **Worker Processing**: raw body handed to the worker; the worker
//!    decodes and validates the whole payload, or rejects it whole
//! 4. **Materialization**: validated brands become owned sections; page 1 is
//!    rendered with the fade cycle mapped onto host timeouts
//! 5. **Interaction**: search, brand filter, and pagination events mutate
//!    state and reschedule transitions; every event leaves the page index in
//!    range

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, LoadPhase};
pub use domain::{Result, StockdeckError};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Default report endpoint, matching the backend's `/report` route.
const DEFAULT_REPORT_URL: &str = "http://127.0.0.1:5000/report";

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Configuration values are provided via Zellij's KDL layout configuration
/// and passed to the plugin during initialization.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/stockdeck.wasm" {
///     report_url "https://inventory.example.com/report"
///     theme "catppuccin-latte"
///     theme_file "/path/to/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the report endpoint returning the brand-grouped JSON payload.
    pub report_url: String,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`. Ignored if
    /// `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report_url: DEFAULT_REPORT_URL.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Zellij provides configuration as a `BTreeMap<String, String>` during
    /// plugin initialization. Missing or empty values fall back to defaults.
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let report_url = config
            .get("report_url")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_REPORT_URL.to_string());

        Self {
            report_url,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }
}

/// Initializes the plugin with configuration.
///
/// Creates a new `AppState` in the loading phase with the resolved theme
/// (from file, name, or default). Sections are populated later, once the
/// worker returns a validated payload.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing stockdeck plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(
                Theme::default,
                |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::debug!(theme_name = %theme_name, "failed to load theme, using default");
                        Theme::default()
                    })
                },
            )
        },
        |theme_file| {
            Theme::from_file(theme_file.clone()).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_the_local_report_endpoint() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config.report_url, DEFAULT_REPORT_URL);
        assert!(config.theme_name.is_none());
    }

    #[test]
    fn config_reads_values_from_the_zellij_map() {
        let mut map = BTreeMap::new();
        map.insert(
            "report_url".to_string(),
            "https://example.com/report".to_string(),
        );
        map.insert("theme".to_string(), "catppuccin-latte".to_string());
        map.insert("trace_level".to_string(), "debug".to_string());

        let config = Config::from_zellij(&map);
        assert_eq!(config.report_url, "https://example.com/report");
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn blank_report_url_falls_back_to_the_default() {
        let mut map = BTreeMap::new();
        map.insert("report_url".to_string(), "   ".to_string());

        let config = Config::from_zellij(&map);
        assert_eq!(config.report_url, DEFAULT_REPORT_URL);
    }

    #[test]
    fn initialize_starts_in_the_loading_phase() {
        let state = initialize(&Config::default());
        assert_eq!(state.load_phase, LoadPhase::Loading);
        assert!(state.sections.is_empty());
    }

    #[test]
    fn unknown_theme_name_falls_back_to_default() {
        let config = Config {
            theme_name: Some("no-such-theme".to_string()),
            ..Default::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.name, "catppuccin-mocha");
    }
}
