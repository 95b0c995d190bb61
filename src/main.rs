//! Zellij plugin wrapper and entry point.
//!
//! This module provides the thin integration layer between the Stockdeck
//! library and the Zellij plugin system. It implements the `ZellijPlugin` and
//! `ZellijWorker` traits to handle Zellij events and lifecycle.
//!
//! # Architecture
//!
//! The plugin uses Zellij's worker thread support for background processing:
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← UI state, event handling
//! │  └──────────────────┘   │
//! │          │              │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │   ReportWorker   │   │  ← Background payload parsing
//! │  │ (worker thread)  │   │
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for Key, Timer, `CustomMessage`,
//!    `WebRequestResult` events
//! 3. **Fetch**: Request the report once web permission is granted
//! 4. **Update**: Handle events, delegate to library layer
//! 5. **Render**: Call library render function
//!
//! # Worker Communication
//!
//! Messages between plugin and worker use JSON serialization:
//!
//! - Plugin → Worker: [`WorkerMessage`] (`ParseReport`)
//! - Worker → Plugin: [`WorkerResponse`] (`ReportParsed`, error details)
//!
//! # Event Mapping
//!
//! Zellij events are translated to library events:
//!
//! - `Key(Right)` → `Event::NextPage` (in normal mode)
//! - `Key(Esc)` → `Event::ExitSearch` (in search mode)
//! - `Timer(elapsed)` → `Event::TimerTick` (fade animation clock)
//! - `WebRequestResult` → `Event::ReportFetched { status, body }`
//!
//! # Keybindings
//!
//! In normal mode:
//! - `h`/`Left`: Previous page
//! - `l`/`Right`: Next page
//! - `/`: Enter search mode
//! - `b`: Open brand picker
//! - `r`: Reload report
//! - `q`: Close plugin
//!
//! In search mode:
//! - Printable characters: Type into the query
//! - `Enter`: Keep the filter, return to normal mode
//! - `Esc`: Also returns to normal mode (the filter persists)
//!
//! In the brand picker:
//! - `j`/`Down`, `k`/`Up`: Move the cursor
//! - `Enter`: Apply the highlighted brand
//! - `Esc`: Close the picker without changing the filter

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use stockdeck::worker::{ReportWorker, WorkerMessage, WorkerResponse};
use stockdeck::{handle_event, Action, Config, Event, InputMode};

// Register plugin and worker with Zellij
register_plugin!(State);
register_worker!(ReportWorker, stockdeck_worker, STOCKDECK_WORKER);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with Zellij-specific concerns like worker
/// communication and the configured report endpoint.
struct State {
    /// Core application state from library layer.
    app: stockdeck::app::AppState,

    /// Worker thread identifier for IPC messaging.
    worker_name: String,

    /// URL of the report endpoint to fetch.
    report_url: String,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: stockdeck::initialize(&default_config),
            worker_name: "stockdeck".to_string(),
            report_url: default_config.report_url,
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// Called once during plugin startup. Parses configuration, initializes
    /// application state, requests permissions, and subscribes to events.
    /// The first fetch is deferred until the permission result arrives.
    ///
    /// # Permissions
    ///
    /// Requests:
    /// - `WebAccess`: Fetch the report over HTTP
    ///
    /// # Subscriptions
    ///
    /// - `Key`: Keyboard input
    /// - `Timer`: Fade animation clock
    /// - `CustomMessage`: Worker responses
    /// - `WebRequestResult`: Report HTTP responses
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        stockdeck::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!("plugin loading started");
        tracing::debug!(report_url = %config.report_url, "parsed configuration");
        self.app = stockdeck::initialize(&config);
        self.report_url.clone_from(&config.report_url);
        tracing::debug!("app state initialized");

        tracing::debug!("requesting permissions");
        request_permission(&[PermissionType::WebAccess]);

        tracing::debug!("subscribing to events");
        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::CustomMessage,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Translates Zellij events to library events, delegates to `handle_event`,
    /// and executes resulting actions. Returns `true` if the UI should re-render.
    ///
    /// # Tracing
    ///
    /// Each event is traced with its type for observability.
    ///
    /// # Parameters
    ///
    /// * `event` - Zellij event to process
    ///
    /// # Returns
    ///
    /// - `true` if the plugin UI should re-render
    /// - `false` if the event was ignored or resulted in no state changes
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        tracing::debug!(event = %event_name, "processing event");

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match self.map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(elapsed) => Self::map_timer_event(elapsed),
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, _context) => {
                Self::map_web_request_result(status, &body)
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                Self::map_permission_result(permissions)
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Renders the plugin UI.
    ///
    /// Delegates to the library's rendering layer.
    ///
    /// # Parameters
    ///
    /// * `rows` - Terminal height in rows
    /// * `cols` - Terminal width in columns
    fn render(&mut self, rows: usize, cols: usize) {
        stockdeck::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(..) => "WebRequestResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        Some(match self.app.input_mode {
            InputMode::Normal => match key.bare_key {
                BareKey::Left | BareKey::Char('h') => Event::PrevPage,
                BareKey::Right | BareKey::Char('l') => Event::NextPage,
                BareKey::Char('/') => Event::SearchMode,
                BareKey::Char('b') => Event::BrandSelectMode,
                BareKey::Char('r') => Event::Reload,
                BareKey::Char('q') => Event::CloseFocus,
                BareKey::Esc => Event::Escape,
                _ => return None,
            },
            InputMode::Search => match key.bare_key {
                BareKey::Enter => Event::ExitSearch,
                BareKey::Esc => Event::Escape,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            },
            InputMode::BrandSelect => match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::CursorDown,
                BareKey::Up | BareKey::Char('k') => Event::CursorUp,
                BareKey::Enter => Event::ApplyBrand,
                BareKey::Esc => Event::Escape,
                _ => return None,
            },
        })
    }

    /// Maps timer events to the library's fade animation clock.
    ///
    /// Zellij reports elapsed time in seconds; the transition engine runs on
    /// milliseconds.
    fn map_timer_event(elapsed_seconds: f64) -> Event {
        tracing::debug!(elapsed_seconds = elapsed_seconds, "timer event");
        Event::TimerTick {
            elapsed_ms: (elapsed_seconds * 1000.0) as u64,
        }
    }

    /// Maps web request results to application events.
    fn map_web_request_result(status: u16, body: &[u8]) -> Event {
        tracing::debug!(status = status, body_len = body.len(), "web request result");
        Event::ReportFetched {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// Maps permission request results to application events.
    fn map_permission_result(permissions: PermissionStatus) -> Event {
        let granted = match permissions {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted");
                vec![PermissionType::WebAccess]
            }
            PermissionStatus::Denied => {
                tracing::warn!("permissions denied - plugin cannot fetch the report");
                Vec::new()
            }
        };
        Event::PermissionsResult { granted }
    }

    /// Maps custom message events to application events.
    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        tracing::debug!(message_name = %message, payload_len = payload.len(), "custom message event");

        if message == self.worker_name {
            match serde_json::from_str::<WorkerResponse>(payload) {
                Ok(response) => {
                    tracing::debug!("worker response received");
                    Some(Event::WorkerResponse(response))
                }
                Err(e) => {
                    tracing::debug!(error = %e, "failed to deserialize worker response");
                    None
                }
            }
        } else {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            None
        }
    }

    /// Posts a message to the worker thread.
    ///
    /// Serializes the message as JSON and sends via Zellij's IPC system.
    ///
    /// # Parameters
    ///
    /// * `message` - Worker message to send
    ///
    /// # Errors
    ///
    /// Logs serialization errors but does not propagate them.
    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(&message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Executes an action returned from event handling.
    ///
    /// Translates library actions to Zellij API calls.
    ///
    /// # Actions
    ///
    /// - `CloseFocus`: Close plugin pane
    /// - `FetchReport`: Issue the report HTTP request
    /// - `SetTimeout`: Arm the host timer for the fade animation
    /// - `PostToWorker`: Send IPC message to worker thread
    ///
    /// # Parameters
    ///
    /// * `action` - Action to execute
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::FetchReport => {
                tracing::debug!(url = %self.report_url, "fetching report");
                web_request(
                    &self.report_url,
                    HttpVerb::Get,
                    BTreeMap::new(),
                    Vec::new(),
                    BTreeMap::new(),
                );
            }
            Action::SetTimeout { delay_ms } => {
                tracing::debug!(delay_ms = delay_ms, "arming fade timer");
                set_timeout(*delay_ms as f64 / 1000.0);
            }
            Action::PostToWorker(ref message) => {
                tracing::debug!("posting message to worker");
                self.post_worker_message(message);
            }
        }
    }
}
