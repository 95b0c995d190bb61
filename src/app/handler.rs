//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input,
//! system events, and worker responses, translating them into state changes
//! and action sequences. It serves as the primary control flow coordinator
//! for the plugin.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime or worker thread
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! Events fall into several categories:
//! - **Navigation**: `NextPage`, `PrevPage`, `CursorDown`, `CursorUp`
//! - **Input**: `Char`, `Backspace`, `Escape`
//! - **Mode Switching**: `SearchMode`, `ExitSearch`, `BrandSelectMode`
//! - **System**: `TimerTick`, `ReportFetched`, `PermissionsResult`
//! - **Worker**: `WorkerResponse` with typed message variants

use crate::app::{Action, AppState, InputMode, LoadPhase};
use crate::domain::error::{Result, StockdeckError};
use crate::worker::{WorkerMessage, WorkerResponse};
use zellij_tile::prelude::PermissionType;

/// Events triggered by user input, system changes, or worker responses.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,
    /// Enters search mode with typing focus.
    SearchMode,
    /// Exits search mode, clearing the query and restoring the full set.
    ExitSearch,
    /// Appends a character to the search query.
    Char(char),
    /// Removes the last character from the search query.
    Backspace,
    /// Leaves the current mode; in search mode also clears the query.
    Escape,
    /// Opens the brand picker.
    BrandSelectMode,
    /// Moves the brand picker cursor down by one position (wraps to top).
    CursorDown,
    /// Moves the brand picker cursor up by one position (wraps to bottom).
    CursorUp,
    /// Applies the brand under the picker cursor and closes the picker.
    ApplyBrand,
    /// Advances to the next page of the filtered set.
    NextPage,
    /// Retreats to the previous page of the filtered set.
    PrevPage,
    /// Discards the current report and refetches it.
    Reload,

    /// Reports elapsed time from an armed host timer.
    ///
    /// Advances the logical transition clock and applies every due fade step.
    TimerTick {
        /// Milliseconds elapsed since the timer was armed.
        elapsed_ms: u64,
    },

    /// Reports the completed HTTP fetch of the report payload.
    ///
    /// A success status hands the raw body to the worker for parsing; any
    /// other status fails the load with a user-facing message.
    ReportFetched {
        /// HTTP status code of the response.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Reports granted Zellij permissions after the permission request.
    ///
    /// Web access being granted is what unblocks the initial fetch.
    PermissionsResult {
        /// Permissions granted by the user.
        granted: Vec<PermissionType>,
    },

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

/// Wraps the transition scheduler's next delay into a timeout action.
fn schedule_timeout(delay_ms: Option<u64>) -> Vec<Action> {
    delay_ms
        .map(|delay_ms| vec![Action::SetTimeout { delay_ms }])
        .unwrap_or_default()
}

/// Processes an event, mutates application state, and returns actions to
/// execute.
///
/// This is the primary event handler that coordinates all state transitions
/// and side effects. It pattern-matches on event types, calls state mutation
/// methods, and collects actions to be executed by the plugin runtime.
///
/// # Returns
///
/// A flag indicating whether the UI needs a redraw, plus a vector of actions
/// to execute in sequence. Both may be empty/false when the event changed
/// nothing (boundary page navigation, keystrokes outside the relevant mode).
///
/// # Errors
///
/// Returns errors from state mutation methods. The handler itself never
/// panics on unexpected input; unknown or out-of-mode events degrade to
/// no-ops.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),

        Event::SearchMode => {
            if state.load_phase != LoadPhase::Ready {
                return Ok((false, vec![]));
            }
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search;
            state.search_term = String::new();
            let delay = state.apply_text_search();
            Ok((true, schedule_timeout(delay)))
        }
        Event::ExitSearch => {
            tracing::debug!(term = %state.search_term, "exiting search mode");
            state.input_mode = InputMode::Normal;
            state.search_term = String::new();
            let delay = state.apply_text_search();
            Ok((true, schedule_timeout(delay)))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }

            state.search_term.push(*c);
            tracing::trace!(term = %state.search_term, char = %c, "search term updated");

            let delay = state.apply_text_search();
            Ok((true, schedule_timeout(delay)))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }

            state.search_term.pop();
            let delay = state.apply_text_search();
            Ok((true, schedule_timeout(delay)))
        }
        Event::Escape => match state.input_mode {
            InputMode::Search => {
                state.input_mode = InputMode::Normal;
                state.search_term = String::new();
                let delay = state.apply_text_search();
                Ok((true, schedule_timeout(delay)))
            }
            InputMode::BrandSelect => {
                // Closing the picker without applying keeps the current
                // brand filter untouched.
                state.input_mode = InputMode::Normal;
                Ok((true, vec![]))
            }
            InputMode::Normal => Ok((false, vec![])),
        },

        Event::BrandSelectMode => {
            if state.load_phase != LoadPhase::Ready {
                return Ok((false, vec![]));
            }
            tracing::debug!("opening brand picker");
            state.input_mode = InputMode::BrandSelect;
            Ok((true, vec![]))
        }
        Event::CursorDown => {
            if state.input_mode != InputMode::BrandSelect {
                return Ok((false, vec![]));
            }
            state.move_brand_cursor_down();
            Ok((true, vec![]))
        }
        Event::CursorUp => {
            if state.input_mode != InputMode::BrandSelect {
                return Ok((false, vec![]));
            }
            state.move_brand_cursor_up();
            Ok((true, vec![]))
        }
        Event::ApplyBrand => {
            if state.input_mode != InputMode::BrandSelect {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Normal;
            let delay = state.select_brand_under_cursor();
            Ok((true, schedule_timeout(delay)))
        }

        Event::NextPage => {
            if state.input_mode != InputMode::Normal || !state.next_page() {
                return Ok((false, vec![]));
            }
            tracing::debug!(page = state.current_page, "page advanced");
            let delay = state.render_page();
            Ok((true, schedule_timeout(delay)))
        }
        Event::PrevPage => {
            if state.input_mode != InputMode::Normal || !state.prev_page() {
                return Ok((false, vec![]));
            }
            tracing::debug!(page = state.current_page, "page retreated");
            let delay = state.render_page();
            Ok((true, schedule_timeout(delay)))
        }

        Event::Reload => {
            tracing::debug!("reloading report");
            state.begin_load();
            Ok((true, vec![Action::FetchReport]))
        }

        Event::TimerTick { elapsed_ms } => {
            let (changed, next_delay) = state.tick(*elapsed_ms);
            Ok((changed, schedule_timeout(next_delay)))
        }

        Event::ReportFetched { status, body } => {
            if *status == 200 {
                tracing::debug!(body_len = body.len(), "report fetched, handing to worker");
                Ok((
                    false,
                    vec![Action::PostToWorker(WorkerMessage::parse_report(
                        body.clone(),
                    ))],
                ))
            } else {
                state.fail_load(StockdeckError::Http(*status).to_string());
                Ok((true, vec![]))
            }
        }

        Event::PermissionsResult { granted } => {
            if granted.contains(&PermissionType::WebAccess) {
                tracing::debug!("web access granted, starting initial fetch");
                state.begin_load();
                Ok((true, vec![Action::FetchReport]))
            } else {
                state.fail_load("Web access permission denied".to_string());
                Ok((true, vec![]))
            }
        }

        Event::WorkerResponse(response) => match response {
            WorkerResponse::ReportParsed { brands } => {
                let delay = state.materialize(brands.clone());
                Ok((true, schedule_timeout(delay)))
            }
            WorkerResponse::Error { message } => {
                tracing::error!("Worker error: {}", message);
                state.fail_load(message.clone());
                Ok((true, vec![]))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BrandReport, BrandTotals, ProductRecord};
    use crate::ui::theme::Theme;

    fn brand(name: &str, products: &[&str]) -> BrandReport {
        BrandReport {
            brand: name.to_string(),
            totals: BrandTotals::default(),
            products: products
                .iter()
                .map(|p| ProductRecord {
                    name: (*p).to_string(),
                    unit_cost: 1.0,
                    is_deleted: false,
                    stock: 10,
                    v60: 0,
                    v120: 0,
                    v180: 0,
                    v365: 0,
                    suggested_reorder: 0.0,
                    alert: "✅ OK".to_string(),
                })
                .collect(),
        }
    }

    fn ready_state() -> AppState {
        let mut state = AppState::new(Theme::default());
        let event = Event::WorkerResponse(WorkerResponse::ReportParsed {
            brands: vec![
                brand("Acme", &["Widget"]),
                brand("Beta", &["Bolt"]),
                brand("Zeta", &["Gadget"]),
            ],
        });
        handle_event(&mut state, &event).unwrap();
        // Drain the initial render's pending steps.
        drain_timers(&mut state);
        state
    }

    fn drain_timers(state: &mut AppState) {
        loop {
            let (_, actions) = handle_event(state, &Event::TimerTick { elapsed_ms: 0 }).unwrap();
            let Some(Action::SetTimeout { delay_ms }) = actions.first() else {
                break;
            };
            let elapsed_ms = *delay_ms;
            handle_event(state, &Event::TimerTick { elapsed_ms }).unwrap();
        }
    }

    #[test]
    fn parsed_report_materializes_and_arms_a_timer() {
        let mut state = AppState::new(Theme::default());
        let event = Event::WorkerResponse(WorkerResponse::ReportParsed {
            brands: vec![brand("Acme", &["Widget"])],
        });

        let (redraw, actions) = handle_event(&mut state, &event).unwrap();
        assert!(redraw);
        assert_eq!(state.load_phase, LoadPhase::Ready);
        assert!(matches!(actions[..], [Action::SetTimeout { .. }]));
    }

    #[test]
    fn fetch_success_is_forwarded_to_the_worker() {
        let mut state = AppState::new(Theme::default());
        let event = Event::ReportFetched {
            status: 200,
            body: "[]".to_string(),
        };

        let (redraw, actions) = handle_event(&mut state, &event).unwrap();
        assert!(!redraw);
        assert!(matches!(actions[..], [Action::PostToWorker(_)]));
    }

    #[test]
    fn fetch_failure_surfaces_a_status_message() {
        let mut state = ready_state();
        let event = Event::ReportFetched {
            status: 502,
            body: String::new(),
        };

        let (redraw, _) = handle_event(&mut state, &event).unwrap();
        assert!(redraw);
        assert!(
            matches!(&state.load_phase, LoadPhase::Failed(msg) if msg.contains("502")),
            "load phase: {:?}",
            state.load_phase
        );
        assert!(state.sections.is_empty());
    }

    #[test]
    fn worker_parse_error_fails_the_whole_load() {
        let mut state = ready_state();
        let event = Event::WorkerResponse(WorkerResponse::Error {
            message: "parse report: invalid payload".to_string(),
        });

        handle_event(&mut state, &event).unwrap();
        assert!(matches!(state.load_phase, LoadPhase::Failed(_)));
        assert!(state.sections.is_empty());
    }

    #[test]
    fn search_keystrokes_refilter_and_reset_page() {
        let mut state = ready_state();
        handle_event(&mut state, &Event::NextPage).unwrap();
        assert_eq!(state.current_page, 2);

        handle_event(&mut state, &Event::SearchMode).unwrap();
        for c in "gadget".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }

        assert_eq!(state.filtered, vec![2]);
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn characters_outside_search_mode_are_ignored() {
        let mut state = ready_state();
        let (redraw, actions) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!redraw);
        assert!(actions.is_empty());
        assert!(state.search_term.is_empty());
    }

    #[test]
    fn escape_clears_search_and_restores_the_full_set() {
        let mut state = ready_state();
        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::Char('z')).unwrap();
        assert_eq!(state.filtered, vec![2]);

        handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.filtered, vec![0, 1, 2]);
    }

    #[test]
    fn brand_picker_flow_applies_the_selection() {
        let mut state = ready_state();
        handle_event(&mut state, &Event::BrandSelectMode).unwrap();
        handle_event(&mut state, &Event::CursorDown).unwrap();
        handle_event(&mut state, &Event::CursorDown).unwrap();
        let (redraw, actions) = handle_event(&mut state, &Event::ApplyBrand).unwrap();

        assert!(redraw);
        assert!(matches!(actions[..], [Action::SetTimeout { .. }]));
        assert_eq!(state.selected_brand.as_deref(), Some("Beta"));
        assert_eq!(state.filtered, vec![1]);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn escape_closes_the_picker_without_applying() {
        let mut state = ready_state();
        handle_event(&mut state, &Event::BrandSelectMode).unwrap();
        handle_event(&mut state, &Event::CursorDown).unwrap();
        handle_event(&mut state, &Event::Escape).unwrap();

        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.selected_brand, None);
        assert_eq!(state.filtered, vec![0, 1, 2]);
    }

    #[test]
    fn boundary_navigation_emits_nothing() {
        let mut state = ready_state();
        let (redraw, actions) = handle_event(&mut state, &Event::PrevPage).unwrap();
        assert!(!redraw);
        assert!(actions.is_empty());
    }

    #[test]
    fn page_navigation_arms_the_transition_timer() {
        let mut state = ready_state();
        let (redraw, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert!(redraw);
        assert_eq!(actions, vec![Action::SetTimeout { delay_ms: 200 }]);
    }

    #[test]
    fn timer_ticks_drive_transitions_to_completion() {
        let mut state = ready_state();
        handle_event(&mut state, &Event::NextPage).unwrap();
        handle_event(&mut state, &Event::NextPage).unwrap();
        drain_timers(&mut state);

        assert_eq!(state.current_page, 3);
        assert_eq!(state.page_label(), "Page 3 / 3");
        use crate::app::section::Visibility;
        assert_eq!(state.sections[2].visibility, Visibility::FadingIn);
        assert_eq!(state.sections[0].visibility, Visibility::Hidden);
        assert_eq!(state.sections[1].visibility, Visibility::Hidden);
    }

    #[test]
    fn reload_refetches_the_report() {
        let mut state = ready_state();
        let (redraw, actions) = handle_event(&mut state, &Event::Reload).unwrap();
        assert!(redraw);
        assert_eq!(actions, vec![Action::FetchReport]);
        assert_eq!(state.load_phase, LoadPhase::Loading);
    }

    #[test]
    fn web_permission_grant_starts_the_initial_fetch() {
        let mut state = AppState::new(Theme::default());
        let event = Event::PermissionsResult {
            granted: vec![PermissionType::WebAccess],
        };

        let (_, actions) = handle_event(&mut state, &event).unwrap();
        assert_eq!(actions, vec![Action::FetchReport]);
    }

    #[test]
    fn denied_web_permission_fails_the_load() {
        let mut state = AppState::new(Theme::default());
        let event = Event::PermissionsResult { granted: vec![] };

        handle_event(&mut state, &event).unwrap();
        assert!(matches!(state.load_phase, LoadPhase::Failed(_)));
    }
}
