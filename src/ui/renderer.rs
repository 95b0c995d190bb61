//! Top-level rendering coordinator.
//!
//! This module provides the main rendering entry point, coordinating view
//! model computation and delegation to UI components.
//!
//! # Architecture
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `DashboardViewModel`
//! 2. **Component Rendering**: Delegate to specialized component renderers

use crate::app::AppState;
use crate::ui::components;
use crate::ui::viewmodel::DashboardViewModel;

/// Renders the plugin UI to stdout.
///
/// Computes the view model from application state and delegates to the
/// dashboard layout renderer.
///
/// # Output
///
/// Prints ANSI-styled output to stdout using `print!` macros. Does not clear
/// the screen; every line positions its own cursor.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = DashboardViewModel::from_state(state, rows, cols);

    components::render_dashboard(&viewmodel, &state.theme, cols, rows);
}
