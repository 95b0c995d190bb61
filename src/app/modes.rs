//! Input mode and load phase state types.
//!
//! This module defines the small state machines that control keybinding
//! interpretation and which top-level surface is rendered. Input modes map
//! onto the dashboard's three controls: free-text search, the brand picker,
//! and page navigation (available in normal mode).

/// Current input handling mode.
///
/// Determines active keybindings and which chrome is drawn (search box,
/// brand picker). Changed by mode-switching events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation mode.
    ///
    /// Available keybindings: h/l or arrows (page), / (search), b (brands),
    /// r (reload), q (quit).
    Normal,

    /// Free-text search mode.
    ///
    /// Every typed character re-applies the text filter immediately,
    /// mirroring an input field that fires on each keystroke.
    Search,

    /// Brand picker mode.
    ///
    /// j/k move the cursor through the brand list, Enter applies the
    /// selection, Esc cancels without filtering.
    BrandSelect,
}

/// Lifecycle phase of the report load.
///
/// The engine's working set is only populated in [`LoadPhase::Ready`];
/// materialization is all-or-nothing, so a failed load leaves no partial
/// state behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    /// Fetch or parse in flight; a loading surface is shown.
    Loading,

    /// Report materialized; the dashboard is interactive.
    Ready,

    /// Fetch or parse failed. Carries the user-facing message shown on the
    /// status surface next to the retry hint.
    Failed(String),
}
