//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the
//! plugin. It owns the full set of materialized brand sections, the filtered
//! subset, the current page, and the transition scheduler, and it is the
//! single source of truth the renderer draws from.
//!
//! # Architecture
//!
//! `AppState` separates core data (the section list, fixed after
//! materialization) from derived state (the filtered index subsequence, the
//! page index). Derived state is fully recomputed on every user input event,
//! never incrementally patched. View models are computed on demand from state
//! snapshots.
//!
//! # State components
//!
//! - **Sections**: master list of brand sections, materialized all-or-nothing
//!   from a fetched report payload
//! - **Filtered**: indices into the master list, an order-preserving
//!   subsequence produced by exactly one filter criterion at a time
//! - **Page**: 1-based page index over the filtered set, one section per page
//! - **Transitions**: pending fade steps plus the logical clock they run on
//! - **Input mode / load phase**: which controls are live and which surface
//!   is drawn

use chrono::{DateTime, Utc};

use super::filter;
use super::modes::{InputMode, LoadPhase};
use super::pager::{self, SECTIONS_PER_PAGE};
use super::section::BrandSection;
use super::transitions::TransitionScheduler;
use crate::domain::BrandReport;
use crate::ui::theme::Theme;

/// Central application state container.
///
/// Mutated only by the event handler in response to user input, worker
/// responses, and timer ticks. All pagination invariants (page within
/// `[1, total_pages]`, filtered set an ordered subsequence) are maintained by
/// the mutation methods here.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Master list of brand sections in payload order.
    ///
    /// Created once per successful load; immutable in shape for the page
    /// view's lifetime (only visibility flags change). A reload replaces the
    /// whole list.
    pub sections: Vec<BrandSection>,

    /// Indices into `sections` matching the active filter criterion.
    ///
    /// Always strictly increasing. Recomputed from the full section list on
    /// every filter change.
    pub filtered: Vec<usize>,

    /// Current 1-based page over `filtered`.
    pub current_page: usize,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Report load lifecycle phase.
    pub load_phase: LoadPhase,

    /// Current free-text search term.
    ///
    /// Accumulated per keystroke while in search mode; every change
    /// re-applies the text filter from the full section set.
    pub search_term: String,

    /// Currently selected brand, `None` meaning "no brand filter".
    ///
    /// Exclusive of the text search: applying one filter ignores the other's
    /// current value.
    pub selected_brand: Option<String>,

    /// Cursor position within the brand picker (0 = "all brands" entry).
    pub brand_cursor: usize,

    /// When the current report was materialized.
    pub last_updated: Option<DateTime<Utc>>,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Logical clock in milliseconds, advanced by timer-tick events.
    pub clock_ms: u64,

    /// Pending fade steps for the in-flight render, if any.
    transitions: TransitionScheduler,
}

impl AppState {
    /// Creates an empty state in the loading phase.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            sections: Vec::new(),
            filtered: Vec::new(),
            current_page: 1,
            input_mode: InputMode::Normal,
            load_phase: LoadPhase::Loading,
            search_term: String::new(),
            selected_brand: None,
            brand_cursor: 0,
            last_updated: None,
            theme,
            clock_ms: 0,
            transitions: TransitionScheduler::default(),
        }
    }

    /// Materializes sections from a validated report payload and renders the
    /// first page.
    ///
    /// Replaces any previous working set wholesale: filtered = full set,
    /// page = 1, filters cleared. Records the load time for the header.
    /// Returns the delay until the first pending transition step.
    pub fn materialize(&mut self, brands: Vec<BrandReport>) -> Option<u64> {
        let _span = tracing::debug_span!("materialize", brand_count = brands.len()).entered();

        self.sections = brands.into_iter().map(BrandSection::from_report).collect();
        self.filtered = (0..self.sections.len()).collect();
        self.current_page = 1;
        self.search_term = String::new();
        self.selected_brand = None;
        self.brand_cursor = 0;
        self.last_updated = Some(Utc::now());
        self.load_phase = LoadPhase::Ready;

        tracing::debug!(section_count = self.sections.len(), "report materialized");
        self.render_page()
    }

    /// Marks the load as failed with a user-facing message.
    ///
    /// Existing sections (from a previous successful load) are dropped so no
    /// partially consistent view survives.
    pub fn fail_load(&mut self, message: String) {
        tracing::debug!(error = %message, "report load failed");
        self.sections.clear();
        self.filtered.clear();
        self.current_page = 1;
        self.load_phase = LoadPhase::Failed(message);
    }

    /// Resets to the loading surface ahead of a (re)fetch.
    pub fn begin_load(&mut self) {
        self.load_phase = LoadPhase::Loading;
    }

    /// Re-applies the free-text search from the full section set.
    ///
    /// Resets the page to 1 unconditionally and schedules a render. Returns
    /// the delay until the next transition step.
    pub fn apply_text_search(&mut self) -> Option<u64> {
        self.filtered = filter::apply_text_search(&mut self.sections, &self.search_term);
        self.current_page = 1;
        self.render_page()
    }

    /// Re-applies the brand filter from the full section set.
    ///
    /// Resets the page to 1 unconditionally and schedules a render.
    pub fn apply_brand_filter(&mut self) -> Option<u64> {
        self.filtered = filter::apply_brand_filter(&self.sections, self.selected_brand.as_deref());
        self.current_page = 1;
        self.render_page()
    }

    /// Total pages over the current filtered set.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        pager::total_pages(self.filtered.len(), SECTIONS_PER_PAGE)
    }

    /// Whether the prev control is enabled.
    #[must_use]
    pub fn prev_enabled(&self) -> bool {
        self.current_page > 1
    }

    /// Whether the next control is enabled.
    #[must_use]
    pub fn next_enabled(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Advances one page. Returns `false` (and leaves state untouched) at the
    /// last page.
    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.current_page + 1)
    }

    /// Retreats one page. Returns `false` at the first page.
    pub fn prev_page(&mut self) -> bool {
        // current_page is 1-based; page 0 is rejected by go_to_page.
        self.go_to_page(self.current_page.wrapping_sub(1))
    }

    /// Jumps to a specific page.
    ///
    /// Out-of-range requests are ignored rather than clamped. The controls
    /// are disabled at the boundaries; this guards against stale or synthetic
    /// requests on top of that.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Indices (into `sections`) of the filtered slice shown on the current
    /// page.
    #[must_use]
    pub fn page_window(&self) -> Vec<usize> {
        let range = pager::page_window(self.filtered.len(), self.current_page, SECTIONS_PER_PAGE);
        self.filtered[range].to_vec()
    }

    /// Pagination indicator text, always derived synchronously from state.
    #[must_use]
    pub fn page_label(&self) -> String {
        pager::page_label(self.current_page, self.total_pages())
    }

    /// Schedules the fade transition toward the current page's window.
    ///
    /// Supersedes any in-flight transition (its remaining steps become
    /// no-ops). Returns the delay in milliseconds until the next step.
    pub fn render_page(&mut self) -> Option<u64> {
        let window = self.page_window();
        self.transitions
            .schedule(&mut self.sections, &window, self.clock_ms)
    }

    /// Advances the logical clock and applies every due transition step.
    ///
    /// Returns whether any visibility changed (re-render needed) and the
    /// delay until the next pending step, if any.
    pub fn tick(&mut self, elapsed_ms: u64) -> (bool, Option<u64>) {
        self.clock_ms += elapsed_ms;
        let changed = self.transitions.advance(&mut self.sections, self.clock_ms);
        (changed, self.transitions.next_delay(self.clock_ms))
    }

    /// Brand picker options: "all brands" followed by every brand in payload
    /// order.
    #[must_use]
    pub fn brand_options(&self) -> Vec<String> {
        let mut options = Vec::with_capacity(self.sections.len() + 1);
        options.push("All brands".to_string());
        options.extend(self.sections.iter().map(|s| s.brand.clone()));
        options
    }

    /// Moves the brand picker cursor down, wrapping to the top.
    pub fn move_brand_cursor_down(&mut self) {
        let len = self.sections.len() + 1;
        self.brand_cursor = (self.brand_cursor + 1) % len;
    }

    /// Moves the brand picker cursor up, wrapping to the bottom.
    pub fn move_brand_cursor_up(&mut self) {
        let len = self.sections.len() + 1;
        self.brand_cursor = (self.brand_cursor + len - 1) % len;
    }

    /// Applies the brand under the picker cursor (cursor 0 clears the
    /// filter) and returns the render delay.
    pub fn select_brand_under_cursor(&mut self) -> Option<u64> {
        self.selected_brand = if self.brand_cursor == 0 {
            None
        } else {
            self.sections
                .get(self.brand_cursor - 1)
                .map(|s| s.brand.clone())
        };
        tracing::debug!(selected = ?self.selected_brand, "brand selected");
        self.apply_brand_filter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::section::test_support::section as make_section;
    use crate::app::section::Visibility;
    use crate::domain::{BrandReport, BrandTotals, ProductRecord};

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
        state.materialize(vec![
            brand("Acme", &["Widget A", "Widget B"]),
            brand("Beta", &["Bolt"]),
            brand("Zeta", &["Gadget"]),
        ]);
        state
    }

    fn settle(state: &mut AppState) {
        while let (_, Some(delay)) = state.tick(0) {
            state.tick(delay);
        }
    }

    #[test]
    fn materialize_initializes_full_filtered_set_on_page_one() {
        let state = ready_state();
        assert_eq!(state.load_phase, LoadPhase::Ready);
        assert_eq!(state.filtered, vec![0, 1, 2]);
        assert_eq!(state.current_page, 1);
        assert!(state.last_updated.is_some());
    }

    #[test]
    fn failed_load_leaves_no_partial_state() {
        let mut state = ready_state();
        state.fail_load("HTTP 502".to_string());
        assert!(state.sections.is_empty());
        assert!(state.filtered.is_empty());
        assert!(matches!(state.load_phase, LoadPhase::Failed(_)));
    }

    #[test]
    fn filter_changes_reset_page_to_one() {
        let mut state = ready_state();
        state.next_page();
        assert_eq!(state.current_page, 2);

        state.search_term = "gadget".to_string();
        state.apply_text_search();
        assert_eq!(state.current_page, 1);

        state.next_page();
        state.selected_brand = Some("Acme".to_string());
        state.apply_brand_filter();
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn boundary_navigation_is_a_no_op() {
        let mut state = ready_state();
        assert!(!state.prev_page());
        assert_eq!(state.current_page, 1);

        state.go_to_page(3);
        assert!(!state.next_page());
        assert_eq!(state.current_page, 3);
    }

    #[test]
    fn out_of_range_page_requests_are_ignored() {
        let mut state = ready_state();
        assert!(!state.go_to_page(0));
        assert!(!state.go_to_page(99));
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn page_stays_in_range_under_any_operation_sequence() {
        let mut state = ready_state();
        state.next_page();
        state.next_page();
        state.next_page();
        state.search_term = "widget".to_string();
        state.apply_text_search();
        state.prev_page();
        state.next_page();

        let total = state.total_pages();
        assert!(state.current_page >= 1 && state.current_page <= total);
    }

    #[test]
    fn empty_filter_result_still_has_one_page() {
        let mut state = ready_state();
        state.search_term = "no such product".to_string();
        state.apply_text_search();
        assert!(state.filtered.is_empty());
        assert_eq!(state.total_pages(), 1);
        assert_eq!(state.page_label(), "Page 1 / 1");
        assert!(state.page_window().is_empty());
    }

    #[test]
    fn brand_selection_is_idempotent_and_clearable() {
        let mut state = ready_state();
        state.brand_cursor = 3; // Zeta
        state.select_brand_under_cursor();
        let first = state.filtered.clone();
        state.select_brand_under_cursor();
        assert_eq!(state.filtered, first);
        assert_eq!(first, vec![2]);

        state.brand_cursor = 0;
        state.select_brand_under_cursor();
        assert_eq!(state.filtered, vec![0, 1, 2]);
    }

    #[test]
    fn brand_cursor_wraps_both_ways() {
        let mut state = ready_state();
        state.move_brand_cursor_up();
        assert_eq!(state.brand_cursor, 3);
        state.move_brand_cursor_down();
        assert_eq!(state.brand_cursor, 0);
    }

    #[test]
    fn end_to_end_three_brands_two_next_calls() {
        let mut state = ready_state();
        assert_eq!(state.total_pages(), 3);

        assert!(state.next_page());
        state.render_page();
        assert!(state.next_page());
        state.render_page();
        settle(&mut state);

        assert_eq!(state.current_page, 3);
        assert_eq!(state.page_window(), vec![2]);
        assert_eq!(state.page_label(), "Page 3 / 3");
        assert!(!state.next_enabled());
        assert!(state.prev_enabled());
        assert_eq!(state.sections[2].visibility, Visibility::FadingIn);
        assert_eq!(state.sections[0].visibility, Visibility::Hidden);
    }

    #[test]
    fn window_tracks_filtered_indices_not_positions() {
        let mut state = ready_state();
        state.search_term = "gadget".to_string();
        state.apply_text_search();
        // Only Zeta (master index 2) matches; it is page 1 of 1.
        assert_eq!(state.page_window(), vec![2]);
    }

    #[test]
    fn sections_are_fixed_between_loads() {
        let mut state = ready_state();
        let brands_before: Vec<String> =
            state.sections.iter().map(|s| s.brand.clone()).collect();
        state.search_term = "widget".to_string();
        state.apply_text_search();
        state.next_page();
        let brands_after: Vec<String> =
            state.sections.iter().map(|s| s.brand.clone()).collect();
        assert_eq!(brands_before, brands_after);
    }

    #[test]
    fn make_section_helper_matches_materialized_shape() {
        // Guard against the two test constructors drifting apart.
        let from_helper = make_section("Acme", &["Widget A"]);
        let mut state = AppState::new(Theme::default());
        state.materialize(vec![brand("Acme", &["Widget A"])]);
        assert_eq!(state.sections[0].rows[0].search_text, from_helper.rows[0].search_text);
    }
}
