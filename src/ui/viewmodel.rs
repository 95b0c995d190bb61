//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application state,
//! following the MVVM pattern. View models are optimized for rendering and
//! contain pre-computed display information: formatted money cells, tone
//! flags for stock and alert columns, and pagination control state.
//!
//! # Architecture
//!
//! View models are created via [`DashboardViewModel::from_state`] and consumed
//! by the renderer. They contain no business logic, only display-ready data.

use crate::app::{AppState, InputMode, LoadPhase, Visibility};
use crate::domain::StockLevel;
use crate::ui::helpers;

/// Rows of terminal chrome around the product table (blank line, header,
/// borders, totals row, pagination line, footer).
const CHROME_ROWS: usize = 10;

/// Complete dashboard view model for rendering.
///
/// Contains all display information needed to render the plugin UI: the
/// sections currently occupying screen space (settled or mid-fade), the
/// pagination controls, and the optional chrome for the active input mode.
#[derive(Debug, Clone)]
pub struct DashboardViewModel {
    /// Header information (title, last-updated stamp, active filter).
    pub header: HeaderInfo,

    /// Brand sections that occupy screen space, in master order.
    ///
    /// During a fade this can briefly include sections outside the current
    /// page window (drawn dimmed); once settled it is exactly the window.
    pub sections: Vec<SectionView>,

    /// Pagination indicator and control state.
    pub pagination: PaginationInfo,

    /// Footer information (keybindings for the active mode).
    pub footer: FooterInfo,

    /// Optional search bar information (when in search mode).
    pub search_bar: Option<SearchBarInfo>,

    /// Optional brand picker information (when in brand-select mode).
    pub brand_picker: Option<BrandPickerInfo>,

    /// Optional status surface (loading, failed, or empty filter result).
    ///
    /// When present, the section table is not drawn.
    pub status: Option<StatusInfo>,
}

/// Display information for one brand section.
#[derive(Debug, Clone)]
pub struct SectionView {
    /// Brand display name.
    pub brand: String,

    /// Whether the section is mid fade-out and should be drawn dimmed.
    pub dimmed: bool,

    /// Formatted totals row cells: stock value, cost, then net sales over
    /// the four windows.
    pub totals: TotalsView,

    /// Product rows that passed the text filter, in payload order.
    pub rows: Vec<RowView>,

    /// Count of rows hidden by the text filter or the height cap.
    pub hidden_rows: usize,
}

/// Formatted totals row for one brand.
#[derive(Debug, Clone)]
pub struct TotalsView {
    /// Total stock value, money-formatted.
    pub stock_value: String,
    /// Total cost, money-formatted.
    pub cost: String,
    /// Net sales amounts over 60/120/180/365 days, money-formatted.
    pub sales: [String; 4],
}

/// Display information for a single product row.
///
/// All numeric cells are pre-formatted; tone flags tell the renderer which
/// theme color each cell takes.
#[derive(Debug, Clone)]
pub struct RowView {
    /// Product display name, possibly truncated for the name column.
    pub name: String,

    /// Per-unit cost cell, money-formatted.
    pub cost: String,

    /// Whether the cost is missing on a live product (drawn in the warning
    /// tone).
    pub cost_missing: bool,

    /// Stock quantity cell.
    pub stock: String,

    /// Severity tone for the stock cell.
    pub stock_level: StockLevel,

    /// Units sold over 60/120/180/365 days.
    pub sales: [String; 4],

    /// Suggested reorder quantity cell.
    pub suggestion: String,

    /// Alert text straight from the payload.
    pub alert: String,

    /// Whether the alert is nominal (drawn calm rather than alarming).
    pub alert_nominal: bool,

    /// Whether the product is deleted upstream (whole row dimmed).
    pub deleted: bool,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,

    /// Last successful load time, pre-formatted, when a report is loaded.
    pub last_updated: Option<String>,

    /// Active filter description (search term or selected brand), if any.
    pub filter_label: Option<String>,
}

/// Pagination display information.
///
/// The label is derived synchronously from engine state so it is correct the
/// moment a navigation event is handled, independent of the fade timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    /// Indicator text, e.g. "Page 3 / 7".
    pub label: String,

    /// Whether the previous-page control is enabled.
    pub prev_enabled: bool,

    /// Whether the next-page control is enabled.
    pub next_enabled: bool,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text for the active input mode.
    pub keybindings: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current search query text.
    pub query: String,
}

/// Brand picker display information.
#[derive(Debug, Clone)]
pub struct BrandPickerInfo {
    /// Picker entries: "All brands" followed by every brand in payload order.
    pub options: Vec<String>,

    /// Index of the entry under the cursor.
    pub cursor: usize,
}

/// Status surface display information (loading, failure, empty result).
#[derive(Debug, Clone)]
pub struct StatusInfo {
    /// Primary message.
    pub message: String,

    /// Secondary hint line.
    pub hint: String,
}

impl DashboardViewModel {
    /// Computes the view model from application state.
    ///
    /// `rows` caps how many product rows a section shows; overflow is
    /// reported through `hidden_rows` rather than silently dropped.
    #[must_use]
    pub fn from_state(state: &AppState, rows: usize, _cols: usize) -> Self {
        let status = compute_status(state);
        let sections = if status.is_some() {
            Vec::new()
        } else {
            compute_sections(state, rows.saturating_sub(CHROME_ROWS))
        };

        Self {
            header: compute_header(state),
            sections,
            pagination: PaginationInfo {
                label: state.page_label(),
                prev_enabled: state.prev_enabled(),
                next_enabled: state.next_enabled(),
            },
            footer: FooterInfo {
                keybindings: keybindings_for(state.input_mode),
            },
            search_bar: (state.input_mode == InputMode::Search).then(|| SearchBarInfo {
                query: state.search_term.clone(),
            }),
            brand_picker: (state.input_mode == InputMode::BrandSelect).then(|| BrandPickerInfo {
                options: state.brand_options(),
                cursor: state.brand_cursor,
            }),
            status,
        }
    }
}

fn compute_header(state: &AppState) -> HeaderInfo {
    let filter_label = if !state.search_term.is_empty() {
        Some(format!("search: {}", state.search_term))
    } else {
        state
            .selected_brand
            .as_ref()
            .map(|brand| format!("brand: {brand}"))
    };

    HeaderInfo {
        title: "Stockdeck".to_string(),
        last_updated: state
            .last_updated
            .map(|at| format!("Updated {}", at.format("%Y-%m-%d %H:%M UTC"))),
        filter_label,
    }
}

fn compute_status(state: &AppState) -> Option<StatusInfo> {
    match &state.load_phase {
        LoadPhase::Loading => Some(StatusInfo {
            message: "Loading report…".to_string(),
            hint: "Fetching inventory and sales data".to_string(),
        }),
        LoadPhase::Failed(message) => Some(StatusInfo {
            message: message.clone(),
            hint: "Press 'r' to retry".to_string(),
        }),
        LoadPhase::Ready if state.filtered.is_empty() => Some(StatusInfo {
            message: "No matching brands".to_string(),
            hint: "Esc clears the filter".to_string(),
        }),
        LoadPhase::Ready => None,
    }
}

fn compute_sections(state: &AppState, row_capacity: usize) -> Vec<SectionView> {
    state
        .sections
        .iter()
        .filter(|section| section.visibility.is_shown())
        .map(|section| {
            let matching: Vec<&crate::app::ProductRow> =
                section.rows.iter().filter(|row| row.visible).collect();
            let shown = matching.len().min(row_capacity.max(1));
            let hidden_rows = section.rows.len() - shown;

            SectionView {
                brand: section.brand.clone(),
                dimmed: section.visibility == Visibility::FadingOut,
                totals: TotalsView {
                    stock_value: helpers::format_money(section.totals.stock_value),
                    cost: helpers::format_money(section.totals.cost),
                    sales: [
                        helpers::format_money(section.totals.net_sales_v60),
                        helpers::format_money(section.totals.net_sales_v120),
                        helpers::format_money(section.totals.net_sales_v180),
                        helpers::format_money(section.totals.net_sales_v365),
                    ],
                },
                rows: matching[..shown].iter().map(|row| row_view(row)).collect(),
                hidden_rows,
            }
        })
        .collect()
}

fn row_view(row: &crate::app::ProductRow) -> RowView {
    let record = &row.record;
    RowView {
        name: record.name.clone(),
        cost: helpers::format_money(record.unit_cost),
        cost_missing: record.cost_missing(),
        stock: record.stock.to_string(),
        stock_level: record.stock_level(),
        sales: [
            record.v60.to_string(),
            record.v120.to_string(),
            record.v180.to_string(),
            record.v365.to_string(),
        ],
        suggestion: format!("{:.0}", record.suggested_reorder),
        alert: record.alert.clone(),
        alert_nominal: record.alert_nominal(),
        deleted: record.is_deleted,
    }
}

fn keybindings_for(mode: InputMode) -> String {
    match mode {
        InputMode::Normal => {
            "←/→: page | /: search | b: brands | r: reload | q: quit".to_string()
        }
        InputMode::Search => "type to filter | Enter: keep | Esc: clear".to_string(),
        InputMode::BrandSelect => "j/k: move | Enter: apply | Esc: cancel".to_string(),
    }
}
