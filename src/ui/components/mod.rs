//! Composable UI component renderers.
//!
//! This module provides specialized rendering components for different UI
//! elements, following a component-based architecture. Each component is
//! responsible for rendering a specific part of the interface.
//!
//! # Components
//!
//! - [`header`]: Title bar with last-updated stamp and active filter
//! - [`table`]: Brand section blocks (title, product rows, totals)
//! - [`pagination`]: Centered page indicator with prev/next arrows
//! - [`footer`]: Help text and keybinding hints
//! - [`search`]: Search input box (border, query text)
//! - [`brands`]: Brand picker list overlay
//! - [`status`]: Centered message for loading/failed/empty states
//!
//! The high-level [`render_dashboard`] function arranges the components for
//! whichever mode the view model describes.

mod brands;
mod footer;
mod header;
mod pagination;
mod search;
mod status;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DashboardViewModel;

use brands::render_brand_picker;
use footer::render_footer;
use header::render_header;
use pagination::render_pagination;
use search::render_search_bar;
use status::render_status;
use table::render_section;

/// Renders a horizontal border line at the specified row.
///
/// Used to separate UI sections (header/table, table/footer).
///
/// Returns the next available row position.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full dashboard layout from a view model.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header (1-2 lines)]
/// [Border]
/// [Search bar, when in search mode]
/// [Brand sections / status surface]
/// [Brand picker overlay, when in brand-select mode]
/// [Pagination]
/// [Border]
/// [Footer]
/// ```
///
/// The pagination line, bottom border, and footer are pinned to the last
/// three rows of the terminal.
pub fn render_dashboard(vm: &DashboardViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }

    if let Some(status) = &vm.status {
        render_status(status, theme, cols);
    } else {
        for section in &vm.sections {
            current_row = render_section(current_row, section, theme, cols);
            // Blank line between fading neighbors.
            current_row += 1;
        }
    }

    // Drawn after the table so the overlay paints on top.
    if let Some(picker) = &vm.brand_picker {
        render_brand_picker(5, picker, theme, cols);
    }

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);
    let pagination_row = border_row.saturating_sub(1);

    render_pagination(pagination_row, &vm.pagination, theme, cols);
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}
