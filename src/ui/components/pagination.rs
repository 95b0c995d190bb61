//! Pagination indicator renderer.
//!
//! Renders the centered page indicator with prev/next arrows. Disabled
//! arrows are drawn dimmed, matching the disabled-control contract at the
//! page boundaries.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

/// Renders the pagination line at the specified row.
///
/// Layout: `◀ Page 3 / 7 ▶`, centered. Each arrow takes the normal text
/// color when its control is enabled and the dim color otherwise.
///
/// Returns the next available row position.
pub fn render_pagination(row: usize, info: &PaginationInfo, theme: &Theme, cols: usize) -> usize {
    // "◀ " + label + " ▶"
    let text_len = info.label.chars().count() + 4;
    let padding = (cols.saturating_sub(text_len)) / 2;

    position_cursor(row, 1);
    print!("{}", " ".repeat(padding));

    let prev_color = if info.prev_enabled {
        &theme.colors.text_normal
    } else {
        &theme.colors.text_dim
    };
    print!("{}◀ ", Theme::fg(prev_color));

    print!("{}{}", Theme::fg(&theme.colors.text_normal), info.label);

    let next_color = if info.next_enabled {
        &theme.colors.text_normal
    } else {
        &theme.colors.text_dim
    };
    print!("{} ▶", Theme::fg(next_color));

    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}
