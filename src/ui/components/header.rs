//! Header component renderer.
//!
//! This module renders the plugin title bar with centered text plus a dimmed
//! subtitle line carrying the last-updated stamp and any active filter.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header at the specified row.
///
/// Displays the title centered horizontally with bold styling and theme
/// colors, padded to fill the terminal width. When a last-updated stamp or a
/// filter label is present, a second dimmed line shows them.
///
/// Returns the next available row position.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = header.title.len();
    let padding = (cols.saturating_sub(title_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));

    print!("{}", Theme::reset());

    let subtitle = subtitle_text(header);
    if subtitle.is_empty() {
        return row + 1;
    }

    let sub_len = subtitle.chars().count().min(cols);
    let sub_padding = (cols.saturating_sub(sub_len)) / 2;

    position_cursor(row + 1, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(sub_padding));
    print!("{subtitle}");
    print!("{}", " ".repeat(cols.saturating_sub(sub_padding + sub_len)));
    print!("{}", Theme::reset());

    row + 2
}

fn subtitle_text(header: &HeaderInfo) -> String {
    match (&header.last_updated, &header.filter_label) {
        (Some(updated), Some(filter)) => format!("{updated}  [{filter}]"),
        (Some(updated), None) => updated.clone(),
        (None, Some(filter)) => format!("[{filter}]"),
        (None, None) => String::new(),
    }
}
