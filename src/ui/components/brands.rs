//! Brand picker component renderer.
//!
//! This module renders the brand selection list as a bordered box drawn over
//! the table area. The cursor row takes the selection colors; the first entry
//! clears the brand filter.

use crate::ui::helpers::{position_cursor, truncate_cell};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::BrandPickerInfo;

/// Horizontal margin for the picker box (spaces on left and right).
const PICKER_MARGIN: usize = 5;

/// Renders the brand picker starting at the specified row.
///
/// Layout:
/// ```text
/// [margin] ┌─ Select brand ────┐ [margin]
/// [margin] │ All brands        │ [margin]
/// [margin] │ Acme              │  ← cursor row uses selection colors
/// [margin] │ …                 │
/// [margin] └───────────────────┘ [margin]
/// ```
///
/// Returns the next available row position.
pub fn render_brand_picker(
    row: usize,
    picker: &BrandPickerInfo,
    theme: &Theme,
    cols: usize,
) -> usize {
    let box_width = cols.saturating_sub(PICKER_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);

    position_cursor(row, 1);
    print!("{}", " ".repeat(PICKER_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    let title = "─ Select brand ";
    print!(
        "┌{title}{}┐",
        "─".repeat(inner_width.saturating_sub(title.chars().count()))
    );
    print!("{}", Theme::reset());

    let mut current_row = row + 1;
    for (index, option) in picker.options.iter().enumerate() {
        position_cursor(current_row, 1);
        print!("{}", " ".repeat(PICKER_MARGIN));
        print!("{}", Theme::fg(&theme.colors.search_bar_border));
        print!("│");

        let entry = format!(" {}", truncate_cell(option, inner_width.saturating_sub(2)));
        let padding = inner_width.saturating_sub(entry.chars().count());

        if index == picker.cursor {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!("{entry}");
        print!("{}", " ".repeat(padding));
        print!("{}", Theme::reset());

        print!("{}", Theme::fg(&theme.colors.search_bar_border));
        print!("│");
        print!("{}", Theme::reset());
        current_row += 1;
    }

    position_cursor(current_row, 1);
    print!("{}", " ".repeat(PICKER_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    current_row + 1
}
