//! Status surface component renderer.
//!
//! This module renders the centered status message shown instead of the
//! table when the report is loading, the load failed, or a filter matched
//! nothing.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusInfo;

/// Renders the status surface.
///
/// Displays a centered two-line message:
/// ```text
/// [5 blank lines]
/// [left padding] MESSAGE [right padding]
/// [left padding] hint    [right padding]
/// ```
///
/// The message uses the `status_fg` theme color, the hint uses `text_dim`
/// with dim styling.
pub fn render_status(status: &StatusInfo, theme: &Theme, cols: usize) {
    let msg_len = status.message.chars().count();
    let msg_padding = (cols.saturating_sub(msg_len)) / 2;

    position_cursor(6, 1);
    print!("{}", Theme::fg(&theme.colors.status_fg));
    print!("{}", " ".repeat(msg_padding));
    print!("{}", status.message);
    print!("{}", " ".repeat(cols.saturating_sub(msg_padding + msg_len)));
    print!("{}", Theme::reset());

    let hint_len = status.hint.chars().count();
    let hint_padding = (cols.saturating_sub(hint_len)) / 2;

    position_cursor(7, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(hint_padding));
    print!("{}", status.hint);
    print!("{}", " ".repeat(cols.saturating_sub(hint_padding + hint_len)));
    print!("{}", Theme::reset());
}
