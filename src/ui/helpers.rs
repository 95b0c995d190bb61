//! Shared rendering utilities and helpers.
//!
//! This module provides low-level rendering utilities used across multiple UI
//! components: cursor positioning, money formatting in the fr-CA style the
//! report backend uses, and width-safe cell truncation.

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H` to move the cursor.
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Formats a monetary amount in fr-CA style: space-grouped thousands, comma
/// decimal separator, trailing dollar sign.
///
/// Examples: `1 234,50 $`, `0,00 $`, `-12,30 $`.
#[must_use]
pub fn format_money(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped},{frac:02} $")
}

/// Truncates text to `width` characters, appending an ellipsis when cut.
///
/// Operates on character counts, not bytes, so multi-byte names stay intact.
#[must_use]
pub fn truncate_cell(text: &str, width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= width {
        return text.to_string();
    }
    if width <= 1 {
        return "…".repeat(width.min(1));
    }
    let mut cut: String = chars[..width - 1].iter().collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands_with_spaces() {
        assert_eq!(format_money(1234.5), "1 234,50 $");
        assert_eq!(format_money(1_234_567.89), "1 234 567,89 $");
        assert_eq!(format_money(999.0), "999,00 $");
    }

    #[test]
    fn money_handles_zero_and_negatives() {
        assert_eq!(format_money(0.0), "0,00 $");
        assert_eq!(format_money(-12.3), "-12,30 $");
    }

    #[test]
    fn money_rounds_to_cents() {
        assert_eq!(format_money(2.006), "2,01 $");
        assert_eq!(format_money(2.004), "2,00 $");
    }

    #[test]
    fn truncation_is_character_aware() {
        assert_eq!(truncate_cell("short", 10), "short");
        assert_eq!(truncate_cell("a very long product name", 10), "a very lo…");
        assert_eq!(truncate_cell("café crème brûlée", 9), "café crè…");
    }
}
