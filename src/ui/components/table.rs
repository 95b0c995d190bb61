//! Brand section table renderer.
//!
//! This module renders one brand section as a block: brand title, column
//! headers, product rows with per-cell tones, and the totals line. Cell tones
//! follow the record flags computed into the view model: stock severity,
//! missing cost, deleted products, and alert state.

use crate::domain::StockLevel;
use crate::ui::helpers::{position_cursor, truncate_cell};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{RowView, SectionView};

/// Product name column width in characters.
const NAME_WIDTH: usize = 28;

/// Width of each numeric column (cost, stock, sales windows, suggestion).
const NUM_WIDTH: usize = 11;

/// Renders one brand section starting at the specified row.
///
/// Layout:
/// ```text
/// ── BRAND ──────────
/// PRODUCT  COST  STOCK  V60  V120  V180  V365  SUGG  ALERT
/// <rows, tone-colored per cell>
/// TOTALS   value … | cost … | 60d … | 120d … | 180d … | 365d …
/// (+N rows hidden)
/// ```
///
/// A section mid fade-out is drawn entirely dimmed. Returns the next
/// available row position.
pub fn render_section(row: usize, section: &SectionView, theme: &Theme, cols: usize) -> usize {
    let mut current_row = render_title(row, section, theme, cols);
    current_row = render_column_headers(current_row, section.dimmed, theme);

    for product in &section.rows {
        current_row = render_product_row(current_row, product, section.dimmed, theme);
    }

    current_row = render_totals(current_row, section, theme);

    if section.hidden_rows > 0 {
        position_cursor(current_row, 1);
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("  (+{} rows hidden)", section.hidden_rows);
        print!("{}", Theme::reset());
        current_row += 1;
    }

    current_row
}

fn render_title(row: usize, section: &SectionView, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    if section.dimmed {
        print!("{}", Theme::dim());
    }
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.brand_fg));
    let label = format!("── {} ", section.brand);
    print!("{label}");
    print!(
        "{}",
        "─".repeat(cols.saturating_sub(label.chars().count()))
    );
    print!("{}", Theme::reset());
    row + 1
}

fn render_column_headers(row: usize, dimmed: bool, theme: &Theme) -> usize {
    position_cursor(row, 1);
    if dimmed {
        print!("{}", Theme::dim());
    }
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(
        "{:<name$} {:>num$} {:>num$} {:>num$} {:>num$} {:>num$} {:>num$} {:>num$}  {}",
        "PRODUCT",
        "COST",
        "STOCK",
        "V60",
        "V120",
        "V180",
        "V365",
        "SUGG",
        "ALERT",
        name = NAME_WIDTH,
        num = NUM_WIDTH,
    );
    print!("{}", Theme::reset());
    row + 1
}

fn render_product_row(row: usize, product: &RowView, dimmed: bool, theme: &Theme) -> usize {
    position_cursor(row, 1);

    let row_dimmed = dimmed || product.deleted;
    if row_dimmed {
        print!("{}", Theme::dim());
    }

    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!(
        "{:<name$} ",
        truncate_cell(&product.name, NAME_WIDTH),
        name = NAME_WIDTH
    );

    let cost_color = if product.cost_missing {
        &theme.colors.warning_fg
    } else {
        &theme.colors.text_normal
    };
    print!("{}{:>num$} ", Theme::fg(cost_color), product.cost, num = NUM_WIDTH);

    let stock_color = match product.stock_level {
        StockLevel::Out => &theme.colors.stock_out_fg,
        StockLevel::Low => &theme.colors.stock_low_fg,
        StockLevel::Normal => &theme.colors.text_normal,
    };
    print!("{}{:>num$} ", Theme::fg(stock_color), product.stock, num = NUM_WIDTH);

    print!("{}", Theme::fg(&theme.colors.text_normal));
    for cell in &product.sales {
        print!("{cell:>NUM_WIDTH$} ");
    }
    print!("{:>NUM_WIDTH$}  ", product.suggestion);

    let alert_color = if product.alert_nominal {
        &theme.colors.alert_ok_fg
    } else {
        &theme.colors.alert_bad_fg
    };
    print!("{}{}", Theme::fg(alert_color), product.alert);

    print!("{}", Theme::reset());
    row + 1
}

fn render_totals(row: usize, section: &SectionView, theme: &Theme) -> usize {
    position_cursor(row, 1);
    if section.dimmed {
        print!("{}", Theme::dim());
    }
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.totals_fg));
    print!(
        "TOTALS  value {} | cost {} | 60d {} | 120d {} | 180d {} | 365d {}",
        section.totals.stock_value,
        section.totals.cost,
        section.totals.sales[0],
        section.totals.sales[1],
        section.totals.sales[2],
        section.totals.sales[3],
    );
    print!("{}", Theme::reset());
    row + 1
}
