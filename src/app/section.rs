//! Brand section view records owned by the view-state engine.
//!
//! A [`BrandSection`] is the engine's working representation of one brand's
//! rendered block: the typed report data plus the mutable visibility state the
//! render reconciler drives. Sections are materialized once from a fetched
//! payload and are exclusively owned by [`AppState`](super::AppState) for the
//! rest of the page view; filters and transitions mutate flags in place but
//! never add or remove sections.

use crate::domain::{BrandReport, BrandTotals, ProductRecord};

/// Visual state of a brand section during transitions.
///
/// Tracks the two-phase fade cycle: every render first pushes all sections
/// toward `FadingOut`/`Hidden`, then pulls the new visible window back in
/// through `FadingIn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Fully shown.
    Visible,
    /// Exit transition running; still drawn, dimmed.
    FadingOut,
    /// Enter transition running; drawn normally.
    FadingIn,
    /// Not drawn at all.
    Hidden,
}

impl Visibility {
    /// Whether the section occupies screen space in this state.
    #[must_use]
    pub fn is_shown(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Whether the section counts as part of the settled visible window.
    #[must_use]
    pub fn is_settled_visible(self) -> bool {
        matches!(self, Self::Visible | Self::FadingIn)
    }
}

/// One product line within a section.
///
/// Carries a row-level visibility flag that is independent of the section's
/// own visibility: the text-search filter hides non-matching rows inside an
/// otherwise visible section. The flag is a persistent mutation: rows hidden
/// by one search stay hidden until a later search re-evaluates them.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    /// Typed product record from the payload.
    pub record: ProductRecord,

    /// Lowercased display text, precomputed once so per-keystroke filtering
    /// does not re-lowercase every cell.
    pub search_text: String,

    /// Row-level visibility, toggled by the text-search filter.
    pub visible: bool,
}

impl ProductRow {
    fn new(record: ProductRecord) -> Self {
        let search_text = record.display_text().to_lowercase();
        Self {
            record,
            search_text,
            visible: true,
        }
    }
}

/// One brand's rendered block: header data, totals, product rows, visibility.
#[derive(Debug, Clone, PartialEq)]
pub struct BrandSection {
    /// Brand display name; also the filter key, matched case-insensitively.
    pub brand: String,

    /// Lowercased brand name, precomputed for the filters.
    pub brand_lower: String,

    /// Aggregate totals shown in the section's totals row.
    pub totals: BrandTotals,

    /// Product rows in payload order.
    pub rows: Vec<ProductRow>,

    /// Section-level visual state, driven by the transition scheduler.
    pub visibility: Visibility,
}

impl BrandSection {
    /// Materializes a section from one brand's payload record.
    ///
    /// All rows start visible and the section starts hidden; the first
    /// render pass decides what actually shows.
    #[must_use]
    pub fn from_report(report: BrandReport) -> Self {
        let brand_lower = report.brand.to_lowercase();
        Self {
            brand: report.brand,
            brand_lower,
            totals: report.totals,
            rows: report.products.into_iter().map(ProductRow::new).collect(),
            visibility: Visibility::Hidden,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Builds a minimal section with the given brand and row names, the shape
    /// most engine tests need.
    pub fn section(brand: &str, row_names: &[&str]) -> BrandSection {
        let products = row_names
            .iter()
            .map(|name| ProductRecord {
                name: (*name).to_string(),
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
            .collect();

        BrandSection::from_report(BrandReport {
            brand: brand.to_string(),
            totals: BrandTotals::default(),
            products,
        })
    }
}
