//! Typed report payload model.
//!
//! This module defines the inbound data contract with the report backend: an
//! ordered array of brand records, each carrying aggregate totals and an
//! ordered list of product records. The backend emits French column names
//! (`"Marque"`, `"Produits"`, `"Coût par article ($)"`, ...); they are mapped
//! onto typed fields with serde rename attributes so the rest of the plugin
//! never touches raw JSON keys.
//!
//! Parsing doubles as validation: the payload is either materialized in full
//! or rejected in full at the worker boundary. Zero-valued numeric fields are
//! domain sentinels (a unit cost of `0` means "cost missing"), not errors.

use serde::{Deserialize, Serialize};

use super::error::{Result, StockdeckError};

/// Stock threshold below which a product is flagged as running low.
const LOW_STOCK_THRESHOLD: i64 = 5;

/// One brand's slice of the report: name, aggregate totals, product lines.
///
/// Brands arrive in the order the backend grouped them; that order is
/// preserved all the way into pagination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandReport {
    /// Brand display name, also the brand-filter key (matched
    /// case-insensitively).
    #[serde(rename = "Marque")]
    pub brand: String,

    /// Aggregate totals across all of this brand's products.
    #[serde(rename = "Totaux")]
    pub totals: BrandTotals,

    /// Product lines in backend order.
    #[serde(rename = "Produits")]
    pub products: Vec<ProductRecord>,
}

/// Per-brand aggregate totals (net sales).
///
/// Six numeric fields: total stock value, total cost, and net-sales amounts
/// for the four trailing windows (60/120/180/365 days). Fields the backend
/// omits default to zero, matching its own rounding-to-zero behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BrandTotals {
    /// Total value of stock on hand, in dollars.
    #[serde(rename = "Valeur Stock Total ($)", default)]
    pub stock_value: f64,

    /// Total acquisition cost, in dollars.
    #[serde(rename = "Coût Total ($)", default)]
    pub cost: f64,

    /// Net sales over the trailing 60 days, in dollars.
    #[serde(rename = "Montant V60 Total ($)", default)]
    pub net_sales_v60: f64,

    /// Net sales over the trailing 120 days, in dollars.
    #[serde(rename = "Montant V120 Total ($)", default)]
    pub net_sales_v120: f64,

    /// Net sales over the trailing 180 days, in dollars.
    #[serde(rename = "Montant V180 Total ($)", default)]
    pub net_sales_v180: f64,

    /// Net sales over the trailing 365 days, in dollars.
    #[serde(rename = "Montant V365 Total ($)", default)]
    pub net_sales_v365: f64,
}

/// One product line within a brand.
///
/// The backend also ships bookkeeping columns (SKU, variant IDs, gross
/// sales breakdowns) that the dashboard never displays; unknown keys are
/// ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product display name.
    #[serde(rename = "Produit")]
    pub name: String,

    /// Unit cost in dollars. `0` is a sentinel meaning "cost missing",
    /// surfaced as a presentation hint rather than treated as an error.
    #[serde(rename = "Coût par article ($)", default)]
    pub unit_cost: f64,

    /// Whether the backend flagged this variant as deleted upstream.
    #[serde(rename = "is_deleted", default)]
    pub is_deleted: bool,

    /// Units currently in stock.
    #[serde(rename = "Stock", default)]
    pub stock: i64,

    /// Sales volume over the trailing 60 days.
    #[serde(rename = "V60", default)]
    pub v60: i64,

    /// Sales volume over the trailing 120 days.
    #[serde(rename = "V120", default)]
    pub v120: i64,

    /// Sales volume over the trailing 180 days.
    #[serde(rename = "V180", default)]
    pub v180: i64,

    /// Sales volume over the trailing 365 days.
    #[serde(rename = "V365", default)]
    pub v365: i64,

    /// Suggested reorder quantity for the next 3 months.
    #[serde(rename = "Suggestion (3m)", default)]
    pub suggested_reorder: f64,

    /// Free-text alert. Matched by substring: anything containing `"OK"`
    /// is nominal, everything else gets alert styling.
    #[serde(rename = "Alerte", default)]
    pub alert: String,
}

/// Coarse stock level used for cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    /// No units on hand.
    Out,
    /// Fewer than [`LOW_STOCK_THRESHOLD`] units on hand.
    Low,
    /// Comfortable stock.
    Normal,
}

impl ProductRecord {
    /// Whether the cost sentinel applies: a zero unit cost on a product that
    /// still exists means the backend could not resolve its cost.
    #[must_use]
    pub fn cost_missing(&self) -> bool {
        self.unit_cost == 0.0 && !self.is_deleted
    }

    /// Whether the alert text signals a nominal state.
    ///
    /// The contract is substring containment of `"OK"`; removed/deleted
    /// markers and stockout alerts fall through to alert styling.
    #[must_use]
    pub fn alert_nominal(&self) -> bool {
        self.alert.contains("OK")
    }

    /// Stock level bucket for presentation.
    #[must_use]
    pub fn stock_level(&self) -> StockLevel {
        if self.stock == 0 {
            StockLevel::Out
        } else if self.stock < LOW_STOCK_THRESHOLD {
            StockLevel::Low
        } else {
            StockLevel::Normal
        }
    }

    /// Concatenated display text of the row, used by the text-search filter.
    ///
    /// Mirrors what a reader sees in the rendered row (name, stock, cost,
    /// trailing-window volumes, suggestion, alert), so a search term matches
    /// against any visible cell.
    #[must_use]
    pub fn display_text(&self) -> String {
        format!(
            "{} {} {:.2} {} {} {} {} {} {}",
            self.name,
            self.stock,
            self.unit_cost,
            self.v60,
            self.v120,
            self.v180,
            self.v365,
            self.suggested_reorder,
            self.alert
        )
    }
}

/// Parses and validates a raw report body into typed brand records.
///
/// This is the single validation point of the loader boundary: on success the
/// whole payload is well-typed, on failure nothing is materialized.
///
/// # Errors
///
/// Returns [`StockdeckError::Payload`] when the body is not a JSON array of
/// brand records matching the contract.
pub fn parse_report(body: &str) -> Result<Vec<BrandReport>> {
    serde_json::from_str(body).map_err(|e| StockdeckError::Payload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "Marque": "Acme",
            "Totaux": {
                "Valeur Stock Total ($)": 1520.5,
                "Coût Total ($)": 800.0,
                "Montant V60 Total ($)": 210.0,
                "Montant V120 Total ($)": 400.0,
                "Montant V180 Total ($)": 610.25,
                "Montant V365 Total ($)": 1200.0
            },
            "Produits": [
                {
                    "Produit": "Widget A",
                    "SKU": "ACM-001",
                    "Stock": 12,
                    "Coût par article ($)": 4.5,
                    "V60": 3, "V120": 7, "V180": 11, "V365": 20,
                    "Suggestion (3m)": 0,
                    "Alerte": "✅ OK",
                    "is_deleted": false
                },
                {
                    "Produit": "🗑️ Widget B",
                    "Stock": 0,
                    "Coût par article ($)": 0,
                    "V60": 0, "V120": 1, "V180": 2, "V365": 4,
                    "Suggestion (3m)": 0,
                    "Alerte": "🗑️ SUPPRIMÉ",
                    "is_deleted": true
                }
            ]
        }
    ]"#;

    #[test]
    fn parses_backend_column_names() {
        let brands = parse_report(SAMPLE).expect("sample payload should parse");
        assert_eq!(brands.len(), 1);

        let acme = &brands[0];
        assert_eq!(acme.brand, "Acme");
        assert_eq!(acme.totals.stock_value, 1520.5);
        assert_eq!(acme.totals.net_sales_v365, 1200.0);
        assert_eq!(acme.products.len(), 2);
        assert_eq!(acme.products[0].name, "Widget A");
        assert_eq!(acme.products[0].v180, 11);
    }

    #[test]
    fn unknown_columns_are_ignored() {
        // SKU is present in the sample but has no typed field.
        assert!(parse_report(SAMPLE).is_ok());
    }

    #[test]
    fn malformed_payload_is_rejected_whole() {
        assert!(matches!(
            parse_report("{\"Marque\": \"not an array\"}"),
            Err(StockdeckError::Payload(_))
        ));
        assert!(parse_report("not json").is_err());
    }

    #[test]
    fn cost_sentinel_only_applies_to_live_products() {
        let brands = parse_report(SAMPLE).unwrap();
        let widget_a = &brands[0].products[0];
        let deleted = &brands[0].products[1];

        assert!(!widget_a.cost_missing());
        // Deleted products legitimately carry a zero cost.
        assert!(!deleted.cost_missing());

        let orphan = ProductRecord {
            unit_cost: 0.0,
            is_deleted: false,
            ..widget_a.clone()
        };
        assert!(orphan.cost_missing());
    }

    #[test]
    fn alert_classification_is_substring_based() {
        let brands = parse_report(SAMPLE).unwrap();
        assert!(brands[0].products[0].alert_nominal());
        assert!(!brands[0].products[1].alert_nominal());
    }

    #[test]
    fn stock_levels() {
        let brands = parse_report(SAMPLE).unwrap();
        assert_eq!(brands[0].products[0].stock_level(), StockLevel::Normal);
        assert_eq!(brands[0].products[1].stock_level(), StockLevel::Out);

        let low = ProductRecord {
            stock: 3,
            ..brands[0].products[0].clone()
        };
        assert_eq!(low.stock_level(), StockLevel::Low);
    }

    #[test]
    fn display_text_covers_every_visible_cell() {
        let brands = parse_report(SAMPLE).unwrap();
        let text = brands[0].products[0].display_text();
        assert!(text.contains("Widget A"));
        assert!(text.contains("12"));
        assert!(text.contains("4.50"));
        assert!(text.contains("OK"));
    }
}
