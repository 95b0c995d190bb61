//! Filter predicate evaluation over the section set.
//!
//! Both filters recompute the filtered subset from the FULL section set using
//! only their own criterion: the text search ignores any selected brand and
//! the brand filter ignores the current search term. Each control fires its
//! own full recomputation; the filters are never composed.
//!
//! The returned filtered set is a vector of indices into the master section
//! list, always strictly increasing, so it is an order-preserving subsequence
//! by construction and visibility mutations land on the sections the engine
//! owns rather than on clones.

use super::section::BrandSection;

/// Applies the free-text search filter.
///
/// For every section, each row's display text is tested for case-insensitive
/// substring containment of `term`; matching rows are marked visible and
/// non-matching rows hidden. The row flags are a persistent side effect that
/// outlives this call. A section is retained when any of its rows matched or
/// when its brand name itself contains the term.
///
/// An empty term matches everything, restoring the full set (and marking all
/// rows visible again).
pub fn apply_text_search(sections: &mut [BrandSection], term: &str) -> Vec<usize> {
    let term = term.to_lowercase();

    let _span = tracing::debug_span!("apply_text_search", term_len = term.len()).entered();

    let mut filtered = Vec::new();
    for (index, section) in sections.iter_mut().enumerate() {
        let mut any_row_matched = false;
        for row in &mut section.rows {
            let matched = row.search_text.contains(&term);
            row.visible = matched;
            any_row_matched |= matched;
        }

        if any_row_matched || section.brand_lower.contains(&term) {
            filtered.push(index);
        }
    }

    tracing::debug!(
        total = sections.len(),
        retained = filtered.len(),
        "text search applied"
    );

    filtered
}

/// Applies the brand-select filter.
///
/// Keeps exactly the sections whose brand name case-insensitively equals
/// `selected`; `None` means "no filter" and restores the full set. Row-level
/// visibility is untouched; only the text search drives row flags.
pub fn apply_brand_filter(sections: &[BrandSection], selected: Option<&str>) -> Vec<usize> {
    let _span = tracing::debug_span!("apply_brand_filter", selected = ?selected).entered();

    let filtered: Vec<usize> = match selected {
        None => (0..sections.len()).collect(),
        Some(brand) => {
            let brand = brand.to_lowercase();
            sections
                .iter()
                .enumerate()
                .filter(|(_, section)| section.brand_lower == brand)
                .map(|(index, _)| index)
                .collect()
        }
    };

    tracing::debug!(
        total = sections.len(),
        retained = filtered.len(),
        "brand filter applied"
    );

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::section::test_support::section;

    fn sample() -> Vec<BrandSection> {
        vec![
            section("Acme", &["Widget A", "Widget B"]),
            section("Zeta", &["Gadget"]),
        ]
    }

    #[test]
    fn search_retains_sections_with_matching_rows() {
        let mut sections = sample();
        let filtered = apply_text_search(&mut sections, "widget");

        assert_eq!(filtered, vec![0]);
        assert!(sections[0].rows.iter().all(|row| row.visible));
    }

    #[test]
    fn search_falls_back_to_brand_name() {
        let mut sections = sample();
        let filtered = apply_text_search(&mut sections, "zeta");

        // No Zeta row matches "zeta", but the brand name does.
        assert_eq!(filtered, vec![1]);
        assert!(sections[1].rows.iter().all(|row| !row.visible));
    }

    #[test]
    fn search_is_case_insensitive() {
        let mut sections = sample();
        assert_eq!(apply_text_search(&mut sections, "WIDGET"), vec![0]);
        assert_eq!(apply_text_search(&mut sections, "gAdGeT"), vec![1]);
    }

    #[test]
    fn empty_term_restores_full_set_and_row_visibility() {
        let mut sections = sample();
        apply_text_search(&mut sections, "widget a");
        assert!(!sections[0].rows[1].visible);

        let filtered = apply_text_search(&mut sections, "");
        assert_eq!(filtered, vec![0, 1]);
        assert!(sections[0].rows[1].visible);
    }

    #[test]
    fn row_visibility_persists_between_filter_calls() {
        let mut sections = sample();
        apply_text_search(&mut sections, "widget a");
        assert!(sections[0].rows[0].visible);
        assert!(!sections[0].rows[1].visible);

        // A brand filter in between does not touch row flags.
        apply_brand_filter(&sections, Some("Acme"));
        assert!(!sections[0].rows[1].visible);
    }

    #[test]
    fn brand_filter_matches_exact_name_case_insensitively() {
        let sections = sample();
        assert_eq!(apply_brand_filter(&sections, Some("acme")), vec![0]);
        assert_eq!(apply_brand_filter(&sections, Some("ZETA")), vec![1]);
        // Substrings do not match the brand filter.
        assert!(apply_brand_filter(&sections, Some("Ac")).is_empty());
    }

    #[test]
    fn brand_filter_is_idempotent_and_none_restores_all() {
        let sections = sample();
        let once = apply_brand_filter(&sections, Some("Zeta"));
        let twice = apply_brand_filter(&sections, Some("Zeta"));
        assert_eq!(once, twice);

        assert_eq!(apply_brand_filter(&sections, None), vec![0, 1]);
    }

    #[test]
    fn filtered_set_is_an_ordered_subsequence() {
        let mut sections = vec![
            section("Acme", &["Widget"]),
            section("Beta", &["Widget"]),
            section("Zeta", &["Widget"]),
        ];
        let filtered = apply_text_search(&mut sections, "widget");

        assert_eq!(filtered, vec![0, 1, 2]);
        assert!(filtered.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
