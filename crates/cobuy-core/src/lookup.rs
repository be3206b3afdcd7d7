//! Resolve free-text or numeric user input to a catalog product.

use crate::model::{Catalog, Product, ProductId};

/// Resolve `input` to a single product.
///
/// All-digit input is an exact id lookup. Anything else is a
/// case-insensitive substring match over names in id order: an exact name
/// match wins, otherwise the first match is returned.
#[must_use]
pub fn resolve<'a>(catalog: &'a Catalog, input: &str) -> Option<&'a Product> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return trimmed
            .parse::<ProductId>()
            .ok()
            .and_then(|id| catalog.get(id));
    }

    let keyword = trimmed.to_lowercase();
    let matches = search(catalog, trimmed);
    matches
        .iter()
        .find(|product| product.name.to_lowercase() == keyword)
        .or_else(|| matches.first())
        .copied()
}

/// Every product whose name contains `input` (case-insensitive), in id
/// order. Empty input matches nothing.
#[must_use]
pub fn search<'a>(catalog: &'a Catalog, input: &str) -> Vec<&'a Product> {
    let keyword = input.trim().to_lowercase();
    if keyword.is_empty() {
        return Vec::new();
    }

    catalog
        .iter()
        .filter(|product| product.name.to_lowercase().contains(&keyword))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn sample() -> Catalog {
        Dataset::sample().expect("sample").catalog
    }

    #[test]
    fn numeric_input_is_exact_id() {
        let catalog = sample();
        assert_eq!(resolve(&catalog, " 9 ").map(|p| p.name.as_str()), Some("Standing Desk"));
        assert!(resolve(&catalog, "99").is_none());
    }

    #[test]
    fn exact_name_beats_earlier_substring_match() {
        let catalog = sample();
        // "mouse" is a substring of Mouse (3) and Mouse Pad (19).
        assert_eq!(resolve(&catalog, "MOUSE").map(|p| p.id), Some(ProductId(3)));
        assert_eq!(resolve(&catalog, "mouse pad").map(|p| p.id), Some(ProductId(19)));
    }

    #[test]
    fn first_substring_match_in_id_order() {
        let catalog = sample();
        // Standing Desk (9), Desk Lamp (10), Desk Organizer (25).
        assert_eq!(resolve(&catalog, "desk").map(|p| p.id), Some(ProductId(9)));
        let all: Vec<u64> = search(&catalog, "desk").iter().map(|p| p.id.0).collect();
        assert_eq!(all, vec![9, 10, 25]);
    }

    #[test]
    fn blank_and_unmatched_input_resolve_to_none() {
        let catalog = sample();
        assert!(resolve(&catalog, "   ").is_none());
        assert!(resolve(&catalog, "toaster").is_none());
        assert!(search(&catalog, "").is_empty());
    }
}
