//! Matches an incoming pre-commit record against the existing inventory.
//!
//! Priority is exact UPC equality, then case-insensitive exact name.
//! Fuzzy/partial matching is deliberately not attempted — an ambiguous
//! match is worse than none for a commit pipeline.

use larder_core::{InventoryItem, ManualInventoryInput};

/// Which rule produced the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Upc,
    Name,
}

#[derive(Debug, Clone, Copy)]
pub struct InventoryMatch<'a> {
    pub item: &'a InventoryItem,
    pub kind: MatchKind,
}

/// Find the best existing inventory entry for `incoming`.
///
/// UPCs are compared after trimming; inventory rows may share a UPC or
/// lack one entirely, so the first hit in inventory order wins.
pub fn find_matching_item<'a>(
    incoming: &ManualInventoryInput,
    inventory: &'a [InventoryItem],
) -> Option<InventoryMatch<'a>> {
    if let Some(upc) = incoming.upc.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        let by_upc = inventory
            .iter()
            .find(|item| item.upc.as_deref().map(str::trim) == Some(upc));
        if let Some(item) = by_upc {
            return Some(InventoryMatch { item, kind: MatchKind::Upc });
        }
    }

    let wanted = normalize(&incoming.name);
    inventory
        .iter()
        .find(|item| normalize(&item.name) == wanted)
        .map(|item| InventoryMatch { item, kind: MatchKind::Name })
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Compare the unit tokens of two size strings ("32oz" vs "16oz" → both
/// "oz" → compatible). When either side is absent no conflict can be
/// determined, so none is raised.
pub fn is_product_size_compatible(a: Option<&str>, b: Option<&str>) -> bool {
    let (Some(a), Some(b)) = (a, b) else {
        return true;
    };
    if a.is_empty() || b.is_empty() {
        return true;
    }
    unit_token(a) == unit_token(b)
}

fn unit_token(size: &str) -> String {
    size.chars()
        .filter(|c| !c.is_ascii_digit() && !c.is_whitespace() && *c != '.')
        .collect::<String>()
        .to_lowercase()
}

/// The conflict reason shown on a review entry, if any.
pub fn size_conflict(incoming: &ManualInventoryInput, matched: &InventoryItem) -> Option<String> {
    let incoming_size = (!incoming.product_size.is_empty()).then_some(incoming.product_size.as_str());
    if is_product_size_compatible(incoming_size, matched.product_size.as_deref()) {
        None
    } else {
        Some("Product size mismatch".to_string())
    }
}
