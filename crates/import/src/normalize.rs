//! Turns a provisional parsed line into the canonical pre-commit record.
//!
//! The receipt line itself can only supply name, size, quantity, cost,
//! notes and maybe a UPC; everything else (brand, category, location,
//! threshold, decrement step) is borrowed from a matching existing item
//! when one exists, or defaulted.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::re;
use larder_core::quantity::{format_cost, format_quantity};
use larder_core::{InventoryItem, ManualInventoryInput, ParsedReceiptItem};

re!(re_magnitude, r"[\d.]+");

/// Pure: the same parsed item and inventory snapshot always produce the
/// same record.
pub fn convert_parsed_to_manual(
    parsed: &ParsedReceiptItem,
    existing: &[InventoryItem],
) -> ManualInventoryInput {
    let matched = enrichment_source(parsed, existing);

    let product_size = parsed.product_size.clone().unwrap_or_default();
    let unit = matched
        .and_then(|m| m.unit.clone())
        .or_else(|| parsed.unit.clone())
        .unwrap_or_else(|| "each".to_string());

    let decrement_step = matched
        .and_then(|m| m.decrement_step.clone())
        .filter(|step| !step.trim().is_empty())
        .unwrap_or_else(|| {
            guess_decrement_step(
                (!product_size.is_empty()).then_some(product_size.as_str()),
                Some(unit.as_str()),
            )
        });

    ManualInventoryInput {
        name: parsed.name.clone(),
        upc: parsed.upc.clone(),
        brand: matched.and_then(|m| m.brand.clone()).unwrap_or_default(),
        category: matched.and_then(|m| m.category.clone()).unwrap_or_default(),
        product_size,
        quantity_available: format_quantity(parsed.quantity),
        unit,
        location: matched.and_then(|m| m.location.clone()).unwrap_or_default(),
        notes: parsed.notes.clone().unwrap_or_default(),
        low_threshold: matched
            .and_then(|m| m.low_threshold.clone())
            .unwrap_or_else(|| "1".to_string()),
        image_url: matched.and_then(|m| m.image_url.clone()).unwrap_or_default(),
        decrement_step,
        cost: format_cost(parsed.cost),
    }
}

/// By UPC when the receipt printed one, else case-insensitive exact name.
fn enrichment_source<'a>(
    parsed: &ParsedReceiptItem,
    existing: &'a [InventoryItem],
) -> Option<&'a InventoryItem> {
    if let Some(upc) = parsed.upc.as_deref().filter(|u| !u.trim().is_empty()) {
        return existing.iter().find(|item| item.upc.as_deref() == Some(upc));
    }
    let wanted = parsed.name.to_lowercase();
    existing.iter().find(|item| item.name.to_lowercase() == wanted)
}

/// Suggest how much one "use" should subtract from stock, from the package
/// size and unit. Deliberately coarse — a starting point the user can
/// override, not a guarantee.
pub fn guess_decrement_step(product_size: Option<&str>, unit: Option<&str>) -> String {
    let (Some(size), Some(unit)) = (product_size, unit) else {
        return "1".to_string();
    };
    if size.trim().is_empty() || unit.trim().is_empty() {
        return "1".to_string();
    }

    let magnitude = re_magnitude()
        .find(size)
        .and_then(|token| Decimal::from_str(token.as_str()).ok())
        .unwrap_or(Decimal::ONE);

    let size = size.to_lowercase();
    let unit = unit.to_lowercase();

    if unit.contains("oz") || size.contains("oz") {
        let step = (magnitude / Decimal::from(10)).max(Decimal::new(1, 1));
        return format!("{:.1}", step.round_dp(1));
    }
    if unit.contains("ml") || size.contains("ml") {
        let step = (magnitude / Decimal::from(100)).max(Decimal::ONE);
        return format!("{:.1}", step.round_dp(1));
    }
    if size.contains("count") {
        return "1".to_string();
    }
    "1".to_string()
}
