use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One provisional line item produced by a store-format parser.
///
/// Lives only for the duration of a parse pass — the normalizer consumes it
/// immediately and produces a [`ManualInventoryInput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedReceiptItem {
    pub name: String,
    /// Package size as printed, e.g. "32oz".
    pub product_size: Option<String>,
    /// Positive; defaults to 1 when the receipt gives no quantity line.
    pub quantity: Decimal,
    /// Non-negative; defaults to 0 when no cost line is found.
    pub cost: Decimal,
    pub unit: Option<String>,
    pub notes: Option<String>,
    /// 12–13 digit UPC when the receipt prints one.
    pub upc: Option<String>,
}

impl ParsedReceiptItem {
    pub fn named(name: impl Into<String>) -> Self {
        ParsedReceiptItem {
            name: name.into(),
            product_size: None,
            quantity: Decimal::ONE,
            cost: Decimal::ZERO,
            unit: None,
            notes: None,
            upc: None,
        }
    }
}

/// The canonical pre-commit inventory record.
///
/// Numeric fields are string-encoded on purpose — the app displays and
/// accepts fractional text like "1/2". Arithmetic happens only behind
/// [`crate::quantity`]. Invariant: `decrement_step` is a non-empty numeric
/// string by the time the record is committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualInventoryInput {
    pub name: String,
    pub upc: Option<String>,
    pub brand: String,
    pub category: String,
    pub product_size: String,
    pub quantity_available: String,
    pub unit: String,
    pub location: String,
    pub notes: String,
    pub low_threshold: String,
    pub image_url: String,
    /// How much one "use" subtracts from on-hand stock.
    pub decrement_step: String,
    pub cost: String,
}

/// Fields that must be filled in before a record is complete enough to
/// commit without manual review.
const REQUIRED_FIELDS: [&str; 9] = [
    "name",
    "category",
    "product_size",
    "quantity_available",
    "unit",
    "location",
    "notes",
    "low_threshold",
    "decrement_step",
];

impl ManualInventoryInput {
    /// True if any required field is absent or blank after trimming.
    /// Used to decide whether a search-result item needs manual completion.
    pub fn has_missing_fields(&self) -> bool {
        REQUIRED_FIELDS
            .iter()
            .any(|field| self.field(field).trim().is_empty())
    }

    fn field(&self, name: &str) -> &str {
        match name {
            "name" => &self.name,
            "category" => &self.category,
            "product_size" => &self.product_size,
            "quantity_available" => &self.quantity_available,
            "unit" => &self.unit,
            "location" => &self.location,
            "notes" => &self.notes,
            "low_threshold" => &self.low_threshold,
            "decrement_step" => &self.decrement_step,
            _ => "",
        }
    }
}

/// A persisted inventory row, owned by the storage collaborator.
///
/// `id` uniquely identifies a row. `upc` is deliberately NOT unique —
/// several items may share one, or lack one entirely — so matching code
/// must tolerate duplicates and absences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub upc: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub product_size: Option<String>,
    pub quantity_available: Option<String>,
    pub unit: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub low_threshold: Option<String>,
    pub image_url: Option<String>,
    pub decrement_step: Option<String>,
    pub cost: Option<String>,
    pub added_at: Option<String>,
    pub updated_at: Option<String>,
}

impl InventoryItem {
    /// A bare row with only the identifying fields set. Handy in tests and
    /// anywhere a caller builds a row incrementally.
    pub fn named(id: i64, user_id: impl Into<String>, name: impl Into<String>) -> Self {
        InventoryItem {
            id,
            user_id: user_id.into(),
            name: name.into(),
            upc: None,
            brand: None,
            category: None,
            product_size: None,
            quantity_available: None,
            unit: None,
            location: None,
            notes: None,
            low_threshold: None,
            image_url: None,
            decrement_step: None,
            cost: None,
            added_at: None,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_input() -> ManualInventoryInput {
        ManualInventoryInput {
            name: "Milk".into(),
            upc: None,
            brand: "".into(),
            category: "Dairy".into(),
            product_size: "32oz".into(),
            quantity_available: "1".into(),
            unit: "each".into(),
            location: "Fridge".into(),
            notes: "2%".into(),
            low_threshold: "1".into(),
            image_url: "".into(),
            decrement_step: "3.2".into(),
            cost: "3.99".into(),
        }
    }

    #[test]
    fn complete_record_has_no_missing_fields() {
        assert!(!complete_input().has_missing_fields());
    }

    #[test]
    fn blank_required_field_is_missing() {
        let mut item = complete_input();
        item.location = "   ".into();
        assert!(item.has_missing_fields());
    }

    #[test]
    fn brand_and_image_url_are_not_required() {
        let mut item = complete_input();
        item.brand = "".into();
        item.image_url = "".into();
        assert!(!item.has_missing_fields());
    }

    #[test]
    fn empty_decrement_step_is_missing() {
        let mut item = complete_input();
        item.decrement_step = "".into();
        assert!(item.has_missing_fields());
    }

    #[test]
    fn parsed_item_defaults() {
        let p = ParsedReceiptItem::named("Eggs");
        assert_eq!(p.quantity, Decimal::ONE);
        assert_eq!(p.cost, Decimal::ZERO);
        assert!(p.upc.is_none());
    }
}
