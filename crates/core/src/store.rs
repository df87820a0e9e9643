use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::item::{InventoryItem, ManualInventoryInput};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no matching inventory item for '{0}'")]
    NoMatchingItem(String),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("database error: {0}")]
    Database(String),
}

/// The persistence collaborator the reconciliation pipeline writes through.
///
/// Implementations own the persistence format entirely; the pipeline only
/// sees this seam. `get_inventory` returns the full current set scoped to
/// the active user — no pagination, and callers treat the result as a
/// snapshot (stale reads are acceptable, refresh after commit).
#[async_trait]
pub trait InventoryStore {
    async fn get_inventory(&self) -> Result<Vec<InventoryItem>, StoreError>;

    /// Persist one pre-commit record as a new row; returns the new row id.
    async fn persist_new_item(&self, item: &ManualInventoryInput) -> Result<i64, StoreError>;

    /// Add `delta` to the on-hand quantity of an existing item, located by
    /// UPC when one is given, else by case-insensitive name. Fails with
    /// [`StoreError::NoMatchingItem`] when nothing matches.
    async fn adjust_quantity(
        &self,
        upc: Option<&str>,
        name: &str,
        delta: Decimal,
    ) -> Result<(), StoreError>;
}
