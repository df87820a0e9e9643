use async_trait::async_trait;
use rust_decimal::Decimal;

use larder_core::quantity::{format_quantity, parse_quantity};
use larder_core::{InventoryItem, InventoryStore, ManualInventoryInput, StoreError};

use crate::db::DbPool;

/// SQLite-backed inventory, scoped to one user for its lifetime.
pub struct SqliteInventoryStore {
    pool: DbPool,
    user_id: String,
}

#[derive(sqlx::FromRow)]
struct InventoryRow {
    id: i64,
    user_id: String,
    name: String,
    upc: Option<String>,
    brand: Option<String>,
    category: Option<String>,
    product_size: Option<String>,
    quantity_available: Option<String>,
    unit: Option<String>,
    location: Option<String>,
    notes: Option<String>,
    low_threshold: Option<String>,
    image_url: Option<String>,
    decrement_step: Option<String>,
    cost: Option<String>,
    added_at: Option<String>,
    updated_at: Option<String>,
}

impl From<InventoryRow> for InventoryItem {
    fn from(row: InventoryRow) -> Self {
        InventoryItem {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            upc: row.upc,
            brand: row.brand,
            category: row.category,
            product_size: row.product_size,
            quantity_available: row.quantity_available,
            unit: row.unit,
            location: row.location,
            notes: row.notes,
            low_threshold: row.low_threshold,
            image_url: row.image_url,
            decrement_step: row.decrement_step,
            cost: row.cost,
            added_at: row.added_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_COLUMNS: &str = "id, user_id, name, upc, brand, category, product_size, \
     quantity_available, unit, location, notes, low_threshold, image_url, \
     decrement_step, cost, added_at, updated_at";

impl SqliteInventoryStore {
    pub fn new(pool: DbPool, user_id: impl Into<String>) -> Self {
        SqliteInventoryStore { pool, user_id: user_id.into() }
    }

    /// Blank display strings persist as NULL.
    fn non_blank(s: &str) -> Option<&str> {
        (!s.trim().is_empty()).then_some(s)
    }
}

#[async_trait]
impl InventoryStore for SqliteInventoryStore {
    async fn get_inventory(&self) -> Result<Vec<InventoryItem>, StoreError> {
        let rows = sqlx::query_as::<_, InventoryRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM inventory_items WHERE user_id = ? ORDER BY name"
        ))
        .bind(&self.user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn persist_new_item(&self, item: &ManualInventoryInput) -> Result<i64, StoreError> {
        if item.name.trim().is_empty() {
            return Err(StoreError::MissingField("name"));
        }
        if item.decrement_step.trim().is_empty() {
            return Err(StoreError::MissingField("decrement_step"));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO inventory_items
                (user_id, name, upc, brand, category, product_size,
                 quantity_available, unit, location, notes, low_threshold,
                 image_url, decrement_step, cost)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&self.user_id)
        .bind(&item.name)
        .bind(item.upc.as_deref().and_then(Self::non_blank))
        .bind(Self::non_blank(&item.brand))
        .bind(Self::non_blank(&item.category))
        .bind(Self::non_blank(&item.product_size))
        .bind(Self::non_blank(&item.quantity_available))
        .bind(Self::non_blank(&item.unit))
        .bind(Self::non_blank(&item.location))
        .bind(Self::non_blank(&item.notes))
        .bind(Self::non_blank(&item.low_threshold))
        .bind(Self::non_blank(&item.image_url))
        .bind(&item.decrement_step)
        .bind(Self::non_blank(&item.cost))
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(result.last_insert_rowid())
    }

    async fn adjust_quantity(
        &self,
        upc: Option<&str>,
        name: &str,
        delta: Decimal,
    ) -> Result<(), StoreError> {
        let row: Option<(i64, Option<String>)> = match upc.and_then(Self::non_blank) {
            Some(upc) => {
                sqlx::query_as(
                    "SELECT id, quantity_available FROM inventory_items \
                     WHERE user_id = ? AND upc = ? LIMIT 1",
                )
                .bind(&self.user_id)
                .bind(upc)
                .fetch_optional(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(
                    "SELECT id, quantity_available FROM inventory_items \
                     WHERE user_id = ? AND LOWER(name) = LOWER(?) LIMIT 1",
                )
                .bind(&self.user_id)
                .bind(name)
                .fetch_optional(&self.pool)
                .await
            }
        }
        .map_err(|e| StoreError::Database(e.to_string()))?;

        let Some((id, current)) = row else {
            return Err(StoreError::NoMatchingItem(name.to_string()));
        };

        // Absent or unparsable stored quantity counts as zero.
        let current = current
            .as_deref()
            .and_then(parse_quantity)
            .unwrap_or(Decimal::ZERO);
        let updated = format_quantity(current + delta);

        sqlx::query(
            "UPDATE inventory_items SET quantity_available = ?, \
             updated_at = datetime('now') WHERE id = ?",
        )
        .bind(&updated)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(id, %updated, "adjusted inventory quantity");
        Ok(())
    }
}
