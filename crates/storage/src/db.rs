use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use std::path::Path;

pub type DbPool = Pool<Sqlite>;

pub async fn create_db(path: &Path) -> Result<DbPool, sqlx::Error> {
    connect(&format!("sqlite:{}?mode=rwc", path.display())).await
}

/// In-memory database, mainly for tests. A single connection keeps the
/// memory database alive and shared.
pub async fn create_memory_db() -> Result<DbPool, sqlx::Error> {
    connect("sqlite::memory:").await
}

async fn connect(url: &str) -> Result<DbPool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(url)
        .await?;

    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&pool)
        .await?;
    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    // `upc` is intentionally NOT unique: several items may share a barcode
    // (repackaged sizes) or lack one entirely.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS inventory_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            upc TEXT,
            brand TEXT,
            category TEXT,
            product_size TEXT,
            quantity_available TEXT,
            unit TEXT,
            location TEXT,
            notes TEXT,
            low_threshold TEXT,
            image_url TEXT,
            decrement_step TEXT NOT NULL,
            cost TEXT,
            added_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_inventory_items_user ON inventory_items(user_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
