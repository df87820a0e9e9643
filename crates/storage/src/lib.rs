pub mod db;
pub mod inventory;

pub use db::{create_db, create_memory_db, DbPool};
pub use inventory::SqliteInventoryStore;
