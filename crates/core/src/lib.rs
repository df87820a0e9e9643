pub mod item;
pub mod quantity;
pub mod store;

pub use item::{InventoryItem, ManualInventoryInput, ParsedReceiptItem};
pub use quantity::{format_cost, format_quantity, parse_quantity};
pub use store::{InventoryStore, StoreError};
