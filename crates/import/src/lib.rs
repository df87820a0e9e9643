pub mod fred_meyer;
pub mod match_engine;
pub mod normalize;
pub mod receipt;
pub mod reconcile;
pub mod safeway;
pub mod walmart;

pub use match_engine::{
    find_matching_item, is_product_size_compatible, size_conflict, InventoryMatch, MatchKind,
};
pub use normalize::{convert_parsed_to_manual, guess_decrement_step};
pub use receipt::{parse_for_store, parse_receipt_text, StoreFormat};
pub use reconcile::{
    default_action, CommitFailure, CommitReport, ItemAction, ReconcileError, ReconcileSession,
    ReconciliationEntry,
};

/// Lazily compiled, process-wide cached regex.
macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static regex::Regex {
            static R: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
            R.get_or_init(|| regex::Regex::new($pat).expect("invalid regex"))
        }
    };
}
pub(crate) use re;

pub mod pipeline {
    use crate::*;
    use larder_core::{InventoryItem, ParsedReceiptItem};

    /// Parse with a raw store id, tolerating unknown ids (empty result).
    pub fn parse_receipt(text: &str, store_id: &str) -> Vec<ParsedReceiptItem> {
        parse_for_store(text, store_id)
    }

    /// Parse → normalize → match, producing the review list.
    pub fn review(
        text: &str,
        format: StoreFormat,
        inventory: &[InventoryItem],
    ) -> ReconcileSession {
        ReconcileSession::from_receipt(text, format, inventory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_review_builds_a_session() {
        let session = pipeline::review("BREAD\n$2.48\n", StoreFormat::Walmart, &[]);
        assert_eq!(session.len(), 1);
        assert_eq!(session.entries()[0].item.name, "BREAD");
    }

    #[test]
    fn pipeline_parse_tolerates_unknown_store() {
        assert!(pipeline::parse_receipt("BREAD\n$2.48\n", "costco").is_empty());
        assert_eq!(pipeline::parse_receipt("BREAD\n$2.48\n", "walmart").len(), 1);
    }
}
