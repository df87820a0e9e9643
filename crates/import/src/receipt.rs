use larder_core::ParsedReceiptItem;
use serde::{Deserialize, Serialize};

use crate::{fred_meyer, safeway, walmart};

/// The fixed set of retailer layouts the parsers understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreFormat {
    FredMeyer,
    Walmart,
    Safeway,
}

impl std::fmt::Display for StoreFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreFormat::FredMeyer => write!(f, "fredmeyer"),
            StoreFormat::Walmart => write!(f, "walmart"),
            StoreFormat::Safeway => write!(f, "safeway"),
        }
    }
}

impl std::str::FromStr for StoreFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fredmeyer" => Ok(StoreFormat::FredMeyer),
            "walmart" => Ok(StoreFormat::Walmart),
            "safeway" => Ok(StoreFormat::Safeway),
            other => Err(format!("Unknown store format: '{other}'")),
        }
    }
}

/// Parse raw receipt text with the parser for `format`.
///
/// Parsing is lenient and infallible: lines that fit no pattern are
/// skipped, and zero items is a valid (if unhelpful) outcome.
pub fn parse_receipt_text(text: &str, format: StoreFormat) -> Vec<ParsedReceiptItem> {
    match format {
        StoreFormat::FredMeyer => fred_meyer::parse(text),
        StoreFormat::Walmart => walmart::parse(text),
        StoreFormat::Safeway => safeway::parse(text),
    }
}

/// String-id dispatch for callers holding a raw store selector.
///
/// An unknown id yields an empty list instead of an error, so a stale or
/// misspelled selector degrades to "no items" rather than a failure. The
/// miss is logged.
pub fn parse_for_store(text: &str, store_id: &str) -> Vec<ParsedReceiptItem> {
    match store_id.parse::<StoreFormat>() {
        Ok(format) => parse_receipt_text(text, format),
        Err(_) => {
            tracing::warn!(store_id, "unknown store format selector, parsing nothing");
            Vec::new()
        }
    }
}
