//! Safeway receipt layout: name / `<n> @ $<price>` / `Total:` quadruplets.
//!
//! Each item prints its name, a quantity-at-unit-price line, a line total,
//! and sometimes a UPC. Both the quantity and total lines must be present
//! for an item to be emitted; the cursor then advances past exactly the
//! consumed lines (3, or 4 when a UPC follows).

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::re;
use larder_core::ParsedReceiptItem;

re!(re_qty_at, r"^(\d+)\s+@\s+\$(\d+(?:\.\d{2})?)");
re!(re_total, r"^Total:\s*\$(\d+(?:\.\d{2})?)");
re!(re_upc, r"(?i)^UPC:\s*(\d{12,13})");

pub fn parse(text: &str) -> Vec<ParsedReceiptItem> {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let mut items = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let name = lines[i];
        let qty_caps = lines.get(i + 1).and_then(|l| re_qty_at().captures(l));
        let total_ok = lines.get(i + 2).is_some_and(|l| re_total().is_match(l));

        let Some(qty_caps) = qty_caps.filter(|_| total_ok) else {
            i += 1;
            continue;
        };

        let quantity = Decimal::from_str(&qty_caps[1]).ok();
        let cost = Decimal::from_str(&qty_caps[2]).ok();
        let (Some(quantity), Some(cost)) = (quantity, cost) else {
            i += 1;
            continue;
        };
        if quantity <= Decimal::ZERO {
            i += 1;
            continue;
        }

        let upc = lines
            .get(i + 3)
            .and_then(|l| re_upc().captures(l))
            .map(|caps| caps[1].to_string());

        i += if upc.is_some() { 4 } else { 3 };

        let mut item = ParsedReceiptItem::named(name);
        item.quantity = quantity;
        item.cost = cost;
        item.upc = upc;
        items.push(item);
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn quadruplet_with_upc() {
        let text = "LUCERNE MILK\n2 @ $3.49\nTotal: $6.98\nUPC: 012345678905\n";
        let items = parse(text);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "LUCERNE MILK");
        assert_eq!(items[0].quantity, dec("2"));
        assert_eq!(items[0].cost, dec("3.49"));
        assert_eq!(items[0].upc.as_deref(), Some("012345678905"));
    }

    #[test]
    fn triplet_without_upc() {
        let items = parse("EGGS LARGE\n1 @ $5.99\nTotal: $5.99\n");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].cost, dec("5.99"));
        assert!(items[0].upc.is_none());
    }

    #[test]
    fn cursor_advances_exactly_past_consumed_lines() {
        let text = "MILK\n2 @ $3.49\nTotal: $6.98\nUPC: 012345678905\n\
                    EGGS\n1 @ $5.99\nTotal: $5.99\n\
                    BREAD\n3 @ $2.00\nTotal: $6.00\n";
        let items = parse(text);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].name, "MILK");
        assert_eq!(items[1].name, "EGGS");
        assert_eq!(items[2].name, "BREAD");
    }

    #[test]
    fn missing_total_line_emits_nothing() {
        let items = parse("MILK\n2 @ $3.49\nSomething else\n");
        assert!(items.is_empty());
    }

    #[test]
    fn missing_qty_line_emits_nothing() {
        let items = parse("MILK\nTotal: $6.98\n");
        assert!(items.is_empty());
    }

    #[test]
    fn preamble_is_tolerated() {
        let text = "SAFEWAY STORE 999\nMILK\n2 @ $3.49\nTotal: $6.98\n";
        let items = parse(text);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "MILK");
    }
}
