//! Fred Meyer receipt layout: items grouped under a header line.
//!
//! A header looks like `Milk, 32oz` — name, comma, size with a known unit
//! token. Every line after it (until the next header) refines the open
//! item: a `$3.99` cost line, a `2 x $2.99` / `1.86 lbs x $1.98` quantity
//! line, sale/coupon notes, or a `UPC: …` line. Lines before the first
//! header are receipt preamble and are skipped.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::re;
use larder_core::ParsedReceiptItem;

re!(re_header,
    r"(?i)^(?P<name>.*?),\s*(?P<size>\d+(?:\.\d+)?\s?(?:fl oz|oz|lb|g|kg|ct|pack|dozen|ml|L))$");
re!(re_cost, r"^\$(\d+(?:\.\d{2})?)$");
re!(re_qty, r"(?i)^([\d.]+)\s*(lbs|x)(?:\s*x)?\s*\$([\d.]+)");
re!(re_upc, r"(?i)^UPC:\s*(\d{12,13})");

pub fn parse(text: &str) -> Vec<ParsedReceiptItem> {
    let lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    let mut items = Vec::new();
    let mut current: Option<ParsedReceiptItem> = None;

    for line in lines {
        if let Some(caps) = re_header().captures(line) {
            if let Some(done) = current.take() {
                items.push(done);
            }
            let mut item = ParsedReceiptItem::named(caps["name"].trim());
            item.product_size = Some(caps["size"].trim().to_string());
            item.unit = Some("each".to_string());
            current = Some(item);
            continue;
        }

        // Preamble before the first header.
        let Some(item) = current.as_mut() else {
            continue;
        };

        if let Some(caps) = re_cost().captures(line) {
            if let Ok(cost) = Decimal::from_str(&caps[1]) {
                item.cost = cost;
            }
        }

        if let Some(caps) = re_qty().captures(line) {
            // Malformed tokens like "1.2.3" fail here and the line is
            // silently dropped — lenient-parse policy.
            if let Ok(qty) = Decimal::from_str(&caps[1]) {
                if qty > Decimal::ZERO {
                    item.quantity = qty;
                    let unit = if caps[2].eq_ignore_ascii_case("lbs") { "lb" } else { "each" };
                    item.unit = Some(unit.to_string());
                }
            }
        }

        let lower = line.to_lowercase();
        if lower.contains("coupon") || lower.contains("sale") {
            let notes = item.notes.get_or_insert_with(String::new);
            if !notes.is_empty() {
                notes.push_str("; ");
            }
            notes.push_str(line);
        }

        if let Some(caps) = re_upc().captures(line) {
            item.upc = Some(caps[1].to_string());
        }
    }

    if let Some(done) = current {
        items.push(done);
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
    fn single_item_with_cost_and_quantity() {
        let items = parse("Milk, 32oz\n$3.99\n1 x $3.99\n");
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.name, "Milk");
        assert_eq!(item.product_size.as_deref(), Some("32oz"));
        assert_eq!(item.cost, dec("3.99"));
        assert_eq!(item.quantity, dec("1"));
        assert_eq!(item.unit.as_deref(), Some("each"));
    }

    #[test]
    fn weighed_item_uses_lb_unit() {
        let items = parse("Bananas, 3 lb\n1.86 lbs x $0.59\n$1.10\n");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, dec("1.86"));
        assert_eq!(items[0].unit.as_deref(), Some("lb"));
        assert_eq!(items[0].cost, dec("1.10"));
    }

    #[test]
    fn one_item_per_header_line() {
        let text = "Milk, 32oz\n$3.99\nEggs, 12ct\n$5.49\nJuice, 64 fl oz\n$4.29\n";
        let items = parse(text);
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|i| i.cost >= Decimal::ZERO));
        assert!(items.iter().all(|i| i.quantity > Decimal::ZERO));
        assert_eq!(items[2].name, "Juice");
        assert_eq!(items[2].product_size.as_deref(), Some("64 fl oz"));
    }

    #[test]
    fn preamble_lines_are_skipped() {
        let text = "FRED MEYER\n123 Main St\n$9.99\nMilk, 32oz\n$3.99\n";
        let items = parse(text);
        assert_eq!(items.len(), 1);
        // The stray preamble "$9.99" must not leak into the item.
        assert_eq!(items[0].cost, dec("3.99"));
    }

    #[test]
    fn notes_are_semicolon_joined() {
        let text = "Milk, 32oz\nMega Sale -$0.50\nDigital Coupon -$0.25\n";
        let items = parse(text);
        assert_eq!(
            items[0].notes.as_deref(),
            Some("Mega Sale -$0.50; Digital Coupon -$0.25")
        );
    }

    #[test]
    fn upc_line_is_captured() {
        let items = parse("Milk, 32oz\nUPC: 012345678905\n");
        assert_eq!(items[0].upc.as_deref(), Some("012345678905"));
    }

    #[test]
    fn trailing_item_is_flushed() {
        let items = parse("Milk, 32oz");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, Decimal::ONE);
        assert_eq!(items[0].cost, Decimal::ZERO);
    }

    #[test]
    fn malformed_quantity_token_is_skipped() {
        let items = parse("Milk, 32oz\n1.2.3 x $3.99\n");
        assert_eq!(items[0].quantity, Decimal::ONE);
    }

    #[test]
    fn empty_input_yields_no_items() {
        assert!(parse("").is_empty());
        assert!(parse("\n  \n").is_empty());
    }
}
