use crate::core::ClearanceRecord;

pub const NO_PRODUCTS: &str = "No products found.";

const RULE_WIDTH: usize = 120;

/// Builds the fixed-width results table. Values wider than a column are not cut.
pub fn render_table(records: &[ClearanceRecord]) -> String {
    if records.is_empty() {
        return NO_PRODUCTS.to_string();
    }

    let mut lines = Vec::with_capacity(records.len() + 2);
    lines.push(format!("{:<10} {:<50} {:<10} {}", "Store ID", "Name", "Price", "URL"));
    lines.push("-".repeat(RULE_WIDTH));
    for record in records {
        lines.push(format!(
            "{:<10} {:<50} {:<10} {}",
            record.store_id, record.name, record.price, record.url
        ));
    }
    lines.join("\n")
}

pub fn display_items(records: &[ClearanceRecord]) {
    println!("{}", render_table(records));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> ClearanceRecord {
        ClearanceRecord {
            store_id: 625,
            name: name.to_string(),
            price: "$49".to_string(),
            url: "http://x/1".to_string(),
        }
    }

    #[test]
    fn test_empty_prints_notice() {
        assert_eq!(render_table(&[]), "No products found.");
    }

    #[test]
    fn test_header_rule_and_rows() {
        let table = render_table(&[record("Drill")]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Store ID   Name"));
        assert_eq!(lines[1], "-".repeat(120));
        assert_eq!(&lines[2][..11], "625        ");
        assert_eq!(&lines[2][11..61], format!("{:<50}", "Drill"));
        assert!(lines[2].ends_with("$49        http://x/1"));
    }

    #[test]
    fn test_long_names_are_not_truncated() {
        let long = "x".repeat(70);
        let table = render_table(&[record(&long)]);
        assert!(table.contains(&long));
    }
}
