use crate::core::{ClearanceRecord, RawItem};

/// Renames provider fields into [`ClearanceRecord`]s for one store.
///
/// `store_id` is taken from the caller, never from the payload.
pub fn normalize(store_id: u64, items: &[RawItem]) -> Vec<ClearanceRecord> {
    items
        .iter()
        .map(|item| ClearanceRecord {
            store_id,
            name: item.text_or_unknown("title"),
            price: item.text_or_unknown("price"),
            url: item.text_or_unknown("link"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::UNKNOWN;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawItem {
        serde_json::from_value(json!({ "data": value })).unwrap()
    }

    #[test]
    fn test_maps_title_price_link() {
        let items = vec![raw(json!({"title": "Drill", "price": "$49", "link": "http://x/1"}))];
        let records = normalize(625, &items);

        assert_eq!(
            records,
            vec![ClearanceRecord {
                store_id: 625,
                name: "Drill".to_string(),
                price: "$49".to_string(),
                url: "http://x/1".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_fields_become_unknown() {
        let records = normalize(635, &[raw(json!({"thumbnail": "t.png"}))]);
        assert_eq!(records[0].name, UNKNOWN);
        assert_eq!(records[0].price, UNKNOWN);
        assert_eq!(records[0].url, UNKNOWN);
    }

    #[test]
    fn test_payload_store_id_is_ignored() {
        let records = normalize(1017, &[raw(json!({"store_id": 9999, "title": "Saw"}))]);
        assert_eq!(records[0].store_id, 1017);
    }

    #[test]
    fn test_preserves_order() {
        let items = vec![
            raw(json!({"title": "A"})),
            raw(json!({"title": "B"})),
            raw(json!({"title": "C"})),
        ];
        let names: Vec<String> = normalize(625, &items).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }
}
