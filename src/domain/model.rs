use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentinel written for any product field the provider did not supply.
pub const UNKNOWN: &str = "Unknown";

/// Product object as returned by the search provider, before field renaming.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    pub data: HashMap<String, serde_json::Value>,
}

impl RawItem {
    /// Text of `key`, or [`UNKNOWN`] when it is absent or `null`.
    ///
    /// Non-string scalars such as a numeric price keep their JSON text.
    pub fn text_or_unknown(&self, key: &str) -> String {
        match self.data.get(key) {
            None | Some(serde_json::Value::Null) => UNKNOWN.to_string(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for RawItem {
    fn from(obj: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            data: obj.into_iter().collect(),
        }
    }
}

/// Normalized output row. Field order is the column order of both exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearanceRecord {
    pub store_id: u64,
    pub name: String,
    pub price: String,
    pub url: String,
}

impl ClearanceRecord {
    pub const HEADERS: [&'static str; 4] = ["store_id", "name", "price", "url"];
}

/// What happened when one store was queried.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOutcome {
    Fetched { store_id: u64, items: Vec<RawItem> },
    Failed { store_id: u64, reason: String },
}

impl StoreOutcome {
    pub fn store_id(&self) -> u64 {
        match self {
            StoreOutcome::Fetched { store_id, .. } | StoreOutcome::Failed { store_id, .. } => {
                *store_id
            }
        }
    }

    /// Items of a successful fetch; a failed fetch contributes nothing.
    pub fn items(&self) -> &[RawItem] {
        match self {
            StoreOutcome::Fetched { items, .. } => items,
            StoreOutcome::Failed { .. } => &[],
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, StoreOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub outcomes: Vec<StoreOutcome>,
    pub records: Vec<ClearanceRecord>,
    pub outputs: Vec<String>,
}

impl RunReport {
    pub fn failed_stores(&self) -> Vec<u64> {
        self.outcomes
            .iter()
            .filter(|o| o.is_failure())
            .map(StoreOutcome::store_id)
            .collect()
    }

    pub fn records_for(&self, store_id: u64) -> usize {
        self.records
            .iter()
            .filter(|r| r.store_id == store_id)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: serde_json::Value) -> RawItem {
        match value {
            serde_json::Value::Object(obj) => RawItem::from(obj),
            _ => panic!("test item must be an object"),
        }
    }

    #[test]
    fn text_or_unknown_handles_missing_null_and_numbers() {
        let raw = item(json!({"title": "Drill", "price": 49.0, "link": null}));
        assert_eq!(raw.text_or_unknown("title"), "Drill");
        assert_eq!(raw.text_or_unknown("price"), "49.0");
        assert_eq!(raw.text_or_unknown("link"), UNKNOWN);
        assert_eq!(raw.text_or_unknown("thumbnail"), UNKNOWN);
    }

    #[test]
    fn empty_string_is_kept() {
        let raw = item(json!({"title": ""}));
        assert_eq!(raw.text_or_unknown("title"), "");
    }

    #[test]
    fn failed_outcome_has_no_items() {
        let outcome = StoreOutcome::Failed {
            store_id: 1007,
            reason: "timeout".to_string(),
        };
        assert!(outcome.is_failure());
        assert_eq!(outcome.store_id(), 1007);
        assert!(outcome.items().is_empty());
    }

    #[test]
    fn report_lists_failed_stores_in_order() {
        let report = RunReport {
            outcomes: vec![
                StoreOutcome::Failed {
                    store_id: 635,
                    reason: "x".into(),
                },
                StoreOutcome::Fetched {
                    store_id: 625,
                    items: vec![],
                },
                StoreOutcome::Failed {
                    store_id: 1007,
                    reason: "y".into(),
                },
            ],
            ..Default::default()
        };
        assert_eq!(report.failed_stores(), vec![635, 1007]);
    }
}
