use crate::core::{ProductSearch, StoreOutcome};
use crate::utils::error::ScoutError;

fn failure_reason(error: &ScoutError) -> String {
    match error {
        ScoutError::ProviderError { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

/// Console line for a store whose fetch failed. The store is named once.
pub fn fetch_failure_message(store_id: u64, error: &ScoutError) -> String {
    format!(
        "Error fetching items for store {}: {}",
        store_id,
        failure_reason(error)
    )
}

/// Queries one store, converting any provider failure into a `Failed` outcome.
///
/// The result never holds more than `limit` items, whatever the backend returned.
pub async fn fetch_clearance_items<S: ProductSearch>(
    search: &S,
    store_id: u64,
    query: &str,
    limit: usize,
) -> StoreOutcome {
    match search.search(store_id, query, limit).await {
        Ok(mut items) => {
            items.truncate(limit);
            tracing::debug!(store_id, count = items.len(), "fetched products");
            StoreOutcome::Fetched { store_id, items }
        }
        Err(e) => {
            println!("{}", fetch_failure_message(store_id, &e));
            tracing::warn!(store_id, error = %e, "store fetch failed, continuing");
            StoreOutcome::Failed {
                store_id,
                reason: failure_reason(&e),
            }
        }
    }
}
