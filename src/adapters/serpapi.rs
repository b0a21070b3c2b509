use crate::core::{ConfigProvider, ProductSearch, RawItem};
use crate::utils::error::{Result, ScoutError};
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://serpapi.com/search.json";
pub const DEFAULT_ENGINE: &str = "home_depot";

/// SerpApi-backed [`ProductSearch`].
///
/// The API key travels only as a query parameter; it is stripped from
/// every error before the error leaves this module.
pub struct SerpApiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    engine: String,
}

impl SerpApiClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        engine: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            engine: engine.into(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_seconds() {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| ScoutError::ApiError(e.without_url()))?;

        Ok(Self {
            client,
            endpoint: config.api_endpoint().to_string(),
            api_key: config.api_key().to_string(),
            engine: config.engine().to_string(),
        })
    }
}

impl ProductSearch for SerpApiClient {
    async fn search(&self, store_id: u64, query: &str, limit: usize) -> Result<Vec<RawItem>> {
        let store = store_id.to_string();
        tracing::debug!(store_id, engine = %self.engine, "Requesting products from {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("engine", self.engine.as_str()),
                ("store_id", store.as_str()),
                ("q", query),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ScoutError::ApiError(e.without_url()))?;

        let status = response.status();
        tracing::debug!(store_id, "API response status: {}", status);
        let body = response
            .text()
            .await
            .map_err(|e| ScoutError::ApiError(e.without_url()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| provider_error(&v))
                .unwrap_or_else(|| format!("HTTP {}", status));
            return Err(ScoutError::ProviderError { store_id, message });
        }

        let json: serde_json::Value = serde_json::from_str(&body)?;
        parse_products(store_id, json, limit)
    }
}

fn provider_error(json: &serde_json::Value) -> Option<String> {
    json.get("error").and_then(|e| e.as_str()).map(str::to_string)
}

/// SerpApi reports an empty result set through `error` on an otherwise successful search.
fn is_empty_result(json: &serde_json::Value, message: &str) -> bool {
    let succeeded = json
        .get("search_metadata")
        .and_then(|m| m.get("status"))
        .and_then(|s| s.as_str())
        == Some("Success");
    succeeded || message.contains("hasn't returned any results")
}

/// Takes the first `limit` objects of the `products` array.
///
/// A missing `products` key, or a "no results" notice, means the store had no matches.
pub fn parse_products(store_id: u64, json: serde_json::Value, limit: usize) -> Result<Vec<RawItem>> {
    if let Some(message) = provider_error(&json) {
        if is_empty_result(&json, &message) {
            tracing::debug!(store_id, "{}", message);
            return Ok(Vec::new());
        }
        return Err(ScoutError::ProviderError { store_id, message });
    }

    let serde_json::Value::Object(mut root) = json else {
        return Err(ScoutError::ProviderError {
            store_id,
            message: "response is not a JSON object".to_string(),
        });
    };

    match root.remove("products") {
        None | Some(serde_json::Value::Null) => Ok(Vec::new()),
        Some(serde_json::Value::Array(products)) => Ok(products
            .into_iter()
            .filter_map(|p| match p {
                serde_json::Value::Object(obj) => Some(RawItem::from(obj)),
                _ => None,
            })
            .take(limit)
            .collect()),
        Some(_) => Err(ScoutError::ProviderError {
            store_id,
            message: "'products' is not an array".to_string(),
        }),
    }
}
