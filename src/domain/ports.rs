use crate::domain::model::{RawItem, RunReport, StoreOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;

/// A product search backend scoped to a single store.
pub trait ProductSearch: Send + Sync {
    /// Returns at most `limit` raw products for `query` at `store_id`.
    fn search(
        &self,
        store_id: u64,
        query: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<RawItem>>> + Send;
}

pub trait Storage: Send + Sync {
    /// Writes `data` to `path`, replacing any existing file, and returns where it landed.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn api_key(&self) -> &str;
    fn engine(&self) -> &str;
    fn store_ids(&self) -> &[u64];
    fn query(&self) -> &str;
    fn limit(&self) -> usize;
    fn output_path(&self) -> &str;
    fn csv_filename(&self) -> &str;
    fn xlsx_filename(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<StoreOutcome>>;
    async fn transform(&self, outcomes: Vec<StoreOutcome>) -> Result<RunReport>;
    async fn load(&self, report: &RunReport) -> Result<Vec<String>>;
}
