use crate::core::export::ExportFormat;
use crate::core::fetcher::fetch_clearance_items;
use crate::core::normalizer::normalize;
use crate::core::{ConfigProvider, Pipeline, ProductSearch, RunReport, Storage, StoreOutcome};
use crate::utils::error::Result;

pub struct ClearancePipeline<P: ProductSearch, S: Storage, C: ConfigProvider> {
    search: P,
    storage: S,
    config: C,
}

impl<P: ProductSearch, S: Storage, C: ConfigProvider> ClearancePipeline<P, S, C> {
    pub fn new(search: P, storage: S, config: C) -> Self {
        Self {
            search,
            storage,
            config,
        }
    }

    fn exports(&self) -> [(ExportFormat, &str); 2] {
        [
            (ExportFormat::Csv, self.config.csv_filename()),
            (ExportFormat::Xlsx, self.config.xlsx_filename()),
        ]
    }
}

#[async_trait::async_trait]
impl<P: ProductSearch, S: Storage, C: ConfigProvider> Pipeline for ClearancePipeline<P, S, C> {
    async fn extract(&self) -> Result<Vec<StoreOutcome>> {
        let store_ids = self.config.store_ids();
        println!("Searching for clearance items in stores: {:?}\n", store_ids);

        let mut outcomes = Vec::with_capacity(store_ids.len());
        for &store_id in store_ids {
            println!("Fetching items for store ID: {}...", store_id);
            let outcome = fetch_clearance_items(
                &self.search,
                store_id,
                self.config.query(),
                self.config.limit(),
            )
            .await;
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    async fn transform(&self, outcomes: Vec<StoreOutcome>) -> Result<RunReport> {
        let records = outcomes
            .iter()
            .flat_map(|outcome| normalize(outcome.store_id(), outcome.items()))
            .collect();

        Ok(RunReport {
            outcomes,
            records,
            outputs: Vec::new(),
        })
    }

    async fn load(&self, report: &RunReport) -> Result<Vec<String>> {
        let mut written = Vec::new();

        for (format, filename) in self.exports() {
            let data = format.render(&report.records)?;
            tracing::debug!(
                "Writing {} export ({} bytes) to storage",
                format.extension(),
                data.len()
            );
            let path = self.storage.write_file(filename, &data).await?;
            println!("Results saved to {}", path);
            written.push(path);
        }

        Ok(written)
    }
}
