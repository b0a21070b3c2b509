use crate::core::presenter::display_items;
use crate::core::{Pipeline, RunReport};
use crate::utils::error::Result;

/// Runs fetch → normalize → present → export once, strictly in that order.
pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("Starting clearance search");

        let outcomes = self.pipeline.extract().await?;
        let mut report = self.pipeline.transform(outcomes).await?;
        tracing::info!(
            stores = report.outcomes.len(),
            records = report.records.len(),
            "Normalized search results"
        );

        display_items(&report.records);

        report.outputs = self.pipeline.load(&report).await?;

        let failed = report.failed_stores();
        if failed.is_empty() {
            tracing::info!("All stores fetched successfully");
        } else {
            // Failed and empty stores export identically; only this summary separates them.
            tracing::warn!(
                "{} of {} stores could not be fetched: {:?}",
                failed.len(),
                report.outcomes.len(),
                failed
            );
        }

        Ok(report)
    }
}
