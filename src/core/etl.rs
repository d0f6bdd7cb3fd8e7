use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs the whole batch. Output is only written once every address has
    /// been processed; an aborting error leaves no output behind.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting batch geocoding");

        // Extract
        let records = self.pipeline.extract().await?;
        tracing::info!("📂 Read {} address records", records.len());

        // Transform
        let outcome = self.pipeline.transform(records).await?;
        let summary = outcome.summary;
        tracing::info!(
            "✅ Geocoded {} addresses: {} matched, {} no match, {} failed",
            summary.total(),
            summary.matched,
            summary.no_match,
            summary.failed
        );

        // Load
        let output_path = self.pipeline.load(outcome).await?;
        tracing::info!("📁 Output saved to: {}", output_path);

        Ok(output_path)
    }
}
