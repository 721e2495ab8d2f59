use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct AnalysisEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> AnalysisEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting prescription analysis...");

        // Extract
        tracing::debug!("Extracting text...");
        let extracted = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} characters with '{}' engine",
            extracted.raw_text.len(),
            extracted.engine
        );

        // Transform
        tracing::debug!("Parsing prescription...");
        let report = self.pipeline.transform(extracted).await?;
        tracing::info!(
            "Found {} medications for patient {}",
            report.parsed_data.medications.len(),
            report.parsed_data.patient.as_deref().unwrap_or("<unknown>")
        );

        // Load
        tracing::debug!("Rendering output...");
        let output = self.pipeline.load(report).await?;
        tracing::debug!("Rendered {} bytes", output.len());

        Ok(output)
    }
}
