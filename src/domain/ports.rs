use crate::domain::model::{ExtractedText, ImageInput, PrescriptionReport};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Anything that turns an image into text.
pub trait OcrEngine: Send + Sync {
    fn name(&self) -> &str;
    fn extract_text(&self, image: &ImageInput) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn max_image_size_mb(&self) -> u64;
    fn fuzzy_match_threshold(&self) -> u8;
    fn expand_abbreviations(&self) -> bool;
    fn output_format(&self) -> OutputFormat;
    fn pretty_output(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
    Csv,
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ExtractedText>;
    async fn transform(&self, extracted: ExtractedText) -> Result<PrescriptionReport>;
    async fn load(&self, report: PrescriptionReport) -> Result<String>;
}
