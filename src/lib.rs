pub mod config;
pub mod core;
pub mod domain;
pub mod ocr;
pub mod text;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::AppConfig;

pub use crate::core::{etl::AnalysisEngine, pipeline::PrescriptionPipeline};
pub use domain::model::{ImageInput, Medication, PrescriptionData, PrescriptionReport};
pub use domain::ports::{ConfigProvider, OcrEngine, OutputFormat, Pipeline};
pub use ocr::{
    extract_text_from_image, extract_text_from_image_mock, FallbackEngine, MockOcrEngine,
    SAMPLE_PRESCRIPTION,
};
pub use utils::error::{AnalyzerError, Result};
