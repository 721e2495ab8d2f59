pub mod etl;
pub mod pipeline;
pub mod render;

pub use crate::domain::model::{ExtractedText, PrescriptionReport};
pub use crate::domain::ports::{ConfigProvider, OcrEngine, OutputFormat, Pipeline};
pub use crate::utils::error::Result;
