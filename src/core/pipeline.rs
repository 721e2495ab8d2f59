use crate::core::render::render;
use crate::domain::model::{ExtractedText, ImageInput, PrescriptionReport};
use crate::domain::ports::{ConfigProvider, OcrEngine, Pipeline};
use crate::ocr::validate_image;
use crate::text::TextProcessor;
use crate::utils::error::Result;
use std::time::Instant;

pub struct PrescriptionPipeline<E: OcrEngine, C: ConfigProvider> {
    engine: E,
    config: C,
    image: ImageInput,
    processor: TextProcessor,
}

impl<E: OcrEngine, C: ConfigProvider> PrescriptionPipeline<E, C> {
    pub fn new(engine: E, config: C, image: ImageInput) -> Self {
        let processor = TextProcessor::new(config.fuzzy_match_threshold(), config.expand_abbreviations());
        Self {
            engine,
            config,
            image,
            processor,
        }
    }
}

#[async_trait::async_trait]
impl<E: OcrEngine, C: ConfigProvider> Pipeline for PrescriptionPipeline<E, C> {
    async fn extract(&self) -> Result<ExtractedText> {
        let started_at = Instant::now();

        validate_image(&self.image, self.config.max_image_size_mb())?;

        tracing::debug!(
            "Running OCR engine '{}' on {}",
            self.engine.name(),
            self.image.describe()
        );
        let raw_text = self.engine.extract_text(&self.image)?;

        Ok(ExtractedText {
            engine: self.engine.name().to_string(),
            raw_text,
            started_at,
        })
    }

    async fn transform(&self, extracted: ExtractedText) -> Result<PrescriptionReport> {
        let (corrected_text, parsed_data) = self.processor.process(&extracted.raw_text);
        let processing_time_ms = extracted.started_at.elapsed().as_secs_f64() * 1000.0;

        tracing::info!(
            "Processed prescription in {:.2}ms ({} medications)",
            processing_time_ms,
            parsed_data.medications.len()
        );

        Ok(PrescriptionReport {
            success: true,
            engine: extracted.engine,
            raw_text: extracted.raw_text,
            corrected_text,
            parsed_data,
            processing_time_ms,
        })
    }

    async fn load(&self, report: PrescriptionReport) -> Result<String> {
        let format = self.config.output_format();
        tracing::debug!("Rendering report as {:?}", format);
        render(&report, format, self.config.pretty_output())
    }
}
