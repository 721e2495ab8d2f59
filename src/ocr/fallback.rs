use crate::domain::model::ImageInput;
use crate::domain::ports::OcrEngine;
use crate::utils::error::{AnalyzerError, Result};

/// Runs `primary`, switching to `fallback` only when the primary engine
/// reports itself unavailable.
pub struct FallbackEngine<P: OcrEngine, F: OcrEngine> {
    primary: P,
    fallback: F,
    name: String,
}

impl<P: OcrEngine, F: OcrEngine> FallbackEngine<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        let name = format!("{}+{}", primary.name(), fallback.name());
        Self {
            primary,
            fallback,
            name,
        }
    }
}

impl<P: OcrEngine, F: OcrEngine> OcrEngine for FallbackEngine<P, F> {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract_text(&self, image: &ImageInput) -> Result<String> {
        match self.primary.extract_text(image) {
            Ok(text) => Ok(text),
            Err(AnalyzerError::EngineUnavailable { engine, reason }) => {
                tracing::error!("OCR extraction error: engine '{}' unavailable: {}", engine, reason);
                tracing::warn!(
                    "Falling back to {} OCR service since {} is not available",
                    self.fallback.name(),
                    engine
                );
                self.fallback.extract_text(image)
            }
            Err(e) => {
                tracing::error!("OCR extraction error: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::mock::{MockOcrEngine, SAMPLE_PRESCRIPTION};

    struct MissingEngine;

    impl OcrEngine for MissingEngine {
        fn name(&self) -> &str {
            "tesseract"
        }

        fn extract_text(&self, _image: &ImageInput) -> Result<String> {
            Err(AnalyzerError::EngineUnavailable {
                engine: "tesseract".to_string(),
                reason: "tesseract is not installed".to_string(),
            })
        }
    }

    struct BrokenEngine;

    impl OcrEngine for BrokenEngine {
        fn name(&self) -> &str {
            "broken"
        }

        fn extract_text(&self, _image: &ImageInput) -> Result<String> {
            Err(AnalyzerError::ExtractionError {
                message: "unreadable scan".to_string(),
            })
        }
    }

    struct FixedEngine(&'static str);

    impl OcrEngine for FixedEngine {
        fn name(&self) -> &str {
            "fixed"
        }

        fn extract_text(&self, _image: &ImageInput) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_uses_fallback_when_primary_missing() {
        let engine = FallbackEngine::new(MissingEngine, MockOcrEngine::new());
        assert_eq!(engine.name(), "tesseract+mock");
        let text = engine.extract_text(&ImageInput::Empty).unwrap();
        assert_eq!(text, SAMPLE_PRESCRIPTION);
    }

    #[test]
    fn test_primary_result_wins() {
        let engine = FallbackEngine::new(FixedEngine("Rx: Aspirin 81 mg"), MockOcrEngine::new());
        assert_eq!(engine.extract_text(&ImageInput::Empty).unwrap(), "Rx: Aspirin 81 mg");
    }

    #[test]
    fn test_other_errors_propagate() {
        let engine = FallbackEngine::new(BrokenEngine, MockOcrEngine::new());
        let err = engine.extract_text(&ImageInput::Empty).unwrap_err();
        assert!(matches!(err, AnalyzerError::ExtractionError { .. }));
    }
}
