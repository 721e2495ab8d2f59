use prescription_ocr::config::AppConfig;
use prescription_ocr::{
    AnalysisEngine, AnalyzerError, FallbackEngine, ImageInput, MockOcrEngine, OcrEngine,
    OutputFormat, PrescriptionPipeline, PrescriptionReport, Result,
};
use std::io::Write;
use tempfile::NamedTempFile;

struct UnavailableEngine;

impl OcrEngine for UnavailableEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn extract_text(&self, _image: &ImageInput) -> Result<String> {
        Err(AnalyzerError::EngineUnavailable {
            engine: "tesseract".to_string(),
            reason: "tesseract is not installed or it's not in your PATH".to_string(),
        })
    }
}

#[tokio::test]
async fn test_end_to_end_json_report() {
    let pipeline = PrescriptionPipeline::new(
        MockOcrEngine::new(),
        AppConfig::default(),
        ImageInput::Bytes(vec![0u8; 2048]),
    );
    let engine = AnalysisEngine::new(pipeline);

    let output = engine.run().await.unwrap();
    let report: PrescriptionReport = serde_json::from_str(&output).unwrap();

    assert!(report.success);
    assert_eq!(report.engine, "mock");
    let data = &report.parsed_data;
    assert_eq!(data.patient.as_deref(), Some("Jane Doe"));
    assert_eq!(data.doctor.as_deref(), Some("John Smith"));
    assert_eq!(data.refills, Some(2));
    assert_eq!(data.license.as_deref(), Some("MD12345"));

    let summary: Vec<(&str, &str)> = data
        .medications
        .iter()
        .map(|m| (m.name.as_str(), m.dosage.as_str()))
        .collect();
    assert_eq!(
        summary,
        [("Amoxicillin", "500 mg"), ("Ibuprofen", "400 mg"), ("Loratadine", "10 mg")]
    );
}

#[tokio::test]
async fn test_end_to_end_text_report_from_config_file() {
    let mut config_file = NamedTempFile::new().unwrap();
    config_file
        .write_all(b"[output]\nformat = \"text\"\n\n[processing]\nfuzzy_match_threshold = 85\n")
        .unwrap();
    let config = AppConfig::from_file(config_file.path()).unwrap();
    assert_eq!(config.output.format, OutputFormat::Text);

    let engine = AnalysisEngine::new(PrescriptionPipeline::new(
        MockOcrEngine::new(),
        config,
        ImageInput::Empty,
    ));
    let output = engine.run().await.unwrap();

    assert!(output.contains("Patient:  Jane Doe"));
    assert!(output.contains("Facility: City Medical Center"));
    assert!(output.contains("Date:     2024-03-15"));
    assert!(output.contains("Medications (3):"));
    assert!(output.contains("3. Loratadine 10 mg, once daily, for 30 days"));
}

#[tokio::test]
async fn test_fallback_engine_feeds_pipeline() {
    let engine = FallbackEngine::new(UnavailableEngine, MockOcrEngine::new());
    let mut config = AppConfig::default();
    config.output.format = OutputFormat::Csv;

    let output = AnalysisEngine::new(PrescriptionPipeline::new(engine, config, ImageInput::Empty))
        .run()
        .await
        .unwrap();

    let rows: Vec<&str> = output.lines().collect();
    assert_eq!(rows.len(), 4);
    assert!(rows[2].starts_with("Jane Doe,John Smith,03/15/2024,Ibuprofen,400 mg"));
}

#[tokio::test]
async fn test_unavailable_engine_without_fallback_fails() {
    let engine = AnalysisEngine::new(PrescriptionPipeline::new(
        UnavailableEngine,
        AppConfig::default(),
        ImageInput::Empty,
    ));

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, AnalyzerError::EngineUnavailable { .. }));
    assert_eq!(err.severity(), prescription_ocr::utils::error::ErrorSeverity::Medium);
}

#[tokio::test]
async fn test_oversized_image_is_rejected_before_ocr() {
    let mut config = AppConfig::default();
    config.ocr.max_image_size_mb = 1;
    let engine = AnalysisEngine::new(PrescriptionPipeline::new(
        MockOcrEngine::new(),
        config,
        ImageInput::Bytes(vec![0u8; 2 * 1024 * 1024]),
    ));

    let err = engine.run().await.unwrap_err();
    assert!(matches!(
        err,
        AnalyzerError::ImageTooLarge {
            size_bytes: 2097152,
            limit_mb: 1
        }
    ));
}

#[tokio::test]
async fn test_abbreviation_expansion_can_be_disabled() {
    struct FixedEngine;

    impl OcrEngine for FixedEngine {
        fn name(&self) -> &str {
            "fixed"
        }

        fn extract_text(&self, _image: &ImageInput) -> Result<String> {
            Ok("Patient: Sam Lee\nRx:\n1. Cetirizine 10 mg QD PO\n".to_string())
        }
    }

    let mut config = AppConfig::default();
    config.processing.expand_abbreviations = false;
    config.output.pretty = false;

    let output = AnalysisEngine::new(PrescriptionPipeline::new(FixedEngine, config, ImageInput::Empty))
        .run()
        .await
        .unwrap();
    let report: PrescriptionReport = serde_json::from_str(&output).unwrap();

    let med = &report.parsed_data.medications[0];
    assert_eq!(med.name, "Cetirizine");
    assert_eq!(med.instructions.as_deref(), Some("QD PO"));
    assert_eq!(med.frequency.as_deref(), Some("QD"));
    assert_eq!(med.route.as_deref(), Some("by mouth"));
}
