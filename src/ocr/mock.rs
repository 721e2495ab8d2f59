//! Canned OCR output for tests and environments without an OCR engine.
//!
//! The extractor ignores its input entirely and always yields
//! [`SAMPLE_PRESCRIPTION`]. Each call emits a single info event so that a
//! mock result is never mistaken for a real scan in the logs.

use crate::domain::model::ImageInput;
use crate::domain::ports::OcrEngine;
use crate::utils::error::Result;

pub const SAMPLE_PRESCRIPTION: &str = "
    Dr. John Smith, M.D.
    City Medical Center
    123 Health Street, Springfield
    Phone: (555) 123-4567

    Patient: Jane Doe
    Date: 03/15/2024

    Rx:
    1. Amoxicillin 500mg - Take 1 capsule three times daily for 10 days
    2. Ibuprofen 400mg - Take 1 tablet every 6 hours as needed for pain for 5 days
    3. Loratadine 10mg - Take 1 tablet once daily for 30 days

    Refills: 2

    Signature: John Smith, M.D.
    License: MD12345
    ";

/// Returns the sample prescription text for any image.
pub fn extract_text_from_image_mock<T: ?Sized>(_image: &T) -> &'static str {
    tracing::info!("Using mock OCR service instead of a real OCR engine");
    SAMPLE_PRESCRIPTION
}

pub use self::extract_text_from_image_mock as extract_text_from_image;

#[derive(Debug, Clone, Copy, Default)]
pub struct MockOcrEngine;

impl MockOcrEngine {
    pub fn new() -> Self {
        Self
    }
}

impl OcrEngine for MockOcrEngine {
    fn name(&self) -> &str {
        "mock"
    }

    fn extract_text(&self, image: &ImageInput) -> Result<String> {
        tracing::debug!("Mock OCR ignoring image {}", image.describe());
        Ok(extract_text_from_image_mock(image).to_string())
    }
}
