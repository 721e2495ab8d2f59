pub mod fallback;
pub mod mock;

pub use fallback::FallbackEngine;
pub use mock::{extract_text_from_image, extract_text_from_image_mock, MockOcrEngine, SAMPLE_PRESCRIPTION};

use crate::domain::model::ImageInput;
use crate::utils::error::{AnalyzerError, Result};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Rejects in-memory images above the configured size limit.
pub fn validate_image(image: &ImageInput, max_image_size_mb: u64) -> Result<()> {
    if let Some(size_bytes) = image.len_bytes() {
        if size_bytes as u64 > max_image_size_mb.saturating_mul(BYTES_PER_MB) {
            return Err(AnalyzerError::ImageTooLarge {
                size_bytes,
                limit_mb: max_image_size_mb,
            });
        }
    }
    Ok(())
}
