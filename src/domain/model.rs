use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Opaque handle to the image being analyzed. Paths are carried, never opened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImageInput {
    #[default]
    Empty,
    Bytes(Vec<u8>),
    Path(PathBuf),
}

impl ImageInput {
    /// Size of in-memory image data, `None` for paths and empty input.
    pub fn len_bytes(&self) -> Option<usize> {
        match self {
            ImageInput::Bytes(bytes) => Some(bytes.len()),
            ImageInput::Empty | ImageInput::Path(_) => None,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ImageInput::Empty => "<empty>".to_string(),
            ImageInput::Bytes(bytes) => format!("<{} bytes>", bytes.len()),
            ImageInput::Path(path) => path.display().to_string(),
        }
    }
}

impl From<Vec<u8>> for ImageInput {
    fn from(bytes: Vec<u8>) -> Self {
        ImageInput::Bytes(bytes)
    }
}

impl From<PathBuf> for ImageInput {
    fn from(path: PathBuf) -> Self {
        ImageInput::Path(path)
    }
}

impl<T: Into<ImageInput>> From<Option<T>> for ImageInput {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub form: Option<String>,
    pub route: Option<String>,
    pub frequency: Option<String>,
    pub duration: Option<String>,
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescriptionData {
    pub patient: Option<String>,
    pub doctor: Option<String>,
    pub hospital: Option<String>,
    pub date: Option<String>,
    pub issued_on: Option<NaiveDate>,
    pub medications: Vec<Medication>,
    pub refills: Option<u32>,
    pub license: Option<String>,
    pub notes: Option<String>,
}

/// Text returned by the extract stage, handed to transform.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub engine: String,
    pub raw_text: String,
    pub started_at: std::time::Instant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionReport {
    pub success: bool,
    pub engine: String,
    pub raw_text: String,
    pub corrected_text: String,
    pub parsed_data: PrescriptionData,
    pub processing_time_ms: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_input_conversions() {
        assert_eq!(ImageInput::from(None::<Vec<u8>>), ImageInput::Empty);
        assert_eq!(ImageInput::from(vec![1u8, 2, 3]).len_bytes(), Some(3));
        let path = ImageInput::from(PathBuf::from("scans/rx.png"));
        assert_eq!(path.len_bytes(), None);
        assert_eq!(path.describe(), "scans/rx.png");
    }

    #[test]
    fn test_prescription_data_serializes_missing_fields_as_null() {
        let data = PrescriptionData {
            patient: Some("Jane Doe".to_string()),
            issued_on: NaiveDate::from_ymd_opt(2024, 3, 15),
            ..Default::default()
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["patient"], "Jane Doe");
        assert_eq!(json["issued_on"], "2024-03-15");
        assert!(json["doctor"].is_null());
        assert_eq!(json["medications"], serde_json::json!([]));
    }
}
