pub mod abbreviations;
pub mod cleanup;
pub mod correction;
pub mod medications;
pub mod medicine_db;
pub mod parser;

pub use correction::NameCorrector;
pub use parser::parse_prescription_text;

use crate::domain::model::PrescriptionData;

/// Turns raw OCR output into cleaned text plus structured prescription data.
pub struct TextProcessor {
    corrector: NameCorrector,
    expand_abbreviations: bool,
}

impl TextProcessor {
    pub fn new(fuzzy_match_threshold: u8, expand_abbreviations: bool) -> Self {
        Self {
            corrector: NameCorrector::new(fuzzy_match_threshold),
            expand_abbreviations,
        }
    }

    pub fn process(&self, raw_text: &str) -> (String, PrescriptionData) {
        let corrected = cleanup::normalize_lines(raw_text);
        let parsed = parse_prescription_text(&corrected, &self.corrector, self.expand_abbreviations);
        (corrected, parsed)
    }
}
