//! Rule-based medication extraction.
//!
//! Works line by line: a line describes a medication when it carries a
//! dosage (`500 mg`, `1 tablet`, ...). The text before the dosage is the
//! drug name, the text after it the administration instructions. When a
//! line stops right after the dosage, the following unnumbered line is
//! taken as its instructions unless it describes another medication.

use crate::domain::model::Medication;
use crate::text::abbreviations::{contains_abbreviation, expand_medical_abbreviations, meaning_of};
use crate::text::correction::NameCorrector;
use crate::text::medicine_db::category_of;
use once_cell::sync::Lazy;
use regex::Regex;

static DOSAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(\d+(?:\.\d+)?)\s*(mcg|mg|ml|g|tablets?|capsules?|tablespoons?|teaspoons?)\b(?:\s+(tablets?|capsules?|syrup|suspension|injection|cream|drops))?",
    )
    .expect("dosage pattern is valid")
});

static FREQUENCY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:",
        r"(?:once|twice|three times|four times|\d+\s*times?)(?:\s+(?:a|per)\s+(?:day|week))?(?:\s+(?:daily|weekly))?",
        r"|every\s+\d+(?:\s*-\s*\d+)?\s*hours?",
        r"|daily|weekly|monthly",
        r"|(?:in the\s+)?(?:morning|evening)",
        r"|at (?:night|bedtime)",
        r"|(?:before|after|with)\s+meals?",
        r"|as needed",
        r"|(?-i:QD|BID|TID|QID|PRN|HS|AC|PC)",
        r")\b",
    ))
    .expect("frequency pattern is valid")
});

static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bfor\s+(\d+\s*(?:days?|weeks?|months?))\b").expect("duration pattern is valid")
});

static ROUTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(oral(?:ly)?|by mouth|topical(?:ly)?|subcutaneous|intramuscular|intravenous|sublingual|buccal|rectal|vaginal|inhaled|nasal)\b",
    )
    .expect("route pattern is valid")
});

static ROUTE_ABBREVIATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(PO|SC|SQ|IM|IV)\b").expect("route abbreviation pattern is valid"));

static NUMBERING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:\d+\s*[.)]|[•*])\s*").expect("numbering pattern is valid"));

static INSTRUCTION_VERB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:take|apply|use|give|inhale|instill|dissolve|chew)\b").expect("verb pattern is valid")
});

fn is_numbered(line: &str) -> bool {
    NUMBERING_RE.is_match(line) && !line.trim().is_empty()
}

fn is_candidate(line: &str) -> bool {
    let lower = line.to_lowercase();
    is_numbered(line)
        || ["tab", "capsule", "mg", "ml"].iter().any(|keyword| lower.contains(keyword))
        || contains_abbreviation(line)
}

fn clean_name(prefix: &str) -> Option<String> {
    let name = NUMBERING_RE.replace(prefix, "");
    let name = name.trim().trim_end_matches(['-', ':', ',']).trim();
    if !name.chars().any(char::is_alphabetic) || INSTRUCTION_VERB_RE.is_match(name) {
        return None;
    }
    Some(name.to_string())
}

/// A line that names a drug in front of its dosage.
fn describes_medication(line: &str) -> bool {
    DOSAGE_RE
        .find(line)
        .is_some_and(|m| clean_name(&line[..m.start()]).is_some())
}

pub fn extract_frequency(text: &str) -> Option<String> {
    let mut found: Vec<String> = Vec::new();
    for m in FREQUENCY_RE.find_iter(text) {
        let value = m.as_str().trim().to_string();
        if !found.contains(&value) {
            found.push(value);
        }
    }
    if found.is_empty() {
        None
    } else {
        Some(found.join(", "))
    }
}

pub fn extract_duration(text: &str) -> Option<String> {
    DURATION_RE.captures(text).map(|caps| caps[1].to_string())
}

pub fn extract_route(text: &str) -> Option<String> {
    if let Some(m) = ROUTE_RE.find(text) {
        return Some(m.as_str().to_lowercase());
    }
    ROUTE_ABBREVIATION_RE
        .captures(text)
        .and_then(|caps| meaning_of(&caps[1]))
        .map(str::to_string)
}

pub fn extract_structured_medications(
    text: &str,
    corrector: &NameCorrector,
    expand_abbreviations: bool,
) -> Vec<Medication> {
    let lines: Vec<&str> = text.lines().collect();
    let mut medications = Vec::new();
    let mut skip_next = false;

    for (i, raw_line) in lines.iter().enumerate() {
        if std::mem::take(&mut skip_next) {
            continue;
        }

        let line = raw_line.trim();
        if line.is_empty() || !is_candidate(line) {
            continue;
        }

        let Some(caps) = DOSAGE_RE.captures(line) else {
            continue;
        };
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let Some(name) = clean_name(&line[..whole.start()]) else {
            continue;
        };

        let dosage = format!("{} {}", &caps[1], caps[2].to_lowercase());
        let form = caps.get(3).map(|m| m.as_str().to_lowercase());

        let mut instructions = line[whole.end()..]
            .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '–' | '—' | ':' | ',' | ';'))
            .trim()
            .to_string();

        if instructions.is_empty() {
            if let Some(next) = lines.get(i + 1).map(|l| l.trim()) {
                if !next.is_empty() && !is_numbered(next) && !describes_medication(next) {
                    instructions = next.to_string();
                    skip_next = true;
                }
            }
        }

        let frequency = extract_frequency(&instructions);
        let duration = extract_duration(&instructions);
        let route = extract_route(&instructions);

        if expand_abbreviations {
            instructions = expand_medical_abbreviations(&instructions);
        }

        let corrected = corrector.correct(&name);
        tracing::debug!(
            "Found medication '{}' ({}, {}) on line {}",
            corrected,
            dosage,
            category_of(&corrected).unwrap_or("uncategorised"),
            i + 1
        );

        medications.push(Medication {
            name: corrected,
            dosage,
            form,
            route,
            frequency,
            duration,
            instructions: if instructions.is_empty() {
                None
            } else {
                Some(instructions)
            },
        });
    }

    medications
}
