use once_cell::sync::Lazy;
use regex::Regex;

pub const MEDICAL_ABBREVIATIONS: &[(&str, &str)] = &[
    ("QD", "once daily"),
    ("BID", "twice daily"),
    ("TID", "three times daily"),
    ("QID", "four times daily"),
    ("PRN", "as needed"),
    ("PO", "by mouth"),
    ("SC", "subcutaneous"),
    ("SQ", "subcutaneous"),
    ("IM", "intramuscular"),
    ("IV", "intravenous"),
    ("AC", "before meals"),
    ("PC", "after meals"),
    ("HS", "at bedtime"),
    ("OD", "right eye"),
    ("OS", "left eye"),
    ("OU", "both eyes"),
    ("AD", "right ear"),
    ("AS", "left ear"),
    ("AU", "both ears"),
];

// Upper-case only: "as needed" must not become "as (left ear) needed".
static ABBREVIATION_RE: Lazy<Regex> = Lazy::new(|| {
    let alternatives: Vec<&str> = MEDICAL_ABBREVIATIONS.iter().map(|(abbr, _)| *abbr).collect();
    Regex::new(&format!(r"\b({})\b", alternatives.join("|"))).expect("abbreviation pattern is valid")
});

pub fn meaning_of(abbreviation: &str) -> Option<&'static str> {
    MEDICAL_ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| *abbr == abbreviation)
        .map(|(_, meaning)| *meaning)
}

pub fn contains_abbreviation(text: &str) -> bool {
    ABBREVIATION_RE.is_match(text)
}

/// Rewrites each abbreviation `X` as `X (meaning)`.
pub fn expand_medical_abbreviations(text: &str) -> String {
    ABBREVIATION_RE
        .replace_all(text, |caps: &regex::Captures| {
            let abbr = &caps[1];
            match meaning_of(abbr) {
                Some(meaning) => format!("{} ({})", abbr, meaning),
                None => abbr.to_string(),
            }
        })
        .into_owned()
}
