use crate::domain::model::PrescriptionData;
use crate::text::correction::NameCorrector;
use crate::text::medications::extract_structured_medications;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("prescription pattern is valid")
}

static PATIENT_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        compile(r"(?i)\(patient'?s name\)\s*([^,\n]+)"),
        compile(r"(?i)\b(?:patient(?:'s)?(?:\s+name)?|pt|prescribed\s+for)\s*:\s*([^,\n]+)"),
        compile(r"(?im)^\s*name\s*:\s*([^,\n]+)"),
    ]
});

static DOCTOR_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        compile(r"(?i)\bdr(?:\.\s*|\s+)([A-Za-z][A-Za-z .'-]*?)\s*(?:,|\n|$)"),
        compile(r"(?im)^\s*(?:doctor|physician|prescriber)\s*:\s*([^,\n]+)"),
        compile(r"(?im)^\s*(?:signature|signed by)\s*:?\s*([^,\n]+)"),
    ]
});

static HOSPITAL_RE: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"(?im)^[ \t]*([A-Za-z][\w .'&-]*?\b(?:hospital|clinic|medical\s+cent(?:er|re)|medical\s+facility|infirmary))\b",
    )
});

const MONTH: &str = r"(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|June?|July?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)";

static DATE_BODY: Lazy<String> = Lazy::new(|| {
    format!(
        r"\d{{1,2}}[/.-]\d{{1,2}}[/.-]\d{{2,4}}|\d{{4}}-\d{{2}}-\d{{2}}|\d{{1,2}}\s+{m}\.?\s+\d{{2,4}}|{m}\.?\s+\d{{1,2}},?\s+\d{{4}}",
        m = MONTH
    )
});

static LABELED_DATE_RE: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"(?i)\bdate\s*:?\s*({})", *DATE_BODY)));

static ANY_DATE_RE: Lazy<Regex> = Lazy::new(|| compile(&format!(r"(?i)\b({})\b", *DATE_BODY)));

static FOUR_DIGIT_YEAR_RE: Lazy<Regex> = Lazy::new(|| compile(r"\d{4}"));

static REFILLS_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?i)\brefills?\s*:?\s*(\d+)"));

static LICENSE_RE: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)\blicen[cs]e(?:\s*(?:no\.?|number|#))?\s*:?\s*([A-Z0-9][A-Z0-9-]{2,})")
});

static NOTES_RE: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?im)^\s*(?:notes?|instructions|directions|signa|sig)\s*:\s*(.+?)\s*$")
});

const LONG_YEAR_FORMATS: &[&str] = &[
    "%m/%d/%Y", "%d/%m/%Y", "%m-%d-%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d", "%d %b %Y", "%d %B %Y",
    "%b %d, %Y", "%B %d, %Y", "%b %d %Y", "%B %d %Y",
];

const SHORT_YEAR_FORMATS: &[&str] = &["%m/%d/%y", "%d/%m/%y", "%m-%d-%y", "%d.%m.%y", "%d %b %y"];

fn first_capture(patterns: &[Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|re| {
        re.captures(text)
            .map(|caps| caps[1].trim().to_string())
            .filter(|value| !value.is_empty())
    })
}

pub fn extract_patient_name(text: &str) -> Option<String> {
    first_capture(&PATIENT_RES, text)
}

pub fn extract_doctor_name(text: &str) -> Option<String> {
    first_capture(&DOCTOR_RES, text)
}

pub fn extract_hospital(text: &str) -> Option<String> {
    HOSPITAL_RE.captures(text).map(|caps| caps[1].trim().to_string())
}

pub fn extract_date(text: &str) -> Option<String> {
    LABELED_DATE_RE
        .captures(text)
        .or_else(|| ANY_DATE_RE.captures(text))
        .map(|caps| caps[1].trim().to_string())
}

/// Interprets a prescription date, preferring US month/day order.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let formats = if FOUR_DIGIT_YEAR_RE.is_match(raw) {
        LONG_YEAR_FORMATS
    } else {
        SHORT_YEAR_FORMATS
    };
    let undotted = raw.replace(". ", " ");
    [raw, undotted.as_str()].iter().find_map(|candidate| {
        formats
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(candidate, format).ok())
    })
}

pub fn parse_prescription_text(
    text: &str,
    corrector: &NameCorrector,
    expand_abbreviations: bool,
) -> PrescriptionData {
    let date = extract_date(text);
    let issued_on = date.as_deref().and_then(parse_date);
    if date.is_some() && issued_on.is_none() {
        tracing::debug!("Could not interpret prescription date {:?}", date);
    }

    let data = PrescriptionData {
        patient: extract_patient_name(text),
        doctor: extract_doctor_name(text),
        hospital: extract_hospital(text),
        date,
        issued_on,
        medications: extract_structured_medications(text, corrector, expand_abbreviations),
        refills: REFILLS_RE
            .captures(text)
            .and_then(|caps| caps[1].parse().ok()),
        license: LICENSE_RE.captures(text).map(|caps| caps[1].to_string()),
        notes: NOTES_RE.captures(text).map(|caps| caps[1].to_string()),
    };

    tracing::debug!(
        "Parsed prescription: patient={:?}, doctor={:?}, {} medications",
        data.patient,
        data.doctor,
        data.medications.len()
    );
    data
}
