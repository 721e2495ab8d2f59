use crate::domain::model::PrescriptionReport;
use crate::domain::ports::OutputFormat;
use crate::utils::error::{AnalyzerError, Result};
use std::fmt::Write;

pub fn render(report: &PrescriptionReport, format: OutputFormat, pretty: bool) -> Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Json => Ok(serde_json::to_string(report)?),
        OutputFormat::Csv => render_csv(report),
        OutputFormat::Text => render_text(report),
    }
}

/// One row per medication.
pub fn render_csv(report: &PrescriptionReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "patient",
        "doctor",
        "date",
        "name",
        "dosage",
        "form",
        "route",
        "frequency",
        "duration",
        "instructions",
    ])?;

    let data = &report.parsed_data;
    for med in &data.medications {
        writer.write_record([
            data.patient.as_deref().unwrap_or_default(),
            data.doctor.as_deref().unwrap_or_default(),
            data.date.as_deref().unwrap_or_default(),
            med.name.as_str(),
            med.dosage.as_str(),
            med.form.as_deref().unwrap_or_default(),
            med.route.as_deref().unwrap_or_default(),
            med.frequency.as_deref().unwrap_or_default(),
            med.duration.as_deref().unwrap_or_default(),
            med.instructions.as_deref().unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AnalyzerError::ProcessingError {
            message: format!("CSV flush failed: {}", e),
        })?;
    String::from_utf8(bytes).map_err(|e| AnalyzerError::ProcessingError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}

pub fn render_text(report: &PrescriptionReport) -> Result<String> {
    let mut out = String::new();
    write_text(&mut out, report).map_err(|e| AnalyzerError::ProcessingError {
        message: format!("Text rendering failed: {}", e),
    })?;
    Ok(out)
}

fn write_text(out: &mut String, report: &PrescriptionReport) -> std::fmt::Result {
    let data = &report.parsed_data;
    let or_dash = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    writeln!(out, "Patient:  {}", or_dash(&data.patient))?;
    writeln!(out, "Doctor:   {}", or_dash(&data.doctor))?;
    writeln!(out, "Facility: {}", or_dash(&data.hospital))?;
    let date = match data.issued_on {
        Some(day) => day.format("%Y-%m-%d").to_string(),
        None => or_dash(&data.date),
    };
    writeln!(out, "Date:     {}", date)?;
    writeln!(out, "Medications ({}):", data.medications.len())?;
    for (i, med) in data.medications.iter().enumerate() {
        write!(out, "  {}. {} {}", i + 1, med.name, med.dosage)?;
        if let Some(frequency) = &med.frequency {
            write!(out, ", {}", frequency)?;
        }
        if let Some(duration) = &med.duration {
            write!(out, ", for {}", duration)?;
        }
        writeln!(out)?;
    }
    if let Some(refills) = data.refills {
        writeln!(out, "Refills:  {}", refills)?;
    }
    if let Some(license) = &data.license {
        writeln!(out, "License:  {}", license)?;
    }
    if let Some(notes) = &data.notes {
        writeln!(out, "Notes:    {}", notes)?;
    }
    write!(
        out,
        "[engine: {}, {:.2}ms]",
        report.engine, report.processing_time_ms
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Medication, PrescriptionData};

    fn report() -> PrescriptionReport {
        PrescriptionReport {
            success: true,
            engine: "mock".to_string(),
            raw_text: "raw".to_string(),
            corrected_text: "raw".to_string(),
            parsed_data: PrescriptionData {
                patient: Some("Jane Doe".to_string()),
                doctor: Some("John Smith".to_string()),
                medications: vec![Medication {
                    name: "Ibuprofen".to_string(),
                    dosage: "400 mg".to_string(),
                    form: None,
                    route: None,
                    frequency: Some("every 6 hours, as needed".to_string()),
                    duration: Some("5 days".to_string()),
                    instructions: Some("Take 1 tablet every 6 hours as needed".to_string()),
                }],
                refills: Some(2),
                ..Default::default()
            },
            processing_time_ms: 1.5,
        }
    }

    #[test]
    fn test_render_csv_quotes_commas() {
        let csv = render_csv(&report()).unwrap();
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("patient,doctor,date,name"));
        assert_eq!(
            lines.next().unwrap(),
            "Jane Doe,John Smith,,Ibuprofen,400 mg,,,\"every 6 hours, as needed\",5 days,Take 1 tablet every 6 hours as needed"
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_render_text_summary() {
        let text = render_text(&report()).unwrap();
        assert!(text.contains("Patient:  Jane Doe"));
        assert!(text.contains("Facility: -"));
        assert!(text.contains("1. Ibuprofen 400 mg, every 6 hours, as needed, for 5 days"));
        assert!(text.contains("Refills:  2"));
        assert!(text.ends_with("[engine: mock, 1.50ms]"));
    }

    #[test]
    fn test_render_json_compact_and_pretty() {
        let compact = render(&report(), OutputFormat::Json, false).unwrap();
        assert!(!compact.contains('\n'));
        let pretty = render(&report(), OutputFormat::Json, true).unwrap();
        assert!(pretty.contains("\n  \"success\": true"));
        let value: serde_json::Value = serde_json::from_str(&compact).unwrap();
        assert_eq!(value["parsed_data"]["medications"][0]["name"], "Ibuprofen");
    }
}
