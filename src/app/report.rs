use crate::core::registry::{BatchSummary, OutcomeStatus};
use crate::domain::model::Student;
use crate::domain::ports::{Calculator, Storage};
use crate::utils::error::{Result, ScoreError};
use serde::Serialize;

pub const SCORES_CSV: &str = "scores.csv";
pub const STUDENTS_JSON: &str = "students_scored.json";
pub const SUPPORTED_FORMATS: &[&str] = &["csv", "json"];

#[derive(Debug, Serialize)]
struct ScoreRow<'a> {
    student_id: &'a str,
    admission: &'a str,
    admission_name: &'a str,
    unit: &'a str,
    unit_name: &'a str,
    status: OutcomeStatus,
    final_score: Option<f64>,
    reflected_subjects: usize,
    explanation: String,
}

/// One CSV row per student, in batch order.
pub fn scores_csv(calculator: &dyn Calculator, students: &[Student], summary: &BatchSummary) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for (student, outcome) in students.iter().zip(&summary.outcomes) {
        let explanation = match (&student.score_result, &outcome.message) {
            (Some(result), _) => result.explanation.clone(),
            (None, Some(message)) => message.clone(),
            (None, None) => String::new(),
        };
        writer.serialize(ScoreRow {
            student_id: &student.id,
            admission: &student.recruitment_type_code,
            admission_name: lookup(calculator.admission_mapper(), &student.recruitment_type_code),
            unit: &student.recruitment_unit_code,
            unit_name: lookup(calculator.unit_mapper(), &student.recruitment_unit_code),
            status: outcome.status,
            final_score: outcome.final_score,
            reflected_subjects: student.reflected_subjects().count(),
            explanation,
        })?;
    }

    let bytes = writer.into_inner().map_err(|e| ScoreError::ConfigError {
        message: format!("Failed to flush CSV output: {}", e),
    })?;
    String::from_utf8(bytes).map_err(|e| ScoreError::ConfigError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}

fn lookup<'a>(names: &'a std::collections::BTreeMap<String, String>, code: &str) -> &'a str {
    names.get(code).map(String::as_str).unwrap_or("")
}

/// Loads a JSON array of students through `storage`.
pub fn read_students<S: Storage>(storage: &S, name: &str) -> Result<Vec<Student>> {
    let raw = storage.read_file(name)?;
    let students: Vec<Student> = serde_json::from_slice(&raw)?;
    tracing::debug!("📥 Read {} students from {}", students.len(), name);
    Ok(students)
}

/// Annotated students, including every subject's calculation detail.
pub fn students_json(students: &[Student]) -> Result<String> {
    Ok(serde_json::to_string_pretty(students)?)
}

/// Writes the requested formats through `storage`; returns the file names.
pub fn write_reports<S: Storage>(
    storage: &S,
    formats: &[String],
    calculator: &dyn Calculator,
    students: &[Student],
    summary: &BatchSummary,
) -> Result<Vec<String>> {
    let mut written = Vec::new();

    for format in formats {
        match format.as_str() {
            "csv" => {
                let csv = scores_csv(calculator, students, summary)?;
                storage.write_file(SCORES_CSV, csv.as_bytes())?;
                written.push(SCORES_CSV.to_string());
            }
            "json" => {
                let json = students_json(students)?;
                storage.write_file(STUDENTS_JSON, json.as_bytes())?;
                written.push(STUDENTS_JSON.to_string());
            }
            other => {
                return Err(ScoreError::InvalidConfigValueError {
                    field: "output.formats".to_string(),
                    value: other.to_string(),
                    reason: format!("Unsupported format. Valid formats: {}", SUPPORTED_FORMATS.join(", ")),
                })
            }
        }
        tracing::debug!("💾 Wrote {} report", format);
    }

    Ok(written)
}
