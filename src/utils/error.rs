use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No calculator registered for type '{calculator_type}'")]
    UnsupportedCalculator { calculator_type: String },

    #[error("Student {student_id} rejected: {reason}")]
    Rejected { student_id: String, reason: String },

    #[error("No score produced for student {student_id} (admission {admission}, unit {unit})")]
    ScoreNotProduced {
        student_id: String,
        admission: String,
        unit: String,
    },
}

impl ScoreError {
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScoreError::IoError(_) => "Check that the input file exists and the output path is writable",
            ScoreError::SerializationError(_) => "Check that the students file is a JSON array of student records",
            ScoreError::CsvError(_) => "Check the output path and retry",
            ScoreError::ConfigError { .. }
            | ScoreError::ConfigValidationError { .. }
            | ScoreError::InvalidConfigValueError { .. } => "Fix the season configuration file",
            ScoreError::UnsupportedCalculator { .. } => "Use one of: seonggonghoe, tukorea, yonsei",
            ScoreError::Rejected { .. } => "The admission/unit pair is not scored by this calculator",
            ScoreError::ScoreNotProduced { .. } => {
                "Add the admission/unit pair to the calculator's tables or mark it unsupported"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoreError>;
