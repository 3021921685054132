use crate::utils::error::{Result, ScoreError};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ScoreError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ScoreError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ScoreError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_allowed_values(field_name: &str, values: &[String], allowed: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed.iter().copied().collect();

    if values.is_empty() {
        return Err(ScoreError::ConfigValidationError {
            field: field_name.to_string(),
            message: format!("At least one value is required. Allowed: {}", allowed.join(", ")),
        });
    }

    for value in values {
        if !allowed_set.contains(value.as_str()) {
            return Err(ScoreError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.clone(),
                reason: format!("Unsupported value. Allowed: {}", allowed.join(", ")),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output.path", "./output").is_ok());
        assert!(validate_path("output.path", "").is_err());
        assert!(validate_path("output.path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_allowed_values() {
        let formats = vec!["csv".to_string(), "json".to_string()];
        assert!(validate_allowed_values("output.formats", &formats, &["csv", "json"]).is_ok());

        let invalid = vec!["xlsx".to_string()];
        assert!(validate_allowed_values("output.formats", &invalid, &["csv", "json"]).is_err());
        assert!(validate_allowed_values("output.formats", &[], &["csv", "json"]).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("season.name", "2025").is_ok());
        assert!(validate_non_empty_string("season.name", "   ").is_err());
    }
}
