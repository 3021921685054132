use crate::app::report::SUPPORTED_FORMATS;
use crate::domain::model::CalculatorType;
use crate::utils::error::{Result, ScoreError};
use crate::utils::validation::{validate_allowed_values, validate_non_empty_string, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonConfig {
    pub season: SeasonInfo,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonInfo {
    pub name: String,
    pub calculator_type: CalculatorType,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub students: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub formats: Option<Vec<String>>,
}

impl SeasonConfig {
    /// Load a season file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScoreError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScoreError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScoreError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn formats(&self) -> Vec<String> {
        self.output
            .formats
            .clone()
            .unwrap_or_else(|| vec!["csv".to_string(), "json".to_string()])
    }

    pub fn calculator_type(&self) -> CalculatorType {
        self.season.calculator_type
    }
}

impl Validate for SeasonConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("season.name", &self.season.name)?;
        validate_path("input.students", &self.input.students)?;
        validate_path("output.path", &self.output.path)?;
        validate_allowed_values("output.formats", &self.formats(), SUPPORTED_FORMATS)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[season]
name = "2025 early admission"
calculator_type = "tukorea"

[input]
students = "./students.json"

[output]
path = "./output"
formats = ["csv"]
"#;

    #[test]
    fn test_parse_basic_season_config() {
        let config = SeasonConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.season.name, "2025 early admission");
        assert_eq!(config.calculator_type(), CalculatorType::Tukorea);
        assert_eq!(config.formats(), vec!["csv".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ADMISSION_SCORE_TEST_STUDENTS", "/data/students.json");

        let toml_content = r#"
[season]
name = "env"
calculator_type = "yonsei"

[input]
students = "${ADMISSION_SCORE_TEST_STUDENTS}"

[output]
path = "./output"
"#;

        let config = SeasonConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.input.students, "/data/students.json");
        assert_eq!(config.formats(), vec!["csv".to_string(), "json".to_string()]);

        std::env::remove_var("ADMISSION_SCORE_TEST_STUDENTS");
    }

    #[test]
    fn test_unknown_calculator_type_fails_to_parse() {
        let toml_content = BASIC.replace("tukorea", "harvard");
        assert!(SeasonConfig::from_toml_str(&toml_content).is_err());
    }

    #[test]
    fn test_config_validation() {
        let toml_content = BASIC.replace(r#"formats = ["csv"]"#, r#"formats = ["xlsx"]"#);
        let config = SeasonConfig::from_toml_str(&toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = SeasonConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.season.calculator_type, CalculatorType::Tukorea);
    }
}
