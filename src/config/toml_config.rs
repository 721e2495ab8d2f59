use crate::domain::ports::{ConfigProvider, OutputFormat};
use crate::utils::error::{AnalyzerError, Result};
use crate::utils::validation::{validate_one_of, validate_positive_number, validate_range, Validate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static ENV_VAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ocr: OcrConfig,
    pub processing: ProcessingConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    pub max_image_size_mb: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            max_image_size_mb: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub fuzzy_match_threshold: u8,
    pub expand_abbreviations: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            fuzzy_match_threshold: 80,
            expand_abbreviations: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AnalyzerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AnalyzerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FUZZY_THRESHOLD})，未定義的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| AnalyzerError::ConfigError {
            message: format!("TOML serialization error: {}", e),
        })
    }
}

impl ConfigProvider for AppConfig {
    fn max_image_size_mb(&self) -> u64 {
        self.ocr.max_image_size_mb
    }

    fn fuzzy_match_threshold(&self) -> u8 {
        self.processing.fuzzy_match_threshold
    }

    fn expand_abbreviations(&self) -> bool {
        self.processing.expand_abbreviations
    }

    fn output_format(&self) -> OutputFormat {
        self.output.format
    }

    fn pretty_output(&self) -> bool {
        self.output.pretty
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_positive_number("ocr.max_image_size_mb", self.ocr.max_image_size_mb, 1)?;
        validate_range(
            "processing.fuzzy_match_threshold",
            self.processing.fuzzy_match_threshold,
            0,
            100,
        )?;
        validate_one_of("logging.level", &self.logging.level, LOG_LEVELS)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.max_image_size_mb(), 10);
        assert_eq!(config.fuzzy_match_threshold(), 80);
        assert!(config.expand_abbreviations());
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[ocr]
max_image_size_mb = 4

[processing]
fuzzy_match_threshold = 90
expand_abbreviations = false

[output]
format = "csv"
pretty = false

[logging]
level = "debug"
json = true
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.ocr.max_image_size_mb, 4);
        assert_eq!(config.processing.fuzzy_match_threshold, 90);
        assert!(!config.processing.expand_abbreviations);
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert!(!config.output.pretty);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("RX_TEST_FUZZY_THRESHOLD", "75");

        let toml_content = r#"
[processing]
fuzzy_match_threshold = ${RX_TEST_FUZZY_THRESHOLD}
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.processing.fuzzy_match_threshold, 75);

        std::env::remove_var("RX_TEST_FUZZY_THRESHOLD");
    }

    #[test]
    fn test_unknown_env_var_is_left_in_place() {
        let toml_content = r#"
[logging]
level = "${RX_TEST_UNSET_LEVEL}"
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.logging.level, "${RX_TEST_UNSET_LEVEL}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();
        config.processing.fuzzy_match_threshold = 120;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.ocr.max_image_size_mb = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let err = AppConfig::from_toml_str("[output]\nformat = \"pdf\"\n").unwrap_err();
        assert!(matches!(err, AnalyzerError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\nformat = \"text\"\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.ocr.max_image_size_mb, 10);
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = AppConfig::default();
        let rendered = config.to_toml_string().unwrap();
        assert_eq!(AppConfig::from_toml_str(&rendered).unwrap(), config);
    }
}
