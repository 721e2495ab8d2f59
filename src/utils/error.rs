use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
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

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Image is {size_bytes} bytes, exceeding the {limit_mb}MB limit")]
    ImageTooLarge { size_bytes: usize, limit_mb: u64 },

    #[error("OCR engine '{engine}' is unavailable: {reason}")]
    EngineUnavailable { engine: String, reason: String },

    #[error("Failed to extract text from image: {message}")]
    ExtractionError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Engine,
    Processing,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// CLI 退出碼
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Low => 0,
            Self::Medium => 2,
            Self::High => 1,
            Self::Critical => 3,
        }
    }
}

impl AnalyzerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::ImageTooLarge { .. } => ErrorCategory::Input,
            Self::EngineUnavailable { .. } | Self::ExtractionError { .. } => ErrorCategory::Engine,
            Self::SerializationError(_) | Self::CsvError(_) | Self::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Engine => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Input | ErrorCategory::Processing => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                "Check the TOML config file syntax and field names".to_string()
            }
            Self::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' in the config file or CLI flags", field)
            }
            Self::MissingConfigError { field } => format!("Add '{}' to the configuration", field),
            Self::ImageTooLarge { limit_mb, .. } => format!(
                "Use an image smaller than {}MB or raise ocr.max_image_size_mb",
                limit_mb
            ),
            Self::EngineUnavailable { .. } => {
                "Install the OCR engine or wrap it in a FallbackEngine with the mock service"
                    .to_string()
            }
            Self::ExtractionError { .. } => "Retry with a clearer image".to_string(),
            Self::SerializationError(_) | Self::CsvError(_) | Self::ProcessingError { .. } => {
                "Try another output format or run with --verbose for details".to_string()
            }
            Self::IoError(_) => "Check file permissions and that the path exists".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("The image could not be accepted: {}", self),
            ErrorCategory::Engine => format!("Text extraction failed: {}", self),
            ErrorCategory::Processing => format!("The prescription could not be processed: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
