use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Cannot decode {kind} at index {index}: {message}")]
    DecodeError {
        kind: String,
        index: usize,
        message: String,
    },

    #[error("Unknown field '{field}' in {kind} at index {index}")]
    UnknownFieldError {
        kind: String,
        index: usize,
        field: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

pub type Result<T> = std::result::Result<T, PayloadError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Config,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for the binaries. Every severity is a failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl PayloadError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PayloadError::IoError(_) => ErrorCategory::Io,
            PayloadError::SerializationError(_)
            | PayloadError::DecodeError { .. }
            | PayloadError::UnknownFieldError { .. }
            | PayloadError::ProcessingError { .. } => ErrorCategory::Data,
            PayloadError::ConfigError { .. }
            | PayloadError::ConfigValidationError { .. }
            | PayloadError::InvalidConfigValueError { .. } => ErrorCategory::Config,
            PayloadError::ZipError(_) | PayloadError::CsvError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // input problems can be fixed and the run retried
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Config => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PayloadError::IoError(_) => {
                "Check that the input file exists and the output directory is writable"
            }
            PayloadError::SerializationError(_) => "Make sure the input file is valid JSON",
            PayloadError::DecodeError { .. } => {
                "Each element must be a JSON object whose fields match the selected payload kind"
            }
            PayloadError::UnknownFieldError { .. } => {
                "Remove the unexpected field or disable reject_unknown_fields"
            }
            PayloadError::ConfigError { .. } | PayloadError::ConfigValidationError { .. } => {
                "Review the configuration file syntax"
            }
            PayloadError::InvalidConfigValueError { .. } => {
                "Correct the configuration value and run again"
            }
            PayloadError::ZipError(_) | PayloadError::CsvError(_) => {
                "Check free disk space and the output file names"
            }
            PayloadError::ProcessingError { .. } => "Run again with --verbose for details",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PayloadError::IoError(e) => format!("Could not access a file: {}", e),
            PayloadError::SerializationError(e) => format!("The input is not valid JSON: {}", e),
            PayloadError::DecodeError { kind, index, .. } => {
                format!("Record #{} is not a valid {}", index, kind)
            }
            PayloadError::UnknownFieldError { kind, index, field } => format!(
                "Record #{} contains field '{}' which {} does not have",
                index, field, kind
            ),
            other => other.to_string(),
        }
    }
}

impl From<toml::de::Error> for PayloadError {
    fn from(err: toml::de::Error) -> Self {
        PayloadError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", err),
        }
    }
}
