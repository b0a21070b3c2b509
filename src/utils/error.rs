use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Search provider error for store {store_id}: {message}")]
    ProviderError { store_id: u64, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl ScoutError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ScoutError::ConfigError { .. }
                | ScoutError::InvalidConfigValueError { .. }
                | ScoutError::MissingConfigError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScoutError::IoError(e) => format!("Could not write output file: {}", e),
            ScoutError::ZipError(e) => format!("Could not build spreadsheet: {}", e),
            ScoutError::CsvError(e) => format!("Could not build CSV output: {}", e),
            ScoutError::ApiError(_) | ScoutError::ProviderError { .. } => {
                format!("Search provider request failed: {}", self)
            }
            ScoutError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            ScoutError::MissingConfigError { field } => {
                format!("Setting '{}' is required", field)
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScoutError::IoError(_) | ScoutError::ZipError(_) | ScoutError::CsvError(_) => {
                "Check that the output directory exists, is writable, and the files are not open elsewhere"
            }
            ScoutError::ApiError(_) => "Check network connectivity and the API endpoint",
            ScoutError::ProviderError { .. } => "Check the API key and the store identifier",
            ScoutError::SerializationError(_) => "The provider returned an unexpected response",
            ScoutError::ConfigError { .. }
            | ScoutError::InvalidConfigValueError { .. }
            | ScoutError::MissingConfigError { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_names_the_store() {
        let err = ScoutError::ProviderError {
            store_id: 1007,
            message: "Invalid API key.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Search provider error for store 1007: Invalid API key."
        );
        assert!(!err.is_config_error());
    }

    #[test]
    fn config_errors_are_classified() {
        let err = ScoutError::MissingConfigError {
            field: "api_key".to_string(),
        };
        assert!(err.is_config_error());
        assert_eq!(err.user_friendly_message(), "Setting 'api_key' is required");
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ScoutError = io.into();
        assert!(matches!(err, ScoutError::IoError(_)));
        assert!(err.user_friendly_message().contains("denied"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScoutError>();
    }
}
