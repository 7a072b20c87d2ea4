use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouteMapError {
    #[error("Dataset request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required setting: {field}")]
    MissingConfigError { field: String },

    #[error("Dataset error: {message}")]
    DatasetError { message: String },

    #[error("Airport not found for route {source_iata} -> {destination_iata}: {}", .missing.join(", "))]
    AirportNotFound {
        source_iata: String,
        destination_iata: String,
        missing: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
    Lookup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// 找不到機場時輸出的訊息
pub const NO_GEOSPATIAL_DETAILS: &str =
    "No geospatial details fetched for inputted IATA-coded airfields.";

impl RouteMapError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RouteMapError::HttpError(_) => ErrorCategory::Network,
            RouteMapError::CsvError(_)
            | RouteMapError::SerializationError(_)
            | RouteMapError::DatasetError { .. } => ErrorCategory::Data,
            RouteMapError::TomlError(_)
            | RouteMapError::ConfigError { .. }
            | RouteMapError::InvalidConfigValueError { .. }
            | RouteMapError::MissingConfigError { .. } => ErrorCategory::Configuration,
            RouteMapError::IoError(_) => ErrorCategory::System,
            RouteMapError::AirportNotFound { .. } => ErrorCategory::Lookup,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lookup => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection or point --airports-url/--routes-url at local copies",
            ErrorCategory::Data => "Make sure the dataset files use the OpenFlights airports.dat/routes.dat layout",
            ErrorCategory::Configuration => "Review the command line flags and the TOML config file",
            ErrorCategory::System => "Check file permissions and that the output directory is writable",
            ErrorCategory::Lookup => "Double-check the IATA codes (three letters, e.g. LHR, JFK)",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RouteMapError::AirportNotFound { .. } => NO_GEOSPATIAL_DETAILS.to_string(),
            RouteMapError::HttpError(e) => format!("Could not download dataset: {}", e),
            RouteMapError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    /// 依嚴重程度決定程序退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, RouteMapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_airport_not_found_is_low_severity() {
        let err = RouteMapError::AirportNotFound {
            source_iata: "XXX".to_string(),
            destination_iata: "JFK".to_string(),
            missing: vec!["XXX".to_string()],
        };

        assert_eq!(err.category(), ErrorCategory::Lookup);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.exit_code(), 0);
        assert_eq!(err.user_friendly_message(), NO_GEOSPATIAL_DETAILS);
        assert!(err.to_string().contains("XXX -> JFK"));
    }

    #[test]
    fn test_exit_codes_follow_severity() {
        let io = RouteMapError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(io.exit_code(), 3);

        let config = RouteMapError::ConfigError {
            message: "bad".to_string(),
        };
        assert_eq!(config.exit_code(), 1);

        let dataset = RouteMapError::DatasetError {
            message: "short row".to_string(),
        };
        assert_eq!(dataset.severity(), ErrorSeverity::High);
    }
}
