use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status} ({code}): {message}")]
    ApiStatusError {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Unexpected response body for '{address}': {source}")]
    ResponseParseError {
        address: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Input table is missing required column '{column}'")]
    MissingColumnError { column: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Remote side refused the request.
    Medium,
    /// Bad input data or an unexpected response.
    High,
    /// Environment problem: network, filesystem or configuration.
    Critical,
}

impl ErrorSeverity {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl EtlError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EtlError::ApiStatusError { .. } => ErrorSeverity::Medium,
            EtlError::ResponseParseError { .. }
            | EtlError::CsvError(_)
            | EtlError::MissingColumnError { .. } => ErrorSeverity::High,
            EtlError::ApiError(_)
            | EtlError::IoError(_)
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::ApiError(_) => "Check network connectivity and the configured base URL",
            EtlError::ApiStatusError { status: 401 | 403, .. } => {
                "Check that the API key is valid and allowed to use this endpoint"
            }
            EtlError::ApiStatusError { .. } => "Inspect the error message returned by the API",
            EtlError::ResponseParseError { .. } => {
                "The API response format changed or the base URL points at another service"
            }
            EtlError::CsvError(_) | EtlError::MissingColumnError { .. } => {
                "The input needs the columns 'Address', 'City', 'State' and 'Zip Code'"
            }
            EtlError::IoError(_) => "Check that the input file exists and the output path is writable",
            EtlError::InvalidConfigValueError { .. } | EtlError::ConfigValidationError { .. } => {
                "Fix the configuration file or command line flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_exit_codes() {
        let missing = EtlError::MissingColumnError {
            column: "City".to_string(),
        };
        assert_eq!(missing.severity(), ErrorSeverity::High);
        assert_eq!(missing.severity().exit_code(), 1);

        let rejected = EtlError::ApiStatusError {
            status: 403,
            code: "forbidden".to_string(),
            message: "bad key".to_string(),
        };
        assert_eq!(rejected.severity().exit_code(), 2);
        assert!(rejected.recovery_suggestion().contains("API key"));
    }
}
