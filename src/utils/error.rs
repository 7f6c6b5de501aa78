use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudioError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{message}")]
    ValidationError { message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Invalid value for '{field}': {reason} (got '{value}')")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Agent backend error: {message}")]
    UpstreamError { message: String },

    #[error("Execution {execution_id} did not finish after {attempts} polls")]
    TimeoutError { execution_id: String, attempts: u32 },

    /// Error payload returned by the generation endpoint, surfaced to the caller verbatim.
    #[error("{message}")]
    ServerError { status: u16, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Request,
    Configuration,
    Upstream,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl StudioError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::UpstreamError {
            message: message.into(),
        }
    }

    /// HTTP status the generation endpoint answers with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            StudioError::ValidationError { .. } => 400,
            StudioError::ServerError { status, .. } => *status,
            _ => 500,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            StudioError::ValidationError { .. } => ErrorCategory::Request,
            StudioError::ConfigurationError { .. } | StudioError::InvalidConfigValue { .. } => {
                ErrorCategory::Configuration
            }
            StudioError::HttpError(_)
            | StudioError::UpstreamError { .. }
            | StudioError::TimeoutError { .. }
            | StudioError::ServerError { .. } => ErrorCategory::Upstream,
            StudioError::IoError(_) | StudioError::SerializationError(_) => {
                ErrorCategory::Internal
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Request => ErrorSeverity::Low,
            ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            StudioError::ValidationError { message } => message.clone(),
            StudioError::ConfigurationError { .. } | StudioError::InvalidConfigValue { .. } => {
                format!("Concept Studio is not configured correctly: {}", self)
            }
            StudioError::TimeoutError { .. } => {
                "Generation is taking too long, please try again later".to_string()
            }
            StudioError::ServerError { message, .. } => message.clone(),
            _ => format!("Generation failed: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            StudioError::ValidationError { .. } => {
                "Enter a prompt and select at least one module"
            }
            StudioError::ConfigurationError { .. } => {
                "Set AUTOGPT_API_KEY and the agent or graph ids for the selected strategy"
            }
            StudioError::InvalidConfigValue { .. } => "Fix the configuration value and restart",
            StudioError::TimeoutError { .. } => {
                "Increase polling.max_attempts or check the backend execution"
            }
            StudioError::HttpError(_) | StudioError::UpstreamError { .. } => {
                "Check that the agent backend is reachable and the API key is valid"
            }
            StudioError::ServerError { .. } => "Check the concept-studio server logs",
            StudioError::IoError(_) | StudioError::SerializationError(_) => {
                "Check file permissions and disk space"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(StudioError::validation("bad").status_code(), 400);
        assert_eq!(StudioError::configuration("missing key").status_code(), 500);
        assert_eq!(StudioError::upstream("boom").status_code(), 500);
        assert_eq!(
            StudioError::TimeoutError {
                execution_id: "x".to_string(),
                attempts: 60
            }
            .status_code(),
            500
        );
        assert_eq!(
            StudioError::ServerError {
                status: 404,
                message: "nope".to_string()
            }
            .status_code(),
            404
        );
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = StudioError::validation("Prompt is required");
        assert_eq!(err.to_string(), "Prompt is required");
        assert_eq!(err.user_friendly_message(), "Prompt is required");
        assert_eq!(err.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            StudioError::configuration("x").category(),
            ErrorCategory::Configuration
        );
        assert_eq!(StudioError::upstream("x").category(), ErrorCategory::Upstream);
    }
}
