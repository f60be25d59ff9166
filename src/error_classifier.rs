use crate::api::error::ApiError;
use crate::logging::LogLevel;

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Severity of a failed API call, for the activity log.
    pub fn classify_api_error(&self, error: &ApiError) -> LogLevel {
        match error {
            // Critical: session expired or role not allowed
            ApiError::Http { status, .. } if *status == 401 => LogLevel::Error,
            ApiError::Http { status, .. } if *status == 403 => LogLevel::Error,

            // Non-critical: Temporary server issues
            ApiError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Business rejections the user can act on
            ApiError::Http { .. } => LogLevel::Info,

            // Malformed responses
            ApiError::Decode(_) | ApiError::EmptyResponse | ApiError::Interrupted => {
                LogLevel::Error
            }

            ApiError::Io { .. } => LogLevel::Error,

            // Network issues - usually temporary
            ApiError::Reqwest(_) => LogLevel::Warn,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}
