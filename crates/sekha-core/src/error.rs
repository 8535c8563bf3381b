//! Error types for Sekha SDK operations.
//!
//! Every network-backed operation returns `SekhaResult<T>`; transport and
//! HTTP failures are translated into this taxonomy exactly once, at the
//! dispatch boundary, and propagate untouched from there.

use thiserror::Error;

/// Result type alias for Sekha SDK operations.
pub type SekhaResult<T> = Result<T, SekhaError>;

/// Main error type for all Sekha SDK operations.
#[derive(Error, Debug)]
pub enum SekhaError {
    /// API returned an error response not covered by a more specific variant.
    #[error("API error {status}: {body}")]
    Api {
        /// HTTP status code returned by the server.
        status: u16,
        /// Raw response body, preserved for diagnostics.
        body: String,
    },

    /// Requested resource not found.
    #[error("Not found: {message}")]
    NotFound {
        message: String,
        /// Identifier of the missing resource, when known.
        resource: Option<String>,
    },

    /// Authentication failed.
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    /// Failed to reach the server (refused, unreachable, or timed out).
    #[error("Connection failed: {message}")]
    Connection { message: String },

    /// Invalid input parameters.
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        /// Server-provided detail, when the rejection came from the API.
        body: Option<String>,
    },

    /// Rate limit exceeded.
    #[error("Rate limited: {message}")]
    RateLimited {
        message: String,
        /// Seconds to wait before retrying, when the server said so.
        retry_after: Option<u64>,
    },

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Any other unexpected failure.
    #[error("{0}")]
    Generic(String),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ApiStatus,
    NotFound,
    AuthInvalidKey,
    ConnectionFailed,
    ValidationInvalidInput,
    RateLimitExceeded,
    Configuration,
    Generic,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ApiStatus => "API_001",
            ErrorCode::NotFound => "RES_001",
            ErrorCode::AuthInvalidKey => "AUTH_001",
            ErrorCode::ConnectionFailed => "NET_001",
            ErrorCode::ValidationInvalidInput => "VAL_001",
            ErrorCode::RateLimitExceeded => "RATE_001",
            ErrorCode::Configuration => "CFG_001",
            ErrorCode::Generic => "GEN_001",
        }
    }
}

impl SekhaError {
    /// Create a generic API error.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Create a not found error for a named resource.
    pub fn not_found(resource: impl Into<String>) -> Self {
        let id = resource.into();
        Self::NotFound {
            message: format!("Resource '{}' not found", id),
            resource: Some(id),
        }
    }

    /// Create an authentication error.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            body: None,
        }
    }

    /// Create a validation error carrying the server's response body.
    pub fn validation_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Create a rate limit error.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
            retry_after: None,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Api { .. } => ErrorCode::ApiStatus,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::Auth { .. } => ErrorCode::AuthInvalidKey,
            Self::Connection { .. } => ErrorCode::ConnectionFailed,
            Self::Validation { .. } => ErrorCode::ValidationInvalidInput,
            Self::RateLimited { .. } => ErrorCode::RateLimitExceeded,
            Self::Configuration(_) => ErrorCode::Configuration,
            Self::Generic(_) => ErrorCode::Generic,
        }
    }

    /// Get a user-friendly suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Auth { .. } => Some("Check your API key and authentication credentials"),
            Self::RateLimited { .. } => Some("Wait before making more requests"),
            Self::NotFound { .. } => Some("Check the resource ID and ensure it exists"),
            Self::Connection { .. } => Some("Check that the Sekha server is reachable"),
            Self::Configuration(_) => Some("Check your client configuration values"),
            _ => None,
        }
    }

    /// Whether a retry of the same request could plausibly succeed.
    ///
    /// Only connection-level failures (refused, unreachable, timed out)
    /// qualify; a 4xx cannot be fixed by retrying and is always terminal.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }

    /// Translate an HTTP error status into the corresponding error kind.
    pub fn from_http_status(status: u16, body: &str) -> Self {
        match status {
            400 => Self::Validation {
                message: "Invalid request parameters".to_string(),
                body: Some(body.to_string()),
            },
            401 => Self::Auth {
                message: "Invalid API key".to_string(),
            },
            404 => Self::NotFound {
                message: body.to_string(),
                resource: None,
            },
            429 => Self::RateLimited {
                message: body.to_string(),
                retry_after: None,
            },
            _ => Self::Api {
                status,
                body: body.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for SekhaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Generic(format!("Serialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = SekhaError::not_found("conv-1");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(err.to_string().contains("conv-1"));
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::AuthInvalidKey.as_str(), "AUTH_001");
        assert_eq!(ErrorCode::ConnectionFailed.as_str(), "NET_001");
    }

    #[test]
    fn test_from_http_status_table() {
        assert!(matches!(
            SekhaError::from_http_status(400, "bad label"),
            SekhaError::Validation { body: Some(b), .. } if b == "bad label"
        ));
        assert!(matches!(
            SekhaError::from_http_status(401, ""),
            SekhaError::Auth { .. }
        ));
        assert!(matches!(
            SekhaError::from_http_status(404, "gone"),
            SekhaError::NotFound { .. }
        ));
        assert!(matches!(
            SekhaError::from_http_status(429, "slow down"),
            SekhaError::RateLimited { .. }
        ));
        assert!(matches!(
            SekhaError::from_http_status(500, "boom"),
            SekhaError::Api { status: 500, .. }
        ));
        assert!(matches!(
            SekhaError::from_http_status(418, "teapot"),
            SekhaError::Api { status: 418, .. }
        ));
    }

    #[test]
    fn test_translation_is_deterministic() {
        for _ in 0..3 {
            let err = SekhaError::from_http_status(400, "same body");
            assert_eq!(err.code(), ErrorCode::ValidationInvalidInput);
        }
    }

    #[test]
    fn test_only_connection_is_transient() {
        assert!(SekhaError::connection("refused").is_transient());
        assert!(!SekhaError::api(500, "boom").is_transient());
        assert!(!SekhaError::validation("bad").is_transient());
        assert!(!SekhaError::not_found("x").is_transient());
        assert!(!SekhaError::auth("nope").is_transient());
        assert!(!SekhaError::rate_limited("slow").is_transient());
    }
}
