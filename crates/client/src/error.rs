//! Transport error taxonomy.

/// Error type for transport operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors raised by calls against the backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network-level failure: unreachable host, timeout, TLS trouble.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("server returned status {status}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Server-reported detail message, when the body carried one
        detail: Option<String>,
    },

    /// The response body did not decode as the expected type.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// The server's `detail` field, when the failing response carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Whether this failure was an authorization rejection.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }

    /// Human-readable message: the server detail when present, the error's
    /// display form otherwise.
    pub fn message(&self) -> String {
        match self.detail() {
            Some(detail) => detail.to_string(),
            None => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_only_on_status_errors() {
        let err = ApiError::Status {
            status: 422,
            detail: Some("title must not be empty".to_string()),
        };
        assert_eq!(err.detail(), Some("title must not be empty"));
        assert_eq!(err.message(), "title must not be empty");
    }

    #[test]
    fn message_falls_back_to_display() {
        let err = ApiError::Status {
            status: 500,
            detail: None,
        };
        assert_eq!(err.message(), "server returned status 500");
    }

    #[test]
    fn unauthorized_is_recognized() {
        let err = ApiError::Status {
            status: 401,
            detail: None,
        };
        assert!(err.is_unauthorized());
    }
}
