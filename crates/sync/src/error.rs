//! Normalized errors for store mutations.

use sprintdeck_client::ApiError;

/// Error surfaced to callers of store mutations.
///
/// The message is the server's `detail` field when the response carried a
/// non-empty one, the store's fallback string otherwise. The transport
/// failure rides along as the error source.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct MutationError {
    message: String,
    #[source]
    source: ApiError,
}

impl MutationError {
    pub(crate) fn normalize(source: ApiError, fallback: &str) -> Self {
        let message = source
            .detail()
            .filter(|detail| !detail.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string());
        Self { message, source }
    }

    /// The normalized, user-presentable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The underlying transport failure.
    pub fn source_error(&self) -> &ApiError {
        &self.source
    }
}
