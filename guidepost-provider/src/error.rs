use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for guidepost data sources.
///
/// Each variant names the `service` that produced it (`"attributes"` or
/// `"destinations"`), so a caller can route the failure to the right part of
/// the UI. All variants are serializable for structured error reporting.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    #[error("[{service}] Network error: {detail}")]
    NetworkError {
        /// Service that produced the error.
        service: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out (only possible with a configured timeout).
    #[error("[{service}] Request timed out: {detail}")]
    Timeout {
        /// Service that produced the error.
        service: String,
        /// Error details.
        detail: String,
    },

    /// The service answered with a non-2xx status.
    #[error("[{service}] HTTP {status}")]
    HttpStatus {
        /// Service that produced the error.
        service: String,
        /// HTTP status code.
        status: u16,
        /// Truncated response body, if one could be read.
        body: Option<String>,
    },

    /// The response body was not the expected JSON shape.
    #[error("[{service}] Failed to parse response: {detail}")]
    ParseError {
        /// Service that produced the error.
        service: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// A service address or client option is unusable.
    #[error("Invalid configuration for `{field}`: {detail}")]
    InvalidConfig {
        /// Configuration key.
        field: String,
        /// What is wrong with it.
        detail: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（未知的路标 ID 等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::HttpStatus { status: 400..=499, .. })
    }

    /// Service that produced the error, if any.
    pub fn service(&self) -> Option<&str> {
        match self {
            Self::NetworkError { service, .. }
            | Self::Timeout { service, .. }
            | Self::HttpStatus { service, .. }
            | Self::ParseError { service, .. } => Some(service),
            Self::InvalidConfig { .. } => None,
        }
    }
}

/// Result alias used by every source operation.
pub type Result<T> = std::result::Result<T, ProviderError>;
