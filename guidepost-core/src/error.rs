//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use guidepost_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// A display field declares a renderer kind that does not exist
    #[error("Unknown field kind: {0}")]
    UnknownFieldKind(String),

    /// The display field declaration is unusable (empty or duplicate names, bad JSON)
    #[error("Invalid display spec: {0}")]
    InvalidDisplaySpec(String),

    /// Data source error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (unknown guidepost etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Provider(e) => e.is_expected(),
            Self::UnknownFieldKind(_) | Self::InvalidDisplaySpec(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
