//! Unified error handling.
//!
//! Each concern has its own error enum; `StorefrontError` wraps them for
//! callers that drive the whole storefront (the CLI, integration tests).

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::dom::DomError;
use crate::state::StateError;

/// Storefront-level error type.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// A template or one of its parts is missing.
    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    /// The API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// A state operation was refused.
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
