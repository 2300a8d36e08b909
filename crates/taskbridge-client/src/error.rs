//! Client error types.

use taskbridge_providers::ProviderError;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// No token configured for the provider.
    #[error("authentication required: {0}")]
    AuthRequired(String),

    /// Error from a provider client.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Output could not be rendered.
    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}
