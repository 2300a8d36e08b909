//! Error types for provider client construction and requests.
//!
//! Construction and credential failures (`Construction`, `Unauthenticated`)
//! originate in this crate. Everything else describes what the remote API or
//! the network reported and is passed through to the caller unchanged.

use std::fmt;

use taskbridge_core::ProviderKind;
use thiserror::Error;

/// The category of a provider error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    /// The client could not be built (malformed base URL, HTTP sender setup).
    Construction,
    /// No usable credential was available when a request needed one.
    Unauthenticated,
    /// The server rejected the credential (401).
    AuthenticationFailed,
    /// The credential lacks permission for the resource (403).
    AuthorizationFailed,
    /// Network error - connection failed, timeout, DNS resolution, etc.
    NetworkError,
    /// Rate limit exceeded (429).
    RateLimited,
    /// Server returned an unexpected error status.
    ServerError,
    /// Response body could not be decoded.
    InvalidResponse,
    /// Resource not found (404).
    NotFound,
    /// Request was invalid (400) or could not be encoded.
    BadRequest,
}

impl ProviderErrorCode {
    /// Returns true if this error is transient and the operation may be retried.
    ///
    /// This crate never retries on its own; the flag is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError | Self::RateLimited | Self::ServerError
        )
    }

    /// Returns true if the error happened before any request left the process.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Construction | Self::Unauthenticated)
    }

    /// Returns a machine-readable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Construction => "construction",
            Self::Unauthenticated => "unauthenticated",
            Self::AuthenticationFailed => "authentication_failed",
            Self::AuthorizationFailed => "authorization_failed",
            Self::NetworkError => "network_error",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::InvalidResponse => "invalid_response",
            Self::NotFound => "not_found",
            Self::BadRequest => "bad_request",
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error raised while building a provider client or calling its API.
#[derive(Debug, Error)]
pub struct ProviderError {
    code: ProviderErrorCode,
    message: String,
    provider: Option<ProviderKind>,
    /// HTTP status returned by the server, when there was one.
    status: Option<u16>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    /// Creates a new provider error with the given code and message.
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider: None,
            status: None,
            source: None,
        }
    }

    /// Creates a construction error.
    pub fn construction(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::Construction, message)
    }

    /// Creates an unauthenticated error.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::Unauthenticated, message)
    }

    /// Creates an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::AuthenticationFailed, message)
    }

    /// Creates an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::AuthorizationFailed, message)
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NetworkError, message)
    }

    /// Creates a rate limit error.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::RateLimited, message)
    }

    /// Creates a server error.
    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ServerError, message)
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidResponse, message)
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NotFound, message)
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::BadRequest, message)
    }

    /// Tags the error with the provider it came from.
    pub fn with_provider(mut self, provider: ProviderKind) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Records the HTTP status the server answered with.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the provider, if set.
    pub fn provider(&self) -> Option<ProviderKind> {
        self.provider
    }

    /// Returns the HTTP status, if the server answered.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns true if this error is transient and may be retried.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(provider) = self.provider {
            write!(f, "[{}] ", provider)?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_retryable() {
        assert!(ProviderErrorCode::NetworkError.is_retryable());
        assert!(ProviderErrorCode::RateLimited.is_retryable());
        assert!(ProviderErrorCode::ServerError.is_retryable());
        assert!(!ProviderErrorCode::AuthenticationFailed.is_retryable());
        assert!(!ProviderErrorCode::Unauthenticated.is_retryable());
        assert!(!ProviderErrorCode::Construction.is_retryable());
    }

    #[test]
    fn local_codes() {
        assert!(ProviderErrorCode::Construction.is_local());
        assert!(ProviderErrorCode::Unauthenticated.is_local());
        assert!(!ProviderErrorCode::AuthenticationFailed.is_local());
    }

    #[test]
    fn unauthenticated_is_distinct_from_server_rejection() {
        let local = ProviderError::unauthenticated("empty token");
        let remote = ProviderError::authentication("rejected").with_status(401);
        assert_ne!(local.code(), remote.code());
        assert_eq!(local.status(), None);
        assert_eq!(remote.status(), Some(401));
    }

    #[test]
    fn provider_error_display() {
        let err = ProviderError::rate_limited("too many requests")
            .with_provider(ProviderKind::Todoist);
        let display = format!("{}", err);
        assert_eq!(display, "[todoist] rate_limited: too many requests");
        assert_eq!(err.provider(), Some(ProviderKind::Todoist));
    }

    #[test]
    fn provider_error_with_source() {
        use std::error::Error;
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err = ProviderError::construction("bad base URL").with_source(parse_err);
        assert!(err.source().is_some());
    }
}
