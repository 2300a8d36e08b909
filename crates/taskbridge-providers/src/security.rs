//! Credential injection.
//!
//! A client never holds a token directly. Its transport asks a
//! [`SecuritySource`] for a [`BearerAuth`] right before sending each request
//! whose operation requires bearer authentication. [`StaticToken`] is the
//! source the factories install; refreshing or rotating sources can be
//! substituted by implementing the trait.

use std::fmt;

use taskbridge_core::AccessToken;

use crate::error::{ProviderError, ProviderResult};

/// Identifier of a remote API operation (e.g. `tasks.tasklists.list`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationId(&'static str);

impl OperationId {
    /// Creates an operation identifier.
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    /// Returns the identifier string.
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A bearer credential, sent as `Authorization: Bearer <token>`.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerAuth {
    token: String,
}

impl BearerAuth {
    /// Wraps a raw token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Returns the raw token.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuth")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Supplies credentials to a client's transport on demand.
///
/// Implementations are called concurrently from every in-flight request of
/// the client that owns them, and must not block.
pub trait SecuritySource: Send + Sync + fmt::Debug {
    /// Returns the credential to use for `operation`.
    ///
    /// # Errors
    ///
    /// Returns an `Unauthenticated` error when no usable credential exists;
    /// the request is then not sent.
    fn credential_for(&self, operation: OperationId) -> ProviderResult<BearerAuth>;
}

/// A security source that always hands out the same token.
///
/// The token never changes after construction.
#[derive(Debug, Clone)]
pub struct StaticToken {
    token: AccessToken,
}

impl StaticToken {
    /// Wraps `token`.
    pub fn new(token: impl Into<AccessToken>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl SecuritySource for StaticToken {
    fn credential_for(&self, operation: OperationId) -> ProviderResult<BearerAuth> {
        if self.token.is_empty() {
            return Err(ProviderError::unauthenticated(format!(
                "no access token available for {}",
                operation
            )));
        }
        Ok(BearerAuth::new(self.token.as_str()))
    }
}
