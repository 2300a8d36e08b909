//! Access token newtype.
//!
//! The token is opaque: nothing is assumed about it beyond being usable as an
//! HTTP `Authorization: Bearer` value. Its `Debug` output is redacted so that
//! clients and errors holding one can be logged safely.

use std::fmt;

/// A bearer access token for exactly one provider and one user.
///
/// Lifetime and refresh are owned by the caller.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if there is no token at all.
    ///
    /// Whitespace counts as content: only the server decides whether a
    /// token is valid.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the token, returning the raw value.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("AccessToken(<empty>)")
        } else {
            f.write_str("AccessToken(<redacted>)")
        }
    }
}

impl From<String> for AccessToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for AccessToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&String> for AccessToken {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}
