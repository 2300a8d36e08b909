//! Core types: provider identity, access tokens, tracing

pub mod provider;
pub mod token;
pub mod tracing;

pub use provider::{ParseProviderError, ProviderKind};
pub use token::AccessToken;
pub use crate::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
