//! Token-bound, typed clients for task providers.
//!
//! A short-lived access token goes in, a ready-to-call client for one
//! provider comes out:
//!
//! ```text
//!  access token
//!       │
//!       ▼
//! ┌──────────────┐   StaticToken   ┌──────────────┐
//! │ new_client<P>│ ──────────────► │  Transport   │  base URL (fixed per P)
//! └──────────────┘                 └──────┬───────┘  reqwest::Client
//!                                         │
//!            ┌────────────────────────────┼──────────────────────────┐
//!            ▼                            ▼                          ▼
//!     ┌─────────────┐             ┌────────────────┐          ┌───────────────┐
//!     │ TasksClient │             │ TickTickClient │          │ TodoistClient │
//!     └─────────────┘             └────────────────┘          └───────────────┘
//! ```
//!
//! - [`new_client`] / [`new_client_with`] - generic factory over [`ApiProvider`]
//! - [`google_tasks`], [`ticktick`], [`todoist`] - per-provider clients and factories
//! - [`SecuritySource`] - credential injection seam, [`StaticToken`] by default
//! - [`connect`] - runtime dispatch by [`ProviderKind`]
//! - [`ProviderError`] - error type for construction and requests

pub mod dispatch;
pub mod error;
pub mod factory;
pub mod google_tasks;
pub mod security;
pub mod ticktick;
pub mod todoist;
pub mod transport;

pub use dispatch::{Factory, ProviderClient, connect, connect_with, factory_for};
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use factory::{
    ApiProvider, GoogleTasksApi, TickTickApi, TodoistApi, new_client, new_client_with,
};
pub use security::{BearerAuth, OperationId, SecuritySource, StaticToken};
pub use taskbridge_core::{AccessToken, ProviderKind};
pub use transport::{Call, HttpMethod, Operation, Security, Transport, TransportConfig};
