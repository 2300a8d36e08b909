//! Provider dispatch.
//!
//! Maps a runtime [`ProviderKind`] to the factory for that provider. Every
//! factory has the same [`Factory`] signature; the result is a
//! [`ProviderClient`] that still carries the provider-specific client, so
//! callers match on the variant to reach its operations.

use taskbridge_core::{AccessToken, ProviderKind};

use crate::error::ProviderResult;
use crate::factory::{GoogleTasksApi, TickTickApi, TodoistApi, new_client_with};
use crate::google_tasks::TasksClient;
use crate::ticktick::TickTickClient;
use crate::todoist::TodoistClient;
use crate::transport::{Transport, TransportConfig};

/// A client for one of the supported providers.
#[derive(Debug, Clone)]
pub enum ProviderClient {
    GoogleTasks(TasksClient),
    TickTick(TickTickClient),
    Todoist(TodoistClient),
}

impl ProviderClient {
    /// The provider this client talks to.
    pub fn kind(&self) -> ProviderKind {
        self.transport().provider()
    }

    /// The transport underneath the concrete client.
    pub fn transport(&self) -> &Transport {
        match self {
            Self::GoogleTasks(client) => client.transport(),
            Self::TickTick(client) => client.transport(),
            Self::Todoist(client) => client.transport(),
        }
    }
}

/// Signature shared by every provider factory.
pub type Factory = fn(AccessToken, &TransportConfig) -> ProviderResult<ProviderClient>;

/// Returns the factory for `kind`.
pub fn factory_for(kind: ProviderKind) -> Factory {
    match kind {
        ProviderKind::GoogleTasks => |token: AccessToken, config: &TransportConfig| {
            new_client_with::<GoogleTasksApi>(token, config).map(ProviderClient::GoogleTasks)
        },
        ProviderKind::TickTick => |token: AccessToken, config: &TransportConfig| {
            new_client_with::<TickTickApi>(token, config).map(ProviderClient::TickTick)
        },
        ProviderKind::Todoist => |token: AccessToken, config: &TransportConfig| {
            new_client_with::<TodoistApi>(token, config).map(ProviderClient::Todoist)
        },
    }
}

/// Builds a client for `kind` with default transport settings.
pub fn connect(kind: ProviderKind, token: impl Into<AccessToken>) -> ProviderResult<ProviderClient> {
    connect_with(kind, token, &TransportConfig::default())
}

/// Builds a client for `kind` with explicit transport settings.
pub fn connect_with(
    kind: ProviderKind,
    token: impl Into<AccessToken>,
    config: &TransportConfig,
) -> ProviderResult<ProviderClient> {
    factory_for(kind)(token.into(), config)
}
