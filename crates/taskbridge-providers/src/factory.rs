//! Client factories.
//!
//! Every provider is described once in the table at the bottom of this file:
//! a marker type naming its [`ProviderKind`] (and through it the fixed base
//! URL) and the concrete client type it produces. [`new_client`] is the single
//! construction path shared by all of them:
//!
//! ```text
//! token ──► StaticToken ──► Transport(base URL, security, http) ──► P::Client
//! ```
//!
//! ```ignore
//! use taskbridge_providers::{new_client, TodoistApi};
//!
//! let client = new_client::<TodoistApi>("0123456789abcdef")?;
//! let tasks = client.list_tasks(None).await?;
//! ```

use std::sync::Arc;

use taskbridge_core::{AccessToken, ProviderKind};
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::security::{SecuritySource, StaticToken};
use crate::transport::{Transport, TransportConfig};

mod sealed {
    use crate::transport::Transport;

    /// Wraps a transport into a provider's client. Not nameable outside this
    /// crate, so a transport can only reach a client through a factory.
    pub trait Sealed {
        type Client;

        fn from_transport(transport: Transport) -> Self::Client;
    }
}

/// Binds a provider identity to its client type.
///
/// Implemented only by the marker types below.
pub trait ApiProvider: sealed::Sealed {
    /// The provider identity.
    const KIND: ProviderKind;

    /// The fixed base URL, paired 1:1 with [`Self::KIND`].
    const BASE_URL: &'static str;

    /// Builds a client against a local test server with any security source.
    ///
    /// Only available to tests and behind the `test-util` feature; factories
    /// always bind [`Self::BASE_URL`].
    #[cfg(any(test, feature = "test-util"))]
    fn connect(
        base_url: &str,
        security: Arc<dyn SecuritySource>,
        config: &TransportConfig,
    ) -> ProviderResult<Self::Client>
    where
        Self: Sized,
    {
        build::<Self>(base_url, security, config)
    }
}

fn build<P: ApiProvider>(
    base_url: &str,
    security: Arc<dyn SecuritySource>,
    config: &TransportConfig,
) -> ProviderResult<P::Client> {
    let transport = Transport::new(P::KIND, base_url, security, config)?;
    Ok(P::from_transport(transport))
}

/// Builds a client for provider `P` authenticated with `token`.
///
/// # Errors
///
/// Returns `Unauthenticated` if the token is empty, or `Construction` if the
/// client cannot be assembled. No request is made either way. The token's
/// content is not inspected beyond that; only the server can judge it.
pub fn new_client<P: ApiProvider>(token: impl Into<AccessToken>) -> ProviderResult<P::Client> {
    new_client_with::<P>(token, &TransportConfig::default())
}

/// Same as [`new_client`] with explicit transport settings.
pub fn new_client_with<P: ApiProvider>(
    token: impl Into<AccessToken>,
    config: &TransportConfig,
) -> ProviderResult<P::Client> {
    let token = token.into();
    if token.is_empty() {
        return Err(ProviderError::unauthenticated("access token is empty").with_provider(P::KIND));
    }

    debug!(provider = %P::KIND, base_url = P::BASE_URL, "building client");
    build::<P>(P::BASE_URL, Arc::new(StaticToken::new(token)), config)
}

macro_rules! providers {
    ($( $(#[$meta:meta])* $marker:ident => $kind:ident, $client:ty; )+) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $marker;

            impl sealed::Sealed for $marker {
                type Client = $client;

                fn from_transport(transport: Transport) -> Self::Client {
                    <$client>::from_transport(transport)
                }
            }

            impl ApiProvider for $marker {
                const KIND: ProviderKind = ProviderKind::$kind;
                const BASE_URL: &'static str = ProviderKind::$kind.base_url();
            }
        )+
    };
}

providers! {
    /// Google Tasks, `https://tasks.googleapis.com/tasks/v1`.
    GoogleTasksApi => GoogleTasks, crate::google_tasks::TasksClient;
    /// TickTick Open API, `https://api.ticktick.com/open/v1`.
    TickTickApi => TickTick, crate::ticktick::TickTickClient;
    /// Todoist API, `https://api.todoist.com/api/v1`.
    TodoistApi => Todoist, crate::todoist::TodoistClient;
}
