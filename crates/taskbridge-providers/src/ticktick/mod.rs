//! TickTick Open API client, rooted at `https://api.ticktick.com/open/v1`.

mod client;
mod types;

pub use client::TickTickClient;
pub use types::{ChecklistItem, Column, NewTask, Project, ProjectData, Task};

use taskbridge_core::AccessToken;

use crate::error::ProviderResult;
use crate::factory::TickTickApi;

/// Builds a TickTick client authenticated with `token`.
pub fn new_client(token: impl Into<AccessToken>) -> ProviderResult<TickTickClient> {
    crate::factory::new_client::<TickTickApi>(token)
}
