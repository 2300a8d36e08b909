//! Todoist client, rooted at `https://api.todoist.com/api/v1`.
//!
//! List endpoints are cursor-paginated (`results` / `next_cursor`); the
//! client follows cursors until exhausted.

mod client;
mod types;

pub use client::TodoistClient;
pub use types::{Due, NewTask, Project, Task};

use taskbridge_core::AccessToken;

use crate::error::ProviderResult;
use crate::factory::TodoistApi;

/// Builds a Todoist client authenticated with `token`.
pub fn new_client(token: impl Into<AccessToken>) -> ProviderResult<TodoistClient> {
    crate::factory::new_client::<TodoistApi>(token)
}
