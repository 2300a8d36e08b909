//! Google Tasks client.
//!
//! Covers task lists and tasks of the authenticated user, rooted at
//! `https://tasks.googleapis.com/tasks/v1`. The caller supplies an OAuth
//! access token with the `tasks` or `tasks.readonly` scope; obtaining and
//! refreshing it is the host application's job.
//!
//! ```ignore
//! let client = taskbridge_providers::google_tasks::new_client(token)?;
//! for list in client.list_task_lists().await? {
//!     let tasks = client.list_tasks(&list.id, ListTasksOptions::new()).await?;
//! }
//! ```

mod client;
mod types;

pub use client::TasksClient;
pub use types::{ListTasksOptions, NewTask, Task, TaskList, TaskStatus};

use taskbridge_core::AccessToken;

use crate::error::ProviderResult;
use crate::factory::GoogleTasksApi;

/// Builds a Google Tasks client authenticated with `token`.
pub fn new_client(token: impl Into<AccessToken>) -> ProviderResult<TasksClient> {
    crate::factory::new_client::<GoogleTasksApi>(token)
}
