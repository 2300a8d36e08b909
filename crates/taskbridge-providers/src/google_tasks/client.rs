//! Google Tasks API operations.

use serde_json::json;
use tracing::debug;

use crate::error::ProviderResult;
use crate::transport::{HttpMethod, Operation, Transport, encode_segment, next_cursor};

use super::types::{ListTasksOptions, NewTask, Page, Task, TaskList};

const LIST_TASK_LISTS: Operation = Operation::bearer("tasks.tasklists.list", HttpMethod::Get);
const LIST_TASKS: Operation = Operation::bearer("tasks.tasks.list", HttpMethod::Get);
const GET_TASK: Operation = Operation::bearer("tasks.tasks.get", HttpMethod::Get);
const INSERT_TASK: Operation = Operation::bearer("tasks.tasks.insert", HttpMethod::Post);
const PATCH_TASK: Operation = Operation::bearer("tasks.tasks.patch", HttpMethod::Patch);
const DELETE_TASK: Operation = Operation::bearer("tasks.tasks.delete", HttpMethod::Delete);

/// Google Tasks API client.
#[derive(Debug, Clone)]
pub struct TasksClient {
    transport: Transport,
}

impl TasksClient {
    pub(crate) fn from_transport(transport: Transport) -> Self {
        Self { transport }
    }

    /// The transport this client sends through.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Lists all task lists of the user, following pagination.
    pub async fn list_task_lists(&self) -> ProviderResult<Vec<TaskList>> {
        let mut lists = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page: Page<TaskList> = self
                .transport
                .call(LIST_TASK_LISTS, "users/@me/lists")
                .query("maxResults", 100)
                .query_opt("pageToken", page_token.as_deref())
                .send()
                .await?;

            lists.extend(page.items);
            match next_cursor(page_token.as_deref(), page.next_page_token) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!("fetched {} task lists", lists.len());
        Ok(lists)
    }

    /// Lists the tasks of a list, following pagination.
    pub async fn list_tasks(
        &self,
        list_id: &str,
        options: ListTasksOptions,
    ) -> ProviderResult<Vec<Task>> {
        let path = format!("lists/{}/tasks", encode_segment(list_id));
        let mut tasks = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page: Page<Task> = self
                .transport
                .call(LIST_TASKS, &path)
                .query_opt("showCompleted", options.show_completed)
                .query_opt("showHidden", options.show_hidden)
                .query_opt("maxResults", options.max_results)
                .query_opt("pageToken", page_token.as_deref())
                .send()
                .await?;

            tasks.extend(page.items);
            match next_cursor(page_token.as_deref(), page.next_page_token) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!("fetched {} tasks from list {}", tasks.len(), list_id);
        Ok(tasks)
    }

    /// Fetches one task.
    pub async fn get_task(&self, list_id: &str, task_id: &str) -> ProviderResult<Task> {
        self.transport
            .call(GET_TASK, &task_path(list_id, task_id))
            .send()
            .await
    }

    /// Creates a task at the top of a list.
    pub async fn insert_task(&self, list_id: &str, task: &NewTask) -> ProviderResult<Task> {
        let path = format!("lists/{}/tasks", encode_segment(list_id));
        self.transport
            .call(INSERT_TASK, &path)
            .json(task)?
            .send()
            .await
    }

    /// Marks a task completed.
    pub async fn complete_task(&self, list_id: &str, task_id: &str) -> ProviderResult<Task> {
        self.transport
            .call(PATCH_TASK, &task_path(list_id, task_id))
            .json(&json!({ "status": "completed" }))?
            .send()
            .await
    }

    /// Deletes a task.
    pub async fn delete_task(&self, list_id: &str, task_id: &str) -> ProviderResult<()> {
        self.transport
            .call(DELETE_TASK, &task_path(list_id, task_id))
            .send_empty()
            .await
    }
}

fn task_path(list_id: &str, task_id: &str) -> String {
    format!(
        "lists/{}/tasks/{}",
        encode_segment(list_id),
        encode_segment(task_id)
    )
}
