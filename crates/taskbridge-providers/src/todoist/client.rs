//! Todoist API operations.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ProviderResult;
use crate::transport::{HttpMethod, Operation, Transport, encode_segment, next_cursor};

use super::types::{NewTask, Page, Project, Task};

const GET_PROJECTS: Operation = Operation::bearer("getProjects", HttpMethod::Get);
const GET_TASKS: Operation = Operation::bearer("getTasks", HttpMethod::Get);
const GET_TASK: Operation = Operation::bearer("getTask", HttpMethod::Get);
const CREATE_TASK: Operation = Operation::bearer("createTask", HttpMethod::Post);
const CLOSE_TASK: Operation = Operation::bearer("closeTask", HttpMethod::Post);
const DELETE_TASK: Operation = Operation::bearer("deleteTask", HttpMethod::Delete);

/// Page size requested from list endpoints.
const PAGE_LIMIT: u32 = 200;

/// Todoist API client.
#[derive(Debug, Clone)]
pub struct TodoistClient {
    transport: Transport,
}

impl TodoistClient {
    pub(crate) fn from_transport(transport: Transport) -> Self {
        Self { transport }
    }

    /// The transport this client sends through.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Lists all projects.
    pub async fn list_projects(&self) -> ProviderResult<Vec<Project>> {
        let projects = self.collect_pages(GET_PROJECTS, "projects", None).await?;
        debug!("fetched {} projects", projects.len());
        Ok(projects)
    }

    /// Lists active tasks, optionally restricted to one project.
    pub async fn list_tasks(&self, project_id: Option<&str>) -> ProviderResult<Vec<Task>> {
        let tasks = self
            .collect_pages(GET_TASKS, "tasks", project_id.map(|id| ("project_id", id)))
            .await?;
        debug!("fetched {} tasks", tasks.len());
        Ok(tasks)
    }

    /// Fetches one task.
    pub async fn get_task(&self, task_id: &str) -> ProviderResult<Task> {
        let path = format!("tasks/{}", encode_segment(task_id));
        self.transport.call(GET_TASK, &path).send().await
    }

    /// Creates a task.
    pub async fn create_task(&self, task: &NewTask) -> ProviderResult<Task> {
        self.transport.call(CREATE_TASK, "tasks").json(task)?.send().await
    }

    /// Closes (completes) a task.
    pub async fn close_task(&self, task_id: &str) -> ProviderResult<()> {
        let path = format!("tasks/{}/close", encode_segment(task_id));
        self.transport.call(CLOSE_TASK, &path).send_empty().await
    }

    /// Deletes a task.
    pub async fn delete_task(&self, task_id: &str) -> ProviderResult<()> {
        let path = format!("tasks/{}", encode_segment(task_id));
        self.transport.call(DELETE_TASK, &path).send_empty().await
    }

    async fn collect_pages<T: DeserializeOwned>(
        &self,
        operation: Operation,
        path: &str,
        filter: Option<(&str, &str)>,
    ) -> ProviderResult<Vec<T>> {
        let mut items = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut call = self
                .transport
                .call(operation, path)
                .query("limit", PAGE_LIMIT)
                .query_opt("cursor", cursor.as_deref());
            if let Some((key, value)) = filter {
                call = call.query(key, value);
            }

            let page: Page<T> = call.send().await?;
            items.extend(page.results);
            match next_cursor(cursor.as_deref(), page.next_cursor) {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(items)
    }
}
