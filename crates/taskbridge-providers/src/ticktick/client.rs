//! TickTick Open API operations.

use tracing::debug;

use crate::error::ProviderResult;
use crate::transport::{HttpMethod, Operation, Transport, encode_segment};

use super::types::{NewTask, Project, ProjectData, Task};

const LIST_PROJECTS: Operation = Operation::bearer("getUserProjects", HttpMethod::Get);
const PROJECT_DATA: Operation = Operation::bearer("getProjectWithData", HttpMethod::Get);
const GET_TASK: Operation = Operation::bearer("getTaskById", HttpMethod::Get);
const CREATE_TASK: Operation = Operation::bearer("createTask", HttpMethod::Post);
const COMPLETE_TASK: Operation = Operation::bearer("completeTask", HttpMethod::Post);
const DELETE_TASK: Operation = Operation::bearer("deleteTask", HttpMethod::Delete);

/// TickTick Open API client.
#[derive(Debug, Clone)]
pub struct TickTickClient {
    transport: Transport,
}

impl TickTickClient {
    pub(crate) fn from_transport(transport: Transport) -> Self {
        Self { transport }
    }

    /// The transport this client sends through.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Lists the user's projects.
    pub async fn list_projects(&self) -> ProviderResult<Vec<Project>> {
        let projects: Vec<Project> = self.transport.call(LIST_PROJECTS, "project").send().await?;
        debug!("fetched {} projects", projects.len());
        Ok(projects)
    }

    /// Fetches a project together with its undone tasks and columns.
    pub async fn project_data(&self, project_id: &str) -> ProviderResult<ProjectData> {
        let path = format!("project/{}/data", encode_segment(project_id));
        self.transport.call(PROJECT_DATA, &path).send().await
    }

    /// Fetches one task.
    pub async fn get_task(&self, project_id: &str, task_id: &str) -> ProviderResult<Task> {
        self.transport
            .call(GET_TASK, &task_path(project_id, task_id))
            .send()
            .await
    }

    /// Creates a task.
    pub async fn create_task(&self, task: &NewTask) -> ProviderResult<Task> {
        self.transport.call(CREATE_TASK, "task").json(task)?.send().await
    }

    /// Marks a task completed. TickTick answers with an empty body.
    pub async fn complete_task(&self, project_id: &str, task_id: &str) -> ProviderResult<()> {
        let path = format!("{}/complete", task_path(project_id, task_id));
        self.transport.call(COMPLETE_TASK, &path).send_empty().await
    }

    /// Deletes a task.
    pub async fn delete_task(&self, project_id: &str, task_id: &str) -> ProviderResult<()> {
        self.transport
            .call(DELETE_TASK, &task_path(project_id, task_id))
            .send_empty()
            .await
    }
}

fn task_path(project_id: &str, task_id: &str) -> String {
    format!(
        "project/{}/task/{}",
        encode_segment(project_id),
        encode_segment(task_id)
    )
}
