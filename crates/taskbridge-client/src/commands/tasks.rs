//! `lists`, `tasks`, `add` and `done` commands.
//!
//! Each command matches on the concrete client; there is no shared task
//! model across providers, only a shared output row.

use serde::Serialize;
use taskbridge_core::ProviderKind;
use taskbridge_providers::{ProviderClient, google_tasks, ticktick, todoist};
use tracing::debug;

use super::{Row, print_rows};
use crate::error::{ClientError, ClientResult};

/// Google Tasks' alias for the user's default list.
const GOOGLE_DEFAULT_LIST: &str = "@default";

/// One list or project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRow {
    pub id: String,
    pub name: String,
}

impl Row for ListRow {
    fn line(&self) -> String {
        format!("{}\t{}", self.id, self.name)
    }
}

/// One task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRow {
    pub id: String,
    pub title: String,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
}

impl Row for TaskRow {
    fn line(&self) -> String {
        let mark = if self.done { "x" } else { " " };
        match self.due {
            Some(ref due) => format!("[{}] {}\t{}\t(due {})", mark, self.id, self.title, due),
            None => format!("[{}] {}\t{}", mark, self.id, self.title),
        }
    }
}

impl From<google_tasks::Task> for TaskRow {
    fn from(task: google_tasks::Task) -> Self {
        Self {
            done: task.is_completed(),
            due: task.due.map(|d| d.date_naive().to_string()),
            id: task.id,
            title: task.title,
        }
    }
}

impl From<ticktick::Task> for TaskRow {
    fn from(task: ticktick::Task) -> Self {
        Self {
            done: task.is_completed(),
            id: task.id,
            title: task.title,
            due: task.due_date,
        }
    }
}

impl From<todoist::Task> for TaskRow {
    fn from(task: todoist::Task) -> Self {
        Self {
            id: task.id,
            title: task.content,
            done: task.checked,
            due: task.due.map(|d| d.date),
        }
    }
}

/// Lists task lists or projects.
pub async fn lists(client: &ProviderClient, json: bool) -> ClientResult<()> {
    let rows: Vec<ListRow> = match client {
        ProviderClient::GoogleTasks(c) => c
            .list_task_lists()
            .await?
            .into_iter()
            .map(|l| ListRow { id: l.id, name: l.title })
            .collect(),
        ProviderClient::TickTick(c) => c
            .list_projects()
            .await?
            .into_iter()
            .filter(|p| !p.closed)
            .map(|p| ListRow { id: p.id, name: p.name })
            .collect(),
        ProviderClient::Todoist(c) => c
            .list_projects()
            .await?
            .into_iter()
            .map(|p| ListRow { id: p.id, name: p.name })
            .collect(),
    };
    print_rows(&rows, json)
}

/// Lists tasks of a list/project.
pub async fn tasks(client: &ProviderClient, list: Option<&str>, json: bool) -> ClientResult<()> {
    let rows: Vec<TaskRow> = match client {
        ProviderClient::GoogleTasks(c) => c
            .list_tasks(
                list.unwrap_or(GOOGLE_DEFAULT_LIST),
                google_tasks::ListTasksOptions::new(),
            )
            .await?
            .into_iter()
            .filter(|t| !t.deleted)
            .map(TaskRow::from)
            .collect(),
        ProviderClient::TickTick(c) => {
            let project = require_list(ProviderKind::TickTick, list)?;
            c.project_data(project)
                .await?
                .tasks
                .into_iter()
                .map(TaskRow::from)
                .collect()
        }
        ProviderClient::Todoist(c) => c
            .list_tasks(list)
            .await?
            .into_iter()
            .map(TaskRow::from)
            .collect(),
    };
    debug!("{} tasks", rows.len());
    print_rows(&rows, json)
}

/// Creates a task.
pub async fn add(
    client: &ProviderClient,
    title: &str,
    list: Option<&str>,
    json: bool,
) -> ClientResult<()> {
    let row: TaskRow = match client {
        ProviderClient::GoogleTasks(c) => c
            .insert_task(
                list.unwrap_or(GOOGLE_DEFAULT_LIST),
                &google_tasks::NewTask::new(title),
            )
            .await?
            .into(),
        ProviderClient::TickTick(c) => {
            let mut task = ticktick::NewTask::new(title);
            if let Some(project) = list {
                task = task.in_project(project);
            }
            c.create_task(&task).await?.into()
        }
        ProviderClient::Todoist(c) => {
            let mut task = todoist::NewTask::new(title);
            if let Some(project) = list {
                task = task.in_project(project);
            }
            c.create_task(&task).await?.into()
        }
    };
    print_rows(&[row], json)
}

/// Completes a task.
pub async fn done(client: &ProviderClient, task_id: &str, list: Option<&str>) -> ClientResult<()> {
    match client {
        ProviderClient::GoogleTasks(c) => {
            c.complete_task(list.unwrap_or(GOOGLE_DEFAULT_LIST), task_id)
                .await?;
        }
        ProviderClient::TickTick(c) => {
            let project = require_list(ProviderKind::TickTick, list)?;
            c.complete_task(project, task_id).await?;
        }
        ProviderClient::Todoist(c) => c.close_task(task_id).await?,
    }
    println!("completed {}", task_id);
    Ok(())
}

fn require_list(kind: ProviderKind, list: Option<&str>) -> ClientResult<&str> {
    list.ok_or_else(|| {
        ClientError::Config(format!(
            "{} needs a project id: pass --list or set default_list in [{}]",
            kind.display_name(),
            kind.as_str()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_row_lines() {
        let open = TaskRow {
            id: "1".into(),
            title: "Buy milk".into(),
            done: false,
            due: None,
        };
        assert_eq!(open.line(), "[ ] 1\tBuy milk");

        let closed = TaskRow {
            id: "2".into(),
            title: "Pay rent".into(),
            done: true,
            due: Some("2024-04-01".into()),
        };
        assert_eq!(closed.line(), "[x] 2\tPay rent\t(due 2024-04-01)");
    }

    #[test]
    fn rows_from_provider_tasks() {
        let google: google_tasks::Task = serde_json::from_str(
            r#"{"id": "g1", "title": "G", "status": "completed", "due": "2024-03-16T00:00:00.000Z"}"#,
        )
        .unwrap();
        let row = TaskRow::from(google);
        assert!(row.done);
        assert_eq!(row.due.as_deref(), Some("2024-03-16"));

        let todo: todoist::Task = serde_json::from_str(
            r#"{"id": "d1", "content": "D", "project_id": "p", "due": {"date": "2024-05-10"}}"#,
        )
        .unwrap();
        let row = TaskRow::from(todo);
        assert_eq!(row.title, "D");
        assert_eq!(row.due.as_deref(), Some("2024-05-10"));
    }

    #[test]
    fn ticktick_requires_a_project() {
        let err = require_list(ProviderKind::TickTick, None).unwrap_err();
        assert!(err.to_string().contains("[ticktick]"));
        assert_eq!(require_list(ProviderKind::TickTick, Some("p1")).unwrap(), "p1");
    }
}
