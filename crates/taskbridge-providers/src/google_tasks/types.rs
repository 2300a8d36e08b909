//! Google Tasks resource types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskList {
    pub id: String,
    pub title: String,
    pub updated: Option<DateTime<Utc>>,
    pub self_link: Option<String>,
}

/// Completion state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    NeedsAction,
    Completed,
}

/// A task within a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub notes: Option<String>,
    pub status: Option<TaskStatus>,
    /// Due date. Google only keeps the date part; the time is always midnight UTC.
    pub due: Option<DateTime<Utc>>,
    pub completed: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    /// Parent task id for subtasks.
    pub parent: Option<String>,
    pub position: Option<String>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub hidden: bool,
    pub web_view_link: Option<String>,
}

impl Task {
    /// Returns true if the task is marked completed.
    pub fn is_completed(&self) -> bool {
        self.status == Some(TaskStatus::Completed)
    }
}

/// Body of `tasks.insert`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<DateTime<Utc>>,
}

impl NewTask {
    /// Creates a task with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Builder method to set notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Builder method to set the due date.
    pub fn with_due(mut self, due: DateTime<Utc>) -> Self {
        self.due = Some(due);
        self
    }
}

/// Filters for `tasks.list`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTasksOptions {
    /// Include completed tasks (server default: true).
    pub show_completed: Option<bool>,
    /// Include hidden (cleared) tasks (server default: false).
    pub show_hidden: Option<bool>,
    /// Page size, at most 100.
    pub max_results: Option<u32>,
}

impl ListTasksOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to include or exclude completed tasks.
    pub fn with_show_completed(mut self, show: bool) -> Self {
        self.show_completed = Some(show);
        self
    }

    /// Builder method to include or exclude hidden tasks.
    pub fn with_show_hidden(mut self, show: bool) -> Self {
        self.show_hidden = Some(show);
        self
    }

    /// Builder method to set the page size.
    pub fn with_max_results(mut self, max: u32) -> Self {
        self.max_results = Some(max.min(100));
        self
    }
}

/// One page of a list response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    pub next_page_token: Option<String>,
}
