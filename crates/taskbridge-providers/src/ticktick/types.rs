//! TickTick resource types.
//!
//! Dates are kept as the strings TickTick sends (`2019-11-13T03:00:00+0000`),
//! which are not RFC 3339.

use serde::{Deserialize, Serialize};

/// Task status value for a completed task.
const STATUS_COMPLETED: i32 = 2;

/// A project (list).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    #[serde(default)]
    pub closed: bool,
    pub group_id: Option<String>,
    pub view_mode: Option<String>,
    pub kind: Option<String>,
    pub sort_order: Option<i64>,
}

/// A checklist entry inside a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: i32,
}

/// A task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub project_id: String,
    #[serde(default)]
    pub title: String,
    pub content: Option<String>,
    pub desc: Option<String>,
    #[serde(default)]
    pub is_all_day: bool,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    pub time_zone: Option<String>,
    /// 0 none, 1 low, 3 medium, 5 high.
    #[serde(default)]
    pub priority: i32,
    /// 0 normal, 2 completed.
    #[serde(default)]
    pub status: i32,
    pub completed_time: Option<String>,
    pub sort_order: Option<i64>,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

impl Task {
    /// Returns true if the task is completed.
    pub fn is_completed(&self) -> bool {
        self.status == STATUS_COMPLETED
    }
}

/// A kanban column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub sort_order: Option<i64>,
}

/// A project with its undone tasks and columns.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    pub project: Project,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub columns: Vec<Column>,
}

/// Body of `createTask`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    /// Target project; the inbox when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_all_day: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn in_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }
}
