//! Provider identity.
//!
//! The set of supported providers is closed. Each identity is paired with a
//! fixed base URL that never varies at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base URL of the Google Tasks API.
pub const GOOGLE_TASKS_BASE_URL: &str = "https://tasks.googleapis.com/tasks/v1";

/// Base URL of the TickTick Open API.
pub const TICKTICK_BASE_URL: &str = "https://api.ticktick.com/open/v1";

/// Base URL of the Todoist API.
pub const TODOIST_BASE_URL: &str = "https://api.todoist.com/api/v1";

/// One of the supported task providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Google Tasks (calendar/tasks provider).
    GoogleTasks,
    /// TickTick (personal-todo provider).
    #[serde(rename = "ticktick")]
    TickTick,
    /// Todoist (general todo-list provider).
    Todoist,
}

impl ProviderKind {
    /// Every provider, in a stable order.
    pub const ALL: [ProviderKind; 3] = [Self::GoogleTasks, Self::TickTick, Self::Todoist];

    /// Returns the short machine name (`google_tasks`, `ticktick`, `todoist`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GoogleTasks => "google_tasks",
            Self::TickTick => "ticktick",
            Self::Todoist => "todoist",
        }
    }

    /// Returns a human-readable name.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::GoogleTasks => "Google Tasks",
            Self::TickTick => "TickTick",
            Self::Todoist => "Todoist",
        }
    }

    /// Returns the fixed API base URL for this provider.
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::GoogleTasks => GOOGLE_TASKS_BASE_URL,
            Self::TickTick => TICKTICK_BASE_URL,
            Self::Todoist => TODOIST_BASE_URL,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown provider `{0}` (expected one of: google_tasks, ticktick, todoist)")]
pub struct ParseProviderError(String);

impl FromStr for ProviderKind {
    type Err = ParseProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "google_tasks" | "google" | "gtasks" => Ok(Self::GoogleTasks),
            "ticktick" => Ok(Self::TickTick),
            "todoist" => Ok(Self::Todoist),
            _ => Err(ParseProviderError(s.to_string())),
        }
    }
}
