//! `providers` command.

use serde::Serialize;
use taskbridge_core::ProviderKind;

use super::{Row, print_rows};
use crate::error::ClientResult;

#[derive(Debug, Serialize)]
pub struct ProviderRow {
    pub name: &'static str,
    pub display_name: &'static str,
    pub base_url: &'static str,
}

impl Row for ProviderRow {
    fn line(&self) -> String {
        format!("{}\t{}\t{}", self.name, self.display_name, self.base_url)
    }
}

pub fn rows() -> Vec<ProviderRow> {
    ProviderKind::ALL
        .iter()
        .map(|kind| ProviderRow {
            name: kind.as_str(),
            display_name: kind.display_name(),
            base_url: kind.base_url(),
        })
        .collect()
}

pub fn list(json: bool) -> ClientResult<()> {
    print_rows(&rows(), json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_lines() {
        let lines: Vec<String> = rows().iter().map(Row::line).collect();
        insta::assert_snapshot!(lines.join("\n"), @r"
        google_tasks	Google Tasks	https://tasks.googleapis.com/tasks/v1
        ticktick	TickTick	https://api.ticktick.com/open/v1
        todoist	Todoist	https://api.todoist.com/api/v1
        ");
    }
}
