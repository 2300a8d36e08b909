//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use taskbridge_core::ProviderKind;

/// taskbridge - one CLI for Google Tasks, TickTick and Todoist
#[derive(Debug, Parser)]
#[command(name = "taskbridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "TASKBRIDGE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Access token, overriding the configured one
    #[arg(long, env = "TASKBRIDGE_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List supported providers and their API base URLs
    Providers,

    /// List task lists (Google Tasks) or projects (TickTick, Todoist)
    Lists {
        /// Provider: google_tasks, ticktick or todoist
        provider: ProviderKind,
    },

    /// List tasks
    Tasks {
        provider: ProviderKind,

        /// List or project id (defaults to the configured default_list)
        #[arg(long, short)]
        list: Option<String>,
    },

    /// Create a task
    Add {
        provider: ProviderKind,

        /// Task title
        title: String,

        /// List or project id
        #[arg(long, short)]
        list: Option<String>,
    },

    /// Complete a task
    Done {
        provider: ProviderKind,

        /// Task id
        task_id: String,

        /// List or project id
        #[arg(long, short)]
        list: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the loaded configuration
    Dump,
    /// Check that every configured token resolves
    Validate,
    /// Print the configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_tasks_command() {
        let cli = Cli::try_parse_from(["taskbridge", "tasks", "google-tasks", "--list", "L1"]).unwrap();
        match cli.command {
            Command::Tasks { provider, list } => {
                assert_eq!(provider, ProviderKind::GoogleTasks);
                assert_eq!(list.as_deref(), Some("L1"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn unknown_provider_is_rejected() {
        assert!(Cli::try_parse_from(["taskbridge", "lists", "trello"]).is_err());
    }
}
