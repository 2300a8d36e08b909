//! taskbridge CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use taskbridge_core::tracing::{TracingConfig, init_tracing};

use taskbridge_client::cli::{Cli, Command, ConfigAction};
use taskbridge_client::commands;
use taskbridge_client::config::ClientConfig;
use taskbridge_client::error::{ClientError, ClientResult};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let tracing_config = if cli.debug || config.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::cli()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    match run(&cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> ClientResult<ClientConfig> {
    match cli.config {
        Some(ref path) => ClientConfig::load_from(path).map_err(ClientError::Config),
        None => ClientConfig::load().map_err(ClientError::Config),
    }
}

async fn run(cli: &Cli, config: &ClientConfig) -> ClientResult<()> {
    match cli.command {
        Command::Providers => commands::providers::list(cli.json),
        Command::Lists { provider } => {
            let client = commands::client_for(cli, config, provider)?;
            commands::tasks::lists(&client, cli.json).await
        }
        Command::Tasks { provider, ref list } => {
            let client = commands::client_for(cli, config, provider)?;
            let list = list.as_deref().or(config.default_list(provider));
            commands::tasks::tasks(&client, list, cli.json).await
        }
        Command::Add {
            provider,
            ref title,
            ref list,
        } => {
            let client = commands::client_for(cli, config, provider)?;
            let list = list.as_deref().or(config.default_list(provider));
            commands::tasks::add(&client, title, list, cli.json).await
        }
        Command::Done {
            provider,
            ref task_id,
            ref list,
        } => {
            let client = commands::client_for(cli, config, provider)?;
            let list = list.as_deref().or(config.default_list(provider));
            commands::tasks::done(&client, task_id, list).await
        }
        Command::Config { ref action } => match action {
            ConfigAction::Dump => commands::config::dump(config),
            ConfigAction::Validate => commands::config::validate(config),
            ConfigAction::Path => commands::config::path(config),
        },
    }
}
