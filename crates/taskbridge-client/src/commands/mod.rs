//! Command implementations.

pub mod config;
pub mod providers;
pub mod tasks;

use serde::Serialize;
use taskbridge_core::{AccessToken, ProviderKind};
use taskbridge_providers::{ProviderClient, connect_with};

use crate::cli::Cli;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Builds a client for `kind`, preferring a `--token` override.
pub fn client_for(
    cli: &Cli,
    config: &ClientConfig,
    kind: ProviderKind,
) -> ClientResult<ProviderClient> {
    let token = match cli.token {
        Some(ref token) => {
            AccessToken::from(crate::secret::resolve(token).map_err(ClientError::AuthRequired)?)
        }
        None => config.resolve_token(kind).map_err(ClientError::AuthRequired)?,
    };
    Ok(connect_with(kind, token, &config.http.to_transport_config())?)
}

/// Prints rows either as JSON or as tab-separated lines.
pub fn print_rows<T: Serialize + Row>(rows: &[T], json: bool) -> ClientResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
    } else {
        for row in rows {
            println!("{}", row.line());
        }
    }
    Ok(())
}

/// A printable output line.
pub trait Row {
    fn line(&self) -> String;
}
