//! Configuration commands.

use taskbridge_core::ProviderKind;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::secret;

const REDACTED: &str = "<redacted>";

/// Dump the current configuration to stdout. Literal tokens are redacted;
/// `env::` and `pass::` references are shown as written.
pub fn dump(config: &ClientConfig) -> ClientResult<()> {
    println!("{}", render(config)?);
    Ok(())
}

/// Validate the configuration: every configured token must resolve to a
/// non-empty value.
pub fn validate(config: &ClientConfig) -> ClientResult<()> {
    let checked = check_tokens(config)?;
    if checked.is_empty() {
        println!("No providers configured.");
    }
    for kind in checked {
        println!("{} token resolves.", kind.display_name());
    }
    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path(config: &ClientConfig) -> ClientResult<()> {
    println!("{}", path_line(config));
    Ok(())
}

fn path_line(config: &ClientConfig) -> String {
    format!("config: {}", config.path().display())
}

fn render(config: &ClientConfig) -> ClientResult<String> {
    let mut shown = config.clone();
    for settings in [
        &mut shown.google_tasks,
        &mut shown.ticktick,
        &mut shown.todoist,
    ]
    .into_iter()
    .flatten()
    {
        if let Some(ref mut token) = settings.token {
            if !secret::is_reference(token) {
                *token = REDACTED.to_string();
            }
        }
    }

    let toml_str = toml::to_string_pretty(&shown)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    Ok(format!("# config.toml ({})\n{}", config.path().display(), toml_str))
}

fn check_tokens(config: &ClientConfig) -> ClientResult<Vec<ProviderKind>> {
    let mut checked = Vec::new();
    for kind in ProviderKind::ALL {
        if config.provider(kind).is_none() {
            continue;
        }
        let token = config.resolve_token(kind).map_err(ClientError::Config)?;
        if token.is_empty() {
            return Err(ClientError::Config(format!(
                "{} token is empty",
                kind.display_name()
            )));
        }
        checked.push(kind);
    }
    Ok(checked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_fails_validation() {
        let config: ClientConfig = toml::from_str("[todoist]\ntoken = \"\"\n").unwrap();
        let err = check_tokens(&config).unwrap_err();
        assert!(err.to_string().contains("Todoist token is empty"));
    }

    #[test]
    fn dump_redacts_literal_tokens() {
        let config: ClientConfig = toml::from_str(
            "[todoist]\ntoken = \"super-secret-plain\"\n\n[ticktick]\ntoken = \"env::TICKTICK_TOKEN\"\n",
        )
        .unwrap();
        let rendered = render(&config).unwrap();
        assert!(!rendered.contains("super-secret-plain"));
        assert!(rendered.contains(r#"token = "<redacted>""#));
        assert!(rendered.contains(r#"token = "env::TICKTICK_TOKEN""#));
    }

    #[test]
    fn path_reports_the_loaded_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "debug = true\n").unwrap();

        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(path_line(&config), format!("config: {}", path.display()));
        assert!(render(&config).unwrap().starts_with(&format!("# config.toml ({})", path.display())));
    }

    #[test]
    fn only_configured_providers_are_checked() {
        let config: ClientConfig =
            toml::from_str("[ticktick]\ntoken = \"tt\"\n").unwrap();
        assert_eq!(check_tokens(&config).unwrap(), vec![ProviderKind::TickTick]);
        assert!(check_tokens(&ClientConfig::default()).unwrap().is_empty());
    }
}
