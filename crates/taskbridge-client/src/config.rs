//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/taskbridge/config.toml` by default:
//!
//! ```toml
//! [http]
//! timeout_secs = 30
//!
//! [google_tasks]
//! token = "env::GOOGLE_TASKS_TOKEN"
//! default_list = "@default"
//!
//! [ticktick]
//! token = "pass::ticktick/token"
//! default_list = "6226ff9877acee87727f6bca"
//!
//! [todoist]
//! token = "0123456789abcdef"
//! ```
//!
//! Token values support secret references (see [`crate::secret`]).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use taskbridge_core::{AccessToken, ProviderKind};
use taskbridge_providers::TransportConfig;

/// Configuration for the taskbridge client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// HTTP settings shared by every provider.
    pub http: HttpSettings,

    /// Google Tasks settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_tasks: Option<ProviderSettings>,

    /// TickTick settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticktick: Option<ProviderSettings>,

    /// Todoist settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todoist: Option<ProviderSettings>,

    /// File this configuration was read from.
    #[serde(skip)]
    source: Option<PathBuf>,
}

/// HTTP settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Custom user agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: None,
        }
    }
}

impl HttpSettings {
    /// Converts to transport settings for the provider clients.
    pub fn to_transport_config(&self) -> TransportConfig {
        let config = TransportConfig::default().with_timeout(Duration::from_secs(self.timeout_secs));
        match self.user_agent {
            Some(ref agent) => config.with_user_agent(agent),
            None => config,
        }
    }
}

/// Per-provider settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Access token (supports `pass::` and `env::` prefixes).
    pub token: Option<String>,

    /// List or project used when a command does not name one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_list: Option<String>,
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        let mut config: Self =
            toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Returns the file this configuration belongs to: the one it was loaded
    /// from, or the default path.
    pub fn path(&self) -> PathBuf {
        self.source.clone().unwrap_or_else(Self::default_path)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("taskbridge")
            .join("config.toml")
    }

    /// Returns the settings section for a provider, if present.
    pub fn provider(&self, kind: ProviderKind) -> Option<&ProviderSettings> {
        match kind {
            ProviderKind::GoogleTasks => self.google_tasks.as_ref(),
            ProviderKind::TickTick => self.ticktick.as_ref(),
            ProviderKind::Todoist => self.todoist.as_ref(),
        }
    }

    /// Returns the configured default list for a provider.
    pub fn default_list(&self, kind: ProviderKind) -> Option<&str> {
        self.provider(kind)?.default_list.as_deref()
    }

    /// Resolves the access token for a provider.
    ///
    /// Secret references are expanded. The token is not checked for being
    /// empty here; the provider factory rejects that.
    pub fn resolve_token(&self, kind: ProviderKind) -> Result<AccessToken, String> {
        let raw = self
            .provider(kind)
            .and_then(|settings| settings.token.as_deref())
            .ok_or_else(|| {
                format!(
                    "no token configured for {}. Add to {}:\n  \
                     [{}]\n  \
                     token = \"env::YOUR_TOKEN_VAR\"\n\n  \
                     Or pass --token",
                    kind.display_name(),
                    self.path().display(),
                    kind.as_str()
                )
            })?;

        crate::secret::resolve(raw)
            .map(AccessToken::from)
            .map_err(|e| format!("failed to resolve {} token: {}", kind, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert!(!config.debug);
        assert_eq!(config.http.timeout_secs, 30);
        for kind in ProviderKind::ALL {
            assert!(config.provider(kind).is_none());
        }
    }

    #[test]
    fn parse_full_config() {
        let toml_content = r#"
debug = true

[http]
timeout_secs = 5
user_agent = "my-host/1.0"

[google_tasks]
token = "ya29.plain"
default_list = "@default"

[todoist]
token = "0123"
"#;
        let config: ClientConfig = toml::from_str(toml_content).unwrap();
        assert!(config.debug);
        assert_eq!(config.default_list(ProviderKind::GoogleTasks), Some("@default"));
        assert!(config.ticktick.is_none());
        assert_eq!(
            config.resolve_token(ProviderKind::Todoist).unwrap().as_str(),
            "0123"
        );

        let transport = config.http.to_transport_config();
        assert_eq!(transport.timeout, Duration::from_secs(5));
        assert_eq!(transport.user_agent, "my-host/1.0");
    }

    #[test]
    fn missing_token_mentions_section() {
        let config: ClientConfig = toml::from_str("[ticktick]\n").unwrap();
        let err = config.resolve_token(ProviderKind::TickTick).unwrap_err();
        assert!(err.contains("[ticktick]"));
    }

    #[test]
    fn missing_token_hint_names_the_loaded_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("work.toml");
        std::fs::write(&path, "[todoist]\n").unwrap();

        let config = ClientConfig::load_from(&path).unwrap();
        let err = config.resolve_token(ProviderKind::Todoist).unwrap_err();
        assert!(err.contains(&path.display().to_string()));
        assert_eq!(ClientConfig::default().path(), ClientConfig::default_path());
    }

    #[test]
    fn env_reference_token() {
        unsafe {
            std::env::set_var("_TB_CONFIG_TEST_TOKEN", "tok-env");
        }
        let config: ClientConfig =
            toml::from_str("[todoist]\ntoken = \"env::_TB_CONFIG_TEST_TOKEN\"\n").unwrap();
        assert_eq!(
            config.resolve_token(ProviderKind::Todoist).unwrap().as_str(),
            "tok-env"
        );
        unsafe {
            std::env::remove_var("_TB_CONFIG_TEST_TOKEN");
        }
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[http]\ntimeout_secs = 12\n").unwrap();

        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(config.http.timeout_secs, 12);
        assert_eq!(config.path(), path);

        std::fs::write(&path, "[http\n").unwrap();
        assert!(ClientConfig::load_from(&path).unwrap_err().contains("parse"));
    }

    #[test]
    fn dump_omits_absent_sections() {
        let config = ClientConfig {
            todoist: Some(ProviderSettings {
                token: Some("env::TODOIST_TOKEN".to_string()),
                default_list: None,
            }),
            ..Default::default()
        };
        let rendered = toml::to_string_pretty(&config).unwrap();
        assert!(rendered.contains("[todoist]"));
        assert!(rendered.contains(r#"token = "env::TODOIST_TOKEN""#));
        assert!(!rendered.contains("[ticktick]"));
        assert!(!rendered.contains("[google_tasks]"));
        assert!(!rendered.contains("user_agent"));
        assert!(!rendered.contains("default_list"));
    }
}
