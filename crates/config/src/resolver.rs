//! Layered resolution into one effective [`Config`].

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{debug, info};
use url::Url;

use crate::error::ConfigError;
use crate::file::{default_candidates, load_first_existing};
use crate::layer::{ConfigLayer, Overrides, ENV_WEBHOOK_URL};

/// Placeholder used when the OS user or host cannot be determined.
pub const UNKNOWN: &str = "<unknown>";

/// Fully resolved configuration. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Absolute http(s) webhook endpoint.
    pub webhook_url: Url,
    /// Target channel; empty lets the webhook pick its default.
    pub channel: String,
    /// Display name; empty suppresses the field entirely.
    pub username: String,
    /// Icon emoji code; empty suppresses the field entirely.
    pub icon_emoji: String,
    /// Proxy for outbound requests.
    pub proxy: Option<Url>,
}

/// Merges defaults, the first config file, the environment and flags.
#[derive(Debug, Clone)]
pub struct Resolver {
    candidates: Vec<PathBuf>,
    env: HashMap<String, String>,
    default_name: Option<String>,
}

impl Resolver {
    /// Resolver over the given candidate files with an empty environment.
    #[must_use]
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self {
            candidates,
            env: HashMap::new(),
            default_name: None,
        }
    }

    /// Resolver over the standard candidate files and the process environment.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    #[must_use]
    pub fn from_system() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
        Self::new(default_candidates()).with_env(vars)
    }

    /// Replace the environment snapshot.
    #[must_use]
    pub fn with_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Use a fixed display name instead of looking up `user@host`.
    #[must_use]
    pub fn with_default_name(mut self, name: impl Into<String>) -> Self {
        self.default_name = Some(name.into());
        self
    }

    /// Produce the effective configuration.
    pub fn resolve(&self, overrides: &Overrides) -> Result<Config, ConfigError> {
        let mut layer = ConfigLayer::default();

        if let Some((path, file_layer)) = load_first_existing(&self.candidates)? {
            info!(path = %path.display(), "Using config file");
            layer = layer.merge(file_layer);
        }

        layer = layer.merge(ConfigLayer::from_env(|name| self.env.get(name).cloned()));
        layer = layer.merge(overrides.clone().into());

        self.finish(layer)
    }

    fn finish(&self, layer: ConfigLayer) -> Result<Config, ConfigError> {
        let raw_url = layer
            .webhook_url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ConfigError::MissingWebhookUrl {
                env_var: ENV_WEBHOOK_URL,
                candidates: self.candidates.clone(),
            })?;
        let webhook_url = parse_webhook_url(&raw_url)?;

        let proxy = match layer.proxy.filter(|p| !p.is_empty()) {
            Some(raw) => Some(
                Url::parse(&raw).map_err(|source| ConfigError::InvalidProxy { url: raw, source })?,
            ),
            None => None,
        };

        let username = match layer.username {
            Some(name) => name,
            None => self
                .default_name
                .clone()
                .unwrap_or_else(default_username),
        };

        let config = Config {
            webhook_url,
            channel: layer.channel.unwrap_or_default(),
            username,
            icon_emoji: layer.icon_emoji.unwrap_or_default(),
            proxy,
        };

        debug!(
            channel = %config.channel,
            username = %config.username,
            icon_emoji = %config.icon_emoji,
            proxy = config.proxy.is_some(),
            "Configuration resolved"
        );

        Ok(config)
    }
}

fn parse_webhook_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidWebhookUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidWebhookUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme `{other}`"),
        }),
    }
}

/// Default display name: `user@host`, with `<unknown>` for any part that
/// cannot be looked up.
pub fn default_username() -> String {
    let user = whoami::fallible::username().unwrap_or_else(|_| UNKNOWN.to_string());
    let host = whoami::fallible::hostname().unwrap_or_else(|_| UNKNOWN.to_string());
    format!("{user}@{host}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{ENV_CHANNEL, ENV_ICON, ENV_PROXY, ENV_USERNAME};
    use tempfile::TempDir;

    const FILE_URL: &str = "https://hooks.example.com/services/file";
    const ENV_URL: &str = "https://hooks.example.com/services/env";

    fn config_file(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("slackcat.conf");
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn resolver(candidates: Vec<PathBuf>) -> Resolver {
        Resolver::new(candidates).with_default_name("alice@box")
    }

    #[test]
    fn test_file_only() {
        let dir = TempDir::new().unwrap();
        let path = config_file(
            &dir,
            &format!(r##"{{"webhook_url": "{FILE_URL}", "channel": "#general"}}"##),
        );

        let config = resolver(vec![path]).resolve(&Overrides::default()).unwrap();

        assert_eq!(config.webhook_url.as_str(), FILE_URL);
        assert_eq!(config.channel, "#general");
        assert_eq!(config.username, "alice@box");
        assert_eq!(config.icon_emoji, "");
        assert_eq!(config.proxy, None);
    }

    #[test]
    fn test_precedence_file_env_flags() {
        let dir = TempDir::new().unwrap();
        let path = config_file(
            &dir,
            &format!(
                r##"{{"webhook_url": "{FILE_URL}", "channel": "#file", "username": "file-bot", "icon_emoji": ":file:"}}"##
            ),
        );

        let config = resolver(vec![path])
            .with_env([
                (ENV_WEBHOOK_URL, ENV_URL),
                (ENV_CHANNEL, "#env"),
                (ENV_USERNAME, "env-bot"),
            ])
            .resolve(&Overrides {
                channel: Some("#flag".to_string()),
                username: None,
                icon_emoji: None,
            })
            .unwrap();

        assert_eq!(config.webhook_url.as_str(), ENV_URL);
        assert_eq!(config.channel, "#flag");
        assert_eq!(config.username, "env-bot");
        assert_eq!(config.icon_emoji, ":file:");
    }

    #[test]
    fn test_empty_env_does_not_reset_file_value() {
        let dir = TempDir::new().unwrap();
        let path = config_file(
            &dir,
            &format!(r##"{{"webhook_url": "{FILE_URL}", "channel": "#file"}}"##),
        );

        let config = resolver(vec![path])
            .with_env([(ENV_WEBHOOK_URL, ""), (ENV_CHANNEL, ""), (ENV_ICON, "")])
            .resolve(&Overrides::default())
            .unwrap();

        assert_eq!(config.webhook_url.as_str(), FILE_URL);
        assert_eq!(config.channel, "#file");
    }

    #[test]
    fn test_explicit_empty_username_in_file_is_kept() {
        let dir = TempDir::new().unwrap();
        let path = config_file(
            &dir,
            &format!(r#"{{"webhook_url": "{FILE_URL}", "username": ""}}"#),
        );

        let config = resolver(vec![path]).resolve(&Overrides::default()).unwrap();
        assert_eq!(config.username, "");
    }

    #[test]
    fn test_null_username_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        let path = config_file(
            &dir,
            &format!(r#"{{"webhook_url": "{FILE_URL}", "username": null}}"#),
        );

        let config = resolver(vec![path]).resolve(&Overrides::default()).unwrap();
        assert_eq!(config.username, "alice@box");
    }

    #[test]
    fn test_flag_can_blank_username() {
        let config = resolver(vec![])
            .with_env([(ENV_WEBHOOK_URL, ENV_URL), (ENV_USERNAME, "env-bot")])
            .resolve(&Overrides {
                username: Some(String::new()),
                ..Overrides::default()
            })
            .unwrap();

        assert_eq!(config.username, "");
    }

    #[test]
    fn test_missing_webhook_url_lists_sources() {
        let dir = TempDir::new().unwrap();
        let candidates = vec![dir.path().join("a.conf"), dir.path().join("b.conf")];

        let err = resolver(candidates.clone())
            .with_env([(ENV_WEBHOOK_URL, "")])
            .resolve(&Overrides::default())
            .unwrap_err();

        match &err {
            ConfigError::MissingWebhookUrl {
                env_var,
                candidates: checked,
            } => {
                assert_eq!(*env_var, ENV_WEBHOOK_URL);
                assert_eq!(checked, &candidates);
            }
            other => panic!("expected missing URL error, got {other:?}"),
        }
        assert!(err.to_string().contains("a.conf"));
        assert!(err.to_string().contains("b.conf"));
    }

    #[test]
    fn test_malformed_file_is_fatal_even_with_env_url() {
        let dir = TempDir::new().unwrap();
        let path = config_file(&dir, "{\"webhook_url\": ");

        let err = resolver(vec![path])
            .with_env([(ENV_WEBHOOK_URL, ENV_URL)])
            .resolve(&Overrides::default())
            .unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_rejects_non_http_webhook() {
        let err = resolver(vec![])
            .with_env([(ENV_WEBHOOK_URL, "ftp://hooks.example.com/x")])
            .resolve(&Overrides::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWebhookUrl { .. }));

        let err = resolver(vec![])
            .with_env([(ENV_WEBHOOK_URL, "not a url")])
            .resolve(&Overrides::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWebhookUrl { .. }));
    }

    #[test]
    fn test_proxy_from_env() {
        let config = resolver(vec![])
            .with_env([(ENV_WEBHOOK_URL, ENV_URL), (ENV_PROXY, "http://proxy.local:3128")])
            .resolve(&Overrides::default())
            .unwrap();

        assert_eq!(
            config.proxy.as_ref().map(Url::as_str),
            Some("http://proxy.local:3128/")
        );
    }

    #[test]
    fn test_invalid_proxy_is_config_error() {
        let err = resolver(vec![])
            .with_env([(ENV_WEBHOOK_URL, ENV_URL), (ENV_PROXY, "::nope")])
            .resolve(&Overrides::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidProxy { .. }));
    }

    #[test]
    fn test_default_username_shape() {
        let name = default_username();
        let (user, host) = name.split_once('@').expect("user@host");
        assert!(!user.is_empty());
        assert!(!host.is_empty());
    }
}
