//! Error types for configuration resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort configuration resolution.
///
/// Every variant is fatal: no message is delivered once resolution fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A candidate config file exists but could not be read
    #[error("could not read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A candidate config file exists but is not valid JSON
    #[error("malformed config file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No layer supplied a webhook URL
    #[error(
        "no webhook URL configured: set {env_var} or add \"webhook_url\" to one of: {}",
        display_paths(.candidates)
    )]
    MissingWebhookUrl {
        env_var: &'static str,
        candidates: Vec<PathBuf>,
    },

    /// The webhook URL is not an absolute http(s) URL
    #[error("invalid webhook URL {url:?}: {reason}")]
    InvalidWebhookUrl { url: String, reason: String },

    /// The proxy setting is not a valid URL
    #[error("invalid proxy URL {url:?}")]
    InvalidProxy {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "(no candidate paths)".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_names_every_source() {
        let err = ConfigError::MissingWebhookUrl {
            env_var: "SLACKCAT_WEBHOOK_URL",
            candidates: vec![
                PathBuf::from("/etc/slackcat.conf"),
                PathBuf::from("./slackcat.conf"),
            ],
        };

        let msg = err.to_string();
        assert!(msg.contains("SLACKCAT_WEBHOOK_URL"));
        assert!(msg.contains("/etc/slackcat.conf"));
        assert!(msg.contains("./slackcat.conf"));
    }

    #[test]
    fn test_parse_error_leaves_cause_to_source() {
        use std::error::Error as _;

        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let cause = source.to_string();
        let err = ConfigError::Parse {
            path: PathBuf::from("./slackcat.conf"),
            source,
        };

        assert_eq!(err.to_string(), "malformed config file ./slackcat.conf");
        assert_eq!(err.source().map(ToString::to_string), Some(cause));
    }

    #[test]
    fn test_missing_url_without_candidates() {
        let err = ConfigError::MissingWebhookUrl {
            env_var: "SLACKCAT_WEBHOOK_URL",
            candidates: vec![],
        };
        assert!(err.to_string().ends_with("(no candidate paths)"));
    }
}
