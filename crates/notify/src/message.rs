//! The Slack message record and its JSON encoding.

use config::Config;
use serde::{Deserialize, Serialize};

use crate::error::NotifyError;

/// Parse mode asking Slack to expand all markup (links, mentions, channels).
pub const PARSE_FULL: &str = "full";

/// One message as posted to the webhook.
///
/// `username` and `icon_emoji` are dropped from the JSON when empty so the
/// webhook falls back to its own defaults. `channel`, `text` and `parse` are
/// always present, even when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackMessage {
    pub channel: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
    pub text: String,
    pub parse: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon_emoji: String,
}

impl SlackMessage {
    /// Encode as the JSON document carried in the `payload` form field.
    pub fn encode(&self) -> Result<String, NotifyError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Per-run message settings stamped onto every message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTemplate {
    pub channel: String,
    pub username: String,
    pub icon_emoji: String,
}

impl MessageTemplate {
    /// Build a message carrying `text`.
    #[must_use]
    pub fn message(&self, text: impl Into<String>) -> SlackMessage {
        SlackMessage {
            channel: self.channel.clone(),
            username: self.username.clone(),
            text: text.into(),
            parse: PARSE_FULL.to_string(),
            icon_emoji: self.icon_emoji.clone(),
        }
    }
}

impl From<&Config> for MessageTemplate {
    fn from(config: &Config) -> Self {
        Self {
            channel: config.channel.clone(),
            username: config.username.clone(),
            icon_emoji: config.icon_emoji.clone(),
        }
    }
}
