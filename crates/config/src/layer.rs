//! Partial configuration sources and how they stack.

use serde::Deserialize;

/// Environment variable supplying the webhook URL.
pub const ENV_WEBHOOK_URL: &str = "SLACKCAT_WEBHOOK_URL";

/// Environment variable supplying the channel.
pub const ENV_CHANNEL: &str = "SLACKCAT_CHANNEL";

/// Environment variable supplying the display name.
pub const ENV_USERNAME: &str = "SLACKCAT_USERNAME";

/// Environment variable supplying the icon emoji.
pub const ENV_ICON: &str = "SLACKCAT_ICON";

/// Environment variable supplying the HTTP(S) proxy.
pub const ENV_PROXY: &str = "SLACKCAT_PROXY";

/// One configuration source with only the fields it actually sets.
///
/// `None` means the source is silent about a field; `Some("")` is an explicit
/// empty value. For `username` the difference matters: an explicit empty name
/// suppresses the field on the wire, while `None` falls through to the
/// computed `user@host` default.
///
/// This is also the on-disk JSON shape; `null` and a missing key both
/// deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigLayer {
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub icon_emoji: Option<String>,
    #[serde(default)]
    pub proxy: Option<String>,
}

impl ConfigLayer {
    /// Build the environment layer from a variable lookup.
    ///
    /// Unset and empty variables both leave the field untouched.
    pub fn from_env<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());

        Self {
            webhook_url: non_empty(ENV_WEBHOOK_URL),
            channel: non_empty(ENV_CHANNEL),
            username: non_empty(ENV_USERNAME),
            icon_emoji: non_empty(ENV_ICON),
            proxy: non_empty(ENV_PROXY),
        }
    }

    /// Overlay `higher` on top of `self`.
    ///
    /// Fields set in `higher` win; fields it leaves unset keep their
    /// accumulated value.
    #[must_use]
    pub fn merge(self, higher: Self) -> Self {
        Self {
            webhook_url: higher.webhook_url.or(self.webhook_url),
            channel: higher.channel.or(self.channel),
            username: higher.username.or(self.username),
            icon_emoji: higher.icon_emoji.or(self.icon_emoji),
            proxy: higher.proxy.or(self.proxy),
        }
    }
}

/// Command-line overrides. Only flags the caller actually passed are `Some`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub channel: Option<String>,
    pub username: Option<String>,
    pub icon_emoji: Option<String>,
}

impl From<Overrides> for ConfigLayer {
    fn from(overrides: Overrides) -> Self {
        Self {
            channel: overrides.channel,
            username: overrides.username,
            icon_emoji: overrides.icon_emoji,
            ..Self::default()
        }
    }
}
