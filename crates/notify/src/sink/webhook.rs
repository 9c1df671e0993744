//! Slack incoming-webhook sink.

use async_trait::async_trait;
use config::Config;
use reqwest::StatusCode;
use tracing::{debug, warn};
use url::Url;

use crate::error::NotifyError;
use crate::message::SlackMessage;
use crate::sink::MessageSink;

/// Name of the form field carrying the JSON document.
pub const PAYLOAD_FIELD: &str = "payload";

/// Posts messages to a Slack incoming webhook.
pub struct WebhookSink {
    webhook_url: Url,
    client: reqwest::Client,
}

impl WebhookSink {
    /// Create a sink for `webhook_url`, optionally routed through `proxy`.
    ///
    /// The proxy only applies to this sink's client. Without one, the usual
    /// `HTTP_PROXY`/`HTTPS_PROXY`/`NO_PROXY` environment handling applies.
    pub fn new(webhook_url: Url, proxy: Option<&Url>) -> Result<Self, NotifyError> {
        let builder = match proxy {
            Some(proxy) => {
                let invalid = |source| NotifyError::InvalidProxy {
                    url: proxy.to_string(),
                    source,
                };
                debug!(proxy = %proxy, "Routing webhook requests through proxy");
                reqwest::Client::builder()
                    .proxy(reqwest::Proxy::all(proxy.as_str()).map_err(invalid)?)
            }
            None => reqwest::Client::builder(),
        };

        let client = builder.build()?;

        Ok(Self {
            webhook_url,
            client,
        })
    }

    /// Create a sink from a resolved configuration.
    pub fn from_config(config: &Config) -> Result<Self, NotifyError> {
        Self::new(config.webhook_url.clone(), config.proxy.as_ref())
    }
}

#[async_trait]
impl MessageSink for WebhookSink {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn deliver(&self, message: &SlackMessage) -> Result<(), NotifyError> {
        let payload = message.encode()?;

        debug!(sink = "webhook", bytes = payload.len(), "Posting message");

        let response = self
            .client
            .post(self.webhook_url.clone())
            .form(&[(PAYLOAD_FIELD, payload.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::OK {
            debug!(sink = "webhook", "Message delivered");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();

        warn!(
            sink = "webhook",
            status = %status,
            body = %body,
            "Webhook request failed"
        );

        Err(NotifyError::Status { status, body })
    }
}
