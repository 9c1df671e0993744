//! Slack webhook message delivery for slackcat.
//!
//! This crate turns text into Slack messages and posts them to an incoming
//! webhook, one HTTP request per message. Delivery is strictly sequential and
//! the first failure ends the run; nothing is retried.
//!
//! # Usage
//!
//! ```no_run
//! use notify::{Dispatcher, Input, MessageTemplate, WebhookSink};
//!
//! # async fn example(config: config::Config) -> Result<(), notify::NotifyError> {
//! let sink = WebhookSink::from_config(&config)?;
//! let dispatcher = Dispatcher::new(MessageTemplate::from(&config), sink);
//!
//! let stdin = tokio::io::BufReader::new(tokio::io::stdin());
//! dispatcher.run(Input::Stream, stdin).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`MessageSink`] trait defines where messages go
//! - [`WebhookSink`] posts form-encoded payloads to a Slack webhook
//! - [`Dispatcher`] applies the input mode and the stop-on-first-failure policy

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod input;
pub mod message;
pub mod sink;

pub use error::NotifyError;
pub use input::{Input, LineReader};
pub use message::{MessageTemplate, SlackMessage, PARSE_FULL};
pub use sink::webhook::WebhookSink;
pub use sink::MessageSink;

use tokio::io::AsyncBufRead;
use tracing::{debug, info};

/// Outcome of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Number of messages the sink accepted.
    pub delivered: usize,
}

/// Builds messages from input and hands them to a sink, one at a time.
pub struct Dispatcher<S> {
    template: MessageTemplate,
    sink: S,
}

impl<S: MessageSink> Dispatcher<S> {
    /// Create a dispatcher stamping `template` onto every message.
    #[must_use]
    pub const fn new(template: MessageTemplate, sink: S) -> Self {
        Self { template, sink }
    }

    /// The sink messages are delivered to.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Deliver exactly one message carrying `text`.
    pub async fn send_text(&self, text: impl Into<String>) -> Result<(), NotifyError> {
        let message = self.template.message(text);
        self.sink.deliver(&message).await
    }

    /// Deliver one message per line of `reader`, in order.
    ///
    /// Each delivery completes before the next line is read. The first
    /// failure is returned immediately and the remaining input is left
    /// unread. Returns the number of messages delivered.
    pub async fn stream<R>(&self, reader: R) -> Result<usize, NotifyError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = LineReader::new(reader);
        let mut delivered = 0;

        while let Some(line) = lines.next_line().await? {
            debug!(
                sink = self.sink.name(),
                line = delivered + 1,
                "Delivering line"
            );
            self.send_text(line).await?;
            delivered += 1;
        }

        Ok(delivered)
    }

    /// Read all of `reader` and deliver it as a single message.
    ///
    /// Lines are joined with `\n`. Empty input still produces one message
    /// with empty text.
    pub async fn buffered<R>(&self, reader: R) -> Result<(), NotifyError>
    where
        R: AsyncBufRead + Unpin,
    {
        let (text, lines) = input::read_joined(reader).await?;
        debug!(sink = self.sink.name(), lines, "Delivering buffered input");
        self.send_text(text).await
    }

    /// Run one invocation's worth of delivery.
    ///
    /// `reader` is only consumed for [`Input::Stream`] and [`Input::Buffered`].
    pub async fn run<R>(&self, input: Input, reader: R) -> Result<DispatchSummary, NotifyError>
    where
        R: AsyncBufRead + Unpin,
    {
        let delivered = match input {
            Input::Text(text) => {
                self.send_text(text).await?;
                1
            }
            Input::Stream => self.stream(reader).await?,
            Input::Buffered => {
                self.buffered(reader).await?;
                1
            }
        };

        info!(sink = self.sink.name(), delivered, "Dispatch complete");

        Ok(DispatchSummary { delivered })
    }
}
