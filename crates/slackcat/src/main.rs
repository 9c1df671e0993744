//! slackcat - post text to a Slack channel through an incoming webhook.
//!
//! Run `slackcat --help` for usage information.

// CLI binaries legitimately need eprintln! for user output
#![allow(clippy::disallowed_macros)]

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::{Overrides, Resolver};
use notify::{Dispatcher, Input, MessageTemplate, WebhookSink};

#[derive(Parser, Debug)]
#[command(name = "slackcat")]
#[command(about = "Post text to Slack through an incoming webhook")]
#[command(override_usage = "slackcat [-c #channel] [-n name] [-i icon] [-b] [message]")]
#[command(version)]
struct Cli {
    /// Channel to post to
    #[arg(short, long)]
    channel: Option<String>,

    /// Display name; an empty value uses the webhook's default
    #[arg(short, long)]
    name: Option<String>,

    /// Icon emoji code, e.g. :ghost:
    #[arg(short, long)]
    icon: Option<String>,

    /// Read all of stdin and post it as a single message
    #[arg(short, long)]
    buffered: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Message text. Without it, stdin is posted line by line
    message: Vec<String>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            channel: self.channel.clone(),
            username: self.name.clone(),
            icon_emoji: self.icon.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout is never written.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter(cli.verbose)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("slackcat: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Log filter used when `RUST_LOG` is not set.
///
/// Quiet by default so a failed run prints only its `slackcat: ...` line.
const fn default_log_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "error"
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let config = Resolver::from_system()
        .resolve(&cli.overrides())
        .context("could not read config")?;

    let sink = WebhookSink::from_config(&config).context("could not create webhook client")?;
    let dispatcher = Dispatcher::new(MessageTemplate::from(&config), sink);

    let input = Input::from_args(&cli.message, cli.buffered);
    let summary = dispatcher
        .run(input, BufReader::new(tokio::io::stdin()))
        .await?;

    tracing::debug!(delivered = summary.delivered, "Done");
    Ok(())
}
