//! Configuration resolution for slackcat.
//!
//! The effective configuration is built from these layers, lowest to highest
//! precedence:
//!
//! 1. Built-in defaults (empty channel and icon, `user@host` display name)
//! 2. The first existing file among `/etc/slackcat.conf`,
//!    `~/.slackcat.conf` and `./slackcat.conf`
//! 3. `SLACKCAT_WEBHOOK_URL`, `SLACKCAT_CHANNEL`, `SLACKCAT_USERNAME`,
//!    `SLACKCAT_ICON` and `SLACKCAT_PROXY`
//! 4. Command-line flags
//!
//! A layer only overwrites the fields it actually sets.
//!
//! ```no_run
//! use config::{Overrides, Resolver};
//!
//! let config = Resolver::from_system().resolve(&Overrides::default())?;
//! println!("posting to {}", config.webhook_url);
//! # Ok::<(), config::ConfigError>(())
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod file;
pub mod layer;
pub mod resolver;

pub use error::ConfigError;
pub use file::{default_candidates, load_first_existing};
pub use layer::{ConfigLayer, Overrides};
pub use resolver::{default_username, Config, Resolver};
