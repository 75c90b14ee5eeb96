//! # Model Console CLI
//!
//! Command-line surface of Model Console, working against JSON listing files
//! through a file-backed `RemoteStore`.
//!
//! ## Commands
//!
//! - `models` - List models (`--all` includes inactive and removed ones)
//! - `access` - List access roles
//! - `instances` - List instances
//! - `check-model` - Validate a model draft document, optionally create it
//! - `fill` - Build an instance from an answers file, optionally submit it
//! - `remove-model` - Soft-delete a model
//!

pub mod args;
pub mod cmd;
pub mod config;
pub mod output;
pub mod store;

pub use args::{Cli, Command, PathArgs};
pub use config::ConsoleConfig;
pub use store::JsonFileStore;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Run one parsed command line
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    cmd::dispatch(cli).await
}
