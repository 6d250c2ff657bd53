//! Command-line interface for settings files.
//!
//! [`Cli`] is the clap definition of the `inistore` binary; [`CliService`]
//! executes its commands against a [`ConfigStore`](crate::ConfigStore).

pub mod formatting;
mod service;
mod types;


pub use service::CliService;
pub use types::{Cli, CliError, Command, CommandResult};
