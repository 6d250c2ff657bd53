use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::StoreError;

/// Errors that can occur during CLI command execution.
#[derive(Error, Debug)]
pub enum CliError {
    /// The requested setting resolved to nothing and no fallback was given.
    #[error("Setting not found: [{section}] {key}")]
    NotFound {
        /// Section that was looked up
        section: String,
        /// Key that was looked up
        key: String,
    },

    /// An error occurred in the settings store.
    ///
    /// This wraps load/save failures, malformed files, bad attribute
    /// names and observer failures.
    #[error("Configuration error: {0}")]
    Store(#[from] StoreError),

    /// Output could not be rendered as JSON.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for command execution results.
///
/// Commands return the text to print on success.
pub type CommandResult = Result<String, CliError>;

/// Read and edit INI settings files.
#[derive(Parser, Debug)]
#[command(name = "inistore", version)]
#[command(about = "Read and edit INI settings files")]
pub struct Cli {
    /// Settings file to operate on
    #[arg(short, long)]
    pub file: PathBuf,

    /// Also write logs to daily-rotated files in this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Commands understood by the binary.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print a setting, falling back to DEFAULT
    Get {
        /// Section name
        section: String,
        /// Key name
        key: String,
        /// Value to print when the setting is not found
        #[arg(short = 'F', long)]
        fallback: Option<String>,
    },
    /// Write a setting and save the file
    Set {
        /// Section name
        section: String,
        /// Key name
        key: String,
        /// New value
        value: String,
    },
    /// Remove a key, or a whole section when no key is given, and save the file
    Remove {
        /// Section name
        section: String,
        /// Key name
        key: Option<String>,
    },
    /// Print a setting by its flattened section_key name
    Attr {
        /// Flattened name, split on the first underscore
        name: String,
    },
    /// Write a setting by its flattened section_key name and save the file
    SetAttr {
        /// Flattened name, split on the first underscore
        name: String,
        /// New value
        value: String,
    },
    /// Print sections and their values
    Dump {
        /// Only this section
        #[arg(short, long)]
        section: Option<String>,
        /// Print JSON instead of INI-style text
        #[arg(long)]
        json: bool,
    },
    /// Print the DEFAULT section
    Defaults,
}
