use std::{
    fmt,
    path::{Path, PathBuf},
    result,
};

use thiserror::Error;

use crate::observer::ObserverError;

/// Error types for the settings store.
///
/// Covers file persistence, INI parsing, flattened attribute lookups and
/// failures raised by change observers.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation error
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where I/O error occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// INI parsing error with location context
    #[error("failed to parse INI at '{location}' line {line}: {details}")]
    IniParse {
        /// Location of INI being parsed (file path or "string")
        location: String,
        /// 1-based line number of the offending line
        line: usize,
        /// Parse error details
        details: String,
    },

    /// Setting cannot be written as INI and read back unchanged
    #[error("cannot store [{section}] '{key}': {details}")]
    UnwritableSetting {
        /// Section of the rejected setting
        section: String,
        /// Key of the rejected setting
        key: String,
        /// Which part breaks the format
        details: String,
    },

    /// Flattened attribute name does not resolve to a known section
    #[error("no attribute '{name}': section '{section}' not found")]
    UnknownAttribute {
        /// The flattened name that was looked up
        name: String,
        /// Section half of the name
        section: String,
    },

    /// Flattened attribute name cannot be split into section and key
    #[error("invalid attribute name '{name}': expected <section>_<key>")]
    InvalidAttribute {
        /// The malformed name
        name: String,
    },

    /// An observer rejected a change notification
    #[error("observer failed on {event} [{path}]: {source}")]
    Observer {
        /// Event name ("set" or "remove")
        event: &'static str,
        /// Dot path of the change
        path: String,
        /// Error reported by the observer
        #[source]
        source: ObserverError,
    },
}

/// A specialized `Result` type for store operations.
pub type Result<T> = result::Result<T, StoreError>;

impl StoreError {
    /// Creates an INI parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `line` - 1-based line number
    /// * `path` - Optional path to the file that failed to parse
    pub fn ini_parse(error: impl fmt::Display, line: usize, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        StoreError::IniParse {
            location,
            line,
            details: error.to_string(),
        }
    }

    /// Creates an I/O error with file path context.
    pub fn io(error: impl fmt::Display, path: &Path) -> Self {
        StoreError::IoError {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }
}
