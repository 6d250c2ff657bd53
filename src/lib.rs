//! inistore - INI-backed settings with change notification.
//!
//! Settings are grouped in `[section]` blocks of `key = value` lines, with a
//! `[DEFAULT]` section that every other section falls back to. The store
//! keeps them in memory, writes them back on request, and reports each
//! change to optional hooks and observers.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use inistore::{ConfigChange, ConfigStore, Observable, ObserverError};
//!
//! # fn main() -> inistore::Result<()> {
//! let hub = Arc::new(Observable::new());
//! hub.subscribe(|change: &ConfigChange| {
//!     println!("{} {}", change.event, change.path());
//!     Ok::<(), ObserverError>(())
//! });
//!
//! let mut config = ConfigStore::open("settings.ini")?.with_observable(hub);
//!
//! config.set("server", "port", 8080)?.save()?;
//! let timeout = config.get_or("server", "timeout", "30");
//! let port = config.attr("server_port")?;
//! # Ok(())
//! # }
//! ```

/// Core error types and result aliases.
pub mod core;

/// INI document model, parser and writer.
pub mod ini;

/// Change events and the observer hub.
pub mod observer;

/// INI-backed settings store with change tracking.
pub mod config_store;

/// Command-line interface for inspecting and editing settings files.
pub mod cli;

/// Logging setup for the command-line binary.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use self::core::{Result, StoreError};

pub use config_store::{ChangeHooks, ConfigStore, SectionDict};
pub use ini::DEFAULT_SECTION;
pub use observer::{ConfigChange, ConfigEvent, Observable, Observer, ObserverError};
