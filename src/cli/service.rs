use tracing::debug;

use crate::{ConfigStore, DEFAULT_SECTION, config_store::split_attr_name};

use super::{CliError, Command, CommandResult, formatting::format_sections};

/// Runs CLI commands against one settings store.
///
/// Commands that change settings save the file before returning.
pub struct CliService {
    store: ConfigStore,
}

impl CliService {
    /// Creates a service around an already loaded store.
    pub fn new(store: ConfigStore) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Executes a command and returns the text to print.
    ///
    /// # Errors
    /// Returns `CliError::NotFound` for unresolved reads without a fallback,
    /// and `CliError::Store` for load/save, attribute and observer failures.
    pub fn execute(&mut self, command: Command) -> CommandResult {
        debug!(?command, "executing command");

        match command {
            Command::Get {
                section,
                key,
                fallback,
            } => match (self.store.get(&section, &key), fallback) {
                (Some(value), _) => Ok(value.to_string()),
                (None, Some(fallback)) => Ok(fallback),
                (None, None) => Err(CliError::NotFound { section, key }),
            },

            Command::Set {
                section,
                key,
                value,
            } => {
                self.store.set(&section, &key, &value)?.save()?;
                Ok(format!("[{section}] {key} = {value}"))
            }

            Command::Remove { section, key } => {
                if !self.store.remove(&section, key.as_deref())? {
                    return Ok("nothing to remove".to_string());
                }

                self.store.save()?;
                Ok(match key {
                    Some(key) => format!("removed [{section}] {key}"),
                    None => format!("removed [{section}]"),
                })
            }

            Command::Attr { name } => match self.store.attr(&name)? {
                Some(value) => Ok(value.to_string()),
                None => {
                    let (section, key) = split_attr_name(&name).unwrap_or((name.as_str(), ""));
                    Err(CliError::NotFound {
                        section: section.to_string(),
                        key: key.to_string(),
                    })
                }
            },

            Command::SetAttr { name, value } => {
                self.store.set_attr(&name, &value)?.save()?;
                Ok(format!("{name} = {value}"))
            }

            Command::Dump { section, json } => {
                let sections = self.store.to_dict(section.as_deref());

                if json {
                    Ok(serde_json::to_string_pretty(&sections)?)
                } else {
                    Ok(format_sections(&sections))
                }
            }

            Command::Defaults => Ok(format_sections(
                &self.store.to_dict(Some(DEFAULT_SECTION)),
            )),
        }
    }
}
