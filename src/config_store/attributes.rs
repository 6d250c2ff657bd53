use std::fmt::Display;

use crate::{Result, StoreError};

use super::ConfigStore;

/// Splits a flattened `section_key` name on its first underscore.
///
/// The key keeps any further underscores: `"DEFAULT_postal_code"` is
/// `("DEFAULT", "postal_code")`. Returns `None` when there is no underscore
/// or either half is empty.
pub fn split_attr_name(name: &str) -> Option<(&str, &str)> {
    let (section, key) = name.split_once('_')?;

    (!section.is_empty() && !key.is_empty()).then_some((section, key))
}

impl ConfigStore {
    /// Reads a setting by its flattened `section_key` name.
    ///
    /// Unlike [`get`](Self::get), an unknown section is an error. A known
    /// section without the key resolves through `DEFAULT` and may yield `None`.
    ///
    /// # Errors
    /// * `StoreError::InvalidAttribute` - `name` has no `section_key` shape
    /// * `StoreError::UnknownAttribute` - the section does not exist
    pub fn attr(&self, name: &str) -> Result<Option<&str>> {
        let (section, key) = parse_attr_name(name)?;

        if !self.has_section(section) {
            return Err(StoreError::UnknownAttribute {
                name: name.to_string(),
                section: section.to_string(),
            });
        }

        Ok(self.get(section, key))
    }

    /// Writes a setting by its flattened `section_key` name. Same as
    /// [`set`](Self::set) once the name is split.
    ///
    /// # Errors
    /// * `StoreError::InvalidAttribute` - `name` has no `section_key` shape
    /// * `StoreError::UnwritableSetting` - the key or value would not survive
    ///   a save and load
    /// * `StoreError::Observer` - an observer rejected the change
    pub fn set_attr(&mut self, name: &str, value: impl Display) -> Result<&mut Self> {
        let (section, key) = parse_attr_name(name)?;
        self.set(section, key, value)
    }
}

fn parse_attr_name(name: &str) -> Result<(&str, &str)> {
    split_attr_name(name).ok_or_else(|| StoreError::InvalidAttribute {
        name: name.to_string(),
    })
}
