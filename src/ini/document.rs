use std::{path::Path, str::FromStr};

use indexmap::IndexMap;

use crate::{Result, StoreError};

use super::parser;

/// Name of the section whose values act as the fallback layer for every other section.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Insertion-ordered key/value pairs of one section.
pub type Section = IndexMap<String, String>;

/// In-memory form of an INI file.
///
/// The default section is kept apart from the named sections so it can never
/// be listed, reordered or shadowed like a regular one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    defaults: Section,
    sections: IndexMap<String, Section>,
}

impl IniDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses INI text.
    ///
    /// # Arguments
    /// * `content` - The INI text
    /// * `origin` - File the text was read from, used for error context
    ///
    /// # Errors
    /// Returns `StoreError::IniParse` describing the first malformed line.
    pub fn parse(content: &str, origin: Option<&Path>) -> Result<Self> {
        parser::parse_document(content, origin)
    }

    /// The default section.
    pub fn defaults(&self) -> &Section {
        &self.defaults
    }

    /// Mutable access to the default section.
    pub fn defaults_mut(&mut self) -> &mut Section {
        &mut self.defaults
    }

    /// Named sections in file order, excluding the default section.
    pub fn sections(&self) -> &IndexMap<String, Section> {
        &self.sections
    }

    /// Returns a section by name. `DEFAULT` resolves to the default section.
    pub fn section(&self, name: &str) -> Option<&Section> {
        if name == DEFAULT_SECTION {
            return Some(&self.defaults);
        }

        self.sections.get(name)
    }

    /// Returns the named section, creating it at the end if it does not exist.
    pub fn section_entry(&mut self, name: &str) -> &mut Section {
        if name == DEFAULT_SECTION {
            return &mut self.defaults;
        }

        self.sections.entry(name.to_string()).or_default()
    }

    /// Whether a named section exists. The default section always exists.
    pub fn has_section(&self, name: &str) -> bool {
        name == DEFAULT_SECTION || self.sections.contains_key(name)
    }

    /// Inserts an empty named section, returning `false` if it already exists.
    pub fn add_section(&mut self, name: &str) -> bool {
        if self.has_section(name) {
            return false;
        }

        self.sections.insert(name.to_string(), Section::new());
        true
    }

    /// Removes a named section and returns its contents, keeping the order of the rest.
    pub fn remove_section(&mut self, name: &str) -> Option<Section> {
        self.sections.shift_remove(name)
    }

    /// Removes a key from a section, keeping the order of the remaining keys.
    pub fn remove_key(&mut self, section: &str, key: &str) -> Option<String> {
        if section == DEFAULT_SECTION {
            return self.defaults.shift_remove(key);
        }

        self.sections.get_mut(section)?.shift_remove(key)
    }

    /// True when there are no defaults and no named sections.
    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty() && self.sections.is_empty()
    }
}

impl FromStr for IniDocument {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, None)
    }
}
