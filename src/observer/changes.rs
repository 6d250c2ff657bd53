use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// Kind of mutation a [`ConfigChange`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigEvent {
    /// A value was written.
    Set,
    /// A key or a whole section was removed.
    Remove,
}

impl ConfigEvent {
    /// Event name as delivered to observers: `"set"` or `"remove"`.
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigEvent::Set => "set",
            ConfigEvent::Remove => "remove",
        }
    }
}

impl Display for ConfigEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single settings mutation, as delivered to observers.
///
/// `key` is `None` when a whole section was removed; `value` is `None` for
/// every removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigChange {
    /// What happened.
    pub event: ConfigEvent,
    /// Section the change applies to.
    pub section: String,
    /// Key within the section, absent for whole-section removals.
    pub key: Option<String>,
    /// New value for `set` events.
    pub value: Option<String>,
}

impl ConfigChange {
    /// Creates a `set` change.
    pub fn set(section: &str, key: &str, value: &str) -> Self {
        Self {
            event: ConfigEvent::Set,
            section: section.to_string(),
            key: Some(key.to_string()),
            value: Some(value.to_string()),
        }
    }

    /// Creates a `remove` change for a key, or for the whole section when `key` is `None`.
    pub fn removed(section: &str, key: Option<&str>) -> Self {
        Self {
            event: ConfigEvent::Remove,
            section: section.to_string(),
            key: key.map(str::to_string),
            value: None,
        }
    }

    /// Dot path of the change: `section.key`, or just `section` for section removals.
    pub fn path(&self) -> String {
        match &self.key {
            Some(key) => format!("{}.{key}", self.section),
            None => self.section.clone(),
        }
    }

    /// The `(event, section, key, value)` tuple handed to observers.
    pub fn as_tuple(&self) -> (&'static str, &str, Option<&str>, Option<&str>) {
        (
            self.event.as_str(),
            &self.section,
            self.key.as_deref(),
            self.value.as_deref(),
        )
    }
}
