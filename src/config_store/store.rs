use std::{
    fmt::{self, Debug, Display, Formatter},
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::{Span, debug, info, info_span, warn};

use crate::{
    Result, StoreError,
    ini::{DEFAULT_SECTION, IniDocument, Section, check_entry},
    observer::{ConfigChange, Observable},
};

use super::hooks::{ChangeHooks, NoHooks};

/// Settings backed by a single INI file.
///
/// Values live in memory until [`save`](Self::save) is called. Reads resolve
/// through the section, then the `DEFAULT` section, then the caller's
/// fallback. Every successful write or removal runs the [`ChangeHooks`] and
/// then notifies the attached [`Observable`], if any.
pub struct ConfigStore {
    pub(super) filename: PathBuf,
    pub(super) document: IniDocument,
    observable: Option<Arc<Observable>>,
    hooks: Box<dyn ChangeHooks>,
    pub(super) span: Span,
}

impl ConfigStore {
    /// Creates an empty store for `filename` without touching the disk.
    ///
    /// Log events are emitted under a `config_store` span carrying the file
    /// path; use [`with_span`](Self::with_span) to supply another one.
    pub fn new(filename: impl Into<PathBuf>) -> Self {
        let filename = filename.into();
        let span = info_span!("config_store", file = %filename.display());

        Self {
            filename,
            document: IniDocument::new(),
            observable: None,
            hooks: Box::new(NoHooks),
            span,
        }
    }

    /// Attaches a shared notification hub.
    pub fn with_observable(mut self, observable: Arc<Observable>) -> Self {
        self.observable = Some(observable);
        self
    }

    /// Replaces the no-op change hooks.
    pub fn with_hooks(mut self, hooks: impl ChangeHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// Emits the store's log events under `span` instead of the default one.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Path of the backing file.
    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// The attached notification hub, if any.
    pub fn observable(&self) -> Option<&Arc<Observable>> {
        self.observable.as_ref()
    }

    /// The in-memory document.
    pub fn document(&self) -> &IniDocument {
        &self.document
    }

    /// Names of the named sections, in order. `DEFAULT` is not included.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.document.sections().keys().map(String::as_str)
    }

    /// Whether `section` exists. `DEFAULT` always does.
    pub fn has_section(&self, section: &str) -> bool {
        self.document.has_section(section)
    }

    /// Looks up a setting: the section's own value first, then the `DEFAULT`
    /// section. Missing sections are not an error.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let value = self
            .document
            .section(section)
            .and_then(|values| values.get(key))
            .or_else(|| self.document.defaults().get(key))
            .map(String::as_str);

        if value.is_none() {
            self.span.in_scope(|| debug!(section, key, "setting not found"));
        }

        value
    }

    /// Like [`get`](Self::get), returning `fallback` when neither the section
    /// nor `DEFAULT` has the key.
    pub fn get_or<'a>(&'a self, section: &str, key: &str, fallback: &'a str) -> &'a str {
        self.get(section, key).unwrap_or(fallback)
    }

    /// Writes a setting, creating the section if needed.
    ///
    /// The value is stored as its `Display` rendering. Nothing is written to
    /// disk until [`save`](Self::save).
    ///
    /// # Errors
    /// * `StoreError::UnwritableSetting` - The section, key or value would not
    ///   survive a save and load. Nothing is changed.
    /// * `StoreError::Observer` - An observer rejected the change. The value
    ///   stays set.
    pub fn set(&mut self, section: &str, key: &str, value: impl Display) -> Result<&mut Self> {
        let value = value.to_string();
        let span = self.span.clone();
        let _entered = span.enter();

        check_entry(section, key, &value)
            .inspect_err(|e| warn!(section, key, error = %e, "setting rejected"))?;

        self.document
            .section_entry(section)
            .insert(key.to_string(), value.clone());
        info!(section, key, value = %value, "setting changed");

        self.hooks.on_change(section, key, &value);
        self.notify(&ConfigChange::set(section, key, &value))?;

        Ok(self)
    }

    /// Removes a key, or the whole section when `key` is `None`.
    ///
    /// Returns `false`, with no hooks or notifications, when there was nothing
    /// to remove.
    ///
    /// # Errors
    /// * `StoreError::Observer` - An observer rejected the change. The removal
    ///   stays applied.
    pub fn remove(&mut self, section: &str, key: Option<&str>) -> Result<bool> {
        match key {
            Some(key) => self.remove_key(section, key),
            None => self.remove_section(section),
        }
    }

    /// Removes one key from a section. Only the section's own value is
    /// removed; a `DEFAULT` value with the same key stays visible through
    /// [`get`](Self::get).
    ///
    /// # Errors
    /// * `StoreError::Observer` - An observer rejected the change.
    pub fn remove_key(&mut self, section: &str, key: &str) -> Result<bool> {
        let span = self.span.clone();
        let _entered = span.enter();

        if self.document.remove_key(section, key).is_none() {
            warn!(section, key, "setting not found, nothing removed");
            return Ok(false);
        }
        info!(section, key, "setting removed");

        self.hooks.on_remove(section, Some(key));
        self.notify(&ConfigChange::removed(section, Some(key)))?;

        Ok(true)
    }

    /// Removes a whole section. Removing `DEFAULT` clears the defaults and
    /// reports `true` only if there were any.
    ///
    /// # Errors
    /// * `StoreError::Observer` - An observer rejected the change.
    pub fn remove_section(&mut self, section: &str) -> Result<bool> {
        let span = self.span.clone();
        let _entered = span.enter();

        let removed = if section == DEFAULT_SECTION {
            let defaults = self.document.defaults_mut();
            let had_values = !defaults.is_empty();
            defaults.clear();
            had_values
        } else {
            self.document.remove_section(section).is_some()
        };

        if !removed {
            warn!(section, "section not found, nothing removed");
            return Ok(false);
        }
        info!(section, "section removed");

        self.hooks.on_remove(section, None);
        self.notify(&ConfigChange::removed(section, None))?;

        Ok(true)
    }

    /// The `DEFAULT` section.
    pub fn defaults(&self) -> &Section {
        self.document.defaults()
    }

    /// Looks up a key in the `DEFAULT` section.
    pub fn get_default(&self, key: &str) -> Option<&str> {
        self.get(DEFAULT_SECTION, key)
    }

    /// Looks up a key in the `DEFAULT` section, returning `fallback` if absent.
    pub fn get_default_or<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.get_or(DEFAULT_SECTION, key, fallback)
    }

    /// Writes a key in the `DEFAULT` section.
    ///
    /// # Errors
    /// Same as [`set`](Self::set).
    pub fn set_default(&mut self, key: &str, value: impl Display) -> Result<&mut Self> {
        self.set(DEFAULT_SECTION, key, value)
    }

    fn notify(&self, change: &ConfigChange) -> Result<()> {
        let Some(observable) = &self.observable else {
            return Ok(());
        };

        observable
            .notify(change)
            .map_err(|source| StoreError::Observer {
                event: change.event.as_str(),
                path: change.path(),
                source,
            })
    }
}

impl Debug for ConfigStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("filename", &self.filename)
            .field("document", &self.document)
            .field("observed", &self.observable.is_some())
            .finish_non_exhaustive()
    }
}
