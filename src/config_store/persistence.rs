use std::{fs, io::ErrorKind, path::PathBuf};

use tracing::{error, info};

use crate::{Result, StoreError, ini::IniDocument};

use super::ConfigStore;

impl ConfigStore {
    /// Creates a store for `filename` and loads it.
    ///
    /// # Errors
    /// Same as [`load`](Self::load).
    pub fn open(filename: impl Into<PathBuf>) -> Result<Self> {
        let mut store = Self::new(filename);
        store.load()?;
        Ok(store)
    }

    /// Replaces the in-memory settings with the contents of the backing file.
    ///
    /// A missing file yields an empty configuration; the file is created on
    /// the first [`save`](Self::save). Observers are not notified.
    ///
    /// # Errors
    /// * `StoreError::IoError` - The file exists but cannot be read
    /// * `StoreError::IniParse` - The file is not valid INI. The in-memory
    ///   settings are left untouched.
    pub fn load(&mut self) -> Result<()> {
        let span = self.span.clone();
        let _entered = span.enter();

        let content = match fs::read_to_string(&self.filename) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.document = IniDocument::new();
                info!(path = %self.filename.display(), "settings file not found, starting empty");
                return Ok(());
            }
            Err(e) => {
                error!(path = %self.filename.display(), error = %e, "failed to read settings");
                return Err(StoreError::io(e, &self.filename));
            }
        };

        self.document = IniDocument::parse(&content, Some(self.filename.as_path()))
            .inspect_err(|e| error!(error = %e, "failed to load settings"))?;

        info!(
            path = %self.filename.display(),
            sections = self.document.sections().len(),
            defaults = self.document.defaults().len(),
            "settings loaded"
        );
        Ok(())
    }

    /// Writes every setting to the backing file, replacing its contents.
    ///
    /// The parent directory must already exist.
    ///
    /// # Errors
    /// * `StoreError::IoError` - The file cannot be written
    pub fn save(&self) -> Result<()> {
        let _entered = self.span.enter();

        fs::write(&self.filename, self.document.to_string()).map_err(|e| {
            error!(path = %self.filename.display(), error = %e, "failed to save settings");
            StoreError::io(e, &self.filename)
        })?;

        info!(path = %self.filename.display(), "settings saved");
        Ok(())
    }
}
