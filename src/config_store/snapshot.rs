use serde::Serialize;

use crate::ini::{DEFAULT_SECTION, Section};

use super::ConfigStore;

/// One section and its own key/value pairs, as produced by [`ConfigStore::to_dict`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionDict {
    /// Section name.
    pub name: String,
    /// The section's values in file order. Defaults are not merged in.
    pub items: Section,
}

impl ConfigStore {
    /// Snapshots sections as plain data.
    ///
    /// Without a filter, returns every named section in order (`DEFAULT` is
    /// not listed). With one, returns only that section, or nothing if it
    /// does not exist; asking for `DEFAULT` returns the defaults.
    pub fn to_dict(&self, section: Option<&str>) -> Vec<SectionDict> {
        if section == Some(DEFAULT_SECTION) {
            return vec![SectionDict {
                name: DEFAULT_SECTION.to_string(),
                items: self.defaults().clone(),
            }];
        }

        self.document
            .sections()
            .iter()
            .filter(|(name, _)| section.is_none_or(|wanted| wanted == name.as_str()))
            .map(|(name, items)| SectionDict {
                name: name.clone(),
                items: items.clone(),
            })
            .collect()
    }
}
