//! Merging of several dictionaries that target the same culture.

use std::sync::RwLock;
use indexmap::IndexMap;
use log::{debug, trace};

use super::types::culture::Culture;
use super::types::error::{ResourceError, Result};
use super::types::models::{Dictionary, ResourceDictionary};

/// A stored value together with the first spelling of its key.
#[derive(Debug, Clone)]
struct Entry {
    key: String,
    value: String,
}

/// The resource dictionary used to aggregate several dictionaries for the same
/// culture.
///
/// Keys are matched case-insensitively using Unicode lowercase folding, which
/// does not depend on the host locale. When a key is added again, its value is
/// replaced but the first spelling and position are kept.
///
/// The value map sits behind its own lock: [`add`](Self::add) merges under a
/// single write lock, so readers see either none or all of an added dictionary.
#[derive(Debug)]
pub struct AggregateDictionary {
    culture: Culture,
    values: RwLock<IndexMap<String, Entry>>,
}

impl AggregateDictionary {
    pub fn new(culture: Culture) -> Self {
        Self {
            culture,
            values: RwLock::new(IndexMap::new()),
        }
    }

    pub fn culture(&self) -> &Culture {
        &self.culture
    }

    /// Merges another dictionary into this one. Values with an existing key are
    /// replaced; keys only present here are kept.
    ///
    /// # Errors
    /// Returns [`ResourceError::CultureConflict`] without touching any value if
    /// `dictionary` is for a different culture.
    pub fn add(&self, dictionary: &impl ResourceDictionary) -> Result<()> {
        if dictionary.culture() != &self.culture {
            return Err(ResourceError::CultureConflict {
                expected: self.culture.clone(),
                found: dictionary.culture().clone(),
            });
        }

        let mut values = self.values.write().map_err(|_| ResourceError::LockPoisoned)?;
        for (key, value) in dictionary.values() {
            trace!("Merging '{}' into {}", key, self.culture);
            values
                .entry(fold(key))
                .and_modify(|entry| entry.value = value.clone())
                .or_insert_with(|| Entry {
                    key: key.clone(),
                    value: value.clone(),
                });
        }

        debug!(
            "Merged {} values into {} (now {} values)",
            dictionary.values().len(),
            self.culture,
            values.len()
        );
        Ok(())
    }

    /// Returns the value stored under `key`, ignoring case.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.read().map_err(|_| ResourceError::LockPoisoned)?;
        Ok(values.get(&fold(key)).map(|entry| entry.value.clone()))
    }

    pub fn contains_key(&self, key: &str) -> Result<bool> {
        let values = self.values.read().map_err(|_| ResourceError::LockPoisoned)?;
        Ok(values.contains_key(&fold(key)))
    }

    pub fn len(&self) -> Result<usize> {
        let values = self.values.read().map_err(|_| ResourceError::LockPoisoned)?;
        Ok(values.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// All keys in their first-seen spelling, in insertion order.
    pub fn keys(&self) -> Result<Vec<String>> {
        let values = self.values.read().map_err(|_| ResourceError::LockPoisoned)?;
        Ok(values.values().map(|entry| entry.key.clone()).collect())
    }

    /// Copies the current values into a standalone [`Dictionary`], e.g. for
    /// exporting the whole set at once.
    pub fn snapshot(&self) -> Result<Dictionary> {
        let values = self.values.read().map_err(|_| ResourceError::LockPoisoned)?;
        let copy = values
            .values()
            .map(|entry| (entry.key.clone(), entry.value.clone()))
            .collect();
        Ok(Dictionary::new(self.culture.clone(), copy))
    }
}

/// Case folding used for key comparison.
fn fold(key: &str) -> String {
    key.to_lowercase()
}
