//! The culture-keyed registry of aggregate dictionaries.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use log::{debug, info};

use super::aggregate::AggregateDictionary;
use super::types::culture::{Culture, DEFAULT_CULTURE};
use super::types::error::{ResourceError, Result};
use super::types::models::ResourceDictionary;

/// Provides access to localized resources.
///
/// Holds one [`AggregateDictionary`] per loaded culture and resolves lookups
/// through a culture-fallback chain. The culture the caller wants (typically
/// the UI culture of the current request) is passed to every lookup; the
/// registry only stores the default culture used when that one is missing.
///
/// `Resources` is `Send + Sync`; share it behind an `Arc` or a reference.
/// Loading may run concurrently with lookups.
#[derive(Debug)]
pub struct Resources {
    dictionaries: RwLock<HashMap<Culture, Arc<AggregateDictionary>>>,
    default_culture: RwLock<Culture>,
}

impl Default for Resources {
    fn default() -> Self {
        Self::new()
    }
}

impl Resources {
    /// Creates an empty registry whose default culture is `en-US`.
    pub fn new() -> Self {
        let default_culture = Culture::parse(DEFAULT_CULTURE).unwrap_or_default();
        Self::with_default_culture(default_culture)
    }

    pub fn with_default_culture(default_culture: Culture) -> Self {
        Self {
            dictionaries: RwLock::new(HashMap::new()),
            default_culture: RwLock::new(default_culture),
        }
    }

    /// The culture used when no dictionary exists for the requested culture or
    /// its parent.
    pub fn default_culture(&self) -> Result<Culture> {
        let culture = self.default_culture.read().map_err(|_| ResourceError::LockPoisoned)?;
        Ok(culture.clone())
    }

    pub fn set_default_culture(&self, culture: Culture) -> Result<()> {
        let mut current = self.default_culture.write().map_err(|_| ResourceError::LockPoisoned)?;
        info!("Default culture changed: {} -> {}", current, culture);
        *current = culture;
        Ok(())
    }

    /// All cultures a dictionary has been loaded for, sorted by tag.
    pub fn cultures(&self) -> Result<Vec<Culture>> {
        let dictionaries = self.dictionaries.read().map_err(|_| ResourceError::LockPoisoned)?;
        let mut cultures: Vec<Culture> = dictionaries.keys().cloned().collect();
        cultures.sort_by_key(|culture| culture.to_string());
        Ok(cultures)
    }

    /// Resolves the culture whose dictionary lookups for `requested` are served
    /// from.
    ///
    /// Tried in order: `requested`, its parent, the default culture, the default
    /// culture's parent. Only one parent level is tried on each side, so
    /// `zh-Hans-CN` falls back to `zh-Hans` but never to `zh`.
    ///
    /// # Errors
    /// Returns [`ResourceError::DictionaryNotFound`] if none of them is loaded.
    pub fn current_culture(&self, requested: &Culture) -> Result<Culture> {
        let (culture, _) = self.resolve(requested)?;
        Ok(culture)
    }

    /// Returns the dictionary lookups for `requested` are served from.
    pub fn dictionary(&self, requested: &Culture) -> Result<Arc<AggregateDictionary>> {
        let (_, dictionary) = self.resolve(requested)?;
        Ok(dictionary)
    }

    /// Returns the resource with the given name; or `None` if the resource does
    /// not exist. `/` in `name` is treated as the category separator `:`.
    ///
    /// # Errors
    /// - [`ResourceError::EmptyName`] if `name` is blank
    /// - [`ResourceError::DictionaryNotFound`] if no dictionary resolves
    pub fn get(&self, requested: &Culture, name: &str) -> Result<Option<String>> {
        if name.trim().is_empty() {
            return Err(ResourceError::EmptyName);
        }

        let key = name.replace('/', ":");
        self.dictionary(requested)?.get(&key)
    }

    /// Returns the resource `name` in `category`, falling back to the
    /// uncategorized `name`; or `None` if neither exists.
    pub fn get_in(&self, requested: &Culture, category: &str, name: &str) -> Result<Option<String>> {
        if category.trim().is_empty() || name.trim().is_empty() {
            return Err(ResourceError::EmptyName);
        }

        match self.get(requested, &format!("{}:{}", category, name))? {
            Some(value) => Ok(Some(value)),
            None => self.get(requested, name),
        }
    }

    /// Loads localized values from the given dictionary, creating the culture's
    /// aggregate on first sight and merging into it otherwise.
    ///
    /// # Errors
    /// Propagates [`AggregateDictionary::add`] errors.
    pub fn load(&self, dictionary: impl ResourceDictionary) -> Result<()> {
        let culture = dictionary.culture();

        if let Some(aggregate) = self.find(culture)? {
            return aggregate.add(&dictionary);
        }

        let mut dictionaries = self.dictionaries.write().map_err(|_| ResourceError::LockPoisoned)?;
        // Another thread may have registered the culture since `find`
        if let Some(aggregate) = dictionaries.get(culture).map(Arc::clone) {
            drop(dictionaries);
            return aggregate.add(&dictionary);
        }

        // A new aggregate is filled before it becomes visible to lookups
        info!("Registering dictionary for culture {}", culture);
        let aggregate = AggregateDictionary::new(culture.clone());
        aggregate.add(&dictionary)?;
        dictionaries.insert(culture.clone(), Arc::new(aggregate));
        Ok(())
    }

    fn find(&self, culture: &Culture) -> Result<Option<Arc<AggregateDictionary>>> {
        let dictionaries = self.dictionaries.read().map_err(|_| ResourceError::LockPoisoned)?;
        Ok(dictionaries.get(culture).map(Arc::clone))
    }

    fn resolve(&self, requested: &Culture) -> Result<(Culture, Arc<AggregateDictionary>)> {
        let dictionaries = self.dictionaries.read().map_err(|_| ResourceError::LockPoisoned)?;
        let default_culture = self.default_culture()?;

        let candidates = [
            Some(requested.clone()),
            requested.parent(),
            Some(default_culture.clone()),
            default_culture.parent(),
        ];

        for culture in candidates.into_iter().flatten() {
            if let Some(dictionary) = dictionaries.get(&culture) {
                debug!("Resolved culture {} for requested {}", culture, requested);
                return Ok((culture, Arc::clone(dictionary)));
            }
        }

        debug!("No dictionary for {} (default {})", requested, default_culture);
        Err(ResourceError::DictionaryNotFound {
            culture: requested.clone(),
        })
    }
}
