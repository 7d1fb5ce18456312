//! The dictionary contract shared by parsers, aggregates and the registry.

use indexmap::IndexMap;

use super::culture::Culture;

/// A culture plus a flat mapping of resource keys to localized values.
///
/// Keys are colon-joined category paths (`"Search:Label"`) and are
/// case-sensitive at this layer; case folding happens when a dictionary is
/// merged into an [`AggregateDictionary`](crate::AggregateDictionary).
pub trait ResourceDictionary {
    /// The culture this dictionary provides values for.
    fn culture(&self) -> &Culture;

    /// Localized values in document order.
    fn values(&self) -> &IndexMap<String, String>;
}

/// A dictionary produced by a parser, or a snapshot of an aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    culture: Culture,
    values: IndexMap<String, String>,
}

impl Dictionary {
    pub fn new(culture: Culture, values: IndexMap<String, String>) -> Self {
        Self { culture, values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> IndexMap<String, String> {
        self.values
    }
}

impl ResourceDictionary for Dictionary {
    fn culture(&self) -> &Culture {
        &self.culture
    }

    fn values(&self) -> &IndexMap<String, String> {
        &self.values
    }
}

impl<D: ResourceDictionary + ?Sized> ResourceDictionary for &D {
    fn culture(&self) -> &Culture {
        (**self).culture()
    }

    fn values(&self) -> &IndexMap<String, String> {
        (**self).values()
    }
}
