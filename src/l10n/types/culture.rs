//! Culture identifiers and their parent chain.

use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

use super::error::{ResourceError, Result};

/// Culture used by a new registry until the caller overrides it.
pub const DEFAULT_CULTURE: &str = "en-US";

/// A normalized language tag identifying a resource culture (`en`, `en-US`,
/// `zh-Hans-CN`).
///
/// Parsing canonicalizes casing (`EN_us` becomes `en-US`), so two cultures are
/// equal iff their normalized tags are equal. The neutral root culture (`und`,
/// also produced by an empty tag) sits at the top of every parent chain and has
/// no parent itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Culture(LanguageIdentifier);

impl Culture {
    /// Parses a culture tag.
    ///
    /// # Errors
    /// Returns [`ResourceError::InvalidCulture`] if `tag` is not a well-formed
    /// language identifier.
    pub fn parse(tag: &str) -> Result<Self> {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Ok(Self::root());
        }

        trimmed
            .parse::<LanguageIdentifier>()
            .map(Self)
            .map_err(|e| ResourceError::InvalidCulture {
                tag: tag.to_string(),
                reason: e.to_string(),
            })
    }

    /// The neutral root culture.
    pub fn root() -> Self {
        Self(LanguageIdentifier::default())
    }

    /// Returns `true` for the neutral root culture.
    pub fn is_root(&self) -> bool {
        self.0 == LanguageIdentifier::default()
    }

    /// The next more general culture.
    ///
    /// Variants are dropped first, then the region, then the script; a bare
    /// language falls back to the root culture, which has no parent.
    pub fn parent(&self) -> Option<Culture> {
        let mut id = self.0.clone();

        if id.variants().next().is_some() {
            id.clear_variants();
        } else if id.region.is_some() {
            id.region = None;
        } else if id.script.is_some() {
            id.script = None;
        } else if !self.is_root() {
            id = LanguageIdentifier::default();
        } else {
            return None;
        }

        Some(Self(id))
    }

    /// The underlying language identifier.
    pub fn language_identifier(&self) -> &LanguageIdentifier {
        &self.0
    }
}

impl Default for Culture {
    fn default() -> Self {
        Self::root()
    }
}

impl FromStr for Culture {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<LanguageIdentifier> for Culture {
    fn from(id: LanguageIdentifier) -> Self {
        Self(id)
    }
}

impl fmt::Display for Culture {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
