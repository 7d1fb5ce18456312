//! # locres
//!
//! Localized resource dictionaries for applications.
//! Loads per-culture key/value documents (JSON and XML), merges documents that
//! target the same culture and resolves names through a culture-fallback chain.
//!
//! ```no_run
//! use locres::{Culture, DictionaryLoader, Resources};
//!
//! # fn main() -> locres::Result<()> {
//! let resources = Resources::new();
//! DictionaryLoader::new(&resources, "assets")?
//!     .load_json("locales")?
//!     .load_xml("locales")?;
//!
//! let culture: Culture = "cs-CZ".parse()?;
//! let label = resources.get_in(&culture, "Search", "Label")?;
//! # let _ = label;
//! # Ok(())
//! # }
//! ```
pub mod l10n;

// Re-export the main types for convenience
pub use l10n::{
    AggregateDictionary,
    DictionaryLoader,
    Resources,
    format::{DictionaryFormat, Json, Xml},
    types::{
        culture::Culture,
        error::{FormatError, Position, ResourceError, Result},
        models::{Dictionary, ResourceDictionary},
    },
};
