//! Core resource engine
//!
//! ```text
//!  files ──► DictionaryLoader ──► format::{json, xml} ──► Dictionary
//!                                                           │
//!                      Resources ◄── AggregateDictionary ◄──┘
//!                          │            (one per culture)
//!                          ▼
//!        get(culture, name) via the culture-fallback chain
//! ```

pub mod format;
pub mod types;
mod aggregate;
mod loader;
mod registry;
pub mod utils;

pub use aggregate::AggregateDictionary;
pub use loader::DictionaryLoader;
pub use registry::Resources;
pub use types::error::{ResourceError, Result};
