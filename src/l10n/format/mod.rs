//! Document formats that produce resource dictionaries.
//!
//! # Module Organization
//!
//! - [`json`]: streaming parser for nested JSON objects of strings
//! - [`xml`]: element-tree parser for `category`/`localized` documents
//!
//! Every parser has the same contract: a byte stream in, one
//! [`Dictionary`] out. [`DictionaryFormat`] ties a parser to the file
//! pattern the loader uses for it, but the loader accepts any function with
//! that contract, so new formats need no changes elsewhere.

pub mod json;
pub mod xml;

use std::io::Read;

use crate::l10n::types::error::Result;
use crate::l10n::types::models::Dictionary;

/// A trait that defines a document format the loader can read.
pub trait DictionaryFormat {
    /// A short name used for debugging and logging.
    const DEBUG_NAME: &'static str;

    /// Glob matched against file names when loading a folder.
    const PATTERN: &'static str;

    /// Parses one document into a dictionary.
    fn parse(reader: &mut dyn Read) -> Result<Dictionary>;
}

/// Zero-cost marker struct for JSON dictionaries.
#[derive(Debug)]
pub struct Json;

impl DictionaryFormat for Json {
    const DEBUG_NAME: &'static str = "JSON";
    const PATTERN: &'static str = "*.json";

    fn parse(reader: &mut dyn Read) -> Result<Dictionary> {
        json::load(reader)
    }
}

/// Zero-cost marker struct for XML dictionaries.
#[derive(Debug)]
pub struct Xml;

impl DictionaryFormat for Xml {
    const DEBUG_NAME: &'static str = "XML";
    const PATTERN: &'static str = "*.xml";

    fn parse(reader: &mut dyn Read) -> Result<Dictionary> {
        xml::load(reader)
    }
}
