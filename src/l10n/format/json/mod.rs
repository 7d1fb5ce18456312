//! JSON resource dictionaries.
//!
//! A document is a single object whose string properties are localized values.
//! Nested objects act as categories, so
//!
//! ```json
//! {
//!   "culture": "en",
//!   "Title": "Application Title",
//!   "Search": { "Label": "Search" }
//! }
//! ```
//!
//! yields culture `en` with the keys `Title` and `Search:Label`. The top-level
//! `culture` property is required. Only objects and strings are allowed; any
//! other value (numbers, booleans, arrays, null) is rejected. Comments are
//! permitted between tokens.

use std::io::Read;
use indexmap::IndexMap;
use log::{debug, trace};
use struson::reader::{JsonReader, JsonStreamReader, ReaderError, ReaderSettings, ValueType};

use crate::l10n::types::culture::Culture;
use crate::l10n::types::error::{FormatError, Position, ResourceError, Result};
use crate::l10n::types::models::Dictionary;
use crate::l10n::utils;

/// Property that declares the document culture.
const CULTURE_KEY: &str = "culture";

/// Loads a JSON resource dictionary from a byte stream.
///
/// # Errors
/// - [`ResourceError::Io`] if the stream cannot be read
/// - [`ResourceError::Format`] if the document is malformed or contains
///   anything but nested objects of strings
/// - [`ResourceError::MissingCulture`] if no `culture` property is present
/// - [`ResourceError::InvalidCulture`] if the declared culture does not parse
pub fn load<R: Read>(mut reader: R) -> Result<Dictionary> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = utils::decode_document(&bytes, None);
    parse_str(&text)
}

/// Parses a JSON resource dictionary from text.
///
/// The document is walked with an explicit category stack rather than by
/// recursion, so nesting depth does not grow the call stack.
pub fn parse_str(text: &str) -> Result<Dictionary> {
    let settings = ReaderSettings {
        allow_comments: true,
        max_nesting_depth: None,
        ..Default::default()
    };
    let mut json = JsonStreamReader::new_custom(text.as_bytes(), settings);
    let mut walk = Walk::default();

    let root = json.peek().map_err(|e| walk.reader_error(&json, e))?;
    if root != ValueType::Object {
        return Err(walk.error("root must be an object", &json).into());
    }
    json.begin_object().map_err(|e| walk.reader_error(&json, e))?;

    let mut culture = None;
    let mut values = IndexMap::new();
    let mut depth = 1usize;

    while depth > 0 {
        if !json.has_next().map_err(|e| walk.reader_error(&json, e))? {
            json.end_object().map_err(|e| walk.reader_error(&json, e))?;
            walk.leave();
            depth -= 1;
            continue;
        }

        let name = json.next_name_owned().map_err(|e| walk.reader_error(&json, e))?;
        walk.name = Some(name);

        match json.peek().map_err(|e| walk.reader_error(&json, e))? {
            ValueType::Object => {
                json.begin_object().map_err(|e| walk.reader_error(&json, e))?;
                walk.enter();
                depth += 1;
            }
            ValueType::String => {
                let value = json.next_string().map_err(|e| walk.reader_error(&json, e))?;
                let key = walk.key();
                if key == CULTURE_KEY {
                    culture = Some(Culture::parse(&value)?);
                } else {
                    trace!("JSON value '{}'", key);
                    values.insert(key, value);
                }
            }
            other => {
                let message = format!("unsupported token {}", token_name(other));
                return Err(walk.error(message, &json).into());
            }
        }
    }

    let culture = culture.ok_or(ResourceError::MissingCulture)?;
    debug!("Parsed JSON dictionary: culture={}, values={}", culture, values.len());
    Ok(Dictionary::new(culture, values))
}

/// Where the walk currently is: the enclosing categories and the property
/// being read.
#[derive(Debug, Default)]
struct Walk {
    categories: Vec<String>,
    name: Option<String>,
}

impl Walk {
    /// The current property becomes an open category.
    fn enter(&mut self) {
        if let Some(name) = self.name.take() {
            self.categories.push(name);
        }
    }

    /// Closes the innermost category; its name is the current property again.
    fn leave(&mut self) {
        self.name = self.categories.pop();
    }

    fn segments(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .chain(self.name.as_ref())
            .map(String::as_str)
    }

    /// The dictionary key of the current property, segments joined with `:`.
    fn key(&self) -> String {
        self.segments().collect::<Vec<_>>().join(":")
    }

    /// The JSON path of the current property (`Search.Label`, `['a b'].c`).
    fn path(&self) -> String {
        let mut path = String::new();
        for name in self.segments() {
            if needs_quoting(name) {
                path.push_str("['");
                path.push_str(&name.replace('\'', "\\'"));
                path.push_str("']");
            } else {
                if !path.is_empty() {
                    path.push('.');
                }
                path.push_str(name);
            }
        }
        path
    }

    fn position<R: Read>(&self, json: &JsonStreamReader<R>) -> Position {
        let (line, column) = json
            .current_position(false)
            .line_pos
            .map_or((0, 0), |pos| (pos.line as usize + 1, pos.column as usize + 1));
        Position {
            line,
            column,
            path: self.path(),
        }
    }

    fn error<R: Read>(&self, message: impl Into<String>, json: &JsonStreamReader<R>) -> FormatError {
        FormatError::new(message, self.position(json))
    }

    fn reader_error<R: Read>(&self, json: &JsonStreamReader<R>, error: ReaderError) -> ResourceError {
        self.error(error.to_string(), json).into()
    }
}

/// Token names used in error messages.
fn token_name(value_type: ValueType) -> &'static str {
    match value_type {
        ValueType::Array => "StartArray",
        ValueType::Object => "StartObject",
        ValueType::String => "String",
        ValueType::Number => "Number",
        ValueType::Boolean => "Boolean",
        ValueType::Null => "Null",
    }
}

fn needs_quoting(name: &str) -> bool {
    name.is_empty()
        || name
            .chars()
            .any(|c| matches!(c, '.' | ' ' | '[' | ']' | '(' | ')' | '\'' | '"' | '\t' | '\r' | '\n'))
}
