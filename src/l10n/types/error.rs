//! Error types for the locres crate.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use super::culture::Culture;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A source document is syntactically invalid.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The document is well formed but never declares its culture.
    #[error("The target culture could not be read from the dictionary.")]
    MissingCulture,

    /// A culture tag could not be parsed as a language identifier.
    #[error("Invalid culture '{tag}': {reason}")]
    InvalidCulture { tag: String, reason: String },

    /// A category or localized element has no `name` attribute.
    #[error("The '{element}' element{} is missing its 'name' attribute", in_category(.parent))]
    MissingName {
        element: &'static str,
        parent: Option<String>,
    },

    /// A localized element has no nested `value` element.
    #[error("The localized value '{key}' is missing its 'value' element")]
    MissingValue { key: String },

    /// A dictionary was added to an aggregate that owns a different culture.
    #[error("The added dictionary is for culture '{found}', but the aggregate dictionary is for '{expected}'")]
    CultureConflict { expected: Culture, found: Culture },

    /// No dictionary resolves for the requested culture, its parent, the default
    /// culture or the default culture's parent.
    #[error("A resource dictionary for culture '{culture}' could not be found")]
    DictionaryNotFound { culture: Culture },

    /// A resource name or category passed to a lookup is blank.
    #[error("Resource names and categories must not be empty")]
    EmptyName,

    /// The loader was created with a blank root path.
    #[error("The loader root path must not be empty")]
    InvalidRoot,

    /// The loader file pattern is not a valid glob.
    #[error("Invalid file pattern: {0}")]
    InvalidPattern(String),

    /// A document failed while loading a folder.
    #[error("Failed to load '{}': {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: Box<ResourceError>,
    },

    /// A lock was poisoned, indicating a panic in another thread holding the lock.
    #[error("A lock was poisoned, indicating a panic in another thread holding the lock.")]
    LockPoisoned,
}

fn in_category(parent: &Option<String>) -> String {
    match parent {
        Some(parent) => format!(" in category '{}'", parent),
        None => String::new(),
    }
}

/// A syntactic defect in a source document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}. {position}")]
pub struct FormatError {
    pub message: String,
    pub position: Position,
}

impl FormatError {
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

/// Human-locatable position of a format error.
///
/// `line` and `column` are 1-based and count characters, not bytes. `path` is the
/// structural path inside the document (empty at the root or when the format
/// does not track one).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub path: String,
}

impl Position {
    /// Computes the line and column of a byte offset into `text`.
    ///
    /// Offsets past the end, or inside a multi-byte character, are clamped to the
    /// nearest preceding character boundary.
    pub fn from_offset(text: &str, offset: usize) -> Self {
        let mut end = offset.min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }

        let mut line = 1;
        let mut column = 1;
        for c in text[..end].chars() {
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }

        Self {
            line,
            column,
            path: String::new(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "Line {}, column {}.", self.line, self.column)
        } else {
            write!(f, "Path '{}', line {}, column {}.", self.path, self.line, self.column)
        }
    }
}

/// A convenience `Result` type alias using the crate's `ResourceError` type.
pub type Result<T> = std::result::Result<T, ResourceError>;
