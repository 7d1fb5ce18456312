//! XML resource dictionaries.
//!
//! ```xml
//! <dictionary culture="en" xmlns="http://xml.moontea.net/localization">
//!   <localized name="Title"><value>Application Title</value></localized>
//!   <category name="Search">
//!     <localized name="Label"><value>Search</value></localized>
//!   </category>
//! </dictionary>
//! ```
//!
//! The root element carries the culture. `category` elements nest and prefix
//! their children's keys with `name:`; each `localized` element contributes one
//! value read from its `value` child. Only elements in [`NAMESPACE`] are
//! recognised, the root element's own name is not checked.

use std::borrow::Cow;
use std::io::Read;
use encoding_rs::{UTF_16BE, UTF_16LE};
use indexmap::IndexMap;
use log::{debug, trace};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::{NsReader, Reader};

use crate::l10n::types::culture::Culture;
use crate::l10n::types::error::{FormatError, Position, ResourceError, Result};
use crate::l10n::types::models::Dictionary;
use crate::l10n::utils;

/// Namespace of the dictionary elements.
pub const NAMESPACE: &str = "http://xml.moontea.net/localization";

const CATEGORY: &str = "category";
const LOCALIZED: &str = "localized";
const VALUE: &str = "value";
const CULTURE_ATTRIBUTE: &str = "culture";
const NAME_ATTRIBUTE: &str = "name";

/// Loads an XML resource dictionary from a byte stream.
///
/// # Errors
/// - [`ResourceError::Io`] if the stream cannot be read
/// - [`ResourceError::Format`] if the document is not well-formed XML
/// - [`ResourceError::MissingName`] / [`ResourceError::MissingValue`] if a
///   category or localized element is incomplete
/// - [`ResourceError::MissingCulture`] if the root has no `culture` attribute
pub fn load<R: Read>(mut reader: R) -> Result<Dictionary> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let declared = declared_encoding(&bytes);
    let text = utils::decode_document(&bytes, declared.as_deref());
    parse_str(&text)
}

/// Parses an XML resource dictionary from text.
pub fn parse_str(text: &str) -> Result<Dictionary> {
    let root = read_tree(text)?;

    let mut values = IndexMap::new();
    fill_values(&mut values, &root, None)?;

    let culture = root
        .attribute(CULTURE_ATTRIBUTE)
        .ok_or(ResourceError::MissingCulture)
        .and_then(Culture::parse)?;

    debug!("Parsed XML dictionary: culture={}, values={}", culture, values.len());
    Ok(Dictionary::new(culture, values))
}

/// An element of the parsed document.
#[derive(Debug, Default)]
struct Element {
    namespace: Option<String>,
    local_name: String,
    /// Unprefixed attributes only; namespace declarations are dropped.
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

#[derive(Debug)]
enum Node {
    Element(Element),
    Text(String),
}

impl Element {
    fn is(&self, local_name: &str) -> bool {
        self.namespace.as_deref() == Some(NAMESPACE) && self.local_name == local_name
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn elements<'a>(&'a self, local_name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter_map(move |child| match child {
            Node::Element(element) if element.is(local_name) => Some(element),
            _ => None,
        })
    }

    /// Concatenated text of this element and all of its descendants.
    fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }
}

/// Walks categories depth-first, then the localized values of `element`.
fn fill_values(
    values: &mut IndexMap<String, String>,
    element: &Element,
    parent_key: Option<&str>,
) -> Result<()> {
    for child in element.elements(CATEGORY) {
        let key = child_key(parent_key, child, CATEGORY)?;
        fill_values(values, child, Some(&key))?;
    }

    for child in element.elements(LOCALIZED) {
        let key = child_key(parent_key, child, LOCALIZED)?;
        let value = child
            .elements(VALUE)
            .next()
            .map(Element::text)
            .ok_or_else(|| ResourceError::MissingValue { key: key.clone() })?;
        trace!("XML value '{}'", key);
        values.insert(key, value);
    }

    Ok(())
}

fn child_key(parent_key: Option<&str>, element: &Element, kind: &'static str) -> Result<String> {
    let name = element
        .attribute(NAME_ATTRIBUTE)
        .ok_or_else(|| ResourceError::MissingName {
            element: kind,
            parent: parent_key.map(str::to_string),
        })?;

    Ok(match parent_key {
        Some(parent) => format!("{}:{}", parent, name),
        None => name.to_string(),
    })
}

/// Reads the whole document into an element tree and returns its root.
fn read_tree(text: &str) -> Result<Element> {
    let mut reader = NsReader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let offset = reader.buffer_position() as usize;
        let (resolved, event) = match reader.read_resolved_event() {
            Ok(pair) => pair,
            Err(e) => return Err(xml_error(text, reader.error_position() as usize, e)),
        };

        match event {
            Event::Start(start) => {
                let element = start_element(text, offset, resolved, &start, root.is_some(), &stack)?;
                stack.push(element);
            }
            Event::Empty(start) => {
                let element = start_element(text, offset, resolved, &start, root.is_some(), &stack)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element);
                }
            }
            Event::Text(content) => {
                if let Some(parent) = stack.last_mut() {
                    let content = content
                        .unescape()
                        .map_err(|e| xml_error(text, offset, e))?;
                    parent.children.push(Node::Text(content.into_owned()));
                }
            }
            Event::CData(content) => {
                if let Some(parent) = stack.last_mut() {
                    let content = String::from_utf8_lossy(&content).into_owned();
                    parent.children.push(Node::Text(content));
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(FormatError::new("unexpected end of input", Position::from_offset(text, text.len())).into());
    }

    root.ok_or_else(|| FormatError::new("root element is missing", Position::from_offset(text, text.len())).into())
}

fn start_element(
    text: &str,
    offset: usize,
    resolved: ResolveResult,
    start: &BytesStart,
    has_root: bool,
    stack: &[Element],
) -> Result<Element> {
    if has_root && stack.is_empty() {
        return Err(FormatError::new("multiple root elements", Position::from_offset(text, offset)).into());
    }

    let namespace = match resolved {
        ResolveResult::Bound(Namespace(ns)) => Some(String::from_utf8_lossy(ns).into_owned()),
        ResolveResult::Unbound => None,
        ResolveResult::Unknown(prefix) => {
            let message = format!("unknown namespace prefix '{}'", String::from_utf8_lossy(&prefix));
            return Err(FormatError::new(message, Position::from_offset(text, offset)).into());
        }
    };

    let local_name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| xml_error(text, offset, e))?;
        if attr.key.as_namespace_binding().is_some() || attr.key.prefix().is_some() {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| xml_error(text, offset, e))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(Element {
        namespace,
        local_name,
        attributes,
        children: Vec::new(),
    })
}

/// Appends a finished element to its parent, or makes it the document root.
fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => *root = Some(element),
    }
}

fn xml_error(text: &str, offset: usize, error: impl std::fmt::Display) -> ResourceError {
    FormatError::new(error.to_string(), Position::from_offset(text, offset)).into()
}

/// Reads the `encoding` of the XML declaration, if the document starts with
/// one that is readable as ASCII.
fn declared_encoding(bytes: &[u8]) -> Option<String> {
    if encoding_rs::Encoding::for_bom(bytes).is_some() {
        return None;
    }

    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Decl(decl)) => {
                let label = match decl.encoding()? {
                    Ok(Cow::Borrowed(label)) => String::from_utf8_lossy(label).into_owned(),
                    Ok(Cow::Owned(label)) => String::from_utf8_lossy(&label).into_owned(),
                    Err(_) => return None,
                };
                // A declaration we could read as ASCII cannot be UTF-16 encoded
                let encoding = utils::parse_encoding(&label)?;
                if encoding == UTF_16LE || encoding == UTF_16BE {
                    return None;
                }
                return Some(label);
            }
            Ok(Event::Text(_)) => {}
            _ => return None,
        }
        buf.clear();
    }
}
