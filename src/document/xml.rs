//! XML decoding into `TreeValue`.
//!
//! The decoded shape follows the common "XML to array" convention used by
//! data-import pipelines:
//!
//! - the root element is unwrapped, so the result is the root's content
//! - an element with no attributes and no children becomes its text
//! - otherwise it becomes a mapping of `@attribute` keys, child element names
//!   and, when present, its own text under `#`
//! - a child element name that repeats becomes a sequence
//!
//! The last rule is why a single `<item>` decodes to a mapping while two of
//! them decode to a sequence of mappings; `pathmap::values` smooths that over.
//!
//! # Example
//!
//! ```
//! use butils::document::xml::parse_xml;
//!
//! let tree = parse_xml(r#"<feed><item id="1">a</item><item id="2">b</item></feed>"#).unwrap();
//! let items = tree.child("item").unwrap();
//! assert!(items.is_sequence());
//! assert_eq!(items.child("1").and_then(|i| i.child("#")).and_then(|t| t.as_str()), Some("b"));
//! ```

use super::error::DecodeError;
use super::node::{TreeNumber, TreeValue};
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use tracing::trace;

/// Key under which an element's own text is stored when it also has
/// attributes or children.
pub const TEXT_KEY: &str = "#";

/// Prefix for attribute keys.
pub const ATTRIBUTE_PREFIX: &str = "@";

/// An element that has been opened but not yet closed.
struct Frame {
    name: String,
    attributes: IndexMap<String, TreeValue>,
    children: IndexMap<String, TreeValue>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self, DecodeError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = IndexMap::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = format!(
                "{}{}",
                ATTRIBUTE_PREFIX,
                String::from_utf8_lossy(attr.key.as_ref())
            );
            let value = attr.unescape_value()?;
            attributes.insert(key, attribute_value(&value));
        }
        Ok(Self {
            name,
            attributes,
            children: IndexMap::new(),
            text: String::new(),
        })
    }

    fn add_child(&mut self, name: String, value: TreeValue) {
        match self.children.get_mut(&name) {
            Some(TreeValue::Sequence(items)) => items.push(value),
            Some(existing) => {
                let first = std::mem::replace(existing, TreeValue::Null);
                *existing = TreeValue::Sequence(vec![first, value]);
            }
            None => {
                self.children.insert(name, value);
            }
        }
    }

    fn close(self) -> (String, TreeValue) {
        if self.attributes.is_empty() && self.children.is_empty() {
            return (self.name, TreeValue::String(self.text));
        }

        let mut entries = self.attributes;
        entries.extend(self.children);
        if !self.text.trim().is_empty() {
            entries.insert(TEXT_KEY.to_string(), TreeValue::String(self.text));
        }
        (self.name, TreeValue::Mapping(entries))
    }
}

/// Decodes an XML document into a `TreeValue`.
///
/// # Errors
///
/// Returns a `DecodeError` for mismatched or unclosed tags, malformed
/// attributes or unknown entities, and for input without any element.
pub fn parse_xml(input: &str) -> Result<TreeValue, DecodeError> {
    let mut reader = Reader::from_str(input);
    reader.trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<TreeValue> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                if root.is_none() {
                    stack.push(Frame::open(&start)?);
                }
            }
            Event::Empty(start) => {
                if root.is_none() {
                    let frame = Frame::open(&start)?;
                    finish(frame, &mut stack, &mut root);
                }
            }
            Event::End(_) => {
                if let Some(frame) = stack.pop() {
                    finish(frame, &mut stack, &mut root);
                }
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(frame) = stack.pop() {
        return Err(DecodeError::UnclosedElement(frame.name));
    }
    root.ok_or(DecodeError::MissingRoot)
}

/// Closes `frame` and attaches it to its parent, or records it as the root.
fn finish(frame: Frame, stack: &mut [Frame], root: &mut Option<TreeValue>) {
    let (name, value) = frame.close();
    trace!(element = %name, kind = value.type_name(), "closed XML element");
    match stack.last_mut() {
        Some(parent) => parent.add_child(name, value),
        None => *root = Some(value),
    }
}

/// Numeric attribute values become numbers; everything else stays a string.
fn attribute_value(raw: &str) -> TreeValue {
    let trimmed = raw.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return TreeValue::Number(TreeNumber::Integer(i));
    }
    let looks_numeric = trimmed.bytes().any(|b| b.is_ascii_digit())
        && trimmed
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-' | b'e' | b'E'));
    if looks_numeric {
        if let Ok(f) = trimmed.parse::<f64>() {
            return TreeValue::Number(TreeNumber::Float(f));
        }
    }
    TreeValue::String(raw.to_string())
}
