//! Error types for document decoding.

use thiserror::Error;

/// Errors that can occur while decoding XML into a `TreeValue`.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The underlying XML reader rejected the input.
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An attribute could not be parsed.
    #[error("malformed XML attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// The input ended while an element was still open.
    #[error("unexpected end of input, element <{0}> is not closed")]
    UnclosedElement(String),

    /// The input contained no root element.
    #[error("no root element found")]
    MissingRoot,
}
