//! Nested document model and decoders.
//!
//! - `node`: the `TreeValue` type and its loose-truthiness rules
//! - `parser`: JSON and YAML decoding via serde
//! - `xml`: XML decoding into the attribute/child/text convention

pub mod error;
pub mod node;
pub mod parser;
pub mod xml;

pub use error::DecodeError;
pub use node::{TreeNumber, TreeValue};
