//! Tree value representation shared by every loader and the path resolver.
//!
//! A `TreeValue` is what JSON, YAML and XML documents decode to: scalars,
//! ordered sequences, and insertion-ordered mappings keyed by strings.
//!
//! # Example
//!
//! ```
//! use butils::document::node::{TreeNumber, TreeValue};
//! use indexmap::IndexMap;
//!
//! let mut map = IndexMap::new();
//! map.insert("name".to_string(), TreeValue::String("butils".to_string()));
//! map.insert("count".to_string(), TreeValue::Number(TreeNumber::Integer(0)));
//! let tree = TreeValue::Mapping(map);
//!
//! assert!(!tree.is_empty());
//! assert!(tree.child("count").unwrap().is_empty());
//! ```

use indexmap::IndexMap;
use serde::ser::{Serialize, Serializer};

/// Represents numbers (integer or float)
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNumber {
    Integer(i64),
    Float(f64),
}

impl std::fmt::Display for TreeNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeNumber::Integer(i) => write!(f, "{}", i),
            TreeNumber::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl TreeNumber {
    pub fn as_f64(&self) -> f64 {
        match self {
            TreeNumber::Integer(i) => *i as f64,
            TreeNumber::Float(f) => *f,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, TreeNumber::Integer(_))
    }

    pub fn is_zero(&self) -> bool {
        match self {
            TreeNumber::Integer(i) => *i == 0,
            TreeNumber::Float(f) => *f == 0.0,
        }
    }
}

/// A nested data value.
///
/// Equality is strict: `Integer(1)` and `Float(1.0)` are different values,
/// and so are `String("1")` and `Integer(1)`.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeValue {
    Null,
    Boolean(bool),
    Number(TreeNumber),
    String(String),
    /// An ordered list of values
    Sequence(Vec<TreeValue>),
    /// Key-value pairs in insertion order
    Mapping(IndexMap<String, TreeValue>),
}

impl TreeValue {
    /// Loose truthiness: returns true for values that count as "no value".
    ///
    /// Null, `false`, numeric zero, the empty string, the string `"0"`, and
    /// empty sequences or mappings are all empty.
    ///
    /// # Example
    ///
    /// ```
    /// use butils::document::node::{TreeNumber, TreeValue};
    ///
    /// assert!(TreeValue::Null.is_empty());
    /// assert!(TreeValue::Number(TreeNumber::Float(0.0)).is_empty());
    /// assert!(TreeValue::String("0".to_string()).is_empty());
    /// assert!(!TreeValue::String("0.0".to_string()).is_empty());
    /// assert!(!TreeValue::Boolean(true).is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        match self {
            TreeValue::Null => true,
            TreeValue::Boolean(b) => !b,
            TreeValue::Number(n) => n.is_zero(),
            TreeValue::String(s) => s.is_empty() || s == "0",
            TreeValue::Sequence(items) => items.is_empty(),
            TreeValue::Mapping(entries) => entries.is_empty(),
        }
    }

    /// Two-level emptiness check.
    ///
    /// A container has content only when at least one of its direct children
    /// is non-empty, so `["", null]` has no content while `[["x"]]` does.
    pub fn has_content(&self) -> bool {
        match self {
            TreeValue::Sequence(items) => items.iter().any(|item| !item.is_empty()),
            TreeValue::Mapping(entries) => entries.values().any(|value| !value.is_empty()),
            scalar => !scalar.is_empty(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TreeValue::Null)
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, TreeValue::Mapping(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, TreeValue::Sequence(_))
    }

    /// Returns true for sequences and mappings.
    pub fn is_container(&self) -> bool {
        matches!(self, TreeValue::Sequence(_) | TreeValue::Mapping(_))
    }

    /// Returns true if the value is list-shaped: a sequence, or a mapping
    /// whose keys are exactly `"0"`, `"1"`, ... in order.
    pub fn is_collection(&self) -> bool {
        match self {
            TreeValue::Sequence(_) => true,
            TreeValue::Mapping(entries) => entries
                .keys()
                .enumerate()
                .all(|(position, key)| index_key(key) == Some(position)),
            _ => false,
        }
    }

    /// Short lowercase name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            TreeValue::Null => "null",
            TreeValue::Boolean(_) => "boolean",
            TreeValue::Number(_) => "number",
            TreeValue::String(_) => "string",
            TreeValue::Sequence(_) => "sequence",
            TreeValue::Mapping(_) => "mapping",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TreeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Takes a single path step.
    ///
    /// Mappings are looked up by key. Sequences are indexed when the segment
    /// is a canonical non-negative integer (`"0"`, `"12"`; not `"01"`).
    /// Scalars have no children.
    ///
    /// # Example
    ///
    /// ```
    /// use butils::document::node::TreeValue;
    ///
    /// let seq = TreeValue::Sequence(vec![
    ///     TreeValue::String("a".to_string()),
    ///     TreeValue::String("b".to_string()),
    /// ]);
    /// assert_eq!(seq.child("1").and_then(|v| v.as_str()), Some("b"));
    /// assert!(seq.child("01").is_none());
    /// assert!(seq.child("name").is_none());
    /// ```
    pub fn child(&self, segment: &str) -> Option<&TreeValue> {
        match self {
            TreeValue::Mapping(entries) => entries.get(segment),
            TreeValue::Sequence(items) => index_key(segment).and_then(|idx| items.get(idx)),
            _ => None,
        }
    }

    /// Dense, re-indexed view of a container's values.
    ///
    /// Sequences yield their items and mappings their values, both in order.
    /// Scalars yield nothing.
    pub fn elements(&self) -> Vec<&TreeValue> {
        match self {
            TreeValue::Sequence(items) => items.iter().collect(),
            TreeValue::Mapping(entries) => entries.values().collect(),
            _ => Vec::new(),
        }
    }

    /// Key/value pairs of a container, with sequence positions as keys.
    pub(crate) fn entries(&self) -> Vec<(String, &TreeValue)> {
        match self {
            TreeValue::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(idx, item)| (idx.to_string(), item))
                .collect(),
            TreeValue::Mapping(entries) => entries
                .iter()
                .map(|(key, value)| (key.clone(), value))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Parses a canonical non-negative integer key: `"0"` or digits without a
/// leading zero.
pub(crate) fn index_key(key: &str) -> Option<usize> {
    let canonical = key == "0"
        || (!key.is_empty() && !key.starts_with('0') && key.bytes().all(|b| b.is_ascii_digit()));
    if canonical {
        key.parse().ok()
    } else {
        None
    }
}

/// Returns true if the key would be an integer key in an ordered hash map:
/// `"0"`, or an optional minus sign followed by digits without a leading zero.
pub(crate) fn is_integer_key(key: &str) -> bool {
    let digits = key.strip_prefix('-').unwrap_or(key);
    if key == "0" {
        return true;
    }
    !digits.is_empty()
        && !digits.starts_with('0')
        && digits.bytes().all(|b| b.is_ascii_digit())
        && key.parse::<i64>().is_ok()
}

impl Serialize for TreeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TreeValue::Null => serializer.serialize_unit(),
            TreeValue::Boolean(b) => serializer.serialize_bool(*b),
            TreeValue::Number(TreeNumber::Integer(i)) => serializer.serialize_i64(*i),
            TreeValue::Number(TreeNumber::Float(f)) => serializer.serialize_f64(*f),
            TreeValue::String(s) => serializer.serialize_str(s),
            TreeValue::Sequence(items) => serializer.collect_seq(items),
            TreeValue::Mapping(entries) => serializer.collect_map(entries),
        }
    }
}

impl From<&str> for TreeValue {
    fn from(s: &str) -> Self {
        TreeValue::String(s.to_string())
    }
}

impl From<String> for TreeValue {
    fn from(s: String) -> Self {
        TreeValue::String(s)
    }
}

impl From<i64> for TreeValue {
    fn from(i: i64) -> Self {
        TreeValue::Number(TreeNumber::Integer(i))
    }
}

impl From<bool> for TreeValue {
    fn from(b: bool) -> Self {
        TreeValue::Boolean(b)
    }
}

impl From<serde_json::Value> for TreeValue {
    fn from(value: serde_json::Value) -> Self {
        super::parser::parse_value(&value)
    }
}
