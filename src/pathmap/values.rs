//! Leaf value extraction that hides XML's single-vs-plural ambiguity.
//!
//! An element that occurs once decodes to a mapping, the same element
//! occurring twice decodes to a sequence of mappings. `map_values` collects
//! the leaf field from either shape so callers always get a list.

use super::resolver::resolve;
use crate::document::node::TreeValue;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Options for [`map_values`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapOptions {
    /// Wrap a single non-collection result in a one-element sequence.
    pub force_array: bool,
    /// Trim surrounding whitespace from string results.
    pub trim: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            force_array: true,
            trim: false,
        }
    }
}

/// Collects the values of the last path segment below the rest of the path.
///
/// The path up to the last segment is resolved with [`resolve`]. A path with a
/// single segment has an empty parent path, which never resolves, so it
/// always yields the no-match result. Then:
/// - if the resolved value holds the leaf itself, that single value is
///   returned, wrapped in a sequence when `force_array` is set and it is not
///   already a collection (collections are returned as plain sequences)
/// - otherwise the leaf is collected from every element that has it, in order
///
/// When nothing matches the result is an empty sequence, or an empty string
/// when `force_array` is off. Null leaves count as missing.
///
/// # Example
///
/// ```
/// use butils::pathmap::{map_values, MapOptions};
/// use butils::document::node::TreeValue;
/// use serde_json::json;
///
/// let one = TreeValue::from(json!({"items": {"item": {"value": "x"}}}));
/// let many = TreeValue::from(json!({"items": {"item": [{"value": "x"}, {"value": "y"}]}}));
///
/// let options = MapOptions::default();
/// assert_eq!(map_values("items.item.value", &one, &options), TreeValue::from(json!(["x"])));
/// assert_eq!(map_values("items.item.value", &many, &options), TreeValue::from(json!(["x", "y"])));
/// ```
pub fn map_values(path: &str, data: &TreeValue, options: &MapOptions) -> TreeValue {
    let (parent_path, leaf) = path.rsplit_once('.').unwrap_or(("", path));

    let Some(parent) = resolve(parent_path, data) else {
        debug!(path, "parent path did not resolve");
        return no_match(options);
    };

    if let Some(single) = present(parent, leaf) {
        let value = prepare(single, options.trim);
        if value.is_collection() {
            return TreeValue::Sequence(value.elements().into_iter().cloned().collect());
        }
        return if options.force_array {
            TreeValue::Sequence(vec![value])
        } else {
            value
        };
    }

    let results: Vec<TreeValue> = parent
        .elements()
        .into_iter()
        .filter_map(|entry| present(entry, leaf))
        .map(|value| prepare(value, options.trim))
        .collect();

    if results.is_empty() {
        return no_match(options);
    }
    TreeValue::Sequence(results)
}

fn present<'a>(value: &'a TreeValue, key: &str) -> Option<&'a TreeValue> {
    value.child(key).filter(|v| !v.is_null())
}

fn no_match(options: &MapOptions) -> TreeValue {
    if options.force_array {
        TreeValue::Sequence(Vec::new())
    } else {
        TreeValue::String(String::new())
    }
}

/// Clones `value`, trimming it (or its direct string elements) if asked to.
fn prepare(value: &TreeValue, trim: bool) -> TreeValue {
    if !trim {
        return value.clone();
    }
    match value {
        TreeValue::String(s) => TreeValue::String(s.trim().to_string()),
        TreeValue::Sequence(items) => {
            TreeValue::Sequence(items.iter().map(prepare_scalar).collect())
        }
        TreeValue::Mapping(entries) => TreeValue::Mapping(
            entries
                .iter()
                .map(|(key, item)| (key.clone(), prepare_scalar(item)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn prepare_scalar(value: &TreeValue) -> TreeValue {
    match value {
        TreeValue::String(s) => TreeValue::String(s.trim().to_string()),
        other => other.clone(),
    }
}
