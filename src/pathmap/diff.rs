//! Structural diff between two trees.

use crate::document::node::{is_integer_key, TreeValue};
use indexmap::IndexMap;

/// Computes what changed going from `left` to `right`.
///
/// The result is always a mapping holding:
/// - keys only in `right`, with their value (additions)
/// - keys only in `left`, with `null` (removals)
/// - keys whose values differ, with the value from `right`; when both sides
///   are containers the nested diff is stored instead, and omitted if empty
///
/// Unchanged keys are left out. A `null` on the right counts as absent.
/// Sequences are compared position by position as if their indices were keys.
///
/// Integer-looking keys (`"0"`, `"7"`, `"-2"`) are renumbered from zero in
/// result order, so `diff([10, 20], [10, 30])` is `{"0": 30}`, not `{"1": 30}`.
/// Scalars on either side behave like empty containers.
///
/// # Example
///
/// ```
/// use butils::pathmap::diff;
/// use butils::document::node::TreeValue;
/// use serde_json::json;
///
/// let left = TreeValue::from(json!({"a": 1, "b": 2, "gone": true}));
/// let right = TreeValue::from(json!({"a": 1, "b": 3, "new": "x"}));
///
/// assert_eq!(
///     diff(&left, &right),
///     TreeValue::from(json!({"b": 3, "gone": null, "new": "x"}))
/// );
/// ```
pub fn diff(left: &TreeValue, right: &TreeValue) -> TreeValue {
    TreeValue::Mapping(diff_entries(left, right))
}

fn diff_entries(left: &TreeValue, right: &TreeValue) -> IndexMap<String, TreeValue> {
    let mut remaining: IndexMap<String, &TreeValue> = right.entries().into_iter().collect();
    let mut changes: Vec<(String, TreeValue)> = Vec::new();

    for (key, value) in left.entries() {
        let other = remaining.get(&key).copied().filter(|v| !v.is_null());
        match other {
            Some(other) if value.is_container() && other.is_container() => {
                let nested = diff_entries(value, other);
                if !nested.is_empty() {
                    changes.push((key.clone(), TreeValue::Mapping(nested)));
                }
            }
            Some(other) => {
                if value != other {
                    changes.push((key.clone(), other.clone()));
                }
            }
            None => changes.push((key.clone(), TreeValue::Null)),
        }
        if other.is_some() {
            remaining.shift_remove(&key);
        }
    }

    let additions = remaining
        .into_iter()
        .map(|(key, value)| (key, value.clone()));
    merge(changes.into_iter().chain(additions))
}

/// Ordered-map merge: string keys are inserted or overwritten in place,
/// integer keys are appended under fresh sequential numbers.
fn merge(entries: impl Iterator<Item = (String, TreeValue)>) -> IndexMap<String, TreeValue> {
    let mut merged = IndexMap::new();
    let mut next_index: usize = 0;
    for (key, value) in entries {
        if is_integer_key(&key) {
            merged.insert(next_index.to_string(), value);
            next_index += 1;
        } else {
            merged.insert(key, value);
        }
    }
    merged
}
