//! Dotted-path lookup with fallbacks, and slicing.

use super::ast::{PathSpec, SliceSpec};
use super::error::PathMapError;
use crate::document::node::TreeValue;
use tracing::{debug, trace};

/// Resolves dotted paths against a borrowed tree.
///
/// The resolver only ever reads from its root; every result borrows from it.
pub struct PathResolver<'a> {
    root: &'a TreeValue,
}

impl<'a> PathResolver<'a> {
    pub fn new(root: &'a TreeValue) -> Self {
        PathResolver { root }
    }

    /// Returns the first non-empty value found by the alternatives in `paths`.
    ///
    /// Each path is split on `.` and walked one segment at a time. A step
    /// succeeds only if the segment exists and its value is non-empty under
    /// loose truthiness; otherwise that alternative is abandoned and the next
    /// one is tried. `None` means no alternative matched.
    ///
    /// # Example
    ///
    /// ```
    /// use butils::pathmap::PathResolver;
    /// use butils::document::node::TreeValue;
    /// use serde_json::json;
    ///
    /// let data = TreeValue::from(json!({"a": {"b": "x", "c": ""}}));
    /// let resolver = PathResolver::new(&data);
    ///
    /// assert_eq!(resolver.resolve(["a.c", "a.b"]), Some(&TreeValue::from("x")));
    /// assert_eq!(resolver.resolve("a.c"), None);
    /// ```
    pub fn resolve(&self, paths: impl Into<PathSpec>) -> Option<&'a TreeValue> {
        let spec = paths.into();
        if self.root.is_empty() {
            return None;
        }

        for (attempt, path) in spec.paths().iter().enumerate() {
            if attempt > 0 {
                debug!(path = %path, attempt, "trying fallback path");
            }
            if let Some(found) = self.walk(path) {
                return Some(found);
            }
        }

        None
    }

    /// Follows one dotted path; `None` as soon as a step is missing or empty.
    fn walk(&self, path: &str) -> Option<&'a TreeValue> {
        let mut current = self.root;
        for segment in path.split('.') {
            match current.child(segment) {
                Some(next) if !next.is_empty() => current = next,
                _ => {
                    trace!(path, segment, "path step missing or empty");
                    return None;
                }
            }
        }
        Some(current).filter(|value| !value.is_empty())
    }
}

/// Resolves `paths` against `data`. See [`PathResolver::resolve`].
pub fn resolve<'a>(paths: impl Into<PathSpec>, data: &'a TreeValue) -> Option<&'a TreeValue> {
    PathResolver::new(data).resolve(paths)
}

impl SliceSpec {
    /// Selects from `items` according to this spec.
    ///
    /// Range bounds are inclusive. A negative bound `v` becomes
    /// `last_index - v`, and the result is empty when either bound ends up
    /// negative or the computed length `end - start + 1` is not positive.
    /// The range is clamped to the available items and the bound arithmetic
    /// saturates, so huge bounds never overflow. Index lists keep their
    /// order and duplicates and skip positions that are out of range.
    pub fn apply<'a, T>(&self, items: &'a [T]) -> Vec<&'a T> {
        match self {
            SliceSpec::All => items.iter().collect(),
            SliceSpec::Range { start, end } => {
                let last = items.len() as i64 - 1;
                let mut start = start.unwrap_or(0);
                let mut end = end.unwrap_or(last);
                if start < 0 {
                    start = last.saturating_sub(start);
                }
                if end < 0 {
                    end = last.saturating_sub(end);
                }
                let length = end.saturating_sub(start).saturating_add(1);
                trace!(start, end, length, "computed slice range");

                if start < 0 || end < 0 || length <= 0 {
                    return Vec::new();
                }
                items
                    .iter()
                    .skip(usize::try_from(start).unwrap_or(usize::MAX))
                    .take(usize::try_from(length).unwrap_or(usize::MAX))
                    .collect()
            }
            SliceSpec::Indices(indices) => indices
                .iter()
                .filter_map(|&idx| usize::try_from(idx).ok().and_then(|idx| items.get(idx)))
                .collect(),
        }
    }
}

/// Applies a slice expression to a sequence. See [`SliceSpec::parse`] and
/// [`SliceSpec::apply`].
///
/// # Example
///
/// ```
/// use butils::pathmap::slice;
///
/// let data = [10, 20, 30, 40, 50];
/// assert_eq!(slice(&data, "[1:3]"), vec![&20, &30, &40]);
/// assert_eq!(slice(&data, "[4,0]"), vec![&50, &10]);
/// ```
pub fn slice<'a, T>(items: &'a [T], spec: &str) -> Vec<&'a T> {
    SliceSpec::parse(spec).apply(items)
}

/// Slices a container value, re-indexing it first.
///
/// Mappings are sliced over their values in order, so original keys are
/// discarded.
///
/// # Errors
///
/// Returns [`PathMapError::NotASequence`] for scalars.
pub fn slice_value<'a>(value: &'a TreeValue, spec: &str) -> Result<Vec<&'a TreeValue>, PathMapError> {
    if !value.is_container() {
        return Err(PathMapError::NotASequence {
            found: value.type_name(),
        });
    }
    let elements = value.elements();
    Ok(slice(&elements, spec).into_iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_walk_through_sequence_index() {
        let data = TreeValue::from(json!({"items": [{"name": "first"}, {"name": "second"}]}));
        assert_eq!(resolve("items.1.name", &data), Some(&TreeValue::from("second")));
        assert_eq!(resolve("items.2.name", &data), None);
    }

    #[test]
    fn test_empty_root_never_resolves() {
        let data = TreeValue::from(json!({}));
        assert_eq!(resolve("a", &data), None);
    }

    #[test]
    fn test_empty_spec_never_resolves() {
        let data = TreeValue::from(json!({"a": 1}));
        assert_eq!(resolve(PathSpec::default(), &data), None);
    }

    #[test]
    fn test_range_negative_bounds_use_last_index() {
        let data = [10, 20, 30, 40, 50];
        // last index 4: end -1 becomes 5, clamped to the tail
        assert_eq!(SliceSpec::Range { start: Some(2), end: Some(-1) }.apply(&data), vec![&30, &40, &50]);
        // start -1 becomes 5, past the end
        assert!(SliceSpec::Range { start: Some(-1), end: None }.apply(&data).is_empty());
    }

    #[test]
    fn test_range_on_empty_items() {
        let data: [i32; 0] = [];
        assert!(slice(&data, "[:]").is_empty());
        assert!(slice(&data, "[0:0]").is_empty());
    }

    #[test]
    fn test_slice_value_rejects_scalars() {
        let value = TreeValue::from("abc");
        assert!(matches!(
            slice_value(&value, "[0:1]"),
            Err(PathMapError::NotASequence { found: "string" })
        ));
    }

    #[test]
    fn test_slice_value_reindexes_mapping() {
        let value = TreeValue::from(json!({"x": 1, "y": 2, "z": 3}));
        let picked = slice_value(&value, "[2,0]").unwrap();
        assert_eq!(picked, vec![&TreeValue::from(3i64), &TreeValue::from(1i64)]);
    }
}
