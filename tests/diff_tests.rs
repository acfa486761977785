//! Integration tests for structural diff.

use butils::document::node::TreeValue;
use butils::pathmap::diff;
use serde_json::json;

fn tree(value: serde_json::Value) -> TreeValue {
    TreeValue::from(value)
}

#[test]
fn test_changed_key_only() {
    let result = diff(&tree(json!({"a": 1, "b": 2})), &tree(json!({"a": 1, "b": 3})));
    assert_eq!(result, tree(json!({"b": 3})));
}

#[test]
fn test_removed_key_is_marked_null() {
    let result = diff(&tree(json!({"a": 1})), &tree(json!({})));
    assert_eq!(result, tree(json!({"a": null})));
}

#[test]
fn test_added_key_is_merged_in() {
    let result = diff(&tree(json!({})), &tree(json!({"c": 5})));
    assert_eq!(result, tree(json!({"c": 5})));
}

#[test]
fn test_identical_trees_have_empty_diff() {
    let doc = tree(json!({"a": {"b": [1, 2, 3]}, "c": "x"}));
    assert_eq!(diff(&doc, &doc), tree(json!({})));
}

#[test]
fn test_nested_changes_recurse() {
    let left = tree(json!({"user": {"name": "Alice", "age": 30}, "same": {"k": 1}}));
    let right = tree(json!({"user": {"name": "Alice", "age": 31}, "same": {"k": 1}}));
    assert_eq!(diff(&left, &right), tree(json!({"user": {"age": 31}})));
}

#[test]
fn test_null_on_right_counts_as_removed() {
    let result = diff(&tree(json!({"a": 1})), &tree(json!({"a": null})));
    assert_eq!(result, tree(json!({"a": null})));
}

#[test]
fn test_type_change_is_a_change() {
    let result = diff(&tree(json!({"a": 1, "b": "1"})), &tree(json!({"a": "1", "b": "1"})));
    assert_eq!(result, tree(json!({"a": "1"})));
}

#[test]
fn test_container_replaced_by_scalar() {
    let result = diff(&tree(json!({"a": {"x": 1}})), &tree(json!({"a": "flat"})));
    assert_eq!(result, tree(json!({"a": "flat"})));
}

#[test]
fn test_sequence_positions_are_renumbered() {
    let result = diff(&tree(json!([10, 20, 30])), &tree(json!([10, 25, 30, 40])));
    assert_eq!(result, tree(json!({"0": 25, "1": 40})));
}

#[test]
fn test_diff_does_not_mutate_inputs() {
    let left = tree(json!({"a": {"b": 1}, "list": [1, 2]}));
    let right = tree(json!({"a": {"b": 2}, "extra": true}));
    let (left_before, right_before) = (left.clone(), right.clone());

    let _ = diff(&left, &right);

    assert_eq!(left, left_before);
    assert_eq!(right, right_before);
}
