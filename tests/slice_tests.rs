//! Integration tests for slice expressions.

use butils::document::node::TreeValue;
use butils::pathmap::{slice, slice_value, PathMapError, SliceSpec};
use serde_json::json;

#[test]
fn test_inclusive_range_worked_example() {
    let data = [10, 20, 30, 40, 50];
    assert_eq!(slice(&data, "[1:3]"), vec![&20, &30, &40]);
}

#[test]
fn test_range_length_is_end_minus_start_plus_one() {
    let data = [10, 20, 30, 40, 50];
    for start in 0..5i64 {
        for end in start..5i64 {
            let spec = format!("[{}:{}]", start, end);
            assert_eq!(slice(&data, &spec).len() as i64, end - start + 1, "spec {spec}");
        }
    }
}

#[test]
fn test_open_ended_ranges() {
    let data = [10, 20, 30, 40, 50];
    assert_eq!(slice(&data, "[2:]"), vec![&30, &40, &50]);
    assert_eq!(slice(&data, "[:1]"), vec![&10, &20]);
    assert_eq!(slice(&data, "[:]").len(), 5);
}

#[test]
fn test_range_past_the_end_is_clamped() {
    let data = [10, 20, 30];
    assert_eq!(slice(&data, "[1:10]"), vec![&20, &30]);
    assert!(slice(&data, "[5:7]").is_empty());
}

#[test]
fn test_reversed_range_is_empty() {
    let data = [10, 20, 30, 40, 50];
    assert!(slice(&data, "[3:1]").is_empty());
}

#[test]
fn test_negative_bounds_count_from_last_index() {
    let data = [10, 20, 30, 40, 50];
    // last index 4: -1 becomes 4 - (-1) = 5, clamped to the tail
    assert_eq!(slice(&data, "[2:-1]"), vec![&30, &40, &50]);
    // -2 as a start becomes 6, past the end
    assert!(slice(&data, "[-2:]").is_empty());
    assert!(slice(&data, "[-2:4]").is_empty());
}

#[test]
fn test_huge_bounds_do_not_overflow() {
    let data = [10, 20, 30];
    assert_eq!(slice(&data, "[0:9223372036854775807]"), vec![&10, &20, &30]);
    assert!(slice(&data, "[-99999999999999999999:]").is_empty());
    assert_eq!(slice(&data, "[1:-99999999999999999999]"), vec![&20, &30]);
    assert!(slice(&data, "[9223372036854775807:0]").is_empty());
}

#[test]
fn test_index_list_order_is_kept() {
    let data = [10, 20, 30];
    assert_eq!(slice(&data, "[0,2]"), vec![&10, &30]);
    assert_eq!(slice(&data, "[2,0]"), vec![&30, &10]);
}

#[test]
fn test_index_list_skips_out_of_range() {
    let data = [10, 20, 30];
    assert_eq!(slice(&data, "[1,7,-1,0]"), vec![&20, &10]);
}

#[test]
fn test_single_index() {
    let data = [10, 20, 30];
    assert_eq!(slice(&data, "[2]"), vec![&30]);
}

#[test]
fn test_blank_spec_is_identity() {
    let data = [10, 20, 30];
    assert_eq!(slice(&data, ""), vec![&10, &20, &30]);
    assert_eq!(slice(&data, "  "), vec![&10, &20, &30]);
    assert_eq!(slice(&data, "[]"), vec![&10, &20, &30]);
}

#[test]
fn test_parse_shapes() {
    assert_eq!(SliceSpec::parse(""), SliceSpec::All);
    assert_eq!(
        SliceSpec::parse("[1:3]"),
        SliceSpec::Range {
            start: Some(1),
            end: Some(3)
        }
    );
    assert_eq!(SliceSpec::parse("[2,0]"), SliceSpec::Indices(vec![2, 0]));
}

#[test]
fn test_slice_tree_sequence() {
    let data = TreeValue::from(json!(["a", "b", "c", "d"]));
    let picked = slice_value(&data, "[1:2]").unwrap();
    assert_eq!(picked, vec![&TreeValue::from("b"), &TreeValue::from("c")]);
}

#[test]
fn test_slice_tree_mapping_uses_values_in_order() {
    let data = TreeValue::from(json!({"x": 1, "y": 2, "z": 3}));
    let picked = slice_value(&data, "[2,0]").unwrap();
    assert_eq!(picked, vec![&TreeValue::from(3i64), &TreeValue::from(1i64)]);
}

#[test]
fn test_slice_tree_scalar_is_an_error() {
    let data = TreeValue::from(42i64);
    let err = slice_value(&data, "[0]").unwrap_err();
    assert_eq!(err, PathMapError::NotASequence { found: "number" });
}

#[test]
fn test_slice_does_not_mutate_input() {
    let items = vec![10, 20, 30, 40, 50];
    let before = items.clone();
    let _ = slice(&items, "[1:3]");
    let _ = slice(&items, "[4,0]");
    assert_eq!(items, before);

    let tree = TreeValue::from(json!([{"a": 1}, {"b": 2}]));
    let snapshot = tree.clone();
    let _ = slice_value(&tree, "[0:1]");
    assert_eq!(tree, snapshot);
}
