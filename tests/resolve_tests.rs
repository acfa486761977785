//! Integration tests for dotted-path resolution.

use butils::document::node::TreeValue;
use butils::pathmap::{resolve, PathResolver, PathSpec};
use serde_json::json;

fn tree(value: serde_json::Value) -> TreeValue {
    TreeValue::from(value)
}

#[test]
fn test_resolve_single_path() {
    let data = tree(json!({"a": {"b": "x"}}));
    assert_eq!(resolve(["a.b"], &data), Some(&TreeValue::from("x")));
}

#[test]
fn test_resolve_fallback_order() {
    let data = tree(json!({"a": {"b": "x"}}));
    assert_eq!(resolve(["a.c", "a.b"], &data), Some(&TreeValue::from("x")));
}

#[test]
fn test_first_non_empty_alternative_wins() {
    let data = tree(json!({"title": "T", "name": "N"}));
    assert_eq!(resolve(["name", "title"], &data), Some(&TreeValue::from("N")));
    assert_eq!(resolve(["title", "name"], &data), Some(&TreeValue::from("T")));
}

#[test]
fn test_empty_string_counts_as_not_found() {
    let data = tree(json!({"a": {"b": ""}}));
    assert_eq!(resolve(["a.b"], &data), None);
}

#[test]
fn test_missing_key_is_not_found() {
    let data = tree(json!({"a": 1}));
    assert_eq!(resolve(["missing"], &data), None);
}

#[test]
fn test_falsy_values_fall_through() {
    let data = tree(json!({
        "zero": 0,
        "zero_string": "0",
        "float_zero": 0.0,
        "no": false,
        "nothing": null,
        "list": [],
        "map": {},
        "fallback": "ok"
    }));

    for key in ["zero", "zero_string", "float_zero", "no", "nothing", "list", "map"] {
        assert_eq!(resolve([key, "fallback"], &data), Some(&TreeValue::from("ok")), "key {key}");
    }
}

#[test]
fn test_empty_intermediate_step_aborts_path() {
    let data = tree(json!({"a": {}, "b": {"c": "y"}}));
    assert_eq!(resolve(["a.c", "b.c"], &data), Some(&TreeValue::from("y")));
}

#[test]
fn test_descend_into_sequence_by_index() {
    let data = tree(json!({"items": [{"name": "first"}, {"name": "second"}]}));
    assert_eq!(resolve("items.0.name", &data), Some(&TreeValue::from("first")));
    assert_eq!(resolve("items.1", &data), Some(&tree(json!({"name": "second"}))));
}

#[test]
fn test_scalar_cannot_be_descended() {
    let data = tree(json!({"a": "text"}));
    assert_eq!(resolve("a.b", &data), None);
}

#[test]
fn test_resolves_containers() {
    let data = tree(json!({"a": {"b": [1, 2]}}));
    assert_eq!(resolve("a.b", &data), Some(&tree(json!([1, 2]))));
}

#[test]
fn test_empty_inputs() {
    let data = tree(json!({"a": 1}));
    assert_eq!(resolve(PathSpec::new(Vec::<String>::new()), &data), None);
    assert_eq!(resolve("a", &tree(json!({}))), None);
    assert_eq!(resolve("a", &TreeValue::Null), None);
    assert_eq!(resolve("", &data), None);
}

#[test]
fn test_resolver_reuses_root() {
    let data = tree(json!({"user": {"name": "Alice", "email": "a@example.com"}}));
    let resolver = PathResolver::new(&data);

    assert_eq!(resolver.resolve("user.name"), Some(&TreeValue::from("Alice")));
    assert_eq!(resolver.resolve("user.email"), Some(&TreeValue::from("a@example.com")));
    assert_eq!(resolver.resolve("user.phone"), None);
}

#[test]
fn test_resolve_does_not_mutate_input() {
    let data = tree(json!({"a": {"b": "x", "c": ""}, "list": [1, 2, 3]}));
    let before = data.clone();

    let _ = resolve(["a.c", "a.b"], &data);
    let _ = resolve("list.5", &data);
    let _ = resolve("missing.path", &data);

    assert_eq!(data, before);
}
