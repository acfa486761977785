//! JSON and YAML decoding into `TreeValue`.
//!
//! Both formats are parsed with serde and then converted into our own tree
//! representation so the resolver never has to care where the data came from.
//!
//! # Example
//!
//! ```
//! use butils::document::parser::parse_json;
//!
//! let json = r#"{"name": "Alice", "age": 30}"#;
//! let tree = parse_json(json).unwrap();
//!
//! assert_eq!(tree.child("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use super::node::{TreeNumber, TreeValue};
use anyhow::{Context, Result};
use serde_json::Value as SerdeValue;
use serde_yaml::Value as YamlSerdeValue;

/// Parses a JSON string into a `TreeValue`.
///
/// # Errors
///
/// Returns an error if the input is not valid JSON.
///
/// ```
/// use butils::document::parser::parse_json;
///
/// let invalid_json = r#"{"unclosed": "#;
/// assert!(parse_json(invalid_json).is_err());
/// ```
pub fn parse_json(json_str: &str) -> Result<TreeValue> {
    let serde_value: SerdeValue = serde_json::from_str(json_str).context("Failed to parse JSON")?;
    Ok(parse_value(&serde_value))
}

/// Parses a YAML string into a `TreeValue`.
///
/// Only the first document of a multi-document stream is used.
pub fn parse_yaml(yaml_str: &str) -> Result<TreeValue> {
    let serde_value: YamlSerdeValue =
        serde_yaml::from_str(yaml_str).context("Failed to parse YAML")?;
    Ok(parse_yaml_value(&serde_value))
}

/// Converts a `serde_json::Value` into a `TreeValue`.
///
/// Numbers that fit in an `i64` stay integers; everything else becomes a float.
pub fn parse_value(value: &SerdeValue) -> TreeValue {
    match value {
        SerdeValue::Object(map) => TreeValue::Mapping(
            map.iter()
                .map(|(k, v)| (k.clone(), parse_value(v)))
                .collect(),
        ),
        SerdeValue::Array(arr) => TreeValue::Sequence(arr.iter().map(parse_value).collect()),
        SerdeValue::String(s) => TreeValue::String(s.clone()),
        SerdeValue::Number(n) => TreeValue::Number(match n.as_i64() {
            Some(i) => TreeNumber::Integer(i),
            None => TreeNumber::Float(n.as_f64().unwrap_or(0.0)),
        }),
        SerdeValue::Bool(b) => TreeValue::Boolean(*b),
        SerdeValue::Null => TreeValue::Null,
    }
}

/// Converts a `serde_yaml::Value` into a `TreeValue`.
///
/// Non-string mapping keys are stringified and tags are dropped.
pub fn parse_yaml_value(value: &YamlSerdeValue) -> TreeValue {
    match value {
        YamlSerdeValue::Mapping(map) => TreeValue::Mapping(
            map.iter()
                .map(|(k, v)| (yaml_key(k), parse_yaml_value(v)))
                .collect(),
        ),
        YamlSerdeValue::Sequence(seq) => {
            TreeValue::Sequence(seq.iter().map(parse_yaml_value).collect())
        }
        YamlSerdeValue::String(s) => TreeValue::String(s.clone()),
        YamlSerdeValue::Number(n) => TreeValue::Number(match n.as_i64() {
            Some(i) => TreeNumber::Integer(i),
            None => TreeNumber::Float(n.as_f64().unwrap_or(0.0)),
        }),
        YamlSerdeValue::Bool(b) => TreeValue::Boolean(*b),
        YamlSerdeValue::Null => TreeValue::Null,
        YamlSerdeValue::Tagged(tagged) => parse_yaml_value(&tagged.value),
    }
}

fn yaml_key(key: &YamlSerdeValue) -> String {
    match key {
        YamlSerdeValue::String(s) => s.clone(),
        YamlSerdeValue::Number(n) => n.to_string(),
        YamlSerdeValue::Bool(b) => b.to_string(),
        YamlSerdeValue::Null => String::new(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_string() {
        let tree = parse_json(r#""hello""#).unwrap();
        assert_eq!(tree, TreeValue::String("hello".to_string()));
    }

    #[test]
    fn test_parse_numbers_keep_integer_kind() {
        let tree = parse_json("[42, 42.5, -3]").unwrap();
        assert_eq!(
            tree,
            TreeValue::Sequence(vec![
                TreeValue::Number(TreeNumber::Integer(42)),
                TreeValue::Number(TreeNumber::Float(42.5)),
                TreeValue::Number(TreeNumber::Integer(-3)),
            ])
        );
    }

    #[test]
    fn test_parse_object_preserves_key_order() {
        let tree = parse_json(r#"{"b": 1, "a": 2, "c": 3}"#).unwrap();
        match tree {
            TreeValue::Mapping(entries) => {
                let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
                assert_eq!(keys, vec!["b", "a", "c"]);
            }
            _ => panic!("Expected mapping"),
        }
    }

    #[test]
    fn test_parse_yaml_nested() {
        let yaml = "address:\n  street: Main St\n  number: 5\ntags:\n  - a\n  - b\n";
        let tree = parse_yaml(yaml).unwrap();

        let address = tree.child("address").unwrap();
        assert_eq!(address.child("street"), Some(&TreeValue::from("Main St")));
        assert_eq!(address.child("number"), Some(&TreeValue::from(5i64)));
        assert_eq!(tree.child("tags").map(|t| t.elements().len()), Some(2));
    }

    #[test]
    fn test_parse_yaml_non_string_keys() {
        let tree = parse_yaml("1: one\ntrue: yes\n").unwrap();
        assert_eq!(tree.child("1"), Some(&TreeValue::from("one")));
        assert_eq!(tree.child("true"), Some(&TreeValue::from("yes")));
    }

    #[test]
    fn test_parse_yaml_drops_tags() {
        let tree = parse_yaml("value: !custom 12\n").unwrap();
        assert_eq!(tree.child("value"), Some(&TreeValue::from(12i64)));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(parse_json("{").is_err());
    }
}
