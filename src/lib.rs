//! butils - dotted-path lookup, slicing and diffing over nested data.
//!
//! Documents (JSON, YAML, XML) are decoded into [`document::TreeValue`]
//! trees, and [`pathmap`] answers field-mapping questions against them.
//!
//! ```
//! use butils::document::TreeValue;
//! use butils::pathmap::resolve;
//! use serde_json::json;
//!
//! let record = TreeValue::from(json!({"address": {"street": "Main St"}}));
//! assert_eq!(
//!     resolve(["address.line1", "address.street"], &record),
//!     Some(&TreeValue::from("Main St"))
//! );
//! ```

pub mod config;
pub mod document;
pub mod file;
pub mod pathmap;
pub mod text;
