//! Dotted-path lookup over nested data.
//!
//! This module answers the questions field-mapping code keeps asking of
//! decoded JSON, YAML or XML documents: "give me `address.street`, or else
//! `street`", "the items from 1 to 3", "what changed between these two
//! records", "every `item.value`, whether there was one item or many".
//!
//! # Path syntax
//!
//! - `a.b.c` - descend key by key; numeric segments index sequences (`items.0.name`)
//! - several paths - tried in order, first non-empty result wins
//!
//! # Slice syntax
//!
//! - `[start:end]` - inclusive range, blank bounds default to the ends
//! - `[i,j,k]` - explicit positions, in the order listed
//! - empty - everything
//!
//! # Examples
//!
//! ```text
//! // resolve(["title", "name"], &doc)  - title, falling back to name
//! // slice(&items, "[0:2]")            - first three items
//! // map_values("feed.item.link", &doc) - every item's link
//! ```

pub mod ast;
pub mod diff;
pub mod error;
pub mod parser;
pub mod resolver;
pub mod values;

pub use ast::{PathSpec, SliceSpec};
pub use diff::diff;
pub use error::PathMapError;
pub use resolver::{resolve, slice, slice_value, PathResolver};
pub use values::{map_values, MapOptions};
