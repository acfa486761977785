//! File I/O for source documents.
//!
//! This module loads JSON, YAML and XML documents from disk or stdin,
//! optionally gzipped, and decodes them into `TreeValue` trees.

pub mod loader;
