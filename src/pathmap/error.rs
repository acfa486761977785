//! Error types for path mapping.

use thiserror::Error;

/// Errors raised when a caller hands the path mapper the wrong kind of value.
///
/// Lookups themselves never fail; a path that does not resolve is `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathMapError {
    /// A slice was requested on a scalar.
    #[error("cannot slice a {found}, expected a sequence or mapping")]
    NotASequence { found: &'static str },
}
