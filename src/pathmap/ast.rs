//! Path and slice specifications.

/// One dotted path or an ordered list of alternative dotted paths.
///
/// Alternatives are tried left to right; the first one that resolves to a
/// non-empty value wins.
///
/// # Example
///
/// ```
/// use butils::pathmap::PathSpec;
///
/// let single = PathSpec::from("address.street");
/// assert_eq!(single.paths(), ["address.street"]);
///
/// let fallback = PathSpec::from(["title", "name"]);
/// assert_eq!(fallback.paths().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathSpec {
    paths: Vec<String>,
}

impl PathSpec {
    /// Creates a spec from alternative paths, in priority order.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl From<&str> for PathSpec {
    fn from(path: &str) -> Self {
        Self::new([path])
    }
}

impl From<String> for PathSpec {
    fn from(path: String) -> Self {
        Self::new([path])
    }
}

impl From<&String> for PathSpec {
    fn from(path: &String) -> Self {
        Self::new([path.as_str()])
    }
}

impl<S: Into<String>> From<Vec<S>> for PathSpec {
    fn from(paths: Vec<S>) -> Self {
        Self::new(paths)
    }
}

impl<S: Into<String> + Clone> From<&[S]> for PathSpec {
    fn from(paths: &[S]) -> Self {
        Self::new(paths.iter().cloned())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for PathSpec {
    fn from(paths: [S; N]) -> Self {
        Self::new(paths)
    }
}

/// A parsed slice expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SliceSpec {
    /// Empty spec: every element, unchanged.
    All,
    /// `[start:end]`, both bounds inclusive. `None` means the bound was left
    /// blank and takes its default (0 for start, last index for end).
    Range {
        start: Option<i64>,
        end: Option<i64>,
    },
    /// `[i,j,k]`: explicit positions, in the order given.
    Indices(Vec<i64>),
}
