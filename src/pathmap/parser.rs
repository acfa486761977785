//! Permissive slice expression parser.
//!
//! Slice specs come from hand-written import mappings, so the parser never
//! fails: unbalanced brackets are tolerated, blank bounds take their defaults
//! and junk tokens read as integers the forgiving way (`"3rd"` is 3, `"x"` is 0).

use super::ast::SliceSpec;

impl SliceSpec {
    /// Parses a slice expression such as `"[1:3]"`, `"[:-1]"` or `"[2,0]"`.
    ///
    /// A `:` anywhere selects the range form, even if commas are present.
    /// Without a colon the comma-separated index form is used; a single
    /// number like `"[2]"` is a one-element index list. A blank spec (or
    /// blank brackets) selects everything.
    ///
    /// # Example
    ///
    /// ```
    /// use butils::pathmap::SliceSpec;
    ///
    /// assert_eq!(SliceSpec::parse(""), SliceSpec::All);
    /// assert_eq!(
    ///     SliceSpec::parse("[1:]"),
    ///     SliceSpec::Range { start: Some(1), end: None }
    /// );
    /// assert_eq!(SliceSpec::parse("[2, 0]"), SliceSpec::Indices(vec![2, 0]));
    /// ```
    pub fn parse(spec: &str) -> SliceSpec {
        let inner = spec
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .trim();

        if inner.is_empty() {
            return SliceSpec::All;
        }

        if let Some((start, end)) = inner.split_once(':') {
            return SliceSpec::Range {
                start: loose_int(start),
                end: loose_int(end),
            };
        }

        SliceSpec::Indices(
            inner
                .split(',')
                .filter_map(loose_int)
                .collect(),
        )
    }
}

/// Reads an integer the forgiving way.
///
/// Returns `None` for a blank token. Otherwise leading whitespace, an optional
/// sign and the leading run of digits are used; a token without leading digits
/// reads as 0. Values beyond the `i64` range saturate.
pub fn loose_int(token: &str) -> Option<i64> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    let (negative, digits) = match token.as_bytes()[0] {
        b'-' => (true, &token[1..]),
        b'+' => (false, &token[1..]),
        _ => (false, token),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(b - b'0');
        value = value.saturating_mul(10).saturating_add(digit);
    }

    Some(if negative { -value } else { value })
}
