//! HTML entity decoding.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static ENTITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z][a-zA-Z0-9]*);").unwrap());

/// Named entities commonly found in imported content.
const NAMED_ENTITIES: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{a0}'),
    ("copy", '\u{a9}'),
    ("reg", '\u{ae}'),
    ("trade", '\u{2122}'),
    ("deg", '\u{b0}'),
    ("euro", '\u{20ac}'),
    ("pound", '\u{a3}'),
    ("yen", '\u{a5}'),
    ("cent", '\u{a2}'),
    ("sect", '\u{a7}'),
    ("para", '\u{b6}'),
    ("middot", '\u{b7}'),
    ("bull", '\u{2022}'),
    ("hellip", '\u{2026}'),
    ("ndash", '\u{2013}'),
    ("mdash", '\u{2014}'),
    ("lsquo", '\u{2018}'),
    ("rsquo", '\u{2019}'),
    ("sbquo", '\u{201a}'),
    ("ldquo", '\u{201c}'),
    ("rdquo", '\u{201d}'),
    ("bdquo", '\u{201e}'),
    ("laquo", '\u{ab}'),
    ("raquo", '\u{bb}'),
    ("times", '\u{d7}'),
    ("divide", '\u{f7}'),
    ("frac12", '\u{bd}'),
    ("iexcl", '\u{a1}'),
    ("iquest", '\u{bf}'),
    ("szlig", '\u{df}'),
    ("auml", '\u{e4}'),
    ("ouml", '\u{f6}'),
    ("uuml", '\u{fc}'),
    ("Auml", '\u{c4}'),
    ("Ouml", '\u{d6}'),
    ("Uuml", '\u{dc}'),
    ("eacute", '\u{e9}'),
    ("egrave", '\u{e8}'),
    ("agrave", '\u{e0}'),
    ("ccedil", '\u{e7}'),
];

/// Decodes numeric (`&#8212;`, `&#x2014;`) and common named entities.
///
/// Entities that are unknown or that name an invalid code point are left as
/// written.
///
/// # Example
///
/// ```
/// use butils::text::decode_entities;
///
/// assert_eq!(decode_entities("Tom &amp; Jerry&#33;"), "Tom & Jerry!");
/// assert_eq!(decode_entities("&bogus;"), "&bogus;");
/// ```
pub fn decode_entities(input: &str) -> String {
    ENTITY_REGEX
        .replace_all(input, |caps: &Captures<'_>| {
            let body = &caps[1];
            match decode_one(body) {
                Some(ch) => ch.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn decode_one(body: &str) -> Option<char> {
    if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }
    if let Some(dec) = body.strip_prefix('#') {
        return dec.parse::<u32>().ok().and_then(char::from_u32);
    }
    NAMED_ENTITIES
        .iter()
        .find(|(name, _)| *name == body)
        .map(|(_, ch)| *ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_entities() {
        assert_eq!(decode_entities("&#8212;&#x2014;&#X41;"), "\u{2014}\u{2014}A");
    }

    #[test]
    fn test_invalid_code_point_is_kept() {
        assert_eq!(decode_entities("&#55296;"), "&#55296;");
        assert_eq!(decode_entities("&#99999999999;"), "&#99999999999;");
    }

    #[test]
    fn test_named_entities_are_case_sensitive() {
        assert_eq!(decode_entities("&Auml;&auml;"), "\u{c4}\u{e4}");
        assert_eq!(decode_entities("&AMP;"), "&AMP;");
    }

    #[test]
    fn test_single_quote_entity() {
        assert_eq!(decode_entities("it&#039;s"), "it's");
    }
}
