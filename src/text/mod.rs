//! Text cleanup for imported content.
//!
//! Source systems hand over strings with control characters, Windows-1252
//! leftovers, entity-encoded punctuation and ragged line breaks. These helpers
//! normalize that before the text is decoded or stored.

pub mod entities;

pub use entities::decode_entities;

use regex::Regex;
use std::sync::LazyLock;

static INVALID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{FFFF}\x00-\x08\x0B\x0C\x0E-\x1F]").unwrap());
static LINE_BREAK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:(?:\r\n|\r|\n)\s*){2}").unwrap());
static HTML_COMMENTS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static BR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:<br\s*(?:>|/>)\s*){2,}").unwrap());
static BR_TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*(?:>|/>)\s*").unwrap());
static BLANK_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[[:blank:]]+").unwrap());

/// Windows-specific character references and their proper replacements.
const XML_REFERENCE_FIXES: &[(&str, &str)] = &[
    ("&#132;", "&#8220;"),
    ("&#212;", "&#8216;"),
    ("&#213;", "&#8217;"),
    ("&#210;", "&#8220;"),
    ("&#211;", "&#8221;"),
    ("&#209;", "&#8211;"),
    ("&#208;", "&#8212;"),
    ("&#201;", "&#8230;"),
    ("&#145;", "&#8216;"),
    ("&#146;", "&#8217;"),
    ("&#147;", "&#8220;"),
    ("&#148;", "&#8221;"),
    ("&#151;", "&#8211;"),
    ("&#150;", "&#8212;"),
    ("&#133;", "&#8230;"),
    ("&#194;", ""),
];

const BYTE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Replaces U+FFFF and C0 control characters other than tab, LF and CR with
/// a space.
pub fn strip_invalid_chars(input: &str) -> String {
    INVALID_CHARS.replace_all(input, " ").into_owned()
}

/// Cleans up a UTF-8 string.
///
/// Strips invalid characters, drops `&#10;` references, collapses runs of
/// blank lines to one empty line, decodes HTML entities, maps stray C1
/// control characters to their Windows-1252 meaning and trims the result.
///
/// # Example
///
/// ```
/// use butils::text::clean_string;
///
/// assert_eq!(clean_string("  caf&eacute;\u{0}\n\n\n\nbar "), "café \n\nbar");
/// assert_eq!(clean_string("\u{96} dash"), "\u{2013} dash");
/// ```
pub fn clean_string(input: &str) -> String {
    let cleaned = strip_invalid_chars(input).replace("&#10;", "");
    let cleaned = LINE_BREAK_RUNS.replace_all(&cleaned, "\n\n");
    let decoded = decode_entities(&cleaned);
    let mapped: String = decoded
        .chars()
        .map(|ch| windows_1252_c1(ch).unwrap_or(ch))
        .collect();
    mapped.trim().to_string()
}

/// Replaces Windows-specific numeric character references in XML with their
/// Unicode equivalents; `&#194;` is dropped.
pub fn clean_xml(xml: &str) -> String {
    XML_REFERENCE_FIXES
        .iter()
        .fold(xml.to_string(), |acc, (search, replace)| acc.replace(search, replace))
}

/// Cleans up an HTML fragment.
///
/// Applies [`clean_string`], removes comments, collapses blank lines, reduces
/// three or more consecutive `<br>` tags to two, normalizes every `<br>` to
/// `<br />`, squeezes horizontal whitespace and trims.
///
/// # Example
///
/// ```
/// use butils::text::clean_html;
///
/// let html = "<p>Hi<!-- note -->  there</p><BR><br/><br>\t<br >end";
/// assert_eq!(clean_html(html), "<p>Hi there</p><br /><br />end");
/// ```
pub fn clean_html(html: &str) -> String {
    let html = clean_string(html);
    let html = HTML_COMMENTS.replace_all(&html, "");
    let html = LINE_BREAK_RUNS.replace_all(&html, "\n\n");
    let html = BR_RUNS.replace_all(&html, "<br /><br />");
    let html = BR_TAGS.replace_all(&html, "<br />");
    let html = BLANK_RUNS.replace_all(&html, " ");
    html.trim().to_string()
}

/// Formats a byte count with a binary unit.
///
/// Precision is capped at 15 decimals.
///
/// # Example
///
/// ```
/// use butils::text::format_bytes;
///
/// assert_eq!(format_bytes(0, 0), "0 B");
/// assert_eq!(format_bytes(1536, 0), "2 KB");
/// assert_eq!(format_bytes(1536, 2), "1.5 KB");
/// ```
pub fn format_bytes(bytes: u64, precision: u32) -> String {
    let mut pow = 0;
    while pow < BYTE_UNITS.len() - 1 && bytes >= 1024u64.pow(pow as u32 + 1) {
        pow += 1;
    }

    let value = bytes as f64 / 1024f64.powi(pow as i32);
    let factor = 10f64.powi(precision.min(15) as i32);
    let rounded = (value * factor).round() / factor;

    format!("{} {}", rounded, BYTE_UNITS[pow])
}

/// Windows-1252 meaning of the C1 control range, for text that was decoded
/// with the wrong charset somewhere upstream.
fn windows_1252_c1(ch: char) -> Option<char> {
    let mapped = match ch {
        '\u{80}' => '\u{20ac}',
        '\u{82}' => '\u{201a}',
        '\u{83}' => '\u{192}',
        '\u{84}' => '\u{201e}',
        '\u{85}' => '\u{2026}',
        '\u{86}' => '\u{2020}',
        '\u{87}' => '\u{2021}',
        '\u{88}' => '\u{2c6}',
        '\u{89}' => '\u{2030}',
        '\u{8a}' => '\u{160}',
        '\u{8b}' => '\u{2039}',
        '\u{8c}' => '\u{152}',
        '\u{8e}' => '\u{17d}',
        '\u{91}' => '\u{2018}',
        '\u{92}' => '\u{2019}',
        '\u{93}' => '\u{201c}',
        '\u{94}' => '\u{201d}',
        '\u{95}' => '\u{2022}',
        '\u{96}' => '\u{2013}',
        '\u{97}' => '\u{2014}',
        '\u{98}' => '\u{2dc}',
        '\u{99}' => '\u{2122}',
        '\u{9a}' => '\u{161}',
        '\u{9b}' => '\u{203a}',
        '\u{9c}' => '\u{153}',
        '\u{9e}' => '\u{17e}',
        '\u{9f}' => '\u{178}',
        _ => return None,
    };
    Some(mapped)
}
