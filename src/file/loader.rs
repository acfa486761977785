//! Document loading.
//!
//! This module reads JSON, YAML or XML documents from files or stdin and
//! decodes them into a `TreeValue` ready for path lookups. Gzipped input is
//! decompressed transparently.

use crate::document::node::TreeValue;
use crate::document::parser::{parse_json, parse_yaml};
use crate::document::xml::parse_xml;
use crate::text::{clean_xml, strip_invalid_chars};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Xml,
}

impl DocumentFormat {
    /// Determines the format from a file name, ignoring a trailing `.gz`.
    ///
    /// Examples:
    /// - `data.json` → Json
    /// - `feed.xml.gz` → Xml
    /// - `notes.txt` → None
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let path_str = path.as_ref().to_string_lossy().to_lowercase();
        let base = path_str.strip_suffix(".gz").unwrap_or(&path_str);

        if base.ends_with(".json") {
            Some(DocumentFormat::Json)
        } else if base.ends_with(".yaml") || base.ends_with(".yml") {
            Some(DocumentFormat::Yaml)
        } else if base.ends_with(".xml") {
            Some(DocumentFormat::Xml)
        } else {
            None
        }
    }
}

/// Options that affect how documents are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Strip invalid characters and fix Windows character references in XML
    /// before decoding.
    pub clean_xml: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { clean_xml: true }
    }
}

/// Loads and decodes a document from the filesystem with default options.
///
/// # Examples
///
/// ```no_run
/// use butils::file::loader::load_file;
///
/// let tree = load_file("products.xml").unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file cannot be read or decompressed
/// - The contents are not valid for the detected format
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<TreeValue> {
    load_file_with(path, &LoadOptions::default())
}

/// Loads and decodes a document from the filesystem.
///
/// The format is picked from the extension; unknown extensions are sniffed
/// from the content the same way stdin is.
pub fn load_file_with<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<TreeValue> {
    let path_ref = path.as_ref();
    let content = read_text(path_ref)?;

    let tree = match DocumentFormat::from_path(path_ref) {
        Some(format) => parse_content(&content, format, options)
            .with_context(|| format!("Failed to load {}", path_ref.display()))?,
        None => sniff_content(&content, options)
            .with_context(|| format!("Failed to load {}", path_ref.display()))?,
    };

    info!(path = %path_ref.display(), kind = tree.type_name(), "loaded document");
    Ok(tree)
}

/// Loads and decodes a document from standard input.
///
/// Gzip is detected by its magic bytes. The content is tried as JSON, then as
/// XML when it starts with `<`, then as YAML.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or no format accepts the input.
pub fn load_from_stdin(options: &LoadOptions) -> Result<TreeValue> {
    let content = read_stdin_text()?;
    sniff_content(&content, options).context("Failed to parse document from stdin")
}

/// Decodes `content` as the given format.
pub fn parse_content(content: &str, format: DocumentFormat, options: &LoadOptions) -> Result<TreeValue> {
    match format {
        DocumentFormat::Json => parse_json(content),
        DocumentFormat::Yaml => parse_yaml(content),
        DocumentFormat::Xml => {
            let xml = if options.clean_xml {
                clean_xml(&strip_invalid_chars(content))
            } else {
                content.to_string()
            };
            parse_xml(&xml).context("Failed to parse XML")
        }
    }
}

/// Guesses the format of `content`: JSON first, XML for markup, YAML last.
pub fn sniff_content(content: &str, options: &LoadOptions) -> Result<TreeValue> {
    if let Ok(tree) = parse_json(content) {
        debug!("content decoded as JSON");
        return Ok(tree);
    }

    if content.trim_start().starts_with('<') {
        debug!("content looks like XML");
        return parse_content(content, DocumentFormat::Xml, options);
    }

    debug!("falling back to YAML");
    parse_yaml(content).context("Input is neither valid JSON, XML nor YAML")
}

/// Reads a text file, decompressing it if the name ends in `.gz`.
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    if is_gzipped {
        read_gzipped_file(path_ref)
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file {}", path_ref.display()))
    }
}

/// Reads all of stdin as text, decompressing gzip input.
pub fn read_stdin_text() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    // Check for gzip magic bytes (0x1f 0x8b)
    if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in stdin")
    }
}

/// Reads and decompresses a gzipped file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file is not valid gzip format (corrupted)
/// - The decompressed content is not valid UTF-8
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

/// Decompresses gzip-encoded bytes to a UTF-8 string.
fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped stdin")?;
    Ok(content)
}
