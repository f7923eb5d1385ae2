//! Image locator parsing.
//!
//! A locator is whatever an `<img src>` could hold: an `http(s)` URL, an
//! embedded `data:` URI, or (for command-line use) a local file.

use base64::Engine;
use percent_encoding::percent_decode_str;
use std::path::PathBuf;

use crate::error::LoadError;

/// Where a locator's bytes come from.
#[derive(Debug, Clone, PartialEq)]
pub enum Locator<'a> {
    /// Embedded `data:` URI, decoded in place without a request
    Data(&'a str),
    /// Remote image, fetched without credentials
    Http(&'a str),
    /// Local file (`file://` URL or bare path)
    File(PathBuf),
}

impl<'a> Locator<'a> {
    pub fn parse(locator: &'a str) -> Self {
        let trimmed = locator.trim();
        if has_scheme(trimmed, "data:") {
            Locator::Data(trimmed)
        } else if has_scheme(trimmed, "http://") || has_scheme(trimmed, "https://") {
            Locator::Http(trimmed)
        } else if has_scheme(trimmed, "file://") {
            let path = percent_decode_str(&trimmed["file://".len()..]).decode_utf8_lossy();
            Locator::File(PathBuf::from(path.into_owned()))
        } else {
            Locator::File(PathBuf::from(trimmed))
        }
    }

    /// Short name used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Locator::Data(_) => "data",
            Locator::Http(_) => "http",
            Locator::File(_) => "file",
        }
    }
}

fn has_scheme(locator: &str, scheme: &str) -> bool {
    locator
        .get(..scheme.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
}

/// Raw image bytes plus the media type, when one is known.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

impl Payload {
    pub fn new(bytes: Vec<u8>, mime: Option<String>) -> Self {
        Self { bytes, mime }
    }

    /// Whether the payload is SVG, by media type or by sniffing the markup.
    pub fn is_svg(&self) -> bool {
        if let Some(mime) = &self.mime {
            if mime.eq_ignore_ascii_case("image/svg+xml") {
                return true;
            }
        }
        let head = &self.bytes[..self.bytes.len().min(256)];
        let head = String::from_utf8_lossy(head);
        let head = head.trim_start_matches('\u{feff}').trim_start();
        head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg"))
    }
}

/// Decode a `data:[<mime>][;base64],<payload>` URI.
pub fn decode_data_uri(uri: &str) -> Result<Payload, LoadError> {
    let rest = uri
        .get("data:".len()..)
        .filter(|_| has_scheme(uri, "data:"))
        .ok_or_else(|| LoadError::DataUri("missing data: scheme".to_string()))?;
    let (header, data) = rest
        .split_once(',')
        .ok_or_else(|| LoadError::DataUri("missing ',' separator".to_string()))?;

    let mut params = header.split(';');
    let mime = params
        .next()
        .map(str::trim)
        .filter(|mime| !mime.is_empty())
        .map(str::to_ascii_lowercase);
    let is_base64 = params.any(|param| param.trim().eq_ignore_ascii_case("base64"));

    let bytes = if is_base64 {
        let compact: String = percent_decode_str(data)
            .decode_utf8_lossy()
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        base64::engine::general_purpose::STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| LoadError::DataUri(format!("invalid base64 payload: {e}")))?
    } else {
        percent_decode_str(data).collect()
    };

    Ok(Payload::new(bytes, mime))
}
