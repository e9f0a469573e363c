//! Content access for source units
//!
//! Extraction never performs I/O itself; it asks a [`ContentSource`] for the
//! text of each unit. Repository access implementations (remote APIs, local
//! checkouts, test doubles) live behind this trait.

use crate::core::error::{Result, ScrapeError};
use crate::core::models::{ContentLocation, SourceUnit};
use std::borrow::Cow;
use std::fs;

#[cfg(test)]
use mockall::automock;

/// Trait for obtaining the text of a source unit
///
/// Implementations must be shareable across batch workers.
#[cfg_attr(test, automock)]
pub trait ContentSource: Send + Sync {
    /// Fetch the full text of `unit`
    fn fetch(&self, unit: &SourceUnit) -> Result<String>;
}

/// Serves only units that carry their text inline
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineSource;

impl ContentSource for InlineSource {
    fn fetch(&self, unit: &SourceUnit) -> Result<String> {
        match &unit.content {
            ContentLocation::Inline(text) => Ok(text.clone()),
            ContentLocation::Download(location) => Err(ScrapeError::content_unavailable(
                &unit.path,
                format!("no inline text (location: {})", location),
            )),
        }
    }
}

/// Reads download locations as local filesystem paths
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSource;

impl ContentSource for LocalSource {
    fn fetch(&self, unit: &SourceUnit) -> Result<String> {
        match &unit.content {
            ContentLocation::Inline(text) => Ok(text.clone()),
            // A unit without a location has nothing to read
            ContentLocation::Download(location) if location.trim().is_empty() => Ok(String::new()),
            ContentLocation::Download(location) => {
                let bytes = fs::read(location)
                    .map_err(|e| ScrapeError::content_unavailable(&unit.path, e.to_string()))?;
                decode_content(&bytes).ok_or_else(|| {
                    ScrapeError::content_unavailable(&unit.path, "file is not valid UTF-8 text")
                })
            }
        }
    }
}

/// Decode file bytes into normalized text.
///
/// Invalid UTF-8 sequences are replaced as long as they stay under a tenth
/// of the content; past that the file is treated as binary.
pub fn decode_content(bytes: &[u8]) -> Option<String> {
    let text = match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => {
            let lossy = String::from_utf8_lossy(bytes);
            if lossy.chars().filter(|c| *c == '\u{FFFD}').count() >= lossy.len() / 10 {
                return None;
            }
            lossy
        }
    };
    Some(normalize_text(&text).into_owned())
}

/// Strip a leading byte-order mark and convert CRLF line endings to LF
pub fn normalize_text(text: &str) -> Cow<'_, str> {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    if text.contains("\r\n") {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}
