//! Method extraction
//!
//! [`MethodExtractor`] applies one [`LanguageProfile`] to source files: it
//! finds every signature, attaches the comment block directly above it and
//! asks the profile's strategy for the body. Each file yields exactly one
//! [`ExtractionOutcome`]; nothing that goes wrong inside a file escapes it.

pub mod batch;

pub use batch::{successful_records, summarize, BatchExtractor};

use crate::core::error::{Result, ScrapeError};
use crate::core::models::{ExtractionOutcome, MethodRecord, SourceUnit};
use crate::core::source::{normalize_text, ContentSource};
use crate::profiles::{global_registry, LanguageProfile};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, warn};

/// Extracts methods from files of a single language
#[derive(Debug, Clone)]
pub struct MethodExtractor {
    profile: Arc<dyn LanguageProfile>,
}

impl MethodExtractor {
    pub fn new(profile: Arc<dyn LanguageProfile>) -> Self {
        Self { profile }
    }

    /// Extractor for a built-in language name or alias
    pub fn for_language(language: &str) -> Result<Self> {
        Ok(Self::new(global_registry().for_language(language)?))
    }

    pub fn profile(&self) -> &Arc<dyn LanguageProfile> {
        &self.profile
    }

    pub fn can_handle(&self, extension: &str) -> bool {
        self.profile.can_handle(extension)
    }

    /// Fetch the unit's text through `source` and extract its methods
    pub fn extract(&self, unit: &Arc<SourceUnit>, source: &dyn ContentSource) -> ExtractionOutcome {
        if let Some(rejected) = self.reject_unhandled(unit) {
            return rejected;
        }

        let fetched = panic::catch_unwind(AssertUnwindSafe(|| source.fetch(unit)));
        let text = match fetched {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => return self.fault(unit, e.to_string()),
            Err(payload) => return self.fault(unit, panic_message(payload.as_ref())),
        };

        self.extract_from(unit, &text)
    }

    /// Extract methods from text already in hand
    pub fn extract_text(&self, unit: &Arc<SourceUnit>, text: &str) -> ExtractionOutcome {
        if let Some(rejected) = self.reject_unhandled(unit) {
            return rejected;
        }
        self.extract_from(unit, text)
    }

    fn reject_unhandled(&self, unit: &Arc<SourceUnit>) -> Option<ExtractionOutcome> {
        let extension = unit.extension();
        if self.can_handle(extension) {
            return None;
        }

        let err = ScrapeError::UnsupportedExtension {
            extension: extension.to_string(),
        };
        debug!(path = %unit.path, profile = self.profile.name(), "{}", err);
        Some(ExtractionOutcome::failed(unit.clone(), err.to_string()))
    }

    fn extract_from(&self, unit: &Arc<SourceUnit>, text: &str) -> ExtractionOutcome {
        let text = normalize_text(text);
        let text = text.as_ref();
        if text.trim().is_empty() {
            debug!(path = %unit.path, "empty file");
            return ExtractionOutcome::succeeded(unit.clone(), Vec::new());
        }

        match panic::catch_unwind(AssertUnwindSafe(|| self.scan(unit, text))) {
            Ok(records) => {
                debug!(path = %unit.path, methods = records.len(), "extracted");
                ExtractionOutcome::succeeded(unit.clone(), records)
            }
            Err(payload) => self.fault(unit, panic_message(payload.as_ref())),
        }
    }

    fn fault(&self, unit: &Arc<SourceUnit>, message: String) -> ExtractionOutcome {
        let err = ScrapeError::fault(message);
        warn!(path = %unit.path, "{}", err);
        ExtractionOutcome::failed(unit.clone(), err.to_string())
    }

    fn scan(&self, unit: &Arc<SourceUnit>, text: &str) -> Vec<MethodRecord> {
        let lines: Vec<&str> = text.lines().collect();
        let strategy = self.profile.strategy();

        self.profile
            .signatures(text)
            .into_iter()
            .map(|sig| {
                let comments = self.preceding_comments(&lines, sig.line);
                let body = strategy.extract_body(sig.end, &lines, sig.line);
                if body.is_empty() {
                    debug!(
                        path = %unit.path,
                        line = sig.line + 1,
                        strategy = strategy.name(),
                        "no body terminator"
                    );
                }

                MethodRecord {
                    signature: sig.text.trim().to_string(),
                    body,
                    comments,
                    name: sig.name,
                    line: sig.line + 1,
                    source: unit.clone(),
                }
            })
            .collect()
    }

    /// Comment lines directly above `line_index`, in file order.
    ///
    /// Blank lines between comments and the signature are skipped; the first
    /// code line ends the block.
    fn preceding_comments(&self, lines: &[&str], line_index: usize) -> String {
        let mut block: Vec<&str> = Vec::new();

        for &line in lines[..line_index.min(lines.len())].iter().rev() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if !self.profile.is_comment(trimmed) {
                break;
            }
            block.push(line);
        }

        block.reverse();
        block.join("\n")
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
