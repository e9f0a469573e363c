//! Core data models for reposcraper
//!
//! This module contains the values that flow through extraction: the source
//! units handed in by repository access, the records produced per method and
//! the per-file outcome that bundles them.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::path::Path;
use std::sync::Arc;

/// Identity of the repository a source unit belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RepositoryInfo {
    /// Repository name (e.g. `reposcraper`)
    pub name: String,
    /// Owning user or organisation
    pub owner: String,
    /// API endpoint of the repository, if it was fetched remotely
    #[serde(default)]
    pub api_url: String,
    /// Human facing URL of the repository
    #[serde(default)]
    pub web_url: String,
}

impl RepositoryInfo {
    /// Create a repository identity without URLs
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            api_url: String::new(),
            web_url: String::new(),
        }
    }

    /// Builder pattern: set API and web URLs
    pub fn with_urls(mut self, api_url: impl Into<String>, web_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self.web_url = web_url.into();
        self
    }

    /// Identity for a local checkout, named after its directory
    pub fn local(root: &Path, owner: impl Into<String>) -> Self {
        let name = root
            .canonicalize()
            .ok()
            .as_deref()
            .and_then(|p| p.file_name())
            .or_else(|| root.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "local".to_string());
        Self::new(name, owner)
    }
}

/// Where the text of a source unit comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentLocation {
    /// Text already held in memory
    Inline(String),
    /// Location resolved by a `ContentSource` (URL or filesystem path)
    Download(String),
}

/// A single file of a repository, as supplied by repository access
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// Owning repository
    pub repository: Arc<RepositoryInfo>,
    /// Display name (file name with extension)
    pub name: String,
    /// Path relative to the repository root
    pub path: String,
    /// How to obtain the text
    pub content: ContentLocation,
}

impl SourceUnit {
    /// Create a unit whose text is fetched from `location`
    pub fn new(
        repository: Arc<RepositoryInfo>,
        path: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        let path = normalize_path_separators(&path.into());
        Self {
            repository,
            name: display_name(&path),
            path,
            content: ContentLocation::Download(location.into()),
        }
    }

    /// Create a unit that already carries its text
    pub fn inline(
        repository: Arc<RepositoryInfo>,
        path: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        let path = normalize_path_separators(&path.into());
        Self {
            repository,
            name: display_name(&path),
            path,
            content: ContentLocation::Inline(text.into()),
        }
    }

    /// File extension including the leading dot (`".cs"`).
    ///
    /// Empty when the name has no dot or ends with one.
    pub fn extension(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) if idx + 1 < self.name.len() => &self.name[idx..],
            _ => "",
        }
    }

    /// The download location, when the text is not inline
    pub fn download_location(&self) -> Option<&str> {
        match &self.content {
            ContentLocation::Download(location) => Some(location),
            ContentLocation::Inline(_) => None,
        }
    }
}

fn display_name(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}

/// Normalize path separators for cross-platform compatibility.
/// - Converts Windows backslashes to forward slashes
/// - Strips Windows UNC prefix `\\?\` if present
pub fn normalize_path_separators(path: &str) -> String {
    let mut normalized = path;

    if normalized.starts_with(r"\\?\") || normalized.starts_with(r"\\.\") {
        normalized = &normalized[4..];
    }

    normalized.replace('\\', "/")
}

/// One extracted function or method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRecord {
    /// Header text of the method, trimmed
    pub signature: String,
    /// Body text as recovered by the delimitation strategy (may be empty)
    pub body: String,
    /// Comment block directly above the signature (may be empty)
    pub comments: String,
    /// Method name, when the profile captures one
    pub name: Option<String>,
    /// 1-based line of the signature
    pub line: usize,
    /// File the method was found in
    pub source: Arc<SourceUnit>,
}

impl MethodRecord {
    /// True when no body terminator was found for this signature
    pub fn is_degraded(&self) -> bool {
        self.body.is_empty()
    }
}

impl Serialize for MethodRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MethodRecord", 4)?;
        state.serialize_field("signature", &self.signature)?;
        state.serialize_field("body", &self.body)?;
        state.serialize_field("comments", &self.comments)?;
        state.serialize_field("sourceFile", &SourceFileRef::from(self.source.as_ref()))?;
        state.end()
    }
}

/// Serialized identity of a record's source file
#[derive(Debug, Serialize)]
struct SourceFileRef<'a> {
    name: &'a str,
    path: &'a str,
    repository: &'a str,
    owner: &'a str,
}

impl<'a> From<&'a SourceUnit> for SourceFileRef<'a> {
    fn from(unit: &'a SourceUnit) -> Self {
        Self {
            name: &unit.name,
            path: &unit.path,
            repository: &unit.repository.name,
            owner: &unit.repository.owner,
        }
    }
}

/// Any kind of extracted record; the `type` field tells them apart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExtractedRecord {
    Method(MethodRecord),
}

impl From<MethodRecord> for ExtractedRecord {
    fn from(record: MethodRecord) -> Self {
        ExtractedRecord::Method(record)
    }
}

/// Per-file result of extraction
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    source: Arc<SourceUnit>,
    success: bool,
    records: Vec<MethodRecord>,
    error: Option<String>,
}

impl ExtractionOutcome {
    /// A successful outcome carrying the records found (possibly none)
    pub fn succeeded(source: Arc<SourceUnit>, records: Vec<MethodRecord>) -> Self {
        Self {
            source,
            success: true,
            records,
            error: None,
        }
    }

    /// A failed outcome; never carries records
    pub fn failed(source: Arc<SourceUnit>, error: impl Into<String>) -> Self {
        Self {
            source,
            success: false,
            records: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn source(&self) -> &Arc<SourceUnit> {
        &self.source
    }

    pub fn is_successful(&self) -> bool {
        self.success
    }

    pub fn records(&self) -> &[MethodRecord] {
        &self.records
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Consume the outcome, yielding its records
    pub fn into_records(self) -> Vec<MethodRecord> {
        self.records
    }
}

/// Counters over a batch of outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total_files: usize,
    pub successful_files: usize,
    pub failed_files: usize,
    pub total_methods: usize,
    /// Methods whose body could not be delimited
    pub degraded_methods: usize,
}

impl BatchSummary {
    /// Tally a slice of outcomes
    pub fn from_outcomes(outcomes: &[ExtractionOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut acc, outcome| {
            acc.total_files += 1;
            if outcome.is_successful() {
                acc.successful_files += 1;
                acc.total_methods += outcome.records().len();
                acc.degraded_methods += outcome.records().iter().filter(|r| r.is_degraded()).count();
            } else {
                acc.failed_files += 1;
            }
            acc
        })
    }
}
