//! reposcraper - regex-driven method extraction from source repositories
//!
//! Given the text of a source file, the library finds every function or
//! method signature, attaches the comment block directly above it and
//! recovers the full body with a language-appropriate rule: brace balancing
//! for C-like languages, indentation tracking for off-side rule languages.
//!
//! # Architecture
//!
//! This crate follows the "Library-First" pattern:
//! - **lib.rs** (this file): Pure logic, no CLI concerns
//! - **bin/reposcraper.rs**: Thin wrapper that calls the library
//!
//! # Example
//!
//! ```
//! use reposcraper::{extract_from_text, RepositoryInfo};
//! use std::sync::Arc;
//!
//! let repo = Arc::new(RepositoryInfo::new("calc", "me"));
//! let text = "// Adds two numbers\npublic int Add(int a, int b)\n{\n    return a + b;\n}";
//! let outcome = extract_from_text(repo, "Calc.cs", text);
//!
//! assert!(outcome.is_successful());
//! assert_eq!(outcome.records()[0].signature, "public int Add(int a, int b)");
//! ```

pub mod core;
pub mod delimitation;
pub mod extractor;
pub mod formats;
pub mod profiles;

use std::path::Path;
use std::sync::Arc;

pub use crate::core::{
    discover_files, BatchSummary, ContentLocation, ContentSource, ExtractedRecord,
    ExtractionOutcome, InlineSource, LocalSource, MethodRecord, RepositoryInfo, Result,
    ScrapeError, ScraperConfig, SourceUnit,
};
pub use delimitation::{
    BraceDelimitation, DelimitationStrategy, IndentationDelimitation, SignatureEnd,
};
pub use extractor::{successful_records, summarize, BatchExtractor, MethodExtractor};
pub use profiles::{global_registry, LanguageProfile, ProfileRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Extract methods from in-memory text, picking the profile by extension
pub fn extract_from_text(
    repository: Arc<RepositoryInfo>,
    path: &str,
    text: &str,
) -> ExtractionOutcome {
    let unit = Arc::new(SourceUnit::inline(repository, path, text));
    match global_registry().for_extension(unit.extension()) {
        Some(profile) => MethodExtractor::new(profile).extract_text(&unit, text),
        None => {
            let err = ScrapeError::UnsupportedExtension {
                extension: unit.extension().to_string(),
            };
            ExtractionOutcome::failed(unit, err.to_string())
        }
    }
}

/// Discover and extract every `language` file under `root`.
///
/// Outcomes are ordered by relative path.
pub fn scrape_directory(
    root: &Path,
    language: &str,
    repository: Arc<RepositoryInfo>,
    config: &ScraperConfig,
) -> Result<Vec<ExtractionOutcome>> {
    config.validate()?;

    let registry = ProfileRegistry::with_tab_width(config.tab_width)?;
    let profile = registry.for_language(language)?;
    let units: Vec<Arc<SourceUnit>> =
        discover_files(root, repository, profile.primary_extension(), config)?
            .into_iter()
            .map(Arc::new)
            .collect();

    BatchExtractor::new(MethodExtractor::new(profile))
        .with_workers(config.workers)
        .run(&units, &LocalSource)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn repo() -> Arc<RepositoryInfo> {
        Arc::new(RepositoryInfo::new("demo", "me"))
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_extract_from_text_picks_profile() {
        let outcome = extract_from_text(repo(), "util.py", "def f():\n    return 1\n");
        assert!(outcome.is_successful());
        assert_eq!(outcome.records()[0].signature, "def f():");
    }

    #[test]
    fn test_extract_from_text_unknown_extension() {
        let outcome = extract_from_text(repo(), "main.go", "func main() {}");
        assert!(!outcome.is_successful());
        assert_eq!(
            outcome.error(),
            Some("Cannot handle files with extension: .go")
        );
    }

    #[test]
    fn test_scrape_directory() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("pkg")).unwrap();
        fs::write(dir.path().join("pkg/b.py"), "def b():\n    pass\n").unwrap();
        fs::write(dir.path().join("a.py"), "def a():\n    pass\n\ndef c():\n    pass\n").unwrap();
        fs::write(dir.path().join("skip.cs"), "void X() {}").unwrap();

        let outcomes =
            scrape_directory(dir.path(), "python", repo(), &ScraperConfig::default()).unwrap();
        let paths: Vec<&str> = outcomes.iter().map(|o| o.source().path.as_str()).collect();
        assert_eq!(paths, vec!["a.py", "pkg/b.py"]);
        assert_eq!(summarize(&outcomes).total_methods, 3);
    }

    #[test]
    fn test_scrape_directory_unknown_language() {
        let dir = TempDir::new().unwrap();
        let err = scrape_directory(dir.path(), "cobol", repo(), &ScraperConfig::default())
            .unwrap_err();
        assert!(matches!(err, ScrapeError::UnsupportedLanguage { .. }));
    }
}
