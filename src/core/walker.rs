//! Local repository discovery
//!
//! Walks a checkout with the `ignore` crate (gitignore aware) and turns every
//! file with the wanted extension into a [`SourceUnit`] that a
//! [`LocalSource`](crate::core::source::LocalSource) can read.

use crate::core::config::ScraperConfig;
use crate::core::error::{Result, ScrapeError};
use crate::core::models::{normalize_path_separators, RepositoryInfo, SourceUnit};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Directories that never hold extractable sources.
const HYGIENE_EXCLUSIONS: &[&str] = &[".git", ".hg", ".svn", ".idea", ".vscode", ".vs"];

/// Build a GlobSet from patterns
fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| {
            ScrapeError::invalid_config(format!("bad ignore pattern '{}': {}", pattern, e))
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| ScrapeError::invalid_config(e.to_string()))
}

fn is_hygiene_excluded(relative: &Path) -> bool {
    relative.components().any(|c| {
        let name = c.as_os_str().to_string_lossy();
        HYGIENE_EXCLUSIONS.iter().any(|&pattern| name == pattern)
    })
}

fn has_extension(path: &Path, extension: &str) -> bool {
    let wanted = extension.trim_start_matches('.');
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(wanted))
}

/// Discover files under `root` whose extension matches `extension`.
///
/// Returns units sorted by relative path so batches are reproducible.
pub fn discover_files(
    root: &Path,
    repository: Arc<RepositoryInfo>,
    extension: &str,
    config: &ScraperConfig,
) -> Result<Vec<SourceUnit>> {
    if !root.is_dir() {
        return Err(ScrapeError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let ignore_set = build_globset(&config.ignore)?;
    let mut builder = WalkBuilder::new(root);
    builder
        .follow_links(false)
        .git_ignore(config.respect_gitignore)
        .git_global(config.respect_gitignore)
        .git_exclude(config.respect_gitignore)
        .hidden(true);

    let mut units = Vec::new();
    for result in builder.build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "walk error");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        if is_hygiene_excluded(relative) || !has_extension(path, extension) {
            continue;
        }

        let relative_str = normalize_path_separators(&relative.to_string_lossy());
        if ignore_set.is_match(&relative_str) {
            debug!(path = %relative_str, "ignored by pattern");
            continue;
        }

        if let Ok(meta) = entry.metadata() {
            if meta.len() > config.max_file_size {
                debug!(path = %relative_str, size = meta.len(), "skipping oversized file");
                continue;
            }
        }

        units.push(SourceUnit::new(
            repository.clone(),
            relative_str,
            path.to_string_lossy(),
        ));
    }

    units.sort_by(|a, b| a.path.cmp(&b.path));
    debug!(count = units.len(), extension, "discovered files");
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src/core")).unwrap();
        fs::create_dir_all(dir.path().join("obj/Debug")).unwrap();
        fs::write(dir.path().join("src/core/Bank.cs"), "class Bank {}").unwrap();
        fs::write(dir.path().join("src/Program.CS"), "class Program {}").unwrap();
        fs::write(dir.path().join("src/readme.md"), "# hi").unwrap();
        fs::write(dir.path().join("obj/Debug/Gen.cs"), "class Gen {}").unwrap();
        dir
    }

    fn repo() -> Arc<RepositoryInfo> {
        Arc::new(RepositoryInfo::new("bank", "acme"))
    }

    #[test]
    fn test_discovers_matching_extension_sorted() {
        let dir = setup();
        let units =
            discover_files(dir.path(), repo(), ".cs", &ScraperConfig::default()).unwrap();

        let paths: Vec<&str> = units.iter().map(|u| u.path.as_str()).collect();
        assert_eq!(paths, vec!["src/Program.CS", "src/core/Bank.cs"]);
        assert_eq!(units[1].name, "Bank.cs");
        assert!(units[1].download_location().is_some());
    }

    #[test]
    fn test_extension_without_dot_accepted() {
        let dir = setup();
        let units = discover_files(dir.path(), repo(), "md", &ScraperConfig::default()).unwrap();
        assert_eq!(units.len(), 1);
    }

    #[test]
    fn test_ignore_patterns_disabled() {
        let dir = setup();
        let config = ScraperConfig {
            ignore: vec![],
            ..ScraperConfig::default()
        };
        let units = discover_files(dir.path(), repo(), ".cs", &config).unwrap();
        assert_eq!(units.len(), 3);
    }

    #[test]
    fn test_oversized_files_skipped() {
        let dir = setup();
        let config = ScraperConfig {
            max_file_size: 14,
            ..ScraperConfig::default()
        };
        let units = discover_files(dir.path(), repo(), ".cs", &config).unwrap();
        let paths: Vec<&str> = units.iter().map(|u| u.path.as_str()).collect();
        assert_eq!(paths, vec!["src/core/Bank.cs"]);
    }

    #[test]
    fn test_missing_root() {
        let err = discover_files(
            Path::new("/no/such/root"),
            repo(),
            ".cs",
            &ScraperConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ScrapeError::DirectoryNotFound { .. }));
    }
}
