//! Scraper configuration
//!
//! Loaded from `.reposcraper_config.json` at the scanned root (or an explicit
//! file); command-line flags override individual values.

use crate::core::error::{Result, ResultExt, ScrapeError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up at the scanned root
pub const CONFIG_FILE_NAME: &str = ".reposcraper_config.json";

/// Configuration for discovery and extraction
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScraperConfig {
    /// Patterns to ignore (globs, matched against relative paths)
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
    /// Maximum file size in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Columns a tab expands to for indentation-delimited languages
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,
    /// Worker threads for batch extraction (0 = one per core)
    #[serde(default)]
    pub workers: usize,
    /// Respect .gitignore files while discovering
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

fn default_ignore() -> Vec<String> {
    vec![
        "**/bin/**".to_string(),
        "**/obj/**".to_string(),
        "**/node_modules/**".to_string(),
        "**/__pycache__/**".to_string(),
        "**/.venv/**".to_string(),
    ]
}

fn default_max_file_size() -> u64 {
    1_048_576 // 1MB
}

fn default_tab_width() -> usize {
    4
}

fn default_true() -> bool {
    true
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            ignore: default_ignore(),
            max_file_size: default_max_file_size(),
            tab_width: default_tab_width(),
            workers: 0,
            respect_gitignore: true,
        }
    }
}

impl ScraperConfig {
    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(ScrapeError::from)
            .context(format!("reading {}", path.display()))?;
        let config: ScraperConfig = serde_json::from_str(&raw)
            .map_err(ScrapeError::from)
            .context(format!("parsing {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.reposcraper_config.json` from `root` if present, defaults otherwise
    pub fn discover(root: &Path) -> Result<Self> {
        let candidate = root.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject values that would make extraction meaningless
    pub fn validate(&self) -> Result<()> {
        if self.tab_width == 0 {
            return Err(ScrapeError::invalid_config("tab_width must be at least 1"));
        }
        if self.max_file_size == 0 {
            return Err(ScrapeError::invalid_config("max_file_size must be positive"));
        }
        for pattern in &self.ignore {
            globset::Glob::new(pattern).map_err(|e| {
                ScrapeError::invalid_config(format!("bad ignore pattern '{}': {}", pattern, e))
            })?;
        }
        Ok(())
    }

    /// Builder pattern: set worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Builder pattern: set tab width
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }
}
