//! Core module for reposcraper
//!
//! This module provides the foundational types shared by profiles, the
//! extractor and the output formats.
//!
//! # Architecture
//!
//! - `models`: Core data structures (SourceUnit, MethodRecord, ExtractionOutcome)
//! - `error`: Error types using thiserror
//! - `config`: ScraperConfig and its JSON file
//! - `source`: ContentSource trait and its inline/local implementations
//! - `walker`: Local checkout discovery

pub mod config;
pub mod error;
pub mod models;
pub mod source;
pub mod walker;

// Re-export commonly used types
pub use config::{ScraperConfig, CONFIG_FILE_NAME};
pub use error::{Result, ResultExt, ScrapeError};
pub use models::{
    normalize_path_separators, BatchSummary, ContentLocation, ExtractedRecord,
    ExtractionOutcome, MethodRecord, RepositoryInfo, SourceUnit,
};
pub use source::{decode_content, normalize_text, ContentSource, InlineSource, LocalSource};
pub use walker::discover_files;
