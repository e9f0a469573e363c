//! Error types for reposcraper
//!
//! This module provides structured error handling using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Errors that can occur while discovering, extracting or saving code units
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The selected profile does not recognise the file's extension
    #[error("Cannot handle files with extension: {extension}")]
    UnsupportedExtension { extension: String },

    /// No profile is registered for the requested language
    #[error("No language profile available for: {language}")]
    UnsupportedLanguage { language: String },

    /// The content accessor could not produce the file's text
    #[error("Content unavailable for {path}: {message}")]
    ContentUnavailable { path: String, message: String },

    /// Unanticipated fault while scanning a single file
    #[error("Error extracting methods: {message}")]
    FileProcessingFault { message: String },

    /// Directory not found
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A profile pattern failed to compile
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The batch worker pool could not be started
    #[error("Worker pool error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ScrapeError>,
    },
}

impl ScrapeError {
    /// Wrap an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ScrapeError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        ScrapeError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a content-unavailable error for a path
    pub fn content_unavailable(path: impl Into<String>, message: impl Into<String>) -> Self {
        ScrapeError::ContentUnavailable {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a per-file processing fault
    pub fn fault(message: impl Into<String>) -> Self {
        ScrapeError::FileProcessingFault {
            message: message.into(),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(ctx))
    }
}
