//! Profile registry
//!
//! An ordered table of profiles. Lookup by extension returns the first
//! profile that handles it, so registration order decides ties.

use super::generic::{csharp_profile, python_profile};
use super::LanguageProfile;
use crate::core::error::{Result, ScrapeError};
use crate::delimitation::DEFAULT_TAB_WIDTH;
use lazy_static::lazy_static;
use std::sync::Arc;

/// Ordered collection of language profiles
#[derive(Debug, Default, Clone)]
pub struct ProfileRegistry {
    profiles: Vec<Arc<dyn LanguageProfile>>,
}

impl ProfileRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in profiles (C#, then Python)
    pub fn builtin() -> Result<Self> {
        Self::with_tab_width(DEFAULT_TAB_WIDTH)
    }

    /// Built-in profiles, with Python tabs expanding to `tab_width` columns
    pub fn with_tab_width(tab_width: usize) -> Result<Self> {
        let mut registry = Self::new();
        registry.register(Arc::new(csharp_profile()?));
        registry.register(Arc::new(python_profile(tab_width)?));
        Ok(registry)
    }

    /// Append a profile; earlier profiles win extension lookups
    pub fn register(&mut self, profile: Arc<dyn LanguageProfile>) {
        self.profiles.push(profile);
    }

    /// First profile that handles `extension`
    pub fn for_extension(&self, extension: &str) -> Option<Arc<dyn LanguageProfile>> {
        self.profiles
            .iter()
            .find(|p| p.can_handle(extension))
            .cloned()
    }

    /// Profile named `language` (name or alias, case-insensitive)
    pub fn for_language(&self, language: &str) -> Result<Arc<dyn LanguageProfile>> {
        self.profiles
            .iter()
            .find(|p| p.answers_to(language))
            .cloned()
            .ok_or_else(|| ScrapeError::UnsupportedLanguage {
                language: language.to_string(),
            })
    }

    pub fn profiles(&self) -> &[Arc<dyn LanguageProfile>] {
        &self.profiles
    }

    /// Every extension handled by some profile, in registration order
    pub fn extensions(&self) -> Vec<&str> {
        self.profiles
            .iter()
            .flat_map(|p| p.extensions().iter().map(String::as_str))
            .collect()
    }
}

lazy_static! {
    static ref GLOBAL_REGISTRY: ProfileRegistry =
        ProfileRegistry::builtin().expect("built-in profiles are valid");
}

/// Process-wide registry of the built-in profiles
pub fn global_registry() -> &'static ProfileRegistry {
    &GLOBAL_REGISTRY
}
