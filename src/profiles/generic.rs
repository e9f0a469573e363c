//! Regex-configured language profile
//!
//! One profile type covers every supported language: the language-specific
//! parts are the three patterns, the reserved and modifier word lists and the
//! body strategy. Adding a language means adding a configuration, not a new
//! type.

use super::LanguageProfile;
use crate::core::error::{Result, ScrapeError};
use crate::delimitation::{BraceDelimitation, DelimitationStrategy, IndentationDelimitation};
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Configuration for a pattern profile
#[derive(Clone)]
pub struct ProfileConfig {
    pub language_name: String,
    pub extensions: Vec<String>,
    pub aliases: Vec<String>,
    pub signature_pattern: Option<Regex>,
    pub class_pattern: Option<Regex>,
    pub comment_pattern: Option<Regex>,
    /// Statement keywords; candidates built around them are rejected
    pub reserved_words: Vec<String>,
    /// Declaration modifiers that may share a spelling with a reserved word
    pub modifiers: Vec<String>,
    pub strategy: Option<Arc<dyn DelimitationStrategy>>,
}

impl ProfileConfig {
    /// Create a new profile configuration
    pub fn new(name: &str, extensions: Vec<&str>) -> Self {
        Self {
            language_name: name.to_string(),
            extensions: extensions.iter().map(|e| normalize_extension(e)).collect(),
            aliases: Vec::new(),
            signature_pattern: None,
            class_pattern: None,
            comment_pattern: None,
            reserved_words: Vec::new(),
            modifiers: Vec::new(),
            strategy: None,
        }
    }

    /// Compile and set all three patterns from their source text
    pub fn with_patterns(self, signature: &str, class: &str, comment: &str) -> Result<Self> {
        Ok(self
            .with_signature_pattern(Regex::new(signature)?)
            .with_class_pattern(Regex::new(class)?)
            .with_comment_pattern(Regex::new(comment)?))
    }

    /// Set method signature pattern
    pub fn with_signature_pattern(mut self, pattern: Regex) -> Self {
        self.signature_pattern = Some(pattern);
        self
    }

    /// Set type declaration pattern
    pub fn with_class_pattern(mut self, pattern: Regex) -> Self {
        self.class_pattern = Some(pattern);
        self
    }

    /// Set comment line pattern
    pub fn with_comment_pattern(mut self, pattern: Regex) -> Self {
        self.comment_pattern = Some(pattern);
        self
    }

    /// Set the body delimitation strategy
    pub fn with_strategy(mut self, strategy: Arc<dyn DelimitationStrategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_reserved_words(mut self, words: &[&str]) -> Self {
        self.reserved_words = words.iter().map(|w| w.to_string()).collect();
        self
    }

    pub fn with_modifiers(mut self, words: &[&str]) -> Self {
        self.modifiers = words.iter().map(|w| w.to_string()).collect();
        self
    }
}

impl fmt::Debug for ProfileConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileConfig")
            .field("language_name", &self.language_name)
            .field("extensions", &self.extensions)
            .field("strategy", &self.strategy.as_ref().map(|s| s.name()))
            .finish_non_exhaustive()
    }
}

fn normalize_extension(extension: &str) -> String {
    format!(".{}", extension.trim_start_matches('.').to_ascii_lowercase())
}

/// Profile driven entirely by a [`ProfileConfig`]
#[derive(Debug)]
pub struct PatternProfile {
    name: String,
    extensions: Vec<String>,
    aliases: Vec<String>,
    signature: Regex,
    class: Regex,
    comment: Regex,
    reserved: HashSet<String>,
    modifiers: HashSet<String>,
    strategy: Arc<dyn DelimitationStrategy>,
}

impl PatternProfile {
    /// Build a profile; every pattern and the strategy are required
    pub fn new(config: ProfileConfig) -> Result<Self> {
        let missing = |what: &str| {
            ScrapeError::invalid_config(format!(
                "profile '{}' has no {}",
                config.language_name, what
            ))
        };

        if config.extensions.is_empty() {
            return Err(missing("extensions"));
        }
        let signature = config
            .signature_pattern
            .clone()
            .ok_or_else(|| missing("signature pattern"))?;
        let class = config
            .class_pattern
            .clone()
            .ok_or_else(|| missing("class pattern"))?;
        let comment = config
            .comment_pattern
            .clone()
            .ok_or_else(|| missing("comment pattern"))?;
        let strategy = config
            .strategy
            .clone()
            .ok_or_else(|| missing("delimitation strategy"))?;

        Ok(Self {
            name: config.language_name,
            extensions: config.extensions,
            aliases: config.aliases,
            signature,
            class,
            comment,
            reserved: config.reserved_words.into_iter().collect(),
            modifiers: config.modifiers.into_iter().collect(),
            strategy,
        })
    }
}

impl LanguageProfile for PatternProfile {
    fn name(&self) -> &str {
        &self.name
    }

    fn extensions(&self) -> &[String] {
        &self.extensions
    }

    fn aliases(&self) -> &[String] {
        &self.aliases
    }

    fn signature_pattern(&self) -> &Regex {
        &self.signature
    }

    fn class_pattern(&self) -> &Regex {
        &self.class
    }

    fn comment_pattern(&self) -> &Regex {
        &self.comment
    }

    fn strategy(&self) -> &Arc<dyn DelimitationStrategy> {
        &self.strategy
    }

    fn is_reserved(&self, word: &str) -> bool {
        self.reserved.contains(word)
    }

    fn is_modifier(&self, word: &str) -> bool {
        self.modifiers.contains(word)
    }
}

/// Statement keywords that look like `type name(...) {` to the C# pattern
const CSHARP_RESERVED: &[&str] = &[
    "if", "else", "while", "for", "foreach", "do", "switch", "case", "catch", "finally", "try",
    "using", "lock", "fixed", "return", "throw", "new", "typeof", "sizeof", "nameof", "checked",
    "unchecked", "await", "yield", "when", "where",
];

const CSHARP_MODIFIERS: &[&str] = &[
    "public", "private", "protected", "internal", "static", "virtual", "override", "abstract",
    "sealed", "async", "extern", "unsafe", "partial", "readonly", "new",
];

// Pattern sources for the built-in languages

const CSHARP_SIGNATURE: &str = r"(?m)^[ \t]*(?P<signature>(?:(?:public|private|protected|internal|static|virtual|override|abstract|sealed|async|extern|unsafe|partial|readonly|new)[ \t]+|\w+[ \t]+)*\w+(?:<(?:[^<>\n]|<[^<>\n]*>)*>)?(?:\[\]|\?)*[ \t]+(?P<name>\w+)[ \t]*(?:<[^<>\n]*>)?[ \t]*\([^)]*\)(?:\s*:\s*\w+(?:\([^)]*\))?)?)\s*(?:\{|=>)";

const CSHARP_CLASS: &str = r"(?m)^[ \t]*(?P<declaration>(?:(?:public|private|protected|internal)\s+)?(?:(?:abstract|sealed|static|partial)\s+)*(?:class|struct|interface|record|enum)\s+(?P<name>\w+)(?:<[^>]*>)?(?:\s*:\s*[^{]+)?)\s*\{";

const CSHARP_COMMENT: &str = r"^\s*(//|/\*|\*/|\*)";

const PYTHON_SIGNATURE: &str = r"(?m)^[ \t]*(?P<signature>(?:async[ \t]+)?def[ \t]+(?P<name>\w+)\s*\([^)]*\)(?:\s*->\s*[^:\n]+?)?\s*:)";

const PYTHON_CLASS: &str = r"(?m)^[ \t]*(?P<declaration>class[ \t]+(?P<name>\w+).*:)";

const PYTHON_COMMENT: &str = r#"^\s*(#|"""|''')"#;

/// C# profile: brace balancing, `.cs`
pub fn csharp_profile() -> Result<PatternProfile> {
    PatternProfile::new(
        ProfileConfig::new("CSharp", vec![".cs"])
            .with_aliases(&["csharp", "c#", "cs"])
            .with_patterns(CSHARP_SIGNATURE, CSHARP_CLASS, CSHARP_COMMENT)?
            .with_reserved_words(CSHARP_RESERVED)
            .with_modifiers(CSHARP_MODIFIERS)
            .with_strategy(Arc::new(BraceDelimitation::default())),
    )
}

/// Python profile: indentation tracking with the given tab width, `.py`
pub fn python_profile(tab_width: usize) -> Result<PatternProfile> {
    if tab_width == 0 {
        return Err(ScrapeError::invalid_config("tab width must be at least 1"));
    }
    PatternProfile::new(
        ProfileConfig::new("Python", vec![".py"])
            .with_aliases(&["python", "py"])
            .with_patterns(PYTHON_SIGNATURE, PYTHON_CLASS, PYTHON_COMMENT)?
            .with_strategy(Arc::new(IndentationDelimitation::new(tab_width))),
    )
}
