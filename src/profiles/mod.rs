//! Language profiles
//!
//! A profile bundles what the extractor needs to know about one syntax: how a
//! method signature, a type declaration and a comment line look, and which
//! [`DelimitationStrategy`] recovers method bodies.

pub mod generic;
pub mod registry;

pub use generic::{csharp_profile, python_profile, PatternProfile, ProfileConfig};
pub use registry::{global_registry, ProfileRegistry};

use crate::delimitation::{DelimitationStrategy, SignatureEnd};
use regex::Regex;
use std::fmt::Debug;
use std::sync::Arc;

/// Byte offset to line/column lookup over one text
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    /// 0-based line holding `offset`
    pub fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset) - 1
    }

    /// 0-based (line, byte column) of `offset`
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let line = self.line_of(offset);
        (line, offset - self.starts[line])
    }

    /// Offset of the line after the one holding `offset`, if any
    fn next_line_start(&self, offset: usize) -> Option<usize> {
        self.starts.get(self.line_of(offset) + 1).copied()
    }
}

/// A method signature located in a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureMatch {
    /// Signature text as matched (untrimmed)
    pub text: String,
    /// Method name, when the pattern captures `name`
    pub name: Option<String>,
    /// 0-based line of the signature's first non-whitespace character
    pub line: usize,
    /// Where the signature ends; body scanning starts here
    pub end: SignatureEnd,
}

/// A class/struct/interface declaration located in a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub name: String,
    /// Declaration header, trimmed
    pub declaration: String,
    /// 1-based line
    pub line: usize,
}

/// Trait for language profiles
///
/// Profiles are immutable after construction and shared across threads.
pub trait LanguageProfile: Send + Sync + Debug {
    /// Display name (e.g. "CSharp")
    fn name(&self) -> &str;

    /// Handled extensions, lowercase with leading dot
    fn extensions(&self) -> &[String];

    /// Alternative names accepted by [`LanguageProfile::answers_to`]
    fn aliases(&self) -> &[String];

    /// Multi-line pattern for method signatures.
    ///
    /// The signature text is the `signature` capture (whole match when the
    /// group is absent); anything after it is a guard that must follow the
    /// signature but is not part of it. An optional `name` capture holds the
    /// method name.
    fn signature_pattern(&self) -> &Regex;

    /// Multi-line pattern for type declarations (`declaration` and `name` captures)
    fn class_pattern(&self) -> &Regex;

    /// Pattern matching a single comment line
    fn comment_pattern(&self) -> &Regex;

    /// Body recovery strategy shared by every extraction of this language
    fn strategy(&self) -> &Arc<dyn DelimitationStrategy>;

    /// True for statement keywords that never appear in a declaration
    fn is_reserved(&self, word: &str) -> bool;

    /// True for declaration modifiers; these may share a spelling with a
    /// reserved word (C# `new`)
    fn is_modifier(&self, _word: &str) -> bool {
        false
    }

    /// Whether a signature candidate is really a statement.
    ///
    /// `lead` is the candidate text before `name`. The name and the word
    /// right before it (the return type) must not be reserved; earlier words
    /// may only be reserved when they are also modifiers.
    fn is_statement(&self, lead: &str, name: &str) -> bool {
        if self.is_reserved(name) {
            return true;
        }
        let mut words = lead.split_whitespace().rev();
        if words.next().is_some_and(|w| self.is_reserved(w)) {
            return true;
        }
        words.any(|w| self.is_reserved(w) && !self.is_modifier(w))
    }

    /// Whether files with `extension` belong to this profile.
    ///
    /// Case-insensitive; the leading dot is optional.
    fn can_handle(&self, extension: &str) -> bool {
        let wanted = extension.trim_start_matches('.');
        !wanted.is_empty()
            && self
                .extensions()
                .iter()
                .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(wanted))
    }

    /// Whether `language` names this profile or one of its aliases
    fn answers_to(&self, language: &str) -> bool {
        let language = language.trim();
        self.name().eq_ignore_ascii_case(language)
            || self.aliases().iter().any(|a| a.eq_ignore_ascii_case(language))
    }

    /// First handled extension, used for file discovery
    fn primary_extension(&self) -> &str {
        self.extensions().first().map(String::as_str).unwrap_or("")
    }

    /// Whether `line` is a comment line
    fn is_comment(&self, line: &str) -> bool {
        self.comment_pattern().is_match(line)
    }

    /// All method signatures in `text`, in source order, non-overlapping
    fn signatures(&self, text: &str) -> Vec<SignatureMatch> {
        let index = LineIndex::new(text);
        let pattern = self.signature_pattern();
        let mut found = Vec::new();
        let mut pos = 0;

        while pos <= text.len() {
            let Some(caps) = pattern.captures_at(text, pos) else {
                break;
            };
            let whole = caps.get(0).map_or(pos..pos, |m| m.range());
            let signature = caps.name("signature").map_or(whole.clone(), |m| m.range());
            let name = caps.name("name");

            // Rejected candidates give the rest of their line back
            let rejected = name.is_some_and(|n| {
                let lead = text.get(signature.start..n.start()).unwrap_or("");
                self.is_statement(lead, n.as_str())
            });
            if rejected {
                match index.next_line_start(whole.start) {
                    Some(next) => pos = next,
                    None => break,
                }
                continue;
            }

            let matched = &text[signature.clone()];
            let leading = matched.len() - matched.trim_start().len();
            let (end_line, end_column) = index.position(signature.end);
            found.push(SignatureMatch {
                text: matched.to_string(),
                name: name.map(|n| n.as_str().to_string()),
                line: index.line_of(signature.start + leading),
                end: SignatureEnd::new(end_line, end_column),
            });

            if signature.end > pos {
                pos = signature.end;
            } else {
                match index.next_line_start(whole.start) {
                    Some(next) => pos = next,
                    None => break,
                }
            }
        }

        found
    }

    /// Type declarations in `text`, in source order
    fn type_declarations(&self, text: &str) -> Vec<TypeDeclaration> {
        let index = LineIndex::new(text);
        self.class_pattern()
            .captures_iter(text)
            .filter_map(|caps| {
                let declaration = caps.name("declaration").or_else(|| caps.get(0))?;
                let name = caps.name("name")?;
                Some(TypeDeclaration {
                    name: name.as_str().to_string(),
                    declaration: declaration.as_str().trim().to_string(),
                    line: index.line_of(name.start()) + 1,
                })
            })
            .collect()
    }
}
