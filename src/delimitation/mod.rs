//! Method body delimitation
//!
//! A [`DelimitationStrategy`] decides where a method body begins and ends for
//! a family of languages. Two strategies ship:
//!
//! - [`BraceDelimitation`]: literal/comment-aware brace balancing for C-like
//!   languages. The returned body includes the outer braces (or starts at
//!   `=>` for expression-bodied members).
//! - [`IndentationDelimitation`]: indentation tracking for off-side rule
//!   languages. The returned body is the indented block only; the signature
//!   line is never part of it.
//!
//! Both return an empty string when no terminator can be found.

mod brace;
mod indentation;

pub use brace::BraceDelimitation;
pub use indentation::{IndentationDelimitation, DEFAULT_TAB_WIDTH};

use std::fmt::Debug;

/// Where a signature match ends, in line/column terms (both 0-based,
/// column in bytes). Body scanning never starts before this point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignatureEnd {
    pub line: usize,
    pub column: usize,
}

impl SignatureEnd {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Trait for body recovery strategies
///
/// Strategies are immutable and shared by every extraction of their language.
pub trait DelimitationStrategy: Send + Sync + Debug {
    /// Recover the body of the method whose signature starts on `line_index`
    /// and ends at `end`.
    fn extract_body(&self, end: SignatureEnd, lines: &[&str], line_index: usize) -> String;

    /// Short identifier used in logs
    fn name(&self) -> &'static str;
}
