//! Indentation-tracking delimitation for off-side rule languages

use super::{DelimitationStrategy, SignatureEnd};

/// Default number of columns a tab expands to
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Indentation strategy.
///
/// The body is every line after the signature that is indented deeper than
/// the signature line, plus any blank lines in between. The first non-blank
/// line at or below the signature's indentation ends the body and is not part
/// of it. The signature itself is excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentationDelimitation {
    tab_width: usize,
}

impl Default for IndentationDelimitation {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_WIDTH)
    }
}

impl IndentationDelimitation {
    pub fn new(tab_width: usize) -> Self {
        Self { tab_width }
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Width of the leading whitespace of `line`, tabs expanded
    pub fn indentation_width(&self, line: &str) -> usize {
        line.chars()
            .map_while(|c| match c {
                ' ' => Some(1),
                '\t' => Some(self.tab_width),
                _ => None,
            })
            .sum()
    }
}

impl DelimitationStrategy for IndentationDelimitation {
    fn extract_body(&self, end: SignatureEnd, lines: &[&str], line_index: usize) -> String {
        let Some(signature_line) = lines.get(line_index) else {
            return String::new();
        };

        let base = self.indentation_width(signature_line);
        // Multi-line signatures: the body starts after the line holding the colon
        let first = end.line.max(line_index) + 1;

        let body: Vec<&str> = lines
            .iter()
            .skip(first)
            .copied()
            .take_while(|line| line.trim().is_empty() || self.indentation_width(line) > base)
            .collect();

        body.join("\n")
    }

    fn name(&self) -> &'static str {
        "indentation"
    }
}
