//! Brace-balancing delimitation for C-like languages

use std::ops::ControlFlow;

use super::{DelimitationStrategy, SignatureEnd};

/// Lexical state of the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    /// Inside a string or char literal opened by the given quote
    InString(u8),
    InLineComment,
    InBlockComment,
}

/// Walk `lines` from `start`, calling `visit(line, column)` for every byte
/// that sits in code (outside literals and comments).
///
/// All tokens the scanner cares about are ASCII, so it works on bytes; UTF-8
/// continuation bytes can never be mistaken for a quote or a brace.
fn scan_code<T>(
    lines: &[&str],
    start: SignatureEnd,
    mut visit: impl FnMut(usize, usize) -> ControlFlow<T>,
) -> Option<T> {
    let mut state = ScanState::Normal;

    for (line_idx, line) in lines.iter().enumerate().skip(start.line) {
        let bytes = line.as_bytes();
        let mut i = if line_idx == start.line {
            start.column.min(bytes.len())
        } else {
            0
        };

        // Line comments and literals do not survive a line break
        if matches!(state, ScanState::InLineComment | ScanState::InString(_)) {
            state = ScanState::Normal;
        }

        while i < bytes.len() {
            let b = bytes[i];
            let next = bytes.get(i + 1).copied();

            match state {
                ScanState::Normal => match (b, next) {
                    (b'/', Some(b'/')) => {
                        state = ScanState::InLineComment;
                        break;
                    }
                    (b'/', Some(b'*')) => {
                        state = ScanState::InBlockComment;
                        i += 2;
                        continue;
                    }
                    (b'"' | b'\'', _) => state = ScanState::InString(b),
                    _ => {
                        if let ControlFlow::Break(found) = visit(line_idx, i) {
                            return Some(found);
                        }
                    }
                },
                ScanState::InString(quote) => {
                    if b == b'\\' {
                        i += 2;
                        continue;
                    }
                    if b == quote {
                        state = ScanState::Normal;
                    }
                }
                ScanState::InBlockComment => {
                    if b == b'*' && next == Some(b'/') {
                        state = ScanState::Normal;
                        i += 2;
                        continue;
                    }
                }
                ScanState::InLineComment => break,
            }
            i += 1;
        }
    }

    None
}

/// What the scanner found after the signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyShape {
    /// `=> expr;` starting at (line, column) of the arrow
    Expression(usize, usize),
    /// `{ ... }` from the opening to the closing brace, inclusive
    Block((usize, usize), (usize, usize)),
}

/// Brace-balancing strategy.
///
/// Finds the first opening delimiter in code after the signature and returns
/// everything up to its balanced closing delimiter, braces included. An `=>`
/// seen before any opening delimiter marks an expression-bodied member whose
/// body runs up to the first line ending in `;`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BraceDelimitation {
    open: u8,
    close: u8,
}

impl Default for BraceDelimitation {
    fn default() -> Self {
        Self::new(b'{', b'}')
    }
}

impl BraceDelimitation {
    /// Create a strategy for a custom ASCII delimiter pair
    pub fn new(open: u8, close: u8) -> Self {
        Self { open, close }
    }

    fn locate(&self, end: SignatureEnd, lines: &[&str]) -> Option<BodyShape> {
        let mut opened: Option<(usize, usize)> = None;
        let mut depth: usize = 0;

        scan_code(lines, end, |line_idx, col| {
            let bytes = lines[line_idx].as_bytes();
            let b = bytes[col];

            match opened {
                None if b == b'=' && bytes.get(col + 1) == Some(&b'>') => {
                    ControlFlow::Break(BodyShape::Expression(line_idx, col))
                }
                None if b == self.open => {
                    opened = Some((line_idx, col));
                    depth = 1;
                    ControlFlow::Continue(())
                }
                Some(start) if b == self.close => {
                    depth -= 1;
                    if depth == 0 {
                        ControlFlow::Break(BodyShape::Block(start, (line_idx, col)))
                    } else {
                        ControlFlow::Continue(())
                    }
                }
                Some(_) if b == self.open => {
                    depth += 1;
                    ControlFlow::Continue(())
                }
                _ => ControlFlow::Continue(()),
            }
        })
    }
}

/// Text of an expression body: from the arrow up to the first line whose
/// trimmed end is `;`. Empty when no such line exists.
fn expression_body(lines: &[&str], line_idx: usize, col: usize) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for (idx, &line) in lines.iter().enumerate().skip(line_idx) {
        parts.push(if idx == line_idx { &line[col..] } else { line });
        if line.trim_end().ends_with(';') {
            return parts.join("\n").trim().to_string();
        }
    }

    String::new()
}

/// Exact text between two inclusive (line, column) positions
fn block_body(lines: &[&str], open: (usize, usize), close: (usize, usize)) -> String {
    let (open_line, open_col) = open;
    let (close_line, close_col) = close;

    if open_line == close_line {
        return lines[open_line][open_col..=close_col].trim().to_string();
    }

    let mut parts: Vec<&str> = Vec::with_capacity(close_line - open_line + 1);
    parts.push(&lines[open_line][open_col..]);
    parts.extend_from_slice(&lines[open_line + 1..close_line]);
    parts.push(&lines[close_line][..=close_col]);
    parts.join("\n").trim().to_string()
}

impl DelimitationStrategy for BraceDelimitation {
    fn extract_body(&self, end: SignatureEnd, lines: &[&str], line_index: usize) -> String {
        if line_index >= lines.len() {
            return String::new();
        }

        // Never scan before the signature line
        let start = if end.line < line_index {
            SignatureEnd::new(line_index, 0)
        } else {
            end
        };

        match self.locate(start, lines) {
            Some(BodyShape::Expression(line_idx, col)) => expression_body(lines, line_idx, col),
            Some(BodyShape::Block(open, close)) => block_body(lines, open, close),
            None => String::new(),
        }
    }

    fn name(&self) -> &'static str {
        "brace"
    }
}
