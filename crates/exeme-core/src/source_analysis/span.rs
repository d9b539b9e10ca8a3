// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Source location tracking.
//!
//! Every token, AST node and syntax error carries a `Span` locating it by
//! line number and character column. Columns count characters rather than
//! bytes, so a caret underline lines up with what the user sees in an editor.

use miette::SourceSpan;

/// A span of source code on one line (or, for multi-line comments, across
/// several lines).
///
/// `start` and `end` are 0-based character columns and `end` is inclusive:
/// a single-character token has `start == end`. Line numbers are 1-based.
///
/// # Examples
///
/// ```
/// use exeme_core::source_analysis::Span;
///
/// let span = Span::new(3, 4, 7);
/// assert_eq!(span.line(), 3);
/// assert_eq!(span.start(), 4);
/// assert_eq!(span.end(), 7);
/// assert_eq!(span.width(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    line: u32,
    end_line: u32,
    start: u32,
    end: u32,
}

impl Span {
    /// Creates a span covering columns `start..=end` of `line`.
    #[must_use]
    pub const fn new(line: u32, start: u32, end: u32) -> Self {
        debug_assert!(start <= end);
        Self {
            line,
            end_line: line,
            start,
            end,
        }
    }

    /// Creates a span covering a single column.
    #[must_use]
    pub const fn point(line: u32, column: u32) -> Self {
        Self::new(line, column, column)
    }

    /// Creates a span starting at `(line, start)` and ending at `(end_line, end)`.
    ///
    /// Only multi-line comments produce these.
    #[must_use]
    pub const fn multi_line(line: u32, start: u32, end_line: u32, end: u32) -> Self {
        debug_assert!(line <= end_line);
        Self {
            line,
            end_line,
            start,
            end,
        }
    }

    /// Returns the 1-based line the span starts on.
    #[must_use]
    pub const fn line(self) -> u32 {
        self.line
    }

    /// Returns the 1-based line the span ends on.
    #[must_use]
    pub const fn end_line(self) -> u32 {
        self.end_line
    }

    /// Returns the first column (0-based).
    #[must_use]
    pub const fn start(self) -> u32 {
        self.start
    }

    /// Returns the last column (0-based, inclusive).
    #[must_use]
    pub const fn end(self) -> u32 {
        self.end
    }

    /// Returns true if the span crosses a line boundary.
    #[must_use]
    pub const fn is_multi_line(self) -> bool {
        self.line != self.end_line
    }

    /// Number of columns covered on a single-line span.
    #[must_use]
    pub const fn width(self) -> u32 {
        self.end - self.start + 1
    }

    /// Creates a span that covers both `self` and `other`.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        let (line, start) = (self.line, self.start).min((other.line, other.start));
        let (end_line, end) = (self.end_line, self.end).max((other.end_line, other.end));
        Self {
            line,
            end_line,
            start,
            end,
        }
    }

    /// Converts to a byte-offset span into `source` for `miette` labels.
    ///
    /// Positions past the end of a line or of the source are clamped.
    #[must_use]
    pub fn to_source_span(self, source: &str) -> SourceSpan {
        let (offset, _) = locate(source, self.line, self.start);
        let (end_offset, width) = locate(source, self.end_line, self.end);
        let end = (end_offset + width).max(offset);
        (offset, end - offset).into()
    }
}

/// Finds the byte offset and UTF-8 width of the character at `(line, column)`.
fn locate(source: &str, line: u32, column: u32) -> (usize, usize) {
    let mut line_offset = 0;
    for (index, text) in source.split_inclusive('\n').enumerate() {
        if index + 1 == line as usize {
            let text = text.trim_end_matches(['\n', '\r']);
            return text
                .char_indices()
                .nth(column as usize)
                .map_or((line_offset + text.len(), 0), |(i, c)| {
                    (line_offset + i, c.len_utf8())
                });
        }
        line_offset += text.len();
    }
    (source.len(), 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_new_and_accessors() {
        let span = Span::new(2, 5, 9);
        assert_eq!(span.line(), 2);
        assert_eq!(span.end_line(), 2);
        assert_eq!(span.start(), 5);
        assert_eq!(span.end(), 9);
        assert_eq!(span.width(), 5);
        assert!(!span.is_multi_line());
    }

    #[test]
    fn span_point() {
        let span = Span::point(1, 3);
        assert_eq!(span.start(), span.end());
        assert_eq!(span.width(), 1);
    }

    #[test]
    fn span_merge_same_line() {
        let merged = Span::new(1, 4, 6).merge(Span::new(1, 0, 2));
        assert_eq!(merged, Span::new(1, 0, 6));
    }

    #[test]
    fn span_merge_across_lines() {
        let merged = Span::new(1, 4, 6).merge(Span::new(3, 0, 1));
        assert_eq!(merged, Span::multi_line(1, 4, 3, 1));
        assert!(merged.is_multi_line());
    }

    #[test]
    fn source_span_first_line() {
        let span = Span::new(1, 3, 5).to_source_span("fn foo() {");
        assert_eq!(span.offset(), 3);
        assert_eq!(span.len(), 3);
    }

    #[test]
    fn source_span_later_line() {
        let source = "x = 1\nyy = 22\n";
        let span = Span::new(2, 5, 6).to_source_span(source);
        assert_eq!(&source[span.offset()..span.offset() + span.len()], "22");
    }

    #[test]
    fn source_span_counts_characters_not_bytes() {
        let source = "s = \"é\" + é";
        let span = Span::point(1, 10).to_source_span(source);
        assert_eq!(&source[span.offset()..span.offset() + span.len()], "é");
    }

    #[test]
    fn source_span_crlf_line_endings() {
        let source = "a\r\nbc\r\n";
        let span = Span::new(2, 0, 1).to_source_span(source);
        assert_eq!(&source[span.offset()..span.offset() + span.len()], "bc");
    }

    #[test]
    fn source_span_clamps_past_end() {
        let source = "abc";
        let span = Span::point(1, 10).to_source_span(source);
        assert_eq!(span.offset(), 3);
        assert_eq!(span.len(), 0);

        let span = Span::point(4, 0).to_source_span(source);
        assert_eq!(span.offset(), 3);
    }
}
