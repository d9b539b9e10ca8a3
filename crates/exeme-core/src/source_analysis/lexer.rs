// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for Exeme source code.
//!
//! The lexer is pull-based: the parser asks for one token at a time and the
//! lexer reads just enough characters to produce it. Source is consumed line
//! by line, one character at a time, with exactly one character of pushback
//! ([`Lexer::un_get_chr`]) and one token of pushback ([`Lexer::un_lex`]).
//!
//! Tokens never cross a line boundary except multi-line comments. Whether a
//! call may move on to the next line is the caller's choice, which is how the
//! parser tells "end of statement" apart from "end of input".
//!
//! # Example
//!
//! ```
//! use exeme_core::source_analysis::{Lexer, TokenKind};
//!
//! let mut lexer = Lexer::new("x **= 2");
//! assert!(lexer.lex(true).unwrap());
//! assert!(lexer.lex(true).unwrap());
//! assert_eq!(lexer.last_token().unwrap().kind(), &TokenKind::ExponentAssignment);
//! ```

use std::str::Lines;

use ecow::EcoString;
use tracing::trace;

use super::{LexError, LexErrorKind, Span, Token, TokenKind, is_keyword};
use crate::internal_error;

/// A lexer over one source file.
///
/// All state is per file: current line, cursor, the token stream of the
/// construct in progress and the pushback slots.
pub struct Lexer<'src> {
    /// Remaining source lines.
    lines: Lines<'src>,
    /// Characters of the current line.
    line: Vec<char>,
    /// 1-based number of the current line (0 before the first line is read).
    line_number: u32,
    /// Index of the next character to read in `line`.
    column: usize,
    /// The most recently read character.
    current: Option<char>,
    /// The character read before `current`.
    previous: Option<char>,
    /// Set by `un_get_chr`, cleared by the next successful `get_chr`.
    pushed_back: bool,
    /// Tokens produced since the last `clear_tokens`.
    tokens: Vec<Token>,
    /// Token returned by `un_lex`, handed out again by the next `lex`.
    un_lexed: Option<Token>,
    /// Whether comment tokens are handed to the caller.
    keep_comments: bool,
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("line_number", &self.line_number)
            .field("column", &self.column)
            .field("tokens", &self.tokens.len())
            .field("un_lexed", &self.un_lexed.is_some())
            .finish_non_exhaustive()
    }
}

/// Resolves the character after a backslash.
fn escape(c: char) -> Option<char> {
    match c {
        'b' => Some('\u{8}'),
        'f' => Some('\u{c}'),
        'n' => Some('\n'),
        't' => Some('\t'),
        'v' => Some('\u{b}'),
        '\'' => Some('\''),
        '"' => Some('"'),
        '\\' => Some('\\'),
        _ => None,
    }
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    ///
    /// Comments are skipped; see [`Lexer::keep_comments`].
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            lines: source.lines(),
            line: Vec::new(),
            line_number: 0,
            column: 0,
            current: None,
            previous: None,
            pushed_back: false,
            tokens: Vec::new(),
            un_lexed: None,
            keep_comments: false,
        }
    }

    /// Sets whether comment tokens are returned from [`Lexer::lex`].
    #[must_use]
    pub fn keep_comments(mut self, keep: bool) -> Self {
        self.keep_comments = keep;
        self
    }

    /// Returns the 1-based number of the line being read.
    #[must_use]
    pub fn line_number(&self) -> u32 {
        self.line_number
    }

    /// Returns the tokens produced since the last [`Lexer::clear_tokens`].
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the most recently produced token.
    #[must_use]
    pub fn last_token(&self) -> Option<&Token> {
        self.tokens.last()
    }

    /// Forgets the tokens of the previous construct.
    ///
    /// An un-lexed token survives: it belongs to the next construct.
    pub fn clear_tokens(&mut self) {
        self.tokens.clear();
    }

    // ========================================================================
    // Line and character acquisition
    // ========================================================================

    /// Moves to the next non-blank line.
    ///
    /// Does nothing if the current line still has characters, unless `force`
    /// is set. Returns `false` only at end of input.
    pub fn get_line(&mut self, force: bool) -> bool {
        if !force && self.column < self.line.len() {
            return true;
        }
        for text in self.lines.by_ref() {
            self.line_number += 1;
            if text.trim().is_empty() {
                continue;
            }
            self.line = text.chars().collect();
            self.column = 0;
            self.current = None;
            self.previous = None;
            self.pushed_back = false;
            return true;
        }
        self.line.clear();
        self.column = 0;
        false
    }

    /// Reads the next character of the current line into `current`.
    ///
    /// With `skip_whitespace`, keeps reading until a non-whitespace
    /// character. Returns `false` at the end of the line.
    pub fn get_chr(&mut self, skip_whitespace: bool) -> bool {
        loop {
            let Some(&c) = self.line.get(self.column) else {
                return false;
            };
            self.column += 1;
            self.previous = self.current;
            self.current = Some(c);
            self.pushed_back = false;
            if !(skip_whitespace && c.is_whitespace()) {
                return true;
            }
        }
    }

    /// Pushes back the character read by the last [`Lexer::get_chr`].
    ///
    /// # Panics
    ///
    /// Panics if called twice without a `get_chr` in between, or before any
    /// character of the line was read.
    pub fn un_get_chr(&mut self) {
        if self.pushed_back || self.column == 0 {
            internal_error!("un_get_chr without a character to push back");
        }
        self.column -= 1;
        self.current = self.previous;
        self.pushed_back = true;
    }

    /// Column of the most recently read character.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "lines over 4G characters are not supported"
    )]
    fn position(&self) -> u32 {
        self.column.saturating_sub(1) as u32
    }

    /// Span from `start` to the most recently read character.
    fn span_from(&self, start: u32) -> Span {
        Span::new(self.line_number, start, self.position().max(start))
    }

    /// Consumes the next character if it is `expected`.
    fn next_is(&mut self, expected: char) -> bool {
        if !self.get_chr(false) {
            return false;
        }
        if self.current == Some(expected) {
            true
        } else {
            self.un_get_chr();
            false
        }
    }

    // ========================================================================
    // Token acquisition
    // ========================================================================

    /// Produces the next token and appends it to the token stream.
    ///
    /// An un-lexed token is returned first. Otherwise the rest of the current
    /// line is scanned, and when it is exhausted the lexer moves on to the
    /// next line only if `next_line` is set. Returns `Ok(false)` when no
    /// token is available.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] for malformed input. The lexer does not
    /// recover; callers should stop after the first error.
    pub fn lex(&mut self, next_line: bool) -> Result<bool, LexError> {
        if let Some(token) = self.un_lexed.take() {
            self.tokens.push(token);
            return Ok(true);
        }
        loop {
            if !self.get_chr(true) {
                if next_line && self.get_line(false) {
                    continue;
                }
                return Ok(false);
            }
            let token = self.lex_next()?;
            if token.kind().is_comment() && !self.keep_comments {
                continue;
            }
            trace!(
                "lexed {} at {}:{}",
                token.kind().name(),
                token.line(),
                token.span().start()
            );
            self.tokens.push(token);
            return Ok(true);
        }
    }

    /// Takes back the most recent token; the next [`Lexer::lex`] returns it.
    ///
    /// # Panics
    ///
    /// Panics if a token is already pushed back or the stream is empty.
    pub fn un_lex(&mut self) {
        if self.un_lexed.is_some() {
            internal_error!("un_lex called twice without an intervening lex");
        }
        let Some(token) = self.tokens.pop() else {
            internal_error!("un_lex called with an empty token stream");
        };
        self.un_lexed = Some(token);
    }

    /// Recognizes the token starting at the current character.
    fn lex_next(&mut self) -> Result<Token, LexError> {
        let Some(c) = self.current else {
            internal_error!("lex_next called without a current character");
        };
        let start = self.position();
        let kind = match c {
            ',' => TokenKind::Comma,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '[' => TokenKind::OpenSquareBracket,
            ']' => TokenKind::CloseSquareBracket,
            '{' => TokenKind::OpenCurlyBrace,
            '}' => TokenKind::CloseCurlyBrace,
            '@' => TokenKind::At,
            '.' => TokenKind::Dot,
            '#' => self.lex_single_line_comment(),
            '\'' => self.lex_char(start)?,
            '"' => self.lex_string(start)?,
            '/' if self.next_is('*') => return self.lex_multi_line_comment(start),
            '=' | '*' | '+' | '-' | '/' | '%' | '<' | '>' | '&' | '|' | '^' | '!' | '~'
            | ':' => self.lex_operator(c),
            c if c.is_ascii_digit() => self.lex_numeral(c)?,
            c if c.is_alphabetic() || c == '_' => self.lex_identifier_or_keyword(c),
            c => return Err(LexError::unexpected_char(c, Span::point(self.line_number, start))),
        };
        Ok(Token::new(kind, self.span_from(start)))
    }

    /// Skips to the end of the line.
    fn lex_single_line_comment(&mut self) -> TokenKind {
        while self.get_chr(false) {}
        TokenKind::SingleLineComment
    }

    /// Reads a `/* ... */` comment; the opening `/*` is already consumed.
    fn lex_multi_line_comment(&mut self, start: u32) -> Result<Token, LexError> {
        let start_line = self.line_number;
        let mut star = false;
        loop {
            if !self.get_chr(false) {
                if !self.get_line(true) {
                    return Err(LexError::unterminated_comment(Span::new(
                        start_line,
                        start,
                        start + 1,
                    )));
                }
                star = false;
                continue;
            }
            if star && self.current == Some('/') {
                break;
            }
            star = self.current == Some('*');
        }
        let span = Span::multi_line(start_line, start, self.line_number, self.position());
        Ok(Token::new(TokenKind::MultiLineComment, span))
    }

    /// Reads the body of a quoted literal up to `quote`, resolving escapes.
    ///
    /// Returns `None` if the line ends first.
    fn lex_quoted(&mut self, quote: char) -> Result<Option<String>, LexError> {
        let mut value = String::new();
        loop {
            if !self.get_chr(false) {
                return Ok(None);
            }
            match self.current {
                Some(c) if c == quote => return Ok(Some(value)),
                Some('\\') => {
                    let backslash = self.position();
                    if !self.get_chr(false) {
                        return Ok(None);
                    }
                    let escaped = self.current.unwrap_or_default();
                    let Some(resolved) = escape(escaped) else {
                        return Err(LexError::new(
                            LexErrorKind::InvalidEscape(escaped),
                            self.span_from(backslash),
                        ));
                    };
                    value.push(resolved);
                }
                Some(c) => value.push(c),
                None => return Ok(None),
            }
        }
    }

    /// Reads a char literal; the opening quote is at `start`.
    fn lex_char(&mut self, start: u32) -> Result<TokenKind, LexError> {
        let Some(value) = self.lex_quoted('\'')? else {
            return Err(LexError::unterminated_char(Span::point(
                self.line_number,
                start,
            )));
        };
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(TokenKind::Char(c)),
            _ => Err(LexError::new(
                LexErrorKind::InvalidCharLiteral,
                self.span_from(start),
            )),
        }
    }

    /// Reads a string literal; the opening quote is at `start`.
    fn lex_string(&mut self, start: u32) -> Result<TokenKind, LexError> {
        match self.lex_quoted('"')? {
            Some(value) => Ok(TokenKind::String(EcoString::from(value))),
            None => Err(LexError::unterminated_string(Span::point(
                self.line_number,
                start,
            ))),
        }
    }

    /// Reads an integer or float starting with `first`.
    fn lex_numeral(&mut self, first: char) -> Result<TokenKind, LexError> {
        let mut text = EcoString::new();
        text.push(first);
        let mut float = false;
        while self.get_chr(false) {
            match self.current {
                Some(c) if c.is_ascii_digit() => text.push(c),
                Some('.') if float => {
                    return Err(LexError::new(
                        LexErrorKind::MultipleDecimalPoints,
                        Span::point(self.line_number, self.position()),
                    ));
                }
                Some('.') => {
                    float = true;
                    text.push('.');
                }
                Some(c) if c.is_alphabetic() || c == '_' => {
                    return Err(LexError::new(
                        LexErrorKind::InvalidNumeralCharacter { ch: c, float },
                        Span::point(self.line_number, self.position()),
                    ));
                }
                _ => {
                    self.un_get_chr();
                    break;
                }
            }
        }
        Ok(if float {
            TokenKind::Float(text)
        } else {
            TokenKind::Integer(text)
        })
    }

    /// Reads an identifier, classifying reserved words as keywords.
    fn lex_identifier_or_keyword(&mut self, first: char) -> TokenKind {
        let mut text = EcoString::new();
        text.push(first);
        while self.get_chr(false) {
            match self.current {
                Some(c) if c.is_alphanumeric() || c == '_' => text.push(c),
                _ => {
                    self.un_get_chr();
                    break;
                }
            }
        }
        if is_keyword(&text) {
            TokenKind::Keyword(text)
        } else {
            TokenKind::Identifier(text)
        }
    }

    /// Reads an operator starting with `first`.
    ///
    /// Tries, in order: doubling (`**`, `<<`, `::`), the two-character forms
    /// `->` `!=` `<=` `>=`, then a trailing `=` for the compound assignment.
    fn lex_operator(&mut self, first: char) -> TokenKind {
        let (single, doubled) = match first {
            '=' => (TokenKind::Assignment, Some(TokenKind::EqualTo)),
            '*' => (TokenKind::Multiplication, Some(TokenKind::Exponent)),
            '/' => (TokenKind::Division, Some(TokenKind::FloorDivision)),
            '<' => (TokenKind::LessThan, Some(TokenKind::LeftShift)),
            '>' => (TokenKind::GreaterThan, Some(TokenKind::RightShift)),
            '&' => (TokenKind::BitwiseAnd, Some(TokenKind::LogicalAnd)),
            '|' => (TokenKind::BitwiseOr, Some(TokenKind::LogicalOr)),
            ':' => (TokenKind::Colon, Some(TokenKind::ScopeResolution)),
            '+' => (TokenKind::Addition, None),
            '-' => (TokenKind::Subtraction, None),
            '%' => (TokenKind::Modulo, None),
            '^' => (TokenKind::BitwiseXor, None),
            '!' => (TokenKind::LogicalNot, None),
            '~' => (TokenKind::BitwiseNot, None),
            c => internal_error!("'{c}' does not start an operator"),
        };

        let kind = match doubled {
            Some(doubled) if self.next_is(first) => doubled,
            _ => match single {
                TokenKind::Subtraction if self.next_is('>') => return TokenKind::Arrow,
                TokenKind::LogicalNot if self.next_is('=') => return TokenKind::NotEqualTo,
                TokenKind::LessThan if self.next_is('=') => return TokenKind::LessThanOrEqual,
                TokenKind::GreaterThan if self.next_is('=') => {
                    return TokenKind::GreaterThanOrEqual;
                }
                single => single,
            },
        };

        match kind.with_assignment() {
            Some(assignment) if self.next_is('=') => assignment,
            _ => kind,
        }
    }
}

/// Tokenizes `source` completely, skipping comments.
///
/// # Errors
///
/// Returns the first [`LexError`] in the source.
///
/// # Examples
///
/// ```
/// use exeme_core::source_analysis::{TokenKind, tokenize};
///
/// let tokens = tokenize("a // b").unwrap();
/// assert_eq!(tokens[1].kind(), &TokenKind::FloorDivision);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source);
    while lexer.lex(true)? {}
    Ok(lexer.tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::ErrorCode;

    fn lex_kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(Token::into_kind)
            .collect()
    }

    fn lex_error(source: &str) -> LexError {
        tokenize(source).unwrap_err()
    }

    #[test]
    fn lex_empty() {
        assert!(lex_kinds("").is_empty());
        assert!(lex_kinds("   \n\t\n").is_empty());
    }

    #[test]
    fn single_character_tokens() {
        let tokens = tokenize(", ( ) [ ] { } @ .").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind().clone()).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Comma,
                TokenKind::OpenParen,
                TokenKind::CloseParen,
                TokenKind::OpenSquareBracket,
                TokenKind::CloseSquareBracket,
                TokenKind::OpenCurlyBrace,
                TokenKind::CloseCurlyBrace,
                TokenKind::At,
                TokenKind::Dot,
            ]
        );
        for token in &tokens {
            assert_eq!(token.span().start(), token.span().end());
        }
    }

    #[test]
    fn lex_identifiers_and_keywords() {
        assert_eq!(
            lex_kinds("fn foo _bar x1 return"),
            vec![
                TokenKind::Keyword("fn".into()),
                TokenKind::Identifier("foo".into()),
                TokenKind::Identifier("_bar".into()),
                TokenKind::Identifier("x1".into()),
                TokenKind::Keyword("return".into()),
            ]
        );
    }

    #[test]
    fn lex_numerals() {
        assert_eq!(
            lex_kinds("42 3.14 7."),
            vec![
                TokenKind::Integer("42".into()),
                TokenKind::Float("3.14".into()),
                TokenKind::Float("7.".into()),
            ]
        );
    }

    #[test]
    fn numeral_stops_at_operator() {
        assert_eq!(
            lex_kinds("1+2"),
            vec![
                TokenKind::Integer("1".into()),
                TokenKind::Addition,
                TokenKind::Integer("2".into()),
            ]
        );
    }

    #[test]
    fn second_decimal_point_fails() {
        let err = lex_error("1.2.3");
        assert_eq!(err.kind, LexErrorKind::MultipleDecimalPoints);
        assert_eq!(err.code(), ErrorCode::L0006);
        assert_eq!(err.span, Span::point(1, 3));
    }

    #[test]
    fn letter_in_numeral_fails() {
        let err = lex_error("12ab");
        assert_eq!(
            err.kind,
            LexErrorKind::InvalidNumeralCharacter {
                ch: 'a',
                float: false
            }
        );
        assert_eq!(err.code(), ErrorCode::L0007);

        let err = lex_error("1.5_");
        assert_eq!(
            err.kind,
            LexErrorKind::InvalidNumeralCharacter {
                ch: '_',
                float: true
            }
        );
    }

    #[test]
    fn doubled_operators() {
        assert_eq!(
            lex_kinds("** // << >> && || :: =="),
            vec![
                TokenKind::Exponent,
                TokenKind::FloorDivision,
                TokenKind::LeftShift,
                TokenKind::RightShift,
                TokenKind::LogicalAnd,
                TokenKind::LogicalOr,
                TokenKind::ScopeResolution,
                TokenKind::EqualTo,
            ]
        );
    }

    #[test]
    fn single_operator_leaves_next_character() {
        assert_eq!(
            lex_kinds("*x"),
            vec![TokenKind::Multiplication, TokenKind::Identifier("x".into())]
        );
        assert_eq!(
            lex_kinds(":a"),
            vec![TokenKind::Colon, TokenKind::Identifier("a".into())]
        );
        assert_eq!(
            lex_kinds("<("),
            vec![TokenKind::LessThan, TokenKind::OpenParen]
        );
    }

    #[test]
    fn two_character_operators() {
        assert_eq!(
            lex_kinds("-> != <= >="),
            vec![
                TokenKind::Arrow,
                TokenKind::NotEqualTo,
                TokenKind::LessThanOrEqual,
                TokenKind::GreaterThanOrEqual,
            ]
        );
    }

    #[test]
    fn compound_assignments() {
        assert_eq!(
            lex_kinds("%= *= **= /= //= += -= &= |= ^= ~= <<= >>= ="),
            vec![
                TokenKind::ModuloAssignment,
                TokenKind::MultiplicationAssignment,
                TokenKind::ExponentAssignment,
                TokenKind::DivisionAssignment,
                TokenKind::FloorDivisionAssignment,
                TokenKind::AdditionAssignment,
                TokenKind::SubtractionAssignment,
                TokenKind::BitwiseAndAssignment,
                TokenKind::BitwiseOrAssignment,
                TokenKind::BitwiseXorAssignment,
                TokenKind::BitwiseNotAssignment,
                TokenKind::LeftShiftAssignment,
                TokenKind::RightShiftAssignment,
                TokenKind::Assignment,
            ]
        );
    }

    #[test]
    fn compound_assignment_spans() {
        let tokens = tokenize("a **= b").unwrap();
        assert_eq!(tokens[1].span(), Span::new(1, 2, 4));
    }

    #[test]
    fn operators_without_assignment_form() {
        assert_eq!(
            lex_kinds("&&= :="),
            vec![
                TokenKind::LogicalAnd,
                TokenKind::Assignment,
                TokenKind::Colon,
                TokenKind::Assignment,
            ]
        );
        assert_eq!(
            lex_kinds("--"),
            vec![TokenKind::Subtraction, TokenKind::Subtraction]
        );
    }

    #[test]
    fn char_literal_escape() {
        assert_eq!(lex_kinds(r"'\n'"), vec![TokenKind::Char('\n')]);
        assert_eq!(lex_kinds(r"'\''"), vec![TokenKind::Char('\'')]);
        assert_eq!(lex_kinds("'é'"), vec![TokenKind::Char('é')]);
    }

    #[test]
    fn string_literal_escape() {
        assert_eq!(
            lex_kinds(r#""a\tb""#),
            vec![TokenKind::String("a\tb".into())]
        );
        assert_eq!(
            lex_kinds(r#""say \"hi\"\\""#),
            vec![TokenKind::String("say \"hi\"\\".into())]
        );
        assert_eq!(lex_kinds(r#""""#), vec![TokenKind::String("".into())]);
    }

    #[test]
    fn string_span_covers_quotes() {
        let tokens = tokenize(r#"x = "ab""#).unwrap();
        assert_eq!(tokens[2].span(), Span::new(1, 4, 7));
    }

    #[test]
    fn unterminated_string_anchored_at_quote() {
        let err = lex_error("x = \"abc\ny");
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
        assert_eq!(err.span, Span::point(1, 4));
    }

    #[test]
    fn unterminated_char_anchored_at_quote() {
        let err = lex_error("  'a");
        assert_eq!(err.kind, LexErrorKind::UnterminatedChar);
        assert_eq!(err.code(), ErrorCode::L0002);
        assert_eq!(err.span, Span::point(1, 2));
    }

    #[test]
    fn trailing_backslash_is_unterminated() {
        let err = lex_error(r#""abc\"#);
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    }

    #[test]
    fn invalid_escape_fails() {
        let err = lex_error(r#""a\qb""#);
        assert_eq!(err.kind, LexErrorKind::InvalidEscape('q'));
        assert_eq!(err.span, Span::new(1, 2, 3));
    }

    #[test]
    fn char_literal_must_be_one_character() {
        assert_eq!(lex_error("'ab'").kind, LexErrorKind::InvalidCharLiteral);
        assert_eq!(lex_error("''").kind, LexErrorKind::InvalidCharLiteral);
    }

    #[test]
    fn unexpected_character() {
        let err = lex_error("a $ b");
        assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('$'));
        assert_eq!(err.span, Span::point(1, 2));
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            lex_kinds("a # trailing\n/* block\n  comment */ b"),
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::Identifier("b".into()),
            ]
        );
    }

    #[test]
    fn comments_are_kept_on_request() {
        let mut lexer = Lexer::new("# one\n/* two\nthree */").keep_comments(true);
        assert!(lexer.lex(true).unwrap());
        assert!(lexer.lex(true).unwrap());
        assert!(!lexer.lex(true).unwrap());
        let tokens = lexer.tokens();
        assert_eq!(tokens[0].kind(), &TokenKind::SingleLineComment);
        assert_eq!(tokens[0].span(), Span::new(1, 0, 4));
        assert_eq!(tokens[1].kind(), &TokenKind::MultiLineComment);
        assert_eq!(tokens[1].span(), Span::multi_line(2, 0, 3, 7));
    }

    #[test]
    fn unterminated_multi_line_comment() {
        let err = lex_error("x /* never\nclosed");
        assert_eq!(err.kind, LexErrorKind::UnterminatedComment);
        assert_eq!(err.code(), ErrorCode::L0008);
        assert_eq!(err.span, Span::new(1, 2, 3));
    }

    #[test]
    fn line_numbers_count_blank_lines() {
        let tokens = tokenize("a\n\n   \nb").unwrap();
        assert_eq!(tokens[0].line(), 1);
        assert_eq!(tokens[1].line(), 4);
    }

    #[test]
    fn crlf_line_endings() {
        let tokens = tokenize("a\r\nbc\r\n").unwrap();
        assert_eq!(tokens[1].span(), Span::new(2, 0, 1));
    }

    #[test]
    fn lex_without_next_line_stops_at_line_end() {
        let mut lexer = Lexer::new("a b\nc");
        assert!(lexer.lex(true).unwrap());
        assert!(lexer.lex(false).unwrap());
        assert!(!lexer.lex(false).unwrap());
        assert!(lexer.lex(true).unwrap());
        assert_eq!(
            lexer.last_token().unwrap().kind(),
            &TokenKind::Identifier("c".into())
        );
    }

    #[test]
    fn un_lex_round_trip() {
        let mut lexer = Lexer::new("foo <<= 3");
        assert!(lexer.lex(true).unwrap());
        assert!(lexer.lex(true).unwrap());
        let first = lexer.last_token().unwrap().clone();
        lexer.un_lex();
        assert_eq!(lexer.tokens().len(), 1);
        assert!(lexer.lex(true).unwrap());
        assert_eq!(lexer.last_token(), Some(&first));
        assert!(lexer.lex(true).unwrap());
        assert_eq!(
            lexer.last_token().unwrap().kind(),
            &TokenKind::Integer("3".into())
        );
    }

    #[test]
    fn un_lexed_token_survives_clear() {
        let mut lexer = Lexer::new("a b");
        assert!(lexer.lex(true).unwrap());
        lexer.un_lex();
        lexer.clear_tokens();
        assert!(lexer.lex(false).unwrap());
        assert_eq!(lexer.tokens().len(), 1);
        assert_eq!(
            lexer.last_token().unwrap().kind(),
            &TokenKind::Identifier("a".into())
        );
    }

    #[test]
    #[should_panic(expected = "un_lex called twice")]
    fn double_un_lex_panics() {
        let mut lexer = Lexer::new("a b");
        assert!(lexer.lex(true).unwrap());
        assert!(lexer.lex(true).unwrap());
        lexer.un_lex();
        lexer.un_lex();
    }

    #[test]
    #[should_panic(expected = "empty token stream")]
    fn un_lex_empty_stream_panics() {
        let mut lexer = Lexer::new("");
        lexer.un_lex();
    }

    #[test]
    fn get_chr_and_un_get_chr() {
        let mut lexer = Lexer::new("  ab");
        assert!(lexer.get_line(false));
        assert!(lexer.get_chr(true));
        assert_eq!(lexer.current, Some('a'));
        assert!(lexer.get_chr(false));
        assert_eq!(lexer.current, Some('b'));
        lexer.un_get_chr();
        assert_eq!(lexer.current, Some('a'));
        assert!(lexer.get_chr(false));
        assert_eq!(lexer.current, Some('b'));
        assert!(!lexer.get_chr(false));
    }

    #[test]
    #[should_panic(expected = "un_get_chr without a character")]
    fn double_un_get_chr_panics() {
        let mut lexer = Lexer::new("ab");
        assert!(lexer.get_line(false));
        assert!(lexer.get_chr(false));
        assert!(lexer.get_chr(false));
        lexer.un_get_chr();
        lexer.un_get_chr();
    }

    #[test]
    fn get_line_skips_blank_lines() {
        let mut lexer = Lexer::new("\n  \nx\n\n");
        assert!(lexer.get_line(false));
        assert_eq!(lexer.line_number(), 3);
        assert!(!lexer.get_line(true));
    }

    #[test]
    fn get_line_without_force_keeps_unread_line() {
        let mut lexer = Lexer::new("ab\ncd");
        assert!(lexer.get_line(false));
        assert!(lexer.get_chr(false));
        assert!(lexer.get_line(false));
        assert_eq!(lexer.line_number(), 1);
        assert!(lexer.get_line(true));
        assert_eq!(lexer.line_number(), 2);
    }
}
