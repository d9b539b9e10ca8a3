// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error types for the Exeme front-end.
//!
//! Lexical and syntax errors are user-facing: they carry a stable
//! [`ErrorCode`] and a source location, and end the compilation of the file
//! they occur in. They are returned as values and rendered by
//! [`crate::diagnostics`].
//!
//! Programmer mistakes (broken invariants inside the lexer or parser) are not
//! represented here. They go through [`internal_error!`](crate::internal_error)
//! and panic.

use std::fmt;

use ecow::EcoString;
use thiserror::Error;

use super::Span;

/// Stable identifier for every user-facing error.
///
/// `L` codes come from the lexer, `P` codes from the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorCode {
    /// Unexpected character.
    L0001,
    /// Unterminated char literal.
    L0002,
    /// Unterminated string literal.
    L0003,
    /// Invalid escape sequence.
    L0004,
    /// Char literal that is not exactly one character.
    L0005,
    /// Second decimal point in a numeral.
    L0006,
    /// Invalid character inside a numeral.
    L0007,
    /// Unterminated multi-line comment.
    L0008,
    /// Expected or unexpected token.
    P0001,
    /// Input ended inside a construct.
    P0002,
    /// Unexpected comma.
    P0003,
    /// Keyword used as a function name.
    P0004,
    /// Keyword construct the parser does not support.
    P0005,
    /// Assignment to something other than a variable.
    P0006,
    /// Expression nesting too deep.
    P0007,
}

impl ErrorCode {
    /// Returns the code as written in diagnostics, e.g. `"L0003"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::L0001 => "L0001",
            Self::L0002 => "L0002",
            Self::L0003 => "L0003",
            Self::L0004 => "L0004",
            Self::L0005 => "L0005",
            Self::L0006 => "L0006",
            Self::L0007 => "L0007",
            Self::L0008 => "L0008",
            Self::P0001 => "P0001",
            Self::P0002 => "P0002",
            Self::P0003 => "P0003",
            Self::P0004 => "P0004",
            Self::P0005 => "P0005",
            Self::P0006 => "P0006",
            Self::P0007 => "P0007",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lexical error encountered during tokenization.
///
/// The lexer does not recover: the first error ends the file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct LexError {
    /// The kind of lexical error.
    pub kind: LexErrorKind,
    /// The source location of the error.
    pub span: Span,
}

impl LexError {
    /// Creates a new lexical error.
    #[must_use]
    pub const fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Creates an "unexpected character" error.
    #[must_use]
    pub const fn unexpected_char(c: char, span: Span) -> Self {
        Self::new(LexErrorKind::UnexpectedCharacter(c), span)
    }

    /// Creates an "unterminated char literal" error anchored at the opening quote.
    #[must_use]
    pub const fn unterminated_char(span: Span) -> Self {
        Self::new(LexErrorKind::UnterminatedChar, span)
    }

    /// Creates an "unterminated string literal" error anchored at the opening quote.
    #[must_use]
    pub const fn unterminated_string(span: Span) -> Self {
        Self::new(LexErrorKind::UnterminatedString, span)
    }

    /// Creates an "unterminated multi-line comment" error.
    #[must_use]
    pub const fn unterminated_comment(span: Span) -> Self {
        Self::new(LexErrorKind::UnterminatedComment, span)
    }

    /// Returns the stable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.kind.code()
    }
}

/// The kind of lexical error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// A character that cannot start any token.
    #[error("unexpected character '{}'", .0.escape_default())]
    UnexpectedCharacter(char),

    /// A char literal was not closed before the end of the line.
    #[error("unterminated char literal")]
    UnterminatedChar,

    /// A string literal was not closed before the end of the line.
    #[error("unterminated string literal")]
    UnterminatedString,

    /// A backslash followed by a character outside the escape table.
    #[error("invalid escape sequence '\\{}'", .0.escape_default())]
    InvalidEscape(char),

    /// A char literal holding zero or several characters.
    #[error("char literal must contain exactly one character")]
    InvalidCharLiteral,

    /// A numeral with more than one decimal point.
    #[error("too many decimal points in numeral")]
    MultipleDecimalPoints,

    /// A letter or underscore inside a numeral.
    #[error("invalid character '{ch}' for {}", numeral_name(.float))]
    InvalidNumeralCharacter {
        /// The offending character.
        ch: char,
        /// Whether the numeral had already become a float.
        float: bool,
    },

    /// A `/*` comment with no matching `*/`.
    #[error("unterminated multi-line comment")]
    UnterminatedComment,
}

fn numeral_name(float: &bool) -> &'static str {
    if *float { "float" } else { "integer" }
}

impl LexErrorKind {
    /// Returns the stable code for this kind.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::UnexpectedCharacter(_) => ErrorCode::L0001,
            Self::UnterminatedChar => ErrorCode::L0002,
            Self::UnterminatedString => ErrorCode::L0003,
            Self::InvalidEscape(_) => ErrorCode::L0004,
            Self::InvalidCharLiteral => ErrorCode::L0005,
            Self::MultipleDecimalPoints => ErrorCode::L0006,
            Self::InvalidNumeralCharacter { .. } => ErrorCode::L0007,
            Self::UnterminatedComment => ErrorCode::L0008,
        }
    }
}

/// A syntax error encountered while building the tree.
///
/// `span` is `None` when input ended before the construct was complete and
/// there is no token to point at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ParseError {
    /// The kind of syntax error.
    pub kind: ParseErrorKind,
    /// The offending token's location, if there is one.
    pub span: Option<Span>,
}

impl ParseError {
    /// Creates a syntax error anchored at `span`.
    #[must_use]
    pub const fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self {
            kind,
            span: Some(span),
        }
    }

    /// Creates a syntax error with no source location.
    #[must_use]
    pub const fn unanchored(kind: ParseErrorKind) -> Self {
        Self { kind, span: None }
    }

    /// Creates an "expected X, got Y" error.
    #[must_use]
    pub fn expected(expected: impl Into<EcoString>, found: impl Into<EcoString>, span: Span) -> Self {
        Self::new(
            ParseErrorKind::Expected {
                expected: expected.into(),
                found: found.into(),
            },
            span,
        )
    }

    /// Creates an "unterminated X" error for input that ended too early.
    #[must_use]
    pub const fn unterminated(construct: &'static str) -> Self {
        Self::unanchored(ParseErrorKind::Unterminated(construct))
    }

    /// Returns the stable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.kind.code()
    }
}

/// The kind of syntax error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A specific token was required.
    #[error("expected {expected}, got {found}")]
    Expected {
        /// What the grammar required.
        expected: EcoString,
        /// Description of the token that was there instead.
        found: EcoString,
    },

    /// A token that cannot appear here.
    #[error("unexpected {0}")]
    Unexpected(EcoString),

    /// Input ended inside a construct.
    #[error("unterminated {0}")]
    Unterminated(&'static str),

    /// A leading or doubled comma.
    #[error("unexpected comma")]
    UnexpectedComma,

    /// `fn` followed by a reserved word.
    #[error("functions are not allowed keywords as their names, got '{0}'")]
    KeywordAsFunctionName(EcoString),

    /// A keyword with no supported construct.
    #[error("unsupported keyword construct '{0}'")]
    UnsupportedKeyword(EcoString),

    /// Assignment whose left-hand side is not a variable.
    #[error("invalid assignment target, expected a variable")]
    InvalidAssignmentTarget,

    /// Expression nesting past the parser's limit.
    #[error("expression nesting is too deep (maximum {0} levels)")]
    NestingTooDeep(usize),
}

impl ParseErrorKind {
    /// Returns the stable code for this kind.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Expected { .. } | Self::Unexpected(_) => ErrorCode::P0001,
            Self::Unterminated(_) => ErrorCode::P0002,
            Self::UnexpectedComma => ErrorCode::P0003,
            Self::KeywordAsFunctionName(_) => ErrorCode::P0004,
            Self::UnsupportedKeyword(_) => ErrorCode::P0005,
            Self::InvalidAssignmentTarget => ErrorCode::P0006,
            Self::NestingTooDeep(_) => ErrorCode::P0007,
        }
    }
}

/// Any user-facing error from lexing or parsing one file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// Failure inside the lexer.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// Failure inside the parser.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    /// Returns the stable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Lex(error) => error.code(),
            Self::Parse(error) => error.code(),
        }
    }

    /// Returns the source location, if the error has one.
    #[must_use]
    pub const fn span(&self) -> Option<Span> {
        match self {
            Self::Lex(error) => Some(error.span),
            Self::Parse(error) => error.span,
        }
    }
}

/// Aborts on a broken internal invariant.
///
/// Reserved for programmer mistakes; malformed source is always reported
/// through [`SyntaxError`].
#[macro_export]
macro_rules! internal_error {
    ($($arg:tt)+) => {
        panic!(
            "internal error in {} ({}:{}): {}",
            module_path!(),
            file!(),
            line!(),
            format_args!($($arg)+)
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_display() {
        let err = LexError::unexpected_char('$', Span::point(1, 2));
        assert_eq!(err.to_string(), "unexpected character '$'");
        assert_eq!(err.code(), ErrorCode::L0001);

        let err = LexError::unterminated_string(Span::point(3, 0));
        assert_eq!(err.to_string(), "unterminated string literal");
        assert_eq!(err.code(), ErrorCode::L0003);
    }

    #[test]
    fn numeral_error_names_the_numeral_kind() {
        let kind = LexErrorKind::InvalidNumeralCharacter {
            ch: 'x',
            float: false,
        };
        assert_eq!(kind.to_string(), "invalid character 'x' for integer");
        let kind = LexErrorKind::InvalidNumeralCharacter {
            ch: '_',
            float: true,
        };
        assert_eq!(kind.to_string(), "invalid character '_' for float");
    }

    #[test]
    fn invalid_escape_display() {
        let kind = LexErrorKind::InvalidEscape('q');
        assert_eq!(kind.to_string(), "invalid escape sequence '\\q'");
        assert_eq!(kind.code(), ErrorCode::L0004);
    }

    #[test]
    fn parse_error_codes() {
        assert_eq!(
            ParseError::expected("'('", "'{'", Span::point(1, 7)).code(),
            ErrorCode::P0001
        );
        assert_eq!(ParseError::unterminated("parameters").code(), ErrorCode::P0002);
        assert_eq!(
            ParseError::new(ParseErrorKind::UnexpectedComma, Span::point(1, 7)).code(),
            ErrorCode::P0003
        );
    }

    #[test]
    fn unterminated_has_no_span() {
        let err = ParseError::unterminated("parameters");
        assert_eq!(err.span, None);
        assert_eq!(err.to_string(), "unterminated parameters");
    }

    #[test]
    fn syntax_error_forwards_code_and_span() {
        let err: SyntaxError = LexError::unterminated_char(Span::point(2, 4)).into();
        assert_eq!(err.code(), ErrorCode::L0002);
        assert_eq!(err.span(), Some(Span::point(2, 4)));
        assert_eq!(err.to_string(), "unterminated char literal");

        let err: SyntaxError = ParseError::unterminated("function declaration").into();
        assert_eq!(err.code(), ErrorCode::P0002);
        assert_eq!(err.span(), None);
    }

    #[test]
    fn error_code_display() {
        assert_eq!(ErrorCode::L0008.to_string(), "L0008");
        assert_eq!(ErrorCode::P0007.as_str(), "P0007");
    }

    #[test]
    #[should_panic(expected = "internal error in")]
    fn internal_error_panics() {
        crate::internal_error!("bad state {}", 1);
    }
}
