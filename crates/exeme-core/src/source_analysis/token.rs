// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Token types for Exeme lexical analysis.
//!
//! This module defines the closed set of token kinds produced by the lexer,
//! their display names, and the precedence tiers the expression parser uses
//! to decide which of two adjacent operators binds first.
//!
//! # Token Structure
//!
//! Each token consists of:
//! - A [`TokenKind`] indicating the type of token (and, for identifiers,
//!   keywords and literals, its value)
//! - A [`Span`] giving its line and character columns

use ecow::EcoString;

use super::Span;

/// Reserved words. An identifier spelled like one of these lexes as
/// [`TokenKind::Keyword`].
pub const KEYWORDS: &[&str] = &[
    "break", "case", "class", "elif", "else", "enum", "fn", "for", "if", "import", "match",
    "pass", "return", "using", "while",
];

/// Returns `true` if `text` is a reserved word.
#[must_use]
pub fn is_keyword(text: &str) -> bool {
    KEYWORDS.contains(&text)
}

/// The kind of token, not including source location.
///
/// Only identifiers, keywords and literals carry a value; every other kind
/// is fully described by its discriminant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // === Words ===
    /// A reserved word: `fn`, `return`, `while`
    Keyword(EcoString),
    /// An identifier: `foo`, `_tmp`, `x1`
    Identifier(EcoString),

    // === Literals ===
    /// A character literal with escapes resolved: `'a'`, `'\n'`
    Char(char),
    /// A string literal with escapes resolved: `"a\tb"`
    String(EcoString),
    /// An integer literal: `42`
    Integer(EcoString),
    /// A float literal: `3.14`
    Float(EcoString),

    // === Arithmetic operators ===
    /// `%`
    Modulo,
    /// `*`
    Multiplication,
    /// `**`
    Exponent,
    /// `/`
    Division,
    /// `//`
    FloorDivision,
    /// `+`
    Addition,
    /// `-`
    Subtraction,

    // === Comparison operators ===
    /// `==`
    EqualTo,
    /// `!=`
    NotEqualTo,
    /// `>`
    GreaterThan,
    /// `<`
    LessThan,
    /// `>=`
    GreaterThanOrEqual,
    /// `<=`
    LessThanOrEqual,

    // === Logical operators ===
    /// `&&`
    LogicalAnd,
    /// `||`
    LogicalOr,
    /// `!`
    LogicalNot,

    // === Bitwise operators ===
    /// `&`
    BitwiseAnd,
    /// `|`
    BitwiseOr,
    /// `^`
    BitwiseXor,
    /// `~`
    BitwiseNot,
    /// `<<`
    LeftShift,
    /// `>>`
    RightShift,

    // === Assignment operators ===
    /// `=`
    Assignment,
    /// `%=`
    ModuloAssignment,
    /// `*=`
    MultiplicationAssignment,
    /// `**=`
    ExponentAssignment,
    /// `/=`
    DivisionAssignment,
    /// `//=`
    FloorDivisionAssignment,
    /// `+=`
    AdditionAssignment,
    /// `-=`
    SubtractionAssignment,
    /// `&=`
    BitwiseAndAssignment,
    /// `|=`
    BitwiseOrAssignment,
    /// `^=`
    BitwiseXorAssignment,
    /// `~=`
    BitwiseNotAssignment,
    /// `<<=`
    LeftShiftAssignment,
    /// `>>=`
    RightShiftAssignment,

    // === Member / pointer operators ===
    /// `.`
    Dot,
    /// `->`
    Arrow,
    /// `@`
    At,

    // === Delimiters ===
    /// `(`
    OpenParen,
    /// `[`
    OpenSquareBracket,
    /// `{`
    OpenCurlyBrace,
    /// `)`
    CloseParen,
    /// `]`
    CloseSquareBracket,
    /// `}`
    CloseCurlyBrace,

    // === Punctuation ===
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `::`
    ScopeResolution,

    // === Comments ===
    /// `# ...` up to the end of the line
    SingleLineComment,
    /// `/* ... */`, possibly spanning several lines
    MultiLineComment,
}

/// Precedence tiers, ordered from loosest to tightest binding.
///
/// Operators sharing a tier associate according to
/// [`TokenKind::associativity`], which is left-to-right except for `**` and
/// the assignment family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    /// `,`
    Separator,
    /// `=` and every compound assignment
    Assignment,
    /// `&&` `||`
    Logical,
    /// `==` `!=`
    Equality,
    /// `<` `>` `<=` `>=`
    Relational,
    /// `<<` `>>`
    Shift,
    /// `+` `-` `&` `|` `^`
    Additive,
    /// `*` `/` `//` `%`
    Multiplicative,
    /// `**`
    Exponent,
    /// `!` `~`
    Unary,
    /// `.` `->` `@` `::`
    Member,
}

/// How operators of the same precedence group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    /// `a - b - c` is `(a - b) - c`
    Left,
    /// `a = b = c` is `a = (b = c)`
    Right,
}

impl TokenKind {
    /// Returns the fixed human-readable name of this kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use exeme_core::source_analysis::TokenKind;
    ///
    /// assert_eq!(TokenKind::Exponent.name(), "exponent operator");
    /// assert_eq!(TokenKind::Identifier("x".into()).name(), "identifier");
    /// ```
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Keyword(_) => "keyword",
            Self::Identifier(_) => "identifier",
            Self::Char(_) => "char",
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Modulo => "modulo operator",
            Self::Multiplication => "multiplication operator",
            Self::Exponent => "exponent operator",
            Self::Division => "division operator",
            Self::FloorDivision => "floor division operator",
            Self::Addition => "addition operator",
            Self::Subtraction => "subtraction operator",
            Self::EqualTo => "equal to operator",
            Self::NotEqualTo => "not equal to operator",
            Self::GreaterThan => "greater than operator",
            Self::LessThan => "less than operator",
            Self::GreaterThanOrEqual => "greater than or equal operator",
            Self::LessThanOrEqual => "less than or equal operator",
            Self::LogicalAnd => "logical and operator",
            Self::LogicalOr => "logical or operator",
            Self::LogicalNot => "logical not operator",
            Self::BitwiseAnd => "bitwise AND operator",
            Self::BitwiseOr => "bitwise OR operator",
            Self::BitwiseXor => "bitwise XOR operator",
            Self::BitwiseNot => "bitwise NOT operator",
            Self::LeftShift => "bitwise left shift operator",
            Self::RightShift => "bitwise right shift operator",
            Self::Assignment => "assignment operator",
            Self::ModuloAssignment => "modulo assignment operator",
            Self::MultiplicationAssignment => "multiplication assignment operator",
            Self::ExponentAssignment => "exponent assignment operator",
            Self::DivisionAssignment => "division assignment operator",
            Self::FloorDivisionAssignment => "floor division assignment operator",
            Self::AdditionAssignment => "addition assignment operator",
            Self::SubtractionAssignment => "subtraction assignment operator",
            Self::BitwiseAndAssignment => "bitwise AND assignment operator",
            Self::BitwiseOrAssignment => "bitwise OR assignment operator",
            Self::BitwiseXorAssignment => "bitwise XOR assignment operator",
            Self::BitwiseNotAssignment => "bitwise NOT assignment operator",
            Self::LeftShiftAssignment => "bitwise left shift assignment operator",
            Self::RightShiftAssignment => "bitwise right shift assignment operator",
            Self::Dot => "dot operator",
            Self::Arrow => "arrow operator",
            Self::At => "at operator",
            Self::OpenParen => "open parenthesis",
            Self::OpenSquareBracket => "open square bracket",
            Self::OpenCurlyBrace => "open curly brace",
            Self::CloseParen => "close parenthesis",
            Self::CloseSquareBracket => "close square bracket",
            Self::CloseCurlyBrace => "close curly brace",
            Self::Comma => "comma",
            Self::Colon => "colon",
            Self::ScopeResolution => "scope resolution operator",
            Self::SingleLineComment => "single line comment",
            Self::MultiLineComment => "multi line comment",
        }
    }

    /// Returns the source spelling of fixed-text kinds.
    #[must_use]
    pub const fn symbol(&self) -> Option<&'static str> {
        let symbol = match self {
            Self::Keyword(_)
            | Self::Identifier(_)
            | Self::Char(_)
            | Self::String(_)
            | Self::Integer(_)
            | Self::Float(_)
            | Self::SingleLineComment
            | Self::MultiLineComment => return None,
            Self::Modulo => "%",
            Self::Multiplication => "*",
            Self::Exponent => "**",
            Self::Division => "/",
            Self::FloorDivision => "//",
            Self::Addition => "+",
            Self::Subtraction => "-",
            Self::EqualTo => "==",
            Self::NotEqualTo => "!=",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThanOrEqual => "<=",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::LogicalNot => "!",
            Self::BitwiseAnd => "&",
            Self::BitwiseOr => "|",
            Self::BitwiseXor => "^",
            Self::BitwiseNot => "~",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::Assignment => "=",
            Self::ModuloAssignment => "%=",
            Self::MultiplicationAssignment => "*=",
            Self::ExponentAssignment => "**=",
            Self::DivisionAssignment => "/=",
            Self::FloorDivisionAssignment => "//=",
            Self::AdditionAssignment => "+=",
            Self::SubtractionAssignment => "-=",
            Self::BitwiseAndAssignment => "&=",
            Self::BitwiseOrAssignment => "|=",
            Self::BitwiseXorAssignment => "^=",
            Self::BitwiseNotAssignment => "~=",
            Self::LeftShiftAssignment => "<<=",
            Self::RightShiftAssignment => ">>=",
            Self::Dot => ".",
            Self::Arrow => "->",
            Self::At => "@",
            Self::OpenParen => "(",
            Self::OpenSquareBracket => "[",
            Self::OpenCurlyBrace => "{",
            Self::CloseParen => ")",
            Self::CloseSquareBracket => "]",
            Self::CloseCurlyBrace => "}",
            Self::Comma => ",",
            Self::Colon => ":",
            Self::ScopeResolution => "::",
        };
        Some(symbol)
    }

    /// Returns the precedence tier of an operator, or `None` for kinds that
    /// never act as operators.
    #[must_use]
    pub const fn precedence(&self) -> Option<Precedence> {
        let precedence = match self {
            Self::Comma => Precedence::Separator,
            Self::Assignment
            | Self::ModuloAssignment
            | Self::MultiplicationAssignment
            | Self::ExponentAssignment
            | Self::DivisionAssignment
            | Self::FloorDivisionAssignment
            | Self::AdditionAssignment
            | Self::SubtractionAssignment
            | Self::BitwiseAndAssignment
            | Self::BitwiseOrAssignment
            | Self::BitwiseXorAssignment
            | Self::BitwiseNotAssignment
            | Self::LeftShiftAssignment
            | Self::RightShiftAssignment => Precedence::Assignment,
            Self::LogicalAnd | Self::LogicalOr => Precedence::Logical,
            Self::EqualTo | Self::NotEqualTo => Precedence::Equality,
            Self::GreaterThan
            | Self::LessThan
            | Self::GreaterThanOrEqual
            | Self::LessThanOrEqual => Precedence::Relational,
            Self::LeftShift | Self::RightShift => Precedence::Shift,
            Self::Addition
            | Self::Subtraction
            | Self::BitwiseAnd
            | Self::BitwiseOr
            | Self::BitwiseXor => Precedence::Additive,
            Self::Multiplication | Self::Division | Self::FloorDivision | Self::Modulo => {
                Precedence::Multiplicative
            }
            Self::Exponent => Precedence::Exponent,
            Self::LogicalNot | Self::BitwiseNot => Precedence::Unary,
            Self::Dot | Self::Arrow | Self::At | Self::ScopeResolution => Precedence::Member,
            Self::Keyword(_)
            | Self::Identifier(_)
            | Self::Char(_)
            | Self::String(_)
            | Self::Integer(_)
            | Self::Float(_)
            | Self::OpenParen
            | Self::OpenSquareBracket
            | Self::OpenCurlyBrace
            | Self::CloseParen
            | Self::CloseSquareBracket
            | Self::CloseCurlyBrace
            | Self::Colon
            | Self::SingleLineComment
            | Self::MultiLineComment => return None,
        };
        Some(precedence)
    }

    /// Returns how operators of this kind group with their own tier.
    #[must_use]
    pub const fn associativity(&self) -> Associativity {
        if self.is_assignment() || matches!(self, Self::Exponent) {
            Associativity::Right
        } else {
            Associativity::Left
        }
    }

    /// Returns the compound-assignment kind formed by appending `=`.
    ///
    /// `*` becomes `*=`, `**` becomes `**=`, and so on. Kinds without an
    /// assignment form return `None`.
    #[must_use]
    pub const fn with_assignment(&self) -> Option<Self> {
        let kind = match self {
            Self::Modulo => Self::ModuloAssignment,
            Self::Multiplication => Self::MultiplicationAssignment,
            Self::Exponent => Self::ExponentAssignment,
            Self::Division => Self::DivisionAssignment,
            Self::FloorDivision => Self::FloorDivisionAssignment,
            Self::Addition => Self::AdditionAssignment,
            Self::Subtraction => Self::SubtractionAssignment,
            Self::BitwiseAnd => Self::BitwiseAndAssignment,
            Self::BitwiseOr => Self::BitwiseOrAssignment,
            Self::BitwiseXor => Self::BitwiseXorAssignment,
            Self::BitwiseNot => Self::BitwiseNotAssignment,
            Self::LeftShift => Self::LeftShiftAssignment,
            Self::RightShift => Self::RightShiftAssignment,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns `true` for `=` and every compound assignment.
    #[must_use]
    pub const fn is_assignment(&self) -> bool {
        matches!(self.precedence(), Some(Precedence::Assignment))
    }

    /// Returns `true` if this token is a literal value.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::Char(_) | Self::String(_) | Self::Integer(_) | Self::Float(_)
        )
    }

    /// Returns `true` if this token is an identifier.
    #[must_use]
    pub const fn is_identifier(&self) -> bool {
        matches!(self, Self::Identifier(_))
    }

    /// Returns `true` if this token is a keyword.
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(self, Self::Keyword(_))
    }

    /// Returns `true` for both comment kinds.
    #[must_use]
    pub const fn is_comment(&self) -> bool {
        matches!(self, Self::SingleLineComment | Self::MultiLineComment)
    }

    /// Returns the string value carried by identifiers, keywords and
    /// string-like literals.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Keyword(s)
            | Self::Identifier(s)
            | Self::String(s)
            | Self::Integer(s)
            | Self::Float(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keyword(s) | Self::Identifier(s) | Self::Integer(s) | Self::Float(s) => {
                write!(f, "{s}")
            }
            Self::String(s) => write!(f, "\"{}\"", s.escape_default()),
            Self::Char(c) => write!(f, "'{}'", c.escape_default()),
            Self::SingleLineComment => write!(f, "#"),
            Self::MultiLineComment => write!(f, "/* */"),
            other => write!(f, "{}", other.symbol().unwrap_or_default()),
        }
    }
}

/// A token with its source location.
///
/// # Examples
///
/// ```
/// use exeme_core::source_analysis::{Span, Token, TokenKind};
///
/// let token = Token::new(TokenKind::Identifier("foo".into()), Span::new(1, 0, 2));
/// assert!(token.kind().is_identifier());
/// assert_eq!(token.span().width(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the kind of this token.
    #[must_use]
    pub const fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// Consumes the token and returns its kind.
    #[must_use]
    pub fn into_kind(self) -> TokenKind {
        self.kind
    }

    /// Returns the source span of this token.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Returns the 1-based line this token starts on.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.span.line()
    }
}
