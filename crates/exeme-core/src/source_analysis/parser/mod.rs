// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parser for Exeme source code.
//!
//! The parser is recursive descent over a pull-based [`Lexer`]: it asks for
//! tokens as it needs them and hands back at most one it over-read
//! ([`Lexer::un_lex`]). Each call to [`Parser::parse`] recognizes one
//! top-level construct and builds its node in the same step; there is no
//! separate parse tree.
//!
//! # Constructs
//!
//! - `fn name(a, b: type) -> type {` function headers
//! - `return [expr]`, `pass`, `break`
//! - `{` and `}` block boundaries
//! - expression statements, one per line
//!
//! # Operator Precedence
//!
//! Binary operators use Pratt parsing. Binding powers come from
//! [`TokenKind::precedence`] and [`TokenKind::associativity`], so the token
//! model is the single source of truth for the table:
//!
//! | Tier | Operators | Associativity |
//! |------|-----------|---------------|
//! | Assignment | `=` `+=` `**=` ... | Right |
//! | Logical | `&&` `\|\|` | Left |
//! | Equality | `==` `!=` | Left |
//! | Relational | `<` `>` `<=` `>=` | Left |
//! | Shift | `<<` `>>` | Left |
//! | Additive | `+` `-` `&` `\|` `^` | Left |
//! | Multiplicative | `*` `/` `//` `%` | Left |
//! | Exponent | `**` | Right |
//! | Member | `.` `->` `@` `::` | Left |
//!
//! A comma never joins two operands; it ends the expression so argument
//! lists can split on it.
//!
//! # Lines
//!
//! An expression statement ends at the end of its line, or before a `}` on
//! the same line. Inside `( )` and `[ ]` it may continue over several lines.
//! Function headers may be split over lines anywhere after `fn`.
//!
//! # Errors
//!
//! Parsing stops at the first error. Errors point at the offending token,
//! or carry no location when input ended inside a construct.
//!
//! # Example
//!
//! ```
//! use exeme_core::ast::Node;
//! use exeme_core::source_analysis::parse;
//!
//! let module = parse("fn add(a: int, b: int) -> int {\n    return a + b\n}").unwrap();
//! assert_eq!(module.nodes.len(), 3);
//! assert!(matches!(module.nodes[0], Node::FunctionDefinition(_)));
//! ```

use ecow::{EcoString, eco_format};
use tracing::debug;

use crate::ast::{Module, Node};

use super::{
    Lexer, ParseError, ParseErrorKind, Precedence, SyntaxError, Token, TokenKind,
};

mod declarations;
mod expressions;

#[cfg(test)]
mod property_tests;

// ============================================================================
// Binding Power
// ============================================================================

/// Binding power for Pratt parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct BindingPower {
    /// Left binding power (how tightly this operator binds to its left operand).
    pub(super) left: u8,
    /// Right binding power (how tightly this operator binds to its right operand).
    pub(super) right: u8,
}

impl BindingPower {
    /// Creates a left-associative binding power.
    const fn left_assoc(precedence: u8) -> Self {
        Self {
            left: precedence,
            right: precedence + 1,
        }
    }

    /// Creates a right-associative binding power.
    const fn right_assoc(precedence: u8) -> Self {
        Self {
            left: precedence + 1,
            right: precedence,
        }
    }
}

/// Spreads tiers apart so `left_assoc`/`right_assoc` never collide.
const fn tier_level(precedence: Precedence) -> u8 {
    (precedence as u8 + 1) * 10
}

/// Minimum binding power for the operand of a prefix operator.
pub(super) const PREFIX_BINDING_POWER: u8 = tier_level(Precedence::Unary);

/// Gets the binding power for a binary operator.
///
/// Returns `None` for tokens that end an expression: non-operators, the
/// comma separator and the prefix-only `!` and `~`.
pub(super) fn binary_binding_power(kind: &TokenKind) -> Option<BindingPower> {
    let precedence = kind.precedence()?;
    if matches!(precedence, Precedence::Separator | Precedence::Unary) {
        return None;
    }
    let level = tier_level(precedence);
    Some(match kind.associativity() {
        super::Associativity::Left => BindingPower::left_assoc(level),
        super::Associativity::Right => BindingPower::right_assoc(level),
    })
}

/// Maximum nesting depth for expressions before the parser bails out.
///
/// Each level costs several stack frames. `stacker::maybe_grow` at the
/// recursive entry point backs this up.
const MAX_NESTING_DEPTH: usize = 64;

/// Describes a token for error messages: `'('`, `identifier 'x'`.
pub(super) fn describe(token: &Token) -> EcoString {
    let kind = token.kind();
    match kind.symbol() {
        Some(symbol) => eco_format!("'{symbol}'"),
        None if kind.is_comment() => kind.name().into(),
        None => eco_format!("{} '{kind}'", kind.name()),
    }
}

// ============================================================================
// Parser
// ============================================================================

/// A parser over one source file.
///
/// # Examples
///
/// ```
/// use exeme_core::source_analysis::Parser;
///
/// let mut parser = Parser::new("x = 1\ny = 2");
/// assert!(parser.parse().unwrap());
/// assert_eq!(parser.result().unwrap().description(), "assignment");
/// assert!(parser.parse().unwrap());
/// assert!(!parser.parse().unwrap());
/// ```
#[derive(Debug)]
pub struct Parser<'src> {
    /// The token source.
    lexer: Lexer<'src>,
    /// The node built by the last successful `parse`.
    result: Option<Node>,
    /// Open `(` and `[` in the expression being parsed.
    open_delimiters: usize,
    /// Current expression nesting depth.
    nesting_depth: usize,
}

impl<'src> Parser<'src> {
    /// Creates a parser for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self::with_lexer(Lexer::new(source))
    }

    /// Creates a parser that pulls from an existing lexer.
    #[must_use]
    pub fn with_lexer(lexer: Lexer<'src>) -> Self {
        Self {
            lexer,
            result: None,
            open_delimiters: 0,
            nesting_depth: 0,
        }
    }

    /// Returns the node built by the last successful [`Parser::parse`].
    #[must_use]
    pub fn result(&self) -> Option<&Node> {
        self.result.as_ref()
    }

    /// Moves the last node out of the result slot.
    pub fn take_result(&mut self) -> Option<Node> {
        self.result.take()
    }

    /// Returns the tokens of the construct parsed last.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        self.lexer.tokens()
    }

    /// Parses the next top-level construct into the result slot.
    ///
    /// Returns `Ok(false)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns the first lexical or syntax error. The parser should not be
    /// used after an error.
    pub fn parse(&mut self) -> Result<bool, SyntaxError> {
        self.lexer.clear_tokens();
        self.open_delimiters = 0;
        let Some(token) = self.advance(true)? else {
            return Ok(false);
        };
        let node = match token.kind() {
            TokenKind::Keyword(_) => self.parse_keyword(token)?,
            TokenKind::OpenCurlyBrace => Node::OpenCurlyBrace(token),
            TokenKind::CloseCurlyBrace => Node::CloseCurlyBrace(token),
            kind if expressions::starts_expression(kind) => {
                self.lexer.un_lex();
                self.parse_expression_statement()?
            }
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::Unexpected(describe(&token)),
                    token.span(),
                )
                .into());
            }
        };
        debug!(
            "parsed {} at line {}",
            node.description(),
            node.span().line()
        );
        self.result = Some(node);
        Ok(true)
    }

    /// Parses every remaining construct.
    ///
    /// # Errors
    ///
    /// Returns the first lexical or syntax error.
    pub fn parse_module(mut self) -> Result<Module, SyntaxError> {
        let mut nodes = Vec::new();
        while self.parse()? {
            if let Some(node) = self.result.take() {
                nodes.push(node);
            }
        }
        Ok(Module::new(nodes))
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Consumes the next token, if there is one.
    pub(super) fn advance(&mut self, next_line: bool) -> Result<Option<Token>, SyntaxError> {
        if self.lexer.lex(next_line)? {
            Ok(self.lexer.last_token().cloned())
        } else {
            Ok(None)
        }
    }

    /// Consumes the next token of an unfinished construct.
    ///
    /// End of input here is an "unterminated `construct`" error.
    pub(super) fn expect_token(&mut self, construct: &'static str) -> Result<Token, SyntaxError> {
        self.advance(true)?
            .ok_or_else(|| ParseError::unterminated(construct).into())
    }

    /// Consumes the next token if it has the given kind.
    pub(super) fn match_token(
        &mut self,
        kind: &TokenKind,
        next_line: bool,
    ) -> Result<Option<Token>, SyntaxError> {
        match self.advance(next_line)? {
            Some(token) if token.kind() == kind => Ok(Some(token)),
            Some(_) => {
                self.lexer.un_lex();
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Checks that nothing but an optional `}` follows on the current line.
    pub(super) fn expect_statement_end(&mut self) -> Result<(), SyntaxError> {
        match self.advance(false)? {
            None => Ok(()),
            Some(token) if token.kind() == &TokenKind::CloseCurlyBrace => {
                self.lexer.un_lex();
                Ok(())
            }
            Some(token) => {
                Err(ParseError::expected("end of line", describe(&token), token.span()).into())
            }
        }
    }

    /// Whether the expression in progress may continue on the next line.
    pub(super) const fn continues_across_lines(&self) -> bool {
        self.open_delimiters > 0
    }

    /// Increments the nesting depth, failing past [`MAX_NESTING_DEPTH`].
    ///
    /// Pair every `Ok` with [`Parser::leave_nesting`].
    pub(super) fn enter_nesting(&mut self) -> Result<(), SyntaxError> {
        self.nesting_depth += 1;
        if self.nesting_depth > MAX_NESTING_DEPTH {
            self.nesting_depth -= 1;
            return Err(ParseError {
                kind: ParseErrorKind::NestingTooDeep(MAX_NESTING_DEPTH),
                span: self.lexer.last_token().map(Token::span),
            }
            .into());
        }
        Ok(())
    }

    /// Decrements the nesting depth (pair with [`Parser::enter_nesting`]).
    pub(super) fn leave_nesting(&mut self) {
        debug_assert!(
            self.nesting_depth > 0,
            "leave_nesting called without matching enter_nesting"
        );
        self.nesting_depth = self.nesting_depth.saturating_sub(1);
    }
}

/// Parses a whole source string.
///
/// # Errors
///
/// Returns the first lexical or syntax error.
pub fn parse(source: &str) -> Result<Module, SyntaxError> {
    Parser::new(source).parse_module()
}
