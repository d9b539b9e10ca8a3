// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Expression parsing for Exeme.
//!
//! Expression parsing handles:
//!
//! - Literals and variable references (`*p` marks a dereference)
//! - Prefix operators (`-` `!` `~`)
//! - Binary operators and assignment, by Pratt parsing
//! - Calls `f(a, b)`, indexing `a[i]` and parenthesised groups

use crate::ast::{Literal, Node, Variable};
use crate::source_analysis::{ParseError, ParseErrorKind, SyntaxError, Token, TokenKind};

use super::{PREFIX_BINDING_POWER, Parser, binary_binding_power, describe};

/// Returns true if a token of this kind can begin an expression.
pub(super) const fn starts_expression(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier(_)
            | TokenKind::Char(_)
            | TokenKind::String(_)
            | TokenKind::Integer(_)
            | TokenKind::Float(_)
            | TokenKind::OpenParen
            | TokenKind::Multiplication
            | TokenKind::Subtraction
            | TokenKind::LogicalNot
            | TokenKind::BitwiseNot
    )
}

impl Parser<'_> {
    // ========================================================================
    // Expression Parsing
    // ========================================================================

    /// Parses an expression that must fill the rest of its line.
    pub(super) fn parse_expression_statement(&mut self) -> Result<Node, SyntaxError> {
        let node = self.parse_expression(0)?;
        self.expect_statement_end()?;
        Ok(node)
    }

    /// Parses an expression whose operators bind at least `min_bp`.
    ///
    /// Uses `stacker::maybe_grow` to extend the stack on the heap if
    /// remaining stack space falls below 32 KiB.
    pub(super) fn parse_expression(&mut self, min_bp: u8) -> Result<Node, SyntaxError> {
        stacker::maybe_grow(32 * 1024, 256 * 1024, || {
            self.enter_nesting()?;
            let result = self.parse_binary_with_pratt(min_bp);
            self.leave_nesting();
            result
        })
    }

    /// Parses binary operators using Pratt parsing (precedence climbing).
    ///
    /// Assignment goes through the same loop; its target must be a plain
    /// or dereferenced variable.
    fn parse_binary_with_pratt(&mut self, min_bp: u8) -> Result<Node, SyntaxError> {
        let mut left = self.parse_prefix()?;

        loop {
            let Some(operator) = self.advance(self.continues_across_lines())? else {
                break;
            };

            // Unknown operators and commas end the expression
            let Some(bp) = binary_binding_power(operator.kind()) else {
                self.lexer.un_lex();
                break;
            };

            // Stop if this operator binds less tightly than our minimum
            if bp.left < min_bp {
                self.lexer.un_lex();
                break;
            }

            let right = self.parse_expression(bp.right)?;

            left = if operator.kind().is_assignment() {
                let Node::Variable(target) = left else {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidAssignmentTarget,
                        left.span(),
                    )
                    .into());
                };
                Node::Assignment {
                    operator,
                    target,
                    value: Box::new(right),
                }
            } else {
                Node::Binary {
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                }
            };
        }

        Ok(left)
    }

    /// Consumes the token that starts an operand.
    fn expect_operand(&mut self) -> Result<Token, SyntaxError> {
        if let Some(token) = self.advance(self.continues_across_lines())? {
            return Ok(token);
        }
        if self.continues_across_lines() {
            return Err(ParseError::unterminated("expression").into());
        }
        Err(ParseError {
            kind: ParseErrorKind::Expected {
                expected: "expression".into(),
                found: "end of line".into(),
            },
            span: self.lexer.last_token().map(Token::span),
        }
        .into())
    }

    /// Parses a prefix operator or primary, followed by any calls and indexes.
    fn parse_prefix(&mut self) -> Result<Node, SyntaxError> {
        let token = self.expect_operand()?;
        let node = match token.kind() {
            TokenKind::Multiplication => {
                let name = self.expect_operand()?;
                let found = describe(&name);
                let span = name.span();
                Node::Variable(Variable::new(name, Some(token)).ok_or_else(|| {
                    ParseError::expected("identifier after '*'", found, span)
                })?)
            }
            TokenKind::Subtraction | TokenKind::LogicalNot | TokenKind::BitwiseNot => {
                let operand = self.parse_expression(PREFIX_BINDING_POWER)?;
                return Ok(Node::Unary {
                    operator: token,
                    operand: Box::new(operand),
                });
            }
            TokenKind::Identifier(_) => match Variable::new(token, None) {
                Some(variable) => Node::Variable(variable),
                None => crate::internal_error!("identifier token rejected as variable"),
            },
            kind if kind.is_literal() => match Literal::new(token) {
                Some(literal) => Node::Literal(literal),
                None => crate::internal_error!("literal token rejected as literal"),
            },
            TokenKind::OpenParen => self.parse_group(token)?,
            _ => {
                return Err(
                    ParseError::expected("expression", describe(&token), token.span()).into(),
                );
            }
        };
        self.parse_postfix(node)
    }

    /// Parses `( expr )`; the `(` is already consumed.
    fn parse_group(&mut self, open: Token) -> Result<Node, SyntaxError> {
        self.open_delimiters += 1;
        let inner = self.parse_expression(0)?;
        let close = self.expect_closing(&TokenKind::CloseParen, "parenthesised expression")?;
        self.open_delimiters -= 1;
        Ok(Node::Group {
            open,
            inner: Box::new(inner),
            close,
        })
    }

    /// Parses trailing `(args)` and `[index]` suffixes.
    fn parse_postfix(&mut self, mut node: Node) -> Result<Node, SyntaxError> {
        loop {
            let Some(token) = self.advance(self.continues_across_lines())? else {
                return Ok(node);
            };
            node = match token.kind() {
                TokenKind::OpenParen => self.parse_call(node, token)?,
                TokenKind::OpenSquareBracket => {
                    self.open_delimiters += 1;
                    let index = self.parse_expression(0)?;
                    let close = self.expect_closing(&TokenKind::CloseSquareBracket, "index")?;
                    self.open_delimiters -= 1;
                    Node::Index {
                        target: Box::new(node),
                        open: token,
                        index: Box::new(index),
                        close,
                    }
                }
                _ => {
                    self.lexer.un_lex();
                    return Ok(node);
                }
            };
        }
    }

    /// Parses a comma-separated argument list; the `(` is already consumed.
    fn parse_call(&mut self, callee: Node, open: Token) -> Result<Node, SyntaxError> {
        self.open_delimiters += 1;
        let mut arguments = Vec::new();
        let close = match self.match_token(&TokenKind::CloseParen, true)? {
            Some(close) => close,
            None => loop {
                arguments.push(self.parse_expression(0)?);
                let token = self.expect_token("call arguments")?;
                match token.kind() {
                    TokenKind::Comma => {}
                    TokenKind::CloseParen => break token,
                    _ => {
                        return Err(ParseError::expected(
                            "',' or ')'",
                            describe(&token),
                            token.span(),
                        )
                        .into());
                    }
                }
            },
        };
        self.open_delimiters -= 1;
        Ok(Node::Call {
            callee: Box::new(callee),
            open,
            arguments,
            close,
        })
    }

    /// Consumes the closing delimiter of `construct`.
    fn expect_closing(
        &mut self,
        kind: &TokenKind,
        construct: &'static str,
    ) -> Result<Token, SyntaxError> {
        let token = self.expect_token(construct)?;
        if token.kind() == kind {
            return Ok(token);
        }
        let expected = kind.symbol().unwrap_or_default();
        Err(ParseError::expected(
            ecow::eco_format!("'{expected}'"),
            describe(&token),
            token.span(),
        )
        .into())
    }
}
