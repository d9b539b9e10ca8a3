// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Keyword-triggered constructs.
//!
//! Keywords dispatch by their text:
//!
//! - `fn` → function header, up to and including the body's `{`
//! - `return` → optional value on the same line
//! - `pass` and `break` → bare statements

use crate::ast::{FunctionDefinition, Node, Parameter};
use crate::source_analysis::{ParseError, ParseErrorKind, SyntaxError, Token, TokenKind};

use super::{Parser, describe};

/// Where the parameter list parser is between tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParameterState {
    /// Right after `(`: a name or `)`.
    AwaitingParamOrClose,
    /// After a complete parameter: `,` or `)`.
    AwaitingCommaOrClose,
    /// After a comma: a name only.
    AwaitingParam,
}

impl Parser<'_> {
    /// Dispatches on the keyword's text.
    pub(super) fn parse_keyword(&mut self, keyword: Token) -> Result<Node, SyntaxError> {
        match keyword.kind().as_str().unwrap_or_default() {
            "fn" => self.parse_function_definition(keyword),
            "return" => self.parse_return(keyword),
            "pass" => {
                self.expect_statement_end()?;
                Ok(Node::Pass(keyword))
            }
            "break" => {
                self.expect_statement_end()?;
                Ok(Node::Break(keyword))
            }
            word => Err(ParseError::new(
                ParseErrorKind::UnsupportedKeyword(word.into()),
                keyword.span(),
            )
            .into()),
        }
    }

    /// Parses `return [expr]`.
    fn parse_return(&mut self, keyword: Token) -> Result<Node, SyntaxError> {
        let value = match self.advance(false)? {
            None => None,
            Some(token) => {
                self.lexer.un_lex();
                if token.kind() == &TokenKind::CloseCurlyBrace {
                    None
                } else {
                    Some(Box::new(self.parse_expression_statement()?))
                }
            }
        };
        if value.is_none() {
            self.expect_statement_end()?;
        }
        Ok(Node::Return { keyword, value })
    }

    // ========================================================================
    // Function Definitions
    // ========================================================================

    /// Parses `fn name(params) [-> type] {`; `fn` is already consumed.
    ///
    /// The header may be split across lines; end of input anywhere inside it
    /// is an "unterminated" error.
    fn parse_function_definition(&mut self, keyword: Token) -> Result<Node, SyntaxError> {
        const CONSTRUCT: &str = "function declaration";

        let name = self.expect_token(CONSTRUCT)?;
        match name.kind() {
            TokenKind::Identifier(_) => {}
            TokenKind::Keyword(word) => {
                return Err(ParseError::new(
                    ParseErrorKind::KeywordAsFunctionName(word.clone()),
                    name.span(),
                )
                .into());
            }
            _ => {
                return Err(
                    ParseError::expected("function name", describe(&name), name.span()).into(),
                );
            }
        }

        let open_paren = self.expect_token(CONSTRUCT)?;
        if open_paren.kind() != &TokenKind::OpenParen {
            return Err(
                ParseError::expected("'('", describe(&open_paren), open_paren.span()).into(),
            );
        }

        let (parameters, close_paren) = self.parse_parameters()?;

        let mut token = self.expect_token(CONSTRUCT)?;
        let mut return_type = None;
        if token.kind() == &TokenKind::Arrow {
            let ty = self.expect_token(CONSTRUCT)?;
            if !ty.kind().is_identifier() {
                return Err(ParseError::expected(
                    "return type after '->'",
                    describe(&ty),
                    ty.span(),
                )
                .into());
            }
            return_type = Some(ty);
            token = self.expect_token(CONSTRUCT)?;
        }

        if token.kind() != &TokenKind::OpenCurlyBrace {
            return Err(ParseError::expected(
                "'{' (as start of function body)",
                describe(&token),
                token.span(),
            )
            .into());
        }

        Ok(Node::FunctionDefinition(FunctionDefinition {
            keyword,
            name,
            open_paren,
            parameters,
            close_paren,
            return_type,
            body_open: token,
        }))
    }

    /// Parses parameters up to and including `)`; `(` is already consumed.
    ///
    /// A comma is accepted only after a complete parameter.
    fn parse_parameters(&mut self) -> Result<(Vec<Parameter>, Token), SyntaxError> {
        const CONSTRUCT: &str = "parameters";

        let mut parameters = Vec::new();
        let mut state = ParameterState::AwaitingParamOrClose;
        loop {
            let token = self.expect_token(CONSTRUCT)?;
            match (token.kind(), state) {
                (
                    TokenKind::CloseParen,
                    ParameterState::AwaitingParamOrClose | ParameterState::AwaitingCommaOrClose,
                ) => return Ok((parameters, token)),
                (TokenKind::Comma, ParameterState::AwaitingCommaOrClose) => {
                    state = ParameterState::AwaitingParam;
                }
                (TokenKind::Comma, _) => {
                    return Err(
                        ParseError::new(ParseErrorKind::UnexpectedComma, token.span()).into(),
                    );
                }
                (
                    TokenKind::Identifier(_),
                    ParameterState::AwaitingParamOrClose | ParameterState::AwaitingParam,
                ) => {
                    let ty = match self.match_token(&TokenKind::Colon, true)? {
                        Some(_) => Some(self.parse_parameter_type()?),
                        None => None,
                    };
                    parameters.push(Parameter { name: token, ty });
                    state = ParameterState::AwaitingCommaOrClose;
                }
                (_, ParameterState::AwaitingCommaOrClose) => {
                    return Err(
                        ParseError::expected("',' or ')'", describe(&token), token.span()).into(),
                    );
                }
                (_, _) => {
                    return Err(ParseError::expected(
                        "parameter name",
                        describe(&token),
                        token.span(),
                    )
                    .into());
                }
            }
        }
    }

    /// Parses the type after `name:`.
    fn parse_parameter_type(&mut self) -> Result<Token, SyntaxError> {
        let ty = self.expect_token("parameters")?;
        if ty.kind().is_identifier() {
            Ok(ty)
        } else {
            Err(ParseError::expected("parameter type", describe(&ty), ty.span()).into())
        }
    }
}
