// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexing and parsing for Exeme source code.
//!
//! This module contains the lexer, the parser and the token model they
//! share.
//!
//! # Lexical Analysis
//!
//! The [`Lexer`] converts source text into [`Token`]s on demand. Each token
//! carries its source location via [`Span`].
//!
//! ```
//! use exeme_core::source_analysis::{TokenKind, tokenize};
//!
//! let tokens = tokenize("x **= 2").unwrap();
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[1].kind(), &TokenKind::ExponentAssignment);
//! ```
//!
//! See [`TokenKind`] for all supported syntactic elements.
//!
//! # Parsing
//!
//! The [`parse`] function converts source into a [`Module`](crate::ast::Module).
//! Binary operator precedence uses Pratt parsing driven by
//! [`TokenKind::precedence`] (see the `parser` module for details).
//!
//! # Error Handling
//!
//! Neither stage recovers: the first malformation in a file is returned as a
//! [`SyntaxError`] carrying a stable [`ErrorCode`]. Broken internal
//! invariants panic through [`internal_error!`](crate::internal_error).

mod error;
mod lexer;
mod parser;
mod span;
mod token;


pub use error::{ErrorCode, LexError, LexErrorKind, ParseError, ParseErrorKind, SyntaxError};
pub use lexer::{Lexer, tokenize};
pub use parser::{Parser, parse};
pub use span::Span;
pub use token::{Associativity, KEYWORDS, Precedence, Token, TokenKind, is_keyword};
