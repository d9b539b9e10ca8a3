// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Exeme language front-end.
//!
//! This crate contains the front half of the Exeme compiler:
//! - Lexical analysis (tokenization)
//! - Parsing (AST construction)
//! - Diagnostics (rendered with `miette`)
//! - A per-file driver and its configuration
//!
//! Lexing and parsing are interleaved: the parser pulls tokens from the
//! lexer as it needs them and builds one top-level node per statement.
//! Errors are fatal per file and come back as values; only
//! [`diagnostics::report_fatal`] exits the process.
//!
//! ```
//! use exeme_core::prelude::*;
//!
//! let module = parse("fn add(a: int, b: int) -> int {\nreturn a + b\n}").unwrap();
//! assert_eq!(module.nodes.len(), 3);
//! assert_eq!(module.functions().next().map(|f| f.name()), Some("add"));
//! ```

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod source_analysis;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::ast::{FunctionDefinition, Module, Node};
    pub use crate::config::FrontendConfig;
    pub use crate::diagnostics::CompileDiagnostic;
    pub use crate::driver::{compile_file, compile_source};
    pub use crate::source_analysis::{Span, SyntaxError, Token, TokenKind, parse};
}
