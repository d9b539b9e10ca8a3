// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Abstract Syntax Tree (AST) definitions for Exeme.
//!
//! The parser builds nodes eagerly: recognizing a production and building
//! its node are the same step. Every node exclusively owns its children
//! (`Box`/`Vec`, no sharing, no cycles) and keeps the token it came from so
//! later stages can point diagnostics at it.
//!
//! # Example
//!
//! ```ignore
//! // Source: x = 3 + 4
//! Node::Assignment {
//!     operator: Token(Assignment),
//!     target: Variable { name: "x", dereference: None, token: ... },
//!     value: Box::new(Node::Binary {
//!         operator: Token(Addition),
//!         left: Box::new(Node::Literal(Literal { token: Token(Integer("3")) })),
//!         right: Box::new(Node::Literal(Literal { token: Token(Integer("4")) })),
//!     }),
//! }
//! ```

use ecow::EcoString;

use crate::source_analysis::{Span, Token, TokenKind};

/// Every top-level node of one source file, in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Module {
    /// The top-level nodes.
    pub nodes: Vec<Node>,
}

impl Module {
    /// Creates a module from its top-level nodes.
    #[must_use]
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Returns true if the file held no constructs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the span from the first node to the last, if any.
    #[must_use]
    pub fn span(&self) -> Option<Span> {
        let first = self.nodes.first()?.span();
        let last = self.nodes.last()?.span();
        Some(first.merge(last))
    }

    /// Iterates over the function definitions in the module.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDefinition> {
        self.nodes.iter().filter_map(|node| match node {
            Node::FunctionDefinition(function) => Some(function),
            _ => None,
        })
    }
}

/// One syntax construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A char, string, integer or float literal.
    Literal(Literal),

    /// A variable reference, possibly dereferenced: `x`, `*p`.
    Variable(Variable),

    /// Plain or compound assignment: `x = 1`, `x **= 2`.
    Assignment {
        /// The `=` or compound-assignment token.
        operator: Token,
        /// What is assigned to.
        target: Variable,
        /// The assigned value.
        value: Box<Node>,
    },

    /// A binary operation: `a + b`, `p->next`.
    Binary {
        /// The operator token.
        operator: Token,
        /// Left operand.
        left: Box<Node>,
        /// Right operand.
        right: Box<Node>,
    },

    /// A prefix operation: `-x`, `!done`, `~mask`.
    Unary {
        /// The operator token.
        operator: Token,
        /// The operand.
        operand: Box<Node>,
    },

    /// A call: `f(a, b)`.
    Call {
        /// The called expression.
        callee: Box<Node>,
        /// The `(` token.
        open: Token,
        /// Arguments in order.
        arguments: Vec<Node>,
        /// The `)` token.
        close: Token,
    },

    /// An index: `items[i]`.
    Index {
        /// The indexed expression.
        target: Box<Node>,
        /// The `[` token.
        open: Token,
        /// The index expression.
        index: Box<Node>,
        /// The `]` token.
        close: Token,
    },

    /// A parenthesised expression: `(a + b)`.
    Group {
        /// The `(` token.
        open: Token,
        /// The enclosed expression.
        inner: Box<Node>,
        /// The `)` token.
        close: Token,
    },

    /// A `{` opening a block.
    OpenCurlyBrace(Token),

    /// A `}` closing a block.
    CloseCurlyBrace(Token),

    /// A function header up to the opening brace of its body.
    FunctionDefinition(FunctionDefinition),

    /// `return` with an optional value.
    Return {
        /// The `return` keyword.
        keyword: Token,
        /// The returned value.
        value: Option<Box<Node>>,
    },

    /// `pass`.
    Pass(Token),

    /// `break`.
    Break(Token),
}

impl Node {
    /// Returns the token this node was created from.
    #[must_use]
    pub fn token(&self) -> &Token {
        match self {
            Self::Literal(literal) => &literal.token,
            Self::Variable(variable) => &variable.token,
            Self::Assignment { operator, .. }
            | Self::Binary { operator, .. }
            | Self::Unary { operator, .. } => operator,
            Self::Call { open, .. } | Self::Index { open, .. } | Self::Group { open, .. } => {
                open
            }
            Self::OpenCurlyBrace(token)
            | Self::CloseCurlyBrace(token)
            | Self::Pass(token)
            | Self::Break(token)
            | Self::Return { keyword: token, .. } => token,
            Self::FunctionDefinition(function) => &function.keyword,
        }
    }

    /// Returns the source span covering the whole construct.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Literal(literal) => literal.token.span(),
            Self::Variable(variable) => variable.span(),
            Self::Assignment { target, value, .. } => target.span().merge(value.span()),
            Self::Binary { left, right, .. } => left.span().merge(right.span()),
            Self::Unary { operator, operand } => operator.span().merge(operand.span()),
            Self::Call { callee, close, .. } => callee.span().merge(close.span()),
            Self::Index { target, close, .. } => target.span().merge(close.span()),
            Self::Group { open, close, .. } => open.span().merge(close.span()),
            Self::OpenCurlyBrace(token)
            | Self::CloseCurlyBrace(token)
            | Self::Pass(token)
            | Self::Break(token) => token.span(),
            Self::Return { keyword, value } => value
                .as_ref()
                .map_or(keyword.span(), |value| keyword.span().merge(value.span())),
            Self::FunctionDefinition(function) => function.span(),
        }
    }

    /// Returns a short description of the construct, for logs and messages.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Literal(_) => "literal",
            Self::Variable(_) => "variable",
            Self::Assignment { .. } => "assignment",
            Self::Binary { .. } => "binary expression",
            Self::Unary { .. } => "unary expression",
            Self::Call { .. } => "call",
            Self::Index { .. } => "index",
            Self::Group { .. } => "group",
            Self::OpenCurlyBrace(_) => "open curly brace",
            Self::CloseCurlyBrace(_) => "close curly brace",
            Self::FunctionDefinition(_) => "function definition",
            Self::Return { .. } => "return",
            Self::Pass(_) => "pass",
            Self::Break(_) => "break",
        }
    }
}

/// A literal value and the token it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    /// A `Char`, `String`, `Integer` or `Float` token.
    pub token: Token,
}

impl Literal {
    /// Wraps a literal token; returns `None` for any other kind.
    #[must_use]
    pub fn new(token: Token) -> Option<Self> {
        token.kind().is_literal().then_some(Self { token })
    }

    /// Returns the literal's token kind, which carries its value.
    #[must_use]
    pub fn kind(&self) -> &TokenKind {
        self.token.kind()
    }
}

/// A reference to a named variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// The variable's name.
    pub name: EcoString,
    /// The `*` that marks a dereference, if present.
    pub dereference: Option<Token>,
    /// The identifier token.
    pub token: Token,
}

impl Variable {
    /// Creates a variable from an identifier token.
    ///
    /// Returns `None` if the token is not an identifier.
    #[must_use]
    pub fn new(token: Token, dereference: Option<Token>) -> Option<Self> {
        let TokenKind::Identifier(name) = token.kind() else {
            return None;
        };
        Some(Self {
            name: name.clone(),
            dereference,
            token,
        })
    }

    /// Returns true if the variable is preceded by `*`.
    #[must_use]
    pub const fn is_dereference(&self) -> bool {
        self.dereference.is_some()
    }

    /// Returns the span of the name and, if present, the `*`.
    #[must_use]
    pub fn span(&self) -> Span {
        match &self.dereference {
            Some(star) => star.span().merge(self.token.span()),
            None => self.token.span(),
        }
    }
}

/// A function header: `fn name(a, b: int) -> int {`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDefinition {
    /// The `fn` keyword.
    pub keyword: Token,
    /// The function name (an identifier).
    pub name: Token,
    /// The `(` opening the parameter list.
    pub open_paren: Token,
    /// Parameters in order.
    pub parameters: Vec<Parameter>,
    /// The `)` closing the parameter list.
    pub close_paren: Token,
    /// The type after `->`, if present.
    pub return_type: Option<Token>,
    /// The `{` opening the body.
    pub body_open: Token,
}

impl FunctionDefinition {
    /// Returns the function name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.kind().as_str().unwrap_or_default()
    }

    /// Returns the return type name, if declared.
    #[must_use]
    pub fn return_type_name(&self) -> Option<&str> {
        self.return_type.as_ref()?.kind().as_str()
    }

    /// Returns the span from `fn` to the opening brace.
    #[must_use]
    pub fn span(&self) -> Span {
        self.keyword.span().merge(self.body_open.span())
    }
}

/// One entry of a parameter list: `name` or `name: type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// The parameter name.
    pub name: Token,
    /// The declared type, if present.
    pub ty: Option<Token>,
}

impl Parameter {
    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.kind().as_str().unwrap_or_default()
    }

    /// Returns the declared type name, if present.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.ty.as_ref()?.kind().as_str()
    }
}
