// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error diagnostics using miette.
//!
//! Converts [`SyntaxError`]s into miette diagnostics with:
//! - The file path as a header
//! - The offending line with its line number
//! - A caret underline beneath the offending token
//! - The stable error code and message
//!
//! Rendering is stateless: colours and glyphs come from a
//! [`DiagnosticsConfig`] passed in per call.

use std::fmt;

use miette::{
    Diagnostic, GraphicalReportHandler, GraphicalTheme, LabeledSpan, MietteHandlerOpts,
    NamedSource, SourceCode, SourceSpan,
};

use crate::config::DiagnosticsConfig;
use crate::source_analysis::{ErrorCode, SyntaxError};

/// A fatal compilation error with its source context.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CompileDiagnostic {
    /// Stable error code.
    code: ErrorCode,
    /// Human-readable error message.
    message: String,
    /// Source code for context.
    src: NamedSource<String>,
    /// Location of the error.
    span: SourceSpan,
    /// Label for the error span.
    label: &'static str,
}

impl CompileDiagnostic {
    /// Creates a diagnostic for an error in `source`, read from `source_path`.
    ///
    /// Errors without a location (input ended inside a construct) point at
    /// the end of the source.
    #[must_use]
    pub fn from_syntax_error(error: &SyntaxError, source_path: &str, source: &str) -> Self {
        let (span, label) = match error.span() {
            Some(span) => (span.to_source_span(source), "here"),
            None => ((source.len(), 0).into(), "input ends here"),
        };
        Self {
            code: error.code(),
            message: error.to_string(),
            src: NamedSource::new(source_path, source.to_string()),
            span,
            label,
        }
    }

    /// Returns the stable error code.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        self.code
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the byte range the diagnostic points at.
    #[must_use]
    pub const fn span(&self) -> SourceSpan {
        self.span
    }

    /// Returns the path the source was read from.
    #[must_use]
    pub fn source_path(&self) -> &str {
        self.src.name()
    }
}

impl Diagnostic for CompileDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(self.label.to_string()),
            self.span,
        ))))
    }
}

fn theme(config: &DiagnosticsConfig) -> GraphicalTheme {
    match (config.color, config.unicode) {
        (true, true) => GraphicalTheme::unicode(),
        (true, false) => GraphicalTheme::ascii(),
        (false, true) => GraphicalTheme::unicode_nocolor(),
        (false, false) => GraphicalTheme::none(),
    }
}

/// Renders a diagnostic to a string.
#[must_use]
pub fn render(diagnostic: &dyn Diagnostic, config: &DiagnosticsConfig) -> String {
    let handler =
        GraphicalReportHandler::new_themed(theme(config)).with_context_lines(config.context_lines);
    let mut out = String::new();
    if handler.render_report(&mut out, diagnostic).is_err() {
        out = diagnostic.to_string();
    }
    out
}

/// Prints a diagnostic to standard error and exits with status 1.
///
/// This is the only place the front-end terminates the process.
pub fn report_fatal(diagnostic: &dyn Diagnostic, config: &DiagnosticsConfig) -> ! {
    eprintln!("{}", render(diagnostic, config));
    std::process::exit(1)
}

/// Installs miette's global report handler configured from `config`.
///
/// Affects how `miette::Report`s print through `Debug`, e.g. when returned
/// from `main`.
///
/// # Errors
///
/// Returns an error if a handler was already installed.
pub fn install_report_handler(config: &DiagnosticsConfig) -> miette::Result<()> {
    let config = *config;
    miette::set_hook(Box::new(move |_| {
        Box::new(
            MietteHandlerOpts::new()
                .color(config.color)
                .unicode(config.unicode)
                .context_lines(config.context_lines)
                .build(),
        )
    }))?;
    Ok(())
}
