// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Per-file compilation entry points.
//!
//! Every entry point runs the lexer and parser over a single source to
//! completion. The first malformation stops that file and comes back as a
//! [`CompileDiagnostic`]; nothing here terminates the process. Callers that
//! want the "report and exit" behaviour pass the error to
//! [`report_fatal`](crate::diagnostics::report_fatal).
//!
//! [`compile_files`] processes a batch, isolating failures so that one bad
//! file does not hide the results for the rest.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use miette::{Context, IntoDiagnostic, Report, Result};
use tracing::{debug, info, instrument, warn};

use crate::ast::Module;
use crate::config::FrontendConfig;
use crate::diagnostics::CompileDiagnostic;
use crate::source_analysis::{Lexer, SyntaxError, Token, parse};

/// File extension of Exeme source files.
pub const SOURCE_EXTENSION: &str = "exl";

/// Lex and parse `source`, naming it `source_path` in diagnostics.
///
/// # Errors
///
/// Returns the diagnostic for the first lexical or syntax error.
pub fn compile_source(source_path: &str, source: &str) -> Result<Module, CompileDiagnostic> {
    parse(source).map_err(|error| CompileDiagnostic::from_syntax_error(&error, source_path, source))
}

/// Read and parse a source file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, or the diagnostic for the
/// first lexical or syntax error.
#[instrument(skip_all, fields(path = %path))]
pub fn compile_file(path: &Utf8Path) -> Result<Module> {
    let source = read_source(path)?;
    let module = compile_source(path.as_str(), &source).map_err(Report::new)?;
    debug!("Parsed {} top-level node(s)", module.nodes.len());
    Ok(module)
}

/// Read a source file and lex it to completion.
///
/// Comment tokens are kept when `config.keep_comments` is set.
///
/// # Errors
///
/// Returns an error if the file cannot be read, or the diagnostic for the
/// first lexical error.
#[instrument(skip_all, fields(path = %path))]
pub fn tokenize_file(path: &Utf8Path, config: &FrontendConfig) -> Result<Vec<Token>> {
    let source = read_source(path)?;
    let mut lexer = Lexer::new(&source).keep_comments(config.keep_comments);
    loop {
        match lexer.lex(true) {
            Ok(true) => {}
            Ok(false) => break,
            Err(error) => {
                let error = SyntaxError::from(error);
                return Err(Report::new(CompileDiagnostic::from_syntax_error(
                    &error,
                    path.as_str(),
                    &source,
                )));
            }
        }
    }
    debug!("Lexed {} token(s)", lexer.tokens().len());
    Ok(lexer.tokens().to_vec())
}

fn read_source(path: &Utf8Path) -> Result<String> {
    debug!("Reading {path}");
    fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read source file '{path}'"))
}

/// Find all `.exl` source files at the given path.
///
/// If `path` is a file, returns it (must have the `.exl` extension).
/// If `path` is a directory, searches it recursively. Files come back
/// sorted so batch output is stable.
///
/// # Errors
///
/// Returns an error if the path does not exist, is a file with another
/// extension, or a directory cannot be read.
pub fn find_source_files(path: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let mut files = Vec::new();

    if path.is_file() {
        if path.extension() == Some(SOURCE_EXTENSION) {
            files.push(path.to_path_buf());
        } else {
            miette::bail!("File '{}' is not a .{} source file", path, SOURCE_EXTENSION);
        }
    } else if path.is_dir() {
        collect_source_files_recursive(path, &mut files)?;
    } else {
        miette::bail!("Path '{}' does not exist", path);
    }

    files.sort();
    Ok(files)
}

/// Recursively collect all `.exl` files from a directory tree.
///
/// Symlinks are skipped to avoid infinite recursion from circular links.
fn collect_source_files_recursive(dir: &Utf8Path, files: &mut Vec<Utf8PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read directory '{dir}'"))?
    {
        let entry = entry.into_diagnostic()?;
        let file_type = entry.file_type().into_diagnostic()?;
        if file_type.is_symlink() {
            continue;
        }
        let entry_path = Utf8PathBuf::from_path_buf(entry.path())
            .map_err(|_| miette::miette!("Non-UTF-8 path"))?;

        if file_type.is_dir() {
            collect_source_files_recursive(&entry_path, files)?;
        } else if file_type.is_file() && entry_path.extension() == Some(SOURCE_EXTENSION) {
            files.push(entry_path);
        }
    }
    Ok(())
}

/// A file that failed to compile, with the reason.
#[derive(Debug)]
pub struct FileFailure {
    /// The file that failed.
    pub path: Utf8PathBuf,
    /// The I/O error or syntax diagnostic.
    pub report: Report,
}

/// The result of compiling a batch of files.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Successfully parsed files, in input order.
    pub modules: Vec<(Utf8PathBuf, Module)>,
    /// Files that failed, in input order.
    pub failures: Vec<FileFailure>,
}

impl BatchOutcome {
    /// Returns `true` if every file parsed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Compile each file independently.
///
/// A failure in one file is recorded and the batch carries on with the
/// next.
#[instrument(skip_all, fields(count = paths.len()))]
pub fn compile_files(paths: &[Utf8PathBuf]) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for path in paths {
        match compile_file(path) {
            Ok(module) => outcome.modules.push((path.clone(), module)),
            Err(report) => {
                warn!("Failed to compile {path}");
                outcome.failures.push(FileFailure {
                    path: path.clone(),
                    report,
                });
            }
        }
    }
    info!(
        parsed = outcome.modules.len(),
        failed = outcome.failures.len(),
        "Batch complete"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::{ErrorCode, TokenKind};
    use tempfile::TempDir;

    fn temp_root(temp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap()
    }

    #[test]
    fn compile_source_ok() {
        let module = compile_source("inline.exl", "fn main() {\nx = 1\n}").unwrap();
        assert_eq!(module.nodes.len(), 3);
    }

    #[test]
    fn compile_source_reports_path_and_code() {
        let diag = compile_source("inline.exl", "x = 1\ny = 2 $ 3").unwrap_err();
        assert_eq!(diag.error_code(), ErrorCode::L0001);
        assert_eq!(diag.source_path(), "inline.exl");
        assert_eq!(diag.span().offset(), 12);
    }

    #[test]
    fn compile_file_missing() {
        let err = compile_file(Utf8Path::new("/nonexistent/main.exl")).unwrap_err();
        assert!(err.to_string().contains("Failed to read source file"));
    }

    #[test]
    fn compile_file_syntax_error_downcasts() {
        let temp = TempDir::new().unwrap();
        let path = temp_root(&temp).join("bad.exl");
        fs::write(&path, "fn foo(").unwrap();
        let report = compile_file(&path).unwrap_err();
        let diag = report.downcast_ref::<CompileDiagnostic>().unwrap();
        assert_eq!(diag.error_code(), ErrorCode::P0002);
        assert_eq!(diag.message(), "unterminated parameters");
    }

    #[test]
    fn tokenize_file_honours_keep_comments() {
        let temp = TempDir::new().unwrap();
        let path = temp_root(&temp).join("c.exl");
        fs::write(&path, "# note\nx /* inline */ = 1\n").unwrap();

        let skipped = tokenize_file(&path, &FrontendConfig::default()).unwrap();
        assert_eq!(skipped.len(), 3);

        let config = FrontendConfig {
            keep_comments: true,
            ..FrontendConfig::default()
        };
        let kept = tokenize_file(&path, &config).unwrap();
        assert_eq!(kept.len(), 5);
        assert_eq!(kept[0].kind(), &TokenKind::SingleLineComment);
        assert_eq!(kept[2].kind(), &TokenKind::MultiLineComment);
    }

    #[test]
    fn tokenize_file_lex_error() {
        let temp = TempDir::new().unwrap();
        let path = temp_root(&temp).join("e.exl");
        fs::write(&path, "s = \"open\n").unwrap();
        let report = tokenize_file(&path, &FrontendConfig::default()).unwrap_err();
        let diag = report.downcast_ref::<CompileDiagnostic>().unwrap();
        assert_eq!(diag.error_code(), ErrorCode::L0003);
    }

    #[test]
    fn find_source_files_in_directory() {
        let temp = TempDir::new().unwrap();
        let root = temp_root(&temp);
        fs::create_dir_all(root.join("lib/nested")).unwrap();
        fs::write(root.join("main.exl"), "").unwrap();
        fs::write(root.join("lib/nested/util.exl"), "").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();

        let files = find_source_files(&root).unwrap();
        assert_eq!(
            files,
            vec![root.join("lib/nested/util.exl"), root.join("main.exl")]
        );
    }

    #[test]
    fn find_source_files_rejects_other_extension() {
        let temp = TempDir::new().unwrap();
        let path = temp_root(&temp).join("notes.txt");
        fs::write(&path, "").unwrap();
        let err = find_source_files(&path).unwrap_err();
        assert!(err.to_string().contains("is not a .exl source file"));
    }

    #[test]
    fn find_source_files_missing_path() {
        let err = find_source_files(Utf8Path::new("/nonexistent/src")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn compile_files_isolates_failures() {
        let temp = TempDir::new().unwrap();
        let root = temp_root(&temp);
        let good = root.join("a.exl");
        let bad = root.join("b.exl");
        let also_good = root.join("c.exl");
        fs::write(&good, "x = 1").unwrap();
        fs::write(&bad, "fn while() {").unwrap();
        fs::write(&also_good, "pass\nbreak").unwrap();

        let outcome = compile_files(&[good.clone(), bad.clone(), also_good.clone()]);
        assert!(!outcome.is_success());
        assert_eq!(outcome.modules.len(), 2);
        assert_eq!(outcome.modules[0].0, good);
        assert_eq!(outcome.modules[1].0, also_good);
        assert_eq!(outcome.modules[1].1.nodes.len(), 2);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].path, bad);
    }
}
