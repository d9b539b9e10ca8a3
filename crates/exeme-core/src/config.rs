// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Front-end configuration.
//!
//! Options live in the `[frontend]` table of an `exeme.toml` file at the
//! project root:
//!
//! ```toml
//! [frontend]
//! keep_comments = false
//!
//! [frontend.diagnostics]
//! color = true
//! unicode = true
//! context_lines = 1
//! ```
//!
//! Every key is optional. A missing file means all defaults; a file that
//! exists but does not parse is an error.

use std::fs;

use camino::Utf8Path;
use miette::{Context, IntoDiagnostic, Result};
use serde::Deserialize;

/// Name of the configuration file looked up in a project root.
pub const CONFIG_FILE_NAME: &str = "exeme.toml";

/// The top-level structure of `exeme.toml`.
///
/// Tables other than `[frontend]` belong to other tools and are ignored.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    frontend: FrontendConfig,
}

/// Options for lexing, parsing and reporting.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrontendConfig {
    /// Hand comment tokens to token consumers instead of skipping them.
    pub keep_comments: bool,
    /// How diagnostics are rendered.
    pub diagnostics: DiagnosticsConfig,
}

/// Rendering options for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagnosticsConfig {
    /// Use ANSI colours.
    pub color: bool,
    /// Use unicode box-drawing characters rather than ASCII.
    pub unicode: bool,
    /// Source lines shown around the offending line.
    pub context_lines: usize,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            color: true,
            unicode: true,
            context_lines: 1,
        }
    }
}

impl FrontendConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid TOML or unknown `[frontend]` keys.
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content).into_diagnostic()?;
        Ok(file.frontend)
    }
}

/// Parse an `exeme.toml` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse.
pub fn parse_config(path: &Utf8Path) -> Result<FrontendConfig> {
    let content = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read config '{path}'"))?;

    FrontendConfig::from_toml(&content).wrap_err_with(|| format!("Failed to parse config '{path}'"))
}

/// Look for `exeme.toml` in the given directory and parse it if found.
///
/// Returns the defaults if no config file exists.
///
/// # Errors
///
/// Returns an error if the file exists but is malformed.
pub fn find_config(project_root: &Utf8Path) -> Result<FrontendConfig> {
    let config_path = project_root.join(CONFIG_FILE_NAME);
    if config_path
        .try_exists()
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to stat config '{config_path}'"))?
    {
        parse_config(&config_path)
    } else {
        Ok(FrontendConfig::default())
    }
}
