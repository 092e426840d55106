// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration error diagnostics.
//!
//! Bridges Figment deserialization failures and post-load validation
//! failures into miette diagnostics for terminal rendering.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration error suitable for user-facing rendering.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// The TOML/env layer could not be deserialized into the model.
    #[error("{message}")]
    #[diagnostic(
        code(leetboard::config::parse),
        help("check leetboard.toml and LEETBOARD_* environment variables")
    )]
    Parse { message: String },

    /// A deserialized value violates a semantic constraint.
    #[error("{message}")]
    #[diagnostic(code(leetboard::config::validation))]
    Validation { message: String },
}

/// Convert a Figment error chain into one `Parse` diagnostic per failure.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    err.into_iter()
        .map(|e| ConfigError::Parse {
            message: e.to_string(),
        })
        .collect()
}

/// Render all collected config errors to stderr.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        eprintln!("error[{}]: {error}", code_of(error));
        if let Some(help) = error.help() {
            eprintln!("  help: {help}");
        }
    }
}

fn code_of(error: &ConfigError) -> String {
    error
        .code()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "leetboard::config".to_string())
}
