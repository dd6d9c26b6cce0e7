//! CLI support for graphql-tag
//!
//! Provides programmatic access to the `gqlt` commands so other tools can
//! check, print and resolve queries without spawning the binary.

mod check;
mod convert;

pub use check::{Command, Options, Outcome, execute};
pub use convert::{parse_arguments, parse_variables};

use std::io;
use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Resolve error: {0}")]
    Resolve(#[from] crate::ResolveError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// `--vars` was not a JSON object or `--args` was not a JSON array
    #[error("Expected a JSON {expected} for {flag}")]
    WrongShape {
        flag: &'static str,
        expected: &'static str,
    },

    #[error("No query provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,
}
