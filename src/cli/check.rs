//! Run gqlt commands against a query string

use super::{CliError, parse_arguments, parse_variables};
use crate::{
    Lexer, Parser,
    output::{to_source, to_source_pretty},
    transform::{State, resolve},
};

/// What to do with the parsed query
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Command {
    /// Only validate syntax
    #[default]
    Check,
    /// Dump the AST as JSON
    Ast,
    /// Print canonical source
    Fmt,
    /// Resolve parameters and positional references
    Resolve {
        /// JSON object of named variables
        variables: Option<String>,
        /// JSON array of positional values
        arguments: Option<String>,
    },
}

/// Options for a single CLI invocation
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// The query source
    pub query: String,
    pub command: Command,
    /// Pretty-print the output
    pub pretty: bool,
    /// Maximum field nesting, `None` for the parser default
    pub max_depth: Option<u32>,
}

/// Result of a CLI operation
#[derive(Debug)]
pub enum Outcome {
    /// Syntax validation passed
    SyntaxValid,
    /// JSON output (AST or resolved query)
    Json(serde_json::Value),
    /// Query source output
    Source(String),
}

/// Execute a gqlt command
pub fn execute(options: &Options) -> Result<Outcome, CliError> {
    if options.query.trim().is_empty() {
        return Err(CliError::NoInput);
    }

    let mut parser = Parser::new(Lexer::new(&options.query))?;
    if let Some(limit) = options.max_depth {
        parser = parser.with_max_depth(Some(limit));
    }
    let query = parser.parse_query()?;

    let outcome = match &options.command {
        Command::Check => Outcome::SyntaxValid,
        Command::Ast => Outcome::Json(serde_json::to_value(&query)?),
        Command::Fmt if options.pretty => Outcome::Source(to_source_pretty(&query)),
        Command::Fmt => Outcome::Source(to_source(&query)),
        Command::Resolve {
            variables,
            arguments,
        } => {
            let state = State::new(
                arguments.as_deref().map(parse_arguments).transpose()?.unwrap_or_default(),
                variables.as_deref().map(parse_variables).transpose()?.unwrap_or_default(),
            );
            Outcome::Json(serde_json::to_value(resolve(&query, &state)?)?)
        }
    };

    Ok(outcome)
}

#[test]
fn test_execute_check() {
    let options = Options {
        query: "viewer { id {} }".to_string(),
        ..Default::default()
    };
    assert!(matches!(execute(&options), Ok(Outcome::SyntaxValid)));
}

#[test]
fn test_execute_empty_query() {
    let options = Options {
        query: "  \n".to_string(),
        ..Default::default()
    };
    assert!(matches!(execute(&options), Err(CliError::NoInput)));
}
