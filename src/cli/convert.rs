//! JSON inputs for the resolve command

use super::CliError;
use serde_json::Value;
use std::collections::HashMap;

/// Parse `--vars`: a JSON object mapping parameter names to values.
pub fn parse_variables(json: &str) -> Result<HashMap<String, Value>, CliError> {
    match serde_json::from_str(json)? {
        Value::Object(map) => Ok(map.into_iter().collect()),
        _ => Err(CliError::WrongShape {
            flag: "--vars",
            expected: "object",
        }),
    }
}

/// Parse `--args`: a JSON array of positional values, `&0` first.
pub fn parse_arguments(json: &str) -> Result<Vec<Value>, CliError> {
    match serde_json::from_str(json)? {
        Value::Array(values) => Ok(values),
        _ => Err(CliError::WrongShape {
            flag: "--args",
            expected: "array",
        }),
    }
}

#[test]
fn test_parse_variables() {
    let vars = parse_variables(r#"{"size": 64, "name": "x"}"#).unwrap();
    assert_eq!(vars["size"], Value::from(64));
    assert!(matches!(
        parse_variables("[1]"),
        Err(CliError::WrongShape { flag: "--vars", .. })
    ));
}

#[test]
fn test_parse_arguments() {
    assert_eq!(parse_arguments("[1, true]").unwrap(), vec![Value::from(1), Value::from(true)]);
    assert!(matches!(parse_arguments("{}"), Err(CliError::WrongShape { .. })));
    assert!(matches!(parse_arguments("[1,"), Err(CliError::Json(_))));
}
