// tests/parser_tests.rs

use graphql_tag::ast::{Argument, CallExpression, Field, Literal, Position, Query, TokenKind};
use graphql_tag::lexer::Lexer;
use graphql_tag::parser::{ErrorKind, ParseError, Parser, parse};
use indoc::indoc;
use serde_json::json;

fn literal(raw: &str) -> Argument {
    Argument::Literal(Literal::from_raw(raw).unwrap())
}

fn parameter(name: &str) -> Argument {
    Argument::Parameter {
        name: name.to_string(),
    }
}

fn cooked(arguments: &[Argument]) -> Vec<serde_json::Value> {
    arguments
        .iter()
        .map(|arg| match arg {
            Argument::Literal(lit) => lit.cooked.clone(),
            other => panic!("Expected literal, got {:?}", other),
        })
        .collect()
}

fn unexpected_at(source: &str) -> (TokenKind, Position) {
    match parse(source) {
        Err(ParseError::UnexpectedToken { position, found }) => (found, position),
        other => panic!("Expected UnexpectedToken for {:?}, got {:?}", source, other),
    }
}

// ============================================================================
// Fields
// ============================================================================

#[test]
fn test_single_leaf_field() {
    let query = parse("viewer {}").unwrap();
    assert_eq!(
        query,
        Query {
            field: Field::leaf("viewer")
        }
    );
    assert!(query.field.is_leaf());
}

#[test]
fn test_nested_fields() {
    let query = parse(indoc! {"
        viewer {
          profile {
            name {},
            email {}
          },
          id {}
        }
    "})
    .unwrap();

    let viewer = &query.field;
    assert_eq!(viewer.name, "viewer");
    assert_eq!(viewer.fields.len(), 2);

    let profile = &viewer.fields[0];
    assert_eq!(profile.name, "profile");
    let names: Vec<&str> = profile.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["name", "email"]);

    assert_eq!(viewer.fields[1], Field::leaf("id"));
}

#[test]
fn test_trailing_comma_in_body() {
    let query = parse("a { b {}, }").unwrap();
    assert_eq!(query.field.fields, vec![Field::leaf("b")]);
}

#[test]
fn test_missing_comma_between_fields() {
    let (found, position) = unexpected_at("a { b {} c {} }");
    assert_eq!(found, TokenKind::Identifier);
    assert_eq!(position.column, 10);
}

#[test]
fn test_leading_comma_in_body() {
    let (found, _) = unexpected_at("a { , b {} }");
    assert_eq!(found, TokenKind::Comma);
}

#[test]
fn test_body_is_mandatory() {
    let (found, position) = unexpected_at("viewer { id }");
    assert_eq!(found, TokenKind::RBrace);
    assert_eq!(position, Position::new(12, 1, 13));
}

#[test]
fn test_root_body_is_mandatory() {
    let (found, _) = unexpected_at("viewer");
    assert_eq!(found, TokenKind::End);
}

#[test]
fn test_unclosed_body() {
    let (found, _) = unexpected_at("viewer { id {}");
    assert_eq!(found, TokenKind::End);
}

#[test]
fn test_keyword_is_not_a_field_name() {
    let (found, _) = unexpected_at("a { null {} }");
    assert_eq!(found, TokenKind::Null);
}

// ============================================================================
// Call Expressions
// ============================================================================

#[test]
fn test_call_with_parameter() {
    let query = parse("viewer.avatar(<size>) { id {}, url {} }").unwrap();

    assert_eq!(
        query,
        Query {
            field: Field {
                name: "viewer".to_string(),
                arguments: vec![],
                calls: vec![CallExpression {
                    callee: "avatar".to_string(),
                    arguments: vec![parameter("size")],
                }],
                fields: vec![Field::leaf("id"), Field::leaf("url")],
            }
        }
    );
}

#[test]
fn test_chained_calls_keep_order() {
    let query = parse("user.friends(10).orderBy(\"name\").after(<cursor>) { name {} }").unwrap();
    let callees: Vec<&str> = query
        .field
        .calls
        .iter()
        .map(|c| c.callee.as_str())
        .collect();

    assert_eq!(callees, vec!["friends", "orderBy", "after"]);
    assert_eq!(query.field.calls[0].arguments, vec![literal("10")]);
    assert_eq!(query.field.calls[1].arguments, vec![literal("\"name\"")]);
    assert_eq!(query.field.calls[2].arguments, vec![parameter("cursor")]);
}

#[test]
fn test_call_with_no_arguments() {
    let query = parse("a.refresh() {}").unwrap();
    assert_eq!(query.field.calls[0].callee, "refresh");
    assert!(query.field.calls[0].arguments.is_empty());
}

#[test]
fn test_call_requires_argument_list() {
    let (found, _) = unexpected_at("a.refresh {}");
    assert_eq!(found, TokenKind::LBrace);
}

#[test]
fn test_call_after_body_is_rejected() {
    let (found, _) = unexpected_at("a {}.b() ");
    assert_eq!(found, TokenKind::Period);
}

#[test]
fn test_calls_on_nested_fields() {
    let query = parse("a { b.first(2) { c {} } }").unwrap();
    let b = &query.field.fields[0];
    assert_eq!(b.calls[0].callee, "first");
    assert_eq!(b.fields, vec![Field::leaf("c")]);
}

// ============================================================================
// Arguments
// ============================================================================

#[test]
fn test_field_arguments_are_literals_in_order() {
    let query = parse(r#"x { y(1, "a", true, null) {} }"#).unwrap();
    let y = &query.field.fields[0];

    assert_eq!(y.name, "y");
    assert_eq!(
        cooked(&y.arguments),
        vec![json!(1), json!("a"), json!(true), json!(null)]
    );
}

#[test]
fn test_literal_keeps_raw_text() {
    let query = parse(r#"a.f(1.50, "tab\there", -2e3) {}"#).unwrap();
    let args = &query.field.calls[0].arguments;

    match &args[0] {
        Argument::Literal(lit) => {
            assert_eq!(lit.raw, "1.50");
            assert_eq!(lit.cooked, json!(1.5));
        }
        other => panic!("Expected literal, got {:?}", other),
    }
    match &args[1] {
        Argument::Literal(lit) => assert_eq!(lit.cooked, json!("tab\there")),
        other => panic!("Expected literal, got {:?}", other),
    }
    assert_eq!(cooked(&args[2..]), vec![json!(-2000.0)]);
}

#[test]
fn test_escaped_quote_literal() {
    let query = parse(r#"a.say("\"quoted\"") {}"#).unwrap();
    assert_eq!(
        cooked(&query.field.calls[0].arguments),
        vec![json!("\"quoted\"")]
    );
}

#[test]
fn test_array_and_object_literals() {
    let query = parse(r#"a.where({"name": "x", "tags": ["a", "}"]}, [1, [2, 3]]) {}"#).unwrap();

    assert_eq!(
        cooked(&query.field.calls[0].arguments),
        vec![
            json!({"name": "x", "tags": ["a", "}"]}),
            json!([1, [2, 3]])
        ]
    );
}

#[test]
fn test_mixed_argument_kinds() {
    let query = parse("a.f(<x>, &3, false) {}").unwrap();
    assert_eq!(
        query.field.calls[0].arguments,
        vec![
            parameter("x"),
            Argument::Positional { index: 3 },
            literal("false")
        ]
    );
}

#[test]
fn test_dangling_comma_fails_at_close_paren() {
    let (found, position) = unexpected_at("x { y(1,) {} }");
    assert_eq!(found, TokenKind::RParen);
    assert_eq!(position, Position::new(8, 1, 9));
}

#[test]
fn test_missing_comma_between_arguments() {
    let (found, _) = unexpected_at("a.f(1 2) {}");
    assert_eq!(found, TokenKind::Number);
}

#[test]
fn test_parameter_requires_identifier() {
    let (found, _) = unexpected_at("a.f(<1>) {}");
    assert_eq!(found, TokenKind::Number);

    let (found, _) = unexpected_at("a.f(<x) {}");
    assert_eq!(found, TokenKind::RParen);
}

#[test]
fn test_bare_identifier_is_not_an_argument() {
    let (found, _) = unexpected_at("a.f(size) {}");
    assert_eq!(found, TokenKind::Identifier);
}

// ============================================================================
// Positional References
// ============================================================================

#[test]
fn test_positional_references() {
    let query = parse("user.byId(&0).friends(&12) {}").unwrap();
    assert_eq!(
        query.field.calls[0].arguments,
        vec![Argument::Positional { index: 0 }]
    );
    assert_eq!(
        query.field.calls[1].arguments,
        vec![Argument::Positional { index: 12 }]
    );
}

#[test]
fn test_positional_requires_number() {
    let (found, _) = unexpected_at("a.f(&x) {}");
    assert_eq!(found, TokenKind::Identifier);
}

#[test]
fn test_positional_must_be_plain_integer() {
    for source in ["a.f(&1.5) {}", "a.f(&-1) {}", "a.f(&1e2) {}"] {
        let err = parse(source).unwrap_err();
        assert!(
            matches!(err, ParseError::InvalidPositional { .. }),
            "Failed for source: {}",
            source
        );
        assert_eq!(err.kind(), ErrorKind::UnexpectedToken);
    }
}

// ============================================================================
// Literal Decoding
// ============================================================================

#[test]
fn test_invalid_string_escape() {
    let err = parse(r#"a.f("\x") {}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LiteralDecodeFailure);
    assert_eq!(err.position(), Position::new(4, 1, 5));
}

#[test]
fn test_non_json_object_literal() {
    let err = parse("a.f({key: 1}) {}").unwrap_err();
    match err {
        ParseError::LiteralDecode { raw, .. } => assert_eq!(raw, "{key: 1}"),
        other => panic!("Expected LiteralDecode, got {:?}", other),
    }
}

#[test]
fn test_literal_from_raw_agrees_with_json() {
    for raw in ["0", "-1.25", "\"a\\nb\"", "[true, null]", "{\"a\": {}}", "false"] {
        let lit = Literal::from_raw(raw).unwrap();
        let expected: serde_json::Value = serde_json::from_str(raw).unwrap();
        assert_eq!(lit.cooked, expected);
        assert_eq!(lit.raw, raw);
    }
}

// ============================================================================
// Whole Input
// ============================================================================

#[test]
fn test_trailing_tokens_rejected() {
    let (found, position) = unexpected_at("a {} b {}");
    assert_eq!(found, TokenKind::Identifier);
    assert_eq!(position.column, 6);
}

#[test]
fn test_empty_source() {
    let (found, _) = unexpected_at("   ");
    assert_eq!(found, TokenKind::End);
}

#[test]
fn test_lex_errors_surface_through_parser() {
    let err = parse("a { b # {} }").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalToken);
    assert_eq!(err.position(), Position::new(6, 1, 7));
    assert_eq!(err.to_string(), "Unexpected '#' at line 1, column 7");
}

#[test]
fn test_lex_error_on_first_token() {
    let err = Parser::new(Lexer::new("#")).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::IllegalToken);
}

#[test]
fn test_unexpected_token_message() {
    let err = parse("x { y(1,) {} }").unwrap_err();
    assert_eq!(err.to_string(), "Unexpected ')' at line 1, column 9");
}

// ============================================================================
// Nesting Limit
// ============================================================================

fn nested(depth: usize) -> String {
    let mut source = String::new();
    for i in 0..depth {
        source.push_str(&format!("f{} {{ ", i));
    }
    for _ in 0..depth {
        source.push_str("} ");
    }
    source
}

#[test]
fn test_depth_limit() {
    let source = nested(3);

    let mut parser = Parser::new(Lexer::new(&source))
        .unwrap()
        .with_max_depth(Some(2));
    let err = parser.parse_query().unwrap_err();
    assert!(matches!(err, ParseError::RecursionLimit { limit: 2, .. }));
    assert_eq!(err.kind(), ErrorKind::RecursionLimit);

    let mut parser = Parser::new(Lexer::new(&source))
        .unwrap()
        .with_max_depth(Some(3));
    assert!(parser.parse_query().is_ok());
}

#[test]
fn test_default_depth_limit() {
    assert!(parse(&nested(100)).is_ok());
    assert_eq!(
        parse(&nested(300)).unwrap_err().kind(),
        ErrorKind::RecursionLimit
    );
}

#[test]
fn test_depth_limit_disabled() {
    let source = nested(300);
    let mut parser = Parser::new(Lexer::new(&source))
        .unwrap()
        .with_max_depth(None);
    assert!(parser.parse_query().is_ok());
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_ast_serializes_with_type_tags() {
    let query = parse("a.f(<x>, &0, [1]) { b {} }").unwrap();

    assert_eq!(
        serde_json::to_value(&query).unwrap(),
        json!({
            "type": "Query",
            "field": {
                "type": "Field",
                "name": "a",
                "arguments": [],
                "calls": [{
                    "type": "CallExpression",
                    "callee": "f",
                    "arguments": [
                        {"type": "Parameter", "name": "x"},
                        {"type": "Positional", "index": 0},
                        {"type": "Literal", "raw": "[1]", "cooked": [1]}
                    ]
                }],
                "fields": [{
                    "type": "Field",
                    "name": "b",
                    "arguments": [],
                    "calls": [],
                    "fields": []
                }]
            }
        })
    );
}
