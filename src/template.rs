//! Template assembly.
//!
//! A template is a list of literal text fragments with runtime values
//! interpolated between them. The values never enter the source text: each
//! one is replaced by a positional marker `&N`, and the values travel next
//! to the parsed query until it is resolved.

use crate::{
    ast::Query,
    parser::{ParseError, parse},
    transform::{ResolveError, ResolvedQuery, State, resolve},
};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Write;

/// Join fragments into query source, writing `&i` between fragment `i` and
/// fragment `i + 1`.
///
/// # Examples
/// ```
/// use graphql_tag::template::concat;
///
/// assert_eq!(concat(&["user.byId(", ") { name {} }"]), "user.byId(&0) { name {} }");
/// assert_eq!(concat(&["a(", ", ", ") {}"]), "a(&0, &1) {}");
/// assert_eq!(concat::<&str>(&[]), "");
/// ```
pub fn concat<S: AsRef<str>>(fragments: &[S]) -> String {
    let mut source = String::new();

    for (i, fragment) in fragments.iter().enumerate() {
        if i > 0 {
            // Writing to a String cannot fail
            let _ = write!(source, "&{}", i - 1);
        }
        source.push_str(fragment.as_ref());
    }

    source
}

/// Fragments plus the values interpolated between them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Template {
    pub fragments: Vec<String>,
    pub values: Vec<Value>,
}

impl Template {
    pub fn new<S: Into<String>>(fragments: impl IntoIterator<Item = S>, values: Vec<Value>) -> Self {
        Template {
            fragments: fragments.into_iter().map(Into::into).collect(),
            values,
        }
    }

    /// The assembled source text, with positional markers.
    pub fn source(&self) -> String {
        concat(&self.fragments)
    }

    pub fn compile(self) -> Result<CompiledTemplate, ParseError> {
        let source = self.source();
        log::debug!(
            "compiling template with {} interpolated value(s): {}",
            self.values.len(),
            source
        );

        let query = parse(&source)?;
        Ok(CompiledTemplate {
            query,
            arguments: self.values,
        })
    }
}

/// A parsed template, ready to be resolved any number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTemplate {
    pub query: Query,
    /// Interpolated values, indexed by the `&N` markers
    pub arguments: Vec<Value>,
}

impl CompiledTemplate {
    /// Resolve against call-time variables.
    ///
    /// # Examples
    /// ```
    /// use graphql_tag::template::Template;
    /// use serde_json::json;
    /// use std::collections::HashMap;
    ///
    /// let compiled = Template::new(["user.byId(", ").avatar(<size>) { url {} }"], vec![json!(7)])
    ///     .compile()
    ///     .unwrap();
    ///
    /// let variables = HashMap::from([("size".to_string(), json!(64))]);
    /// let resolved = compiled.resolve(&variables).unwrap();
    ///
    /// assert_eq!(resolved.field.call("byId").unwrap().arguments, vec![json!(7)]);
    /// assert_eq!(resolved.field.call("avatar").unwrap().arguments, vec![json!(64)]);
    /// ```
    pub fn resolve(&self, variables: &HashMap<String, Value>) -> Result<ResolvedQuery, ResolveError> {
        let state = State::new(self.arguments.clone(), variables.clone());
        resolve(&self.query, &state)
    }
}

/// Assemble and parse a template in one step.
pub fn compile<S: Into<String>>(
    fragments: impl IntoIterator<Item = S>,
    values: Vec<Value>,
) -> Result<CompiledTemplate, ParseError> {
    Template::new(fragments, values).compile()
}
