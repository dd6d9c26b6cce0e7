//! Source printing for parsed queries.
//!
//! Turns a [`Query`] back into query text, either compact or pretty-printed.
//! The output is canonical rather than a copy of the input: whitespace is
//! normalised and literals are reproduced from their raw spelling. Parsing
//! the printed text yields the same tree.
//!
//! # Examples
//!
//! ```
//! use graphql_tag::parse;
//! use graphql_tag::output::{to_source, to_source_pretty};
//!
//! let query = parse("viewer.avatar( <size> ){id{},url{}}").unwrap();
//!
//! assert_eq!(to_source(&query), "viewer.avatar(<size>) {id {}, url {}}");
//! assert_eq!(
//!     to_source_pretty(&query),
//!     "viewer.avatar(<size>) {\n  id {},\n  url {}\n}"
//! );
//! ```

use crate::ast::{Argument, CallExpression, Field, Query};

pub struct QueryPrinter {
    pretty: bool,
}

impl QueryPrinter {
    pub fn new(pretty: bool) -> Self {
        QueryPrinter { pretty }
    }

    pub fn print(&self, query: &Query) -> String {
        self.print_field(&query.field, 0)
    }

    fn print_field(&self, field: &Field, indent: usize) -> String {
        let arguments = if field.arguments.is_empty() {
            String::new()
        } else {
            self.print_arguments(&field.arguments)
        };
        let calls: String = field.calls.iter().map(|c| self.print_call(c)).collect();
        format!(
            "{}{}{} {}",
            field.name,
            arguments,
            calls,
            self.print_body(&field.fields, indent)
        )
    }

    fn print_call(&self, call: &CallExpression) -> String {
        format!(".{}{}", call.callee, self.print_arguments(&call.arguments))
    }

    fn print_arguments(&self, arguments: &[Argument]) -> String {
        let args: Vec<String> = arguments.iter().map(|a| self.print_argument(a)).collect();
        format!("({})", args.join(", "))
    }

    fn print_argument(&self, argument: &Argument) -> String {
        match argument {
            Argument::Literal(literal) => literal.raw.clone(),
            Argument::Parameter { name } => format!("<{}>", name),
            Argument::Positional { index } => format!("&{}", index),
        }
    }

    fn print_body(&self, fields: &[Field], indent: usize) -> String {
        if fields.is_empty() {
            return "{}".to_string();
        }

        if self.pretty {
            let mut result = "{\n".to_string();
            let items: Vec<String> = fields
                .iter()
                .map(|f| {
                    format!(
                        "{}{}",
                        self.indent(indent + 1),
                        self.print_field(f, indent + 1)
                    )
                })
                .collect();
            result.push_str(&items.join(",\n"));
            result.push('\n');
            result.push_str(&self.indent(indent));
            result.push('}');
            result
        } else {
            let items: Vec<String> = fields.iter().map(|f| self.print_field(f, indent)).collect();
            format!("{{{}}}", items.join(", "))
        }
    }

    fn indent(&self, level: usize) -> String {
        "  ".repeat(level)
    }
}

/// Prints a query on a single line.
///
/// # Examples
///
/// ```
/// use graphql_tag::parse;
/// use graphql_tag::output::to_source;
///
/// let query = parse("user.byId(&0).friends(10, <order>) { name {} }").unwrap();
/// assert_eq!(to_source(&query), "user.byId(&0).friends(10, <order>) {name {}}");
/// ```
pub fn to_source(query: &Query) -> String {
    QueryPrinter::new(false).print(query)
}

/// Prints a query with one field per line and 2-space indentation.
pub fn to_source_pretty(query: &Query) -> String {
    QueryPrinter::new(true).print(query)
}
