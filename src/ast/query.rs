use crate::ast::Argument;
use serde::Serialize;

/// A parsed document. Always holds exactly one root field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Query {
    pub field: Field,
}

/// A named selection.
///
/// `fields` is empty for leaves (`id {}`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Field {
    pub name: String,

    /// Arguments written directly after the name, as in `user(42) {}`
    pub arguments: Vec<Argument>,

    /// Call expressions in source order
    pub calls: Vec<CallExpression>,

    /// Sub-selections in source order
    pub fields: Vec<Field>,
}

impl Field {
    /// A field with no calls and no sub-selections.
    pub fn leaf(name: impl Into<String>) -> Self {
        Field {
            name: name.into(),
            arguments: vec![],
            calls: vec![],
            fields: vec![],
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A `.callee(args)` modifier attached to a field.
///
/// # Examples
/// ```text
/// viewer.avatar(<size>).first(10) { id {} }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct CallExpression {
    pub callee: String,
    pub arguments: Vec<Argument>,
}
