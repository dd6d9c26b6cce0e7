use crate::ast::{Argument, CallExpression, Field, Query};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Runtime values a query is resolved against.
///
/// # Examples
///
/// For the template source `user.byId(&0).avatar(<size>) { url {} }`:
/// - `positional[0]` fills `&0`
/// - `named["size"]` fills `<size>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    /// Values interpolated into the template, indexed by `&N`
    pub positional: Vec<Value>,

    /// Variables supplied at call time, looked up by `<name>`
    pub named: HashMap<String, Value>,
}

impl State {
    pub fn new(positional: Vec<Value>, named: HashMap<String, Value>) -> Self {
        State { positional, named }
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: Value) -> Self {
        self.named.insert(name.into(), value);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Missing value for parameter <{0}>")]
    MissingParameter(String),

    #[error("Positional reference &{index} is out of range ({len} value(s) interpolated)")]
    PositionOutOfRange { index: usize, len: usize },
}

/// A query with every argument replaced by its runtime value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedQuery {
    pub field: ResolvedField,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedField {
    pub name: String,
    pub arguments: Vec<Value>,
    pub calls: Vec<ResolvedCall>,
    pub fields: Vec<ResolvedField>,
}

impl ResolvedField {
    /// First sub-selection with the given name.
    pub fn field(&self, name: &str) -> Option<&ResolvedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// First call with the given callee.
    pub fn call(&self, name: &str) -> Option<&ResolvedCall> {
        self.calls.iter().find(|c| c.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCall {
    pub name: String,
    pub arguments: Vec<Value>,
}

/// Resolve every argument in `query` against `state`.
///
/// Literals resolve to their decoded value, `<name>` to `state.named[name]`
/// and `&N` to `state.positional[N]`. Values are cloned into the result; the
/// query itself is left untouched and can be resolved again.
pub fn resolve(query: &Query, state: &State) -> Result<ResolvedQuery, ResolveError> {
    let field = resolve_field(&query.field, state)?;
    log::debug!("resolved query `{}`", field.name);
    Ok(ResolvedQuery { field })
}

fn resolve_field(field: &Field, state: &State) -> Result<ResolvedField, ResolveError> {
    let arguments = resolve_arguments(&field.arguments, state)?;

    let calls = field
        .calls
        .iter()
        .map(|call| resolve_call(call, state))
        .collect::<Result<Vec<_>, _>>()?;

    let fields = field
        .fields
        .iter()
        .map(|child| resolve_field(child, state))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ResolvedField {
        name: field.name.clone(),
        arguments,
        calls,
        fields,
    })
}

fn resolve_call(call: &CallExpression, state: &State) -> Result<ResolvedCall, ResolveError> {
    Ok(ResolvedCall {
        name: call.callee.clone(),
        arguments: resolve_arguments(&call.arguments, state)?,
    })
}

fn resolve_arguments(arguments: &[Argument], state: &State) -> Result<Vec<Value>, ResolveError> {
    arguments
        .iter()
        .map(|arg| resolve_argument(arg, state))
        .collect()
}

fn resolve_argument(argument: &Argument, state: &State) -> Result<Value, ResolveError> {
    match argument {
        Argument::Literal(literal) => Ok(literal.cooked.clone()),

        Argument::Parameter { name } => state
            .named
            .get(name)
            .cloned()
            .ok_or_else(|| ResolveError::MissingParameter(name.clone())),

        Argument::Positional { index } => {
            state
                .positional
                .get(*index)
                .cloned()
                .ok_or(ResolveError::PositionOutOfRange {
                    index: *index,
                    len: state.positional.len(),
                })
        }
    }
}
