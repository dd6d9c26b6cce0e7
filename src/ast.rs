//! # Query Template Language - Abstract Syntax Tree
//!
//! A query is one root field with nested sub-selections. Fields can carry
//! call expressions, which take literal, named or positional arguments.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[query]** - The query tree: root, fields and call expressions
//! - **[arguments]** - Call arguments (literals, parameters, positional references)
//!
//! ## Quick Start
//!
//! ```text
//! viewer.avatar(<size>) { id {}, url {} }
//! ```
//!
//! Selects `id` and `url` from `viewer`, whose `avatar` modifier takes the
//! `size` variable.
//!
//! ## Core Concepts
//!
//! ### Field Bodies
//!
//! Every field is written with a body, even leaves: `id {}`. There is no
//! shorthand for a body-less field.
//!
//! ### Arguments
//!
//! - **Literals** - any JSON value: `1`, `"a"`, `true`, `null`, `[1, 2]`, `{"a": 1}`
//! - **Parameters** `<name>` - looked up in the variables at resolve time
//! - **Positional references** `&N` - the Nth value interpolated into the template
//!
//! ## Examples
//!
//! ### Chained Calls
//!
//! ```text
//! user.friends(10).orderBy("name") { name {} }
//! ```
//!
//! ### Template Interpolation
//!
//! ```text
//! user.byId(&0) { name {} }
//! ```
pub mod arguments;
pub mod query;
pub mod tokens;

pub use arguments::{Argument, Literal};
pub use query::{CallExpression, Field, Query};
pub use tokens::{Position, Token, TokenKind};
