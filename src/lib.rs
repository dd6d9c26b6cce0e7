pub mod ast;
pub mod cli;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod template;
pub mod transform;

pub use ast::{Argument, CallExpression, Field, Literal, Position, Query, Token, TokenKind};
pub use lexer::{Found, LexError, Lexer, tokenize};
pub use output::{to_source, to_source_pretty};
pub use parser::{ErrorKind, ParseError, Parser, parse};
pub use template::{CompiledTemplate, Template, concat};
pub use transform::{ResolveError, ResolvedQuery, State, resolve};
