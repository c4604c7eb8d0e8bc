//! Relation-table expression engine
//!
//! Compiles textual expressions into immutable parse trees under a
//! caller-supplied grammar description, then evaluates them against named
//! parameter bindings as strings, integers, or booleans with defined
//! cross-kind coercion.
//!
//! The grammar is declarative: a token catalogue plus a precedence *relation*
//! over pairs of adjacent token classes. The analyser is a generic
//! shift/reduce loop driven entirely by that relation, so new expression
//! languages need no parser changes. See the `relex_formula` crate for a
//! complete grammar built on this engine.

// Internal modules
pub mod config;
pub mod engine;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod syntax;
pub mod tokens;
pub mod tree;
pub mod utils;

// Re-export key types for library consumers
pub use engine::{non_exact_name, CompiledExpression, ExpressionEngine, MatchMode, ParseError};
pub use grammar::{GrammarError, LanguageDefinition, Relation};
pub use lexical::ScanError;
pub use syntax::{SyntaxError, SyntaxResult};
pub use tokens::{Token, TokenClass};
pub use tree::{Bindings, EvalError, EvalResult, Kernel, Node, Value, ValueKind};
