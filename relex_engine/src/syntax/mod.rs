//! Syntax analysis
//!
//! The analyser converts a lexeme stream into a compiled expression tree by
//! consulting the grammar's precedence relation for every (token just read,
//! token atop the stack) pair.

pub mod analyzer;
pub mod error;

pub use analyzer::SyntaxAnalyser;
pub use error::{SyntaxError, SyntaxResult};
