//! Token system for expression scanning
//!
//! A language definition declares its complete token catalogue here; the
//! scanner matches input text against it and the syntax analyser consults the
//! grammar relation with the resulting token classes.

pub mod token;

pub use token::{FunctionDef, Lexeme, OperatorDef, PunctDef, Token, TokenClass};
