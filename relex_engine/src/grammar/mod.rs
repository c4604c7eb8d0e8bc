//! Grammar description layer
//!
//! The grammar is a precedence relation over token-class pairs plus a token
//! catalogue. Generalizing classical operator precedence, each ordered pair
//! of adjacent classes has an independently specified relation, which allows
//! context-sensitive behavior such as a separator that only means something
//! inside a function argument list.

pub mod definition;
pub mod relation;

pub use definition::{validate_language, GrammarError, LanguageDefinition};
pub use relation::Relation;
