//! Grammar token catalogue
//!
//! Tokens are the atomic grammar units a language definition declares:
//! diadic and monadic operators, function calls, brackets, and the argument
//! separator. Each carries a class index used purely to look up grammar
//! relations, and a surface form the scanner matches against input text.
//! Start and end-of-stream sentinels are synthesized by the analyser; their
//! classes come from the language definition.

use crate::tree::Kernel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A token's precedence-category coordinate in the relation table.
///
/// Class indices identify categories, not token instances: several distinct
/// symbols may share one class (all comparison operators, for example).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct TokenClass(pub usize);

impl TokenClass {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An operator token: class, surface form, and evaluation kernel
#[derive(Debug, Clone)]
pub struct OperatorDef {
    pub class: TokenClass,
    pub text: String,
    pub kernel: Arc<dyn Kernel>,
}

/// A function token with a fixed declared parameter count
#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub class: TokenClass,
    pub name: String,
    pub arity: usize,
    pub kernel: Arc<dyn Kernel>,
}

/// A structural token (bracket or separator) with no semantics of its own
#[derive(Debug, Clone)]
pub struct PunctDef {
    pub class: TokenClass,
    pub text: String,
}

/// One declared grammar token
#[derive(Debug, Clone)]
pub enum Token {
    /// Two-operand operator
    Diadic(OperatorDef),
    /// One-operand (prefix) operator
    Monadic(OperatorDef),
    /// Function call with fixed arity
    Function(FunctionDef),
    /// Precedence-manipulating open bracket; transparent in the tree
    OpenBracket(PunctDef),
    /// Closing bracket
    CloseBracket(PunctDef),
    /// Function-argument separator
    Separator(PunctDef),
}

impl Token {
    /// Declare a diadic operator
    pub fn diadic(class: TokenClass, text: &str, kernel: Arc<dyn Kernel>) -> Self {
        Self::Diadic(OperatorDef {
            class,
            text: text.to_string(),
            kernel,
        })
    }

    /// Declare a monadic operator
    pub fn monadic(class: TokenClass, text: &str, kernel: Arc<dyn Kernel>) -> Self {
        Self::Monadic(OperatorDef {
            class,
            text: text.to_string(),
            kernel,
        })
    }

    /// Declare a function with its fixed parameter count
    pub fn function(class: TokenClass, name: &str, arity: usize, kernel: Arc<dyn Kernel>) -> Self {
        Self::Function(FunctionDef {
            class,
            name: name.to_string(),
            arity,
            kernel,
        })
    }

    /// Declare an open bracket
    pub fn open_bracket(class: TokenClass, text: &str) -> Self {
        Self::OpenBracket(PunctDef {
            class,
            text: text.to_string(),
        })
    }

    /// Declare a close bracket
    pub fn close_bracket(class: TokenClass, text: &str) -> Self {
        Self::CloseBracket(PunctDef {
            class,
            text: text.to_string(),
        })
    }

    /// Declare the argument separator
    pub fn separator(class: TokenClass, text: &str) -> Self {
        Self::Separator(PunctDef {
            class,
            text: text.to_string(),
        })
    }

    /// The relation coordinate of this token
    pub fn class(&self) -> TokenClass {
        match self {
            Self::Diadic(def) | Self::Monadic(def) => def.class,
            Self::Function(def) => def.class,
            Self::OpenBracket(def) | Self::CloseBracket(def) | Self::Separator(def) => def.class,
        }
    }

    /// The surface form the scanner matches
    pub fn text(&self) -> &str {
        match self {
            Self::Diadic(def) | Self::Monadic(def) => &def.text,
            Self::Function(def) => &def.name,
            Self::OpenBracket(def) | Self::CloseBracket(def) | Self::Separator(def) => &def.text,
        }
    }

    /// Check if this is a function token
    pub fn is_function(&self) -> bool {
        matches!(self, Self::Function(_))
    }

    /// Check if this is the open-bracket token
    pub fn is_open_bracket(&self) -> bool {
        matches!(self, Self::OpenBracket(_))
    }

    /// Word-like surface forms (function names) match case-insensitively and
    /// only at identifier boundaries; symbol forms match anywhere.
    pub fn is_word_like(&self) -> bool {
        self.text()
            .chars()
            .all(|ch| ch.is_alphanumeric() || ch == '_')
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// One unit of scanner output: a declared grammar token or free operand text
#[derive(Debug, Clone)]
pub enum Lexeme {
    Token(Arc<Token>),
    Operand(String),
}

impl Lexeme {
    /// Surface text of this lexeme, for diagnostics
    pub fn text(&self) -> &str {
        match self {
            Self::Token(token) => token.text(),
            Self::Operand(text) => text,
        }
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}
