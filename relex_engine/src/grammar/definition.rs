//! Declarative grammar description
//!
//! Callers implement [`LanguageDefinition`] to describe an expression
//! language without touching the parser: the full token catalogue, the
//! function-argument-opening character, the sentinel classes, and the
//! precedence relation between any two adjacent token classes.

use super::relation::Relation;
use crate::config::constants::compile_time::syntax::MAX_FUNCTION_ARITY;
use crate::tokens::{Token, TokenClass};
use std::sync::Arc;

/// A complete, immutable expression-grammar description.
///
/// A definition is pure configuration: constructed once, never mutated, and
/// shared by every expression compiled under it.
pub trait LanguageDefinition: Send + Sync {
    /// Operator, bracket, and separator tokens, in declaration order
    fn operators(&self) -> &[Arc<Token>];

    /// Function tokens, in declaration order
    fn functions(&self) -> &[Arc<Token>];

    /// The character that opens a function argument list
    fn call_open(&self) -> char;

    /// Class of the start-of-stream sentinel (the stack base)
    fn stream_start_class(&self) -> TokenClass;

    /// Class of the end-of-stream sentinel (the termination signal)
    fn stream_end_class(&self) -> TokenClass;

    /// The precedence relation for (token just read, token atop the stack)
    fn relation(&self, current: TokenClass, previous: TokenClass) -> Relation;

    /// The declared token-class space: every catalogue class plus the
    /// sentinels. Used for grammar validation.
    fn classes(&self) -> Vec<TokenClass> {
        let mut classes: Vec<TokenClass> = self
            .operators()
            .iter()
            .chain(self.functions())
            .map(|token| token.class())
            .collect();
        classes.push(self.stream_start_class());
        classes.push(self.stream_end_class());
        classes.sort();
        classes.dedup();
        classes
    }
}

/// Defects in a grammar description, detected at engine construction
#[derive(Debug, Clone, thiserror::Error)]
pub enum GrammarError {
    #[error("relation for (end-of-stream, start-of-stream) must be Complete, found {found}")]
    MissingComplete { found: Relation },

    #[error("relation for ({current}, {previous}) must not be Complete")]
    StrayComplete {
        current: TokenClass,
        previous: TokenClass,
    },

    #[error("grammar declares no open-bracket token matching call-open character '{call_open}'")]
    MissingCallOpen { call_open: char },

    #[error("function '{name}' declares {arity} parameters, maximum is {MAX_FUNCTION_ARITY}")]
    ArityTooLarge { name: String, arity: usize },

    #[error("duplicate token surface form '{text}' in catalogue")]
    DuplicateSurfaceForm { text: String },
}

/// Validate a grammar description against its structural invariants.
///
/// Checks that the relation routes (end-of-stream, start-of-stream) to
/// `Complete` and only that pairing, that the call-open character is a
/// declared open bracket, that declared arities fit the engine limit, and
/// that surface forms are unambiguous.
pub fn validate_language<L: LanguageDefinition>(language: &L) -> Result<(), GrammarError> {
    let start = language.stream_start_class();
    let end = language.stream_end_class();

    let found = language.relation(end, start);
    if found != Relation::Complete {
        return Err(GrammarError::MissingComplete { found });
    }

    let classes = language.classes();
    for &current in &classes {
        for &previous in &classes {
            if current == end && previous == start {
                continue;
            }
            if language.relation(current, previous) == Relation::Complete {
                return Err(GrammarError::StrayComplete { current, previous });
            }
        }
    }

    let call_open = language.call_open();
    let has_call_open = language
        .operators()
        .iter()
        .any(|token| token.is_open_bracket() && token.text() == call_open.to_string());
    if !has_call_open {
        return Err(GrammarError::MissingCallOpen { call_open });
    }

    let mut seen = std::collections::HashSet::new();
    for token in language.operators().iter().chain(language.functions()) {
        let lowered = token.text().to_lowercase();
        if !seen.insert(lowered) {
            return Err(GrammarError::DuplicateSurfaceForm {
                text: token.text().to_string(),
            });
        }

        if let Token::Function(def) = token.as_ref() {
            if def.arity > MAX_FUNCTION_ARITY {
                return Err(GrammarError::ArityTooLarge {
                    name: def.name.clone(),
                    arity: def.arity,
                });
            }
        }
    }

    Ok(())
}
