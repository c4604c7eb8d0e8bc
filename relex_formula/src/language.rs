//! The formula language definition
//!
//! Declares the complete catalogue: brackets, the boolean connectives, the
//! comparison family, additive and multiplicative arithmetic with string
//! concatenation, the argument separator, and the nine builtin functions.
//! Together with the relation in [`crate::relation`] this is the entire
//! grammar; the engine supplies everything else.

use crate::classes::FormulaClass;
use crate::functions::Builtin;
use crate::operators::{DiadicOp, NotOp};
use relex_engine::{LanguageDefinition, Relation, Token, TokenClass};
use std::sync::Arc;

/// The default formula grammar
#[derive(Debug)]
pub struct FormulaLanguage {
    operators: Vec<Arc<Token>>,
    functions: Vec<Arc<Token>>,
}

impl FormulaLanguage {
    pub fn new() -> Self {
        use FormulaClass::*;

        let mut operators = vec![
            Arc::new(Token::open_bracket(OpenBracket.index(), "(")),
            Arc::new(Token::close_bracket(CloseBracket.index(), ")")),
            Arc::new(Token::diadic(Or.index(), "|", Arc::new(DiadicOp::Or))),
            Arc::new(Token::diadic(And.index(), "&", Arc::new(DiadicOp::And))),
            Arc::new(Token::monadic(Not.index(), "!", Arc::new(NotOp))),
            Arc::new(Token::separator(Separator.index(), ",")),
        ];

        // The comparison family shares one class; `==` is an alias spelling
        // of `=` and `!=` of `<>`
        for (symbol, op) in [
            ("=", DiadicOp::Equal),
            ("==", DiadicOp::Equal),
            ("<>", DiadicOp::NotEqual),
            ("!=", DiadicOp::NotEqual),
            (">=", DiadicOp::GreaterOrEqual),
            (">", DiadicOp::Greater),
            ("<=", DiadicOp::LessOrEqual),
            ("<", DiadicOp::Less),
        ] {
            operators.push(Arc::new(Token::diadic(
                Compare.index(),
                symbol,
                Arc::new(op),
            )));
        }

        for (symbol, op) in [
            ("+", DiadicOp::Add),
            ("-", DiadicOp::Subtract),
            (".", DiadicOp::Concat),
        ] {
            operators.push(Arc::new(Token::diadic(
                Additive.index(),
                symbol,
                Arc::new(op),
            )));
        }

        for (symbol, op) in [
            ("*", DiadicOp::Multiply),
            ("/", DiadicOp::Divide),
            ("%", DiadicOp::Modulo),
        ] {
            operators.push(Arc::new(Token::diadic(
                Multiplicative.index(),
                symbol,
                Arc::new(op),
            )));
        }

        let functions = Builtin::ALL
            .iter()
            .map(|builtin| {
                Arc::new(Token::function(
                    Function.index(),
                    builtin.name(),
                    builtin.arity(),
                    Arc::new(*builtin),
                ))
            })
            .collect();

        Self {
            operators,
            functions,
        }
    }
}

impl Default for FormulaLanguage {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageDefinition for FormulaLanguage {
    fn operators(&self) -> &[Arc<Token>] {
        &self.operators
    }

    fn functions(&self) -> &[Arc<Token>] {
        &self.functions
    }

    fn call_open(&self) -> char {
        '('
    }

    fn stream_start_class(&self) -> TokenClass {
        FormulaClass::StreamStart.index()
    }

    fn stream_end_class(&self) -> TokenClass {
        FormulaClass::StreamEnd.index()
    }

    fn relation(&self, current: TokenClass, previous: TokenClass) -> Relation {
        crate::relation::relation(current, previous)
    }
}
