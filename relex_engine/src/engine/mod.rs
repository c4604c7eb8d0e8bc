//! Engine facade
//!
//! Ties the stages together behind one entry point: text is scanned and
//! parsed under a validated grammar description, and the compiled expression
//! comes back as an immutable value the caller threads into evaluation. The
//! facade holds no compiled state of its own, so one engine may serve many
//! expressions and one compiled expression may be evaluated from many threads.

use crate::grammar::{validate_language, GrammarError, LanguageDefinition};
use crate::lexical::{ScanError, Scanner};
use crate::syntax::{SyntaxAnalyser, SyntaxError};
use crate::tree::{Bindings, EvalResult, Node};
use crate::{log_debug, log_error};
use std::fmt;

pub use crate::lexical::{non_exact_name, MatchMode};

/// Failures of one `parse` call
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    /// Get span if available
    pub fn span(&self) -> Option<crate::utils::Span> {
        match self {
            Self::Scan(error) => error.span(),
            Self::Syntax(error) => error.span(),
        }
    }
}

/// A successfully compiled expression.
///
/// The unit of reuse: immutable, cheap to share, evaluated any number of
/// times against fresh bindings with identical results for identical inputs.
#[derive(Debug, Clone)]
pub struct CompiledExpression {
    root: Node,
}

impl CompiledExpression {
    /// The root of the compiled tree
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Evaluate, coercing the result to a string
    pub fn evaluate_as_string(&self, bindings: &Bindings) -> EvalResult<String> {
        self.root.eval_string(bindings)
    }

    /// Evaluate, coercing the result to an integer
    pub fn evaluate_as_integer(&self, bindings: &Bindings) -> EvalResult<i64> {
        self.root.eval_integer(bindings)
    }

    /// Evaluate, coercing the result to a boolean
    pub fn evaluate_as_boolean(&self, bindings: &Bindings) -> EvalResult<bool> {
        self.root.eval_boolean(bindings)
    }
}

impl fmt::Display for CompiledExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

/// Parse-and-evaluate facade over one grammar description
#[derive(Debug)]
pub struct ExpressionEngine<L: LanguageDefinition> {
    language: L,
    scanner: Scanner,
}

impl<L: LanguageDefinition> ExpressionEngine<L> {
    /// Create an engine, validating the grammar's structural invariants
    pub fn new(language: L) -> Result<Self, GrammarError> {
        validate_language(&language)?;
        let scanner = Scanner::new(&language);
        Ok(Self { language, scanner })
    }

    /// The grammar this engine compiles under
    pub fn language(&self) -> &L {
        &self.language
    }

    /// Compile expression text into an immutable expression value
    pub fn parse(&self, text: &str, mode: MatchMode) -> Result<CompiledExpression, ParseError> {
        log_debug!("Compiling expression", "length" => text.len());

        let lexemes = self.scanner.scan(text, mode).map_err(|error| {
            log_error!("Expression scan failed", "error" => error);
            error
        })?;

        let root = SyntaxAnalyser::new(&self.language)
            .analyse(lexemes)
            .map_err(|error| {
                log_error!("Expression parse failed", "error" => error);
                error
            })?;

        Ok(CompiledExpression { root })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Relation;
    use crate::tokens::{Token, TokenClass};
    use crate::tree::{Kernel, Value, ValueKind};
    use assert_matches::assert_matches;
    use std::sync::Arc;

    #[derive(Debug)]
    struct Concat;

    impl Kernel for Concat {
        fn result_kind(&self) -> ValueKind {
            ValueKind::String
        }

        fn apply(&self, operands: &[Node], bindings: &Bindings) -> EvalResult<Value> {
            let mut out = operands[0].eval_string(bindings)?;
            out.push_str(&operands[1].eval_string(bindings)?);
            Ok(Value::Str(out))
        }
    }

    /// Single-operator grammar: `.` concatenation plus brackets.
    /// Classes: 0 start, 1 end, 2 `(`, 3 `)`, 4 `.`.
    #[derive(Debug)]
    struct JoinGrammar {
        operators: Vec<Arc<Token>>,
    }

    impl JoinGrammar {
        fn new() -> Self {
            Self {
                operators: vec![
                    Arc::new(Token::open_bracket(TokenClass(2), "(")),
                    Arc::new(Token::close_bracket(TokenClass(3), ")")),
                    Arc::new(Token::diadic(TokenClass(4), ".", Arc::new(Concat))),
                ],
            }
        }
    }

    impl LanguageDefinition for JoinGrammar {
        fn operators(&self) -> &[Arc<Token>] {
            &self.operators
        }

        fn functions(&self) -> &[Arc<Token>] {
            &[]
        }

        fn call_open(&self) -> char {
            '('
        }

        fn stream_start_class(&self) -> TokenClass {
            TokenClass(0)
        }

        fn stream_end_class(&self) -> TokenClass {
            TokenClass(1)
        }

        fn relation(&self, current: TokenClass, previous: TokenClass) -> Relation {
            use Relation::*;
            match (current.index(), previous.index()) {
                (1, 0) => Complete,
                (2 | 4, 0 | 2) => Start,
                (3, 2) => In,
                (4, 4) => In,
                (3, 4) => End,
                (2, 4) => Start,
                (1, 4) => End,
                (3 | 4, 3) => End,
                (1, 3) => End,
                _ => Error,
            }
        }
    }

    fn engine() -> ExpressionEngine<JoinGrammar> {
        ExpressionEngine::new(JoinGrammar::new()).expect("valid grammar")
    }

    #[test]
    fn test_parse_returns_reusable_value() {
        let engine = engine();
        let compiled = engine.parse("a.b", MatchMode::Exact).unwrap();

        let mut first = Bindings::new();
        first.set("a", "left");
        first.set("b", "right");
        let mut second = Bindings::new();
        second.set("a", "x");
        second.set("b", "y");

        assert_eq!(compiled.evaluate_as_string(&first).unwrap(), "leftright");
        assert_eq!(compiled.evaluate_as_string(&second).unwrap(), "xy");
        // Same tree, same bindings, same answer
        assert_eq!(compiled.evaluate_as_string(&first).unwrap(), "leftright");
    }

    #[test]
    fn test_non_exact_parse_matches_normalized_bindings() {
        let engine = engine();
        let compiled = engine.parse("First Name.Last Name", MatchMode::NonExact).unwrap();

        let mut bindings = Bindings::new();
        bindings.set_non_exact("First Name", "Ada");
        bindings.set_non_exact("Last Name", "Lovelace");

        assert_eq!(
            compiled.evaluate_as_string(&bindings).unwrap(),
            "AdaLovelace"
        );
    }

    #[test]
    fn test_exact_parse_preserves_identifier_case() {
        let engine = engine();
        let compiled = engine.parse("Name", MatchMode::Exact).unwrap();
        // Unbound in exact mode: the identifier's own text, case intact
        assert_eq!(
            compiled.evaluate_as_string(&Bindings::new()).unwrap(),
            "Name"
        );
    }

    #[test]
    fn test_parse_error_surfaces_with_span() {
        let engine = engine();
        let error = engine.parse("a..b", MatchMode::Exact).unwrap_err();
        assert_matches!(error, ParseError::Syntax(_));
        assert!(error.span().is_some());
    }

    #[test]
    fn test_engine_rejects_invalid_grammar() {
        #[derive(Debug)]
        struct NoComplete(JoinGrammar);

        impl LanguageDefinition for NoComplete {
            fn operators(&self) -> &[Arc<Token>] {
                self.0.operators()
            }
            fn functions(&self) -> &[Arc<Token>] {
                self.0.functions()
            }
            fn call_open(&self) -> char {
                self.0.call_open()
            }
            fn stream_start_class(&self) -> TokenClass {
                self.0.stream_start_class()
            }
            fn stream_end_class(&self) -> TokenClass {
                self.0.stream_end_class()
            }
            fn relation(&self, _current: TokenClass, _previous: TokenClass) -> Relation {
                Relation::Error
            }
        }

        assert_matches!(
            ExpressionEngine::new(NoComplete(JoinGrammar::new())),
            Err(GrammarError::MissingComplete { .. })
        );
    }

    #[test]
    fn test_evaluate_coerces_across_kinds() {
        let engine = engine();
        let compiled = engine.parse("4.2", MatchMode::Exact).unwrap();
        // "4" . "2" concatenates to "42", which coerces to the integer 42
        assert_eq!(compiled.evaluate_as_string(&Bindings::new()).unwrap(), "42");
        assert_eq!(compiled.evaluate_as_integer(&Bindings::new()).unwrap(), 42);
        assert!(compiled.evaluate_as_boolean(&Bindings::new()).unwrap());
    }
}
