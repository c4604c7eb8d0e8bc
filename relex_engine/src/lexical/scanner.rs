//! Core scanner implementation
//!
//! Tokenization is driven entirely by the grammar's token catalogue: at each
//! input position the scanner tries the declared surface forms, longest
//! first, and everything in between becomes operand text. Word-like surface
//! forms match case-insensitively and only at identifier boundaries; a
//! function name is only a function token when the next non-space character
//! is the grammar's call-open character, so an ordinary parameter may share
//! its name with a function.

use crate::config::constants::compile_time::lexical::*;
use crate::grammar::LanguageDefinition;
use crate::log_debug;
use crate::tokens::{Lexeme, Token};
use crate::utils::{Position, Span, Spanned};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Identifier matching mode for one `parse` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMode {
    /// Operand identifiers are preserved verbatim
    Exact,
    /// Operand identifiers are lower-cased and punctuation-folded
    NonExact,
}

/// Normalize a name for non-exact matching: lower-case, with every character
/// outside `[a-z0-9_]` replaced by `_`.
pub fn non_exact_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|ch| {
            if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

/// Lexical analysis errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScanError {
    #[error("expression too long: {length} bytes (max {MAX_EXPRESSION_LENGTH})")]
    ExpressionTooLong { length: usize },

    #[error("operand too long at {span}: {length} characters (max {MAX_OPERAND_LENGTH})")]
    OperandTooLong { length: usize, span: Span },

    #[error("too many tokens: {count} (max {MAX_TOKEN_COUNT})")]
    TooManyTokens { count: usize },
}

impl ScanError {
    /// Get span if available
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::OperandTooLong { span, .. } => Some(*span),
            Self::ExpressionTooLong { .. } | Self::TooManyTokens { .. } => None,
        }
    }
}

/// Grammar-driven scanner
#[derive(Debug)]
pub struct Scanner {
    /// Declared tokens ordered longest surface form first, so `==` wins
    /// over `=` and `<=` over `<`
    matchers: Vec<Arc<Token>>,
    call_open: char,
}

impl Scanner {
    /// Build a scanner over a grammar's token catalogue
    pub fn new<L: LanguageDefinition>(language: &L) -> Self {
        let mut matchers: Vec<Arc<Token>> = language
            .operators()
            .iter()
            .chain(language.functions())
            .cloned()
            .collect();
        matchers.sort_by(|a, b| b.text().len().cmp(&a.text().len()));

        Self {
            matchers,
            call_open: language.call_open(),
        }
    }

    /// Tokenize expression text into spanned lexemes
    pub fn scan(&self, text: &str, mode: MatchMode) -> Result<Vec<Spanned<Lexeme>>, ScanError> {
        if text.len() > MAX_EXPRESSION_LENGTH {
            return Err(ScanError::ExpressionTooLong { length: text.len() });
        }

        log_debug!("Starting lexical scan",
            "length" => text.len(),
            "mode" => format!("{:?}", mode)
        );

        let mut lexemes: Vec<Spanned<Lexeme>> = Vec::new();
        let mut operand = String::new();
        let mut operand_start = Position::start();
        let mut pos = Position::start();

        while pos.offset < text.len() {
            if let Some(token) = self.match_token_at(text, pos.offset) {
                let matched = token.text();
                let end = pos.advance_str(&text[pos.offset..pos.offset + matched.len()]);

                self.flush_operand(&mut lexemes, &mut operand, operand_start, pos, mode)?;
                lexemes.push(Spanned::new(Lexeme::Token(token), Span::new(pos, end)));

                if lexemes.len() > MAX_TOKEN_COUNT {
                    return Err(ScanError::TooManyTokens {
                        count: lexemes.len(),
                    });
                }

                pos = end;
                continue;
            }

            let ch = text[pos.offset..]
                .chars()
                .next()
                .expect("offset is on a char boundary");
            if operand.is_empty() {
                operand_start = pos;
            }
            operand.push(ch);
            pos = pos.advance(ch);
        }

        self.flush_operand(&mut lexemes, &mut operand, operand_start, pos, mode)?;

        log_debug!("Lexical scan complete", "lexemes" => lexemes.len());
        Ok(lexemes)
    }

    /// Emit accumulated operand text, trimmed of surrounding whitespace and
    /// normalized in non-exact mode. Whitespace-only runs produce nothing.
    fn flush_operand(
        &self,
        lexemes: &mut Vec<Spanned<Lexeme>>,
        operand: &mut String,
        start: Position,
        end: Position,
        mode: MatchMode,
    ) -> Result<(), ScanError> {
        if operand.is_empty() {
            return Ok(());
        }

        let raw = std::mem::take(operand);
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        let span = Span::new(start, end);
        if trimmed.chars().count() > MAX_OPERAND_LENGTH {
            return Err(ScanError::OperandTooLong {
                length: trimmed.chars().count(),
                span,
            });
        }

        let text = match mode {
            MatchMode::Exact => trimmed.to_string(),
            MatchMode::NonExact => non_exact_name(trimmed),
        };

        lexemes.push(Spanned::new(Lexeme::Operand(text), span));
        Ok(())
    }

    /// Try to match a declared token at the given byte offset
    fn match_token_at(&self, text: &str, offset: usize) -> Option<Arc<Token>> {
        let window = &text[offset..];

        for token in &self.matchers {
            let surface = token.text();
            let Some(candidate) = window.get(..surface.len()) else {
                continue;
            };
            if !candidate.eq_ignore_ascii_case(surface) {
                continue;
            }

            if token.is_word_like() {
                // Reject matches embedded inside a longer identifier
                let preceded = text[..offset]
                    .chars()
                    .next_back()
                    .is_some_and(|ch| ch.is_alphanumeric() || ch == '_');
                let followed = window[surface.len()..]
                    .chars()
                    .next()
                    .is_some_and(|ch| ch.is_alphanumeric() || ch == '_');
                if preceded || followed {
                    continue;
                }
            }

            if token.is_function() {
                // A function name is only a call when its argument list opens
                let next = window[surface.len()..].chars().find(|ch| *ch != ' ');
                if next != Some(self.call_open) {
                    continue;
                }
            }

            return Some(token.clone());
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Relation;
    use crate::tokens::TokenClass;
    use crate::tree::{Bindings, EvalResult, Kernel, Node, Value, ValueKind};
    use assert_matches::assert_matches;

    #[derive(Debug)]
    struct NullKernel;

    impl Kernel for NullKernel {
        fn result_kind(&self) -> ValueKind {
            ValueKind::String
        }

        fn apply(&self, _operands: &[Node], _bindings: &Bindings) -> EvalResult<Value> {
            Ok(Value::Str(String::new()))
        }
    }

    struct TestGrammar {
        operators: Vec<Arc<Token>>,
        functions: Vec<Arc<Token>>,
    }

    impl TestGrammar {
        fn new() -> Self {
            let kernel: Arc<dyn Kernel> = Arc::new(NullKernel);
            Self {
                operators: vec![
                    Arc::new(Token::open_bracket(TokenClass(2), "(")),
                    Arc::new(Token::close_bracket(TokenClass(3), ")")),
                    Arc::new(Token::separator(TokenClass(11), ",")),
                    Arc::new(Token::diadic(TokenClass(7), "=", kernel.clone())),
                    Arc::new(Token::diadic(TokenClass(7), "==", kernel.clone())),
                    Arc::new(Token::diadic(TokenClass(8), "+", kernel.clone())),
                ],
                functions: vec![Arc::new(Token::function(
                    TokenClass(10),
                    "lower",
                    1,
                    kernel,
                ))],
            }
        }
    }

    impl LanguageDefinition for TestGrammar {
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
            TokenClass(0)
        }

        fn stream_end_class(&self) -> TokenClass {
            TokenClass(1)
        }

        fn relation(&self, _current: TokenClass, _previous: TokenClass) -> Relation {
            Relation::Error
        }
    }

    fn scan(text: &str, mode: MatchMode) -> Vec<String> {
        let grammar = TestGrammar::new();
        let scanner = Scanner::new(&grammar);
        scanner
            .scan(text, mode)
            .unwrap()
            .into_iter()
            .map(|lexeme| lexeme.value.text().to_string())
            .collect()
    }

    #[test]
    fn test_operands_and_operators_interleave() {
        assert_eq!(scan("1+2", MatchMode::Exact), vec!["1", "+", "2"]);
    }

    #[test]
    fn test_longest_match_wins() {
        assert_eq!(scan("a==b", MatchMode::Exact), vec!["a", "==", "b"]);
        assert_eq!(scan("a=b", MatchMode::Exact), vec!["a", "=", "b"]);
    }

    #[test]
    fn test_whitespace_is_operand_padding() {
        assert_eq!(scan(" 1 + 2 ", MatchMode::Exact), vec!["1", "+", "2"]);
    }

    #[test]
    fn test_interior_whitespace_survives_exact_mode() {
        assert_eq!(scan("Hello World", MatchMode::Exact), vec!["Hello World"]);
    }

    #[test]
    fn test_non_exact_mode_normalizes_operands() {
        assert_eq!(scan("Hello World", MatchMode::NonExact), vec!["hello_world"]);
        assert_eq!(scan("42", MatchMode::NonExact), vec!["42"]);
    }

    #[test]
    fn test_function_requires_call_open() {
        // Followed by an argument list: a function token
        assert_eq!(
            scan("lower(x)", MatchMode::Exact),
            vec!["lower", "(", "x", ")"]
        );
        // Bare name: ordinary operand text
        assert_eq!(scan("lower + 1", MatchMode::Exact), vec!["lower", "+", "1"]);
    }

    #[test]
    fn test_function_name_matches_case_insensitively() {
        assert_eq!(
            scan("LOWER(x)", MatchMode::Exact),
            vec!["lower", "(", "x", ")"]
        );
    }

    #[test]
    fn test_embedded_function_name_is_operand() {
        assert_eq!(
            scan("lowercase(x)", MatchMode::Exact),
            vec!["lowercase", "(", "x", ")"]
        );
    }

    #[test]
    fn test_non_exact_name_utility() {
        assert_eq!(non_exact_name("Hello World!"), "hello_world_");
        assert_eq!(non_exact_name("already_ok_42"), "already_ok_42");
    }

    #[test]
    fn test_expression_length_limit() {
        let grammar = TestGrammar::new();
        let scanner = Scanner::new(&grammar);
        let oversized = "x".repeat(MAX_EXPRESSION_LENGTH + 1);
        assert_matches!(
            scanner.scan(&oversized, MatchMode::Exact),
            Err(ScanError::ExpressionTooLong { .. })
        );
    }

    #[test]
    fn test_spans_track_positions() {
        let grammar = TestGrammar::new();
        let scanner = Scanner::new(&grammar);
        let lexemes = scanner.scan("ab+cd", MatchMode::Exact).unwrap();
        assert_eq!(lexemes[1].span.start.offset, 2);
        assert_eq!(lexemes[2].span.start.offset, 3);
        assert_eq!(lexemes[2].span.end.offset, 5);
    }
}
