//! Relation-driven syntax analyser
//!
//! The analyser runs a shift/reduce loop over a stack of frames, each holding
//! one grammar token and at most one pending operand. Every token read is
//! consulted against the grammar relation exactly once per stack level; there
//! is no lookahead and no backtracking. Reductions are purely mechanical pops
//! driven by the relation outcome.

use crate::config::constants::compile_time::syntax::MAX_NESTING_DEPTH;
use crate::grammar::{LanguageDefinition, Relation};
use crate::log_debug;
use crate::syntax::error::{SyntaxError, SyntaxResult};
use crate::tokens::{Lexeme, Token, TokenClass};
use crate::tree::Node;
use crate::utils::{Span, Spanned};
use std::sync::Arc;

/// What a stack frame is keyed by
#[derive(Debug, Clone)]
enum FrameToken {
    /// The synthetic stack base
    StreamStart,
    /// A declared grammar token
    Grammar(Arc<Token>),
}

/// One level of the parse stack
#[derive(Debug, Clone)]
struct Frame {
    token: FrameToken,
    class: TokenClass,
    operand: Option<Node>,
    span: Span,
}

impl Frame {
    fn stream_start(class: TokenClass) -> Self {
        Self {
            token: FrameToken::StreamStart,
            class,
            operand: None,
            span: Span::dummy(),
        }
    }

    fn grammar(token: Arc<Token>, span: Span) -> Self {
        Self {
            class: token.class(),
            token: FrameToken::Grammar(token),
            operand: None,
            span,
        }
    }

    fn display(&self) -> &str {
        match &self.token {
            FrameToken::StreamStart => "start of expression",
            FrameToken::Grammar(token) => token.text(),
        }
    }
}

/// The token currently being consulted against the relation
enum Current<'t> {
    Grammar(&'t Arc<Token>),
    StreamEnd,
}

impl Current<'_> {
    fn display(&self) -> &str {
        match self {
            Self::Grammar(token) => token.text(),
            Self::StreamEnd => "end of expression",
        }
    }
}

/// Converts a lexeme stream into a compiled expression tree
pub struct SyntaxAnalyser<'a, L: LanguageDefinition> {
    language: &'a L,
}

impl<'a, L: LanguageDefinition> SyntaxAnalyser<'a, L> {
    /// Create an analyser over a grammar description
    pub fn new(language: &'a L) -> Self {
        Self { language }
    }

    /// Parse a scanned lexeme stream into a tree
    pub fn analyse(&self, lexemes: Vec<Spanned<Lexeme>>) -> SyntaxResult<Node> {
        log_debug!("Starting syntax analysis", "lexemes" => lexemes.len());

        let end_span = lexemes
            .last()
            .map(|lexeme| Span::new(lexeme.span.end, lexeme.span.end))
            .unwrap_or_else(Span::dummy);

        let mut stack = vec![Frame::stream_start(self.language.stream_start_class())];
        let mut pending_function: Option<(String, Span)> = None;

        for Spanned { value, span } in lexemes {
            // A function name must be followed immediately by the bracket
            // that opens its argument list.
            if let Some((function, _)) = pending_function.take() {
                let opens_call = matches!(
                    &value,
                    Lexeme::Token(token)
                        if token.is_open_bracket()
                            && token.text().chars().eq(std::iter::once(self.language.call_open()))
                );
                if !opens_call {
                    return Err(SyntaxError::function_call(
                        &function,
                        self.language.call_open(),
                        span,
                    ));
                }
            }

            match value {
                Lexeme::Operand(text) => self.attach_operand(&mut stack, &text, span)?,
                Lexeme::Token(token) => {
                    self.drive(&mut stack, Current::Grammar(&token), span)?;
                    if let Token::Function(def) = token.as_ref() {
                        pending_function = Some((def.name.clone(), span));
                    }
                }
            }
        }

        if let Some((function, span)) = pending_function {
            return Err(SyntaxError::function_call(
                &function,
                self.language.call_open(),
                span,
            ));
        }

        match self.drive(&mut stack, Current::StreamEnd, end_span)? {
            Some(root) => {
                log_debug!("Syntax analysis complete");
                Ok(root)
            }
            None => Err(SyntaxError::internal(
                "analysis ended without completing the expression",
            )),
        }
    }

    /// Place an operand leaf into the top frame
    fn attach_operand(&self, stack: &mut [Frame], text: &str, span: Span) -> SyntaxResult<()> {
        let top = stack
            .last_mut()
            .ok_or_else(|| SyntaxError::internal("parse stack exhausted"))?;
        if top.operand.is_some() {
            return Err(SyntaxError::adjacent_operands(text, span));
        }
        top.operand = Some(Node::operand(text));
        Ok(())
    }

    /// Consult the relation for one token, reducing as it directs. Returns
    /// the finished root exactly when the relation reports completion.
    fn drive(
        &self,
        stack: &mut Vec<Frame>,
        current: Current<'_>,
        span: Span,
    ) -> SyntaxResult<Option<Node>> {
        let current_class = match &current {
            Current::Grammar(token) => token.class(),
            Current::StreamEnd => self.language.stream_end_class(),
        };

        loop {
            let top = stack
                .last()
                .ok_or_else(|| SyntaxError::internal("parse stack exhausted"))?;

            match self.language.relation(current_class, top.class) {
                Relation::Start => {
                    self.push_frame(stack, &current, span)?;
                    return Ok(None);
                }
                Relation::In => {
                    self.reduce(stack)?;
                    self.push_frame(stack, &current, span)?;
                    return Ok(None);
                }
                Relation::End => {
                    self.reduce(stack)?;
                }
                Relation::Error => {
                    return Err(SyntaxError::relation(current.display(), top.display(), span));
                }
                Relation::Complete => {
                    if !matches!(current, Current::StreamEnd) || stack.len() != 1 {
                        return Err(SyntaxError::internal(
                            "relation reported completion before the end of the stream",
                        ));
                    }
                    let frame = stack.pop().expect("stack holds the start frame");
                    return frame.operand.map(Some).ok_or(SyntaxError::EmptyExpression);
                }
            }
        }
    }

    /// Open a new, higher-priority frame for the current token
    fn push_frame(
        &self,
        stack: &mut Vec<Frame>,
        current: &Current<'_>,
        span: Span,
    ) -> SyntaxResult<()> {
        let Current::Grammar(token) = current else {
            return Err(SyntaxError::internal(
                "relation started a frame at end of stream",
            ));
        };
        if stack.len() >= MAX_NESTING_DEPTH {
            return Err(SyntaxError::nesting_too_deep(span));
        }
        stack.push(Frame::grammar(Arc::clone(token), span));
        Ok(())
    }

    /// Pop the top frame, combine its token with its operands, and attach the
    /// result to the enclosing frame.
    fn reduce(&self, stack: &mut Vec<Frame>) -> SyntaxResult<()> {
        if stack.len() < 2 {
            return Err(SyntaxError::internal(
                "relation tried to reduce the stream-start frame",
            ));
        }

        // Name the nearest enclosing function for separator diagnostics
        // before the borrow of the top two frames.
        let enclosing_function = stack
            .iter()
            .rev()
            .find_map(|frame| match &frame.token {
                FrameToken::Grammar(token) => match token.as_ref() {
                    Token::Function(def) => Some(def.name.clone()),
                    _ => None,
                },
                FrameToken::StreamStart => None,
            })
            .unwrap_or_else(|| "argument list".to_string());

        let frame = stack.pop().expect("stack depth checked above");
        let parent = stack.last_mut().expect("stack depth checked above");

        let lower = parent.operand.take();
        let upper = frame.operand;
        let span = frame.span;

        let FrameToken::Grammar(token) = frame.token else {
            return Err(SyntaxError::internal("stream-start frame reduced"));
        };

        let result = match token.as_ref() {
            Token::Diadic(def) => {
                let left = lower.ok_or_else(|| SyntaxError::missing_left_operand(&def.text, span))?;
                let right =
                    upper.ok_or_else(|| SyntaxError::missing_right_operand(&def.text, span))?;
                Some(Node::apply(
                    &def.text,
                    Arc::clone(&def.kernel),
                    vec![left, right],
                ))
            }
            Token::Monadic(def) => {
                if lower.is_some() {
                    return Err(SyntaxError::monadic_left_operand(&def.text, span));
                }
                let operand =
                    upper.ok_or_else(|| SyntaxError::missing_right_operand(&def.text, span))?;
                Some(Node::apply(&def.text, Arc::clone(&def.kernel), vec![operand]))
            }
            // Brackets exist purely to manipulate precedence: they pass
            // through whichever single operand is present.
            Token::OpenBracket(def) | Token::CloseBracket(def) => match (lower, upper) {
                (Some(_), Some(_)) => {
                    return Err(SyntaxError::bracket_operand(&def.text, span));
                }
                (one, two) => one.or(two),
            },
            Token::Separator(_) => {
                Some(self.link_parameter(lower, upper, &enclosing_function, span)?)
            }
            Token::Function(def) => {
                if lower.is_some() {
                    return Err(SyntaxError::function_operand(&def.name, span));
                }
                Some(self.build_call(def, upper, span)?)
            }
        };

        parent.operand = result;
        Ok(())
    }

    /// Fold one separator into the ordered argument list
    fn link_parameter(
        &self,
        lower: Option<Node>,
        upper: Option<Node>,
        function: &str,
        span: Span,
    ) -> SyntaxResult<Node> {
        let Some(lower) = lower else {
            return Err(SyntaxError::undefined_parameter(function, 1, span));
        };
        let filled = match &lower {
            Node::Arguments(items) => items.len(),
            _ => 1,
        };
        let Some(upper) = upper else {
            return Err(SyntaxError::undefined_parameter(function, filled + 1, span));
        };

        Ok(match lower {
            Node::Arguments(mut items) => {
                items.push(upper);
                Node::Arguments(items)
            }
            single => Node::Arguments(vec![single, upper]),
        })
    }

    /// Extract exactly the declared number of parameters for a function call
    fn build_call(
        &self,
        def: &crate::tokens::FunctionDef,
        operand: Option<Node>,
        span: Span,
    ) -> SyntaxResult<Node> {
        let args = match operand {
            None => Vec::new(),
            Some(Node::Arguments(items)) => items,
            Some(single) => vec![single],
        };

        if args.len() < def.arity {
            return Err(SyntaxError::too_few_parameters(
                &def.name, def.arity, args.len(), span,
            ));
        }
        if args.len() > def.arity {
            return Err(SyntaxError::too_many_parameters(
                &def.name, def.arity, args.len(), span,
            ));
        }

        Ok(Node::apply(&def.name, Arc::clone(&def.kernel), args))
    }
}
