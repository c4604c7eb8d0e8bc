//! Syntax analysis errors
//!
//! Every parse-time failure aborts the whole `parse` call with no partial
//! tree retained, naming the offending token and its position wherever one
//! exists.

use crate::config::constants::compile_time::syntax::MAX_NESTING_DEPTH;
use crate::utils::Span;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// Parse-time errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum SyntaxError {
    #[error("'{current}' cannot follow '{previous}' at {span}")]
    Relation {
        current: String,
        previous: String,
        span: Span,
    },

    #[error("operand '{text}' follows another operand at {span}")]
    AdjacentOperands { text: String, span: Span },

    #[error("operator '{operator}' is missing its left operand at {span}")]
    MissingLeftOperand { operator: String, span: Span },

    #[error("operator '{operator}' is missing its right operand at {span}")]
    MissingRightOperand { operator: String, span: Span },

    #[error("operator '{operator}' takes a single operand at {span}")]
    MonadicLeftOperand { operator: String, span: Span },

    #[error("bracket '{bracket}' used as an operator at {span}")]
    BracketOperand { bracket: String, span: Span },

    #[error("function '{function}' must be followed by '{expected}' at {span}")]
    FunctionCall {
        function: String,
        expected: char,
        span: Span,
    },

    #[error("function '{function}' has too few parameters: expected {expected}, found {found}")]
    TooFewParameters {
        function: String,
        expected: usize,
        found: usize,
        span: Span,
    },

    #[error("function '{function}' has too many parameters: expected {expected}, found {found}")]
    TooManyParameters {
        function: String,
        expected: usize,
        found: usize,
        span: Span,
    },

    #[error("parameter {index} of function '{function}' is undefined at {span}")]
    UndefinedParameter {
        function: String,
        index: usize,
        span: Span,
    },

    #[error("function '{function}' cannot take a left operand at {span}")]
    FunctionOperand { function: String, span: Span },

    #[error("expression is empty")]
    EmptyExpression,

    #[error("expression nesting exceeds {MAX_NESTING_DEPTH} levels at {span}")]
    NestingTooDeep { span: Span },

    #[error("internal analyser error: {message}")]
    Internal { message: String },
}

impl SyntaxError {
    /// Create a relation rejection error
    pub fn relation(current: &str, previous: &str, span: Span) -> Self {
        Self::Relation {
            current: current.to_string(),
            previous: previous.to_string(),
            span,
        }
    }

    /// Create an adjacent-operand error
    pub fn adjacent_operands(text: &str, span: Span) -> Self {
        Self::AdjacentOperands {
            text: text.to_string(),
            span,
        }
    }

    /// Create a missing-left-operand error
    pub fn missing_left_operand(operator: &str, span: Span) -> Self {
        Self::MissingLeftOperand {
            operator: operator.to_string(),
            span,
        }
    }

    /// Create a missing-right-operand error
    pub fn missing_right_operand(operator: &str, span: Span) -> Self {
        Self::MissingRightOperand {
            operator: operator.to_string(),
            span,
        }
    }

    /// Create a monadic-with-left-operand error
    pub fn monadic_left_operand(operator: &str, span: Span) -> Self {
        Self::MonadicLeftOperand {
            operator: operator.to_string(),
            span,
        }
    }

    /// Create a malformed-bracket error
    pub fn bracket_operand(bracket: &str, span: Span) -> Self {
        Self::BracketOperand {
            bracket: bracket.to_string(),
            span,
        }
    }

    /// Create a missing-call-bracket error
    pub fn function_call(function: &str, expected: char, span: Span) -> Self {
        Self::FunctionCall {
            function: function.to_string(),
            expected,
            span,
        }
    }

    /// Create a too-few-parameters error
    pub fn too_few_parameters(function: &str, expected: usize, found: usize, span: Span) -> Self {
        Self::TooFewParameters {
            function: function.to_string(),
            expected,
            found,
            span,
        }
    }

    /// Create a too-many-parameters error
    pub fn too_many_parameters(function: &str, expected: usize, found: usize, span: Span) -> Self {
        Self::TooManyParameters {
            function: function.to_string(),
            expected,
            found,
            span,
        }
    }

    /// Create an undefined-parameter error (1-based index)
    pub fn undefined_parameter(function: &str, index: usize, span: Span) -> Self {
        Self::UndefinedParameter {
            function: function.to_string(),
            index,
            span,
        }
    }

    /// Create a function-with-left-operand error
    pub fn function_operand(function: &str, span: Span) -> Self {
        Self::FunctionOperand {
            function: function.to_string(),
            span,
        }
    }

    /// Create a nesting-depth error
    pub fn nesting_too_deep(span: Span) -> Self {
        Self::NestingTooDeep { span }
    }

    /// Create an internal analyser error
    pub fn internal(message: &str) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }

    /// Get span if available
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Relation { span, .. }
            | Self::AdjacentOperands { span, .. }
            | Self::MissingLeftOperand { span, .. }
            | Self::MissingRightOperand { span, .. }
            | Self::MonadicLeftOperand { span, .. }
            | Self::BracketOperand { span, .. }
            | Self::FunctionCall { span, .. }
            | Self::TooFewParameters { span, .. }
            | Self::TooManyParameters { span, .. }
            | Self::UndefinedParameter { span, .. }
            | Self::FunctionOperand { span, .. }
            | Self::NestingTooDeep { span } => Some(*span),
            Self::EmptyExpression | Self::Internal { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    #[test]
    fn test_span_extraction() {
        let span = Span::new(Position::new(3, 1, 4), Position::new(4, 1, 5));
        let error = SyntaxError::relation("+", "(", span);
        assert_eq!(error.span(), Some(span));
        assert_eq!(SyntaxError::EmptyExpression.span(), None);
    }

    #[test]
    fn test_messages_name_the_offender() {
        let span = Span::new(Position::start(), Position::start());
        let error = SyntaxError::too_few_parameters("extract", 3, 1, span);
        let message = error.to_string();
        assert!(message.contains("extract"));
        assert!(message.contains("expected 3"));
        assert!(message.contains("found 1"));
    }
}
