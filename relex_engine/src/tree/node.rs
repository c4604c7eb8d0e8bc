//! Compiled parse-tree nodes and evaluation
//!
//! A tree is the output of exactly one successful parse. Nodes are immutable
//! after construction and evaluation is a pure walk, so one compiled tree may
//! be evaluated repeatedly or concurrently with different bindings.

use super::bindings::Bindings;
use super::value::{Value, ValueKind};
use std::fmt;
use std::sync::Arc;

pub type EvalResult<T> = Result<T, EvalError>;

/// Structural evaluation failures.
///
/// Coercion is total, so the only way evaluation can fail is a tree that
/// violates its own construction invariants. These are programming errors in
/// a grammar definition, not user input errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EvalError {
    #[error("argument list reached evaluation; it must be consumed by a function during parsing")]
    ArgumentList,

    #[error("operator '{operator}' applied to {found} operands, expected {expected}")]
    OperandCount {
        operator: String,
        expected: usize,
        found: usize,
    },
}

impl EvalError {
    /// Create an argument-list escape error
    pub fn argument_list() -> Self {
        Self::ArgumentList
    }

    /// Create an operand-count error
    pub fn operand_count(operator: &str, expected: usize, found: usize) -> Self {
        Self::OperandCount {
            operator: operator.to_string(),
            expected,
            found,
        }
    }
}

/// Evaluation semantics attached to an operator or function token.
///
/// The kernel receives its fully built operand subtrees and the caller's
/// bindings; it evaluates the operands with whatever coercions its semantics
/// require.
pub trait Kernel: fmt::Debug + Send + Sync {
    /// The result kind this kernel natively produces
    fn result_kind(&self) -> ValueKind;

    /// Apply the kernel to its operand subtrees
    fn apply(&self, operands: &[Node], bindings: &Bindings) -> EvalResult<Value>;
}

/// An immutable compiled expression node
#[derive(Debug, Clone)]
pub enum Node {
    /// A literal constant (numeric operand text)
    Literal(Value),
    /// An identifier operand, resolved through the bindings at evaluation.
    /// An unbound name evaluates to its own text.
    Parameter(String),
    /// An operator or function application
    Apply {
        /// Surface text of the applied token, for diagnostics
        name: String,
        kernel: Arc<dyn Kernel>,
        operands: Vec<Node>,
    },
    /// Ordered function-argument list built by the separator token.
    /// Transient: a function consumes it during parsing; it never appears in
    /// a successfully compiled tree.
    Arguments(Vec<Node>),
}

impl Node {
    /// Build the leaf node for one operand text: integer literals become
    /// typed constants, everything else is a parameter reference.
    pub fn operand(text: &str) -> Self {
        match text.parse::<i64>() {
            Ok(n) => Self::Literal(Value::Int(n)),
            Err(_) => Self::Parameter(text.to_string()),
        }
    }

    /// Build an application node
    pub fn apply(name: &str, kernel: Arc<dyn Kernel>, operands: Vec<Node>) -> Self {
        Self::Apply {
            name: name.to_string(),
            kernel,
            operands,
        }
    }

    /// The result kind this node natively produces.
    ///
    /// `None` only for the transient argument-list variant, which has no
    /// result kind of its own.
    pub fn natural_kind(&self) -> Option<ValueKind> {
        match self {
            Self::Literal(value) => Some(value.kind()),
            Self::Parameter(_) => Some(ValueKind::String),
            Self::Apply { kernel, .. } => Some(kernel.result_kind()),
            Self::Arguments(_) => None,
        }
    }

    /// Evaluate to this node's native kind
    pub fn eval(&self, bindings: &Bindings) -> EvalResult<Value> {
        match self {
            Self::Literal(value) => Ok(value.clone()),
            Self::Parameter(name) => {
                let text = bindings.resolve(name).unwrap_or(name);
                Ok(Value::Str(text.to_string()))
            }
            Self::Apply {
                kernel, operands, ..
            } => kernel.apply(operands, bindings),
            Self::Arguments(_) => Err(EvalError::argument_list()),
        }
    }

    /// Evaluate and coerce to a string
    pub fn eval_string(&self, bindings: &Bindings) -> EvalResult<String> {
        Ok(self.eval(bindings)?.into_string())
    }

    /// Evaluate and coerce to an integer
    pub fn eval_integer(&self, bindings: &Bindings) -> EvalResult<i64> {
        Ok(self.eval(bindings)?.into_integer())
    }

    /// Evaluate and coerce to a boolean
    pub fn eval_boolean(&self, bindings: &Bindings) -> EvalResult<bool> {
        Ok(self.eval(bindings)?.into_boolean())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{}", value),
            Self::Parameter(name) => write!(f, "{}", name),
            Self::Apply { name, operands, .. } => match operands.as_slice() {
                [single] => write!(f, "{}({})", name, single),
                [left, right] => write!(f, "({} {} {})", left, name, right),
                args => {
                    write!(f, "{}(", name)?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, ")")
                }
            },
            Self::Arguments(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_operand_leaf_typing() {
        assert_matches!(Node::operand("42"), Node::Literal(Value::Int(42)));
        assert_matches!(Node::operand("-7"), Node::Literal(Value::Int(-7)));
        assert_matches!(Node::operand("total"), Node::Parameter(_));
        // Not a clean base-10 integer, so it stays a parameter reference
        assert_matches!(Node::operand("4x"), Node::Parameter(_));
    }

    #[test]
    fn test_parameter_resolution() {
        let mut bindings = Bindings::new();
        bindings.set("total", "99");

        let node = Node::operand("total");
        assert_eq!(node.eval(&bindings).unwrap(), Value::Str("99".into()));
        assert_eq!(node.eval_integer(&bindings).unwrap(), 99);
    }

    #[test]
    fn test_unbound_parameter_is_its_own_text() {
        let node = Node::operand("fallback");
        let value = node.eval(&Bindings::new()).unwrap();
        assert_eq!(value, Value::Str("fallback".into()));
    }

    #[test]
    fn test_arguments_node_fails_evaluation() {
        let node = Node::Arguments(vec![Node::operand("1"), Node::operand("2")]);
        assert_matches!(
            node.eval(&Bindings::new()),
            Err(EvalError::ArgumentList)
        );
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let mut bindings = Bindings::new();
        bindings.set("flag", "yes");

        let node = Node::operand("flag");
        let first = node.eval_boolean(&bindings).unwrap();
        let second = node.eval_boolean(&bindings).unwrap();
        assert_eq!(first, second);
        assert!(first);
    }
}
