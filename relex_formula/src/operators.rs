//! Operator semantics
//!
//! One kernel enum covers every operator in the grammar. Evaluation follows
//! the engine's degrade-gracefully doctrine: arithmetic wraps on overflow and
//! division or modulo by zero yields 0, so no operand value can make
//! evaluation fail.
//!
//! Equality compares the string forms of both operands; ordering compares
//! their integer coercions. Each side keeps the behavior the other would
//! lose: string equality keeps `abc` and `abd` distinct where length-based
//! integer coercion would not, and integer ordering keeps `9 < 10` true where
//! lexicographic ordering would not.

use relex_engine::{Bindings, EvalError, EvalResult, Kernel, Node, Value, ValueKind};

/// Every diadic operator of the formula grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiadicOp {
    Or,
    And,
    Equal,
    NotEqual,
    GreaterOrEqual,
    Greater,
    LessOrEqual,
    Less,
    Add,
    Subtract,
    Concat,
    Multiply,
    Divide,
    Modulo,
}

impl DiadicOp {
    /// Surface form as declared in the catalogue
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Or => "|",
            Self::And => "&",
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::GreaterOrEqual => ">=",
            Self::Greater => ">",
            Self::LessOrEqual => "<=",
            Self::Less => "<",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Concat => ".",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
        }
    }

    fn pair<'a>(&self, operands: &'a [Node]) -> EvalResult<(&'a Node, &'a Node)> {
        match operands {
            [left, right] => Ok((left, right)),
            _ => Err(EvalError::operand_count(self.symbol(), 2, operands.len())),
        }
    }
}

impl Kernel for DiadicOp {
    fn result_kind(&self) -> ValueKind {
        match self {
            Self::Or
            | Self::And
            | Self::Equal
            | Self::NotEqual
            | Self::GreaterOrEqual
            | Self::Greater
            | Self::LessOrEqual
            | Self::Less => ValueKind::Boolean,
            Self::Concat => ValueKind::String,
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide | Self::Modulo => {
                ValueKind::Integer
            }
        }
    }

    fn apply(&self, operands: &[Node], bindings: &Bindings) -> EvalResult<Value> {
        let (left, right) = self.pair(operands)?;

        let value = match self {
            Self::Or => Value::Bool(
                left.eval_boolean(bindings)? || right.eval_boolean(bindings)?,
            ),
            Self::And => Value::Bool(
                left.eval_boolean(bindings)? && right.eval_boolean(bindings)?,
            ),

            Self::Equal => {
                Value::Bool(left.eval_string(bindings)? == right.eval_string(bindings)?)
            }
            Self::NotEqual => {
                Value::Bool(left.eval_string(bindings)? != right.eval_string(bindings)?)
            }

            Self::GreaterOrEqual => {
                Value::Bool(left.eval_integer(bindings)? >= right.eval_integer(bindings)?)
            }
            Self::Greater => {
                Value::Bool(left.eval_integer(bindings)? > right.eval_integer(bindings)?)
            }
            Self::LessOrEqual => {
                Value::Bool(left.eval_integer(bindings)? <= right.eval_integer(bindings)?)
            }
            Self::Less => {
                Value::Bool(left.eval_integer(bindings)? < right.eval_integer(bindings)?)
            }

            Self::Add => Value::Int(
                left.eval_integer(bindings)?
                    .wrapping_add(right.eval_integer(bindings)?),
            ),
            Self::Subtract => Value::Int(
                left.eval_integer(bindings)?
                    .wrapping_sub(right.eval_integer(bindings)?),
            ),
            Self::Multiply => Value::Int(
                left.eval_integer(bindings)?
                    .wrapping_mul(right.eval_integer(bindings)?),
            ),
            Self::Divide => Value::Int(
                left.eval_integer(bindings)?
                    .checked_div(right.eval_integer(bindings)?)
                    .unwrap_or(0),
            ),
            Self::Modulo => Value::Int(
                left.eval_integer(bindings)?
                    .checked_rem(right.eval_integer(bindings)?)
                    .unwrap_or(0),
            ),

            Self::Concat => {
                let mut text = left.eval_string(bindings)?;
                text.push_str(&right.eval_string(bindings)?);
                Value::Str(text)
            }
        };

        Ok(value)
    }
}

/// The single monadic operator: boolean negation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotOp;

impl Kernel for NotOp {
    fn result_kind(&self) -> ValueKind {
        ValueKind::Boolean
    }

    fn apply(&self, operands: &[Node], bindings: &Bindings) -> EvalResult<Value> {
        match operands {
            [operand] => Ok(Value::Bool(!operand.eval_boolean(bindings)?)),
            _ => Err(EvalError::operand_count("!", 1, operands.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn apply(op: DiadicOp, left: &str, right: &str) -> Value {
        let operands = [Node::operand(left), Node::operand(right)];
        op.apply(&operands, &Bindings::new()).expect("eval")
    }

    #[test]
    fn test_boolean_connectives() {
        assert_eq!(apply(DiadicOp::Or, "yes", "no"), Value::Bool(true));
        assert_eq!(apply(DiadicOp::Or, "off", "0"), Value::Bool(false));
        assert_eq!(apply(DiadicOp::And, "yes", "on"), Value::Bool(true));
        assert_eq!(apply(DiadicOp::And, "yes", "unset"), Value::Bool(false));
    }

    #[test]
    fn test_equality_is_string_equality() {
        assert_eq!(apply(DiadicOp::Equal, "abc", "abc"), Value::Bool(true));
        // Same length, different text: must stay unequal
        assert_eq!(apply(DiadicOp::Equal, "abc", "abd"), Value::Bool(false));
        assert_eq!(apply(DiadicOp::NotEqual, "abc", "abd"), Value::Bool(true));
    }

    #[test]
    fn test_ordering_is_integer_ordering() {
        assert_eq!(apply(DiadicOp::Less, "9", "10"), Value::Bool(true));
        assert_eq!(apply(DiadicOp::Greater, "10", "9"), Value::Bool(true));
        assert_eq!(apply(DiadicOp::GreaterOrEqual, "7", "7"), Value::Bool(true));
        assert_eq!(apply(DiadicOp::LessOrEqual, "8", "7"), Value::Bool(false));
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(apply(DiadicOp::Add, "2", "3"), Value::Int(5));
        assert_eq!(apply(DiadicOp::Subtract, "2", "5"), Value::Int(-3));
        assert_eq!(apply(DiadicOp::Multiply, "4", "6"), Value::Int(24));
        assert_eq!(apply(DiadicOp::Divide, "9", "2"), Value::Int(4));
        assert_eq!(apply(DiadicOp::Modulo, "9", "4"), Value::Int(1));
    }

    #[test]
    fn test_division_by_zero_degrades_to_zero() {
        assert_eq!(apply(DiadicOp::Divide, "9", "0"), Value::Int(0));
        assert_eq!(apply(DiadicOp::Modulo, "9", "0"), Value::Int(0));
    }

    #[test]
    fn test_arithmetic_coerces_unparseable_strings_to_length() {
        // "abc" coerces to 3
        assert_eq!(apply(DiadicOp::Add, "abc", "1"), Value::Int(4));
    }

    #[test]
    fn test_concatenation() {
        assert_eq!(
            apply(DiadicOp::Concat, "left", "right"),
            Value::Str("leftright".to_string())
        );
    }

    #[test]
    fn test_negation() {
        let truthy = [Node::operand("yes")];
        let falsy = [Node::operand("off")];
        assert_eq!(
            NotOp.apply(&truthy, &Bindings::new()).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            NotOp.apply(&falsy, &Bindings::new()).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn test_wrong_operand_count_is_structural() {
        let one = [Node::operand("1")];
        assert_matches!(
            DiadicOp::Add.apply(&one, &Bindings::new()),
            Err(EvalError::OperandCount { .. })
        );
    }

    #[test]
    fn test_result_kinds() {
        assert_eq!(DiadicOp::Or.result_kind(), ValueKind::Boolean);
        assert_eq!(DiadicOp::Equal.result_kind(), ValueKind::Boolean);
        assert_eq!(DiadicOp::Add.result_kind(), ValueKind::Integer);
        assert_eq!(DiadicOp::Concat.result_kind(), ValueKind::String);
        assert_eq!(NotOp.result_kind(), ValueKind::Boolean);
    }
}
