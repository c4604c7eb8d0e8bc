//! Builtin function semantics
//!
//! Nine string-and-logic builtins with fixed arities. Numeric arguments
//! degrade gracefully: negative counts clamp to zero, out-of-range positions
//! clamp to the ends of the string, and a missing pad character falls back to
//! a space. Arity itself is validated at parse time by the engine, so these
//! kernels only ever see their declared argument count.

use relex_engine::{Bindings, EvalError, EvalResult, Kernel, Node, Value, ValueKind};

/// Every builtin function of the formula grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// `lower(text)` - lower-case
    Lower,
    /// `upper(text)` - upper-case
    Upper,
    /// `left(text, count)` - first `count` characters
    Left,
    /// `right(text, count)` - last `count` characters
    Right,
    /// `padleft(text, width, pad)` - pad on the left to `width`
    PadLeft,
    /// `padright(text, width, pad)` - pad on the right to `width`
    PadRight,
    /// `extract(text, start, count)` - `count` characters from one-based `start`
    Extract,
    /// `size(text)` - character count
    Size,
    /// `if(condition, then, else)` - the selected branch's value
    If,
}

impl Builtin {
    /// All builtins, in catalogue order
    pub const ALL: [Builtin; 9] = [
        Self::Lower,
        Self::Upper,
        Self::Left,
        Self::Right,
        Self::PadLeft,
        Self::PadRight,
        Self::Extract,
        Self::Size,
        Self::If,
    ];

    /// The name the scanner matches
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lower => "lower",
            Self::Upper => "upper",
            Self::Left => "left",
            Self::Right => "right",
            Self::PadLeft => "padleft",
            Self::PadRight => "padright",
            Self::Extract => "extract",
            Self::Size => "size",
            Self::If => "if",
        }
    }

    /// Declared parameter count
    pub fn arity(&self) -> usize {
        match self {
            Self::Lower | Self::Upper | Self::Size => 1,
            Self::Left | Self::Right => 2,
            Self::PadLeft | Self::PadRight | Self::Extract | Self::If => 3,
        }
    }

    fn expect_args<'a>(&self, args: &'a [Node]) -> EvalResult<&'a [Node]> {
        if args.len() == self.arity() {
            Ok(args)
        } else {
            Err(EvalError::operand_count(
                self.name(),
                self.arity(),
                args.len(),
            ))
        }
    }
}

/// Clamp an integer argument to a usable character count
fn count_arg(value: i64) -> usize {
    value.max(0) as usize
}

/// The pad character: first character of the pad argument, space if empty
fn pad_char(pad: &str) -> char {
    pad.chars().next().unwrap_or(' ')
}

impl Kernel for Builtin {
    fn result_kind(&self) -> ValueKind {
        match self {
            Self::Size => ValueKind::Integer,
            _ => ValueKind::String,
        }
    }

    fn apply(&self, args: &[Node], bindings: &Bindings) -> EvalResult<Value> {
        let args = self.expect_args(args)?;

        let value = match self {
            Self::Lower => Value::Str(args[0].eval_string(bindings)?.to_lowercase()),
            Self::Upper => Value::Str(args[0].eval_string(bindings)?.to_uppercase()),

            Self::Left => {
                let text = args[0].eval_string(bindings)?;
                let count = count_arg(args[1].eval_integer(bindings)?);
                Value::Str(text.chars().take(count).collect())
            }
            Self::Right => {
                let text = args[0].eval_string(bindings)?;
                let count = count_arg(args[1].eval_integer(bindings)?);
                let length = text.chars().count();
                Value::Str(text.chars().skip(length.saturating_sub(count)).collect())
            }

            Self::PadLeft => {
                let text = args[0].eval_string(bindings)?;
                let width = count_arg(args[1].eval_integer(bindings)?);
                let pad = pad_char(&args[2].eval_string(bindings)?);
                let length = text.chars().count();
                let mut out = String::new();
                for _ in length..width {
                    out.push(pad);
                }
                out.push_str(&text);
                Value::Str(out)
            }
            Self::PadRight => {
                let text = args[0].eval_string(bindings)?;
                let width = count_arg(args[1].eval_integer(bindings)?);
                let pad = pad_char(&args[2].eval_string(bindings)?);
                let length = text.chars().count();
                let mut out = text;
                for _ in length..width {
                    out.push(pad);
                }
                Value::Str(out)
            }

            Self::Extract => {
                let text = args[0].eval_string(bindings)?;
                let start = args[1].eval_integer(bindings)?.max(1) as usize;
                let count = count_arg(args[2].eval_integer(bindings)?);
                Value::Str(text.chars().skip(start - 1).take(count).collect())
            }

            Self::Size => Value::Int(args[0].eval_string(bindings)?.chars().count() as i64),

            Self::If => {
                if args[0].eval_boolean(bindings)? {
                    args[1].eval(bindings)?
                } else {
                    args[2].eval(bindings)?
                }
            }
        };

        Ok(value)
    }
}
