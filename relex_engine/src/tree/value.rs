//! Evaluation values and cross-kind coercion
//!
//! Every compiled node produces one of three result kinds. Callers may request
//! any kind; when the native kind differs the coercions below apply. Coercion
//! is total: malformed input values degrade to a defined result instead of
//! failing, so evaluation can only fail on structural tree defects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// String forms read as boolean `true`, matched case-insensitively
const TRUTHY_LITERALS: &[&str] = &["true", "yes", "y", "set", "on", "ok"];

/// String forms read as boolean `false`, matched case-insensitively
const FALSY_LITERALS: &[&str] = &["false", "no", "n", "unset", "off"];

/// The three result kinds a compiled node can natively produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    String,
    Integer,
    Boolean,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A typed evaluation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl Value {
    /// The kind this value natively is
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Str(_) => ValueKind::String,
            Self::Int(_) => ValueKind::Integer,
            Self::Bool(_) => ValueKind::Boolean,
        }
    }

    /// Coerce to boolean.
    ///
    /// Strings match the truthy/falsy literal tables case-insensitively;
    /// anything else is `true` exactly when non-empty. Integers are `true`
    /// when non-zero.
    pub fn into_boolean(self) -> bool {
        match self {
            Self::Bool(b) => b,
            Self::Int(n) => n != 0,
            Self::Str(s) => {
                let lowered = s.to_lowercase();
                if TRUTHY_LITERALS.contains(&lowered.as_str()) {
                    true
                } else if FALSY_LITERALS.contains(&lowered.as_str()) {
                    false
                } else {
                    !s.is_empty()
                }
            }
        }
    }

    /// Coerce to integer.
    ///
    /// Strings parse as base-10; a string that does not parse degrades to its
    /// character count rather than failing (so the empty string is 0).
    /// Booleans are 1 and 0.
    pub fn into_integer(self) -> i64 {
        match self {
            Self::Int(n) => n,
            Self::Bool(b) => {
                if b {
                    1
                } else {
                    0
                }
            }
            Self::Str(s) => s.parse::<i64>().unwrap_or_else(|_| s.chars().count() as i64),
        }
    }

    /// Coerce to string.
    ///
    /// Integers render in decimal; booleans render capitalized.
    pub fn into_string(self) -> String {
        match self {
            Self::Str(s) => s,
            Self::Int(n) => n.to_string(),
            Self::Bool(b) => {
                if b {
                    "True".to_string()
                } else {
                    "False".to_string()
                }
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{}", s),
            Self::Int(n) => write!(f, "{}", n),
            Self::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_truthy_literals() {
        for text in ["true", "Yes", "Y", "SET", "on", "OK"] {
            assert!(Value::from(text).into_boolean(), "expected {text:?} true");
        }
    }

    #[test]
    fn test_boolean_falsy_literals() {
        for text in ["false", "No", "n", "UNSET", "off"] {
            assert!(!Value::from(text).into_boolean(), "expected {text:?} false");
        }
    }

    #[test]
    fn test_boolean_fallback_is_non_empty() {
        assert!(Value::from("anything-else").into_boolean());
        assert!(!Value::from("").into_boolean());
    }

    #[test]
    fn test_boolean_from_integer() {
        assert!(Value::Int(7).into_boolean());
        assert!(Value::Int(-1).into_boolean());
        assert!(!Value::Int(0).into_boolean());
    }

    #[test]
    fn test_integer_from_string() {
        assert_eq!(Value::from("42").into_integer(), 42);
        assert_eq!(Value::from("-9").into_integer(), -9);
        // Unparseable strings degrade to their character count
        assert_eq!(Value::from("abc").into_integer(), 3);
        assert_eq!(Value::from("").into_integer(), 0);
    }

    #[test]
    fn test_integer_from_boolean() {
        assert_eq!(Value::Bool(true).into_integer(), 1);
        assert_eq!(Value::Bool(false).into_integer(), 0);
    }

    #[test]
    fn test_string_from_integer_and_boolean() {
        assert_eq!(Value::Int(7).into_string(), "7");
        assert_eq!(Value::Bool(true).into_string(), "True");
        assert_eq!(Value::Bool(false).into_string(), "False");
    }

    #[test]
    fn test_same_kind_never_coerces() {
        assert_eq!(Value::from("007").into_string(), "007");
        assert_eq!(Value::Int(-3).into_integer(), -3);
        assert!(Value::Bool(true).into_boolean());
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(Value::from("x").kind(), ValueKind::String);
        assert_eq!(Value::Int(0).kind(), ValueKind::Integer);
        assert_eq!(Value::Bool(false).kind(), ValueKind::Boolean);
    }
}
