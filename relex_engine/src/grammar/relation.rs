//! The precedence relation
//!
//! A grammar assigns one relation outcome to every ordered pair of adjacent
//! token classes: the token just read (current) against the token on top of
//! the parse stack (previous). The relation is the entire grammar; no other
//! precedence information exists.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of consulting the relation for (current, previous)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    /// Current token opens a new, higher-priority subexpression (push)
    Start,
    /// Current token continues at the same priority level (reduce in place)
    In,
    /// Current token terminates the previous, higher-priority subexpression
    /// (pop, then re-consult at the enclosing level)
    End,
    /// The pairing is syntactically illegal
    Error,
    /// The whole expression has been consumed; only valid for
    /// (end-of-stream, start-of-stream)
    Complete,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::In => "in",
            Self::End => "end",
            Self::Error => "error",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
