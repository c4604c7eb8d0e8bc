//! Token classes of the formula grammar
//!
//! Twelve classes cover the whole grammar. Several surface forms share one
//! class: every comparison operator is class `Compare`, and `+`, `-`, and the
//! concatenation dot are all `Additive`.

use relex_engine::TokenClass;
use serde::{Deserialize, Serialize};

/// The formula grammar's token-class space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormulaClass {
    StreamStart,
    StreamEnd,
    OpenBracket,
    CloseBracket,
    Or,
    And,
    Not,
    Compare,
    Additive,
    Multiplicative,
    Function,
    Separator,
}

impl FormulaClass {
    /// All classes, in index order
    pub const ALL: [FormulaClass; 12] = [
        Self::StreamStart,
        Self::StreamEnd,
        Self::OpenBracket,
        Self::CloseBracket,
        Self::Or,
        Self::And,
        Self::Not,
        Self::Compare,
        Self::Additive,
        Self::Multiplicative,
        Self::Function,
        Self::Separator,
    ];

    /// The engine-facing class index
    pub fn index(self) -> TokenClass {
        TokenClass(match self {
            Self::StreamStart => 0,
            Self::StreamEnd => 1,
            Self::OpenBracket => 2,
            Self::CloseBracket => 3,
            Self::Or => 4,
            Self::And => 5,
            Self::Not => 6,
            Self::Compare => 7,
            Self::Additive => 8,
            Self::Multiplicative => 9,
            Self::Function => 10,
            Self::Separator => 11,
        })
    }

    /// Map an engine class index back onto the formula class space
    pub fn from_index(class: TokenClass) -> Option<Self> {
        Self::ALL.get(class.index()).copied()
    }

    /// Binding tightness among operator classes. Higher values reduce first.
    pub fn priority(self) -> Option<u8> {
        match self {
            Self::Or => Some(1),
            Self::And => Some(2),
            Self::Not => Some(3),
            Self::Compare => Some(4),
            Self::Additive => Some(5),
            Self::Multiplicative => Some(6),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for class in FormulaClass::ALL {
            assert_eq!(FormulaClass::from_index(class.index()), Some(class));
        }
    }

    #[test]
    fn test_unknown_index_is_none() {
        assert_eq!(FormulaClass::from_index(TokenClass(12)), None);
    }

    #[test]
    fn test_priority_ladder() {
        let ladder = [
            FormulaClass::Or,
            FormulaClass::And,
            FormulaClass::Not,
            FormulaClass::Compare,
            FormulaClass::Additive,
            FormulaClass::Multiplicative,
        ];
        for window in ladder.windows(2) {
            assert!(window[0].priority() < window[1].priority());
        }
        assert_eq!(FormulaClass::OpenBracket.priority(), None);
    }
}
