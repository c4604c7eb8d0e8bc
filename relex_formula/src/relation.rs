//! The formula grammar's precedence relation
//!
//! One exhaustive match over (current, previous) class pairs replaces the
//! numeric precedence ranks of a classical operator-precedence parser.
//! Diadic operators compare binding tightness; the prefix `!` always opens a
//! frame in operand position regardless of tightness; the separator is the
//! loosest thing inside a bracket and builds argument lists through `In`.

use crate::classes::FormulaClass;
use relex_engine::{Relation, TokenClass};

/// Relation lookup on raw engine class indices. Indices outside the formula
/// class space are illegal pairings.
pub fn relation(current: TokenClass, previous: TokenClass) -> Relation {
    match (
        FormulaClass::from_index(current),
        FormulaClass::from_index(previous),
    ) {
        (Some(current), Some(previous)) => class_relation(current, previous),
        _ => Relation::Error,
    }
}

/// Relation lookup on the formula class space
pub fn class_relation(current: FormulaClass, previous: FormulaClass) -> Relation {
    use FormulaClass::*;
    use Relation::*;

    match (current, previous) {
        // The one completion pairing: the whole expression is consumed
        (StreamEnd, StreamStart) => Complete,

        // End of stream drains every open frame except an unclosed bracket
        // or a call still waiting for its argument list
        (StreamEnd, OpenBracket) => Error,
        (StreamEnd, Function) => End,
        (StreamEnd, CloseBracket | Or | And | Not | Compare | Additive | Multiplicative) => End,
        (StreamEnd, Separator) => End,

        // Open brackets start a subexpression anywhere an operand could sit,
        // and open the argument list of a call
        (OpenBracket, CloseBracket) => Error,
        (OpenBracket, _) => Start,

        // A close bracket meets its open at the same level; anything else
        // still open inside reduces first
        (CloseBracket, OpenBracket) => In,
        (CloseBracket, StreamStart) => Error,
        (CloseBracket, _) => End,

        // Prefix `!` opens a new frame wherever an operand could begin
        (Not, StreamStart | OpenBracket | Separator) => Start,
        (Not, Or | And | Not | Compare | Additive | Multiplicative) => Start,
        (Not, CloseBracket | Function) => Error,

        // Function names likewise occupy operand positions
        (Function, StreamStart | OpenBracket | Separator) => Start,
        (Function, Or | And | Not | Compare | Additive | Multiplicative) => Start,
        (Function, CloseBracket | Function) => Error,

        // The separator folds the argument collected so far into the list
        (Separator, OpenBracket) => Start,
        (Separator, Separator) => In,
        (Separator, Or | And | Not | Compare | Additive | Multiplicative) => End,
        (Separator, CloseBracket | Function) => End,
        (Separator, StreamStart) => Error,

        // Diadic operators: tighter binds start a higher-priority frame,
        // equal binds continue the level (left association), looser binds
        // reduce what came before
        (
            Or | And | Compare | Additive | Multiplicative,
            Or | And | Not | Compare | Additive | Multiplicative,
        ) => {
            let cur = current.priority().expect("diadic class has a priority");
            let prev = previous.priority().expect("operator class has a priority");
            match cur.cmp(&prev) {
                std::cmp::Ordering::Greater => Start,
                std::cmp::Ordering::Equal => In,
                std::cmp::Ordering::Less => End,
            }
        }
        (Or | And | Compare | Additive | Multiplicative, StreamStart | OpenBracket | Separator) => {
            Start
        }
        (Or | And | Compare | Additive | Multiplicative, CloseBracket | Function) => End,

        // The sentinels are never read as ordinary tokens and nothing may
        // follow the end of the stream
        (StreamStart, _) | (_, StreamEnd) => Error,
    }
}
