//! Lexical analysis
//!
//! Converts expression text into a lexeme stream by greedy longest-match
//! against the grammar's declared surface forms. Text that is not part of any
//! declared token accumulates into operand lexemes (identifiers and
//! literals).

pub mod scanner;

pub use scanner::{non_exact_name, MatchMode, ScanError, Scanner};
