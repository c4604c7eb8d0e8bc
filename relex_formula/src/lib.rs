//! Default formula grammar for the relex expression engine
//!
//! A twelve-class grammar with boolean connectives (`|`, `&`, `!`), the
//! comparison family (`=`, `==`, `<>`, `!=`, `>=`, `>`, `<=`, `<`), additive
//! operators (`+`, `-`, string concatenation `.`), multiplicative operators
//! (`*`, `/`, `%`), and nine builtin functions (`lower`, `upper`, `left`,
//! `right`, `padleft`, `padright`, `extract`, `size`, `if`).
//!
//! ```
//! use relex_engine::{Bindings, ExpressionEngine, MatchMode};
//! use relex_formula::FormulaLanguage;
//!
//! let engine = ExpressionEngine::new(FormulaLanguage::new()).unwrap();
//! let compiled = engine.parse("1+2*3", MatchMode::Exact).unwrap();
//! assert_eq!(compiled.evaluate_as_integer(&Bindings::new()).unwrap(), 7);
//! ```

pub mod classes;
pub mod functions;
pub mod language;
pub mod operators;
pub mod relation;

// Re-export key types for library consumers
pub use classes::FormulaClass;
pub use functions::Builtin;
pub use language::FormulaLanguage;
pub use operators::{DiadicOp, NotOp};
