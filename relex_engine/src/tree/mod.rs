//! Compiled parse trees and multi-typed evaluation
//!
//! The tree is the unit of reuse: a grammar compiles many expressions and a
//! compiled expression evaluates many times against fresh bindings. Result
//! kinds are a closed sum type ([`Value`]), so evaluation dispatch is
//! exhaustive and there is no unknown-kind case to defend against.

pub mod bindings;
pub mod node;
pub mod value;

pub use bindings::Bindings;
pub use node::{EvalError, EvalResult, Kernel, Node};
pub use value::{Value, ValueKind};
