//! Shared utilities for the expression engine

pub mod span;

pub use span::{Position, Span, Spanned};
