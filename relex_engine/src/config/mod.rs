//! Engine configuration
//!
//! All limits are compile-time constants. The engine has no file-based or
//! runtime configuration surface.

pub mod constants;
