//! Diagnostic values for the Veld compiler.
//!
//! This crate defines the structured diagnostics the compiler phases hand
//! back to their caller. Rendering (terminal output, LSP conversion) lives
//! with the consumers; here a diagnostic is just a value: an error code, a
//! severity, labeled spans, and optional notes/suggestions.

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
