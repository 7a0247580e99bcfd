//! Shared handles for the Veld compiler.
//!
//! This crate holds the small, `Copy` identity types that every other
//! compiler crate speaks in terms of:
//!
//! - [`Name`]: interned identifier (32-bit handle into a [`StringInterner`])
//! - [`Span`]: source byte range for diagnostics
//! - [`DeclId`]: identity of a user declaration, minted by declaration
//!   checking and used by the type system to answer "same declaration?"

mod decl;
mod interner;
mod name;
mod span;

pub use decl::DeclId;
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use span::{Span, SpanError};
