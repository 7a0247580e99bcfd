//! Instantiation errors.

use std::fmt;

use veld_diagnostic::{Diagnostic, ErrorCode};
use veld_ir::{Name, Span, StringInterner};

/// Why a validated instantiation was rejected.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum InstantiationError {
    /// The argument list length does not match the parameter list.
    ArgumentCountMismatch {
        /// The generic type's name, when it has one.
        name: Option<Name>,
        got: usize,
        want: usize,
    },
    /// A type argument fails its parameter's constraint.
    ConstraintViolation {
        /// Position of the offending argument, 0-based.
        index: usize,
        /// Human-readable reason; never empty.
        cause: String,
    },
}

impl fmt::Display for InstantiationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstantiationError::ArgumentCountMismatch { got, want, .. } => {
                write!(f, "wrong number of type arguments: got {got}, want {want}")
            }
            InstantiationError::ConstraintViolation { index, cause } => {
                write!(
                    f,
                    "type argument {index} does not satisfy its constraint: {cause}"
                )
            }
        }
    }
}

impl std::error::Error for InstantiationError {}

impl InstantiationError {
    /// Render as a source diagnostic anchored at `span`.
    pub fn to_diagnostic(&self, span: Span, interner: &StringInterner) -> Diagnostic {
        match self {
            InstantiationError::ArgumentCountMismatch { name, got, want } => {
                let mut d = Diagnostic::error(ErrorCode::E2401)
                    .with_message(match name {
                        Some(n) => format!(
                            "wrong number of type arguments for {}: got {got}, want {want}",
                            interner.lookup(*n)
                        ),
                        None => {
                            format!("wrong number of type arguments: got {got}, want {want}")
                        }
                    })
                    .with_label(span, format!("expected {want} type arguments"));
                if got < want {
                    d = d.with_suggestion("add the missing type arguments");
                }
                d
            }
            InstantiationError::ConstraintViolation { index, cause } => {
                Diagnostic::error(ErrorCode::E2402)
                    .with_message(format!(
                        "type argument {index} does not satisfy its constraint"
                    ))
                    .with_label(span, cause.clone())
            }
        }
    }
}
