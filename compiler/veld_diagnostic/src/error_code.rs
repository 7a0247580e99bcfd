use std::fmt;

/// Error codes for all compiler diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E1xxx: Syntax errors (lexer/parser, owned by those crates)
/// - E2xxx: Type errors
/// - E9xxx: Internal compiler errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Type Errors (E2xxx)
    /// Type mismatch
    E2001,
    /// Unknown type name
    E2002,
    /// Wrong number of type arguments for a generic type or function
    E2401,
    /// Type argument does not satisfy its constraint
    E2402,
    /// Values of this type do not support equality comparison
    E2403,

    // Internal Errors (E9xxx)
    /// Internal invariant violated
    E9001,
}

impl ErrorCode {
    /// Short description of what this code means.
    pub const fn description(self) -> &'static str {
        match self {
            ErrorCode::E2001 => "type mismatch",
            ErrorCode::E2002 => "unknown type name",
            ErrorCode::E2401 => "wrong number of type arguments",
            ErrorCode::E2402 => "type constraint not satisfied",
            ErrorCode::E2403 => "type is not comparable",
            ErrorCode::E9001 => "internal invariant violated",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_displays_as_identifier() {
        assert_eq!(ErrorCode::E2401.to_string(), "E2401");
    }

    #[test]
    fn descriptions_are_non_empty() {
        for code in [
            ErrorCode::E2001,
            ErrorCode::E2002,
            ErrorCode::E2401,
            ErrorCode::E2402,
            ErrorCode::E2403,
            ErrorCode::E9001,
        ] {
            assert!(!code.description().is_empty());
        }
    }
}
