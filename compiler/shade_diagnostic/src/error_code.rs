//! Error codes for shade diagnostics.

use std::fmt;

/// Error codes for all shade diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E1xxx: Resolution errors
/// - E9xxx: Internal compiler errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Resolution Errors (E1xxx)
    /// Name declared twice in one scope
    E1001,
    /// Module-scope declarations depend on each other in a cycle
    E1002,

    // Internal Errors (E9xxx)
    /// Internal compiler error
    E9001,
}

impl ErrorCode {
    /// Every error code, in numeric order.
    pub const ALL: &'static [ErrorCode] = &[ErrorCode::E1001, ErrorCode::E1002, ErrorCode::E9001];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line summary used by `--explain` style listings.
    pub fn summary(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "redeclaration",
            ErrorCode::E1002 => "cyclic dependency",
            ErrorCode::E9001 => "internal compiler error",
        }
    }

    pub fn is_resolve_error(&self) -> bool {
        matches!(self, ErrorCode::E1001 | ErrorCode::E1002)
    }

    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E1002"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
