//! Error codes for all SFE config diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1001`) with the first digit
//! indicating the phase that reported it.

use std::fmt;

/// Error codes for all diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser and include errors
/// - E2xxx: Binding errors (declarations, classes, instantiation)
/// - E3xxx: Evaluation errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Unknown character in source
    E0002,
    /// Number too large to hold in double or int64
    E0003,
    /// Unterminated block comment
    E0004,
    /// Invalid escape sequence
    E0005,
    /// Malformed two-character operator (`&` or `|` alone)
    E0006,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Expected identifier
    E1004,
    /// Included file could not be loaded
    E1005,
    /// File includes itself, directly or indirectly
    E1006,
    /// Include nesting too deep
    E1007,
    /// List has too many items
    E1008,

    // Binding Errors (E2xxx)
    /// Duplicate class name
    E2001,
    /// Duplicate object name
    E2002,
    /// Duplicate variable name
    E2003,
    /// Unknown base class
    E2004,
    /// Inheritance cycle
    E2005,
    /// Argument does not match any class parameter
    E2006,
    /// Argument given more than once
    E2007,
    /// Instantiation of an unknown class
    E2008,
    /// Parameter declared more than once in one class
    E2009,

    // Evaluation Errors (E3xxx)
    /// Unresolved identifier
    E3001,
    /// Operand type mismatch
    E3002,
    /// Division or modulo by zero
    E3003,
    /// Integer overflow
    E3004,
    /// Parameter referenced without an argument or default
    E3005,
    /// Value depends on itself
    E3006,
    /// Unknown function or value is not callable
    E3007,
    /// Host function reported an error
    E3008,
    /// Missing dict or object key
    E3009,
    /// Dict value where a scalar is required
    E3010,
}

impl ErrorCode {
    /// Every code, in numeric order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E0006,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1007,
        ErrorCode::E1008,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E2008,
        ErrorCode::E2009,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E3004,
        ErrorCode::E3005,
        ErrorCode::E3006,
        ErrorCode::E3007,
        ErrorCode::E3008,
        ErrorCode::E3009,
        ErrorCode::E3010,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexer
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            // Parser
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            // Binding
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            // Evaluation
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E3006 => "E3006",
            ErrorCode::E3007 => "E3007",
            ErrorCode::E3008 => "E3008",
            ErrorCode::E3009 => "E3009",
            ErrorCode::E3010 => "E3010",
        }
    }

    /// One-line summary, printed by `sfec explain`.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "unknown character",
            ErrorCode::E0003 => "number too large to hold in double or int64",
            ErrorCode::E0004 => "unterminated block comment",
            ErrorCode::E0005 => "invalid escape sequence",
            ErrorCode::E0006 => "malformed two-character operator",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected expression",
            ErrorCode::E1003 => "unclosed delimiter",
            ErrorCode::E1004 => "expected identifier",
            ErrorCode::E1005 => "included file could not be loaded",
            ErrorCode::E1006 => "recursive include",
            ErrorCode::E1007 => "include nesting too deep",
            ErrorCode::E1008 => "list has too many items",
            ErrorCode::E2001 => "duplicate class",
            ErrorCode::E2002 => "duplicate object",
            ErrorCode::E2003 => "duplicate variable",
            ErrorCode::E2004 => "unknown base class",
            ErrorCode::E2005 => "inheritance cycle",
            ErrorCode::E2006 => "unknown argument",
            ErrorCode::E2007 => "duplicate argument",
            ErrorCode::E2008 => "unknown class",
            ErrorCode::E2009 => "duplicate parameter",
            ErrorCode::E3001 => "unresolved identifier",
            ErrorCode::E3002 => "type mismatch",
            ErrorCode::E3003 => "division by zero",
            ErrorCode::E3004 => "integer overflow",
            ErrorCode::E3005 => "missing argument",
            ErrorCode::E3006 => "value depends on itself",
            ErrorCode::E3007 => "not callable",
            ErrorCode::E3008 => "host function failed",
            ErrorCode::E3009 => "missing key",
            ErrorCode::E3010 => "dict value not allowed here",
        }
    }

    /// Check if this is a lexer error (E0xxx).
    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    /// Check if this is a parser error (E1xxx).
    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Check if this is a binding error (E2xxx).
    pub fn is_binding_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }

    /// Check if this is an evaluation error (E3xxx).
    pub fn is_eval_error(&self) -> bool {
        self.as_str().starts_with("E3")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"`; case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique() {
        let strs: HashSet<&str> = ErrorCode::ALL.iter().map(ErrorCode::as_str).collect();
        assert_eq!(strs.len(), ErrorCode::ALL.len());
    }

    #[test]
    fn test_phase_prefixes() {
        assert!(ErrorCode::E0003.is_lexer_error());
        assert!(ErrorCode::E1006.is_parser_error());
        assert!(ErrorCode::E2005.is_binding_error());
        assert!(ErrorCode::E3003.is_eval_error());
        assert!(!ErrorCode::E3003.is_binding_error());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("e2001".parse::<ErrorCode>(), Ok(ErrorCode::E2001));
        assert_eq!("E9999".parse::<ErrorCode>(), Err(()));
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::E1001.to_string(), "E1001");
    }
}
