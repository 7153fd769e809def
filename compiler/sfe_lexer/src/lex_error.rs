//! Lexical error kinds and their diagnostics.

use std::fmt;

use sfe_diagnostic::{Diagnostic, ErrorCode};
use sfe_ir::{Position, TokenKind};

/// What went wrong while scanning one lexeme.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// Missing closing `"`.
    UnterminatedString,
    /// Character that starts no token.
    UnknownChar(char),
    /// Integral text outside `i64`, or a real that overflows to infinity.
    NumberTooLarge,
    /// `/*` without `*/`.
    UnterminatedComment,
    /// Backslash followed by anything but `n t v r b \ "`.
    InvalidEscape(char),
    /// `&` or `|` not doubled.
    MalformedOperator {
        expected: char,
        token: TokenKind,
        /// `None` at end of input.
        found: Option<char>,
    },
}

impl LexErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            LexErrorKind::UnterminatedString => ErrorCode::E0001,
            LexErrorKind::UnknownChar(_) => ErrorCode::E0002,
            LexErrorKind::NumberTooLarge => ErrorCode::E0003,
            LexErrorKind::UnterminatedComment => ErrorCode::E0004,
            LexErrorKind::InvalidEscape(_) => ErrorCode::E0005,
            LexErrorKind::MalformedOperator { .. } => ErrorCode::E0006,
        }
    }

    /// Build the diagnostic for this error at `pos`.
    pub fn to_diagnostic(&self, pos: Position) -> Diagnostic {
        let label = match self {
            LexErrorKind::UnterminatedString => "string starts here",
            LexErrorKind::UnknownChar(_) => "unknown character",
            LexErrorKind::NumberTooLarge => "number literal",
            LexErrorKind::UnterminatedComment => "comment starts here",
            LexErrorKind::InvalidEscape(_) => "in this string",
            LexErrorKind::MalformedOperator { .. } => "malformed operator",
        };
        let diag = Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_label(pos, label);
        match self {
            LexErrorKind::InvalidEscape(_) => {
                diag.with_note("valid escapes are \\n \\t \\v \\r \\b \\\\ \\\"")
            }
            _ => diag,
        }
    }
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnterminatedString => write!(f, "unterminated string literal"),
            LexErrorKind::UnknownChar(c) => write!(f, "unknown character `{}`", c.escape_debug()),
            LexErrorKind::NumberTooLarge => {
                write!(f, "number too large to hold in double or int64")
            }
            LexErrorKind::UnterminatedComment => write!(f, "unterminated block comment"),
            LexErrorKind::InvalidEscape(c) => {
                write!(f, "invalid escape sequence `\\{}`", c.escape_debug())
            }
            LexErrorKind::MalformedOperator {
                expected,
                token,
                found: Some(found),
            } => write!(
                f,
                "expected character `{expected}` for token `{token}`, found `{}`",
                found.escape_debug()
            ),
            LexErrorKind::MalformedOperator {
                expected,
                token,
                found: None,
            } => write!(
                f,
                "expected character `{expected}` for token `{token}`, found end of file"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sfe_ir::FileId;

    #[test]
    fn test_messages() {
        assert_eq!(
            LexErrorKind::MalformedOperator {
                expected: '&',
                token: TokenKind::AndAnd,
                found: Some(' '),
            }
            .to_string(),
            "expected character `&` for token `&&`, found ` `"
        );
        assert_eq!(
            LexErrorKind::InvalidEscape('q').to_string(),
            "invalid escape sequence `\\q`"
        );
        assert_eq!(
            LexErrorKind::UnknownChar('#').to_string(),
            "unknown character `#`"
        );
    }

    #[test]
    fn test_diagnostic() {
        let pos = Position::new(FileId::new(0), 4, 2);
        let diag = LexErrorKind::NumberTooLarge.to_diagnostic(pos);
        assert_eq!(diag.code, ErrorCode::E0003);
        assert_eq!(diag.primary_pos(), Some(pos));
        assert_eq!(diag.message, "number too large to hold in double or int64");
    }
}
