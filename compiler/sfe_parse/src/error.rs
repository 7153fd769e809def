//! Parse error types.
//!
//! A [`ParseError`] aborts the unit; there is no recovery. Lexical errors
//! reach the caller through the same type, keeping their `E0xxx` code.

use std::fmt;
use std::path::Path;

use sfe_diagnostic::{Diagnostic, ErrorCode};
use sfe_ir::{Position, TokenKind};
use sfe_lexer::{LexErrorKind, Lexeme};

/// A failure while lexing or parsing one unit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    /// Where the offending lexeme starts.
    pub pos: Position,
    /// Text of the primary label.
    pub label: String,
    /// Related location, e.g. where an unclosed delimiter was opened.
    pub related: Option<(Position, String)>,
    pub notes: Vec<String>,
}

impl ParseError {
    #[cold]
    pub fn new(code: ErrorCode, message: impl Into<String>, pos: Position) -> Self {
        ParseError {
            code,
            message: message.into(),
            pos,
            label: String::from("here"),
            related: None,
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_related(mut self, pos: Position, message: impl Into<String>) -> Self {
        self.related = Some((pos, message.into()));
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// The tokenizer produced an `Error` lexeme.
    #[cold]
    pub fn lex(kind: LexErrorKind, pos: Position) -> Self {
        let diag = kind.to_diagnostic(pos);
        ParseError {
            code: diag.code,
            message: diag.message,
            pos,
            label: diag
                .labels
                .into_iter()
                .next()
                .map_or_else(|| String::from("here"), |l| l.message),
            related: None,
            notes: diag.notes,
        }
    }

    /// Something other than `expected` was found.
    #[cold]
    pub fn unexpected(expected: &str, found: &Lexeme, pos: Position) -> Self {
        let found = describe(found);
        ParseError::new(
            ErrorCode::E1001,
            format!("expected {expected}, found {found}"),
            pos,
        )
        .with_label(format!("expected {expected}"))
    }

    #[cold]
    pub fn expected_expression(found: &Lexeme, pos: Position) -> Self {
        ParseError::new(
            ErrorCode::E1002,
            format!("expected expression, found {}", describe(found)),
            pos,
        )
        .with_label("expected expression")
    }

    /// End of input inside `(`, `[` or `{`.
    #[cold]
    pub fn unclosed(delimiter: TokenKind, open: Position, pos: Position) -> Self {
        let closing = match delimiter {
            TokenKind::LParen => ")",
            TokenKind::LBracket => "]",
            _ => "}",
        };
        ParseError::new(
            ErrorCode::E1003,
            format!("unclosed delimiter `{}`", delimiter.display_name()),
            pos,
        )
        .with_label(format!("expected `{closing}`"))
        .with_related(open, "unclosed delimiter opened here")
    }

    #[cold]
    pub fn expected_identifier(found: &Lexeme, pos: Position) -> Self {
        ParseError::new(
            ErrorCode::E1004,
            format!("expected identifier, found {}", describe(found)),
            pos,
        )
        .with_label("expected identifier")
    }

    #[cold]
    pub fn include_failed(path: &Path, reason: &str, pos: Position) -> Self {
        ParseError::new(
            ErrorCode::E1005,
            format!("cannot include `{}`: {reason}", path.display()),
            pos,
        )
        .with_label("included here")
    }

    #[cold]
    pub fn recursive_include(path: &Path, pos: Position) -> Self {
        ParseError::new(
            ErrorCode::E1006,
            format!("`{}` includes itself", path.display()),
            pos,
        )
        .with_label("recursive include")
    }

    #[cold]
    pub fn include_too_deep(limit: usize, pos: Position) -> Self {
        ParseError::new(
            ErrorCode::E1007,
            format!("includes nested deeper than {limit} levels"),
            pos,
        )
        .with_label("include here")
    }

    #[cold]
    pub fn too_many_items(what: &str, limit: usize, pos: Position) -> Self {
        ParseError::new(
            ErrorCode::E1008,
            format!("{what} has more than {limit} items"),
            pos,
        )
    }

    /// Convert to a diagnostic for reporting.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code)
            .with_message(&self.message)
            .with_label(self.pos, &self.label);
        if let Some((pos, message)) = &self.related {
            diag = diag.with_secondary_label(*pos, message);
        }
        for note in &self.notes {
            diag = diag.with_note(note);
        }
        diag
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.pos, self.message)
    }
}

impl std::error::Error for ParseError {}

/// How a lexeme is named in messages.
fn describe(lexeme: &Lexeme) -> String {
    match lexeme.kind {
        TokenKind::Ident => format!("identifier `{}`", lexeme.string),
        TokenKind::String => String::from("string literal"),
        TokenKind::Int | TokenKind::Real => String::from("number"),
        TokenKind::Eof => String::from("end of file"),
        kind => format!("`{}`", kind.display_name()),
    }
}
