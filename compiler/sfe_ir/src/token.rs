//! Token kinds for the SFE config lexer.
//!
//! Kinds are payload-free; decoded literal values travel next to the kind
//! in the lexer's `Lexeme`.

use std::fmt;

/// Token kinds for SFE config.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // Literals
    /// Integer literal that fits in `i64`: `42`
    Int,
    /// Real literal: `3.5`, `1e3`
    Real,
    /// String literal: `"hello"`
    String,
    /// `true`
    True,
    /// `false`
    False,
    /// Identifier
    Ident,

    // Keywords
    Class,
    Extends,
    Include,
    Object,
    Var,

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,

    // Comparison
    Lt,
    LtEq,
    Gt,
    GtEq,
    EqEq,
    NotEq,

    // Logical
    AndAnd,
    OrOr,
    Bang,

    // Ternary
    Question,
    Colon,

    // Member and global markers
    Dot,
    Dollar,

    // Grouping
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Separators
    Comma,
    Semicolon,
    Eq,

    /// Lexical error; details live on the lexeme.
    Error,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Human-readable name used in parser messages.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Int => "integer",
            TokenKind::Real => "real",
            TokenKind::String => "string",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Ident => "identifier",
            TokenKind::Class => "class",
            TokenKind::Extends => "extends",
            TokenKind::Include => "include",
            TokenKind::Object => "object",
            TokenKind::Var => "var",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Caret => "^",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::Bang => "!",
            TokenKind::Question => "?",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::Dollar => "$",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Eq => "=",
            TokenKind::Error => "error",
            TokenKind::Eof => "end of file",
        }
    }

    /// True for `true`/`false`.
    #[inline]
    pub fn is_bool(self) -> bool {
        matches!(self, TokenKind::True | TokenKind::False)
    }

    /// True for the declaration keywords and literal keywords.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Class
                | TokenKind::Extends
                | TokenKind::Include
                | TokenKind::Object
                | TokenKind::Var
                | TokenKind::True
                | TokenKind::False
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(TokenKind::LtEq.display_name(), "<=");
        assert_eq!(TokenKind::Eof.to_string(), "end of file");
        assert_eq!(TokenKind::Ident.to_string(), "identifier");
    }

    #[test]
    fn test_keyword_classification() {
        assert!(TokenKind::Include.is_keyword());
        assert!(TokenKind::True.is_keyword());
        assert!(!TokenKind::Ident.is_keyword());
        assert!(TokenKind::False.is_bool());
        assert!(!TokenKind::Var.is_bool());
    }
}
