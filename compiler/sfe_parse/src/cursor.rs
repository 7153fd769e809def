//! Lexeme cursor over a pull-based [`Tokenizer`].
//!
//! The cursor only ever holds the current lexeme. Advancing onto an
//! `Error` lexeme fails immediately, so the grammar never sees one.

use sfe_ir::{FileId, Position, TokenKind};
use sfe_lexer::{Lexeme, Tokenizer};

use crate::ParseError;

pub struct Cursor<'src> {
    tokenizer: Tokenizer<'src>,
}

impl<'src> Cursor<'src> {
    /// Create a cursor positioned on the first lexeme of `source`.
    pub fn new(source: &'src str, file: FileId) -> Result<Self, ParseError> {
        let mut cursor = Cursor {
            tokenizer: Tokenizer::new(source, file),
        };
        cursor.advance()?;
        Ok(cursor)
    }

    #[inline]
    pub fn file(&self) -> FileId {
        self.tokenizer.file()
    }

    #[inline]
    pub fn current(&self) -> &Lexeme {
        self.tokenizer.lexeme()
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.tokenizer.lexeme().kind
    }

    /// Position of the current lexeme.
    #[inline]
    pub fn position(&self) -> Position {
        self.tokenizer.position()
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Move to the next lexeme.
    ///
    /// Returns the lexical error if the new lexeme is an `Error`.
    pub fn advance(&mut self) -> Result<(), ParseError> {
        let lexeme = self.tokenizer.next();
        match lexeme.error {
            Some(kind) if lexeme.kind == TokenKind::Error => {
                let pos = self.tokenizer.position();
                Err(ParseError::lex(kind, pos))
            }
            _ => Ok(()),
        }
    }

    /// Consume the current lexeme if it is `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consume a lexeme of `kind`, returning its position.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Position, ParseError> {
        if self.check(kind) {
            let pos = self.position();
            self.advance()?;
            Ok(pos)
        } else {
            let expected = format!("`{}`", kind.display_name());
            Err(ParseError::unexpected(&expected, self.current(), self.position()))
        }
    }

    /// Consume the closer of a delimiter opened at `open`.
    ///
    /// Reaching end of input reports the delimiter as unclosed.
    pub fn expect_closing(
        &mut self,
        open_kind: TokenKind,
        close: TokenKind,
        open: Position,
    ) -> Result<Position, ParseError> {
        if self.is_at_end() {
            return Err(ParseError::unclosed(open_kind, open, self.position()));
        }
        self.expect(close)
    }

    /// Consume an identifier, returning its text and position.
    pub fn expect_ident(&mut self) -> Result<(String, Position), ParseError> {
        if !self.check(TokenKind::Ident) {
            return Err(ParseError::expected_identifier(self.current(), self.position()));
        }
        let pos = self.position();
        let text = self.tokenizer.lexeme().string.clone();
        self.advance()?;
        Ok((text, pos))
    }

    /// Consume a string literal, returning its decoded text and position.
    pub fn expect_string(&mut self, what: &str) -> Result<(String, Position), ParseError> {
        if !self.check(TokenKind::String) {
            return Err(ParseError::unexpected(what, self.current(), self.position()));
        }
        let pos = self.position();
        let text = self.tokenizer.lexeme().string.clone();
        self.advance()?;
        Ok((text, pos))
    }
}
