//! Pull-based tokenizer.
//!
//! [`Tokenizer::next`] scans one lexeme and makes it current; nothing is
//! buffered ahead. Line and column are derived from the bytes between the
//! previous lexeme and the next one, so whitespace and comments of any
//! shape keep positions correct.

use logos::Logos;
use memchr::{memchr_iter, memrchr};
use sfe_ir::{FileId, Position, Span, TokenKind};

use crate::lex_error::LexErrorKind;
use crate::raw_token::{Number, RawError, RawToken};

/// Magnitude of `i64::MIN`, the one integer literal that only fits negated.
const MIN_MAGNITUDE: &str = "9223372036854775808";

/// One classified unit of source text.
#[derive(Clone, Debug, PartialEq)]
pub struct Lexeme {
    pub kind: TokenKind,
    /// Byte range in the source.
    pub span: Span,
    /// 1-based line of the first character.
    pub line: u32,
    /// 1-based column (in characters) of the first character.
    pub column: u32,
    /// Decoded text of a string literal, or the text of an identifier.
    pub string: String,
    pub boolean: bool,
    pub real: f64,
    /// Value of an `Int`. The text `9223372036854775808` right after a `-`
    /// is an `Int` holding `i64::MIN`; the parser folds the pair into one
    /// literal.
    pub integer: i64,
    /// Set when `kind` is [`TokenKind::Error`].
    pub error: Option<LexErrorKind>,
}

impl Lexeme {
    fn new(kind: TokenKind, span: Span, line: u32, column: u32) -> Self {
        Lexeme {
            kind,
            span,
            line,
            column,
            string: String::new(),
            boolean: false,
            real: 0.0,
            integer: 0,
            error: None,
        }
    }

    /// Length of the lexeme's source text in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.span.len() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    #[inline]
    pub fn position(&self, file: FileId) -> Position {
        Position::new(file, self.line, self.column)
    }
}

/// Tokenizer over one source file.
pub struct Tokenizer<'src> {
    source: &'src str,
    file: FileId,
    raw: logos::Lexer<'src, RawToken>,
    /// Offset up to which `line`/`column` are known.
    scanned: usize,
    line: u32,
    column: u32,
    lexeme: Lexeme,
}

impl<'src> Tokenizer<'src> {
    pub fn new(source: &'src str, file: FileId) -> Self {
        Tokenizer {
            source,
            file,
            raw: RawToken::lexer(source),
            scanned: 0,
            line: 1,
            column: 1,
            lexeme: Lexeme::new(TokenKind::Eof, Span::DUMMY, 1, 1),
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    /// The current lexeme.
    #[inline]
    pub fn lexeme(&self) -> &Lexeme {
        &self.lexeme
    }

    /// Position of the current lexeme.
    #[inline]
    pub fn position(&self) -> Position {
        self.lexeme.position(self.file)
    }

    /// Advance to the next lexeme and return it.
    ///
    /// At end of input this returns an `Eof` lexeme, repeatedly.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> &Lexeme {
        loop {
            let Some(result) = self.raw.next() else {
                let end = self.source.len();
                let (line, column) = self.locate(end);
                self.lexeme = Lexeme::new(TokenKind::Eof, Span::from_range(end..end), line, column);
                return &self.lexeme;
            };

            let range = self.raw.span();
            match result {
                Ok(RawToken::LineComment | RawToken::BlockComment) => continue,
                Ok(raw) => self.cook(raw, range),
                Err(err) => self.fail(err, range),
            }
            return &self.lexeme;
        }
    }

    /// Line and column of `offset`; offsets must not decrease between calls.
    fn locate(&mut self, offset: usize) -> (u32, u32) {
        let skipped = &self.source[self.scanned..offset];
        let tail = match memrchr(b'\n', skipped.as_bytes()) {
            Some(last) => {
                let newlines = memchr_iter(b'\n', skipped.as_bytes()).count();
                self.line = self.line.saturating_add(saturate(newlines));
                self.column = 1;
                &skipped[last + 1..]
            }
            None => skipped,
        };
        self.column = self.column.saturating_add(saturate(tail.chars().count()));
        self.scanned = offset;
        (self.line, self.column)
    }

    fn start(&mut self, kind: TokenKind, range: std::ops::Range<usize>) -> &mut Lexeme {
        let (line, column) = self.locate(range.start);
        self.lexeme = Lexeme::new(kind, Span::from_range(range), line, column);
        &mut self.lexeme
    }

    fn cook(&mut self, raw: RawToken, range: std::ops::Range<usize>) {
        let kind = match raw {
            RawToken::Number(Number::Int(v)) => {
                self.start(TokenKind::Int, range).integer = v;
                return;
            }
            RawToken::Number(Number::Real(v)) => {
                self.start(TokenKind::Real, range).real = v;
                return;
            }
            RawToken::String(s) => {
                self.start(TokenKind::String, range).string = s;
                return;
            }
            RawToken::Ident => {
                let text = self.source[range.clone()].to_owned();
                self.start(TokenKind::Ident, range).string = text;
                return;
            }
            RawToken::True => {
                self.start(TokenKind::True, range).boolean = true;
                return;
            }
            RawToken::False => {
                self.start(TokenKind::False, range).boolean = false;
                return;
            }
            RawToken::Amp => return self.malformed('&', TokenKind::AndAnd, range),
            RawToken::Pipe => return self.malformed('|', TokenKind::OrOr, range),

            RawToken::Class => TokenKind::Class,
            RawToken::Extends => TokenKind::Extends,
            RawToken::Include => TokenKind::Include,
            RawToken::Object => TokenKind::Object,
            RawToken::Var => TokenKind::Var,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Percent => TokenKind::Percent,
            RawToken::Caret => TokenKind::Caret,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::Lt => TokenKind::Lt,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::Gt => TokenKind::Gt,
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::Eq => TokenKind::Eq,
            RawToken::NotEq => TokenKind::NotEq,
            RawToken::Bang => TokenKind::Bang,
            RawToken::AndAnd => TokenKind::AndAnd,
            RawToken::OrOr => TokenKind::OrOr,
            RawToken::Question => TokenKind::Question,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Dollar => TokenKind::Dollar,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            // Filtered out by `next`.
            RawToken::LineComment | RawToken::BlockComment => TokenKind::Error,
        };
        self.start(kind, range);
    }

    fn malformed(&mut self, expected: char, token: TokenKind, range: std::ops::Range<usize>) {
        let found = self.source[range.end..].chars().next();
        self.error(
            LexErrorKind::MalformedOperator {
                expected,
                token,
                found,
            },
            range,
        );
    }

    fn fail(&mut self, err: RawError, range: std::ops::Range<usize>) {
        let kind = match err {
            RawError::Unrecognized => {
                let c = self.source[range.clone()].chars().next().unwrap_or('\0');
                LexErrorKind::UnknownChar(c)
            }
            RawError::UnterminatedString => LexErrorKind::UnterminatedString,
            RawError::UnterminatedComment => LexErrorKind::UnterminatedComment,
            RawError::InvalidEscape(c) => LexErrorKind::InvalidEscape(c),
            RawError::NumberTooLarge if self.is_negated_min(&range) => {
                self.start(TokenKind::Int, range).integer = i64::MIN;
                return;
            }
            RawError::NumberTooLarge => LexErrorKind::NumberTooLarge,
        };
        self.error(kind, range);
    }

    /// The current lexeme is still the previous token here.
    fn is_negated_min(&self, range: &std::ops::Range<usize>) -> bool {
        self.lexeme.kind == TokenKind::Minus && self.source[range.clone()] == *MIN_MAGNITUDE
    }

    fn error(&mut self, kind: LexErrorKind, range: std::ops::Range<usize>) {
        let lexeme = self.start(TokenKind::Error, range);
        lexeme.string = kind.to_string();
        lexeme.error = Some(kind);
    }
}

fn saturate(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Scan a whole file, stopping after the first error or at end of input.
///
/// The last lexeme is always `Eof` or `Error`.
pub fn tokenize(source: &str, file: FileId) -> Vec<Lexeme> {
    let mut tokenizer = Tokenizer::new(source, file);
    let mut out = Vec::new();
    loop {
        let lexeme = tokenizer.next().clone();
        let done = matches!(lexeme.kind, TokenKind::Eof | TokenKind::Error);
        out.push(lexeme);
        if done {
            return out;
        }
    }
}

#[cfg(test)]
mod tests;
