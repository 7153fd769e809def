//! Raw Token Definition
//!
//! The `RawToken` enum is the logos-derived scanner output. Literal
//! payloads are decoded here; line tracking, error reporting and the
//! final [`TokenKind`](sfe_ir::TokenKind) mapping happen in the tokenizer.

use logos::{Lexer, Logos};
use memchr::{memchr2, memmem};

/// Scanner-level failure, widened into `LexErrorKind` by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) enum RawError {
    /// Input matched no token.
    #[default]
    Unrecognized,
    UnterminatedString,
    UnterminatedComment,
    InvalidEscape(char),
    NumberTooLarge,
}

/// Decoded numeric literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Int(i64),
    Real(f64),
}

/// Raw token from logos.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = RawError)]
#[logos(skip r"[ \t\r\n\x0B\x08]+")]
pub(crate) enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    // Keywords
    #[token("class")]
    Class,
    #[token("extends")]
    Extends,
    #[token("false")]
    False,
    #[token("include")]
    Include,
    #[token("object")]
    Object,
    #[token("true")]
    True,
    #[token("var")]
    Var,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    #[token("<=")]
    LtEq,
    #[token("<")]
    Lt,
    #[token(">=")]
    GtEq,
    #[token(">")]
    Gt,
    #[token("==")]
    EqEq,
    #[token("=")]
    Eq,
    #[token("!=")]
    NotEq,
    #[token("!")]
    Bang,
    #[token("&&")]
    AndAnd,
    #[token("&")]
    Amp,
    #[token("||")]
    OrOr,
    #[token("|")]
    Pipe,

    // Punctuation
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("$")]
    Dollar,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", lex_number)]
    Number(Number),

    #[token("\"", lex_string)]
    String(String),

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Skip to the closing `*/`; block comments do not nest.
fn block_comment(lex: &mut Lexer<'_, RawToken>) -> Result<(), RawError> {
    let rest = lex.remainder();
    match memmem::find(rest.as_bytes(), b"*/") {
        Some(end) => {
            lex.bump(end + 2);
            Ok(())
        }
        None => {
            lex.bump(rest.len());
            Err(RawError::UnterminatedComment)
        }
    }
}

/// Integral text must fit `i64`; text with a fraction or exponent is a
/// real and must stay finite.
fn lex_number(lex: &mut Lexer<'_, RawToken>) -> Result<Number, RawError> {
    let text = lex.slice();
    if text.bytes().all(|b| b.is_ascii_digit()) {
        text.parse::<i64>()
            .map(Number::Int)
            .map_err(|_| RawError::NumberTooLarge)
    } else {
        match text.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Number::Real(v)),
            _ => Err(RawError::NumberTooLarge),
        }
    }
}

/// Map the character after a backslash to the character it stands for.
///
/// Exactly `\n \t \v \r \b \\ \"` are recognized.
#[inline]
pub(crate) fn cook_escape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        't' => Some('\t'),
        'v' => Some('\x0B'),
        'r' => Some('\r'),
        'b' => Some('\x08'),
        '\\' => Some('\\'),
        '"' => Some('"'),
        _ => None,
    }
}

/// Decode a string literal; the opening quote is already consumed.
///
/// Runs without quotes or backslashes are copied in bulk.
fn lex_string(lex: &mut Lexer<'_, RawToken>) -> Result<String, RawError> {
    let rest = lex.remainder();
    let bytes = rest.as_bytes();
    let mut out = String::new();
    let mut pos = 0;

    while let Some(offset) = memchr2(b'"', b'\\', &bytes[pos..]) {
        let at = pos + offset;
        out.push_str(&rest[pos..at]);
        if bytes[at] == b'"' {
            lex.bump(at + 1);
            return Ok(out);
        }

        let Some(escaped) = rest[at + 1..].chars().next() else {
            break;
        };
        let next = at + 1 + escaped.len_utf8();
        match cook_escape(escaped) {
            Some(c) => out.push(c),
            None => {
                lex.bump(next);
                return Err(RawError::InvalidEscape(escaped));
            }
        }
        pos = next;
    }

    lex.bump(rest.len());
    Err(RawError::UnterminatedString)
}
