//! Lexer for SFE config.
//!
//! Two layers:
//! - `raw_token`: a logos scanner that recognizes tokens and decodes
//!   numeric and string payloads
//! - [`Tokenizer`]: the pull-based front end the parser drives; it tracks
//!   line/column, drops comments, and turns scanner failures into
//!   [`LexErrorKind`] lexemes
//!
//! Keyword recognition is longest-match, so `classic` is an identifier and
//! `class` is a keyword.

mod lex_error;
mod raw_token;
mod tokenizer;

pub use lex_error::LexErrorKind;
pub use tokenizer::{tokenize, Lexeme, Tokenizer};
