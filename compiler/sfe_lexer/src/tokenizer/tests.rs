use super::*;
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source, FileId::new(0))
        .into_iter()
        .map(|l| l.kind)
        .collect()
}

fn single(source: &str) -> Lexeme {
    let mut tokenizer = Tokenizer::new(source, FileId::new(0));
    tokenizer.next().clone()
}

#[test]
fn test_declaration_tokens() {
    assert_eq!(
        kinds("var x = 1 + 2 * 3;"),
        vec![
            TokenKind::Var,
            TokenKind::Ident,
            TokenKind::Eq,
            TokenKind::Int,
            TokenKind::Plus,
            TokenKind::Int,
            TokenKind::Star,
            TokenKind::Int,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_full_token_set() {
    assert_eq!(
        kinds("+ - * / % ^ < <= > >= == != && || ! ? : . $ ( ) { } [ ] , ; ="),
        vec![
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Caret,
            TokenKind::Lt,
            TokenKind::LtEq,
            TokenKind::Gt,
            TokenKind::GtEq,
            TokenKind::EqEq,
            TokenKind::NotEq,
            TokenKind::AndAnd,
            TokenKind::OrOr,
            TokenKind::Bang,
            TokenKind::Question,
            TokenKind::Colon,
            TokenKind::Dot,
            TokenKind::Dollar,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::LBracket,
            TokenKind::RBracket,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Eq,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_keywords() {
    assert_eq!(
        kinds("class extends include object var true false classic"),
        vec![
            TokenKind::Class,
            TokenKind::Extends,
            TokenKind::Include,
            TokenKind::Object,
            TokenKind::Var,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_literal_payloads() {
    let int = single("123");
    assert_eq!(int.kind, TokenKind::Int);
    assert_eq!(int.integer, 123);
    assert_eq!(int.len(), 3);

    let real = single("0.25");
    assert_eq!(real.kind, TokenKind::Real);
    assert_eq!(real.real, 0.25);

    let boolean = single("true");
    assert!(boolean.boolean);

    let ident = single("emitter_rate");
    assert_eq!(ident.string, "emitter_rate");
}

#[test]
fn test_string_escape_decoding() {
    let lexeme = single(r#""a\nb""#);
    assert_eq!(lexeme.kind, TokenKind::String);
    assert_eq!(lexeme.string, "a\nb");
    assert_eq!(lexeme.string.chars().count(), 3);
    assert_eq!(lexeme.len(), 6);
}

#[test]
fn test_line_and_column_tracking() {
    let source = "var a = 1;\n\t  b\r\n  \"x\"\n/* two\nlines */ c";
    let mut tokenizer = Tokenizer::new(source, FileId::new(0));
    let mut positions = Vec::new();
    loop {
        let lexeme = tokenizer.next();
        positions.push((lexeme.kind, lexeme.line, lexeme.column));
        if lexeme.kind == TokenKind::Eof {
            break;
        }
    }
    assert_eq!(
        positions,
        vec![
            (TokenKind::Var, 1, 1),
            (TokenKind::Ident, 1, 5),
            (TokenKind::Eq, 1, 7),
            (TokenKind::Int, 1, 9),
            (TokenKind::Semicolon, 1, 10),
            (TokenKind::Ident, 2, 4),
            (TokenKind::String, 3, 3),
            (TokenKind::Ident, 5, 10),
            (TokenKind::Eof, 5, 11),
        ]
    );
}

#[test]
fn test_columns_count_characters() {
    let mut tokenizer = Tokenizer::new("\"héllo\" x", FileId::new(0));
    tokenizer.next();
    let x = tokenizer.next();
    assert_eq!((x.line, x.column), (1, 9));
}

#[test]
fn test_eof_is_sticky() {
    let mut tokenizer = Tokenizer::new("  ", FileId::new(0));
    assert_eq!(tokenizer.next().kind, TokenKind::Eof);
    assert_eq!(tokenizer.next().kind, TokenKind::Eof);
    assert_eq!(tokenizer.lexeme().kind, TokenKind::Eof);
}

#[test]
fn test_malformed_operator() {
    let lexeme = single("a & b");
    assert_eq!(lexeme.kind, TokenKind::Ident);

    let mut tokenizer = Tokenizer::new("a & b", FileId::new(0));
    tokenizer.next();
    let err = tokenizer.next();
    assert_eq!(err.kind, TokenKind::Error);
    assert_eq!(
        err.error,
        Some(LexErrorKind::MalformedOperator {
            expected: '&',
            token: TokenKind::AndAnd,
            found: Some(' '),
        })
    );
    assert_eq!((err.line, err.column), (1, 3));

    let pipe = single("|");
    assert_eq!(
        pipe.error,
        Some(LexErrorKind::MalformedOperator {
            expected: '|',
            token: TokenKind::OrOr,
            found: None,
        })
    );
}

#[test]
fn test_lex_errors() {
    assert_eq!(single("#").error, Some(LexErrorKind::UnknownChar('#')));
    assert_eq!(
        single(r#""bad \q""#).error,
        Some(LexErrorKind::InvalidEscape('q'))
    );
    assert_eq!(
        single("\"never closed").error,
        Some(LexErrorKind::UnterminatedString)
    );
    assert_eq!(
        single("/* open").error,
        Some(LexErrorKind::UnterminatedComment)
    );
    assert_eq!(
        single("92233720368547758070").error,
        Some(LexErrorKind::NumberTooLarge)
    );
}

#[test]
fn test_tokenize_stops_at_error() {
    let lexemes = tokenize("var a = #; var b = 2;", FileId::new(0));
    assert_eq!(lexemes.len(), 4);
    assert_eq!(lexemes[3].kind, TokenKind::Error);
    assert_eq!(
        lexemes[3].string,
        "unknown character `#`"
    );
}

#[test]
fn test_min_magnitude_needs_a_minus() {
    let lexemes = tokenize("- 9223372036854775808", FileId::new(0));
    assert_eq!(lexemes[1].kind, TokenKind::Int);
    assert_eq!(lexemes[1].integer, i64::MIN);
    assert_eq!((lexemes[1].line, lexemes[1].column), (1, 3));

    assert_eq!(
        single("9223372036854775808").error,
        Some(LexErrorKind::NumberTooLarge)
    );
    let lexemes = tokenize("-9223372036854775809", FileId::new(0));
    assert_eq!(lexemes[1].error, Some(LexErrorKind::NumberTooLarge));
}

#[test]
fn test_columns_on_a_long_line() {
    let source = "x ".repeat(20_000);
    let lexemes = tokenize(&source, FileId::new(0));
    let last = &lexemes[lexemes.len() - 2];
    assert_eq!(last.kind, TokenKind::Ident);
    assert_eq!((last.line, last.column), (1, 39_999));

    let lexemes = tokenize("a\n\n  bé\n c", FileId::new(0));
    let positions: Vec<_> = lexemes.iter().map(|l| (l.line, l.column)).collect();
    assert_eq!(positions, vec![(1, 1), (3, 3), (4, 2), (4, 3)]);
}
