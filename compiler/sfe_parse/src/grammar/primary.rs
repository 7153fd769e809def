//! Primary expressions and postfix chains.

use sfe_ir::{ChainLink, DictEntry, LinkKind, NodeId, NodeKind, TokenKind};
use sfe_lexer::LexErrorKind;

use super::check_list_len;
use crate::{ParseError, Parser};

impl Parser<'_, '_> {
    /// A primary followed by any number of `.key`, `[index]` and `(args)`.
    pub(crate) fn parse_postfix(&mut self) -> Result<NodeId, ParseError> {
        let head = self.parse_primary()?;
        let mut links = Vec::new();
        loop {
            let pos = self.cursor.position();
            let kind = match self.cursor.current_kind() {
                TokenKind::Dot => {
                    self.cursor.advance()?;
                    let (key, _) = self.cursor.expect_ident()?;
                    LinkKind::Dot(self.ast_mut().intern(&key))
                }
                TokenKind::LBracket => {
                    self.cursor.advance()?;
                    let index = self.parse_expr()?;
                    self.cursor
                        .expect_closing(TokenKind::LBracket, TokenKind::RBracket, pos)?;
                    LinkKind::Index(index)
                }
                TokenKind::LParen => LinkKind::Call(self.parse_call_args()?),
                _ => break,
            };
            links.push(ChainLink { kind, pos });
            check_list_len("postfix chain", links.len(), pos)?;
        }

        if links.is_empty() {
            return Ok(head);
        }
        let pos = self.ast().pos(head);
        let ast = self.ast_mut();
        let links = ast.alloc_links(links);
        Ok(ast.alloc(NodeKind::Prefix { head, links }, pos))
    }

    /// `( expr, ... )` as a `Call` node.
    fn parse_call_args(&mut self) -> Result<NodeId, ParseError> {
        let open = self.cursor.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        while !self.cursor.check(TokenKind::RParen) && !self.cursor.is_at_end() {
            args.push(self.parse_expr()?);
            check_list_len("call argument list", args.len(), open)?;
            if !self.cursor.eat(TokenKind::Comma)? {
                break;
            }
        }
        self.cursor
            .expect_closing(TokenKind::LParen, TokenKind::RParen, open)?;
        let ast = self.ast_mut();
        let args = ast.alloc_node_list(args);
        Ok(ast.alloc(NodeKind::Call(args), open))
    }

    fn parse_primary(&mut self) -> Result<NodeId, ParseError> {
        if let Some(pending) = self.pending.take() {
            return Ok(pending);
        }

        let pos = self.cursor.position();
        let lexeme = self.cursor.current();
        let kind = match lexeme.kind {
            TokenKind::Int if self.at_min_magnitude() => {
                return Err(ParseError::lex(LexErrorKind::NumberTooLarge, pos));
            }
            TokenKind::Int => NodeKind::Int(lexeme.integer),
            TokenKind::Real => NodeKind::Real(lexeme.real),
            TokenKind::True | TokenKind::False => NodeKind::Boolean(lexeme.boolean),
            TokenKind::String => {
                let text = lexeme.string.clone();
                NodeKind::String(self.ast_mut().intern(&text))
            }
            TokenKind::Ident => {
                let text = lexeme.string.clone();
                NodeKind::Ident(self.ast_mut().intern(&text))
            }
            TokenKind::Dollar => {
                self.cursor.advance()?;
                let (name, _) = self.cursor.expect_ident()?;
                let name = self.ast_mut().intern(&name);
                return Ok(self.ast_mut().alloc(NodeKind::Global(name), pos));
            }
            TokenKind::LParen => {
                self.cursor.advance()?;
                let inner = self.parse_expr()?;
                self.cursor
                    .expect_closing(TokenKind::LParen, TokenKind::RParen, pos)?;
                return Ok(inner);
            }
            TokenKind::LBrace => return self.parse_dict(),
            _ => return Err(ParseError::expected_expression(lexeme, pos)),
        };
        self.cursor.advance()?;
        Ok(self.ast_mut().alloc(kind, pos))
    }

    /// `{ key: value, key = value; ... }`
    ///
    /// Keys are identifiers or strings; entries are separated by `,` or
    /// `;`, and a trailing separator is allowed.
    pub(crate) fn parse_dict(&mut self) -> Result<NodeId, ParseError> {
        let open = self.cursor.expect(TokenKind::LBrace)?;
        let mut entries = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) && !self.cursor.is_at_end() {
            let key_pos = self.cursor.position();
            let lexeme = self.cursor.current();
            let key = match lexeme.kind {
                TokenKind::Ident => {
                    let text = lexeme.string.clone();
                    NodeKind::Ident(self.ast_mut().intern(&text))
                }
                TokenKind::String => {
                    let text = lexeme.string.clone();
                    NodeKind::String(self.ast_mut().intern(&text))
                }
                _ => return Err(ParseError::unexpected("dict key", lexeme, key_pos)),
            };
            self.cursor.advance()?;
            let key = self.ast_mut().alloc(key, key_pos);

            if !self.cursor.eat(TokenKind::Colon)? && !self.cursor.eat(TokenKind::Eq)? {
                return Err(ParseError::unexpected(
                    "`:` or `=`",
                    self.cursor.current(),
                    self.cursor.position(),
                ));
            }
            let value = self.parse_expr()?;
            entries.push(DictEntry { key, value });
            check_list_len("dict", entries.len(), key_pos)?;

            if !self.cursor.eat(TokenKind::Comma)? && !self.cursor.eat(TokenKind::Semicolon)? {
                break;
            }
        }
        self.cursor
            .expect_closing(TokenKind::LBrace, TokenKind::RBrace, open)?;
        let ast = self.ast_mut();
        let entries = ast.alloc_dict(entries);
        Ok(ast.alloc(NodeKind::Dict(entries), open))
    }
}
