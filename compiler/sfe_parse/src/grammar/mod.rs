//! Grammar productions.
//!
//! - this module: top-level declarations and `include`
//! - `expr`: the expression precedence chain
//! - `primary`: literals, references, dicts and postfix chains

mod expr;
mod operators;
mod primary;

use std::path::Path;
use std::sync::Arc;

use sfe_ir::ast::MAX_LIST_LEN;
use sfe_ir::{NamedArg, NodeId, NodeKind, ParamDecl, Position, TokenKind};
use tracing::{debug, trace};

use crate::{ParseError, Parser};

impl Parser<'_, '_> {
    /// Parse declarations until end of file.
    pub(crate) fn parse_unit(&mut self) -> Result<(), ParseError> {
        while !self.cursor.is_at_end() {
            self.parse_declaration()?;
        }
        Ok(())
    }

    fn parse_declaration(&mut self) -> Result<(), ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Var => self.parse_var(),
            TokenKind::Class => self.parse_class(),
            TokenKind::Object => self.parse_object(),
            TokenKind::Include => self.parse_include(),
            _ => Err(ParseError::unexpected(
                "`var`, `class`, `object` or `include`",
                self.cursor.current(),
                self.cursor.position(),
            )),
        }
    }

    /// `var NAME = expr ;`
    fn parse_var(&mut self) -> Result<(), ParseError> {
        let pos = self.cursor.expect(TokenKind::Var)?;
        let (name, _) = self.cursor.expect_ident()?;
        self.cursor.expect(TokenKind::Eq)?;
        let value = self.parse_expr()?;
        self.cursor.expect(TokenKind::Semicolon)?;

        trace!(name = %name, "var");
        let name = self.ast_mut().intern(&name);
        let id = self.ast_mut().alloc(NodeKind::Var { name, value }, pos);
        self.ast_mut().root_mut().vars.push(id);
        Ok(())
    }

    /// `class NAME [( params )] [extends BASE, ...] { body } [;]`
    fn parse_class(&mut self) -> Result<(), ParseError> {
        let pos = self.cursor.expect(TokenKind::Class)?;
        let (name, _) = self.cursor.expect_ident()?;

        let mut params = Vec::new();
        if self.cursor.check(TokenKind::LParen) {
            let open = self.cursor.position();
            self.cursor.advance()?;
            while !self.cursor.check(TokenKind::RParen) && !self.cursor.is_at_end() {
                let (param, param_pos) = self.cursor.expect_ident()?;
                let default = if self.cursor.eat(TokenKind::Eq)? {
                    self.parse_expr()?
                } else {
                    NodeId::INVALID
                };
                let name = self.ast_mut().intern(&param);
                params.push(ParamDecl {
                    name,
                    default,
                    pos: param_pos,
                });
                check_list_len("parameter list", params.len(), param_pos)?;
                if !self.cursor.eat(TokenKind::Comma)? {
                    break;
                }
            }
            self.cursor
                .expect_closing(TokenKind::LParen, TokenKind::RParen, open)?;
        }

        let mut bases = Vec::new();
        if self.cursor.eat(TokenKind::Extends)? {
            loop {
                let (base, base_pos) = self.cursor.expect_ident()?;
                bases.push(self.ast_mut().intern(&base));
                check_list_len("base list", bases.len(), base_pos)?;
                if !self.cursor.eat(TokenKind::Comma)? {
                    break;
                }
            }
        }

        if !self.cursor.check(TokenKind::LBrace) {
            return Err(ParseError::unexpected(
                "class body `{`",
                self.cursor.current(),
                self.cursor.position(),
            ));
        }
        let body = self.parse_dict()?;
        self.cursor.eat(TokenKind::Semicolon)?;

        trace!(name = %name, params = params.len(), bases = bases.len(), "class");
        let ast = self.ast_mut();
        let name = ast.intern(&name);
        let bases = ast.alloc_names(bases);
        let params = ast.alloc_params(params);
        let id = ast.alloc(
            NodeKind::Class {
                name,
                bases,
                params,
                body,
            },
            pos,
        );
        ast.root_mut().classes.push(id);
        Ok(())
    }

    /// `object "NAME" CLASS ( args ) ;` or `object "NAME" expr ;`
    ///
    /// An identifier directly followed by `(` is an instantiation; anything
    /// else after the name is an inline object expression.
    fn parse_object(&mut self) -> Result<(), ParseError> {
        let pos = self.cursor.expect(TokenKind::Object)?;
        let (name, _) = self.cursor.expect_string("object name string")?;
        let name = self.ast_mut().intern(&name);

        let id = if self.cursor.check(TokenKind::Ident) {
            let (class, class_pos) = self.cursor.expect_ident()?;
            let class = self.ast_mut().intern(&class);
            if self.cursor.check(TokenKind::LParen) {
                let args = self.parse_named_args()?;
                let args = self.ast_mut().alloc_args(args);
                self.ast_mut()
                    .alloc(NodeKind::ObjInst { name, class, args }, pos)
            } else {
                let head = self.ast_mut().alloc(NodeKind::Ident(class), class_pos);
                self.pending = Some(head);
                let value = self.parse_expr()?;
                self.ast_mut().alloc(NodeKind::ObjInl { name, value }, pos)
            }
        } else {
            let value = self.parse_expr()?;
            self.ast_mut().alloc(NodeKind::ObjInl { name, value }, pos)
        };
        self.cursor.expect(TokenKind::Semicolon)?;

        trace!(name = %self.ast().name_str(name), kind = self.ast().kind(id).label(), "object");
        self.ast_mut().root_mut().objects.push(id);
        Ok(())
    }

    /// `( NAME = expr, ... )` of an instantiation.
    fn parse_named_args(&mut self) -> Result<Vec<NamedArg>, ParseError> {
        let open = self.cursor.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        while !self.cursor.check(TokenKind::RParen) && !self.cursor.is_at_end() {
            let (name, arg_pos) = self.cursor.expect_ident()?;
            self.cursor.expect(TokenKind::Eq)?;
            let value = self.parse_expr()?;
            let name = self.ast_mut().intern(&name);
            args.push(NamedArg {
                name,
                value,
                pos: arg_pos,
            });
            check_list_len("argument list", args.len(), arg_pos)?;
            if !self.cursor.eat(TokenKind::Comma)? {
                break;
            }
        }
        self.cursor
            .expect_closing(TokenKind::LParen, TokenKind::RParen, open)?;
        Ok(args)
    }

    /// `include "PATH" ;`
    ///
    /// The included file is parsed to completion, in place, before the
    /// next declaration of this file.
    fn parse_include(&mut self) -> Result<(), ParseError> {
        let pos = self.cursor.expect(TokenKind::Include)?;
        let (target, target_pos) = self.cursor.expect_string("include path string")?;
        self.cursor.expect(TokenKind::Semicolon)?;

        let resolved = self
            .session
            .loader
            .resolve(&self.path, Path::new(&target));
        if self.session.include_stack.contains(&resolved) {
            return Err(ParseError::recursive_include(&resolved, target_pos));
        }
        let depth = self.session.include_stack.len();
        if depth > self.session.options.max_include_depth {
            return Err(ParseError::include_too_deep(
                self.session.options.max_include_depth,
                pos,
            ));
        }
        let text: Arc<str> = self
            .session
            .loader
            .load(&resolved)
            .map_err(|err| ParseError::include_failed(&resolved, &err.to_string(), target_pos))?;

        let file = self
            .ast_mut()
            .sources_mut()
            .add(resolved.clone(), Arc::clone(&text));
        self.session.include_stack.push(resolved.clone());
        debug!(path = %resolved.display(), depth, "entering include");

        let result = Parser::new(&text, file, resolved, &mut *self.session)
            .and_then(|mut parser| parser.parse_unit());

        self.session.include_stack.pop();
        debug!(depth, "leaving include");
        result
    }
}

/// Reject lists a side-table range cannot describe.
fn check_list_len(what: &str, len: usize, pos: Position) -> Result<(), ParseError> {
    if len > MAX_LIST_LEN {
        return Err(ParseError::too_many_items(what, MAX_LIST_LEN, pos));
    }
    Ok(())
}
