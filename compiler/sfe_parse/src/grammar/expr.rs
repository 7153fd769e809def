//! Expression precedence chain.
//!
//! Lowest to highest: `?:`, `||`, `&&`, equality, relational, additive,
//! multiplicative, `^`, prefix operators, postfix chains. Binary levels are
//! left-associative except `^`; the ternary nests to the right.

use sfe_ir::{BinaryOp, NodeId, NodeKind, Position, TokenKind, UnaryOp};
use sfe_stack::ensure_sufficient_stack;
use smallvec::SmallVec;

use super::operators::{prefix_operator, Level};
use crate::{ParseError, Parser};

impl Parser<'_, '_> {
    /// Parse an expression.
    ///
    /// Uses `ensure_sufficient_stack` so deeply nested input cannot
    /// overflow the native stack.
    pub(crate) fn parse_expr(&mut self) -> Result<NodeId, ParseError> {
        ensure_sufficient_stack(|| self.parse_ternary())
    }

    /// `cond ? a : b`
    fn parse_ternary(&mut self) -> Result<NodeId, ParseError> {
        let cond = self.parse_binary(Level::Or)?;
        if !self.cursor.check(TokenKind::Question) {
            return Ok(cond);
        }
        let pos = self.cursor.position();
        self.cursor.advance()?;
        let then_branch = self.parse_expr()?;
        self.cursor.expect(TokenKind::Colon)?;
        let else_branch = self.parse_expr()?;
        Ok(self.ast_mut().alloc(
            NodeKind::Ternary {
                cond,
                then_branch,
                else_branch,
            },
            pos,
        ))
    }

    /// Allocate `left op right` positioned at the operator.
    fn binary(&mut self, op: BinaryOp, left: NodeId, right: NodeId, pos: Position) -> NodeId {
        self.ast_mut().alloc(NodeKind::Binary { op, left, right }, pos)
    }

    /// One left-associative level, e.g. `a + b - c` at [`Level::Additive`].
    fn parse_binary(&mut self, level: Level) -> Result<NodeId, ParseError> {
        let mut left = self.parse_operand(level)?;

        while let Some(op) = level.operator(self.cursor.current_kind()) {
            let pos = self.cursor.position();
            self.cursor.advance()?;
            let right = self.parse_operand(level)?;
            left = self.binary(op, left, right, pos);
        }

        Ok(left)
    }

    fn parse_operand(&mut self, level: Level) -> Result<NodeId, ParseError> {
        match level.tighter() {
            Some(next) => self.parse_binary(next),
            None => self.parse_power(),
        }
    }

    /// `a ^ b`, right-associative: `2 ^ 3 ^ 2` is `2 ^ 9`.
    fn parse_power(&mut self) -> Result<NodeId, ParseError> {
        let base = self.parse_unary()?;
        if !self.cursor.check(TokenKind::Caret) {
            return Ok(base);
        }
        let pos = self.cursor.position();
        self.cursor.advance()?;
        let exponent = ensure_sufficient_stack(|| self.parse_power())?;
        Ok(self.binary(BinaryOp::Pow, base, exponent, pos))
    }

    /// Prefix operators collapse into one `Unary` node over the operand.
    fn parse_unary(&mut self) -> Result<NodeId, ParseError> {
        if self.pending.is_some() {
            return self.parse_postfix();
        }

        let pos = self.cursor.position();
        let mut last_op = pos;
        let mut ops: SmallVec<[UnaryOp; 4]> = SmallVec::new();
        while let Some(op) = prefix_operator(self.cursor.current_kind()) {
            last_op = self.cursor.position();
            ops.push(op);
            super::check_list_len("prefix operator run", ops.len(), pos)?;
            self.cursor.advance()?;
        }

        // `-9223372036854775808` is one literal: its magnitude alone
        // does not fit in i64.
        if ops.last() == Some(&UnaryOp::Neg) && self.at_min_magnitude() {
            ops.pop();
            self.cursor.advance()?;
            self.pending = Some(self.ast_mut().alloc(NodeKind::Int(i64::MIN), last_op));
        }

        let operand = self.parse_postfix()?;
        if ops.is_empty() {
            return Ok(operand);
        }
        let ast = self.ast_mut();
        let ops = ast.alloc_unary_ops(ops);
        Ok(ast.alloc(NodeKind::Unary { ops, operand }, pos))
    }

    /// An `Int` lexeme holding `i64::MIN` only follows a `-`.
    pub(crate) fn at_min_magnitude(&self) -> bool {
        let lexeme = self.cursor.current();
        lexeme.kind == TokenKind::Int && lexeme.integer == i64::MIN
    }
}
