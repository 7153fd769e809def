//! Which token selects which operator at each precedence level.

use sfe_ir::{BinaryOp, TokenKind, UnaryOp};

/// Left-associative binary levels, loosest first.
///
/// `^` and `?:` are not listed: both nest to the right and have their own
/// productions.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(super) enum Level {
    Or,
    And,
    Equality,
    Relational,
    Additive,
    Multiplicative,
}

impl Level {
    /// Level of the operands; `None` below multiplicative, where `^` takes over.
    pub(super) fn tighter(self) -> Option<Level> {
        match self {
            Level::Or => Some(Level::And),
            Level::And => Some(Level::Equality),
            Level::Equality => Some(Level::Relational),
            Level::Relational => Some(Level::Additive),
            Level::Additive => Some(Level::Multiplicative),
            Level::Multiplicative => None,
        }
    }

    pub(super) fn operator(self, kind: TokenKind) -> Option<BinaryOp> {
        use TokenKind as T;

        let op = match (self, kind) {
            (Level::Or, T::OrOr) => BinaryOp::Or,
            (Level::And, T::AndAnd) => BinaryOp::And,
            (Level::Equality, T::EqEq) => BinaryOp::Eq,
            (Level::Equality, T::NotEq) => BinaryOp::NotEq,
            (Level::Relational, T::Lt) => BinaryOp::Lt,
            (Level::Relational, T::LtEq) => BinaryOp::LtEq,
            (Level::Relational, T::Gt) => BinaryOp::Gt,
            (Level::Relational, T::GtEq) => BinaryOp::GtEq,
            (Level::Additive, T::Plus) => BinaryOp::Add,
            (Level::Additive, T::Minus) => BinaryOp::Sub,
            (Level::Multiplicative, T::Star) => BinaryOp::Mul,
            (Level::Multiplicative, T::Slash) => BinaryOp::Div,
            (Level::Multiplicative, T::Percent) => BinaryOp::Mod,
            _ => return None,
        };
        Some(op)
    }
}

pub(super) fn prefix_operator(kind: TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Bang => Some(UnaryOp::Not),
        TokenKind::Minus => Some(UnaryOp::Neg),
        TokenKind::Plus => Some(UnaryOp::Plus),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_reach_multiplicative() {
        let mut level = Level::Or;
        let mut steps = 0;
        while let Some(next) = level.tighter() {
            level = next;
            steps += 1;
        }
        assert_eq!((level, steps), (Level::Multiplicative, 5));
    }

    #[test]
    fn test_minus_is_additive_or_prefix() {
        assert_eq!(Level::Additive.operator(TokenKind::Minus), Some(BinaryOp::Sub));
        assert_eq!(Level::Multiplicative.operator(TokenKind::Minus), None);
        assert_eq!(prefix_operator(TokenKind::Minus), Some(UnaryOp::Neg));
        assert_eq!(prefix_operator(TokenKind::Caret), None);
    }
}
