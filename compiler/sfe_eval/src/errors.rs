//! Binding and evaluation errors.
//!
//! All failures after parsing are a [`BindError`]. The constructors below
//! are the single place messages are worded.

use std::fmt;

use sfe_diagnostic::{Diagnostic, ErrorCode};
use sfe_ir::{BinaryOp, Position, UnaryOp};

/// A failure while binding declarations or evaluating expressions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BindError {
    pub code: ErrorCode,
    pub message: String,
    pub pos: Position,
    /// Related location, e.g. the first of two duplicate declarations.
    pub related: Option<(Position, String)>,
}

impl BindError {
    #[cold]
    pub fn new(code: ErrorCode, message: impl Into<String>, pos: Position) -> Self {
        BindError {
            code,
            message: message.into(),
            pos,
            related: None,
        }
    }

    #[must_use]
    pub fn with_related(mut self, pos: Position, message: impl Into<String>) -> Self {
        self.related = Some((pos, message.into()));
        self
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code)
            .with_message(&self.message)
            .with_label(self.pos, self.code.description());
        if let Some((pos, message)) = &self.related {
            diag = diag.with_secondary_label(*pos, message);
        }
        diag
    }
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.pos, self.message)
    }
}

impl std::error::Error for BindError {}

pub type BindResult<T> = Result<T, BindError>;

// Declarations

#[cold]
pub fn duplicate_class(name: &str, pos: Position, first: Position) -> BindError {
    BindError::new(ErrorCode::E2001, format!("class `{name}` is declared twice"), pos)
        .with_related(first, "first declared here")
}

#[cold]
pub fn duplicate_object(name: &str, pos: Position, first: Position) -> BindError {
    BindError::new(ErrorCode::E2002, format!("object \"{name}\" is declared twice"), pos)
        .with_related(first, "first declared here")
}

#[cold]
pub fn duplicate_var(name: &str, pos: Position, first: Position) -> BindError {
    BindError::new(ErrorCode::E2003, format!("variable `{name}` is declared twice"), pos)
        .with_related(first, "first declared here")
}

#[cold]
pub fn duplicate_parameter(name: &str, class: &str, pos: Position, first: Position) -> BindError {
    BindError::new(
        ErrorCode::E2009,
        format!("parameter `{name}` of class `{class}` is declared twice"),
        pos,
    )
    .with_related(first, "first declared here")
}

// Class resolution

#[cold]
pub fn unknown_base(base: &str, class: &str, pos: Position) -> BindError {
    BindError::new(
        ErrorCode::E2004,
        format!("class `{class}` extends unknown class `{base}`"),
        pos,
    )
}

#[cold]
pub fn inheritance_cycle(path: &[&str], pos: Position) -> BindError {
    BindError::new(
        ErrorCode::E2005,
        format!("inheritance cycle: {}", path.join(" -> ")),
        pos,
    )
}

#[cold]
pub fn unknown_class(class: &str, pos: Position) -> BindError {
    BindError::new(
        ErrorCode::E2008,
        format!("object instantiates unknown class `{class}`"),
        pos,
    )
}

// Instantiation

#[cold]
pub fn unknown_argument(arg: &str, class: &str, pos: Position) -> BindError {
    BindError::new(
        ErrorCode::E2006,
        format!("class `{class}` has no parameter `{arg}`"),
        pos,
    )
}

#[cold]
pub fn duplicate_argument(arg: &str, pos: Position, first: Position) -> BindError {
    BindError::new(
        ErrorCode::E2007,
        format!("argument `{arg}` is given twice"),
        pos,
    )
    .with_related(first, "first given here")
}

#[cold]
pub fn missing_argument(param: &str, object: &str, pos: Position) -> BindError {
    BindError::new(
        ErrorCode::E3005,
        format!("parameter `{param}` of object \"{object}\" has no argument and no default"),
        pos,
    )
}

// Evaluation

#[cold]
pub fn unresolved(name: &str, pos: Position) -> BindError {
    BindError::new(
        ErrorCode::E3001,
        format!("cannot resolve identifier `{name}`"),
        pos,
    )
}

#[cold]
pub fn binary_type_mismatch(op: BinaryOp, left: &str, right: &str, pos: Position) -> BindError {
    BindError::new(
        ErrorCode::E3002,
        format!("operator `{op}` cannot be applied to {left} and {right}"),
        pos,
    )
}

#[cold]
pub fn unary_type_mismatch(op: UnaryOp, operand: &str, pos: Position) -> BindError {
    BindError::new(
        ErrorCode::E3002,
        format!("operator `{op}` cannot be applied to {operand}"),
        pos,
    )
}

#[cold]
pub fn expected_type(expected: &str, found: &str, pos: Position) -> BindError {
    BindError::new(
        ErrorCode::E3002,
        format!("expected {expected}, found {found}"),
        pos,
    )
}

#[cold]
pub fn division_by_zero(op: BinaryOp, pos: Position) -> BindError {
    let what = if op == BinaryOp::Mod { "remainder" } else { "division" };
    BindError::new(ErrorCode::E3003, format!("{what} by zero"), pos)
}

#[cold]
pub fn integer_overflow(op_name: &str, pos: Position) -> BindError {
    BindError::new(
        ErrorCode::E3004,
        format!("integer overflow in {op_name}"),
        pos,
    )
}

#[cold]
pub fn evaluation_cycle(name: &str, pos: Position) -> BindError {
    BindError::new(
        ErrorCode::E3006,
        format!("`{name}` depends on itself"),
        pos,
    )
}

#[cold]
pub fn not_callable(what: &str, pos: Position) -> BindError {
    BindError::new(ErrorCode::E3007, format!("{what} is not callable"), pos)
}

#[cold]
pub fn host_function_failed(name: &str, reason: &str, pos: Position) -> BindError {
    BindError::new(
        ErrorCode::E3008,
        format!("host function `{name}` failed: {reason}"),
        pos,
    )
}

#[cold]
pub fn missing_key(key: &str, pos: Position) -> BindError {
    BindError::new(ErrorCode::E3009, format!("no key `{key}`"), pos)
}

#[cold]
pub fn dict_not_allowed(what: &str, pos: Position) -> BindError {
    BindError::new(
        ErrorCode::E3010,
        format!("{what} must be a scalar, found a dict"),
        pos,
    )
}
