//! Strict binary and unary operators on scalar values.
//!
//! `&&`, `||` and `?:` short-circuit and live in the evaluator; everything
//! here sees both operands already evaluated. Integer arithmetic is
//! checked: overflow and division by zero are errors, never wrap.

use std::cmp::Ordering;

use sfe_ir::{BinaryOp, Position, UnaryOp};

use crate::errors::{
    binary_type_mismatch, division_by_zero, integer_overflow, unary_type_mismatch, BindResult,
};
use crate::value::Value;

/// Numeric view of a value after promotion.
#[derive(Copy, Clone, Debug)]
enum Num {
    Int(i64),
    UInt(u64),
    Real(f64),
}

impl Num {
    fn of(value: &Value) -> Option<Num> {
        match *value {
            Value::Int64(v) => Some(Num::Int(v)),
            Value::UInt64(v) => Some(Num::UInt(v)),
            Value::Double(v) => Some(Num::Real(v)),
            _ => None,
        }
    }

    #[expect(clippy::cast_precision_loss, reason = "mixed int/real promotes to real")]
    fn to_f64(self) -> f64 {
        match self {
            Num::Int(v) => v as f64,
            Num::UInt(v) => v as f64,
            Num::Real(v) => v,
        }
    }

    fn to_i128(self) -> Option<i128> {
        match self {
            Num::Int(v) => Some(i128::from(v)),
            Num::UInt(v) => Some(i128::from(v)),
            Num::Real(_) => None,
        }
    }
}

/// Order two numbers; `None` when a NaN is involved.
fn compare_nums(a: Num, b: Num) -> Option<Ordering> {
    match (a.to_i128(), b.to_i128()) {
        (Some(a), Some(b)) => Some(a.cmp(&b)),
        _ => a.to_f64().partial_cmp(&b.to_f64()),
    }
}

/// Evaluate a strict binary operator.
pub(crate) fn evaluate_binary(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    pos: Position,
) -> BindResult<Value> {
    let mismatch = || binary_type_mismatch(op, left.type_name(), right.type_name(), pos);

    match op {
        // Short-circuited by the evaluator before both sides exist.
        BinaryOp::And | BinaryOp::Or => Err(mismatch()),
        BinaryOp::Eq | BinaryOp::NotEq => {
            let equal = values_equal(left, right).ok_or_else(mismatch)?;
            Ok(Value::Bool(equal == (op == BinaryOp::Eq)))
        }
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            let ordering = match (left, right) {
                (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
                _ => {
                    let (a, b) = Num::of(left).zip(Num::of(right)).ok_or_else(mismatch)?;
                    compare_nums(a, b)
                }
            };
            let result = ordering.is_some_and(|ord| match op {
                BinaryOp::Lt => ord == Ordering::Less,
                BinaryOp::LtEq => ord != Ordering::Greater,
                BinaryOp::Gt => ord == Ordering::Greater,
                _ => ord != Ordering::Less,
            });
            Ok(Value::Bool(result))
        }
        BinaryOp::Add => match (left, right) {
            (Value::String(a), Value::String(b)) => {
                let mut out = String::with_capacity(a.len() + b.len());
                out.push_str(a);
                out.push_str(b);
                Ok(Value::String(out))
            }
            _ => arithmetic(op, left, right, pos),
        },
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod | BinaryOp::Pow => {
            arithmetic(op, left, right, pos)
        }
    }
}

/// `None` when the kinds cannot be compared.
fn values_equal(left: &Value, right: &Value) -> Option<bool> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a == b),
        (Value::String(a), Value::String(b)) => Some(a == b),
        _ => {
            let (a, b) = Num::of(left).zip(Num::of(right))?;
            Some(compare_nums(a, b) == Some(Ordering::Equal))
        }
    }
}

fn arithmetic(op: BinaryOp, left: &Value, right: &Value, pos: Position) -> BindResult<Value> {
    let mismatch = || binary_type_mismatch(op, left.type_name(), right.type_name(), pos);
    let (a, b) = Num::of(left).zip(Num::of(right)).ok_or_else(mismatch)?;

    match (a, b) {
        (Num::Int(a), Num::Int(b)) => int_arith(op, a, b, pos),
        (Num::UInt(a), Num::UInt(b)) => uint_arith(op, a, b, pos),
        (Num::Int(a), Num::UInt(b)) => {
            let b = i64::try_from(b).map_err(|_| integer_overflow(op_name(op), pos))?;
            int_arith(op, a, b, pos)
        }
        (Num::UInt(a), Num::Int(b)) => {
            let a = i64::try_from(a).map_err(|_| integer_overflow(op_name(op), pos))?;
            int_arith(op, a, b, pos)
        }
        _ if op == BinaryOp::Mod => Err(mismatch()),
        _ => Ok(Value::Double(real_arith(op, a.to_f64(), b.to_f64()))),
    }
}

fn op_name(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "addition",
        BinaryOp::Sub => "subtraction",
        BinaryOp::Mul => "multiplication",
        BinaryOp::Div => "division",
        BinaryOp::Mod => "remainder",
        BinaryOp::Pow => "exponentiation",
        _ => "arithmetic",
    }
}

/// Checked arithmetic with the overflow error attached.
#[inline]
fn checked<T>(result: Option<T>, wrap: fn(T) -> Value, op: BinaryOp, pos: Position) -> BindResult<Value> {
    result.map(wrap).ok_or_else(|| integer_overflow(op_name(op), pos))
}

fn int_arith(op: BinaryOp, a: i64, b: i64, pos: Position) -> BindResult<Value> {
    match op {
        BinaryOp::Add => checked(a.checked_add(b), Value::Int64, op, pos),
        BinaryOp::Sub => checked(a.checked_sub(b), Value::Int64, op, pos),
        BinaryOp::Mul => checked(a.checked_mul(b), Value::Int64, op, pos),
        BinaryOp::Div | BinaryOp::Mod if b == 0 => Err(division_by_zero(op, pos)),
        BinaryOp::Div => checked(a.checked_div(b), Value::Int64, op, pos),
        BinaryOp::Mod => checked(a.checked_rem(b), Value::Int64, op, pos),
        BinaryOp::Pow => match u32::try_from(b) {
            Ok(exp) => checked(a.checked_pow(exp), Value::Int64, op, pos),
            Err(_) if b > 0 => Err(integer_overflow(op_name(op), pos)),
            Err(_) => Ok(Value::Double(real_arith(
                op,
                Num::Int(a).to_f64(),
                Num::Int(b).to_f64(),
            ))),
        },
        _ => Err(binary_type_mismatch(op, "int", "int", pos)),
    }
}

fn uint_arith(op: BinaryOp, a: u64, b: u64, pos: Position) -> BindResult<Value> {
    match op {
        BinaryOp::Add => checked(a.checked_add(b), Value::UInt64, op, pos),
        BinaryOp::Sub => checked(a.checked_sub(b), Value::UInt64, op, pos),
        BinaryOp::Mul => checked(a.checked_mul(b), Value::UInt64, op, pos),
        BinaryOp::Div | BinaryOp::Mod if b == 0 => Err(division_by_zero(op, pos)),
        BinaryOp::Div => checked(a.checked_div(b), Value::UInt64, op, pos),
        BinaryOp::Mod => checked(a.checked_rem(b), Value::UInt64, op, pos),
        BinaryOp::Pow => match u32::try_from(b) {
            Ok(exp) => checked(a.checked_pow(exp), Value::UInt64, op, pos),
            Err(_) => Err(integer_overflow(op_name(op), pos)),
        },
        _ => Err(binary_type_mismatch(op, "uint", "uint", pos)),
    }
}

/// IEEE arithmetic; division by zero yields an infinity.
fn real_arith(op: BinaryOp, a: f64, b: f64) -> f64 {
    match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Pow => a.powf(b),
        _ => a % b,
    }
}

/// Evaluate one prefix operator.
pub(crate) fn evaluate_unary(op: UnaryOp, operand: Value, pos: Position) -> BindResult<Value> {
    match (op, operand) {
        (UnaryOp::Not, Value::Bool(v)) => Ok(Value::Bool(!v)),
        (UnaryOp::Neg, Value::Int64(v)) => v
            .checked_neg()
            .map(Value::Int64)
            .ok_or_else(|| integer_overflow("negation", pos)),
        (UnaryOp::Neg, Value::UInt64(v)) => i64::try_from(v)
            .ok()
            .and_then(i64::checked_neg)
            .map(Value::Int64)
            .ok_or_else(|| integer_overflow("negation", pos)),
        (UnaryOp::Neg, Value::Double(v)) => Ok(Value::Double(-v)),
        (UnaryOp::Plus, value) if value.is_numeric() => Ok(value),
        (op, value) => Err(unary_type_mismatch(op, value.type_name(), pos)),
    }
}
