//! Scalar values produced by evaluation.

use std::fmt;

/// An evaluated scalar.
///
/// Dicts never become values; they exist only while evaluating postfix
/// chains and object bodies.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int64(i64),
    UInt64(u64),
    Double(f64),
    Bool(bool),
    String(String),
}

impl Value {
    /// Name of the value's kind, for messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int64(_) => "int",
            Value::UInt64(_) => "uint",
            Value::Double(_) => "real",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
        }
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int64(_) | Value::UInt64(_) | Value::Double(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int64(v) => write!(f, "{v}"),
            Value::UInt64(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v:?}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int64(i64::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt64(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::UInt64(u64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Double(f64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

/// Typed extraction from a [`Value`].
///
/// Integers convert between widths when the value is in range and widen
/// to floating point; nothing else converts.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

macro_rules! impl_from_value_int {
    ($($ty:ty),*) => { $(
        impl FromValue for $ty {
            fn from_value(value: &Value) -> Option<Self> {
                match *value {
                    Value::Int64(v) => <$ty>::try_from(v).ok(),
                    Value::UInt64(v) => <$ty>::try_from(v).ok(),
                    _ => None,
                }
            }
        }
    )* };
}

impl_from_value_int!(i64, u64, i32, u32);

impl FromValue for f64 {
    #[expect(clippy::cast_precision_loss, reason = "integer getters widen to f64")]
    fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::Double(v) => Some(v),
            Value::Int64(v) => Some(v as f64),
            Value::UInt64(v) => Some(v as f64),
            _ => None,
        }
    }
}

impl FromValue for f32 {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        reason = "f32 getters accept the nearest representable value"
    )]
    fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::Double(v) => Some(v as f32),
            Value::Int64(v) => Some(v as f32),
            Value::UInt64(v) => Some(v as f32),
            _ => None,
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::Bool(v) => Some(v),
            _ => None,
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}
