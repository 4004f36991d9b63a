// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashMap;

use crate::ast::{Table, Value};
use crate::TomletError;

impl TryFrom<Value> for String {
    type Error = TomletError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(TomletError::type_error(
                format!("Expected string, got {}", other.kind()),
                "Quote the value in your config",
                401,
            )),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = TomletError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(n) => Ok(n),
            other => Err(TomletError::type_error(
                format!("Expected number, got {}", other.kind()),
                "Use a number value in your config",
                402,
            )),
        }
    }
}

impl TryFrom<Value> for f32 {
    type Error = TomletError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        f64::try_from(value).map(|n| n as f32)
    }
}

/// Integer targets: the number must be whole and within the target's range.
macro_rules! integer_conversion {
    ($($ty:ty => $code:expr),* $(,)?) => {$(
        impl TryFrom<Value> for $ty {
            type Error = TomletError;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                let n = f64::try_from(value)?;
                if n.fract() != 0.0 {
                    return Err(TomletError::type_error(
                        format!("Expected a whole number, got {}", n),
                        "Remove the fractional part",
                        $code,
                    ));
                }
                // MAX + 1 is a power of two, so the bound stays exact after rounding
                if n < <$ty>::MIN as f64 || n >= <$ty>::MAX as f64 + 1.0 {
                    return Err(TomletError::type_error(
                        format!("Number {} out of range for {}", n, stringify!($ty)),
                        concat!("Use a number between ", stringify!($ty), "::MIN and ", stringify!($ty), "::MAX"),
                        $code,
                    ));
                }
                Ok(n as $ty)
            }
        }
    )*};
}

integer_conversion! {
    i32 => 403,
    i64 => 403,
    u8 => 407,
    u16 => 407,
    u32 => 408,
    u64 => 406,
    usize => 409,
}

impl TryFrom<Value> for bool {
    type Error = TomletError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(b),
            Value::String(ref s) if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false") => {
                Err(TomletError::type_error(
                    format!("Expected boolean, got the string '{}'", s),
                    "Write true or false without quotes, in lower case",
                    404,
                ))
            }
            other => Err(TomletError::type_error(
                format!("Expected boolean, got {}", other.kind()),
                "Use true or false",
                404,
            )),
        }
    }
}

impl<T> TryFrom<Value> for Vec<T>
where
    T: TryFrom<Value, Error = TomletError>,
{
    type Error = TomletError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => items.into_iter().map(T::try_from).collect(),
            other => Err(TomletError::type_error(
                format!("Expected array, got {}", other.kind()),
                "Use an array [...] in your config",
                405,
            )),
        }
    }
}

impl TryFrom<Value> for Table {
    type Error = TomletError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Table(table) => Ok(table),
            other => Err(TomletError::type_error(
                format!("Expected table, got {}", other.kind()),
                "Use a [table] section or an inline { ... } table",
                410,
            )),
        }
    }
}

impl TryFrom<Value> for HashMap<String, String> {
    type Error = TomletError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Table::try_from(value)?
            .into_iter()
            .map(|(key, val)| Ok::<_, TomletError>((key, String::try_from(val)?)))
            .collect()
    }
}
