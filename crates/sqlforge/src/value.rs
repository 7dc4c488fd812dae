//! The closed set of literal kinds a statement can carry.
//!
//! Every value handed to a builder is converted into [`Value`] at the API
//! boundary. Anything the enum cannot represent simply has no `From`
//! conversion, so unsupported types are rejected at compile time rather than
//! during rendering. The one open escape hatch is [`Value::Expr`], which
//! delegates rendering to any [`Render`] implementor (raw fragments,
//! sub-selects, unions).

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::render::Render;

/// A single literal value in a statement tree.
#[derive(Clone)]
pub enum Value {
    /// SQL NULL
    Null,
    /// Boolean, rendered with the dialect's spelling
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    UInt(u64),
    /// Floating point number (non-finite values fail at render time)
    Float(f64),
    /// Text, rendered through the dialect's escape table
    Str(String),
    /// Binary data, rendered in the dialect's hex form
    Bytes(Vec<u8>),
    /// UTC timestamp
    DateTime(DateTime<Utc>),
    /// Calendar date
    Date(NaiveDate),
    /// Time of day
    Time(NaiveTime),
    /// UUID, rendered as a quoted string literal
    Uuid(Uuid),
    /// JSON document, rendered as a quoted string literal of its compact form
    Json(serde_json::Value),
    /// Exact decimal number
    #[cfg(feature = "rust_decimal")]
    Decimal(rust_decimal::Decimal),
    /// Ordered sequence of scalars, rendered as a parenthesized list
    List(Vec<Value>),
    /// Delegates rendering to the wrapped builder
    Expr(Arc<dyn Render>),
}

impl Value {
    /// Wrap any [`Render`] implementor as a value.
    ///
    /// This is how raw SQL fragments and sub-statements are embedded where a
    /// value is expected.
    pub fn expr(inner: impl Render + 'static) -> Self {
        Value::Expr(Arc::new(inner))
    }

    /// Build a list value from any iterator of convertible items.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Check if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the variant, used in error messages.
    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::DateTime(_) => "datetime",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::Uuid(_) => "uuid",
            Value::Json(_) => "json",
            #[cfg(feature = "rust_decimal")]
            Value::Decimal(_) => "decimal",
            Value::List(_) => "list",
            Value::Expr(_) => "expr",
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Value::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Value::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
            Value::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Value::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Value::Bytes(v) => f.debug_tuple("Bytes").field(v).finish(),
            Value::DateTime(v) => f.debug_tuple("DateTime").field(v).finish(),
            Value::Date(v) => f.debug_tuple("Date").field(v).finish(),
            Value::Time(v) => f.debug_tuple("Time").field(v).finish(),
            Value::Uuid(v) => f.debug_tuple("Uuid").field(v).finish(),
            Value::Json(v) => f.debug_tuple("Json").field(v).finish(),
            #[cfg(feature = "rust_decimal")]
            Value::Decimal(v) => f.debug_tuple("Decimal").field(v).finish(),
            Value::List(v) => f.debug_tuple("List").field(v).finish(),
            Value::Expr(_) => f.write_str("Expr(<dyn Render>)"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Time(a), Value::Time(b)) => a == b,
            (Value::Uuid(a), Value::Uuid(b)) => a == b,
            (Value::Json(a), Value::Json(b)) => a == b,
            #[cfg(feature = "rust_decimal")]
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Expr(a), Value::Expr(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),* $(,)?) => {$(
        impl From<$t> for Value {
            fn from(value: $t) -> Self {
                Value::Int(value as i64)
            }
        }
    )*};
}

macro_rules! impl_from_uint {
    ($($t:ty),* $(,)?) => {$(
        impl From<$t> for Value {
            fn from(value: $t) -> Self {
                Value::UInt(value as u64)
            }
        }
    )*};
}

// `u8` is deliberately left out so that `Vec<u8>` can mean binary data.
impl_from_int!(i8, i16, i32, i64, isize);
impl_from_uint!(u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<NaiveTime> for Value {
    fn from(value: NaiveTime) -> Self {
        Value::Time(value)
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Value::Uuid(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Value::Json(value)
    }
}

#[cfg(feature = "rust_decimal")]
impl From<rust_decimal::Decimal> for Value {
    fn from(value: rust_decimal::Decimal) -> Self {
        Value::Decimal(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

macro_rules! impl_from_vec {
    ($($t:ty),* $(,)?) => {$(
        impl From<Vec<$t>> for Value {
            fn from(values: Vec<$t>) -> Self {
                Value::List(values.into_iter().map(Value::from).collect())
            }
        }
    )*};
}

impl_from_vec!(i16, i32, i64, u32, u64, f64, bool, &str, String, Uuid);

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::List(values)
    }
}

/// Keys only; values are ignored. Iteration order is whatever the map
/// yields; for `HashMap` that order is unspecified and may differ between
/// runs. Use a `BTreeMap` when a stable order matters.
impl<K: Into<Value>, V> From<HashMap<K, V>> for Value {
    fn from(map: HashMap<K, V>) -> Self {
        Value::List(map.into_keys().map(Into::into).collect())
    }
}

/// Keys only; values are ignored. `BTreeMap` iterates in key order, so the
/// rendered list is deterministic.
impl<K: Into<Value>, V> From<BTreeMap<K, V>> for Value {
    fn from(map: BTreeMap<K, V>) -> Self {
        Value::List(map.into_keys().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_convert() {
        assert_eq!(Value::from(7i32), Value::Int(7));
        assert_eq!(Value::from(7u64), Value::UInt(7));
        assert_eq!(Value::from(1.5f64), Value::Float(1.5));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from("x"), Value::Str("x".to_string()));
    }

    #[test]
    fn option_none_is_null() {
        assert_eq!(Value::from(Option::<i64>::None), Value::Null);
        assert_eq!(Value::from(Some(3i64)), Value::Int(3));
    }

    #[test]
    fn vec_u8_is_bytes_not_list() {
        assert_eq!(Value::from(vec![0xde_u8, 0xad]), Value::Bytes(vec![0xde, 0xad]));
    }

    #[test]
    fn vec_of_ints_is_list() {
        assert_eq!(
            Value::from(vec![1i64, 2, 3]),
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
    }

    #[test]
    fn btreemap_yields_ordered_keys() {
        let mut map = BTreeMap::new();
        map.insert(2i64, "b");
        map.insert(1i64, "a");
        assert_eq!(
            Value::from(map),
            Value::List(vec![Value::Int(1), Value::Int(2)])
        );
    }

    #[test]
    fn hashmap_yields_all_keys() {
        let mut map = HashMap::new();
        map.insert(1i64, "a");
        map.insert(2i64, "b");
        let Value::List(keys) = Value::from(map) else {
            panic!("expected a list");
        };
        let mut keys: Vec<_> = keys
            .into_iter()
            .map(|v| match v {
                Value::Int(i) => i,
                other => panic!("unexpected key {other:?}"),
            })
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, vec![1, 2]);
    }

    #[test]
    fn list_constructor_accepts_mixed_iterators() {
        let v = Value::list(["a", "b"]);
        assert_eq!(
            v,
            Value::List(vec![Value::Str("a".into()), Value::Str("b".into())])
        );
    }
}
