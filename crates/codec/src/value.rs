//! Dynamically typed values, for use with [`crate::Shape`].

use uuid::Uuid;

use crate::primitives::Timestamp;

/// A value whose layout is given by a [`crate::Shape`] at runtime.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// [`crate::ScalarKind::I8`]
    I8(i8),
    /// [`crate::ScalarKind::I16`]
    I16(i16),
    /// [`crate::ScalarKind::I32`]
    I32(i32),
    /// [`crate::ScalarKind::I64`]
    I64(i64),
    /// [`crate::ScalarKind::U8`]
    U8(u8),
    /// [`crate::ScalarKind::U16`]
    U16(u16),
    /// [`crate::ScalarKind::U32`]
    U32(u32),
    /// [`crate::ScalarKind::U64`]
    U64(u64),
    /// [`crate::ScalarKind::F32`]
    F32(f32),
    /// [`crate::ScalarKind::F64`]
    F64(f64),
    /// [`crate::ScalarKind::Bool`]
    Bool(bool),
    /// [`crate::ScalarKind::String`]
    String(String),
    /// [`crate::ScalarKind::Id`]
    Id(Uuid),
    /// [`crate::ScalarKind::Timestamp`]
    Timestamp(Timestamp),
    /// [`crate::ScalarKind::VarInt`]
    VarInt(u64),
    /// [`crate::ScalarKind::Bytes`]
    Bytes(Vec<u8>),
    /// [`crate::Shape::Optional`]
    Optional(Option<Box<Value>>),
    /// [`crate::Shape::Sequence`]
    Sequence(Vec<Value>),
    /// [`crate::Shape::Map`], pairs in wire order.
    Map(Vec<(Value, Value)>),
    /// [`crate::Shape::Record`], fields in declaration order.
    Record(Vec<(String, Value)>),
}

impl Value {
    /// Convenience constructor for a present optional.
    pub fn some(inner: Value) -> Self {
        Value::Optional(Some(Box::new(inner)))
    }

    /// Convenience constructor for an absent optional.
    pub fn none() -> Self {
        Value::Optional(None)
    }

    /// Returns a short name for the kind of value, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::Id(_) => "id",
            Value::Timestamp(_) => "timestamp",
            Value::VarInt(_) => "varint",
            Value::Bytes(_) => "bytes",
            Value::Optional(_) => "optional",
            Value::Sequence(_) => "sequence",
            Value::Map(_) => "map",
            Value::Record(_) => "record",
        }
    }

    /// Looks up a record field by name.  Returns `None` if this isn't a
    /// record or has no such field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Record(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Looks up a map entry by key.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        match self {
            Value::Map(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Like `==`, but floats compare by bit pattern.  So `0.0` and `-0.0`
    /// differ, and a NaN equals itself if the payloads match.  This is
    /// equality as far as the wire is concerned.
    pub fn bitwise_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::F32(a), Value::F32(b)) => a.to_bits() == b.to_bits(),
            (Value::F64(a), Value::F64(b)) => a.to_bits() == b.to_bits(),
            (Value::Optional(a), Value::Optional(b)) => match (a, b) {
                (Some(a), Some(b)) => a.bitwise_eq(b),
                (None, None) => true,
                _ => false,
            },
            (Value::Sequence(a), Value::Sequence(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(a, b)| a.bitwise_eq(b))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|((ak, av), (bk, bv))| ak.bitwise_eq(bk) && av.bitwise_eq(bv))
            }
            (Value::Record(a), Value::Record(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|((an, av), (bn, bv))| an == bn && av.bitwise_eq(bv))
            }
            (a, b) => a == b,
        }
    }

    /// Returns the inner value of a present optional.
    pub fn as_present(&self) -> Option<&Value> {
        match self {
            Value::Optional(inner) => inner.as_deref(),
            _ => None,
        }
    }
}

/// Generates `From` impls for the scalar variants.
macro_rules! impl_value_from {
    ( $( $ty:ty => $var:ident ),* $(,)? ) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$var(v)
                }
            }
        )*
    };
}

impl_value_from! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    bool => Bool,
    String => String,
    Uuid => Id,
    Timestamp => Timestamp,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}
