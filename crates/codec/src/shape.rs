//! Value shapes, the explicit description of what's on the wire.
//!
//! The wire format carries no type information, so a buffer can only be read
//! back with the same shape it was written with.  Shapes let that be expressed
//! as data instead of as a Rust type.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;
use std::fmt;
use std::time::SystemTime;

use uuid::Uuid;

use crate::primitives::Timestamp;
use crate::varint::VarInt;

/// Kinds of scalar values.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ScalarKind {
    /// 1 byte signed int.
    I8,
    /// 2 byte little-endian signed int.
    I16,
    /// 4 byte little-endian signed int.
    I32,
    /// 8 byte little-endian signed int.
    I64,
    /// 1 byte unsigned int.
    U8,
    /// 2 byte little-endian unsigned int.
    U16,
    /// 4 byte little-endian unsigned int.
    U32,
    /// 8 byte little-endian unsigned int.
    U64,
    /// IEEE-754 single precision float.
    F32,
    /// IEEE-754 double precision float.
    F64,
    /// Single byte bool.
    Bool,
    /// Length-prefixed UTF-8 string.
    String,
    /// 16 byte opaque id.
    Id,
    /// Milliseconds since the epoch as a `u64`.
    Timestamp,
    /// Varint-encoded `u64`.
    VarInt,
    /// Length-prefixed opaque byte blob.
    Bytes,
}

impl ScalarKind {
    /// Returns the encoded size if it doesn't depend on the value.
    pub fn fixed_len(&self) -> Option<usize> {
        match self {
            ScalarKind::I8 | ScalarKind::U8 | ScalarKind::Bool => Some(1),
            ScalarKind::I16 | ScalarKind::U16 => Some(2),
            ScalarKind::I32 | ScalarKind::U32 | ScalarKind::F32 => Some(4),
            ScalarKind::I64 | ScalarKind::U64 | ScalarKind::F64 | ScalarKind::Timestamp => Some(8),
            ScalarKind::Id => Some(16),
            ScalarKind::String | ScalarKind::VarInt | ScalarKind::Bytes => None,
        }
    }

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::Bool => "bool",
            ScalarKind::String => "string",
            ScalarKind::Id => "id",
            ScalarKind::Timestamp => "timestamp",
            ScalarKind::VarInt => "varint",
            ScalarKind::Bytes => "bytes",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shape of a value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Shape {
    /// A single scalar.
    Scalar(ScalarKind),

    /// Presence tag followed by the inner value if present.
    Optional(Box<Shape>),

    /// Count followed by that many elements.
    Sequence(Box<Shape>),

    /// Count followed by that many key/value pairs.
    Map(Box<Shape>, Box<Shape>),

    /// Exactly this many elements with no count in front, like `[u8; N]`.
    Array(Box<Shape>, usize),

    /// Fields back to back in declaration order.
    Record(RecordShape),

    /// Refers to an enclosing record shape, 0 being the innermost one.  This is
    /// how self-referential records are described.
    Recurse(usize),
}

impl Shape {
    /// Shape of an optional `inner`.
    pub fn optional(inner: Shape) -> Self {
        Shape::Optional(Box::new(inner))
    }

    /// Shape of a sequence of `elem`.
    pub fn sequence(elem: Shape) -> Self {
        Shape::Sequence(Box::new(elem))
    }

    /// Shape of a map from `key` to `value`.
    pub fn map(key: Shape, value: Shape) -> Self {
        Shape::Map(Box::new(key), Box::new(value))
    }

    /// Shape of exactly `len` elements of `elem`.
    pub fn array(elem: Shape, len: usize) -> Self {
        Shape::Array(Box::new(elem), len)
    }
}

impl From<ScalarKind> for Shape {
    fn from(kind: ScalarKind) -> Self {
        Shape::Scalar(kind)
    }
}

impl From<RecordShape> for Shape {
    fn from(rec: RecordShape) -> Self {
        Shape::Record(rec)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar(kind) => write!(f, "{kind}"),
            Shape::Optional(inner) => write!(f, "optional<{inner}>"),
            Shape::Sequence(elem) => write!(f, "sequence<{elem}>"),
            Shape::Map(k, v) => write!(f, "map<{k}, {v}>"),
            Shape::Array(elem, len) => write!(f, "array<{elem}; {len}>"),
            Shape::Record(rec) => write!(f, "record {}", rec.name()),
            Shape::Recurse(depth) => write!(f, "recurse({depth})"),
        }
    }
}

/// A named field within a record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldShape {
    name: String,
    shape: Shape,
}

impl FieldShape {
    /// Constructs a new instance.
    pub fn new(name: impl Into<String>, shape: impl Into<Shape>) -> Self {
        Self {
            name: name.into(),
            shape: shape.into(),
        }
    }

    /// Returns the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

/// A record's name and its ordered fields.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordShape {
    name: String,
    fields: Vec<FieldShape>,
}

impl RecordShape {
    /// Constructs a new record shape with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field, builder style.
    pub fn field(mut self, name: impl Into<String>, shape: impl Into<Shape>) -> Self {
        self.fields.push(FieldShape::new(name, shape));
        self
    }

    /// Returns the record name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fields in wire order.
    pub fn fields(&self) -> &[FieldShape] {
        &self.fields
    }
}

/// Types that can report the shape they encode as.
///
/// Self-referential types have to implement this by hand using
/// [`Shape::Recurse`], anything generic would recurse forever.
pub trait Describe {
    /// Returns the shape of this type's encoding.
    fn shape() -> Shape;
}

macro_rules! impl_scalar_describe {
    ( $( $ty:ty => $kind:ident ),* $(,)? ) => {
        $(
            impl Describe for $ty {
                fn shape() -> Shape {
                    Shape::Scalar(ScalarKind::$kind)
                }
            }
        )*
    };
}

impl_scalar_describe! {
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
    SystemTime => Timestamp,
    VarInt => VarInt,
}

impl<T: Describe> Describe for Option<T> {
    fn shape() -> Shape {
        Shape::optional(T::shape())
    }
}

macro_rules! impl_transparent_describe {
    ( $( $ptr:ident ),* ) => {
        $(
            impl<T: Describe> Describe for $ptr<T> {
                fn shape() -> Shape {
                    T::shape()
                }
            }
        )*
    };
}

impl_transparent_describe!(Box, Rc, Arc);

impl<const N: usize> Describe for [u8; N] {
    fn shape() -> Shape {
        Shape::array(ScalarKind::U8.into(), N)
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn shape() -> Shape {
        Shape::sequence(T::shape())
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn shape() -> Shape {
        Shape::sequence(T::shape())
    }
}

impl<T: Describe> Describe for BTreeSet<T> {
    fn shape() -> Shape {
        Shape::sequence(T::shape())
    }
}

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn shape() -> Shape {
        Shape::sequence(T::shape())
    }
}

impl<K: Describe, V: Describe, S> Describe for HashMap<K, V, S> {
    fn shape() -> Shape {
        Shape::map(K::shape(), V::shape())
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn shape() -> Shape {
        Shape::map(K::shape(), V::shape())
    }
}

/// Name of the record shape tuples are described as.  Members are named by
/// their index.
pub const TUPLE_RECORD_NAME: &str = "tuple";

macro_rules! impl_tuple_describe {
    ( $( $name:ident . $idx:tt ),+ ) => {
        impl<$( $name: Describe ),+> Describe for ( $( $name, )+ ) {
            fn shape() -> Shape {
                RecordShape::new(TUPLE_RECORD_NAME)
                    $( .field(stringify!($idx), $name::shape()) )+
                    .into()
            }
        }
    };
}

impl_tuple_describe!(A.0);
impl_tuple_describe!(A.0, B.1);
impl_tuple_describe!(A.0, B.1, C.2);
impl_tuple_describe!(A.0, B.1, C.2, D.3);
impl_tuple_describe!(A.0, B.1, C.2, D.3, E.4);
impl_tuple_describe!(A.0, B.1, C.2, D.3, E.4, F.5);
