//! Compact binary encoding framework.
//!
//! Values are written as dense little-endian bytes with no type information.
//! Lengths and counts are base-128 varints.  Types describe their layout by
//! implementing [`Codec`], either by hand, with `#[derive(Codec)]`, or with
//! [`impl_type_flat_struct!`].  When the layout is only known at runtime, a
//! [`Shape`] can drive the encoding of a dynamic [`Value`] instead.
//!
//! ```
//! use hardpack_codec::{Codec, decode_buf, encode_to_vec};
//!
//! #[derive(Debug, PartialEq, Codec)]
//! struct Point {
//!     x: i16,
//!     label: Option<String>,
//! }
//!
//! let p = Point { x: 1, label: None };
//! let buf = encode_to_vec(&p).unwrap();
//! assert_eq!(buf, [0x01, 0x00, 0x00]);
//! assert_eq!(decode_buf::<Point>(&buf).unwrap(), p);
//! ```

// Lets the derive macro's absolute paths resolve inside this crate's tests.
#[cfg(test)]
extern crate self as hardpack_codec;

mod buf_decoder;
pub use buf_decoder::BufDecoder;

mod config;
pub use config::{BoolDecoding, DecoderConfig};

mod containers;
pub use containers::{
    OPTIONAL_ABSENT, OPTIONAL_PRESENT, read_map_with, read_optional_with, read_seq_with,
    write_map_with, write_optional_with, write_seq_with,
};

mod driver;
pub use driver::{read_value, write_value};

mod errors;
pub use errors::{CodecError, CodecResult};

mod macros;

mod primitives;
pub use primitives::{Timestamp, decode_bytes, encode_bytes, encode_str};

mod shape;
pub use shape::{Describe, FieldShape, RecordShape, ScalarKind, Shape, TUPLE_RECORD_NAME};

mod types;
pub use types::{Codec, Decoder, Encoder};

mod util;
pub use util::{
    decode_buf, decode_buf_exact, decode_buf_exact_with_config, decode_buf_with_config,
    decode_value, decode_value_with_config, encode_to_vec, encode_value,
};

mod value;
pub use value::Value;

mod varint;
pub use varint::{
    MAX_VARINT_LEN, VarInt, decode_len, decode_varint, encode_len, encode_varint, varint_len,
};

pub use hardpack_codec_derive::Codec;

// Identifier type used by `ScalarKind::Id`.
pub use uuid::Uuid;
