//! Shape-directed encoding and decoding of dynamic [`Value`]s.
//!
//! The drivers walk a [`Shape`] top-down in a single pass.  They keep a stack
//! of the records they're inside of so [`Shape::Recurse`] can be resolved.

use tracing::trace;

use crate::containers::{
    read_nested, read_optional_with, read_seq_with, write_optional_with, write_seq_with,
};
use crate::errors::CodecError;
use crate::primitives::{Timestamp, decode_bytes, encode_bytes};
use crate::shape::{RecordShape, ScalarKind, Shape};
use crate::types::{Codec, Decoder, Encoder};
use crate::value::Value;
use crate::varint::{decode_varint, encode_varint};

/// Writes `value` laid out as `shape`.
///
/// Fails with [`CodecError::UnsupportedValueKind`] if the value doesn't match
/// the shape, which aborts the whole encode.
pub fn write_value(
    enc: &mut impl Encoder,
    value: &Value,
    shape: &Shape,
) -> Result<(), CodecError> {
    let mut records = Vec::new();
    write_shaped(enc, value, shape, &mut records)
}

/// Reads a value laid out as `shape`.
///
/// Consumes exactly the bytes of the value, anything after it is left unread.
pub fn read_value(dec: &mut impl Decoder, shape: &Shape) -> Result<Value, CodecError> {
    let mut records = Vec::new();
    read_shaped(dec, shape, &mut records)
}

fn mismatch(shape: &Shape, value: &Value) -> CodecError {
    CodecError::UnsupportedValueKind {
        expected: shape.to_string(),
        found: value.kind_name(),
    }
}

fn resolve<'s>(records: &[&'s RecordShape], depth: usize) -> Result<&'s RecordShape, CodecError> {
    let rec = records
        .len()
        .checked_sub(depth + 1)
        .map(|i| records[i])
        .ok_or(CodecError::UnresolvedRecursion(depth))?;
    trace!(record = rec.name(), depth, "resolved recursive shape");
    Ok(rec)
}

fn write_shaped<'s, E: Encoder>(
    enc: &mut E,
    value: &Value,
    shape: &'s Shape,
    records: &mut Vec<&'s RecordShape>,
) -> Result<(), CodecError> {
    match (shape, value) {
        (Shape::Scalar(kind), v) => write_scalar(enc, *kind, v),
        (Shape::Optional(inner), Value::Optional(v)) => {
            write_optional_with(enc, v.as_deref(), |enc, v| {
                write_shaped(enc, v, inner, records)
            })
        }
        (Shape::Sequence(elem), Value::Sequence(items)) => {
            write_seq_with(enc, items.iter(), |enc, v| write_shaped(enc, v, elem, records))
        }
        (Shape::Map(ks, vs), Value::Map(pairs)) => {
            write_seq_with(enc, pairs.iter(), |enc, (k, v)| {
                write_shaped(enc, k, ks, records)?;
                write_shaped(enc, v, vs, records)
            })
        }
        (Shape::Array(elem, len), Value::Sequence(items)) => {
            if items.len() != *len {
                return Err(mismatch(shape, value));
            }
            for v in items {
                write_shaped(enc, v, elem, records)?;
            }
            Ok(())
        }
        (Shape::Record(rec), v) => write_record(enc, rec, v, records),
        (Shape::Recurse(depth), v) => {
            let rec = resolve(records, *depth)?;
            write_record(enc, rec, v, records)
        }
        (shape, v) => Err(mismatch(shape, v)),
    }
}

fn write_record<'s, E: Encoder>(
    enc: &mut E,
    rec: &'s RecordShape,
    value: &Value,
    records: &mut Vec<&'s RecordShape>,
) -> Result<(), CodecError> {
    let Value::Record(fields) = value else {
        return Err(CodecError::UnsupportedValueKind {
            expected: format!("record {}", rec.name()),
            found: value.kind_name(),
        });
    };

    if fields.len() != rec.fields().len() {
        return Err(CodecError::FieldMismatch {
            record: rec.name().to_owned(),
            expected: format!("{} fields", rec.fields().len()),
            found: format!("{} fields", fields.len()),
        });
    }

    records.push(rec);
    for (fs, (name, v)) in rec.fields().iter().zip(fields) {
        if name != fs.name() {
            return Err(CodecError::FieldMismatch {
                record: rec.name().to_owned(),
                expected: fs.name().to_owned(),
                found: name.clone(),
            });
        }
        write_shaped(enc, v, fs.shape(), records)?;
    }
    records.pop();

    Ok(())
}

fn write_scalar(enc: &mut impl Encoder, kind: ScalarKind, value: &Value) -> Result<(), CodecError> {
    match (kind, value) {
        (ScalarKind::I8, Value::I8(v)) => v.encode(enc),
        (ScalarKind::I16, Value::I16(v)) => v.encode(enc),
        (ScalarKind::I32, Value::I32(v)) => v.encode(enc),
        (ScalarKind::I64, Value::I64(v)) => v.encode(enc),
        (ScalarKind::U8, Value::U8(v)) => v.encode(enc),
        (ScalarKind::U16, Value::U16(v)) => v.encode(enc),
        (ScalarKind::U32, Value::U32(v)) => v.encode(enc),
        (ScalarKind::U64, Value::U64(v)) => v.encode(enc),
        (ScalarKind::F32, Value::F32(v)) => v.encode(enc),
        (ScalarKind::F64, Value::F64(v)) => v.encode(enc),
        (ScalarKind::Bool, Value::Bool(v)) => v.encode(enc),
        (ScalarKind::String, Value::String(v)) => v.encode(enc),
        (ScalarKind::Id, Value::Id(v)) => v.encode(enc),
        (ScalarKind::Timestamp, Value::Timestamp(v)) => v.encode(enc),
        (ScalarKind::VarInt, Value::VarInt(v)) => encode_varint(*v, enc),
        (ScalarKind::Bytes, Value::Bytes(v)) => encode_bytes(v, enc),
        (kind, v) => Err(CodecError::UnsupportedValueKind {
            expected: kind.to_string(),
            found: v.kind_name(),
        }),
    }
}

/// Map pairs in wire order where a repeated key overwrites the earlier value.
///
/// Keys are compared with [`Value::bitwise_eq`], so float keys that are
/// distinct on the wire stay distinct.  Lookups are linear since values
/// aren't hashable, so this is quadratic in the number of pairs.
#[derive(Default)]
struct MapPairs(Vec<(Value, Value)>);

impl Extend<(Value, Value)> for MapPairs {
    fn extend<I: IntoIterator<Item = (Value, Value)>>(&mut self, iter: I) {
        for (k, v) in iter {
            match self.0.iter_mut().find(|(existing, _)| existing.bitwise_eq(&k)) {
                Some(slot) => slot.1 = v,
                None => self.0.push((k, v)),
            }
        }
    }
}

fn read_shaped<'s, D: Decoder>(
    dec: &mut D,
    shape: &'s Shape,
    records: &mut Vec<&'s RecordShape>,
) -> Result<Value, CodecError> {
    match shape {
        Shape::Scalar(kind) => read_scalar(dec, *kind),
        Shape::Optional(inner) => {
            let v = read_optional_with(dec, |dec| read_shaped(dec, inner, records))?;
            Ok(Value::Optional(v.map(Box::new)))
        }
        Shape::Sequence(elem) => {
            read_seq_with(dec, |dec| read_shaped(dec, elem, records)).map(Value::Sequence)
        }
        Shape::Map(ks, vs) => {
            let pairs: MapPairs = read_seq_with(dec, |dec| {
                let k = read_shaped(dec, ks, records)?;
                let v = read_shaped(dec, vs, records)?;
                Ok((k, v))
            })?;
            Ok(Value::Map(pairs.0))
        }
        Shape::Array(elem, len) => read_nested(dec, |dec| {
            let mut items = Vec::with_capacity(*len);
            for _ in 0..*len {
                items.push(read_shaped(dec, elem, records)?);
            }
            Ok(Value::Sequence(items))
        }),
        Shape::Record(rec) => read_record(dec, rec, records),
        Shape::Recurse(depth) => {
            let rec = resolve(records, *depth)?;
            read_record(dec, rec, records)
        }
    }
}

fn read_record<'s, D: Decoder>(
    dec: &mut D,
    rec: &'s RecordShape,
    records: &mut Vec<&'s RecordShape>,
) -> Result<Value, CodecError> {
    records.push(rec);
    let res = read_nested(dec, |dec| {
        let mut fields = Vec::with_capacity(rec.fields().len());
        for fs in rec.fields() {
            let v = read_shaped(dec, fs.shape(), records)?;
            fields.push((fs.name().to_owned(), v));
        }
        Ok(Value::Record(fields))
    });
    records.pop();
    res
}

fn read_scalar(dec: &mut impl Decoder, kind: ScalarKind) -> Result<Value, CodecError> {
    Ok(match kind {
        ScalarKind::I8 => Value::I8(i8::decode(dec)?),
        ScalarKind::I16 => Value::I16(i16::decode(dec)?),
        ScalarKind::I32 => Value::I32(i32::decode(dec)?),
        ScalarKind::I64 => Value::I64(i64::decode(dec)?),
        ScalarKind::U8 => Value::U8(u8::decode(dec)?),
        ScalarKind::U16 => Value::U16(u16::decode(dec)?),
        ScalarKind::U32 => Value::U32(u32::decode(dec)?),
        ScalarKind::U64 => Value::U64(u64::decode(dec)?),
        ScalarKind::F32 => Value::F32(f32::decode(dec)?),
        ScalarKind::F64 => Value::F64(f64::decode(dec)?),
        ScalarKind::Bool => Value::Bool(bool::decode(dec)?),
        ScalarKind::String => Value::String(String::decode(dec)?),
        ScalarKind::Id => Value::Id(uuid::Uuid::decode(dec)?),
        ScalarKind::Timestamp => Value::Timestamp(Timestamp::decode(dec)?),
        ScalarKind::VarInt => Value::VarInt(decode_varint(dec)?),
        ScalarKind::Bytes => Value::Bytes(decode_bytes(dec)?),
    })
}
