//! Property tests for shape-driven dynamic values.

#![expect(missing_docs, reason = "test repo")]
#![expect(unused_crate_dependencies, reason = "macro hacks")]

use std::collections::BTreeMap;

use hardpack_codec_tests::{
    hardpack_codec::{
        CodecError, Describe, RecordShape, ScalarKind, Shape, Timestamp, Uuid, Value,
        decode_value, encode_to_vec, encode_value,
    },
    proptest::prelude::*,
};

fn scalar_kind() -> impl Strategy<Value = ScalarKind> {
    prop_oneof![
        Just(ScalarKind::I8),
        Just(ScalarKind::I16),
        Just(ScalarKind::I32),
        Just(ScalarKind::I64),
        Just(ScalarKind::U8),
        Just(ScalarKind::U16),
        Just(ScalarKind::U32),
        Just(ScalarKind::U64),
        Just(ScalarKind::F32),
        Just(ScalarKind::F64),
        Just(ScalarKind::Bool),
        Just(ScalarKind::String),
        Just(ScalarKind::Id),
        Just(ScalarKind::Timestamp),
        Just(ScalarKind::VarInt),
        Just(ScalarKind::Bytes),
    ]
}

fn map_key_kind() -> impl Strategy<Value = ScalarKind> {
    prop_oneof![Just(ScalarKind::U16), Just(ScalarKind::String)]
}

/// Includes empty records and zero-length arrays, whose encodings take no
/// bytes at all.
fn arb_shape() -> impl Strategy<Value = Shape> {
    let leaf = scalar_kind().prop_map(Shape::from);
    leaf.prop_recursive(4, 24, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(Shape::optional),
            inner.clone().prop_map(Shape::sequence),
            (inner.clone(), 0..4usize).prop_map(|(elem, len)| Shape::array(elem, len)),
            (map_key_kind(), inner.clone()).prop_map(|(k, v)| Shape::map(k.into(), v)),
            prop::collection::vec(inner, 0..4).prop_map(|fields| {
                fields
                    .into_iter()
                    .enumerate()
                    .fold(RecordShape::new("Generated"), |rec, (i, shape)| {
                        rec.field(format!("f{i}"), shape)
                    })
                    .into()
            }),
        ]
    })
}

fn scalar_value(kind: ScalarKind) -> BoxedStrategy<Value> {
    match kind {
        ScalarKind::I8 => any::<i8>().prop_map(Value::I8).boxed(),
        ScalarKind::I16 => any::<i16>().prop_map(Value::I16).boxed(),
        ScalarKind::I32 => any::<i32>().prop_map(Value::I32).boxed(),
        ScalarKind::I64 => any::<i64>().prop_map(Value::I64).boxed(),
        ScalarKind::U8 => any::<u8>().prop_map(Value::U8).boxed(),
        ScalarKind::U16 => any::<u16>().prop_map(Value::U16).boxed(),
        ScalarKind::U32 => any::<u32>().prop_map(Value::U32).boxed(),
        ScalarKind::U64 => any::<u64>().prop_map(Value::U64).boxed(),
        // NaN never compares equal, stick to finite values.
        ScalarKind::F32 => (-1.0e6f32..1.0e6f32).prop_map(Value::F32).boxed(),
        ScalarKind::F64 => (-1.0e12f64..1.0e12f64).prop_map(Value::F64).boxed(),
        ScalarKind::Bool => any::<bool>().prop_map(Value::Bool).boxed(),
        ScalarKind::String => ".{0,8}".prop_map(Value::String).boxed(),
        ScalarKind::Timestamp => any::<u64>()
            .prop_map(|ms| Value::Timestamp(Timestamp::from_millis(ms)))
            .boxed(),
        ScalarKind::VarInt => any::<u64>().prop_map(Value::VarInt).boxed(),
        ScalarKind::Bytes => prop::collection::vec(any::<u8>(), 0..16)
            .prop_map(Value::Bytes)
            .boxed(),
        ScalarKind::Id => any::<u128>()
            .prop_map(|v| Value::Id(Uuid::from_u128(v)))
            .boxed(),
    }
}

/// Values conforming to `shape`.  Map keys are drawn unique so decoding
/// gives back exactly what went in.
fn value_for(shape: &Shape) -> BoxedStrategy<Value> {
    match shape {
        Shape::Scalar(kind) => scalar_value(*kind),
        Shape::Optional(inner) => prop::option::of(value_for(inner))
            .prop_map(|v| Value::Optional(v.map(Box::new)))
            .boxed(),
        Shape::Sequence(elem) => prop::collection::vec(value_for(elem), 0..4)
            .prop_map(Value::Sequence)
            .boxed(),
        Shape::Array(elem, len) => prop::collection::vec(value_for(elem), *len)
            .prop_map(Value::Sequence)
            .boxed(),
        Shape::Map(key, value) => {
            let values = value_for(value);
            match key.as_ref() {
                Shape::Scalar(ScalarKind::U16) => {
                    prop::collection::btree_map(any::<u16>(), values, 0..4)
                        .prop_map(|m| {
                            Value::Map(m.into_iter().map(|(k, v)| (Value::U16(k), v)).collect())
                        })
                        .boxed()
                }
                _ => prop::collection::btree_map("[a-z]{0,4}", values, 0..4)
                    .prop_map(|m| {
                        Value::Map(m.into_iter().map(|(k, v)| (Value::String(k), v)).collect())
                    })
                    .boxed(),
            }
        }
        Shape::Record(rec) => {
            let names: Vec<String> = rec.fields().iter().map(|f| f.name().to_owned()).collect();
            let values: Vec<BoxedStrategy<Value>> =
                rec.fields().iter().map(|f| value_for(f.shape())).collect();
            values
                .prop_map(move |vals| Value::Record(names.iter().cloned().zip(vals).collect()))
                .boxed()
        }
        Shape::Recurse(_) => Just(Value::none()).boxed(),
    }
}

fn shaped_value() -> impl Strategy<Value = (Shape, Value)> {
    arb_shape().prop_flat_map(|shape| {
        let values = value_for(&shape);
        (Just(shape), values)
    })
}

proptest! {
    #[test]
    fn test_dynamic_roundtrip((shape, value) in shaped_value()) {
        let encoded = encode_value(&value, &shape).expect("test: encoding should succeed");
        let decoded = decode_value(&encoded, &shape).expect("test: decoding should succeed");
        prop_assert_eq!(&decoded, &value);

        let reencoded = encode_value(&decoded, &shape).expect("test: encoding should succeed");
        prop_assert_eq!(encoded, reencoded);
    }

    #[test]
    fn test_dynamic_truncation_fails((shape, value) in shaped_value()) {
        let encoded = encode_value(&value, &shape).expect("test: encoding should succeed");
        prop_assume!(!encoded.is_empty());
        let err = decode_value(&encoded[..encoded.len() - 1], &shape).unwrap_err();
        let is_eof = matches!(err, CodecError::UnexpectedEndOfData { .. });
        prop_assert!(is_eof, "unexpected error {:?}", err);
    }

    #[test]
    fn test_dynamic_ignores_suffix(
        (shape, value) in shaped_value(),
        suffix in prop::collection::vec(any::<u8>(), 1..8)
    ) {
        let mut encoded = encode_value(&value, &shape).expect("test: encoding should succeed");
        encoded.extend_from_slice(&suffix);
        let decoded = decode_value(&encoded, &shape).expect("test: decoding should succeed");
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn test_arbitrary_bytes_dont_crash(
        shape in arb_shape(),
        bytes in prop::collection::vec(any::<u8>(), 0..256)
    ) {
        let _ = decode_value(&bytes, &shape);
    }

    #[test]
    fn test_static_matches_dynamic(
        entries in prop::collection::btree_map("[a-z]{0,6}", prop::collection::vec(any::<Option<u16>>(), 0..4), 0..6)
    ) {
        let shape = BTreeMap::<String, Vec<Option<u16>>>::shape();
        let value = Value::Map(
            entries
                .iter()
                .map(|(k, v)| {
                    let seq = v
                        .iter()
                        .map(|o| Value::Optional(o.map(|x| Box::new(Value::U16(x)))))
                        .collect();
                    (Value::String(k.clone()), Value::Sequence(seq))
                })
                .collect(),
        );

        let static_bytes = encode_to_vec(&entries).expect("test: encoding should succeed");
        let dynamic_bytes = encode_value(&value, &shape).expect("test: encoding should succeed");
        prop_assert_eq!(static_bytes, dynamic_bytes);
    }
}
