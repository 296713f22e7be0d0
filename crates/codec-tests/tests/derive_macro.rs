//! Tests for the Codec derive macro functionality.

#![expect(unused_crate_dependencies, reason = "test dependencies")]

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use hardpack_codec::{
    Codec, CodecError, Describe, RecordShape, ScalarKind, Shape, Timestamp, Value, VarInt,
    decode_buf, decode_buf_exact, decode_value, encode_to_vec, encode_value,
};

#[test]
fn test_derive_basic_struct() {
    #[derive(Debug, Clone, PartialEq, Eq, Codec)]
    struct BasicStruct {
        a: u32,
        b: [u8; 16],
        c: bool,
    }

    let original = BasicStruct {
        a: 0xDEADBEEF,
        b: [0x42; 16],
        c: true,
    };

    let encoded = encode_to_vec(&original).expect("encoding should work");
    assert_eq!(encoded.len(), 4 + 16 + 1);
    let decoded: BasicStruct = decode_buf_exact(&encoded).expect("decoding should work");
    assert_eq!(original, decoded);
}

#[test]
fn test_derive_macro_reexport() {
    // The derive is reachable through the codec crate itself
    #[derive(Debug, Clone, PartialEq, Eq, hardpack_codec::Codec)]
    struct ReexportTest {
        value: u64,
    }

    let test = ReexportTest { value: 999 };
    let encoded = encode_to_vec(&test).unwrap();
    let decoded: ReexportTest = decode_buf_exact(&encoded).unwrap();
    assert_eq!(test, decoded);
}

#[test]
fn test_derive_tuple_struct() {
    #[derive(Debug, Clone, PartialEq, Eq, Codec)]
    struct TupleStruct(u32, u64, bool);

    let original = TupleStruct(42, 84, false);
    let encoded = encode_to_vec(&original).unwrap();
    let decoded: TupleStruct = decode_buf_exact(&encoded).unwrap();
    assert_eq!(original, decoded);
}

#[test]
fn test_derive_unit_struct() {
    #[derive(Debug, Clone, PartialEq, Eq, Codec)]
    struct UnitStruct;

    let original = UnitStruct;
    let encoded = encode_to_vec(&original).unwrap();
    assert!(encoded.is_empty());
    let decoded: UnitStruct = decode_buf_exact(&encoded).unwrap();
    assert_eq!(format!("{:?}", original), format!("{:?}", decoded));
}

#[test]
fn test_derive_nested_structs() {
    #[derive(Debug, Clone, PartialEq, Eq, Codec)]
    struct Inner {
        x: i32,
        y: i32,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Codec)]
    struct Outer {
        inner: Inner,
        z: u64,
    }

    let original = Outer {
        inner: Inner { x: -10, y: 20 },
        z: 1000,
    };

    let encoded = encode_to_vec(&original).unwrap();
    let decoded: Outer = decode_buf_exact(&encoded).unwrap();
    assert_eq!(original, decoded);
}

#[test]
fn test_derive_with_containers() {
    #[derive(Debug, Clone, PartialEq, Eq, Codec)]
    struct WithContainers {
        data: Vec<u8>,
        index: HashMap<String, Vec<Option<u16>>>,
        count: VarInt,
    }

    let mut index = HashMap::new();
    index.insert("a".to_owned(), vec![Some(1), None]);

    let original = WithContainers {
        data: vec![1, 2, 3, 4, 5],
        index,
        count: VarInt::new(300),
    };

    let encoded = encode_to_vec(&original).unwrap();
    assert_eq!(&encoded[..6], &[0x05, 1, 2, 3, 4, 5]);
    assert_eq!(&encoded[encoded.len() - 2..], &[0xAC, 0x02]);
    let decoded: WithContainers = decode_buf_exact(&encoded).unwrap();
    assert_eq!(original, decoded);
}

#[test]
fn test_derive_shared_fields_are_flattened() {
    #[derive(Debug, Clone, PartialEq, Eq, Codec)]
    struct Pair {
        left: Rc<String>,
        right: Rc<String>,
    }

    let shared = Rc::new("same".to_owned());
    let original = Pair {
        left: shared.clone(),
        right: shared,
    };

    let encoded = encode_to_vec(&original).unwrap();
    assert_eq!(encoded.len(), 2 * (1 + 4));
    let decoded: Pair = decode_buf_exact(&encoded).unwrap();
    assert_eq!(original, decoded);
    assert!(!Rc::ptr_eq(&decoded.left, &decoded.right));
}

#[test]
fn test_compatibility_with_manual_impl() {
    // Manual implementation
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct ManualImpl {
        a: u16,
        b: u32,
    }

    impl Codec for ManualImpl {
        fn decode(
            dec: &mut impl hardpack_codec::Decoder,
        ) -> Result<Self, hardpack_codec::CodecError> {
            Ok(Self {
                a: Codec::decode(dec)?,
                b: Codec::decode(dec)?,
            })
        }

        fn encode(
            &self,
            enc: &mut impl hardpack_codec::Encoder,
        ) -> Result<(), hardpack_codec::CodecError> {
            self.a.encode(enc)?;
            self.b.encode(enc)?;
            Ok(())
        }
    }

    // Derived implementation
    #[derive(Debug, Clone, PartialEq, Eq, Codec)]
    struct DerivedImpl {
        a: u16,
        b: u32,
    }

    let manual = ManualImpl { a: 100, b: 200 };
    let derived = DerivedImpl { a: 100, b: 200 };

    let manual_encoded = encode_to_vec(&manual).unwrap();
    let derived_encoded = encode_to_vec(&derived).unwrap();

    // The encoded bytes should be identical
    assert_eq!(manual_encoded, derived_encoded);

    // Cross-decode to verify format compatibility
    let decoded_as_derived: DerivedImpl = decode_buf_exact(&manual_encoded).unwrap();
    assert_eq!(decoded_as_derived.a, manual.a);
    assert_eq!(decoded_as_derived.b, manual.b);
}

#[derive(Debug, Clone, PartialEq, Codec)]
struct Reading {
    sensor: String,
    taken: Timestamp,
    samples: Vec<f32>,
    labels: BTreeMap<String, Option<i64>>,
}

impl Describe for Reading {
    fn shape() -> Shape {
        RecordShape::new("Reading")
            .field("sensor", String::shape())
            .field("taken", Timestamp::shape())
            .field("samples", Vec::<f32>::shape())
            .field("labels", BTreeMap::<String, Option<i64>>::shape())
            .into()
    }
}

#[test]
fn test_derived_matches_dynamic_record() {
    let mut labels = BTreeMap::new();
    labels.insert("floor".to_owned(), Some(3));
    labels.insert("room".to_owned(), None);

    let reading = Reading {
        sensor: "t-01".to_owned(),
        taken: Timestamp::from_millis(1_700_000_000_000),
        samples: vec![20.5, 21.0],
        labels,
    };

    let value = Value::Record(vec![
        ("sensor".to_owned(), Value::from("t-01")),
        (
            "taken".to_owned(),
            Value::Timestamp(Timestamp::from_millis(1_700_000_000_000)),
        ),
        (
            "samples".to_owned(),
            Value::Sequence(vec![Value::F32(20.5), Value::F32(21.0)]),
        ),
        (
            "labels".to_owned(),
            Value::Map(vec![
                (Value::from("floor"), Value::some(Value::I64(3))),
                (Value::from("room"), Value::none()),
            ]),
        ),
    ]);

    let shape = Reading::shape();
    let static_bytes = encode_to_vec(&reading).unwrap();
    let dynamic_bytes = encode_value(&value, &shape).unwrap();
    assert_eq!(static_bytes, dynamic_bytes);

    assert_eq!(decode_value(&static_bytes, &shape).unwrap(), value);
    assert_eq!(decode_buf::<Reading>(&dynamic_bytes).unwrap(), reading);
}

#[test]
fn test_derived_errors_carry_offsets() {
    #[derive(Debug, Codec)]
    struct Tagged {
        id: u16,
        name: String,
        extra: Option<u8>,
    }

    // id, then a 2-byte name, then a bad optional tag
    let err = decode_buf::<Tagged>(&[0x01, 0x00, 0x02, b'h', b'i', 0x07]).unwrap_err();
    assert_eq!(err, CodecError::CorruptedOptionalTag { tag: 7, offset: 5 });

    // name claims 4 bytes but only 1 follows
    let err = decode_buf::<Tagged>(&[0x01, 0x00, 0x04, b'h']).unwrap_err();
    assert!(matches!(err, CodecError::UnexpectedEndOfData { offset: 3, .. }));

    let err = decode_buf::<Tagged>(&[0x01, 0x00, 0x01, 0xFF, 0x00]).unwrap_err();
    assert_eq!(err, CodecError::InvalidUtf8 { offset: 3 });

    assert_eq!(
        decode_buf::<Tagged>(&[0x01]).unwrap_err(),
        CodecError::UnexpectedEndOfData {
            offset: 0,
            needed: 2
        }
    );
}

#[test]
fn test_scalar_shape_mismatch() {
    let err = encode_value(&Value::U8(1), &ScalarKind::U16.into()).unwrap_err();
    assert!(matches!(err, CodecError::UnsupportedValueKind { .. }));
}
