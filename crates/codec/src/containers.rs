//! Optionals, sequences, maps and other composite types.
//!
//! The `*_with` functions implement the wire shapes themselves and take a
//! closure for the inner values, so they can be driven by [`Codec`] impls as
//! well as by the shape-directed driver.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;
use std::sync::Arc;

use crate::errors::CodecError;
use crate::types::{Codec, Decoder, Encoder};
use crate::varint::{decode_len, encode_len};

/// Presence tag for an absent optional.
pub const OPTIONAL_ABSENT: u8 = 0x00;

/// Presence tag for a present optional.
pub const OPTIONAL_PRESENT: u8 = 0x01;

/// Most elements a sequence may declare when its elements take up no bytes,
/// unless [`crate::DecoderConfig::max_container_len`] says otherwise.
const MAX_ZERO_WIDTH_ELEMENTS: u64 = 1 << 16;

/// Runs `f` one nesting level deeper.
pub(crate) fn read_nested<D: Decoder, T>(
    dec: &mut D,
    f: impl FnOnce(&mut D) -> Result<T, CodecError>,
) -> Result<T, CodecError> {
    dec.enter_nested()?;
    let res = f(dec);
    dec.exit_nested();
    res
}

/// Writes an optional, calling `f` for the inner value if there is one.
pub fn write_optional_with<E: Encoder, T>(
    enc: &mut E,
    v: Option<T>,
    f: impl FnOnce(&mut E, T) -> Result<(), CodecError>,
) -> Result<(), CodecError> {
    match v {
        Some(inner) => {
            enc.write_buf(&[OPTIONAL_PRESENT])?;
            f(enc, inner)
        }
        None => enc.write_buf(&[OPTIONAL_ABSENT]),
    }
}

/// Reads an optional, calling `f` to read the inner value if the tag says
/// there is one.
pub fn read_optional_with<D: Decoder, T>(
    dec: &mut D,
    f: impl FnOnce(&mut D) -> Result<T, CodecError>,
) -> Result<Option<T>, CodecError> {
    let offset = dec.offset();
    let [tag] = dec.read_arr::<1>()?;
    match tag {
        OPTIONAL_ABSENT => Ok(None),
        OPTIONAL_PRESENT => read_nested(dec, f).map(Some),
        tag => Err(CodecError::CorruptedOptionalTag { tag, offset }),
    }
}

/// Writes a count-prefixed sequence, calling `f` for each element in
/// iteration order.
pub fn write_seq_with<E, I>(
    enc: &mut E,
    items: I,
    mut f: impl FnMut(&mut E, I::Item) -> Result<(), CodecError>,
) -> Result<(), CodecError>
where
    E: Encoder,
    I: IntoIterator,
    I::IntoIter: ExactSizeIterator,
{
    let items = items.into_iter();
    encode_len(items.len(), enc)?;
    for item in items {
        f(enc, item)?;
    }
    Ok(())
}

/// Reads a count-prefixed sequence into any collection, calling `f` for each
/// element.
///
/// Nothing is reserved up front based on the count, so a bogus count fails
/// on the first missing element instead of attempting a huge allocation.
/// Elements that take up no bytes can't run out of input, so for those the
/// count is capped separately.
pub fn read_seq_with<D, T, C>(
    dec: &mut D,
    mut f: impl FnMut(&mut D) -> Result<T, CodecError>,
) -> Result<C, CodecError>
where
    D: Decoder,
    C: Default + Extend<T>,
{
    let offset = dec.offset();
    let len = decode_len(dec)?;
    let zero_width_cap = dec
        .config()
        .max_container_len()
        .unwrap_or(MAX_ZERO_WIDTH_ELEMENTS);

    read_nested(dec, |dec| {
        let start = dec.offset();
        let mut out = C::default();
        for _ in 0..len {
            out.extend(Some(f(dec)?));
            if dec.offset() == start && len as u64 > zero_width_cap {
                return Err(CodecError::OverflowContainer {
                    len: len as u64,
                    offset,
                });
            }
        }
        Ok(out)
    })
}

/// Writes a count-prefixed sequence of key/value pairs in iteration order.
///
/// Key order is whatever the iterator yields, so this is only canonical if
/// the iteration order is.
pub fn write_map_with<E, K, V, I>(
    enc: &mut E,
    pairs: I,
    mut key: impl FnMut(&mut E, K) -> Result<(), CodecError>,
    mut value: impl FnMut(&mut E, V) -> Result<(), CodecError>,
) -> Result<(), CodecError>
where
    E: Encoder,
    I: IntoIterator<Item = (K, V)>,
    I::IntoIter: ExactSizeIterator,
{
    write_seq_with(enc, pairs, |enc, (k, v)| {
        key(enc, k)?;
        value(enc, v)
    })
}

/// Reads a count-prefixed sequence of key/value pairs, extending the
/// collection in wire order.  For maps this means the last duplicate key
/// wins.
pub fn read_map_with<D, K, V, C>(
    dec: &mut D,
    mut key: impl FnMut(&mut D) -> Result<K, CodecError>,
    mut value: impl FnMut(&mut D) -> Result<V, CodecError>,
) -> Result<C, CodecError>
where
    D: Decoder,
    C: Default + Extend<(K, V)>,
{
    read_seq_with(dec, |dec| {
        let k = key(dec)?;
        let v = value(dec)?;
        Ok((k, v))
    })
}

impl<T: Codec> Codec for Option<T> {
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
        read_optional_with(dec, T::decode)
    }

    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
        write_optional_with(enc, self.as_ref(), |enc, v| v.encode(enc))
    }
}

/// Generates sequence impls for the std collections.
macro_rules! impl_seq_codec {
    ( $coll:ident < T $( : $bound:ident $( + $more:ident )* )? > ) => {
        impl<T: Codec $( + $bound $( + $more )* )?> Codec for $coll<T> {
            fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
                read_seq_with(dec, T::decode)
            }

            fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
                write_seq_with(enc, self.iter(), |enc, v| v.encode(enc))
            }
        }
    };
}

impl_seq_codec!(Vec<T>);
impl_seq_codec!(VecDeque<T>);
impl_seq_codec!(BTreeSet<T: Ord>);

impl<T, S> Codec for HashSet<T, S>
where
    T: Codec + Eq + Hash,
    S: BuildHasher + Default,
{
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
        read_seq_with(dec, T::decode)
    }

    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
        write_seq_with(enc, self.iter(), |enc, v| v.encode(enc))
    }
}

/// Non-canonical: pairs are written in the map's iteration order.
impl<K, V, S> Codec for HashMap<K, V, S>
where
    K: Codec + Eq + Hash,
    V: Codec,
    S: BuildHasher + Default,
{
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
        read_map_with(dec, K::decode, V::decode)
    }

    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
        write_map_with(enc, self.iter(), |enc, k| k.encode(enc), |enc, v| v.encode(enc))
    }
}

/// Canonical: pairs are written in ascending key order.
impl<K: Codec + Ord, V: Codec> Codec for BTreeMap<K, V> {
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
        read_map_with(dec, K::decode, V::decode)
    }

    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
        write_map_with(enc, self.iter(), |enc, k| k.encode(enc), |enc, v| v.encode(enc))
    }
}

/// Generates impls for pointer types, which are transparent on the wire.
///
/// There's no notion of identity, so a value shared between several owners
/// is written once per owner and decodes into independent copies.
macro_rules! impl_ptr_codec {
    ( $ptr:ident ) => {
        impl<T: Codec> Codec for $ptr<T> {
            fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
                T::decode(dec).map($ptr::new)
            }

            fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
                T::encode(self, enc)
            }
        }
    };
}

impl_ptr_codec!(Box);
impl_ptr_codec!(Rc);
impl_ptr_codec!(Arc);

/// Generates impls for tuples, encoded like an anonymous record.
macro_rules! impl_tuple_codec {
    ( $( $name:ident . $idx:tt ),+ ) => {
        impl<$( $name: Codec ),+> Codec for ( $( $name, )+ ) {
            fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
                Ok(( $( $name::decode(dec)?, )+ ))
            }

            fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
                $( self.$idx.encode(enc)?; )+
                Ok(())
            }
        }
    };
}

impl_tuple_codec!(A.0);
impl_tuple_codec!(A.0, B.1);
impl_tuple_codec!(A.0, B.1, C.2);
impl_tuple_codec!(A.0, B.1, C.2, D.3);
impl_tuple_codec!(A.0, B.1, C.2, D.3, E.4);
impl_tuple_codec!(A.0, B.1, C.2, D.3, E.4, F.5);
