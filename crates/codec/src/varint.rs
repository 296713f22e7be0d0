//! Base-128 varints used for every length and count on the wire.
//!
//! Each byte carries 7 bits of the value, least significant group first, with
//! the high bit set on every byte except the last.
//!
//! ```txt
//! 300 = 0b10_0101100
//!     -> 1_0101100 0_0000010
//!     -> ac 02
//! ```
//!
//! Encodings are always minimal, so a `u64` takes at most 10 bytes and the
//! 10th byte can only ever be `0x01`.

use crate::errors::CodecError;
use crate::types::{Codec, Decoder, Encoder};

/// The most bytes a varint can take up.
pub const MAX_VARINT_LEN: usize = 10;

/// Varint-encoded `u64`.
///
/// Plain integers are always encoded at their fixed width, wrap them in this
/// to get the variable length encoding instead.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VarInt(u64);

impl VarInt {
    /// Construct a new instance.
    pub const fn new(v: u64) -> Self {
        Self(v)
    }

    /// Converts to inner value.
    pub const fn inner(self) -> u64 {
        self.0
    }

    /// Convenience function for returning the encoded length in bytes.
    pub const fn byte_len(&self) -> usize {
        varint_len(self.0)
    }
}

impl From<u64> for VarInt {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

impl From<VarInt> for u64 {
    fn from(v: VarInt) -> Self {
        v.0
    }
}

impl Codec for VarInt {
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
        decode_varint(dec).map(Self)
    }

    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
        encode_varint(self.0, enc)
    }
}

/// Returns the number of bytes `v` encodes to.
pub const fn varint_len(v: u64) -> usize {
    let bits = (u64::BITS - v.leading_zeros()) as usize;
    if bits == 0 { 1 } else { bits.div_ceil(7) }
}

/// Writes `v` as a minimal varint.
pub fn encode_varint(mut v: u64, enc: &mut impl Encoder) -> Result<(), CodecError> {
    let mut buf = [0; MAX_VARINT_LEN];
    let mut n = 0;
    while v >= 0x80 {
        buf[n] = (v as u8 & 0x7f) | 0x80;
        v >>= 7;
        n += 1;
    }
    buf[n] = v as u8;
    enc.write_buf(&buf[..=n])
}

/// Reads a varint.
///
/// Non-minimal encodings (trailing zero groups) are accepted, but anything
/// that doesn't fit in a `u64` is rejected.
pub fn decode_varint(dec: &mut impl Decoder) -> Result<u64, CodecError> {
    let offset = dec.offset();
    let mut value = 0u64;

    for i in 0..MAX_VARINT_LEN {
        let [byte] = dec.read_arr::<1>()?;

        // The last group only has room for the top bit of a u64.
        if i == MAX_VARINT_LEN - 1 && byte > 1 {
            return Err(CodecError::VarIntTooLong { offset });
        }

        value |= u64::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }

    Err(CodecError::VarIntTooLong { offset })
}

/// Writes a container length prefix.
pub fn encode_len(len: usize, enc: &mut impl Encoder) -> Result<(), CodecError> {
    encode_varint(len as u64, enc)
}

/// Reads a container length prefix, checking it against the decoder's
/// configured limit.
///
/// This doesn't check the length against the remaining input, callers must
/// not preallocate based on it.
pub fn decode_len(dec: &mut impl Decoder) -> Result<usize, CodecError> {
    let offset = dec.offset();
    let len = decode_varint(dec)?;

    if let Some(max) = dec.config().max_container_len() {
        if len > max {
            return Err(CodecError::OverflowContainer { len, offset });
        }
    }

    usize::try_from(len).map_err(|_| CodecError::OverflowContainer { len, offset })
}
