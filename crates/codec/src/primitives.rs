//! Variable-length and std-library scalar types.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use uuid::Uuid;

use crate::errors::CodecError;
use crate::types::{Codec, Decoder, Encoder};
use crate::varint::{decode_len, encode_len};

/// Writes a length-prefixed byte blob.
pub fn encode_bytes(bytes: &[u8], enc: &mut impl Encoder) -> Result<(), CodecError> {
    encode_len(bytes.len(), enc)?;
    enc.write_buf(bytes)
}

/// Reads a length-prefixed byte blob.
pub fn decode_bytes(dec: &mut impl Decoder) -> Result<Vec<u8>, CodecError> {
    let len = decode_len(dec)?;
    dec.read_bytes(len)
}

/// Writes a length-prefixed UTF-8 string.
pub fn encode_str(s: &str, enc: &mut impl Encoder) -> Result<(), CodecError> {
    encode_bytes(s.as_bytes(), enc)
}

impl Codec for String {
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
        let len = decode_len(dec)?;
        let offset = dec.offset();
        let bytes = dec.read_bytes(len)?;
        String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8 { offset })
    }

    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
        encode_str(self, enc)
    }
}

/// 128-bit ids are an opaque 16 byte blob, written in the uuid's byte order.
impl Codec for Uuid {
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
        dec.read_arr::<16>().map(Uuid::from_bytes)
    }

    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
        enc.write_buf(self.as_bytes())
    }
}

/// Point in time as whole milliseconds since the unix epoch.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The unix epoch itself.
    pub const UNIX_EPOCH: Timestamp = Timestamp(0);

    /// Constructs a new instance from milliseconds since the epoch.
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Returns the milliseconds since the epoch.
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Converts to a [`SystemTime`], if the platform can represent it.
    pub fn to_system_time(self) -> Option<SystemTime> {
        UNIX_EPOCH.checked_add(Duration::from_millis(self.0))
    }
}

/// Truncates to whole milliseconds.  Fails for times before the epoch or too
/// far after it.
impl TryFrom<SystemTime> for Timestamp {
    type Error = CodecError;

    fn try_from(t: SystemTime) -> Result<Self, Self::Error> {
        let since = t
            .duration_since(UNIX_EPOCH)
            .map_err(|_| CodecError::TimestampOutOfRange)?;
        let millis =
            u64::try_from(since.as_millis()).map_err(|_| CodecError::TimestampOutOfRange)?;
        Ok(Self(millis))
    }
}

impl Codec for Timestamp {
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
        u64::decode(dec).map(Self)
    }

    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
        self.0.encode(enc)
    }
}

/// Encoded as a [`Timestamp`], so anything below a millisecond is dropped.
impl Codec for SystemTime {
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
        Timestamp::decode(dec)?
            .to_system_time()
            .ok_or(CodecError::TimestampOutOfRange)
    }

    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
        Timestamp::try_from(*self)?.encode(enc)
    }
}
