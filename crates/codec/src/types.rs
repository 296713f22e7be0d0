use crate::CodecError;
use crate::config::{BoolDecoding, DecoderConfig};

/// Generic codec trait for types that compactly go between bytes.
///
/// Implementations describe the type's layout by issuing reads and writes in
/// a fixed order.  For records this is the declaration order of the fields,
/// nothing about the type itself ends up on the wire.
pub trait Codec: Sized {
    /// Decodes self from a decoder.
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError>;

    /// Encodes self into an encoder.
    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError>;
}

/// Generic decoder trait that reads inputs.
///
/// Reads consume input, there's no way to rewind.  After any error the
/// decoder's position is unspecified and it shouldn't be used further.
pub trait Decoder {
    /// Reads a variable-size buf.  This does NOT include length tagging.
    fn read_buf(&mut self, into: &mut [u8]) -> Result<(), CodecError>;

    /// Reads a fixed size buf.  This does NOT include length tagging.
    fn read_arr<const N: usize>(&mut self) -> Result<[u8; N], CodecError>;

    /// Reads `len` bytes into a new vec.  This does NOT include length
    /// tagging.
    ///
    /// Implementations must check that the bytes are available before
    /// allocating, since `len` usually comes from untrusted input.
    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, CodecError>;

    /// Returns the number of bytes consumed so far.
    fn offset(&self) -> usize;

    /// Returns the config codecs should consult while decoding.
    fn config(&self) -> &DecoderConfig {
        &DecoderConfig::DEFAULT
    }

    /// Called before decoding the contents of a nested container, must be
    /// paired with [`Self::exit_nested`] once the contents are read.
    ///
    /// Fails with [`CodecError::DepthLimitExceeded`] past the configured max
    /// depth.  The default does no tracking.
    fn enter_nested(&mut self) -> Result<(), CodecError> {
        Ok(())
    }

    /// Called after the contents of a nested container have been read.
    fn exit_nested(&mut self) {}
}

/// Generic encoder trait that writes outputs.
pub trait Encoder {
    /// Writes a buf.  This does NOT include length tagging.
    fn write_buf(&mut self, buf: &[u8]) -> Result<(), CodecError>;
}

/// Encoding to a vec buffer.
impl Encoder for Vec<u8> {
    fn write_buf(&mut self, buf: &[u8]) -> Result<(), CodecError> {
        self.extend_from_slice(buf);
        Ok(())
    }
}

/// Impl for byte arrays.  These are fixed size so they're written raw.
impl<const N: usize> Codec for [u8; N] {
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
        dec.read_arr::<N>()
    }

    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
        enc.write_buf(self)
    }
}

impl Codec for bool {
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
        let offset = dec.offset();
        let [b] = dec.read_arr::<1>()?;
        match (b, dec.config().bools()) {
            (0, _) => Ok(false),
            (1, _) | (_, BoolDecoding::Lenient) => Ok(true),
            (value, BoolDecoding::Strict) => Err(CodecError::InvalidBool { value, offset }),
        }
    }

    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
        enc.write_buf(&[u8::from(*self)])
    }
}

/// Simple macro to wrap the fixed size int types, not much to see.
macro_rules! impl_int_codec {
    ( $ity:ident $bytes:literal ) => {
        impl Codec for $ity {
            fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
                let arr: [u8; $bytes] = dec.read_arr()?;
                Ok(<$ity>::from_le_bytes(arr))
            }

            fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
                enc.write_buf(&self.to_le_bytes())
            }
        }
    };
}

impl_int_codec!(u8 1);
impl_int_codec!(i8 1);
impl_int_codec!(u16 2);
impl_int_codec!(i16 2);
impl_int_codec!(u32 4);
impl_int_codec!(i32 4);
impl_int_codec!(u64 8);
impl_int_codec!(i64 8);

/// Floats go through their bit patterns so NaN payloads survive.
macro_rules! impl_float_codec {
    ( $fty:ident $bits:ident ) => {
        impl Codec for $fty {
            fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
                <$bits as Codec>::decode(dec).map(<$fty>::from_bits)
            }

            fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
                self.to_bits().encode(enc)
            }
        }
    };
}

impl_float_codec!(f32 u32);
impl_float_codec!(f64 u64);
