//! High-level util functions.

use tracing::{debug, trace};

use crate::driver::{read_value, write_value};
use crate::{BufDecoder, Codec, CodecError, Decoder, DecoderConfig, Shape, Value};

/// Decodes a value from the start of a buffer.  Bytes after the value are
/// ignored.
pub fn decode_buf<T: Codec>(buf: &[u8]) -> Result<T, CodecError> {
    decode_buf_with_config(buf, DecoderConfig::DEFAULT)
}

/// Like [`decode_buf`], validating input according to `config`.
pub fn decode_buf_with_config<T: Codec>(
    buf: &[u8],
    config: DecoderConfig,
) -> Result<T, CodecError> {
    let mut dec = BufDecoder::with_config(buf, config);
    let v = T::decode(&mut dec).inspect_err(|e| debug!(%e, len = buf.len(), "failed to decode"))?;
    trace!(consumed = dec.offset(), len = buf.len(), "decoded buffer");
    Ok(v)
}

/// Decodes a buffer from a buffer, throwing an error if there's leftover bytes.
pub fn decode_buf_exact<T: Codec>(buf: &[u8]) -> Result<T, CodecError> {
    decode_buf_exact_with_config(buf, DecoderConfig::DEFAULT)
}

/// Like [`decode_buf_exact`], validating input according to `config`.
pub fn decode_buf_exact_with_config<T: Codec>(
    buf: &[u8],
    config: DecoderConfig,
) -> Result<T, CodecError> {
    let mut dec = BufDecoder::with_config(buf, config);
    let v = T::decode(&mut dec).inspect_err(|e| debug!(%e, len = buf.len(), "failed to decode"))?;
    if dec.remaining() > 0 {
        debug!(leftover = dec.remaining(), "extra input after value");
        return Err(CodecError::ExtraInput(dec.remaining()));
    }
    Ok(v)
}

/// Encodes the value into a newly allocated vec.
pub fn encode_to_vec<T: Codec>(v: &T) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::new();
    v.encode(&mut buf)
        .inspect_err(|e| debug!(%e, "failed to encode"))?;
    trace!(len = buf.len(), "encoded value");
    Ok(buf)
}

/// Encodes a dynamic value laid out as `shape` into a newly allocated vec.
pub fn encode_value(value: &Value, shape: &Shape) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::new();
    write_value(&mut buf, value, shape)
        .inspect_err(|e| debug!(%e, %shape, "failed to encode value"))?;
    trace!(len = buf.len(), %shape, "encoded value");
    Ok(buf)
}

/// Decodes a dynamic value laid out as `shape` from the start of a buffer.
/// Bytes after the value are ignored.
pub fn decode_value(buf: &[u8], shape: &Shape) -> Result<Value, CodecError> {
    decode_value_with_config(buf, shape, DecoderConfig::DEFAULT)
}

/// Like [`decode_value`], validating input according to `config`.
pub fn decode_value_with_config(
    buf: &[u8],
    shape: &Shape,
    config: DecoderConfig,
) -> Result<Value, CodecError> {
    let mut dec = BufDecoder::with_config(buf, config);
    let v = read_value(&mut dec, shape)
        .inspect_err(|e| debug!(%e, %shape, len = buf.len(), "failed to decode value"))?;
    trace!(consumed = dec.offset(), len = buf.len(), %shape, "decoded value");
    Ok(v)
}
