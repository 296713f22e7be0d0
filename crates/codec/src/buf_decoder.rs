//! Simple decoder for a flat buffer.

use crate::config::DecoderConfig;
use crate::errors::CodecError;
use crate::types::Decoder;

/// Decoder for an arbitrary [`AsRef`] on a byte slice.
///
/// You probably don't need to use this directly as a consumer of this library,
/// you can directly call [`crate::decode_buf`] and [`crate::encode_to_vec`].
#[derive(Debug)]
pub struct BufDecoder<B> {
    buf: B,
    at: usize,
    depth: usize,
    config: DecoderConfig,
}

impl<B: AsRef<[u8]>> BufDecoder<B> {
    /// Constructs a new instance by wrapping a buffer and starting at the
    /// beginning.
    pub fn new(buf: B) -> Self {
        Self::with_config(buf, DecoderConfig::DEFAULT)
    }

    /// Like [`Self::new`], but validating input according to `config`.
    pub fn with_config(buf: B, config: DecoderConfig) -> Self {
        Self {
            buf,
            at: 0,
            depth: 0,
            config,
        }
    }

    /// Returns the length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.buf.as_ref().len()
    }

    /// Returns if the underlying buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.as_ref().is_empty()
    }

    /// Returns the total number of remaining bytes that can be read.
    pub fn remaining(&self) -> usize {
        self.len() - self.at
    }

    /// Returns the next `n` bytes and moves past them, if there are enough.
    fn take(&mut self, n: usize) -> Result<&[u8], CodecError> {
        if n > self.remaining() {
            return Err(CodecError::UnexpectedEndOfData {
                offset: self.at,
                needed: n,
            });
        }

        let start = self.at;
        self.at += n;
        Ok(&self.buf.as_ref()[start..start + n])
    }
}

impl<B: AsRef<[u8]>> Decoder for BufDecoder<B> {
    fn read_buf(&mut self, into: &mut [u8]) -> Result<(), CodecError> {
        let src = self.take(into.len())?;
        into.copy_from_slice(src);
        Ok(())
    }

    fn read_arr<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut buf = [0; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, CodecError> {
        self.take(len).map(<[u8]>::to_vec)
    }

    fn offset(&self) -> usize {
        self.at
    }

    fn config(&self) -> &DecoderConfig {
        &self.config
    }

    fn enter_nested(&mut self) -> Result<(), CodecError> {
        let max = self.config.max_depth();
        if self.depth >= max {
            return Err(CodecError::DepthLimitExceeded {
                max,
                offset: self.at,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn exit_nested(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
