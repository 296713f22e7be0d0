use thiserror::Error;

/// Errors from hardpack-codec.
///
/// Decode-side variants carry the byte offset at which the offending item
/// starts.  Any error is terminal for the call that produced it.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum CodecError {
    /// If we tried to read past the end of the underlying buffer.
    #[error("unexpected end of data at offset {offset} (needed {needed} more bytes)")]
    UnexpectedEndOfData {
        /// Position of the read that failed.
        offset: usize,
        /// Number of bytes the read wanted.
        needed: usize,
    },

    /// If an optional's presence byte was neither 0 nor 1.
    #[error("corrupted optional tag {tag:#04x} at offset {offset}")]
    CorruptedOptionalTag {
        /// The tag byte we found.
        tag: u8,
        /// Position of the tag byte.
        offset: usize,
    },

    /// If a varint kept going past what a `u64` can hold.
    #[error("varint too long at offset {offset}")]
    VarIntTooLong {
        /// Position of the first byte of the varint.
        offset: usize,
    },

    /// If string bytes were not valid UTF-8.
    #[error("invalid utf-8 string at offset {offset}")]
    InvalidUtf8 {
        /// Position of the first payload byte of the string.
        offset: usize,
    },

    /// If a dynamic value was presented for a shape it can't be encoded as.
    #[error("unsupported value kind (expected {expected}, found {found})")]
    UnsupportedValueKind {
        /// Description of the shape we were asked to encode.
        expected: String,
        /// Kind of the value we were given.
        found: &'static str,
    },

    /// If a record value's fields don't line up with its shape.
    #[error("record field mismatch in {record} (expected {expected}, found {found})")]
    FieldMismatch {
        /// Name of the record shape.
        record: String,
        /// Field name (or count) the shape declares.
        expected: String,
        /// Field name (or count) the value provided.
        found: String,
    },

    /// If a recursive shape reference pointed outside of any enclosing record.
    #[error("unresolved recursive shape reference (depth {0})")]
    UnresolvedRecursion(usize),

    /// If strict bool decoding saw something other than 0 or 1.
    #[error("invalid bool byte {value:#04x} at offset {offset}")]
    InvalidBool {
        /// The byte we found.
        value: u8,
        /// Position of the byte.
        offset: usize,
    },

    /// If we read a container length that was longer than allowed.
    #[error("overflow container (len {len} at offset {offset})")]
    OverflowContainer {
        /// The declared length.
        len: u64,
        /// Position of the length prefix.
        offset: usize,
    },

    /// If containers nested deeper than the configured limit.
    #[error("nesting deeper than {max} levels at offset {offset}")]
    DepthLimitExceeded {
        /// The configured limit.
        max: usize,
        /// Position of the item that would have gone past the limit.
        offset: usize,
    },

    /// If a hand-written codec found a discriminant it doesn't know.
    #[error("invalid variant for {0}")]
    InvalidVariant(&'static str),

    /// If a timestamp can't be represented as milliseconds since the epoch.
    #[error("timestamp out of range")]
    TimestampOutOfRange,

    /// If there was extra data in a buffer than we didn't consume reading a
    /// message.
    #[error("extra unnecessary input leftover ({0} bytes)")]
    ExtraInput(usize),
}

/// Wrapper result type.
pub type CodecResult<T> = Result<T, CodecError>;
