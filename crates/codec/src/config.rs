//! Decoder configuration.

/// How bool bytes are interpreted when decoding.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum BoolDecoding {
    /// Any nonzero byte is `true`.  This accepts output from encoders that
    /// don't normalize their bools.
    #[default]
    Lenient,

    /// Only `0x00` and `0x01` are accepted, anything else is an error.
    Strict,
}

/// Knobs that tune how input is validated while decoding.
///
/// The encoder has no equivalent, its output is fully determined by the value.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DecoderConfig {
    bools: BoolDecoding,
    max_container_len: Option<u64>,
    max_depth: usize,
}

impl DecoderConfig {
    /// Nesting depth allowed when none is configured.
    pub const DEFAULT_MAX_DEPTH: usize = 256;

    /// The config used when none is provided.
    pub const DEFAULT: DecoderConfig = DecoderConfig {
        bools: BoolDecoding::Lenient,
        max_container_len: None,
        max_depth: Self::DEFAULT_MAX_DEPTH,
    };

    /// Constructs a config with default settings.
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Sets how bool bytes are interpreted.
    pub const fn with_bools(mut self, bools: BoolDecoding) -> Self {
        self.bools = bools;
        self
    }

    /// Caps the declared length of strings, byte blobs, sequences and maps.
    pub const fn with_max_container_len(mut self, max: u64) -> Self {
        self.max_container_len = Some(max);
        self
    }

    /// Caps how deeply optionals, sequences, maps and dynamic records may
    /// nest.  Decoding recurses once per level, so this bounds stack use on
    /// untrusted input.
    pub const fn with_max_depth(mut self, max: usize) -> Self {
        self.max_depth = max;
        self
    }

    /// Returns the bool decoding mode.
    pub const fn bools(&self) -> BoolDecoding {
        self.bools
    }

    /// Returns the container length cap, if any.
    pub const fn max_container_len(&self) -> Option<u64> {
        self.max_container_len
    }

    /// Returns the nesting depth cap.
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
