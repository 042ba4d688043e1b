use bon::Builder;

/// Maximum encoded size of a 32-bit varint (5 groups of 7 bits).
pub const MAX_VARINT32_BYTES: usize = 5;
/// Longest 32-bit varint a reader accepts. A sixth group is tolerated as long as it terminates
/// the varint; its payload lies above bit 31 and is dropped.
pub const MAX_VARINT32_READ_BYTES: usize = MAX_VARINT32_BYTES + 1;
/// Maximum encoded size of a 64-bit varint (10 groups of 7 bits).
pub const MAX_VARINT64_BYTES: usize = 10;
/// Widest field accepted by a single bit-packing call.
pub const MAX_BIT_WIDTH: u32 = 32;

pub const DEFAULT_WRITER_CAPACITY: usize = 64;
pub const DEFAULT_MAX_LENGTH: u32 = u32::MAX;

/// Limits applied by a [`ByteReader`](crate::codec::ByteReader) while decoding.
///
/// The only limit is `max_length`, which caps the length prefix of strings, blobs and
/// TLV values. Anything above it fails with `LengthLimitExceeded` before the cursor moves,
/// even when the buffer is long enough.
#[derive(Builder, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReaderConfig {
    #[builder(default = DEFAULT_MAX_LENGTH)]
    pub max_length: u32,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl ReaderConfig {
    pub fn is_unrestricted(&self) -> bool {
        self.max_length == DEFAULT_MAX_LENGTH
    }
}
