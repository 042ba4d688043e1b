use crate::config::MAX_BIT_WIDTH;
use crate::error::{CodecError, CodecResult};

/// Sub-byte field decoding. Fields are stored LSB-first within each byte, and a field may span
/// byte boundaries.
pub trait BitRead {
    /// Read `count` bits (at most 32) from the underlying stream.
    fn read_bits(&mut self, count: u32) -> CodecResult<u32>;

    /// Read a single bit from the underlying stream.
    fn read_bit(&mut self) -> CodecResult<bool> {
        self.read_bits(1).map(|bit| bit != 0)
    }

    /// Discards any bits pulled into the accumulator but not yet returned.
    fn align_bits(&mut self);
}

/// A trait for anything that can write a variable number of
/// potentially un-aligned values to an output stream
pub trait BitWrite {
    /// Writes the low `count` bits of `value` to the stream.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBitWidth` if `count` is larger than 32.
    fn write_bits(&mut self, value: u32, count: u32) -> CodecResult<()>;

    /// Writes a single bit to the stream.
    /// `true` indicates 1, `false` indicates 0
    fn write_bit(&mut self, bit: bool) {
        // a width of 1 is always valid
        let _ = self.write_bits(u32::from(bit), 1);
    }

    /// Returns true if the stream is aligned at a whole byte.
    fn byte_aligned(&self) -> bool;

    /// Pads the stream with 0 bits until it is aligned at a whole byte.
    /// Does nothing if the stream is already aligned.
    fn finalize_bits(&mut self);
}

#[inline]
pub(crate) fn check_bit_width(count: u32) -> CodecResult<()> {
    if count > MAX_BIT_WIDTH {
        return Err(CodecError::InvalidBitWidth(count));
    }
    Ok(())
}

/// Keeps the low `count` bits of `value`. `count` must be <= 32.
#[inline]
pub(crate) fn low_bits(value: u64, count: u32) -> u64 {
    value & ((1u64 << count) - 1)
}
