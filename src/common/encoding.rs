use crate::error::{CodecError, CodecResult};
use num_traits::PrimInt;

/// All bits except for the most significant. Can be used as bitmask to drop the most-significant
/// bit using `&` (binary-and).
pub const DROP_MSB: u8 = 0b0111_1111;
pub const MSB: u8 = 0x80;

/// Writes an unsigned varint to the buffer
pub(crate) fn write_uvarint(buf: &mut Vec<u8>, mut value: u64) {
    while value >= MSB as u64 {
        buf.push((value as u8) | MSB);
        value >>= 7;
    }
    buf.push(value as u8);
}

/// Reads an unsigned varint of at most `max_bytes` bytes from `buf`, starting at `start_offset`.
/// Returns the value and the number of bytes consumed.
///
/// Payload bits beyond 64 are dropped; callers decoding narrower types truncate the result.
pub(crate) fn read_uvarint(
    buf: &[u8],
    start_offset: usize,
    max_bytes: usize,
) -> CodecResult<(u64, usize)> {
    let available = buf.len().saturating_sub(start_offset);
    let mut value: u64 = 0;
    let mut shift = 0;
    let mut consumed = 0;

    loop {
        if consumed == max_bytes {
            return Err(CodecError::VarintTooLong { max_bytes });
        }

        let Some(&byte) = buf.get(start_offset + consumed) else {
            return Err(CodecError::underrun(consumed + 1, available));
        };
        consumed += 1;

        if shift < 64 {
            value |= ((byte & DROP_MSB) as u64) << shift;
        }
        if byte & MSB == 0 {
            break;
        }
        shift += 7;
    }

    Ok((value, consumed))
}

// see: http://stackoverflow.com/a/2211086/56332
// casting required because operations like unary negation
// cannot be performed on unsigned integers
#[inline]
pub(crate) fn zigzag_decode(from: u64) -> i64 {
    ((from >> 1) ^ (-((from & 1) as i64)) as u64) as i64
}

#[inline]
pub(crate) fn zigzag_encode(from: i64) -> u64 {
    ((from << 1) ^ (from >> 63)) as u64
}

#[inline]
pub(crate) fn zigzag_decode32(from: u32) -> i32 {
    ((from >> 1) as i32) ^ -((from & 1) as i32)
}

#[inline]
pub(crate) fn zigzag_encode32(from: i32) -> u32 {
    ((from << 1) ^ (from >> 31)) as u32
}

/// Number of bytes the minimal varint encoding of `value` occupies.
pub fn varint_len<U: PrimInt>(value: U) -> usize {
    let width = U::zero().count_zeros() as usize;
    let significant = width - value.leading_zeros() as usize;
    significant.div_ceil(7).max(1)
}
