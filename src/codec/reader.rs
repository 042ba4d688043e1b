use super::bits::{check_bit_width, low_bits, BitRead};
use super::scalar::Scalar;
use super::tlv::{Tlv, TlvIter};
use crate::common::encoding::{read_uvarint, zigzag_decode, zigzag_decode32};
use crate::config::{ReaderConfig, MAX_VARINT32_READ_BYTES, MAX_VARINT64_BYTES};
use crate::error::{CodecError, CodecResult};
use std::ops::IndexMut;

/// ByteReader
///
/// A bounds-checked cursor over a borrowed byte slice. Reads never go past the end of the slice
/// and a failed read leaves the cursor (and the bit accumulator) exactly where it was, so the
/// caller may retry once the input is fixed.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    bit_buffer: u64,
    bit_pos: u32,
    config: ReaderConfig,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_config(bytes, ReaderConfig::default())
    }

    pub fn with_config(bytes: &'a [u8], config: ReaderConfig) -> Self {
        ByteReader {
            bytes,
            pos: 0,
            bit_buffer: 0,
            bit_pos: 0,
            config,
        }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// The bytes not yet consumed.
    pub fn remaining_bytes(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    /// Runs `f`, restoring the cursor and bit accumulator if it fails.
    pub fn try_read<T, F>(&mut self, f: F) -> CodecResult<T>
    where
        F: FnOnce(&mut Self) -> CodecResult<T>,
    {
        let pos = self.pos;
        let bit_buffer = self.bit_buffer;
        let bit_pos = self.bit_pos;
        let res = f(self);
        if res.is_err() {
            self.pos = pos;
            self.bit_buffer = bit_buffer;
            self.bit_pos = bit_pos;
        }
        res
    }

    #[inline]
    fn ensure(&self, needed: usize) -> CodecResult<()> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(CodecError::underrun(needed, remaining));
        }
        Ok(())
    }

    /// Returns a view of the next `len` bytes and advances past them.
    pub fn read_raw(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        self.ensure(len)?;
        let out = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    /// Fills `out` from the stream.
    pub fn read_into(&mut self, out: &mut [u8]) -> CodecResult<()> {
        let src = self.read_raw(out.len())?;
        out.copy_from_slice(src);
        Ok(())
    }

    pub fn read_array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let mut out = [0u8; N];
        self.read_into(&mut out)?;
        Ok(out)
    }

    pub fn read_u8(&mut self) -> CodecResult<u8> {
        self.read_scalar()
    }

    pub fn read_i8(&mut self) -> CodecResult<i8> {
        self.read_scalar()
    }

    pub fn read_bool(&mut self) -> CodecResult<bool> {
        self.read_scalar()
    }

    pub fn read_u16(&mut self) -> CodecResult<u16> {
        self.read_scalar()
    }

    pub fn read_u32(&mut self) -> CodecResult<u32> {
        self.read_scalar()
    }

    pub fn read_u64(&mut self) -> CodecResult<u64> {
        self.read_scalar()
    }

    pub fn read_u128(&mut self) -> CodecResult<u128> {
        self.read_scalar()
    }

    pub fn read_i16(&mut self) -> CodecResult<i16> {
        self.read_scalar()
    }

    pub fn read_i32(&mut self) -> CodecResult<i32> {
        self.read_scalar()
    }

    pub fn read_i64(&mut self) -> CodecResult<i64> {
        self.read_scalar()
    }

    pub fn read_i128(&mut self) -> CodecResult<i128> {
        self.read_scalar()
    }

    pub fn read_f32(&mut self) -> CodecResult<f32> {
        self.read_scalar()
    }

    pub fn read_f64(&mut self) -> CodecResult<f64> {
        self.read_scalar()
    }

    #[inline]
    pub fn read_scalar<T: Scalar>(&mut self) -> CodecResult<T> {
        T::read_from(self)
    }

    /// Reads `DIM` components into a default-constructed `V`, in index order.
    ///
    /// `V::default()` must already hold at least `DIM` components (fixed-size arrays and math
    /// vector types do, an empty `Vec` does not).
    pub fn read_vector<const DIM: usize, V>(&mut self) -> CodecResult<V>
    where
        V: Default + IndexMut<usize>,
        V::Output: Scalar,
    {
        self.ensure(DIM * <V::Output as Scalar>::WIDTH)?;
        self.try_read(|r| {
            let mut out = V::default();
            for d in 0..DIM {
                out[d] = r.read_scalar()?;
            }
            Ok(out)
        })
    }

    /// Reads a length-prefixed string, borrowing it from the underlying buffer.
    pub fn read_str(&mut self) -> CodecResult<&'a str> {
        self.try_read(|r| {
            let bytes = r.read_blob()?;
            Ok(std::str::from_utf8(bytes)?)
        })
    }

    pub fn read_string(&mut self) -> CodecResult<String> {
        self.read_str().map(str::to_owned)
    }

    /// Reads a length-prefixed byte sequence, borrowing it from the underlying buffer.
    pub fn read_blob(&mut self) -> CodecResult<&'a [u8]> {
        self.try_read(|r| {
            let len = r.read_length()?;
            r.read_raw(len)
        })
    }

    fn read_length(&mut self) -> CodecResult<usize> {
        let length = self.read_var_u32()?;
        let limit = self.config.max_length;
        if length > limit {
            return Err(CodecError::LengthLimitExceeded { length, limit });
        }
        Ok(length as usize)
    }

    /// Reads a 32-bit varint. Up to 5 unterminated groups are allowed; a sixth group must end
    /// the varint. Payload bits above bit 31 are dropped.
    pub fn read_var_u32(&mut self) -> CodecResult<u32> {
        let (value, consumed) = read_uvarint(self.bytes, self.pos, MAX_VARINT32_READ_BYTES)?;
        self.pos += consumed;
        Ok(value as u32)
    }

    pub fn read_var_i32(&mut self) -> CodecResult<i32> {
        self.read_var_u32().map(zigzag_decode32)
    }

    pub fn read_var_u64(&mut self) -> CodecResult<u64> {
        let (value, consumed) = read_uvarint(self.bytes, self.pos, MAX_VARINT64_BYTES)?;
        self.pos += consumed;
        Ok(value)
    }

    pub fn read_var_i64(&mut self) -> CodecResult<i64> {
        self.read_var_u64().map(zigzag_decode)
    }

    /// Reads the next TLV record, or `None` once the buffer is exhausted.
    pub fn next_tlv(&mut self) -> CodecResult<Option<Tlv<'a>>> {
        if self.is_empty() {
            return Ok(None);
        }
        self.try_read(|r| {
            let tag = r.read_u16()?;
            let len = r.read_length()?;
            let value = r.read_raw(len)?;
            Ok(Some(Tlv { tag, value }))
        })
    }

    /// Iterates the remaining TLV records.
    pub fn tlv_iter(&mut self) -> TlvIter<'_, 'a> {
        TlvIter::new(self)
    }
}

impl BitRead for ByteReader<'_> {
    fn read_bits(&mut self, count: u32) -> CodecResult<u32> {
        check_bit_width(count)?;
        if self.bit_pos < count {
            let needed = (count - self.bit_pos).div_ceil(8) as usize;
            self.ensure(needed)?;
            let bytes = self.bytes;
            for &byte in &bytes[self.pos..self.pos + needed] {
                self.bit_buffer |= (byte as u64) << self.bit_pos;
                self.bit_pos += 8;
            }
            self.pos += needed;
        }

        let out = low_bits(self.bit_buffer, count) as u32;
        self.bit_buffer >>= count;
        self.bit_pos -= count;
        Ok(out)
    }

    fn align_bits(&mut self) {
        self.bit_buffer = 0;
        self.bit_pos = 0;
    }
}

impl<'a> From<&'a [u8]> for ByteReader<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        ByteReader::new(bytes)
    }
}

impl<'a> From<&'a str> for ByteReader<'a> {
    fn from(s: &'a str) -> Self {
        ByteReader::new(s.as_bytes())
    }
}
