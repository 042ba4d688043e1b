use super::bits::{check_bit_width, low_bits, BitWrite};
use super::scalar::Scalar;
use crate::common::encoding::{write_uvarint, zigzag_encode, zigzag_encode32};
use crate::config::DEFAULT_WRITER_CAPACITY;
use crate::error::{CodecError, CodecResult};
use std::io;
use std::ops::Index;

/// ByteWriter
///
/// An append-only cursor over an owned, growable buffer. Multi-byte values are written
/// big-endian. Bit-packed fields share a 64-bit accumulator; whole bytes are flushed as soon as
/// they are complete and [`finalize_bits`](BitWrite::finalize_bits) pads out the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteWriter {
    buf: Vec<u8>,
    bit_buffer: u64,
    bit_pos: u32,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_WRITER_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ByteWriter {
            buf: Vec::with_capacity(capacity),
            bit_buffer: 0,
            bit_pos: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    /// Empties the buffer and drops any pending bits. Capacity is kept.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.bit_buffer = 0;
        self.bit_pos = 0;
    }

    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.buf.push(value as u8);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_scalar(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.write_scalar(value);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.write_scalar(value);
    }

    pub fn write_u64(&mut self, value: u64) {
        self.write_scalar(value);
    }

    pub fn write_u128(&mut self, value: u128) {
        self.write_scalar(value);
    }

    pub fn write_i16(&mut self, value: i16) {
        self.write_scalar(value);
    }

    pub fn write_i32(&mut self, value: i32) {
        self.write_scalar(value);
    }

    pub fn write_i64(&mut self, value: i64) {
        self.write_scalar(value);
    }

    pub fn write_i128(&mut self, value: i128) {
        self.write_scalar(value);
    }

    pub fn write_f32(&mut self, value: f32) {
        self.write_scalar(value);
    }

    pub fn write_f64(&mut self, value: f64) {
        self.write_scalar(value);
    }

    #[inline]
    pub fn write_scalar<T: Scalar>(&mut self, value: T) {
        value.write_to(self);
    }

    /// Writes components `0..DIM` of `value`, in index order.
    pub fn write_vector<const DIM: usize, V>(&mut self, value: &V)
    where
        V: Index<usize> + ?Sized,
        V::Output: Scalar,
    {
        self.buf.reserve(DIM * <V::Output as Scalar>::WIDTH);
        for d in 0..DIM {
            value[d].write_to(self);
        }
    }

    /// Writes a varint length followed by the UTF-8 bytes of `value`.
    pub fn write_str(&mut self, value: &str) -> CodecResult<()> {
        self.write_blob(value.as_bytes())
    }

    /// Writes a varint length followed by `value`. No terminator is added.
    pub fn write_blob(&mut self, value: &[u8]) -> CodecResult<()> {
        self.write_length(value.len())?;
        self.write_raw(value);
        Ok(())
    }

    pub fn write_var_u32(&mut self, value: u32) {
        write_uvarint(&mut self.buf, value as u64);
    }

    pub fn write_var_i32(&mut self, value: i32) {
        self.write_var_u32(zigzag_encode32(value));
    }

    pub fn write_var_u64(&mut self, value: u64) {
        write_uvarint(&mut self.buf, value);
    }

    pub fn write_var_i64(&mut self, value: i64) {
        self.write_var_u64(zigzag_encode(value));
    }

    /// Writes a TLV record whose value is the content of another writer.
    pub fn tlv(&mut self, tag: u16, payload: &ByteWriter) -> CodecResult<()> {
        self.tlv_bytes(tag, payload.as_bytes())
    }

    pub fn tlv_bytes(&mut self, tag: u16, value: &[u8]) -> CodecResult<()> {
        let length = Self::length_prefix(value.len())?;
        self.write_u16(tag);
        self.write_var_u32(length);
        self.write_raw(value);
        Ok(())
    }

    fn write_length(&mut self, len: usize) -> CodecResult<()> {
        let length = Self::length_prefix(len)?;
        self.write_var_u32(length);
        Ok(())
    }

    fn length_prefix(len: usize) -> CodecResult<u32> {
        u32::try_from(len).map_err(|_| CodecError::LengthTooLarge(len))
    }

    fn flush_bits(&mut self) {
        while self.bit_pos >= 8 {
            self.buf.push(self.bit_buffer as u8);
            self.bit_buffer >>= 8;
            self.bit_pos -= 8;
        }
    }
}

impl BitWrite for ByteWriter {
    fn write_bits(&mut self, value: u32, count: u32) -> CodecResult<()> {
        check_bit_width(count)?;
        self.bit_buffer |= low_bits(value as u64, count) << self.bit_pos;
        self.bit_pos += count;
        self.flush_bits();
        Ok(())
    }

    fn byte_aligned(&self) -> bool {
        self.bit_pos == 0
    }

    fn finalize_bits(&mut self) {
        if self.bit_pos > 0 {
            self.buf.push(self.bit_buffer as u8);
            self.bit_buffer = 0;
            self.bit_pos = 0;
        }
    }
}

impl io::Write for ByteWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_raw(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl AsRef<[u8]> for ByteWriter {
    fn as_ref(&self) -> &[u8] {
        &self.buf
    }
}

impl From<ByteWriter> for Vec<u8> {
    fn from(writer: ByteWriter) -> Self {
        writer.buf
    }
}
