//! Byte cursors and the wire format they share.
//!
//! Multi-byte integers and floats are big-endian, varints are base-128 with the continuation
//! flag in the high bit, strings and blobs are varint-length-prefixed, and bit-packed fields are
//! stored LSB-first and packed across byte boundaries.
mod bits;
#[cfg(test)]
mod codec_tests;
mod reader;
mod scalar;
mod tlv;
mod writer;

pub use bits::*;
pub use reader::*;
pub use scalar::*;
pub use tlv::*;
pub use writer::*;
