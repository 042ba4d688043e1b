//! Binary cursors for a fixed big-endian wire format.
//!
//! [`ByteWriter`] appends values to an owned, growable buffer; [`ByteReader`] decodes them from a
//! borrowed slice with strict bounds checking. Both share one format: fixed-width big-endian
//! integers and floats, base-128 varints (zigzag for signed values), LSB-first bit packing,
//! varint-length-prefixed strings and blobs, and tag-length-value records.
//!
//! ```
//! use wirepack::{ByteReader, ByteWriter};
//!
//! let mut writer = ByteWriter::new();
//! writer.write_u32(300);
//! writer.write_var_u32(300);
//! assert_eq!(writer.as_bytes(), &[0x00, 0x00, 0x01, 0x2C, 0xAC, 0x02]);
//!
//! let mut reader = ByteReader::new(writer.as_bytes());
//! assert_eq!(reader.read_u32().unwrap(), 300);
//! assert_eq!(reader.read_var_u32().unwrap(), 300);
//! ```
pub mod codec;
pub mod common;
pub mod config;
mod error;
pub mod geometry;

pub use codec::{
    walk_tlv, BitRead, BitWrite, ByteReader, ByteWriter, Scalar, Tlv, TlvIter, TlvVisitor,
    WalkStats,
};
pub use common::Serialized;
pub use config::ReaderConfig;
pub use error::{CodecError, CodecResult};
