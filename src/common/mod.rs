use crate::codec::{ByteReader, ByteWriter};
use crate::error::CodecResult;

pub mod encoding;

/// A trait for types that can be serialized to and deserialized from a byte stream.
pub trait Serialized: Sized {
    /// Serializes the implementing type to the provided writer.
    fn serialize(&self, writer: &mut ByteWriter);

    /// Deserializes an instance from the provided reader.
    fn deserialize(reader: &mut ByteReader<'_>) -> CodecResult<Self>;

    fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        self.serialize(&mut writer);
        writer.into_inner()
    }

    fn from_bytes(buf: &[u8]) -> CodecResult<Self> {
        let mut reader = ByteReader::new(buf);
        Self::deserialize(&mut reader)
    }
}
