//! Tag-length-value framing.
//!
//! A record is `[u16 tag][varint length][length bytes]`. Records are simply concatenated, the end
//! of the buffer is the end of the records.
use super::ByteReader;
use crate::error::CodecResult;
use logger_rust::{log_debug, log_warn};

/// A TLV record borrowed from the buffer it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tlv<'a> {
    pub tag: u16,
    pub value: &'a [u8],
}

impl<'a> Tlv<'a> {
    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// A fresh reader over the value, for decoding nested records.
    pub fn reader(&self) -> ByteReader<'a> {
        ByteReader::new(self.value)
    }
}

/// Iterator over the TLV records left in a reader. Stops after the first error.
pub struct TlvIter<'r, 'a> {
    reader: &'r mut ByteReader<'a>,
    failed: bool,
}

impl<'r, 'a> TlvIter<'r, 'a> {
    pub(crate) fn new(reader: &'r mut ByteReader<'a>) -> Self {
        Self {
            reader,
            failed: false,
        }
    }
}

impl<'a> Iterator for TlvIter<'_, 'a> {
    type Item = CodecResult<Tlv<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.reader.next_tlv() {
            Ok(record) => record.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for TlvIter<'_, '_> {}

/// Receives the records of a TLV stream.
pub trait TlvVisitor<'a> {
    /// Returns `Ok(false)` for tags the visitor does not know; those records are skipped.
    fn visit(&mut self, record: Tlv<'a>) -> CodecResult<bool>;
}

impl<'a, F> TlvVisitor<'a> for F
where
    F: FnMut(Tlv<'a>) -> CodecResult<bool>,
{
    fn visit(&mut self, record: Tlv<'a>) -> CodecResult<bool> {
        self(record)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkStats {
    pub handled: usize,
    pub skipped: usize,
}

impl WalkStats {
    pub fn total(&self) -> usize {
        self.handled + self.skipped
    }
}

/// Feeds every remaining record of `reader` to `visitor`.
///
/// A framing error or a visitor error stops the walk. On a framing error the reader is left at
/// the start of the malformed record.
pub fn walk_tlv<'a, V>(reader: &mut ByteReader<'a>, visitor: &mut V) -> CodecResult<WalkStats>
where
    V: TlvVisitor<'a> + ?Sized,
{
    let mut stats = WalkStats::default();
    while let Some(record) = reader.next_tlv()? {
        match visitor.visit(record) {
            Ok(true) => stats.handled += 1,
            Ok(false) => stats.skipped += 1,
            Err(e) => {
                log_warn!("TLV record with tag {} rejected: {:?}", record.tag, e);
                return Err(e);
            }
        }
    }
    if stats.skipped > 0 {
        log_debug!(
            "skipped {} of {} TLV records with unknown tags",
            stats.skipped,
            stats.total()
        );
    }
    Ok(stats)
}
