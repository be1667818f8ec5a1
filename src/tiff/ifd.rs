//! IFD (Image File Directory) decoding.
//!
//! A directory occupies `2 + 12 * entry_count + 4` bytes at its claimed
//! offset:
//!
//! ```text
//! u16          entry count
//! 12 bytes * N entries (u16 tag, u16 type, u32 count, 4-byte value/offset)
//! u32          offset of the next directory in the chain (0 = none)
//! ```
//!
//! The full span is bounds-checked up front, before any entry is touched,
//! so a corrupt entry count cannot drive allocation or reads past the
//! buffer. Values are resolved eagerly; a resolver error aborts the
//! directory and is reported with the offending entry's index.

use crate::error::ExifError;
use crate::trace::{DecodeTrace, NoopTrace};

use super::buffer::TiffBuffer;
use super::tags::ExifTag;
use super::values::ResolvedValue;

/// Size of one directory entry slot in bytes.
pub const IFD_ENTRY_SIZE: u64 = 12;

/// Size of the entry-count field at the start of a directory.
const IFD_COUNT_SIZE: u64 = 2;

/// Size of the next-directory offset trailer.
const IFD_NEXT_OFFSET_SIZE: u64 = 4;

// =============================================================================
// IfdEntry
// =============================================================================

/// One decoded directory entry with its value already materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfdEntry {
    /// Tag identifying what the value means
    pub tag: u16,

    /// Declared element count
    pub count: u32,

    /// The entry's 4-byte value-or-offset field, as stored on disk
    pub raw_field: [u8; 4],

    /// The materialized value
    pub value: ResolvedValue,
}

impl IfdEntry {
    /// The tag as a well-known [`ExifTag`], if recognized.
    pub fn known_tag(&self) -> Option<ExifTag> {
        ExifTag::from_u16(self.tag)
    }
}

// =============================================================================
// Ifd
// =============================================================================

/// A decoded directory: entries in on-disk order plus the chain trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ifd {
    /// Absolute offset this directory was decoded at (diagnostics)
    pub offset: u32,

    /// Entries in on-disk order
    pub entries: Vec<IfdEntry>,

    /// Offset of the next directory in the chain; 0 means none
    pub next_offset: u32,
}

impl Ifd {
    /// Decode the directory at `offset`.
    pub fn parse_at(buffer: &TiffBuffer, offset: u32) -> Result<Self, ExifError> {
        Self::parse_at_traced(buffer, offset, &NoopTrace)
    }

    /// Decode the directory at `offset`, reporting progress to `trace`.
    ///
    /// # Errors
    /// - `TruncatedInput` if the declared span does not fit in the buffer
    /// - `Entry`-wrapped `UnsupportedType` / `OffsetOutOfRange` from value
    ///   resolution
    pub fn parse_at_traced(
        buffer: &TiffBuffer,
        offset: u32,
        trace: &dyn DecodeTrace,
    ) -> Result<Self, ExifError> {
        let base = offset as u64;
        let entry_count = buffer.read_u16(base).map_err(|_| ExifError::TruncatedInput {
            required: base + IFD_COUNT_SIZE,
            actual: buffer.len(),
        })?;

        // Validate the whole declared span before touching any entry.
        let span = IFD_COUNT_SIZE + IFD_ENTRY_SIZE * entry_count as u64 + IFD_NEXT_OFFSET_SIZE;
        if buffer.slice(base, span).is_err() {
            return Err(ExifError::TruncatedInput {
                required: base + span,
                actual: buffer.len(),
            });
        }

        trace.directory_entered(offset, entry_count);

        let byte_order = buffer.byte_order();
        let mut entries = Vec::with_capacity(entry_count as usize);

        for index in 0..entry_count {
            let slot_offset = base + IFD_COUNT_SIZE + IFD_ENTRY_SIZE * index as u64;
            let slot = buffer.slice(slot_offset, IFD_ENTRY_SIZE)?;
            if slot.len() != IFD_ENTRY_SIZE as usize {
                return Err(ExifError::MalformedEntry {
                    ifd_offset: offset,
                    index,
                });
            }

            let tag = byte_order.read_u16(&slot[0..2]);
            let field_type_raw = byte_order.read_u16(&slot[2..4]);
            let count = byte_order.read_u32(&slot[4..8]);
            let raw_field: [u8; 4] = [slot[8], slot[9], slot[10], slot[11]];

            let value = ResolvedValue::resolve(buffer, field_type_raw, count, raw_field)
                .map_err(|e| e.in_entry(offset, index, tag))?;

            trace.value_resolved(tag, value.field_type, value.byte_len(), value.is_inline());

            entries.push(IfdEntry {
                tag,
                count,
                raw_field,
                value,
            });
        }

        let next_offset = buffer.read_u32(base + IFD_COUNT_SIZE + IFD_ENTRY_SIZE * entry_count as u64)?;

        Ok(Ifd {
            offset,
            entries,
            next_offset,
        })
    }

    /// Find an entry by numeric tag (first match in disk order).
    pub fn get(&self, tag: u16) -> Option<&IfdEntry> {
        self.entries.iter().find(|e| e.tag == tag)
    }

    /// Find an entry by well-known tag.
    pub fn get_tag(&self, tag: ExifTag) -> Option<&IfdEntry> {
        self.get(tag.as_u16())
    }

    /// Number of entries in the directory.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the directory has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiff::header::ByteOrder;
    use crate::tiff::tags::FieldType;
    use bytes::Bytes;

    fn le_buffer(data: Vec<u8>) -> TiffBuffer {
        TiffBuffer::new(Bytes::from(data), ByteOrder::LittleEndian)
    }

    /// An empty little-endian directory at offset 0: count 0, next 0.
    fn empty_ifd_bytes() -> Vec<u8> {
        vec![0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
    }

    #[test]
    fn test_parse_empty_directory() {
        let buf = le_buffer(empty_ifd_bytes());
        let ifd = Ifd::parse_at(&buf, 0).unwrap();
        assert!(ifd.is_empty());
        assert_eq!(ifd.next_offset, 0);
        assert_eq!(ifd.offset, 0);
    }

    #[test]
    fn test_parse_single_inline_entry() {
        // One entry: Orientation (0x0112), SHORT, count 1, value 1
        let data = vec![
            0x01, 0x00, // entry count = 1
            0x12, 0x01, // tag 0x0112
            0x03, 0x00, // type SHORT
            0x01, 0x00, 0x00, 0x00, // count 1
            0x01, 0x00, 0x00, 0x00, // value 1, inline
            0x00, 0x00, 0x00, 0x00, // next offset
        ];
        let buf = le_buffer(data);
        let ifd = Ifd::parse_at(&buf, 0).unwrap();

        assert_eq!(ifd.len(), 1);
        let entry = &ifd.entries[0];
        assert_eq!(entry.tag, 0x0112);
        assert_eq!(entry.known_tag(), Some(ExifTag::Orientation));
        assert_eq!(entry.value.field_type, FieldType::Short);
        assert_eq!(entry.value.uint(0), Some(1));
        assert!(entry.value.is_inline());
    }

    #[test]
    fn test_entries_preserve_disk_order() {
        // Two entries deliberately out of tag order
        let data = vec![
            0x02, 0x00, // entry count = 2
            0x00, 0x02, // tag 0x0200
            0x03, 0x00, 0x01, 0x00, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00, //
            0x00, 0x01, // tag 0x0100
            0x03, 0x00, 0x01, 0x00, 0x00, 0x00, 0x07, 0x00, 0x00, 0x00, //
            0x00, 0x00, 0x00, 0x00, // next offset
        ];
        let buf = le_buffer(data);
        let ifd = Ifd::parse_at(&buf, 0).unwrap();

        assert_eq!(ifd.entries[0].tag, 0x0200);
        assert_eq!(ifd.entries[1].tag, 0x0100);
        assert_eq!(ifd.get(0x0100).unwrap().value.uint(0), Some(7));
    }

    #[test]
    fn test_next_offset_returned_uninterpreted() {
        let data = vec![
            0x00, 0x00, // entry count = 0
            0x78, 0x56, 0x34, 0x12, // next offset, deliberately wild
        ];
        let buf = le_buffer(data);
        let ifd = Ifd::parse_at(&buf, 0).unwrap();
        assert_eq!(ifd.next_offset, 0x12345678);
    }

    #[test]
    fn test_entry_count_exceeding_buffer_is_truncated_input() {
        // Claims 1000 entries in a 6-byte buffer
        let data = vec![0xE8, 0x03, 0x00, 0x00, 0x00, 0x00];
        let buf = le_buffer(data);
        let result = Ifd::parse_at(&buf, 0);
        assert!(matches!(result, Err(ExifError::TruncatedInput { .. })));
    }

    #[test]
    fn test_offset_past_buffer_is_truncated_input() {
        let buf = le_buffer(empty_ifd_bytes());
        let result = Ifd::parse_at(&buf, 100);
        assert!(matches!(result, Err(ExifError::TruncatedInput { .. })));
    }

    #[test]
    fn test_max_entry_count_does_not_allocate() {
        // 0xFFFF entries would need ~786KB of directory; the span check
        // rejects it before the entry vector is sized
        let data = vec![0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00];
        let buf = le_buffer(data);
        let result = Ifd::parse_at(&buf, 0);
        assert!(matches!(result, Err(ExifError::TruncatedInput { .. })));
    }

    #[test]
    fn test_resolver_error_carries_entry_context() {
        // Entry 0 is fine, entry 1 has an unsupported type code
        let data = vec![
            0x02, 0x00, // entry count = 2
            0x00, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00, //
            0x0F, 0x01, 0x63, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
            0x00, 0x00, 0x00, 0x00,
        ];
        let buf = le_buffer(data);
        let result = Ifd::parse_at(&buf, 0);

        match result {
            Err(ExifError::Entry {
                ifd_offset: 0,
                index: 1,
                tag: 0x010F,
                source,
            }) => assert!(matches!(*source, ExifError::UnsupportedType(99))),
            other => panic!("expected Entry-wrapped UnsupportedType, got {other:?}"),
        }
    }

    #[test]
    fn test_indirect_value_out_of_range_carries_entry_context() {
        // One entry: LONG count 2 (8 bytes, must be indirect) at offset 200
        let data = vec![
            0x01, 0x00, //
            0x00, 0x01, 0x04, 0x00, 0x02, 0x00, 0x00, 0x00, 0xC8, 0x00, 0x00, 0x00, //
            0x00, 0x00, 0x00, 0x00,
        ];
        let buf = le_buffer(data);
        let result = Ifd::parse_at(&buf, 0);

        match result {
            Err(ExifError::Entry { index: 0, source, .. }) => {
                assert!(matches!(*source, ExifError::OffsetOutOfRange { .. }))
            }
            other => panic!("expected Entry-wrapped OffsetOutOfRange, got {other:?}"),
        }
    }
}
