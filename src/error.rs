use thiserror::Error;

use crate::tiff::tags::FieldType;

/// Errors that can occur while decoding an Exif segment.
///
/// Every failure is classified and surfaced to the caller; nothing is
/// silently recovered. The decoder fails fast at the first structural
/// violation, and errors raised inside a directory carry the directory
/// offset and entry index via [`ExifError::Entry`].
#[derive(Debug, Clone, Error)]
pub enum ExifError {
    /// SOI, APP1, or Exif identifier mismatch in the JPEG marker stream
    #[error("malformed JPEG marker stream: {reason}")]
    MalformedMarker { reason: &'static str },

    /// Declared segment or directory structure exceeds the available bytes
    #[error("truncated input: need at least {required} bytes, got {actual}")]
    TruncatedInput { required: u64, actual: u64 },

    /// Unrecognized endian marker or wrong TIFF version constant
    #[error("invalid TIFF header: {field} 0x{found:04X}")]
    InvalidTiffHeader { field: &'static str, found: u16 },

    /// A value or directory range falls outside the buffer, including
    /// arithmetic overflow in offset + length
    #[error("offset out of range: {length} bytes at offset {offset}, buffer is {size} bytes")]
    OffsetOutOfRange {
        offset: u64,
        length: u64,
        size: u64,
    },

    /// Field type code outside the 12-entry TIFF type table
    #[error("unsupported TIFF field type: {0}")]
    UnsupportedType(u16),

    /// An entry slot could not be sliced to exactly 12 bytes.
    ///
    /// Defensive: unreachable given the directory span check, but guarded
    /// rather than assumed.
    #[error("malformed entry {index} in IFD at offset {ifd_offset:#x}")]
    MalformedEntry { ifd_offset: u32, index: u16 },

    /// A value-resolution error, tagged with the directory offset and the
    /// index of the offending entry
    #[error("entry {index} in IFD at offset {ifd_offset:#x} (tag 0x{tag:04X}): {source}")]
    Entry {
        ifd_offset: u32,
        index: u16,
        tag: u16,
        #[source]
        source: Box<ExifError>,
    },

    /// A sub-IFD pointer entry did not hold a single integer offset
    #[error(
        "invalid sub-IFD pointer (tag 0x{tag:04X}): expected one SHORT or LONG, got {count} x {field_type:?}"
    )]
    InvalidIfdPointer {
        tag: u16,
        field_type: FieldType,
        count: u32,
    },
}

impl ExifError {
    /// Wrap an error with the directory offset and entry index it was
    /// raised for.
    pub(crate) fn in_entry(self, ifd_offset: u32, index: u16, tag: u16) -> Self {
        ExifError::Entry {
            ifd_offset,
            index,
            tag,
            source: Box::new(self),
        }
    }
}
