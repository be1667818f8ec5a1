//! The TIFF byte arena.
//!
//! Every offset in an Exif stream — first-IFD offset, indirect value
//! offsets, sub-IFD pointers, the next-IFD trailer — is an absolute
//! position within one buffer whose byte 0 is the first byte of the TIFF
//! header. This module owns that buffer and funnels every dereference
//! through a single bounds-checked accessor, so offset arithmetic is
//! verified in exactly one place.
//!
//! Offsets and lengths are widened to u64 before any addition, which makes
//! the `offset + length` computation overflow-free for the u32 quantities
//! the classic TIFF format can express.

use bytes::Bytes;

use crate::error::ExifError;

use super::header::ByteOrder;

/// An immutable TIFF payload plus its resolved byte order.
///
/// Constructed once at parse start and never mutated. Cloning is cheap:
/// the underlying [`Bytes`] is reference-counted.
#[derive(Debug, Clone)]
pub struct TiffBuffer {
    data: Bytes,
    byte_order: ByteOrder,
}

impl TiffBuffer {
    /// Wrap a TIFF payload with the byte order established by the header.
    pub fn new(data: Bytes, byte_order: ByteOrder) -> Self {
        Self { data, byte_order }
    }

    /// Byte order declared by the TIFF header.
    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Total size of the buffer in bytes.
    #[inline]
    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    /// Whether the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow `length` bytes starting at `offset`.
    ///
    /// The sole place range checks are enforced. All other accessors and
    /// every decoder in this crate go through here.
    ///
    /// # Errors
    /// `OffsetOutOfRange` if `offset + length` exceeds the buffer size.
    pub fn slice(&self, offset: u64, length: u64) -> Result<&[u8], ExifError> {
        let size = self.len();
        let end = offset.checked_add(length).ok_or(ExifError::OffsetOutOfRange {
            offset,
            length,
            size,
        })?;
        if end > size {
            return Err(ExifError::OffsetOutOfRange {
                offset,
                length,
                size,
            });
        }
        Ok(&self.data[offset as usize..end as usize])
    }

    /// Copy `length` bytes starting at `offset` into an owned [`Bytes`].
    pub fn slice_owned(&self, offset: u64, length: u64) -> Result<Bytes, ExifError> {
        self.slice(offset, length)?;
        Ok(self.data.slice(offset as usize..(offset + length) as usize))
    }

    /// Read a u16 at `offset` in the buffer's byte order.
    pub fn read_u16(&self, offset: u64) -> Result<u16, ExifError> {
        let bytes = self.slice(offset, 2)?;
        Ok(self.byte_order.read_u16(bytes))
    }

    /// Read a u32 at `offset` in the buffer's byte order.
    pub fn read_u32(&self, offset: u64) -> Result<u32, ExifError> {
        let bytes = self.slice(offset, 4)?;
        Ok(self.byte_order.read_u32(bytes))
    }
}

// =============================================================================
// Tests
// =============================================================================
