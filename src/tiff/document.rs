//! The Exif document tree and its fixed directory walk.
//!
//! A document is at most five directories:
//!
//! - the primary IFD (IFD0) at the header's first-IFD offset
//! - up to three sub-IFDs reached through pointer tags in the primary
//!   directory (Exif 0x8769, GPS 0x8825, Interoperability 0xA005)
//! - the thumbnail IFD (IFD1) reached through the primary directory's
//!   next-offset trailer
//!
//! The shape is fixed: sub-IFDs are not searched for further pointers and
//! the thumbnail's own next-offset is not followed, so total work is
//! bounded by the input regardless of what the offsets claim. The walk
//! fails fast: the first structural error aborts the whole decode and
//! identifies the offending directory and entry.

use bytes::Bytes;

use crate::error::ExifError;
use crate::jpeg;
use crate::trace::{DecodeTrace, NoopTrace};

use super::buffer::TiffBuffer;
use super::header::TiffHeader;
use super::ifd::Ifd;
use super::tags::{ExifTag, FieldType};

/// Upper bound on directories decoded per document; the walk's fixed
/// shape never exceeds it.
pub const MAX_IFDS_PER_DOCUMENT: usize = 5;

/// A fully decoded Exif metadata tree.
///
/// Built atomically by [`ExifDocument::parse`]; immutable afterwards. No
/// partially decoded tree is ever returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExifDocument {
    /// The primary directory (IFD0), always present
    pub primary: Ifd,

    /// Exif sub-IFD, if the 0x8769 pointer tag was present
    pub exif: Option<Ifd>,

    /// GPS sub-IFD, if the 0x8825 pointer tag was present
    pub gps: Option<Ifd>,

    /// Interoperability sub-IFD, if the 0xA005 pointer tag was present
    pub interoperability: Option<Ifd>,

    /// Thumbnail directory (IFD1), if the primary's next-offset was nonzero
    pub thumbnail: Option<Ifd>,
}

impl ExifDocument {
    /// Decode an Exif document from a TIFF payload.
    ///
    /// `data` is the content of the APP1 segment after the `Exif\0\0`
    /// identifier; byte 0 must be the first byte of the TIFF header.
    pub fn parse(data: Bytes) -> Result<Self, ExifError> {
        Self::parse_traced(data, &NoopTrace)
    }

    /// Decode with a [`DecodeTrace`] sink observing progress.
    pub fn parse_traced(data: Bytes, trace: &dyn DecodeTrace) -> Result<Self, ExifError> {
        let header = TiffHeader::parse(&data)?;
        let buffer = TiffBuffer::new(data, header.byte_order);

        let primary = Ifd::parse_at_traced(&buffer, header.first_ifd_offset, trace)?;

        let exif = Self::linked_ifd(&buffer, &primary, ExifTag::ExifIfdPointer, trace)?;
        let gps = Self::linked_ifd(&buffer, &primary, ExifTag::GpsIfdPointer, trace)?;
        let interoperability =
            Self::linked_ifd(&buffer, &primary, ExifTag::InteroperabilityIfdPointer, trace)?;

        let thumbnail = if primary.next_offset != 0 {
            trace.directory_linked(None, primary.next_offset);
            Some(Ifd::parse_at_traced(&buffer, primary.next_offset, trace)?)
        } else {
            None
        };

        Ok(ExifDocument {
            primary,
            exif,
            gps,
            interoperability,
            thumbnail,
        })
    }

    /// Locate the Exif APP1 segment in a whole JPEG stream and decode it.
    pub fn from_jpeg(data: &[u8]) -> Result<Self, ExifError> {
        Self::from_jpeg_traced(data, &NoopTrace)
    }

    /// [`ExifDocument::from_jpeg`] with a trace sink.
    pub fn from_jpeg_traced(data: &[u8], trace: &dyn DecodeTrace) -> Result<Self, ExifError> {
        let payload = jpeg::locate_exif_segment(data)?;
        Self::parse_traced(payload, trace)
    }

    /// Decode the sub-IFD a pointer tag refers to, if the tag is present.
    ///
    /// The pointer must be a single SHORT or LONG holding the
    /// sub-directory's absolute offset.
    fn linked_ifd(
        buffer: &TiffBuffer,
        primary: &Ifd,
        tag: ExifTag,
        trace: &dyn DecodeTrace,
    ) -> Result<Option<Ifd>, ExifError> {
        let entry = match primary.get_tag(tag) {
            Some(entry) => entry,
            None => return Ok(None),
        };

        let not_a_pointer = || ExifError::InvalidIfdPointer {
            tag: tag.as_u16(),
            field_type: entry.value.field_type,
            count: entry.count,
        };

        if entry.count != 1
            || !matches!(entry.value.field_type, FieldType::Short | FieldType::Long)
        {
            return Err(not_a_pointer());
        }
        let offset = entry.value.uint(0).ok_or_else(not_a_pointer)? as u32;

        trace.directory_linked(Some(tag.as_u16()), offset);
        Ifd::parse_at_traced(buffer, offset, trace).map(Some)
    }

    /// All directories in the document, with stable names, in walk order.
    pub fn directories(&self) -> impl Iterator<Item = (&'static str, &Ifd)> {
        [
            Some(("primary", &self.primary)),
            self.exif.as_ref().map(|d| ("exif", d)),
            self.gps.as_ref().map(|d| ("gps", d)),
            self.interoperability.as_ref().map(|d| ("interoperability", d)),
            self.thumbnail.as_ref().map(|d| ("thumbnail", d)),
        ]
        .into_iter()
        .flatten()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a little-endian TIFF payload: header pointing at offset 8,
    /// followed by the supplied body (body byte 0 sits at offset 8).
    fn tiff(body: &[u8]) -> Bytes {
        let mut data = vec![
            0x49, 0x49, // II
            0x2A, 0x00, // version 42
            0x08, 0x00, 0x00, 0x00, // first IFD at 8
        ];
        data.extend_from_slice(body);
        Bytes::from(data)
    }

    #[test]
    fn test_minimal_document() {
        // Empty IFD0, no chain
        let data = tiff(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        let doc = ExifDocument::parse(data).unwrap();

        assert!(doc.primary.is_empty());
        assert!(doc.exif.is_none());
        assert!(doc.gps.is_none());
        assert!(doc.interoperability.is_none());
        assert!(doc.thumbnail.is_none());
    }

    #[test]
    fn test_exif_pointer_followed() {
        // IFD0 at 8: one entry, Exif pointer -> offset 26; sub-IFD at 26
        let data = tiff(&[
            0x01, 0x00, // count
            0x69, 0x87, // tag 0x8769
            0x04, 0x00, // LONG
            0x01, 0x00, 0x00, 0x00, // count 1
            0x1A, 0x00, 0x00, 0x00, // offset 26
            0x00, 0x00, 0x00, 0x00, // next
            // sub-IFD at offset 26: one SHORT entry
            0x01, 0x00, //
            0x00, 0x90, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00, 0x2A, 0x00, 0x00, 0x00, //
            0x00, 0x00, 0x00, 0x00,
        ]);
        let doc = ExifDocument::parse(data).unwrap();

        let exif = doc.exif.expect("exif sub-IFD");
        assert_eq!(exif.offset, 26);
        assert_eq!(exif.entries[0].value.uint(0), Some(42));
        assert!(doc.gps.is_none());
        assert!(doc.interoperability.is_none());
    }

    #[test]
    fn test_thumbnail_via_next_offset() {
        // IFD0 at 8 (empty, next -> 14), IFD1 at 14 (empty, next 0)
        let data = tiff(&[
            0x00, 0x00, 0x0E, 0x00, 0x00, 0x00, // IFD0
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // IFD1
        ]);
        let doc = ExifDocument::parse(data).unwrap();

        let thumb = doc.thumbnail.expect("thumbnail IFD");
        assert_eq!(thumb.offset, 14);
        assert_eq!(thumb.next_offset, 0);
    }

    #[test]
    fn test_thumbnail_chain_not_followed_past_ifd1() {
        // IFD1 claims a further next-offset; it is recorded, not decoded
        let data = tiff(&[
            0x00, 0x00, 0x0E, 0x00, 0x00, 0x00, // IFD0 -> 14
            0x00, 0x00, 0xFF, 0xFF, 0xFF, 0x7F, // IFD1 -> nonsense offset
        ]);
        let doc = ExifDocument::parse(data).unwrap();
        assert_eq!(doc.thumbnail.unwrap().next_offset, 0x7FFF_FFFF);
    }

    #[test]
    fn test_bad_sub_ifd_fails_fast() {
        // Exif pointer aims past the end of the buffer
        let data = tiff(&[
            0x01, 0x00, //
            0x69, 0x87, 0x04, 0x00, 0x01, 0x00, 0x00, 0x00, 0xFF, 0x00, 0x00, 0x00, //
            0x00, 0x00, 0x00, 0x00,
        ]);
        let result = ExifDocument::parse(data);
        assert!(matches!(result, Err(ExifError::TruncatedInput { .. })));
    }

    #[test]
    fn test_pointer_with_wrong_shape_rejected() {
        // Exif pointer declared as ASCII count 4
        let data = tiff(&[
            0x01, 0x00, //
            0x69, 0x87, 0x02, 0x00, 0x04, 0x00, 0x00, 0x00, 0x1A, 0x00, 0x00, 0x00, //
            0x00, 0x00, 0x00, 0x00,
        ]);
        let result = ExifDocument::parse(data);
        assert!(matches!(
            result,
            Err(ExifError::InvalidIfdPointer { tag: 0x8769, .. })
        ));
    }

    #[test]
    fn test_decode_is_deterministic() {
        let data = tiff(&[
            0x01, 0x00, //
            0x12, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, //
            0x00, 0x00, 0x00, 0x00,
        ]);
        let a = ExifDocument::parse(data.clone()).unwrap();
        let b = ExifDocument::parse(data).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_directories_iterator_names() {
        let data = tiff(&[
            0x00, 0x00, 0x0E, 0x00, 0x00, 0x00, //
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
        ]);
        let doc = ExifDocument::parse(data).unwrap();
        let names: Vec<_> = doc.directories().map(|(name, _)| name).collect();
        assert_eq!(names, ["primary", "thumbnail"]);
    }

    #[test]
    fn test_big_endian_document() {
        let data = vec![
            0x4D, 0x4D, // MM
            0x00, 0x2A, // version
            0x00, 0x00, 0x00, 0x08, // first IFD at 8
            0x00, 0x01, // count 1
            0x01, 0x12, // tag 0x0112
            0x00, 0x03, // SHORT
            0x00, 0x00, 0x00, 0x01, // count 1
            0x00, 0x06, 0x00, 0x00, // value 6 (big-endian, left-justified)
            0x00, 0x00, 0x00, 0x00, // next
        ];
        let doc = ExifDocument::parse(Bytes::from(data)).unwrap();
        assert_eq!(doc.primary.get(0x0112).unwrap().value.uint(0), Some(6));
    }
}
