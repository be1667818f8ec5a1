//! JPEG marker handling: locating the Exif APP1 segment.
//!
//! A JPEG stream is a sequence of `FF xx` markers, most of them followed
//! by a 2-byte big-endian length that counts itself. Exif metadata lives
//! in an APP1 segment whose payload begins with the 6-byte identifier
//! `Exif\0\0`, followed by a self-contained TIFF stream.
//!
//! The locator is deliberately thin: it verifies SOI, walks marker
//! segments until it finds the Exif APP1 (skipping JFIF APP0, XMP APP1,
//! and anything else), checks the declared length against the bytes
//! actually present, and hands the TIFF payload to the TIFF decoder.
//! Everything after the entropy-coded scan begins is out of reach — the
//! walk stops at SOS.

use bytes::Bytes;

use crate::error::ExifError;

// =============================================================================
// JPEG Markers
// =============================================================================

/// Start Of Image marker
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// End Of Image marker
pub const EOI: [u8; 2] = [0xFF, 0xD9];

/// Start Of Scan marker
pub const SOS: [u8; 2] = [0xFF, 0xDA];

/// Application segment 1 marker (Exif, XMP)
pub const APP1: [u8; 2] = [0xFF, 0xE1];

/// Identifier at the start of an Exif APP1 payload: "Exif\0\0"
pub const EXIF_IDENTIFIER: [u8; 6] = [0x45, 0x78, 0x69, 0x66, 0x00, 0x00];

/// Size of the segment length field, which counts itself.
const LENGTH_FIELD_SIZE: usize = 2;

// =============================================================================
// Segment location
// =============================================================================

/// Find the Exif APP1 segment in a JPEG stream and return its TIFF payload.
///
/// The returned [`Bytes`] start at the TIFF header (the byte after the
/// `Exif\0\0` identifier); its length is the declared segment length
/// minus the length field and the identifier.
///
/// # Errors
/// - `MalformedMarker` if the stream does not start with SOI, or no APP1
///   segment carrying the Exif identifier is found before SOS/EOI
/// - `TruncatedInput` if a segment's declared length runs past the end of
///   the supplied bytes
pub fn locate_exif_segment(data: &[u8]) -> Result<Bytes, ExifError> {
    if data.len() < SOI.len() || data[0..2] != SOI {
        return Err(ExifError::MalformedMarker {
            reason: "SOI marker not found",
        });
    }

    let mut pos = SOI.len();
    while pos + 2 <= data.len() {
        let marker = [data[pos], data[pos + 1]];
        if marker[0] != 0xFF {
            return Err(ExifError::MalformedMarker {
                reason: "expected a marker between segments",
            });
        }

        // The scan body and the end marker both terminate the search.
        if marker == SOS || marker == EOI {
            break;
        }

        // Standalone markers (TEM, RSTn) carry no length field.
        if marker[1] == 0x01 || (0xD0..=0xD7).contains(&marker[1]) {
            pos += 2;
            continue;
        }

        if pos + 4 > data.len() {
            return Err(ExifError::TruncatedInput {
                required: (pos + 4) as u64,
                actual: data.len() as u64,
            });
        }
        let declared = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        if declared < LENGTH_FIELD_SIZE {
            return Err(ExifError::MalformedMarker {
                reason: "segment length smaller than its own length field",
            });
        }

        let body_start = pos + 2 + LENGTH_FIELD_SIZE;
        let body_len = declared - LENGTH_FIELD_SIZE;
        let body_end = body_start + body_len;
        if body_end > data.len() {
            return Err(ExifError::TruncatedInput {
                required: body_end as u64,
                actual: data.len() as u64,
            });
        }

        if marker == APP1 && body_len >= EXIF_IDENTIFIER.len() {
            let body = &data[body_start..body_end];
            if body[..EXIF_IDENTIFIER.len()] == EXIF_IDENTIFIER {
                return Ok(Bytes::copy_from_slice(&body[EXIF_IDENTIFIER.len()..]));
            }
            // Non-Exif APP1 (e.g. XMP): keep scanning.
        }

        pos = body_end;
    }

    Err(ExifError::MalformedMarker {
        reason: "no Exif APP1 segment found",
    })
}

// =============================================================================
// Tests
// =============================================================================
