//! TIFF header parsing.
//!
//! The Exif payload of an APP1 segment is a self-contained TIFF stream.
//! Its 8-byte header establishes everything the rest of the decode needs:
//!
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Version (42 = 0x002A), read in the declared byte order
//! Bytes 4-7: Offset to the first IFD, relative to byte 0 of this header
//! ```
//!
//! The first-IFD offset is returned unvalidated; bounds are enforced when
//! the offset is actually dereferenced through [`TiffBuffer`].
//!
//! [`TiffBuffer`]: super::buffer::TiffBuffer

use crate::error::ExifError;

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Magic bytes indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// TIFF version constant
const VERSION_TIFF: u16 = 0x002A;

/// Size of the TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of a TIFF stream.
///
/// Declared in the first two bytes of the header; every multi-byte value
/// in the stream must be read respecting this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Read a u16 from the first two bytes of a slice using this byte order.
    ///
    /// # Panics
    /// Panics if the slice has fewer than 2 bytes.
    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        match self {
            ByteOrder::LittleEndian => u16::from_le_bytes([bytes[0], bytes[1]]),
            ByteOrder::BigEndian => u16::from_be_bytes([bytes[0], bytes[1]]),
        }
    }

    /// Read a u32 from the first four bytes of a slice using this byte order.
    ///
    /// # Panics
    /// Panics if the slice has fewer than 4 bytes.
    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        match self {
            ByteOrder::LittleEndian => {
                u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
            }
            ByteOrder::BigEndian => u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        }
    }
}

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF header: byte order plus the location of the primary IFD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values in the stream
    pub byte_order: ByteOrder,

    /// Absolute offset of the first IFD within the TIFF buffer
    pub first_ifd_offset: u32,
}

impl TiffHeader {
    /// Parse a TIFF header from raw bytes.
    ///
    /// Pure function of the input; no bounds are implied for
    /// `first_ifd_offset` beyond what the IFD decoder later enforces.
    ///
    /// # Errors
    /// - `TruncatedInput` if fewer than 8 bytes are supplied
    /// - `InvalidTiffHeader` if the endian marker is neither II nor MM,
    ///   or the version constant is not 0x002A
    pub fn parse(bytes: &[u8]) -> Result<Self, ExifError> {
        if bytes.len() < TIFF_HEADER_SIZE {
            return Err(ExifError::TruncatedInput {
                required: TIFF_HEADER_SIZE as u64,
                actual: bytes.len() as u64,
            });
        }

        // The endian marker is two identical bytes, so the read order used
        // to inspect it does not matter.
        let magic = u16::from_le_bytes([bytes[0], bytes[1]]);
        let byte_order = match magic {
            BYTE_ORDER_LITTLE_ENDIAN => ByteOrder::LittleEndian,
            BYTE_ORDER_BIG_ENDIAN => ByteOrder::BigEndian,
            _ => {
                return Err(ExifError::InvalidTiffHeader {
                    field: "endian marker",
                    found: magic,
                })
            }
        };

        let version = byte_order.read_u16(&bytes[2..4]);
        if version != VERSION_TIFF {
            return Err(ExifError::InvalidTiffHeader {
                field: "version",
                found: version,
            });
        }

        let first_ifd_offset = byte_order.read_u32(&bytes[4..8]);

        Ok(TiffHeader {
            byte_order,
            first_ifd_offset,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
