//! IFD entry value resolution.
//!
//! Each 12-byte directory entry carries a 4-byte field that is either the
//! value itself (when the value fits) or a u32 offset to where the value
//! lives elsewhere in the TIFF buffer. This module owns that split:
//!
//! - `count × type_size ≤ 4` → inline, taken straight from the entry field
//! - `count × type_size > 4` → indirect, fetched through the buffer's
//!   bounds-checked accessor; a range that leaves the buffer is an error,
//!   never a truncated read
//!
//! The materialized [`ResolvedValue`] also provides the typed accessors a
//! caller uses to interpret entries (integers, rationals, ASCII strings).
//! Accessors return `None` on a type or index mismatch; they never panic.

use bytes::Bytes;

use crate::error::ExifError;

use super::buffer::TiffBuffer;
use super::header::ByteOrder;
use super::tags::FieldType;

/// Maximum bytes an entry's 4-byte field can hold inline.
pub const INLINE_VALUE_SIZE: u64 = 4;

// =============================================================================
// ResolvedValue
// =============================================================================

/// A fully materialized entry value.
///
/// Holds `count × size_in_bytes(field_type)` bytes, copied out of the
/// entry field or the indirect range at resolve time, along with enough
/// context to interpret them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedValue {
    /// Declared field type
    pub field_type: FieldType,

    /// Declared element count (0 is valid and yields empty bytes)
    pub count: u32,

    /// The value bytes, in the stream's byte order
    bytes: Bytes,

    /// Byte order used to interpret multi-byte elements
    byte_order: ByteOrder,

    /// Whether the value was stored inline in the entry field
    inline: bool,
}

impl ResolvedValue {
    /// Resolve an entry's value from its type code, count, and 4-byte field.
    ///
    /// # Errors
    /// - `UnsupportedType` if the type code is outside the standard table
    /// - `OffsetOutOfRange` if an indirect value's range leaves the buffer
    pub fn resolve(
        buffer: &TiffBuffer,
        field_type_raw: u16,
        count: u32,
        raw_field: [u8; 4],
    ) -> Result<Self, ExifError> {
        let field_type = FieldType::from_u16(field_type_raw)
            .ok_or(ExifError::UnsupportedType(field_type_raw))?;

        let length = count as u64 * field_type.size_in_bytes();
        let byte_order = buffer.byte_order();

        let (bytes, inline) = if length <= INLINE_VALUE_SIZE {
            (Bytes::copy_from_slice(&raw_field[..length as usize]), true)
        } else {
            let offset = byte_order.read_u32(&raw_field) as u64;
            (buffer.slice_owned(offset, length)?, false)
        };

        Ok(ResolvedValue {
            field_type,
            count,
            bytes,
            byte_order,
            inline,
        })
    }

    /// The raw value bytes, `count × type_size` long.
    #[inline]
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Whether the value was stored inline in the entry's 4-byte field.
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.inline
    }

    /// Total byte length of the value.
    #[inline]
    pub fn byte_len(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Borrow the bytes of element `index`, if in range.
    fn element(&self, index: u32) -> Option<&[u8]> {
        if index >= self.count {
            return None;
        }
        let size = self.field_type.size_in_bytes() as usize;
        let start = index as usize * size;
        self.bytes.get(start..start + size)
    }

    /// Element `index` as an unsigned integer, widening BYTE/SHORT/LONG.
    ///
    /// Returns `None` for non-unsigned-integer types or an out-of-range
    /// index.
    pub fn uint(&self, index: u32) -> Option<u64> {
        let el = self.element(index)?;
        match self.field_type {
            FieldType::Byte => Some(el[0] as u64),
            FieldType::Short => Some(self.byte_order.read_u16(el) as u64),
            FieldType::Long => Some(self.byte_order.read_u32(el) as u64),
            _ => None,
        }
    }

    /// Element `index` as a u32, when the type is SHORT or LONG.
    pub fn as_u32(&self, index: u32) -> Option<u32> {
        let el = self.element(index)?;
        match self.field_type {
            FieldType::Short => Some(self.byte_order.read_u16(el) as u32),
            FieldType::Long => Some(self.byte_order.read_u32(el)),
            _ => None,
        }
    }

    /// Element `index` as a signed integer, widening SBYTE/SSHORT/SLONG.
    pub fn sint(&self, index: u32) -> Option<i64> {
        let el = self.element(index)?;
        match self.field_type {
            FieldType::SByte => Some(el[0] as i8 as i64),
            FieldType::SShort => Some(self.byte_order.read_u16(el) as i16 as i64),
            FieldType::SLong => Some(self.byte_order.read_u32(el) as i32 as i64),
            _ => None,
        }
    }

    /// Element `index` as an unsigned (numerator, denominator) pair.
    pub fn rational(&self, index: u32) -> Option<(u32, u32)> {
        if self.field_type != FieldType::Rational {
            return None;
        }
        let el = self.element(index)?;
        Some((
            self.byte_order.read_u32(&el[0..4]),
            self.byte_order.read_u32(&el[4..8]),
        ))
    }

    /// Element `index` as a signed (numerator, denominator) pair.
    pub fn srational(&self, index: u32) -> Option<(i32, i32)> {
        if self.field_type != FieldType::SRational {
            return None;
        }
        let el = self.element(index)?;
        Some((
            self.byte_order.read_u32(&el[0..4]) as i32,
            self.byte_order.read_u32(&el[4..8]) as i32,
        ))
    }

    /// Element `index` as an f32, when the type is FLOAT.
    pub fn float(&self, index: u32) -> Option<f32> {
        if self.field_type != FieldType::Float {
            return None;
        }
        let el = self.element(index)?;
        Some(f32::from_bits(self.byte_order.read_u32(el)))
    }

    /// Element `index` as an f64, when the type is DOUBLE.
    pub fn double(&self, index: u32) -> Option<f64> {
        if self.field_type != FieldType::Double {
            return None;
        }
        let el = self.element(index)?;
        let first = self.byte_order.read_u32(&el[0..4]) as u64;
        let second = self.byte_order.read_u32(&el[4..8]) as u64;
        let bits = match self.byte_order {
            ByteOrder::LittleEndian => (second << 32) | first,
            ByteOrder::BigEndian => (first << 32) | second,
        };
        Some(f64::from_bits(bits))
    }

    /// The whole value as a string, when the type is ASCII.
    ///
    /// The trailing NUL terminator (and anything after it) is stripped;
    /// invalid UTF-8 is replaced lossily.
    pub fn as_string(&self) -> Option<String> {
        if self.field_type != FieldType::Ascii {
            return None;
        }
        let end = self
            .bytes
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.bytes.len());
        Some(String::from_utf8_lossy(&self.bytes[..end]).into_owned())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(data: &[u8], byte_order: ByteOrder) -> TiffBuffer {
        TiffBuffer::new(Bytes::copy_from_slice(data), byte_order)
    }

    fn le_buffer(data: &[u8]) -> TiffBuffer {
        buffer(data, ByteOrder::LittleEndian)
    }

    #[test]
    fn test_resolve_inline_short() {
        // One SHORT = 2 bytes, fits inline; trailing field bytes ignored
        let buf = le_buffer(&[]);
        let value = ResolvedValue::resolve(&buf, 3, 1, [0x2A, 0x00, 0xDE, 0xAD]).unwrap();

        assert!(value.is_inline());
        assert_eq!(value.byte_len(), 2);
        assert_eq!(value.uint(0), Some(42));
        assert_eq!(value.uint(1), None);
    }

    #[test]
    fn test_resolve_inline_exactly_four_bytes() {
        // One LONG = 4 bytes, the inline boundary; no indirect read even
        // though the field would be a wild offset if interpreted as one
        let buf = le_buffer(&[]);
        let value = ResolvedValue::resolve(&buf, 4, 1, [0xFF, 0xFF, 0xFF, 0xFF]).unwrap();

        assert!(value.is_inline());
        assert_eq!(value.as_u32(0), Some(0xFFFF_FFFF));
    }

    #[test]
    fn test_resolve_indirect() {
        // Three SHORTs = 6 bytes at offset 4
        let buf = le_buffer(&[0, 0, 0, 0, 0x0A, 0x00, 0x0B, 0x00, 0x0C, 0x00]);
        let value = ResolvedValue::resolve(&buf, 3, 3, [0x04, 0x00, 0x00, 0x00]).unwrap();

        assert!(!value.is_inline());
        assert_eq!(value.uint(0), Some(10));
        assert_eq!(value.uint(1), Some(11));
        assert_eq!(value.uint(2), Some(12));
    }

    #[test]
    fn test_resolve_indirect_out_of_range() {
        // Two LONGs = 8 bytes claimed at offset 6 of a 10-byte buffer
        let buf = le_buffer(&[0; 10]);
        let result = ResolvedValue::resolve(&buf, 4, 2, [0x06, 0x00, 0x00, 0x00]);

        assert!(matches!(
            result,
            Err(ExifError::OffsetOutOfRange {
                offset: 6,
                length: 8,
                size: 10,
            })
        ));
    }

    #[test]
    fn test_resolve_huge_count_rejected() {
        // count * size overflows the buffer by a wide margin but the u64
        // arithmetic never wraps
        let buf = le_buffer(&[0; 16]);
        let result = ResolvedValue::resolve(&buf, 5, u32::MAX, [0x00, 0x00, 0x00, 0x00]);
        assert!(matches!(result, Err(ExifError::OffsetOutOfRange { .. })));
    }

    #[test]
    fn test_resolve_unsupported_type() {
        let buf = le_buffer(&[]);
        let result = ResolvedValue::resolve(&buf, 13, 1, [0; 4]);
        assert!(matches!(result, Err(ExifError::UnsupportedType(13))));
    }

    #[test]
    fn test_resolve_zero_count() {
        let buf = le_buffer(&[]);
        let value = ResolvedValue::resolve(&buf, 4, 0, [0; 4]).unwrap();
        assert_eq!(value.byte_len(), 0);
        assert_eq!(value.uint(0), None);
    }

    #[test]
    fn test_ascii_string_strips_nul() {
        // "Canon\0" = 6 bytes, indirect
        let buf = le_buffer(&[0, 0, 0, 0, b'C', b'a', b'n', b'o', b'n', 0]);
        let value = ResolvedValue::resolve(&buf, 2, 6, [0x04, 0x00, 0x00, 0x00]).unwrap();
        assert_eq!(value.as_string().as_deref(), Some("Canon"));
    }

    #[test]
    fn test_ascii_inline_without_nul() {
        let buf = le_buffer(&[]);
        let value = ResolvedValue::resolve(&buf, 2, 3, [b'9', b'9', b'\0', 0]).unwrap();
        assert_eq!(value.as_string().as_deref(), Some("99"));
    }

    #[test]
    fn test_rational() {
        // 1/250 at offset 4
        let buf = le_buffer(&[
            0, 0, 0, 0, //
            0x01, 0x00, 0x00, 0x00, // numerator 1
            0xFA, 0x00, 0x00, 0x00, // denominator 250
        ]);
        let value = ResolvedValue::resolve(&buf, 5, 1, [0x04, 0x00, 0x00, 0x00]).unwrap();
        assert_eq!(value.rational(0), Some((1, 250)));
        assert_eq!(value.srational(0), None);
    }

    #[test]
    fn test_srational_negative() {
        let buf = buffer(
            &[
                0, 0, 0, 0, //
                0xFF, 0xFF, 0xFF, 0xFE, // -2
                0x00, 0x00, 0x00, 0x03, // 3
            ],
            ByteOrder::BigEndian,
        );
        let value = ResolvedValue::resolve(&buf, 10, 1, [0x00, 0x00, 0x00, 0x04]).unwrap();
        assert_eq!(value.srational(0), Some((-2, 3)));
    }

    #[test]
    fn test_sint_widening() {
        let buf = le_buffer(&[]);
        let value = ResolvedValue::resolve(&buf, 8, 1, [0xFF, 0xFF, 0, 0]).unwrap();
        assert_eq!(value.sint(0), Some(-1));
        assert_eq!(value.uint(0), None);
    }

    #[test]
    fn test_float_roundtrip() {
        let bits = 1.5f32.to_bits().to_le_bytes();
        let buf = le_buffer(&[]);
        let value = ResolvedValue::resolve(&buf, 11, 1, bits).unwrap();
        assert_eq!(value.float(0), Some(1.5));
    }

    #[test]
    fn test_double_big_endian() {
        let mut data = vec![0u8; 4];
        data.extend_from_slice(&2.25f64.to_bits().to_be_bytes());
        let buf = buffer(&data, ByteOrder::BigEndian);
        let value = ResolvedValue::resolve(&buf, 12, 1, [0x00, 0x00, 0x00, 0x04]).unwrap();
        assert_eq!(value.double(0), Some(2.25));
    }

    #[test]
    fn test_double_little_endian() {
        let mut data = vec![0u8; 4];
        data.extend_from_slice(&2.25f64.to_bits().to_le_bytes());
        let buf = le_buffer(&data);
        let value = ResolvedValue::resolve(&buf, 12, 1, [0x04, 0x00, 0x00, 0x00]).unwrap();
        assert_eq!(value.double(0), Some(2.25));
    }

    #[test]
    fn test_accessor_type_mismatch_is_none() {
        let buf = le_buffer(&[]);
        let value = ResolvedValue::resolve(&buf, 3, 1, [0x01, 0x00, 0, 0]).unwrap();
        assert_eq!(value.as_string(), None);
        assert_eq!(value.rational(0), None);
        assert_eq!(value.float(0), None);
    }
}
