//! TIFF field types and Exif tag vocabulary.
//!
//! Field types determine how many bytes one value element occupies, which
//! in turn decides whether an entry's value is stored inline in its 4-byte
//! field or indirectly at an offset. The full 12-code table from the TIFF
//! 6.0 specification is implemented; an unrecognized code is a hard error
//! rather than a guessed size.

// =============================================================================
// TIFF Field Types
// =============================================================================

/// TIFF field types that determine how values are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum FieldType {
    /// Unsigned 8-bit integer (1 byte)
    Byte = 1,

    /// 8-bit ASCII character, NUL-terminated strings (1 byte)
    Ascii = 2,

    /// Unsigned 16-bit integer (2 bytes)
    Short = 3,

    /// Unsigned 32-bit integer (4 bytes)
    Long = 4,

    /// Unsigned fraction: two LONGs, numerator then denominator (8 bytes)
    Rational = 5,

    /// Signed 8-bit integer (1 byte)
    SByte = 6,

    /// Opaque byte data (1 byte per element)
    Undefined = 7,

    /// Signed 16-bit integer (2 bytes)
    SShort = 8,

    /// Signed 32-bit integer (4 bytes)
    SLong = 9,

    /// Signed fraction: two SLONGs (8 bytes)
    SRational = 10,

    /// IEEE 754 single-precision float (4 bytes)
    Float = 11,

    /// IEEE 754 double-precision float (8 bytes)
    Double = 12,
}

impl FieldType {
    /// Size of a single value of this type in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> u64 {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::SByte | FieldType::Undefined => 1,
            FieldType::Short | FieldType::SShort => 2,
            FieldType::Long | FieldType::SLong | FieldType::Float => 4,
            FieldType::Rational | FieldType::SRational | FieldType::Double => 8,
        }
    }

    /// Create a FieldType from its numeric code.
    ///
    /// Returns `None` for codes outside the standard table; the resolver
    /// turns that into `UnsupportedType` rather than assuming a size.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(FieldType::Byte),
            2 => Some(FieldType::Ascii),
            3 => Some(FieldType::Short),
            4 => Some(FieldType::Long),
            5 => Some(FieldType::Rational),
            6 => Some(FieldType::SByte),
            7 => Some(FieldType::Undefined),
            8 => Some(FieldType::SShort),
            9 => Some(FieldType::SLong),
            10 => Some(FieldType::SRational),
            11 => Some(FieldType::Float),
            12 => Some(FieldType::Double),
            _ => None,
        }
    }

    /// Get the numeric type code.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

// =============================================================================
// Exif Tags
// =============================================================================

/// Tag IDs with well-known meanings in Exif streams.
///
/// The three IFD pointer tags drive the directory walk; the rest are the
/// common vocabulary a caller is likely to look up. Tags not listed here
/// are still decoded and reachable by numeric lookup; they are simply
/// anonymous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ExifTag {
    // -------------------------------------------------------------------------
    // Primary IFD (IFD0)
    // -------------------------------------------------------------------------
    /// Image width in pixels
    ImageWidth = 0x0100,

    /// Image height in pixels
    ImageLength = 0x0101,

    /// Compression scheme (thumbnail IFD: 6 = JPEG)
    Compression = 0x0103,

    /// Camera manufacturer
    Make = 0x010F,

    /// Camera model
    Model = 0x0110,

    /// Image orientation (1 = normal)
    Orientation = 0x0112,

    /// Pixels per resolution unit, X direction
    XResolution = 0x011A,

    /// Pixels per resolution unit, Y direction
    YResolution = 0x011B,

    /// Unit of resolution (2 = inch, 3 = centimeter)
    ResolutionUnit = 0x0128,

    /// Recording software / firmware
    Software = 0x0131,

    /// File change date and time, "YYYY:MM:DD HH:MM:SS"
    DateTime = 0x0132,

    /// Chroma sample positioning
    YCbCrPositioning = 0x0213,

    // -------------------------------------------------------------------------
    // Sub-IFD pointers
    // -------------------------------------------------------------------------
    /// Offset of the Exif sub-IFD
    ExifIfdPointer = 0x8769,

    /// Offset of the GPS sub-IFD
    GpsIfdPointer = 0x8825,

    /// Offset of the Interoperability sub-IFD
    InteroperabilityIfdPointer = 0xA005,

    // -------------------------------------------------------------------------
    // Exif sub-IFD
    // -------------------------------------------------------------------------
    /// Exposure time in seconds (RATIONAL)
    ExposureTime = 0x829A,

    /// F-number (RATIONAL)
    FNumber = 0x829D,

    /// ISO speed ratings
    IsoSpeedRatings = 0x8827,

    /// Exif version (UNDEFINED, 4 ASCII digits)
    ExifVersion = 0x9000,

    /// Date and time of original capture
    DateTimeOriginal = 0x9003,

    /// Lens focal length in millimeters (RATIONAL)
    FocalLength = 0x920A,

    /// Image width of the meaningful area
    PixelXDimension = 0xA002,

    /// Image height of the meaningful area
    PixelYDimension = 0xA003,

    // -------------------------------------------------------------------------
    // GPS sub-IFD
    // -------------------------------------------------------------------------
    /// 'N' or 'S'
    GpsLatitudeRef = 0x0001,

    /// Latitude as three RATIONALs: degrees, minutes, seconds
    GpsLatitude = 0x0002,

    /// 'E' or 'W'
    GpsLongitudeRef = 0x0003,

    /// Longitude as three RATIONALs
    GpsLongitude = 0x0004,

    // -------------------------------------------------------------------------
    // Thumbnail IFD (IFD1)
    // -------------------------------------------------------------------------
    /// Offset of the embedded thumbnail's JPEG stream
    JpegInterchangeFormat = 0x0201,

    /// Byte length of the embedded thumbnail's JPEG stream
    JpegInterchangeFormatLength = 0x0202,
}

impl ExifTag {
    /// Create an ExifTag from its numeric value.
    ///
    /// Returns `None` for unrecognized tags. Unknown tags are not an
    /// error; their entries decode like any other.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0100 => Some(ExifTag::ImageWidth),
            0x0101 => Some(ExifTag::ImageLength),
            0x0103 => Some(ExifTag::Compression),
            0x010F => Some(ExifTag::Make),
            0x0110 => Some(ExifTag::Model),
            0x0112 => Some(ExifTag::Orientation),
            0x011A => Some(ExifTag::XResolution),
            0x011B => Some(ExifTag::YResolution),
            0x0128 => Some(ExifTag::ResolutionUnit),
            0x0131 => Some(ExifTag::Software),
            0x0132 => Some(ExifTag::DateTime),
            0x0213 => Some(ExifTag::YCbCrPositioning),
            0x8769 => Some(ExifTag::ExifIfdPointer),
            0x8825 => Some(ExifTag::GpsIfdPointer),
            0xA005 => Some(ExifTag::InteroperabilityIfdPointer),
            0x829A => Some(ExifTag::ExposureTime),
            0x829D => Some(ExifTag::FNumber),
            0x8827 => Some(ExifTag::IsoSpeedRatings),
            0x9000 => Some(ExifTag::ExifVersion),
            0x9003 => Some(ExifTag::DateTimeOriginal),
            0x920A => Some(ExifTag::FocalLength),
            0xA002 => Some(ExifTag::PixelXDimension),
            0xA003 => Some(ExifTag::PixelYDimension),
            0x0001 => Some(ExifTag::GpsLatitudeRef),
            0x0002 => Some(ExifTag::GpsLatitude),
            0x0003 => Some(ExifTag::GpsLongitudeRef),
            0x0004 => Some(ExifTag::GpsLongitude),
            0x0201 => Some(ExifTag::JpegInterchangeFormat),
            0x0202 => Some(ExifTag::JpegInterchangeFormatLength),
            _ => None,
        }
    }

    /// Get the numeric tag ID.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

// =============================================================================
// Tests
// =============================================================================
