//! # Exif Probe
//!
//! Decoder for Exif metadata embedded in a JPEG image's APP1 segment.
//!
//! An Exif block is a self-contained TIFF stream: a header that declares
//! byte order and points at the primary Image File Directory (IFD),
//! directories whose entries store values inline or behind offsets, tag
//! pointers to Exif/GPS/Interoperability sub-directories, and a
//! next-directory link to the thumbnail IFD. All of those offsets and
//! counts come from the untrusted input itself, so every dereference is
//! bounds-checked and every structural violation is reported as a
//! classified error instead of a panic or a truncated read.
//!
//! ## Architecture
//!
//! - [`jpeg`] - JPEG marker walk that locates the Exif APP1 segment
//! - [`tiff`] - TIFF header, byte arena, IFD decoder, and document walk
//! - [`trace`] - optional instrumentation hooks for decode progress
//! - [`error`] - the error taxonomy
//! - [`config`] - CLI types for the `exif-probe` binary
//!
//! ## Example
//!
//! ```rust
//! use exif_probe::{ExifDocument, ExifTag};
//!
//! # fn main() -> Result<(), exif_probe::ExifError> {
//! # let jpeg_bytes: Vec<u8> = {
//! #     let tiff = [
//! #         0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00,
//! #         0x01, 0x00, 0x12, 0x01, 0x03, 0x00, 0x01, 0x00,
//! #         0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00,
//! #         0x00, 0x00,
//! #     ];
//! #     let mut v = vec![0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x22];
//! #     v.extend_from_slice(b"Exif\x00\x00");
//! #     v.extend_from_slice(&tiff);
//! #     v
//! # };
//! let document = ExifDocument::from_jpeg(&jpeg_bytes)?;
//!
//! if let Some(entry) = document.primary.get_tag(ExifTag::Orientation) {
//!     println!("orientation: {:?}", entry.value.uint(0));
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod jpeg;
pub mod tiff;
pub mod trace;

// Re-export commonly used types
pub use config::Config;
pub use error::ExifError;
pub use jpeg::{locate_exif_segment, APP1, EOI, EXIF_IDENTIFIER, SOI, SOS};
pub use tiff::{
    ByteOrder, ExifDocument, ExifTag, FieldType, Ifd, IfdEntry, ResolvedValue, TiffBuffer,
    TiffHeader, IFD_ENTRY_SIZE, INLINE_VALUE_SIZE, MAX_IFDS_PER_DOCUMENT, TIFF_HEADER_SIZE,
};
pub use trace::{DecodeTrace, LogTrace, NoopTrace};
