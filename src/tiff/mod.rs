//! TIFF decoding for Exif streams.
//!
//! The Exif payload of a JPEG APP1 segment is a self-contained TIFF
//! stream: a small header that fixes the byte order and points at the
//! primary IFD, then directories whose entries hold values either inline
//! or at offsets elsewhere in the same buffer.
//!
//! # Key Concepts
//!
//! - **Byte order**: declared in the first two header bytes (II =
//!   little-endian, MM = big-endian); every multi-byte value is read in
//!   that order.
//!
//! - **Bounds discipline**: all offsets are positions inside one
//!   [`TiffBuffer`]; every dereference goes through its single
//!   bounds-checked accessor, so offset arithmetic is verified in one
//!   place.
//!
//! - **Inline vs offset values**: a value of `count * type_size <= 4`
//!   bytes is stored in the entry's 4-byte field; anything larger is
//!   stored elsewhere and the field holds its offset.
//!
//! - **Document shape**: primary IFD, up to three sub-IFDs reached by
//!   pointer tags, and a thumbnail IFD reached by the next-IFD trailer.

pub mod buffer;
pub mod document;
pub mod header;
pub mod ifd;
pub mod tags;
pub mod values;

pub use buffer::TiffBuffer;
pub use document::{ExifDocument, MAX_IFDS_PER_DOCUMENT};
pub use header::{ByteOrder, TiffHeader, TIFF_HEADER_SIZE};
pub use ifd::{Ifd, IfdEntry, IFD_ENTRY_SIZE};
pub use tags::{ExifTag, FieldType};
pub use values::{ResolvedValue, INLINE_VALUE_SIZE};
