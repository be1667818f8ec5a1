//! Decode instrumentation hooks.
//!
//! The decoder itself is silent: instead of logging, it reports progress
//! through a [`DecodeTrace`] sink at three well-defined points. The
//! default sink does nothing; [`LogTrace`] forwards to the `tracing`
//! facade for callers that want decode diagnostics in their log output.

use tracing::{debug, trace};

use crate::tiff::tags::{ExifTag, FieldType};

/// Observer for decode progress.
///
/// All methods have empty default bodies; implement only the points of
/// interest. Implementations must not assume any call ordering beyond
/// "a directory is entered before its values are resolved".
pub trait DecodeTrace {
    /// A directory's entry count was read and its span validated.
    fn directory_entered(&self, offset: u32, entry_count: u16) {
        let _ = (offset, entry_count);
    }

    /// An entry's value was materialized.
    fn value_resolved(&self, tag: u16, field_type: FieldType, length: u64, inline: bool) {
        let _ = (tag, field_type, length, inline);
    }

    /// A sub-directory or chained directory is about to be decoded.
    ///
    /// `tag` is `None` for the thumbnail directory reached via the
    /// next-IFD trailer rather than a pointer tag.
    fn directory_linked(&self, tag: Option<u16>, offset: u32) {
        let _ = (tag, offset);
    }
}

/// The default sink: ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTrace;

impl DecodeTrace for NoopTrace {}

/// A sink that forwards decode progress to `tracing`.
///
/// Directory-level events log at debug, per-value events at trace.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrace;

impl DecodeTrace for LogTrace {
    fn directory_entered(&self, offset: u32, entry_count: u16) {
        debug!(offset, entry_count, "entering IFD");
    }

    fn value_resolved(&self, tag: u16, field_type: FieldType, length: u64, inline: bool) {
        let name = ExifTag::from_u16(tag);
        trace!(tag, ?name, ?field_type, length, inline, "resolved value");
    }

    fn directory_linked(&self, tag: Option<u16>, offset: u32) {
        match tag {
            Some(tag) => debug!(tag, offset, "following sub-IFD"),
            None => debug!(offset, "following next-IFD chain"),
        }
    }
}
