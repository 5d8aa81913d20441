// src/diagnostics.rs
//! Non-fatal conditions found while decoding.
//!
//! Legacy files routinely under-report counts or carry stray records. Rather than
//! failing, decoders keep going and attach a [`Diagnostic`] to their result so
//! automated callers can detect a degraded parse.

use crate::metadata::FieldKey;
use thiserror::Error;

/// A recoverable anomaly observed while reading an index or spool file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    #[error("header signature mismatch (found {found:?}); segments scanned heuristically")]
    MalformedHeader { found: String },

    #[error("header declares {declared} segments but {discovered} were discovered")]
    SegmentCountMismatch { declared: u16, discovered: usize },

    #[error("segment {segment} declares {declared} entries but only {decoded} fit")]
    TruncatedSegment { segment: usize, declared: u16, decoded: usize },

    #[error("field {key} is not indexed in this file")]
    FieldNotIndexed { key: FieldKey },

    #[error("directory points at segment {target} but only {discovered} segments exist")]
    DanglingDirectoryReference { target: u8, discovered: usize },

    #[error("spool file uses neither form-feed nor carriage-control paging")]
    UnsupportedSpoolFormat,

    #[error("segment {segment} holds field {found}, directory routed {expected} to it")]
    SegmentIdentityMismatch { segment: usize, expected: FieldKey, found: FieldKey },

    #[error("query of {query_len} bytes cannot fit field width {field_width} in segment {segment}")]
    QueryWiderThanField { segment: usize, field_width: u16, query_len: usize },

    #[error("directory segment has {bytes} trailing bytes after its last record")]
    DirectoryTrailingBytes { bytes: usize },

    #[error("segment {segment} spans {span} bytes, too short for its metadata block")]
    SegmentTooShort { segment: usize, span: usize },

    #[error("segment {segment} could not be decoded: {reason}")]
    SegmentUndecodable { segment: usize, reason: String },
}

impl Diagnostic {
    /// Log this diagnostic at warn level and hand it back
    pub(crate) fn emit(self) -> Self {
        tracing::warn!(diagnostic = %self, "degraded parse");
        self
    }
}

/// A successful result plus every diagnostic produced while computing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Outcome<T> {
    pub fn new(value: T) -> Self {
        Outcome { value, diagnostics: Vec::new() }
    }

    pub fn with_diagnostics(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Outcome { value, diagnostics }
    }

    /// True when nothing went wrong
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn has(&self, predicate: impl Fn(&Diagnostic) -> bool) -> bool {
        self.diagnostics.iter().any(predicate)
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome { value: f(self.value), diagnostics: self.diagnostics }
    }
}
