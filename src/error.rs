// src/error.rs
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportIndexError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("File is empty")]
    EmptyFile,

    #[error("Malformed index header: expected signature {expected:?}, found {found:?}")]
    MalformedHeader { expected: String, found: String },

    #[error("No segment marker found; file has no directory segment")]
    NoSegments,

    #[error("Unexpected end of data at offset {offset}: needed {needed} more bytes")]
    UnexpectedEof { offset: usize, needed: usize },

    #[error("Segment {index} is not a field-index segment (file has {count} segments)")]
    SegmentOutOfRange { index: usize, count: usize },

    #[error("Segment {segment} spans {span} bytes, too short for its metadata block")]
    SegmentTooShort { segment: usize, span: usize },

    #[error("Page {page} out of range (spool has {page_count} pages)")]
    PageOutOfRange { page: usize, page_count: usize },

    #[error("Invalid field key: {0}")]
    InvalidFieldKey(String),

    #[error("Background task failed: {0}")]
    TaskJoin(String),
}

pub type Result<T> = std::result::Result<T, ReportIndexError>;
