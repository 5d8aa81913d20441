// src/segment/header.rs
use crate::error::{ReportIndexError, Result};
use crate::utils::{decode_printable_utf16_le, decode_utf16_le_lossy, encode_utf16_le, ByteCursor};

/// Parsed fixed header of an index file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexFileInfo {
    /// Flags/type word at offset 16, passed through untouched
    pub flags: u16,
    /// Number of segments the header claims the file holds
    pub segment_count: u16,
    /// File size / trailing offset at offset 20, passed through untouched
    pub trailing_offset: u32,
    /// Generation date, empty when the header region is blank or garbage
    pub date: String,
}

impl IndexFileInfo {
    pub const SIGNATURE_LEN: usize = 12;
    pub const FLAGS_OFFSET: usize = 16;
    pub const SEGMENT_COUNT_OFFSET: usize = 18;
    pub const TRAILING_OFFSET: usize = 20;
    pub const DATE_OFFSET: usize = 24;
    pub const DATE_LEN: usize = 32;
    /// Smallest buffer that carries every integer field
    pub const MIN_SIZE: usize = 24;

    /// Decode the header, verifying the leading signature.
    ///
    /// The date region is optional: a short buffer or unreadable bytes give an
    /// empty date rather than an error.
    pub fn parse(buf: &[u8], signature: &str) -> Result<Self> {
        let mut expected = encode_utf16_le(signature);
        expected.resize(Self::SIGNATURE_LEN, 0);

        let found = &buf[..buf.len().min(Self::SIGNATURE_LEN)];
        if found != expected.as_slice() {
            return Err(ReportIndexError::MalformedHeader {
                expected: signature.to_string(),
                found: decode_utf16_le_lossy(found),
            });
        }

        let mut cursor = ByteCursor::new(buf);
        cursor.skip(Self::FLAGS_OFFSET)?;
        let flags = cursor.read_u16()?;
        let segment_count = cursor.read_u16()?;
        let trailing_offset = cursor.read_u32()?;

        let date = buf
            .get(Self::DATE_OFFSET..buf.len().min(Self::DATE_OFFSET + Self::DATE_LEN))
            .map(decode_printable_utf16_le)
            .unwrap_or_default();

        Ok(IndexFileInfo {
            flags,
            segment_count,
            trailing_offset,
            date,
        })
    }
}
