// src/metadata/field_index.rs
use crate::diagnostics::Diagnostic;
use crate::error::{ReportIndexError, Result};
use crate::metadata::FieldKey;
use crate::segment::SegmentLocation;
use crate::utils::{decode_text_lossy, trim_padding, ByteCursor};
use bytes::Bytes;

/// One value-to-page mapping inside a field-index segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Leading length/marker word, passed through untouched
    pub length: u16,
    /// Value with its right padding removed
    pub value: Bytes,
    pub page: u16,
    /// Opaque trailing bytes
    pub flags: [u8; 3],
}

impl IndexEntry {
    pub fn value_str(&self) -> String {
        decode_text_lossy(&self.value)
    }
}

/// Decoded metadata and entry list of one field's value index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIndexSegment {
    pub segment: usize,
    pub page_start: u16,
    pub line_id: u16,
    pub field_id: u16,
    /// Width in bytes of every value slot
    pub field_width: u16,
    /// Entry count declared by the metadata block
    pub entry_count: u16,
    /// Entries that actually fit in the segment, in on-disk order
    pub entries: Vec<IndexEntry>,
    /// Entries are in non-decreasing value order
    pub sorted: bool,
    /// Anomalies found while decoding this segment
    pub diagnostics: Vec<Diagnostic>,
}

impl FieldIndexSegment {
    /// Metadata block offset from the end of the marker
    pub const METADATA_OFFSET: usize = 24;
    pub const METADATA_LEN: usize = 16;
    /// Bytes per entry on top of the value slot: length(2) + page(2) + flags(3)
    pub const ENTRY_OVERHEAD: usize = 7;

    const LINE_ID: usize = 2;
    const FIELD_ID: usize = 6;
    const FIELD_WIDTH: usize = 10;
    const ENTRY_COUNT: usize = 14;

    /// Decode one segment from the shared file buffer.
    ///
    /// Values are zero-copy slices of `data`. Entries are decoded until the
    /// declared count is reached or the span runs out; a shortfall is recorded
    /// as a truncation diagnostic, never an error.
    pub fn decode(data: &Bytes, location: &SegmentLocation) -> Result<Self> {
        let span = &data[..location.data_end];
        let base = location.data_start + Self::METADATA_OFFSET;
        let entries_start = base + Self::METADATA_LEN;

        if entries_start > location.data_end {
            return Err(ReportIndexError::SegmentTooShort {
                segment: location.index,
                span: location.len(),
            });
        }

        let mut cursor = ByteCursor::new(span);
        let page_start = cursor.peek_u16_at(base)?;
        let line_id = cursor.peek_u16_at(base + Self::LINE_ID)?;
        let field_id = cursor.peek_u16_at(base + Self::FIELD_ID)?;
        let field_width = cursor.peek_u16_at(base + Self::FIELD_WIDTH)?;
        let entry_count = cursor.peek_u16_at(base + Self::ENTRY_COUNT)?;

        let width = field_width as usize;
        let entry_size = width + Self::ENTRY_OVERHEAD;
        let fit = (location.data_end - entries_start) / entry_size;
        let decodable = fit.min(entry_count as usize);

        cursor.seek(entries_start);
        let mut entries = Vec::with_capacity(decodable);
        for _ in 0..decodable {
            let length = cursor.read_u16()?;
            let value_start = cursor.position();
            let raw = cursor.read_bytes(width)?;
            let value = data.slice(value_start..value_start + trim_padding(raw).len());
            let page = cursor.read_u16()?;
            let flags = cursor.read_array::<3>()?;
            entries.push(IndexEntry { length, value, page, flags });
        }

        let mut diagnostics = Vec::new();
        if decodable < entry_count as usize {
            diagnostics.push(
                Diagnostic::TruncatedSegment {
                    segment: location.index,
                    declared: entry_count,
                    decoded: decodable,
                }
                .emit(),
            );
        }

        let sorted = entries.windows(2).all(|pair| pair[0].value <= pair[1].value);

        Ok(FieldIndexSegment {
            segment: location.index,
            page_start,
            line_id,
            field_id,
            field_width,
            entry_count,
            entries,
            sorted,
            diagnostics,
        })
    }

    pub fn key(&self) -> FieldKey {
        FieldKey::new(self.line_id, self.field_id)
    }

    pub fn entry_size(&self) -> usize {
        self.field_width as usize + Self::ENTRY_OVERHEAD
    }

    pub fn is_truncated(&self) -> bool {
        self.entries.len() < self.entry_count as usize
    }

    /// Every (value, page) pair in on-disk order
    pub fn values(&self) -> Vec<(String, u16)> {
        self.entries.iter().map(|e| (e.value_str(), e.page)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment_bytes(width: u16, declared: u16, entries: &[(&str, u16)]) -> Vec<u8> {
        let mut buf = vec![0u8; FieldIndexSegment::METADATA_OFFSET];
        let mut meta = [0u8; FieldIndexSegment::METADATA_LEN];
        meta[0..2].copy_from_slice(&1u16.to_le_bytes());
        meta[2..4].copy_from_slice(&7u16.to_le_bytes());
        meta[6..8].copy_from_slice(&2u16.to_le_bytes());
        meta[10..12].copy_from_slice(&width.to_le_bytes());
        meta[14..16].copy_from_slice(&declared.to_le_bytes());
        buf.extend_from_slice(&meta);
        for (value, page) in entries {
            buf.extend_from_slice(&(value.len() as u16).to_le_bytes());
            let mut slot = value.as_bytes().to_vec();
            slot.resize(width as usize, b' ');
            buf.extend_from_slice(&slot);
            buf.extend_from_slice(&page.to_le_bytes());
            buf.extend_from_slice(&[0xA, 0xB, 0xC]);
        }
        buf
    }

    fn location(len: usize) -> SegmentLocation {
        SegmentLocation { index: 1, marker_offset: 0, data_start: 4, data_end: 4 + len }
    }

    fn decode(body: Vec<u8>) -> Result<FieldIndexSegment> {
        let mut data = vec![0xFF, 0xFE, 0xFD, 0xFC];
        let len = body.len();
        data.extend(body);
        FieldIndexSegment::decode(&Bytes::from(data), &location(len))
    }

    #[test]
    fn test_decode_metadata_and_entries() {
        let segment = decode(segment_bytes(8, 2, &[("ALPHA", 3), ("BETA", 5)])).unwrap();
        assert_eq!(segment.page_start, 1);
        assert_eq!(segment.key(), FieldKey::new(7, 2));
        assert_eq!(segment.field_width, 8);
        assert_eq!(segment.entry_count, 2);
        assert_eq!(segment.entry_size(), 15);
        assert!(!segment.is_truncated());
        assert!(segment.sorted);
        assert!(segment.diagnostics.is_empty());

        assert_eq!(segment.entries[0].value.as_ref(), b"ALPHA");
        assert_eq!(segment.entries[0].length, 5);
        assert_eq!(segment.entries[0].flags, [0xA, 0xB, 0xC]);
        assert_eq!(segment.values(), vec![("ALPHA".to_string(), 3), ("BETA".to_string(), 5)]);
    }

    #[test]
    fn test_truncated_segment_returns_what_fits() {
        let mut body = segment_bytes(4, 5, &[("A", 1), ("B", 2), ("C", 3)]);
        body.truncate(body.len() - 2);
        let segment = decode(body).unwrap();

        assert_eq!(segment.entries.len(), 2);
        assert!(segment.is_truncated());
        assert_eq!(
            segment.diagnostics,
            vec![Diagnostic::TruncatedSegment { segment: 1, declared: 5, decoded: 2 }]
        );
    }

    #[test]
    fn test_unsorted_entries_detected() {
        let segment = decode(segment_bytes(4, 2, &[("ZZ", 1), ("AA", 2)])).unwrap();
        assert!(!segment.sorted);
    }

    #[test]
    fn test_short_span_is_error() {
        let body = vec![0u8; FieldIndexSegment::METADATA_OFFSET + 4];
        match decode(body) {
            Err(ReportIndexError::SegmentTooShort { segment, span }) => {
                assert_eq!(segment, 1);
                assert_eq!(span, 28);
            }
            other => panic!("Expected SegmentTooShort, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_is_idempotent() {
        let body = segment_bytes(6, 1, &[("X1", 9)]);
        assert_eq!(decode(body.clone()).unwrap(), decode(body).unwrap());
    }
}
