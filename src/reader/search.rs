// src/reader/search.rs
//! Value lookup over field-index segments.
//!
//! Entries are not guaranteed to be sorted on disk, so the reference strategy
//! is a linear scan in entry order. When a segment was verified sorted at
//! decode time, the matching run is located by binary search instead; both
//! paths yield the same pages in the same order.

use crate::diagnostics::{Diagnostic, Outcome};
use crate::error::ReportIndexError;
use crate::metadata::{FieldIndexSegment, FieldKey, IndexEntry};
use crate::reader::IndexReader;
use crate::types::SearchMode;
use std::sync::Arc;

impl IndexReader {
    /// Pages holding `value` for field (`line_id`, `field_id`).
    ///
    /// Pages come back in on-disk entry order and are not deduplicated. An
    /// unindexed field or a dangling directory record yields an empty result
    /// with a diagnostic.
    pub fn search(&self, value: &str, line_id: u16, field_id: u16, mode: SearchMode) -> Outcome<Vec<u16>> {
        self.search_key(FieldKey::new(line_id, field_id), value, mode)
    }

    pub fn search_key(&self, key: FieldKey, value: &str, mode: SearchMode) -> Outcome<Vec<u16>> {
        let query = value.as_bytes();
        let mut diagnostics = Vec::new();
        let mut pages = Vec::new();

        for segment in self.resolve_segments(key, &mut diagnostics) {
            diagnostics.extend(segment.diagnostics.iter().cloned());

            if query.len() > segment.field_width as usize {
                diagnostics.push(
                    Diagnostic::QueryWiderThanField {
                        segment: segment.segment,
                        field_width: segment.field_width,
                        query_len: query.len(),
                    }
                    .emit(),
                );
                continue;
            }

            pages.extend(matching_pages(&segment, query, mode, self.config.sorted_lookup));
        }

        tracing::debug!(field = %key, %mode, hits = pages.len(), "search complete");
        Outcome::with_diagnostics(pages, diagnostics)
    }

    /// Every (value, page) pair for the field, unfiltered, in on-disk order
    pub fn get_all_indexed_values(&self, line_id: u16, field_id: u16) -> Outcome<Vec<(String, u16)>> {
        let key = FieldKey::new(line_id, field_id);
        let mut diagnostics = Vec::new();
        let mut values = Vec::new();

        for segment in self.resolve_segments(key, &mut diagnostics) {
            diagnostics.extend(segment.diagnostics.iter().cloned());
            values.extend(segment.values());
        }

        Outcome::with_diagnostics(values, diagnostics)
    }

    /// Decoded segments that hold `key`, in directory order.
    ///
    /// Segment metadata is authoritative: a directory record whose segment
    /// reports a different field is skipped.
    fn resolve_segments(&self, key: FieldKey, diagnostics: &mut Vec<Diagnostic>) -> Vec<Arc<FieldIndexSegment>> {
        let candidates = self.directory.lookup(key);
        if candidates.is_empty() {
            diagnostics.push(Diagnostic::FieldNotIndexed { key }.emit());
            return Vec::new();
        }

        let mut resolved = Vec::with_capacity(candidates.len());
        for entry in candidates {
            let index = entry.target_segment as usize;
            if index == 0 || index >= self.segments.len() {
                diagnostics.push(
                    Diagnostic::DanglingDirectoryReference {
                        target: entry.target_segment,
                        discovered: self.segments.len(),
                    }
                    .emit(),
                );
                continue;
            }

            let segment = match self.field_segment(index) {
                Ok(segment) => segment,
                Err(e) => {
                    diagnostics.push(decode_failure(index, e).emit());
                    continue;
                }
            };

            if segment.key() != key {
                diagnostics.push(
                    Diagnostic::SegmentIdentityMismatch {
                        segment: index,
                        expected: key,
                        found: segment.key(),
                    }
                    .emit(),
                );
                continue;
            }

            resolved.push(segment);
        }
        resolved
    }
}

/// Diagnostic for a candidate segment that could not be decoded
fn decode_failure(index: usize, err: ReportIndexError) -> Diagnostic {
    match err {
        ReportIndexError::SegmentTooShort { segment, span } => Diagnostic::SegmentTooShort { segment, span },
        other => Diagnostic::SegmentUndecodable {
            segment: index,
            reason: other.to_string(),
        },
    }
}

/// Pages of the entries in `segment` matching `query`, in entry order
pub(crate) fn matching_pages(
    segment: &FieldIndexSegment,
    query: &[u8],
    mode: SearchMode,
    sorted_lookup: bool,
) -> Vec<u16> {
    let candidates = if sorted_lookup && segment.sorted {
        sorted_run(&segment.entries, query, mode)
    } else {
        &segment.entries[..]
    };

    candidates
        .iter()
        .filter(|entry| mode.matches(&entry.value, query))
        .map(|entry| entry.page)
        .collect()
}

/// In sorted entries, every match sits in one contiguous run beginning at the
/// first value not less than the query.
fn sorted_run<'a>(entries: &'a [IndexEntry], query: &[u8], mode: SearchMode) -> &'a [IndexEntry] {
    let start = entries.partition_point(|entry| entry.value.as_ref() < query);
    let len = entries[start..].partition_point(|entry| mode.matches(&entry.value, query));
    &entries[start..start + len]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReaderConfig;
    use crate::test_helpers::IndexFixture;

    fn reader(fixture: IndexFixture) -> IndexReader {
        IndexReader::from_bytes(fixture.build(), ReaderConfig::default()).unwrap()
    }

    fn synthetic() -> IndexReader {
        reader(IndexFixture::new().field(12, 3, 18, &[("EP24123109039499", 2), ("EP24123109039500", 3)]))
    }

    #[test]
    fn test_exact_and_prefix_search() {
        let reader = synthetic();

        let exact = reader.search("EP24123109039499", 12, 3, SearchMode::Exact);
        assert!(exact.is_clean());
        assert_eq!(exact.value, vec![2]);

        let prefix = reader.search("EP2412310", 12, 3, SearchMode::Prefix);
        assert_eq!(prefix.value, vec![2, 3]);

        assert!(reader.search("EP2412310", 12, 3, SearchMode::Exact).value.is_empty());
        assert!(reader.search("ep24123109039499", 12, 3, SearchMode::Exact).value.is_empty());
    }

    #[test]
    fn test_all_indexed_values_in_disk_order() {
        let values = synthetic().get_all_indexed_values(12, 3);
        assert!(values.is_clean());
        assert_eq!(
            values.value,
            vec![("EP24123109039499".to_string(), 2), ("EP24123109039500".to_string(), 3)]
        );
    }

    #[test]
    fn test_decode_failures_become_diagnostics() {
        let short = decode_failure(2, ReportIndexError::SegmentTooShort { segment: 2, span: 9 });
        assert_eq!(short, Diagnostic::SegmentTooShort { segment: 2, span: 9 });

        let eof = decode_failure(3, ReportIndexError::UnexpectedEof { offset: 120, needed: 4 });
        match eof {
            Diagnostic::SegmentUndecodable { segment, reason } => {
                assert_eq!(segment, 3);
                assert!(reason.contains("offset 120"));
            }
            other => panic!("Expected SegmentUndecodable, got {:?}", other),
        }
    }

    #[test]
    fn test_unindexed_field_is_empty_with_diagnostic() {
        let outcome = synthetic().search("X", 1, 1, SearchMode::Exact);
        assert!(outcome.value.is_empty());
        assert_eq!(
            outcome.diagnostics,
            vec![Diagnostic::FieldNotIndexed { key: FieldKey::new(1, 1) }]
        );
    }

    #[test]
    fn test_duplicate_pages_preserved() {
        let reader = reader(IndexFixture::new().field(1, 1, 6, &[("ACME", 4), ("ACME", 4), ("BOLT", 5), ("ACME", 9)]));
        assert_eq!(reader.search("ACME", 1, 1, SearchMode::Exact).value, vec![4, 4, 9]);
    }

    #[test]
    fn test_multiple_segments_for_one_field() {
        let reader = reader(
            IndexFixture::new()
                .field(2, 7, 4, &[("AB", 1)])
                .field(2, 7, 8, &[("ABCDEFG", 6), ("AB", 8)]),
        );
        assert_eq!(reader.search("AB", 2, 7, SearchMode::Exact).value, vec![1, 8]);

        // Too wide for the first segment only
        let wide = reader.search("ABCDEFG", 2, 7, SearchMode::Prefix);
        assert_eq!(wide.value, vec![6]);
        assert!(wide.has(|d| matches!(d, Diagnostic::QueryWiderThanField { segment: 1, .. })));
    }

    #[test]
    fn test_segment_metadata_overrides_directory() {
        // Directory routes L4F4 to segment 1, which actually holds L3F3
        let reader = reader(IndexFixture::new().field(3, 3, 4, &[("Q", 1)]).directory_entry(1, 4, 4, 0));
        let outcome = reader.search("Q", 4, 4, SearchMode::Exact);
        assert!(outcome.value.is_empty());
        assert!(outcome.has(|d| matches!(d, Diagnostic::SegmentIdentityMismatch { segment: 1, .. })));
        assert_eq!(reader.search("Q", 3, 3, SearchMode::Exact).value, vec![1]);
    }

    #[test]
    fn test_dangling_reference_skipped() {
        let reader = reader(IndexFixture::new().field(1, 1, 4, &[("A", 1)]).directory_entry(7, 5, 5, 0));
        let outcome = reader.search("A", 5, 5, SearchMode::Exact);
        assert!(outcome.value.is_empty());
        assert_eq!(
            outcome.diagnostics,
            vec![Diagnostic::DanglingDirectoryReference { target: 7, discovered: 2 }]
        );
    }

    #[test]
    fn test_short_segment_skipped() {
        let reader = reader(IndexFixture::new().raw_segment(&[0u8; 10]).directory_entry(1, 6, 6, 0));
        let outcome = reader.get_all_indexed_values(6, 6);
        assert!(outcome.value.is_empty());
        assert_eq!(outcome.diagnostics, vec![Diagnostic::SegmentTooShort { segment: 1, span: 10 }]);
    }

    #[test]
    fn test_truncated_segment_searchable() {
        let mut bytes = IndexFixture::new()
            .field_declaring(1, 2, 4, Some(3), &[("AA", 1), ("AB", 2)])
            .build();
        bytes.truncate(bytes.len() - 1);
        let reader = IndexReader::from_bytes(bytes, ReaderConfig::default()).unwrap();

        let outcome = reader.search("A", 1, 2, SearchMode::Prefix);
        assert_eq!(outcome.value, vec![1]);
        assert!(outcome.has(|d| matches!(d, Diagnostic::TruncatedSegment { declared: 3, decoded: 1, .. })));
    }

    #[test]
    fn test_sorted_lookup_matches_linear_scan() {
        let entries = [("AA", 1), ("AB", 2), ("AB", 3), ("ABC", 4), ("B", 5), ("BA", 6)];
        let bytes = IndexFixture::new().field(1, 1, 4, &entries).build();
        let fast = IndexReader::from_bytes(bytes.clone(), ReaderConfig::default()).unwrap();
        let slow = IndexReader::from_bytes(bytes, ReaderConfig::builder().sorted_lookup(false).build()).unwrap();
        assert!(fast.field_segment(1).unwrap().sorted);

        for query in ["", "A", "AB", "ABC", "ABCD", "B", "C", "0"] {
            for mode in [SearchMode::Exact, SearchMode::Prefix] {
                assert_eq!(
                    fast.search(query, 1, 1, mode).value,
                    slow.search(query, 1, 1, mode).value,
                    "query {query:?} mode {mode}"
                );
            }
        }
        assert_eq!(fast.search("AB", 1, 1, SearchMode::Prefix).value, vec![2, 3, 4]);
    }

    #[test]
    fn test_unsorted_segment_uses_scan() {
        let reader = reader(IndexFixture::new().field(1, 1, 4, &[("B", 1), ("A", 2), ("B", 3)]));
        assert!(!reader.field_segment(1).unwrap().sorted);
        assert_eq!(reader.search("B", 1, 1, SearchMode::Exact).value, vec![1, 3]);
    }
}
