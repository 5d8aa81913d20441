// src/segment/info.rs
use std::ops::Range;

/// Where one segment's data lives inside the file buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentLocation {
    /// Position in file order; 0 is always the directory
    pub index: usize,
    /// Offset of the marker itself
    pub marker_offset: usize,
    /// First byte after the marker
    pub data_start: usize,
    /// Start of the next marker, or end of file for the last segment
    pub data_end: usize,
}

impl SegmentLocation {
    pub const MARKER_LEN: usize = 4;

    pub fn span(&self) -> Range<usize> {
        self.data_start..self.data_end
    }

    pub fn len(&self) -> usize {
        self.data_end - self.data_start
    }

    pub fn is_empty(&self) -> bool {
        self.data_end == self.data_start
    }

    pub fn is_directory(&self) -> bool {
        self.index == 0
    }

    /// Single forward scan for every occurrence of `marker`.
    ///
    /// Overlapping and back-to-back markers each open their own segment; a
    /// segment whose successor starts inside its own marker gets an empty span.
    pub fn locate_all(buf: &[u8], marker: &[u8; 4]) -> Vec<SegmentLocation> {
        let marker_offsets: Vec<usize> = buf
            .windows(Self::MARKER_LEN)
            .enumerate()
            .filter(|(_, window)| *window == marker)
            .map(|(offset, _)| offset)
            .collect();

        marker_offsets
            .iter()
            .enumerate()
            .map(|(index, &marker_offset)| {
                let data_start = marker_offset + Self::MARKER_LEN;
                let next = marker_offsets.get(index + 1).copied().unwrap_or(buf.len());
                SegmentLocation {
                    index,
                    marker_offset,
                    data_start,
                    data_end: next.max(data_start),
                }
            })
            .collect()
    }
}
