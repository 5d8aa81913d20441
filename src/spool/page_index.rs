// src/spool/page_index.rs
use crate::diagnostics::{Diagnostic, Outcome};
use crate::types::SpoolFormat;
use std::ops::Range;

/// Byte offset of every page start in a spool file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpoolPageIndex {
    format: SpoolFormat,
    /// Strictly increasing, first element always 0; page N starts at offsets[N-1]
    offsets: Vec<usize>,
    total_len: usize,
}

impl SpoolPageIndex {
    /// Classify the paging convention from the first `window` bytes.
    ///
    /// Any form feed wins. Otherwise line-oriented text is carriage control,
    /// whatever its first column holds. A window with no line feed, or with a
    /// NUL byte, is not a spool rendering at all.
    pub fn detect_format(data: &[u8], window: usize) -> SpoolFormat {
        let head = &data[..data.len().min(window)];
        if head.contains(&SpoolFormat::FORM_FEED) {
            SpoolFormat::FormFeed
        } else if head.contains(&0) || !head.contains(&SpoolFormat::LINE_FEED) {
            SpoolFormat::Unknown
        } else {
            SpoolFormat::CarriageControl
        }
    }

    /// Single forward pass over `data`. Can be re-run at any time and always
    /// yields the same index for the same bytes.
    pub fn build(data: &[u8], window: usize) -> Outcome<SpoolPageIndex> {
        let format = Self::detect_format(data, window);
        let mut offsets = vec![0];
        let mut diagnostics = Vec::new();

        match format {
            SpoolFormat::FormFeed => {
                // A trailing form feed closes the last page rather than opening an empty one
                offsets.extend(
                    data.iter()
                        .enumerate()
                        .filter(|&(i, &b)| b == SpoolFormat::FORM_FEED && i + 1 < data.len())
                        .map(|(i, _)| i + 1),
                );
            }
            SpoolFormat::CarriageControl => {
                offsets.extend(
                    data.windows(2)
                        .enumerate()
                        .filter(|(_, pair)| pair[0] == SpoolFormat::LINE_FEED && pair[1] == SpoolFormat::NEW_PAGE)
                        .map(|(i, _)| i + 1),
                );
            }
            SpoolFormat::Unknown => {
                diagnostics.push(Diagnostic::UnsupportedSpoolFormat.emit());
            }
        }

        tracing::debug!(%format, pages = offsets.len(), bytes = data.len(), "built spool page index");

        Outcome::with_diagnostics(
            SpoolPageIndex {
                format,
                offsets,
                total_len: data.len(),
            },
            diagnostics,
        )
    }

    pub fn format(&self) -> SpoolFormat {
        self.format
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn page_count(&self) -> usize {
        self.offsets.len()
    }

    pub fn total_len(&self) -> usize {
        self.total_len
    }

    /// Byte span of 1-based `page`
    pub fn page_span(&self, page: usize) -> Option<Range<usize>> {
        if page == 0 || page > self.offsets.len() {
            return None;
        }
        let start = self.offsets[page - 1];
        let end = self.offsets.get(page).copied().unwrap_or(self.total_len);
        Some(start..end)
    }

    /// Byte span covering pages `first..=last` (1-based, inclusive)
    pub fn pages_span(&self, first: usize, last: usize) -> Option<Range<usize>> {
        let start = self.page_span(first)?.start;
        let end = self.page_span(last)?.end;
        (start <= end).then_some(start..end)
    }
}
