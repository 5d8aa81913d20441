// src/spool/page_stream.rs
use crate::error::Result;
use crate::spool::{PageRange, SpoolReader};

/// Chunked cursor for walking a large spool file a few pages at a time.
///
/// The stream only tracks a position; the pages themselves are sliced from
/// the reader on each call, so a stream can be reset and replayed freely.
///
/// # Example
///
/// ```no_run
/// use report_index_rs::spool::SpoolReader;
///
/// let reader = SpoolReader::open("report.txt").unwrap();
/// let mut stream = reader.stream(50);
///
/// while let Some(chunk) = stream.next(&reader).unwrap() {
///     println!("pages {}..{}: {} bytes",
///              chunk.first_page, chunk.first_page + chunk.page_count, chunk.bytes.len());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PageStream {
    total_pages: usize,
    chunk_size: usize,
    /// Pages already consumed
    current_position: usize,
}

impl PageStream {
    /// Create a new page stream
    ///
    /// # Arguments
    ///
    /// * `total_pages` - Number of pages in the spool file
    /// * `chunk_size` - Pages per chunk (at least 1)
    pub fn new(total_pages: usize, chunk_size: usize) -> Self {
        PageStream {
            total_pages,
            chunk_size: chunk_size.max(1),
            current_position: 0,
        }
    }

    /// Read the next chunk of pages
    ///
    /// # Returns
    ///
    /// `Some(PageRange)` with the next pages, or `None` once every page was read
    pub fn next(&mut self, reader: &SpoolReader) -> Result<Option<PageRange>> {
        if !self.has_more() {
            return Ok(None);
        }

        let chunk = reader.get_page_range(self.current_position + 1, self.chunk_size)?;
        self.current_position += chunk.page_count;
        Ok(Some(chunk))
    }

    /// Reset the stream to the first page
    pub fn reset(&mut self) {
        self.current_position = 0;
    }

    /// Pages consumed so far
    pub fn position(&self) -> usize {
        self.current_position
    }

    /// Move to a page offset (0-based count of pages to skip)
    pub fn seek(&mut self, position: usize) {
        self.current_position = position.min(self.total_pages);
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn has_more(&self) -> bool {
        self.current_position < self.total_pages
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn set_chunk_size(&mut self, chunk_size: usize) {
        self.chunk_size = chunk_size.max(1);
    }

    pub fn remaining(&self) -> usize {
        self.total_pages.saturating_sub(self.current_position)
    }

    /// Progress as a percentage (0.0 to 100.0)
    pub fn progress_percent(&self) -> f64 {
        if self.total_pages == 0 {
            return 100.0;
        }

        (self.current_position as f64 / self.total_pages as f64) * 100.0
    }
}
