// src/spool/spool_reader.rs
use crate::config::ReaderConfig;
use crate::diagnostics::{Diagnostic, Outcome};
use crate::error::{ReportIndexError, Result};
use crate::spool::{PageStream, SpoolPageIndex};
use crate::types::SpoolFormat;
use bytes::Bytes;
use std::path::Path;

#[cfg(feature = "mmap")]
use memmap2::Mmap;
#[cfg(feature = "mmap")]
use std::fs::File;

/// A run of consecutive pages materialized from a spool file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    /// 1-based number of the first page in the run
    pub first_page: usize,
    /// Pages actually returned; may be fewer than requested near the end
    pub page_count: usize,
    pub bytes: Bytes,
}

/// Reader for a paginated spool file.
///
/// The page index is built once at open; every page handed out is a
/// zero-copy slice of the loaded file.
pub struct SpoolReader {
    data: Bytes,
    config: ReaderConfig,
    index: SpoolPageIndex,
    diagnostics: Vec<Diagnostic>,
}

/// Constructors for whole-file loading
impl SpoolReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, ReaderConfig::default())
    }

    pub fn open_with_config(path: impl AsRef<Path>, config: ReaderConfig) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "opening spool file");
        Self::from_bytes(data, config)
    }

    /// Index a spool file already held in memory
    pub fn from_bytes(data: impl Into<Bytes>, config: ReaderConfig) -> Result<Self> {
        let data = data.into();
        if data.is_empty() {
            return Err(ReportIndexError::EmptyFile);
        }

        let Outcome { value: index, diagnostics } = SpoolPageIndex::build(&data, config.spool_detect_window);
        Ok(SpoolReader {
            data,
            config,
            index,
            diagnostics,
        })
    }
}

/// Constructor for memory-mapped file I/O (requires "mmap" feature)
#[cfg(feature = "mmap")]
impl SpoolReader {
    pub fn open_mmap(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_mmap_with_config(path, ReaderConfig::default())
    }

    pub fn open_mmap_with_config(path: impl AsRef<Path>, config: ReaderConfig) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        Self::from_bytes(Bytes::from_owner(mmap), config)
    }
}

impl SpoolReader {
    /// Rescan the file and build a fresh page index
    pub fn build_page_index(&self) -> Outcome<SpoolPageIndex> {
        SpoolPageIndex::build(&self.data, self.config.spool_detect_window)
    }

    /// Index built when the file was opened
    pub fn page_index(&self) -> &SpoolPageIndex {
        &self.index
    }

    pub fn format(&self) -> SpoolFormat {
        self.index.format()
    }

    pub fn page_count(&self) -> usize {
        self.index.page_count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The whole file, for raw inspection
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Bytes of 1-based page `page`, up to the next page start or end of file
    pub fn get_page(&self, page: usize) -> Result<Bytes> {
        let span = self.index.page_span(page).ok_or(ReportIndexError::PageOutOfRange {
            page,
            page_count: self.page_count(),
        })?;
        Ok(self.data.slice(span))
    }

    /// `count` consecutive pages starting at `start`.
    ///
    /// `start` must be a valid page. A run extending past the last page is
    /// clamped; compare `page_count` of the result with the request when strict
    /// bounds matter.
    pub fn get_page_range(&self, start: usize, count: usize) -> Result<PageRange> {
        let first = self.index.page_span(start).ok_or(ReportIndexError::PageOutOfRange {
            page: start,
            page_count: self.page_count(),
        })?;

        if count == 0 {
            return Ok(PageRange {
                first_page: start,
                page_count: 0,
                bytes: Bytes::new(),
            });
        }

        let last = start.saturating_add(count - 1).min(self.page_count());
        let span = self.index.pages_span(start, last).unwrap_or(first);
        Ok(PageRange {
            first_page: start,
            page_count: last - start + 1,
            bytes: self.data.slice(span),
        })
    }

    /// Iterate over every page in order
    pub fn pages(&self) -> Pages<'_> {
        Pages { reader: self, next: 1 }
    }

    /// Chunked cursor over the pages of this file
    pub fn stream(&self, pages_per_chunk: usize) -> PageStream {
        PageStream::new(self.page_count(), pages_per_chunk)
    }
}

/// Iterator over the pages of a [`SpoolReader`]
pub struct Pages<'a> {
    reader: &'a SpoolReader,
    next: usize,
}

impl Iterator for Pages<'_> {
    type Item = Bytes;

    fn next(&mut self) -> Option<Self::Item> {
        let page = self.reader.get_page(self.next).ok()?;
        self.next += 1;
        Some(page)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.reader.page_count() + 1).saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Pages<'_> {}

impl std::fmt::Debug for SpoolReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpoolReader")
            .field("bytes", &self.data.len())
            .field("format", &self.index.format())
            .field("pages", &self.index.page_count())
            .finish()
    }
}
