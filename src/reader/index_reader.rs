// src/reader/index_reader.rs
use crate::config::ReaderConfig;
use crate::diagnostics::Diagnostic;
use crate::error::{ReportIndexError, Result};
use crate::metadata::{Directory, FieldIndexSegment, FieldKey};
use crate::segment::{IndexFileInfo, SegmentLocation};
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

#[cfg(feature = "mmap")]
use memmap2::Mmap;
#[cfg(feature = "mmap")]
use std::fs::File;

/// Reader for one binary index file.
///
/// The header, segment table and directory are decoded at open time. Field-index
/// segments are decoded on first use and kept for the life of the reader; the
/// cache belongs to this instance only.
pub struct IndexReader {
    pub(crate) data: Bytes,
    pub(crate) config: ReaderConfig,
    info: Option<IndexFileInfo>,
    pub(crate) segments: Vec<SegmentLocation>,
    pub(crate) directory: Directory,
    diagnostics: Vec<Diagnostic>,
    cache: Mutex<HashMap<usize, Arc<FieldIndexSegment>>>,
}

/// Constructors for whole-file loading
impl IndexReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, ReaderConfig::default())
    }

    pub fn open_with_config(path: impl AsRef<Path>, config: ReaderConfig) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "opening index file");
        Self::from_bytes(data, config)
    }

    /// Parse an index file already held in memory
    pub fn from_bytes(data: impl Into<Bytes>, config: ReaderConfig) -> Result<Self> {
        let data = data.into();
        if data.is_empty() {
            return Err(ReportIndexError::EmptyFile);
        }

        let mut diagnostics = Vec::new();

        let info = match IndexFileInfo::parse(&data, &config.signature) {
            Ok(info) => Some(info),
            Err(ReportIndexError::MalformedHeader { found, .. }) if config.scan_malformed_header => {
                diagnostics.push(Diagnostic::MalformedHeader { found }.emit());
                None
            }
            Err(e) => return Err(e),
        };

        let segments = SegmentLocation::locate_all(&data, &config.segment_marker);
        if segments.is_empty() {
            return Err(ReportIndexError::NoSegments);
        }
        tracing::debug!(segments = segments.len(), "segment scan complete");

        if let Some(info) = &info {
            if info.segment_count as usize != segments.len() {
                diagnostics.push(
                    Diagnostic::SegmentCountMismatch {
                        declared: info.segment_count,
                        discovered: segments.len(),
                    }
                    .emit(),
                );
            }
        }

        let directory = Directory::decode(&data[segments[0].span()]);
        diagnostics.extend(directory.diagnostics);
        let directory = directory.value;

        for entry in directory.entries() {
            let target = entry.target_segment as usize;
            if target == 0 || target >= segments.len() {
                diagnostics.push(
                    Diagnostic::DanglingDirectoryReference {
                        target: entry.target_segment,
                        discovered: segments.len(),
                    }
                    .emit(),
                );
            }
        }

        Ok(IndexReader {
            data,
            config,
            info,
            segments,
            directory,
            diagnostics,
            cache: Mutex::new(HashMap::new()),
        })
    }
}

/// Constructor for memory-mapped file I/O (requires "mmap" feature)
#[cfg(feature = "mmap")]
impl IndexReader {
    pub fn open_mmap(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_mmap_with_config(path, ReaderConfig::default())
    }

    pub fn open_mmap_with_config(path: impl AsRef<Path>, config: ReaderConfig) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        Self::from_bytes(Bytes::from_owner(mmap), config)
    }
}

impl IndexReader {
    /// Parsed header, absent when the signature did not match
    pub fn info(&self) -> Option<&IndexFileInfo> {
        self.info.as_ref()
    }

    pub fn segments(&self) -> &[SegmentLocation] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Diagnostics gathered while opening the file
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Field keys routed by the directory
    pub fn indexed_fields(&self) -> Vec<FieldKey> {
        self.directory.fields()
    }

    pub fn file_len(&self) -> usize {
        self.data.len()
    }

    /// Number of field-index segments decoded so far
    pub fn cached_segments(&self) -> usize {
        self.cache.lock().len()
    }

    /// Decode field-index segment `index`, or return the cached decode.
    ///
    /// Segment 0 is the directory and cannot be requested here.
    pub fn field_segment(&self, index: usize) -> Result<Arc<FieldIndexSegment>> {
        if index == 0 || index >= self.segments.len() {
            return Err(ReportIndexError::SegmentOutOfRange {
                index,
                count: self.segments.len(),
            });
        }

        if let Some(segment) = self.cache.lock().get(&index) {
            return Ok(Arc::clone(segment));
        }

        tracing::trace!(segment = index, "decoding field-index segment");
        let decoded = Arc::new(FieldIndexSegment::decode(&self.data, &self.segments[index])?);

        let mut cache = self.cache.lock();
        let segment = cache.entry(index).or_insert(decoded);
        Ok(Arc::clone(segment))
    }
}

impl std::fmt::Debug for IndexReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexReader")
            .field("bytes", &self.data.len())
            .field("info", &self.info)
            .field("segments", &self.segments.len())
            .field("directory_entries", &self.directory.len())
            .field("diagnostics", &self.diagnostics.len())
            .finish()
    }
}
