// src/reader/async_reader.rs
//! Async entry points (requires the "async" feature).
//!
//! The file is read with `tokio::fs` and parsed on the blocking pool, so a
//! multi-megabyte open never stalls the runtime's worker threads.

use crate::config::ReaderConfig;
use crate::error::{ReportIndexError, Result};
use crate::reader::IndexReader;
use crate::spool::SpoolReader;
use std::path::Path;
use tokio::task;

/// Open an index file without blocking the async runtime
pub async fn open_index_async(path: impl AsRef<Path>, config: ReaderConfig) -> Result<IndexReader> {
    let path = path.as_ref();
    let data = tokio::fs::read(path).await?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "opening index file");

    task::spawn_blocking(move || IndexReader::from_bytes(data, config))
        .await
        .map_err(|e| ReportIndexError::TaskJoin(e.to_string()))?
}

/// Open a spool file and build its page index without blocking the runtime
pub async fn open_spool_async(path: impl AsRef<Path>, config: ReaderConfig) -> Result<SpoolReader> {
    let path = path.as_ref();
    let data = tokio::fs::read(path).await?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "opening spool file");

    task::spawn_blocking(move || SpoolReader::from_bytes(data, config))
        .await
        .map_err(|e| ReportIndexError::TaskJoin(e.to_string()))?
}
