// src/reader/batch.rs
use crate::config::ReaderConfig;
use crate::diagnostics::Outcome;
use crate::error::{ReportIndexError, Result};
use crate::metadata::FieldKey;
use crate::reader::IndexReader;
use crate::types::SearchMode;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::path::{Path, PathBuf};
use std::thread;

/// Result of searching one file in a batch
#[derive(Debug)]
pub struct FileSearchResult {
    pub path: PathBuf,
    pub result: Result<Outcome<Vec<u16>>>,
}

/// Search one field for one value across many index files.
///
/// Files are handed to a small pool of worker threads through a job channel.
/// Every worker opens its own reader, so no decode cache is shared between
/// files. A file that fails to open is reported in its own slot and the rest
/// of the batch carries on.
///
/// # Example
///
/// ```no_run
/// use report_index_rs::prelude::*;
/// use report_index_rs::reader::BatchSearch;
///
/// let results = BatchSearch::new(FieldKey::new(12, 3), "EP2412310", SearchMode::Prefix)
///     .workers(4)
///     .run(&["a.idx", "b.idx"]);
/// for file in results {
///     println!("{}: {:?}", file.path.display(), file.result.map(|o| o.value));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BatchSearch {
    key: FieldKey,
    value: String,
    mode: SearchMode,
    workers: usize,
    config: ReaderConfig,
}

impl BatchSearch {
    pub fn new(key: FieldKey, value: impl Into<String>, mode: SearchMode) -> Self {
        let workers = thread::available_parallelism().map_or(1, |n| n.get());
        BatchSearch {
            key,
            value: value.into(),
            mode,
            workers,
            config: ReaderConfig::default(),
        }
    }

    /// Number of worker threads (at least 1)
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the search; results come back in the order of `paths`
    pub fn run<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<FileSearchResult> {
        let (job_tx, job_rx) = unbounded::<(usize, PathBuf)>();
        let (result_tx, result_rx) = unbounded::<(usize, Result<Outcome<Vec<u16>>>)>();

        for (slot, path) in paths.iter().enumerate() {
            // Receiver is alive for the whole function, send cannot fail
            let _ = job_tx.send((slot, path.as_ref().to_path_buf()));
        }
        drop(job_tx);

        let worker_count = self.workers.min(paths.len()).max(1);
        tracing::debug!(files = paths.len(), workers = worker_count, field = %self.key, "starting batch search");

        thread::scope(|scope| {
            let handles: Vec<_> = (0..worker_count)
                .map(|_| {
                    let jobs = job_rx.clone();
                    let results = result_tx.clone();
                    scope.spawn(move || self.worker(jobs, results))
                })
                .collect();

            for handle in handles {
                if handle.join().is_err() {
                    tracing::warn!("batch search worker panicked");
                }
            }
        });
        drop(result_tx);

        let mut slots: Vec<Option<Result<Outcome<Vec<u16>>>>> = (0..paths.len()).map(|_| None).collect();
        for (slot, result) in result_rx.iter() {
            slots[slot] = Some(result);
        }

        paths
            .iter()
            .zip(slots)
            .map(|(path, result)| FileSearchResult {
                path: path.as_ref().to_path_buf(),
                result: result.unwrap_or_else(|| {
                    Err(ReportIndexError::TaskJoin("worker stopped before reaching this file".to_string()))
                }),
            })
            .collect()
    }

    fn worker(&self, jobs: Receiver<(usize, PathBuf)>, results: Sender<(usize, Result<Outcome<Vec<u16>>>)>) {
        for (slot, path) in jobs.iter() {
            let result = IndexReader::open_with_config(&path, self.config.clone())
                .map(|reader| reader.search_key(self.key, &self.value, self.mode));
            if results.send((slot, result)).is_err() {
                break;
            }
        }
    }
}
