// src/reader/mod.rs
mod index_reader;
mod search;
mod batch;
#[cfg(feature = "async")]
mod async_reader;

pub use index_reader::IndexReader;
pub use batch::{BatchSearch, FileSearchResult};
#[cfg(feature = "async")]
pub use async_reader::{open_index_async, open_spool_async};
