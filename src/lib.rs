// src/lib.rs
//! # report-index-rs
//!
//! Offline reader for two archival artifacts left behind by a legacy report
//! generation platform:
//!
//! - **Index files**: compact binary files mapping field values to the report
//!   page on which they appear.
//! - **Spool files**: flat text renderings of paginated reports, paged with
//!   form feeds or ASA carriage-control characters.
//!
//! Together they answer "which page of report R holds value V for field F"
//! and "give me pages 40 to 45" without the original database.
//!
//! ## Index file layout
//!
//! ```text
//! 0..12   signature (2-byte characters)
//! 16..18  flags            18..20  segment count
//! 20..24  trailing offset  24..56  generation date
//! marker  segment 0: directory, 4-byte records [target][line][field][flags]
//! marker  segment 1: 24-byte preamble, 16-byte metadata block,
//!                    entries [length:2][value:width][page:2][flags:3]
//! marker  segment 2: ...
//! ```
//!
//! ## Quick Start
//!
//! ### Finding a value
//!
//! ```rust,no_run
//! use report_index_rs::*;
//!
//! fn main() -> Result<()> {
//!     let reader = IndexReader::open("statement.idx")?;
//!
//!     let outcome = reader.search("EP24123109039499", 12, 3, SearchMode::Exact);
//!     for diagnostic in &outcome.diagnostics {
//!         eprintln!("warning: {}", diagnostic);
//!     }
//!     println!("pages: {:?}", outcome.value);
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Pulling pages out of a spool file
//!
//! ```rust,no_run
//! use report_index_rs::*;
//!
//! fn main() -> Result<()> {
//!     let spool = SpoolReader::open("statement.txt")?;
//!     println!("{} pages ({})", spool.page_count(), spool.format());
//!
//!     let page = spool.get_page(2)?;
//!     let run = spool.get_page_range(40, 6)?;
//!     println!("{} bytes, {} bytes over {} pages", page.len(), run.bytes.len(), run.page_count);
//!
//!     Ok(())
//! }
//! ```

// Modules
pub mod error;
pub mod types;
pub mod config;
pub mod diagnostics;
pub mod segment;
pub mod metadata;
pub mod reader;
pub mod spool;

mod utils;

// Re-export commonly used types at the crate root for convenience
pub use error::{ReportIndexError, Result};

pub use types::{SearchMode, SpoolFormat};

pub use config::{ReaderConfig, ReaderConfigBuilder};

pub use diagnostics::{Diagnostic, Outcome};

// Segment exports
pub use segment::{IndexFileInfo, SegmentLocation};

// Metadata exports
pub use metadata::{
    Directory,
    DirectoryEntry,
    FieldIndexSegment,
    FieldKey,
    IndexEntry,
};

// Reader exports
pub use reader::{BatchSearch, FileSearchResult, IndexReader};

#[cfg(feature = "async")]
pub use reader::{open_index_async, open_spool_async};

// Spool exports
pub use spool::{PageRange, PageStream, SpoolPageIndex, SpoolReader};

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use report_index_rs::prelude::*;
    //! ```

    pub use crate::diagnostics::{Diagnostic, Outcome};
    pub use crate::error::{ReportIndexError, Result};
    pub use crate::metadata::FieldKey;
    pub use crate::reader::IndexReader;
    pub use crate::spool::SpoolReader;
    pub use crate::types::{SearchMode, SpoolFormat};
}

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");


// Synthetic file builder shared with the integration tests (only compiled for tests)
#[cfg(test)]
#[path = "../tests/common/fixture.rs"]
pub(crate) mod test_helpers;
