// src/spool/mod.rs
//! Spool files: flat text renderings of paginated reports.
//!
//! ```text
//! form feed:         page 1 text .. 0x0C | page 2 text .. 0x0C | page 3 text
//! carriage control:  "1HEADER\n" " body\n" "0body\n" | "1PAGE2\n" ...
//! ```
//!
//! [`SpoolPageIndex`] records the byte offset where each page starts;
//! [`SpoolReader`] slices pages out of the loaded file using that index.

mod page_index;
mod spool_reader;
mod page_stream;

pub use page_index::SpoolPageIndex;
pub use spool_reader::{PageRange, Pages, SpoolReader};
pub use page_stream::PageStream;
