// src/segment/mod.rs
mod header;
mod info;

pub use header::IndexFileInfo;
pub use info::SegmentLocation;
