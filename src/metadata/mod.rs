// src/metadata/mod.rs
mod field_key;
mod directory;
mod field_index;

pub use field_key::FieldKey;
pub use directory::{Directory, DirectoryEntry};
pub use field_index::{FieldIndexSegment, IndexEntry};
