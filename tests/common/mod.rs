#![allow(dead_code)]

mod fixture;

pub use fixture::{IndexFixture, MARKER};

use std::io::Write;
use tempfile::NamedTempFile;

/// Write bytes to a temporary file that lives as long as the handle
pub fn temp_file(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}
