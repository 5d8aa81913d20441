// src/metadata/directory.rs
use crate::diagnostics::{Diagnostic, Outcome};
use crate::metadata::FieldKey;
use bytemuck::{Pod, Zeroable};
use smallvec::SmallVec;

/// One 4-byte record of the directory segment
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct DirectoryEntry {
    pub target_segment: u8,
    pub line_id: u8,
    pub field_id: u8,
    /// Opaque; passed through for display only
    pub flags: u8,
}

impl DirectoryEntry {
    pub const RECORD_LEN: usize = 4;

    pub fn key(&self) -> FieldKey {
        FieldKey::new(self.line_id.into(), self.field_id.into())
    }
}

/// Routing table decoded from segment 0
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    entries: Vec<DirectoryEntry>,
}

impl Directory {
    /// Decode whole records from the directory span, discarding a partial tail
    pub fn decode(span: &[u8]) -> Outcome<Directory> {
        let whole = span.len() - span.len() % DirectoryEntry::RECORD_LEN;
        let entries = bytemuck::cast_slice::<u8, DirectoryEntry>(&span[..whole]).to_vec();

        let mut diagnostics = Vec::new();
        if whole < span.len() {
            diagnostics.push(Diagnostic::DirectoryTrailingBytes { bytes: span.len() - whole }.emit());
        }

        Outcome::with_diagnostics(Directory { entries }, diagnostics)
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every entry routing `key`, in directory order. Duplicates are kept;
    /// the caller decides between them using segment metadata.
    pub fn lookup(&self, key: FieldKey) -> SmallVec<[DirectoryEntry; 2]> {
        self.entries.iter().filter(|e| e.key() == key).copied().collect()
    }

    /// Distinct field keys in first-seen order
    pub fn fields(&self) -> Vec<FieldKey> {
        let mut keys: Vec<FieldKey> = Vec::new();
        for entry in &self.entries {
            let key = entry.key();
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }
}
