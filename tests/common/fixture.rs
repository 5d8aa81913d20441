// tests/common/fixture.rs
//! Builder for synthetic index files used by unit tests, integration tests and
//! benchmarks. Lays out the header, a directory segment and one field-index
//! segment per field exactly as the reader expects to find them.

#![allow(dead_code)]

pub const MARKER: [u8; 4] = [0xFF, 0xFE, 0xFD, 0xFC];

struct FixtureField {
    line_id: u16,
    field_id: u16,
    width: u16,
    declared: Option<u16>,
    entries: Vec<(String, u16)>,
}

enum FixtureSegment {
    Field(FixtureField),
    Raw(Vec<u8>),
}

pub struct IndexFixture {
    signature: String,
    marker: [u8; 4],
    declared_segments: Option<u16>,
    date: String,
    extra_directory: Vec<[u8; 4]>,
    segments: Vec<FixtureSegment>,
}

impl Default for IndexFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexFixture {
    pub const DATE: &'static str = "2024-12-31 09:03";
    pub const HEADER_LEN: usize = 56;
    pub const PREAMBLE_LEN: usize = 24;
    pub const METADATA_LEN: usize = 16;

    pub fn new() -> Self {
        IndexFixture {
            signature: "RPTIDX".to_string(),
            marker: MARKER,
            declared_segments: None,
            date: Self::DATE.to_string(),
            extra_directory: Vec::new(),
            segments: Vec::new(),
        }
    }

    pub fn signature(mut self, signature: &str) -> Self {
        self.signature = signature.to_string();
        self
    }

    pub fn marker(mut self, marker: [u8; 4]) -> Self {
        self.marker = marker;
        self
    }

    pub fn date(mut self, date: &str) -> Self {
        self.date = date.to_string();
        self
    }

    /// Override the segment count written to the header
    pub fn declared_segments(mut self, count: u16) -> Self {
        self.declared_segments = Some(count);
        self
    }

    /// Add a field-index segment plus a directory record routing to it
    pub fn field(self, line_id: u16, field_id: u16, width: u16, entries: &[(&str, u16)]) -> Self {
        self.field_declaring(line_id, field_id, width, None, entries)
    }

    /// Like `field`, but with an explicit (possibly wrong) declared entry count
    pub fn field_declaring(
        mut self,
        line_id: u16,
        field_id: u16,
        width: u16,
        declared: Option<u16>,
        entries: &[(&str, u16)],
    ) -> Self {
        self.segments.push(FixtureSegment::Field(FixtureField {
            line_id,
            field_id,
            width,
            declared,
            entries: entries.iter().map(|(v, p)| (v.to_string(), *p)).collect(),
        }));
        self
    }

    /// Add a segment with arbitrary data and no directory record
    pub fn raw_segment(mut self, data: &[u8]) -> Self {
        self.segments.push(FixtureSegment::Raw(data.to_vec()));
        self
    }

    /// Add a directory record that is not generated from a field
    pub fn directory_entry(mut self, target: u8, line_id: u8, field_id: u8, flags: u8) -> Self {
        self.extra_directory.push([target, line_id, field_id, flags]);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut directory = Vec::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if let FixtureSegment::Field(field) = segment {
                directory.extend_from_slice(&[(i + 1) as u8, field.line_id as u8, field.field_id as u8, 0]);
            }
        }
        for record in &self.extra_directory {
            directory.extend_from_slice(record);
        }

        let mut body = Vec::new();
        body.extend_from_slice(&self.marker);
        body.extend_from_slice(&directory);
        for segment in &self.segments {
            body.extend_from_slice(&self.marker);
            match segment {
                FixtureSegment::Field(field) => body.extend(Self::field_bytes(field)),
                FixtureSegment::Raw(data) => body.extend_from_slice(data),
            }
        }

        let segment_count = self.declared_segments.unwrap_or(self.segments.len() as u16 + 1);
        let mut out = utf16(&self.signature, 12);
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&segment_count.to_le_bytes());
        out.extend_from_slice(&((Self::HEADER_LEN + body.len()) as u32).to_le_bytes());
        out.extend(utf16(&self.date, 32));
        out.extend(body);
        out
    }

    fn field_bytes(field: &FixtureField) -> Vec<u8> {
        let declared = field.declared.unwrap_or(field.entries.len() as u16);
        let mut out = vec![0u8; Self::PREAMBLE_LEN];

        let mut meta = [0u8; Self::METADATA_LEN];
        let page_start = field.entries.first().map_or(1, |(_, p)| *p);
        meta[0..2].copy_from_slice(&page_start.to_le_bytes());
        meta[2..4].copy_from_slice(&field.line_id.to_le_bytes());
        meta[6..8].copy_from_slice(&field.field_id.to_le_bytes());
        meta[10..12].copy_from_slice(&field.width.to_le_bytes());
        meta[14..16].copy_from_slice(&declared.to_le_bytes());
        out.extend_from_slice(&meta);

        for (value, page) in &field.entries {
            out.extend_from_slice(&(value.len() as u16).to_le_bytes());
            let mut slot = value.as_bytes().to_vec();
            slot.resize(field.width as usize, b' ');
            out.extend_from_slice(&slot);
            out.extend_from_slice(&page.to_le_bytes());
            out.extend_from_slice(&[0, 0, 0]);
        }
        out
    }
}

fn utf16(text: &str, len: usize) -> Vec<u8> {
    let mut out: Vec<u8> = text.encode_utf16().flat_map(u16::to_le_bytes).collect();
    out.resize(len, 0);
    out
}
