// src/config.rs
//! Reader configuration
//!
//! Defaults match the files produced by the report platform; the builder exists
//! for sites whose generator was configured with a different signature or marker.

/// Options shared by the index and spool readers
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    // -------------------------------------------------------------------------
    // Index files
    // -------------------------------------------------------------------------
    /// Header signature, stored on disk as 2-byte little-endian characters
    pub signature: String,

    /// 4-byte marker introducing every segment
    pub segment_marker: [u8; 4],

    /// Keep scanning for segments when the signature does not match
    pub scan_malformed_header: bool,

    /// Use binary search over segments whose entries are verified sorted
    pub sorted_lookup: bool,

    // -------------------------------------------------------------------------
    // Spool files
    // -------------------------------------------------------------------------
    /// Number of leading bytes inspected to classify the paging convention
    pub spool_detect_window: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            signature: "RPTIDX".to_string(),
            segment_marker: [0xFF, 0xFE, 0xFD, 0xFC],
            scan_malformed_header: true,
            sorted_lookup: true,
            spool_detect_window: 64 * 1024,
        }
    }
}

impl ReaderConfig {
    /// Create a new config builder
    pub fn builder() -> ReaderConfigBuilder {
        ReaderConfigBuilder::default()
    }
}

/// Builder for ReaderConfig
#[derive(Default)]
pub struct ReaderConfigBuilder {
    config: ReaderConfig,
}

impl ReaderConfigBuilder {
    /// Set the expected header signature
    pub fn signature(mut self, signature: impl Into<String>) -> Self {
        self.config.signature = signature.into();
        self
    }

    /// Set the segment marker bytes
    pub fn segment_marker(mut self, marker: [u8; 4]) -> Self {
        self.config.segment_marker = marker;
        self
    }

    /// Whether a bad signature is tolerated (diagnostic) or fatal (error)
    pub fn scan_malformed_header(mut self, enabled: bool) -> Self {
        self.config.scan_malformed_header = enabled;
        self
    }

    pub fn sorted_lookup(mut self, enabled: bool) -> Self {
        self.config.sorted_lookup = enabled;
        self
    }

    /// Set the spool classification window (in bytes, at least 1)
    pub fn spool_detect_window(mut self, bytes: usize) -> Self {
        self.config.spool_detect_window = bytes.max(1);
        self
    }

    pub fn build(self) -> ReaderConfig {
        self.config
    }
}
