// src/types.rs
use std::fmt;

/// How a query value is compared against indexed values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchMode {
    /// Case-sensitive byte equality against the trimmed value
    #[default]
    Exact,
    /// Any trimmed value that starts with the query
    Prefix,
}

impl SearchMode {
    /// Whether an indexed value (already trimmed of padding) satisfies `query`
    pub fn matches(&self, value: &[u8], query: &[u8]) -> bool {
        match self {
            SearchMode::Exact => value == query,
            SearchMode::Prefix => value.starts_with(query),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SearchMode::Exact => "exact",
            SearchMode::Prefix => "prefix",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Page-delimiter convention detected in a spool file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpoolFormat {
    /// Pages separated by 0x0C bytes
    FormFeed,
    /// ASA first-column control characters; `'1'` starts a page
    CarriageControl,
    /// Binary or not line-oriented; the whole file is one page
    Unknown,
}

impl SpoolFormat {
    pub const FORM_FEED: u8 = 0x0C;
    pub const LINE_FEED: u8 = b'\n';
    /// First-column control that opens a page in carriage-control files
    pub const NEW_PAGE: u8 = b'1';

    pub fn name(&self) -> &'static str {
        match self {
            SpoolFormat::FormFeed => "form-feed",
            SpoolFormat::CarriageControl => "carriage-control",
            SpoolFormat::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SpoolFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
