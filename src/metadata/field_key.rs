// src/metadata/field_key.rs
use crate::error::{ReportIndexError, Result};
use std::fmt;
use std::str::FromStr;

/// Identifies a printed field by its position in the report's line template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldKey {
    pub line_id: u16,
    pub field_id: u16,
}

impl FieldKey {
    pub fn new(line_id: u16, field_id: u16) -> Self {
        FieldKey { line_id, field_id }
    }

    /// Parse `"12:3"`, `"12/3"` or `"L12F3"`
    pub fn from_string(s: &str) -> Result<Self> {
        let invalid = || ReportIndexError::InvalidFieldKey(s.to_string());
        let trimmed = s.trim();

        let (line, field) = if let Some(rest) = trimmed.strip_prefix(['L', 'l']) {
            rest.split_once(['F', 'f']).ok_or_else(invalid)?
        } else {
            trimmed.split_once([':', '/']).ok_or_else(invalid)?
        };

        let line_id = line.trim().parse::<u16>().map_err(|_| invalid())?;
        let field_id = field.trim().parse::<u16>().map_err(|_| invalid())?;
        Ok(FieldKey { line_id, field_id })
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}F{}", self.line_id, self.field_id)
    }
}

impl FromStr for FieldKey {
    type Err = ReportIndexError;

    fn from_str(s: &str) -> Result<Self> {
        FieldKey::from_string(s)
    }
}

impl From<(u16, u16)> for FieldKey {
    fn from((line_id, field_id): (u16, u16)) -> Self {
        FieldKey { line_id, field_id }
    }
}
