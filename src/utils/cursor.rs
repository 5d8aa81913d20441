// src/utils/cursor.rs
use crate::error::{ReportIndexError, Result};
use byteorder::{ByteOrder, LittleEndian};

/// Sequential and random-access reader over an in-memory buffer.
///
/// All integers in the index format are little-endian; every read is bounds
/// checked and reports the offending offset on failure.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        ByteCursor { buf, pos: 0 }
    }

    pub fn at(buf: &'a [u8], pos: usize) -> Self {
        ByteCursor { buf, pos }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.ensure(count)?;
        self.pos += count;
        Ok(())
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    fn ensure(&self, count: usize) -> Result<()> {
        if self.remaining() < count {
            return Err(ReportIndexError::UnexpectedEof {
                offset: self.pos,
                needed: count - self.remaining(),
            });
        }
        Ok(())
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        self.ensure(count)?;
        let slice = &self.buf[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.read_bytes(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.read_bytes(4)?))
    }

    /// Read a u16 at an absolute offset without moving the cursor
    pub fn peek_u16_at(&self, offset: usize) -> Result<u16> {
        ByteCursor::at(self.buf, offset).read_u16()
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }
}
