// src/utils/string_encoding.rs
use byteorder::{ByteOrder, LittleEndian};

/// Encode text as two-byte little-endian characters
pub fn encode_utf16_le(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len() * 2);
    for unit in s.encode_utf16() {
        let mut buf = [0u8; 2];
        LittleEndian::write_u16(&mut buf, unit);
        out.extend_from_slice(&buf);
    }
    out
}

/// Decode two-byte little-endian characters, stopping at the first NUL.
/// An odd trailing byte is ignored.
pub fn decode_utf16_le_lossy(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(LittleEndian::read_u16)
        .take_while(|&unit| unit != 0)
        .collect();
    String::from_utf16_lossy(&units)
}

/// Decode a free-form text region, giving up on anything that is not printable
pub fn decode_printable_utf16_le(bytes: &[u8]) -> String {
    let text = decode_utf16_le_lossy(bytes);
    if text.chars().all(|c| c.is_ascii_graphic() || c == ' ') {
        text.trim_end().to_string()
    } else {
        String::new()
    }
}

/// Strip the space/NUL padding that right-fills fixed-width values
pub fn trim_padding(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|&b| b != b' ' && b != 0)
        .map_or(0, |i| i + 1);
    &bytes[..end]
}

pub fn decode_text_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).to_string()
}
