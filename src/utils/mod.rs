// src/utils/mod.rs
mod string_encoding;
mod cursor;

pub(crate) use string_encoding::*;
pub(crate) use cursor::*;
