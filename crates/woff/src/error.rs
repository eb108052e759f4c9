//! Error types for WOFF decoding.

use std::result;

use read_fonts::types::Tag;

/// Result type for transcoding operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while reading a WOFF container.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input is shorter than the fixed WOFF header.
    #[error("input is {len} bytes, shorter than the 44-byte WOFF header")]
    MalformedHeader { len: usize },

    /// Input ends before the declared table directory does.
    #[error("input is {len} bytes, too short for a directory of {num_tables} table entries")]
    MalformedTableDirectory { num_tables: u16, len: usize },

    /// A table could not be decompressed to its declared length.
    #[error("failed to decode '{tag}' table: {reason}")]
    TableDecode { tag: Tag, reason: String },

    /// A table's stored bytes lie outside the input.
    #[error("'{tag}' table data ({length} bytes at offset {offset}) lies outside the input")]
    TableOutOfBounds { tag: Tag, offset: u32, length: u32 },

    /// The signature is not `wOFF` and strict signature checking is enabled.
    #[error("not a WOFF file: signature is {signature:#010x}")]
    InvalidSignature { signature: u32 },
}
