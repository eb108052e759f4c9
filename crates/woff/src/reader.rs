//! WOFF container parsing.

use std::io::Read;

use flate2::read::ZlibDecoder;
use log::debug;
use read_fonts::{FontData, ReadError};

use crate::{
    error::{Error, Result},
    font::ParsedFont,
    header::{TABLE_DIRECTORY_ENTRY_SIZE, TableDirectoryEntry, WOFF_HEADER_SIZE, WoffHeader},
};

/// Parse a WOFF file and decompress all of its tables.
///
/// The signature is not checked here; see
/// [`Options::require_signature`](crate::Options::require_signature).
pub fn read_woff(bytes: &[u8]) -> Result<ParsedFont> {
    let data = FontData::new(bytes);

    let header = read_header(data)?;
    let entries = read_table_directory(data, header.num_tables)?;
    let tables = entries
        .iter()
        .map(|entry| read_table(bytes, entry))
        .collect::<Result<Vec<_>>>()?;

    Ok(ParsedFont::from_parts(header, entries, tables))
}

/// Read the fixed 44-byte header at the start of `data`.
pub fn read_header(data: FontData) -> Result<WoffHeader> {
    if data.len() < WOFF_HEADER_SIZE {
        return Err(Error::MalformedHeader { len: data.len() });
    }
    parse_header(data).map_err(|_| Error::MalformedHeader { len: data.len() })
}

fn parse_header(data: FontData) -> std::result::Result<WoffHeader, ReadError> {
    Ok(WoffHeader {
        signature: data.read_at(0)?,
        flavor: data.read_at(4)?,
        length: data.read_at(8)?,
        num_tables: data.read_at(12)?,
        reserved: data.read_at(14)?,
        total_sfnt_size: data.read_at(16)?,
        major_version: data.read_at(20)?,
        minor_version: data.read_at(22)?,
        meta_offset: data.read_at(24)?,
        meta_length: data.read_at(28)?,
        meta_orig_length: data.read_at(32)?,
        priv_offset: data.read_at(36)?,
        priv_length: data.read_at(40)?,
    })
}

/// Read `num_tables` directory entries following the header, in file order.
pub fn read_table_directory(data: FontData, num_tables: u16) -> Result<Vec<TableDirectoryEntry>> {
    let malformed = || Error::MalformedTableDirectory { num_tables, len: data.len() };
    let end = WOFF_HEADER_SIZE + num_tables as usize * TABLE_DIRECTORY_ENTRY_SIZE;
    if data.len() < end {
        return Err(malformed());
    }

    (0..num_tables as usize)
        .map(|i| {
            let pos = WOFF_HEADER_SIZE + i * TABLE_DIRECTORY_ENTRY_SIZE;
            parse_entry(data, pos).map_err(|_| malformed())
        })
        .collect()
}

fn parse_entry(data: FontData, pos: usize) -> std::result::Result<TableDirectoryEntry, ReadError> {
    Ok(TableDirectoryEntry {
        tag: data.read_at(pos)?,
        offset: data.read_at(pos + 4)?,
        comp_length: data.read_at(pos + 8)?,
        orig_length: data.read_at(pos + 12)?,
        orig_checksum: data.read_at(pos + 16)?,
    })
}

/// Materialize one table's bytes, decompressing them if needed.
pub fn read_table(bytes: &[u8], entry: &TableDirectoryEntry) -> Result<Vec<u8>> {
    let out_of_bounds = || Error::TableOutOfBounds {
        tag: entry.tag,
        offset: entry.offset,
        length: entry.comp_length,
    };
    let start = entry.offset as usize;
    let end = start.checked_add(entry.comp_length as usize).ok_or_else(out_of_bounds)?;
    let stored = bytes.get(start..end).ok_or_else(out_of_bounds)?;

    if !entry.is_compressed() {
        debug!("{}: stored, {} bytes", entry.tag, entry.orig_length);
        return Ok(stored.to_vec());
    }

    let table = inflate(entry, stored)?;
    debug!("{}: inflated {} -> {} bytes", entry.tag, entry.comp_length, entry.orig_length);
    Ok(table)
}

fn inflate(entry: &TableDirectoryEntry, compressed: &[u8]) -> Result<Vec<u8>> {
    let expected = entry.orig_length as usize;
    let decode_error = |reason: String| Error::TableDecode { tag: entry.tag, reason };

    // One byte past the declared length is enough to detect overlong streams.
    let mut decoder = ZlibDecoder::new(compressed).take(entry.orig_length as u64 + 1);
    let mut table = Vec::new();
    decoder.read_to_end(&mut table).map_err(|e| decode_error(e.to_string()))?;

    if table.len() > expected {
        return Err(decode_error(format!("decompressed data exceeds {expected} bytes")));
    }
    if table.len() < expected {
        return Err(decode_error(format!(
            "decompressed to {} bytes, expected {expected}",
            table.len()
        )));
    }
    Ok(table)
}
