//! WOFF fixtures built in memory for unit tests.

use std::io::Write;

use flate2::{Compression, write::ZlibEncoder};

use crate::header::{TABLE_DIRECTORY_ENTRY_SIZE, WOFF_HEADER_SIZE, WOFF_SIGNATURE, pad4};

pub const TRUETYPE_FLAVOR: u32 = 0x0001_0000;

pub struct TestTable {
    pub tag: [u8; 4],
    pub data: Vec<u8>,
    pub compress: bool,
    pub checksum: u32,
}

impl TestTable {
    pub fn stored(tag: &[u8; 4], data: &[u8], checksum: u32) -> Self {
        Self { tag: *tag, data: data.to_vec(), compress: false, checksum }
    }

    pub fn compressed(tag: &[u8; 4], data: &[u8], checksum: u32) -> Self {
        Self { tag: *tag, data: data.to_vec(), compress: true, checksum }
    }
}

pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Build a WOFF file with the tables laid out after the directory, each
/// starting on a 4-byte boundary.
pub fn build_woff(tables: &[TestTable]) -> Vec<u8> {
    let payloads: Vec<Vec<u8>> = tables
        .iter()
        .map(|t| if t.compress { zlib(&t.data) } else { t.data.clone() })
        .collect();

    let mut offset = WOFF_HEADER_SIZE + tables.len() * TABLE_DIRECTORY_ENTRY_SIZE;
    let mut directory = Vec::new();
    let mut body = Vec::new();
    for (table, payload) in tables.iter().zip(&payloads) {
        directory.extend_from_slice(&table.tag);
        directory.extend_from_slice(&(offset as u32).to_be_bytes());
        directory.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        directory.extend_from_slice(&(table.data.len() as u32).to_be_bytes());
        directory.extend_from_slice(&table.checksum.to_be_bytes());
        body.extend_from_slice(payload);
        body.resize(pad4(body.len()), 0);
        offset = WOFF_HEADER_SIZE + tables.len() * TABLE_DIRECTORY_ENTRY_SIZE + body.len();
    }

    let total_sfnt_size =
        12 + 16 * tables.len() + tables.iter().map(|t| pad4(t.data.len())).sum::<usize>();
    let length = WOFF_HEADER_SIZE + directory.len() + body.len();

    let mut out = Vec::with_capacity(length);
    out.extend_from_slice(&WOFF_SIGNATURE.to_be_bytes());
    out.extend_from_slice(&TRUETYPE_FLAVOR.to_be_bytes());
    out.extend_from_slice(&(length as u32).to_be_bytes());
    out.extend_from_slice(&(tables.len() as u16).to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(&(total_sfnt_size as u32).to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(&[0; 20]);
    out.extend_from_slice(&directory);
    out.extend_from_slice(&body);
    out
}
