//! SFNT (OpenType/TrueType) container serialization.
//!
//! Reference: <https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory>

use crate::{font::ParsedFont, header::pad4};

/// Size of the SFNT header in bytes.
pub const SFNT_HEADER_SIZE: usize = 12;

/// Size of one SFNT table record in bytes.
pub const TABLE_RECORD_SIZE: usize = 16;

/// How the binary search hints of the SFNT header are derived from the table
/// count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchRange {
    /// The OpenType formula, based on the largest power of two not greater
    /// than the table count.
    #[default]
    PowerOfTwo,
    /// Based on the largest perfect square strictly below the table count.
    ///
    /// Reproduces the output of earlier typelift releases byte for byte.
    Legacy,
}

/// The 12-byte SFNT header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SfntHeader {
    pub sfnt_version: u32,
    pub num_tables: u16,
    pub search_range: u16,
    pub entry_selector: u16,
    pub range_shift: u16,
}

impl SfntHeader {
    pub fn new(sfnt_version: u32, num_tables: u16, mode: SearchRange) -> Self {
        let n = num_tables as u32;
        let (entry_selector, search_range) = match mode {
            SearchRange::PowerOfTwo if n == 0 => (0, 0),
            SearchRange::PowerOfTwo => {
                let selector = n.ilog2();
                (selector, (1 << selector) * TABLE_RECORD_SIZE as u32)
            }
            SearchRange::Legacy => (0..64u32)
                .filter(|ii| ii * ii < n)
                .last()
                .map_or((0, 0), |ii| (ii, ii * ii * TABLE_RECORD_SIZE as u32)),
        };
        let range_shift = n * TABLE_RECORD_SIZE as u32 - search_range;

        // Only absurd table counts overflow the 16-bit fields; they wrap.
        Self {
            sfnt_version,
            num_tables,
            search_range: search_range as u16,
            entry_selector: entry_selector as u16,
            range_shift: range_shift as u16,
        }
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.sfnt_version.to_be_bytes());
        out.extend_from_slice(&self.num_tables.to_be_bytes());
        out.extend_from_slice(&self.search_range.to_be_bytes());
        out.extend_from_slice(&self.entry_selector.to_be_bytes());
        out.extend_from_slice(&self.range_shift.to_be_bytes());
    }
}

/// Serialize a parsed font as an SFNT file using the OpenType search range.
pub fn write_otf(font: &ParsedFont) -> Vec<u8> {
    write_otf_with(font, SearchRange::default())
}

/// Serialize a parsed font as an SFNT file.
///
/// Tables keep the order of the WOFF directory and their checksums are copied
/// through unchanged. Each table starts on a 4-byte boundary; padding is zero.
pub fn write_otf_with(font: &ParsedFont, mode: SearchRange) -> Vec<u8> {
    let entries = font.entries();
    debug_assert_eq!(entries.len(), font.header().num_tables as usize);

    let header = SfntHeader::new(font.header().flavor, font.header().num_tables, mode);
    let offsets = table_offsets(font);
    let total_len = SFNT_HEADER_SIZE
        + entries.len() * TABLE_RECORD_SIZE
        + entries.iter().map(|e| e.padded_length()).sum::<usize>();
    debug_assert!(total_len <= u32::MAX as usize, "SFNT output exceeds 4 GiB");

    let mut out = Vec::with_capacity(total_len);
    header.write_to(&mut out);

    for (entry, offset) in entries.iter().zip(&offsets) {
        out.extend_from_slice(&entry.tag.to_be_bytes());
        out.extend_from_slice(&entry.orig_checksum.to_be_bytes());
        out.extend_from_slice(&record_offset(*offset).to_be_bytes());
        out.extend_from_slice(&entry.orig_length.to_be_bytes());
    }

    for ((_, data), offset) in font.tables().zip(&offsets) {
        debug_assert_eq!(out.len(), *offset);
        out.extend_from_slice(data);
        out.resize(pad4(out.len()), 0);
    }

    debug_assert_eq!(out.len(), total_len);
    out
}

/// A table offset as stored in its 32-bit directory record.
fn record_offset(offset: usize) -> u32 {
    debug_assert!(offset <= u32::MAX as usize, "table offset {offset} exceeds 32 bits");
    offset as u32
}

/// Absolute offset of every table in the SFNT output, in directory order.
pub fn table_offsets(font: &ParsedFont) -> Vec<usize> {
    let mut offset = SFNT_HEADER_SIZE + font.num_tables() * TABLE_RECORD_SIZE;
    font.entries()
        .iter()
        .map(|entry| {
            let this = offset;
            offset += entry.padded_length();
            this
        })
        .collect()
}
