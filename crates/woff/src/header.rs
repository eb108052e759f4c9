//! Fixed-field records of the WOFF 1.0 container.
//!
//! Reference: <https://www.w3.org/TR/WOFF/#WOFFHeader>

use read_fonts::types::Tag;

/// `wOFF`, the signature of a WOFF 1.0 file.
pub const WOFF_SIGNATURE: u32 = u32::from_be_bytes(*b"wOFF");

/// Size of the WOFF header in bytes.
pub const WOFF_HEADER_SIZE: usize = 44;

/// Size of one WOFF table directory entry in bytes.
pub const TABLE_DIRECTORY_ENTRY_SIZE: usize = 20;

/// The WOFF file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WoffHeader {
    pub signature: u32,
    /// The `sfntVersion` of the wrapped font, copied into the OTF header.
    pub flavor: u32,
    pub length: u32,
    pub num_tables: u16,
    pub reserved: u16,
    pub total_sfnt_size: u32,
    pub major_version: u16,
    pub minor_version: u16,
    pub meta_offset: u32,
    pub meta_length: u32,
    pub meta_orig_length: u32,
    pub priv_offset: u32,
    pub priv_length: u32,
}

impl WoffHeader {
    pub fn has_woff_signature(&self) -> bool {
        self.signature == WOFF_SIGNATURE
    }

    /// Size of the header plus the table directory that follows it.
    pub fn directory_end(&self) -> usize {
        WOFF_HEADER_SIZE + self.num_tables as usize * TABLE_DIRECTORY_ENTRY_SIZE
    }
}

/// One record of the WOFF table directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDirectoryEntry {
    pub tag: Tag,
    /// Offset of the table data from the start of the WOFF file.
    pub offset: u32,
    pub comp_length: u32,
    pub orig_length: u32,
    /// Carried into the OTF directory as is; never recomputed.
    pub orig_checksum: u32,
}

impl TableDirectoryEntry {
    /// Whether the stored bytes are zlib-compressed.
    pub fn is_compressed(&self) -> bool {
        self.comp_length != self.orig_length
    }

    /// Decompressed length rounded up to a 4-byte boundary.
    pub fn padded_length(&self) -> usize {
        pad4(self.orig_length as usize)
    }
}

/// Round `len` up to the next multiple of 4.
pub(crate) const fn pad4(len: usize) -> usize {
    (len + 3) & !3
}
