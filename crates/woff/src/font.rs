//! The decoded form of a WOFF file.

use read_fonts::types::Tag;

use crate::header::{TableDirectoryEntry, WoffHeader};

/// A WOFF file with every table decompressed.
///
/// Entries keep the order of the input table directory, and `tables[i]` holds
/// the decompressed bytes described by `entries[i]`.
#[derive(Debug, Clone)]
pub struct ParsedFont {
    header: WoffHeader,
    entries: Vec<TableDirectoryEntry>,
    tables: Vec<Vec<u8>>,
}

impl ParsedFont {
    /// Assemble a parsed font from its parts.
    ///
    /// # Panics
    ///
    /// Panics if the entry count, the table count, and `header.num_tables`
    /// disagree, or if a table's length differs from its entry's
    /// `orig_length`.
    pub fn from_parts(
        header: WoffHeader,
        entries: Vec<TableDirectoryEntry>,
        tables: Vec<Vec<u8>>,
    ) -> Self {
        assert_eq!(entries.len(), header.num_tables as usize, "entry count mismatch");
        assert_eq!(entries.len(), tables.len(), "table count mismatch");
        for (entry, table) in entries.iter().zip(&tables) {
            assert_eq!(
                table.len(),
                entry.orig_length as usize,
                "'{}' table length mismatch",
                entry.tag
            );
        }
        Self { header, entries, tables }
    }

    pub fn header(&self) -> &WoffHeader {
        &self.header
    }

    pub fn entries(&self) -> &[TableDirectoryEntry] {
        &self.entries
    }

    pub fn num_tables(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over directory entries paired with their table bytes, in
    /// directory order.
    pub fn tables(&self) -> impl ExactSizeIterator<Item = (&TableDirectoryEntry, &[u8])> {
        self.entries.iter().zip(self.tables.iter().map(Vec::as_slice))
    }

    /// Bytes of the first table with the given tag.
    pub fn table(&self, tag: Tag) -> Option<&[u8]> {
        self.tables().find(|(entry, _)| entry.tag == tag).map(|(_, data)| data)
    }

    pub fn into_parts(self) -> (WoffHeader, Vec<TableDirectoryEntry>, Vec<Vec<u8>>) {
        (self.header, self.entries, self.tables)
    }
}
