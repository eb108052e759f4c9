//! WOFF 1.0 to OpenType conversion.
//!
//! Parses a WOFF container, inflates its zlib-compressed tables, and writes
//! the tables back out as an SFNT (`.otf`/`.ttf`) file. Tables are treated as
//! opaque bytes: checksums are copied through and the table set is not
//! validated.
//!
//! # Example
//!
//! ```no_run
//! use typelift_woff::{Options, SearchRange, Transcoder};
//!
//! let woff = std::fs::read("font.woff").unwrap();
//! let transcoder = Transcoder::new(Options::new().search_range(SearchRange::Legacy));
//! let otf = transcoder.convert(&woff).unwrap();
//! std::fs::write("font.otf", otf).unwrap();
//! ```

mod error;
mod font;
pub mod header;
pub mod reader;
mod transcoder;
pub mod writer;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
pub use font::ParsedFont;
pub use header::{TableDirectoryEntry, WOFF_SIGNATURE, WoffHeader};
pub use reader::read_woff;
pub use transcoder::{Options, Transcoder, convert};
pub use writer::{SearchRange, SfntHeader, write_otf, write_otf_with};
