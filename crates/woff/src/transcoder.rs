//! WOFF to OTF conversion.

use log::{Level, log, warn};

use crate::{
    error::{Error, Result},
    reader::read_woff,
    writer::{SearchRange, write_otf_with},
};

/// Options for WOFF to OTF conversion.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Log a summary of each conversion at `info` instead of `debug`.
    pub verbose: bool,

    /// How the SFNT search range fields are computed.
    pub search_range: SearchRange,

    /// Reject input whose signature is not `wOFF`.
    pub require_signature: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn search_range(mut self, search_range: SearchRange) -> Self {
        self.search_range = search_range;
        self
    }

    pub fn require_signature(mut self, require_signature: bool) -> Self {
        self.require_signature = require_signature;
        self
    }
}

/// Converts WOFF files to OTF.
///
/// A transcoder holds only its options, so one instance can be shared across
/// threads converting independent buffers.
#[derive(Debug, Clone, Default)]
pub struct Transcoder {
    options: Options,
}

impl Transcoder {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Convert a WOFF file to an OTF file.
    ///
    /// Fails without producing output if the input is truncated or a table
    /// cannot be decompressed.
    pub fn convert(&self, woff: &[u8]) -> Result<Vec<u8>> {
        let font = read_woff(woff)?;

        let header = font.header();
        if !header.has_woff_signature() {
            if self.options.require_signature {
                return Err(Error::InvalidSignature { signature: header.signature });
            }
            warn!("Unexpected WOFF signature {:#010x}, converting anyway", header.signature);
        }

        let otf = write_otf_with(&font, self.options.search_range);

        let level = if self.options.verbose { Level::Info } else { Level::Debug };
        log!(
            level,
            "Converted {} tables ({} -> {} bytes)",
            font.num_tables(),
            woff.len(),
            otf.len()
        );
        Ok(otf)
    }
}

/// Convert a WOFF file to an OTF file using default options.
pub fn convert(woff: &[u8]) -> Result<Vec<u8>> {
    Transcoder::default().convert(woff)
}
