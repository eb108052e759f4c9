//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use typelift_woff::{Options, SearchRange, Transcoder};

use crate::{
    config::DEFAULT_WOFF_PATTERN,
    convert::{convert_dir, convert_files},
    extract::Extractor,
};

#[derive(Parser)]
#[command(name = "typelift")]
#[command(about = "Convert WOFF fonts to OpenType and extract Typekit web fonts")]
pub struct Cli {
    /// Print detailed output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct TranscodeArgs {
    /// Compute searchRange, entrySelector and rangeShift the way earlier
    /// releases did instead of with the OpenType formula
    #[arg(long)]
    pub legacy_search_range: bool,

    /// Reject input that does not start with the `wOFF` signature
    #[arg(long)]
    pub strict: bool,
}

impl TranscodeArgs {
    pub fn options(&self, verbose: bool) -> Options {
        let search_range =
            if self.legacy_search_range { SearchRange::Legacy } else { SearchRange::PowerOfTwo };
        Options::new().verbose(verbose).search_range(search_range).require_signature(self.strict)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert WOFF files to OTF
    Convert {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Output file (single input only)
        #[arg(short, long, conflicts_with = "out_dir")]
        output: Option<PathBuf>,
        /// Directory for converted files (defaults to next to each input)
        #[arg(long)]
        out_dir: Option<PathBuf>,
        #[command(flatten)]
        args: TranscodeArgs,
    },
    /// Convert every WOFF file in a directory
    ConvertDir {
        dir: PathBuf,
        #[arg(long, default_value = DEFAULT_WOFF_PATTERN)]
        pattern: String,
        #[arg(long)]
        out_dir: Option<PathBuf>,
        #[command(flatten)]
        args: TranscodeArgs,
    },
    /// Extract Typekit fonts from web pages as OTF files
    Extract {
        #[arg(required = true)]
        urls: Vec<String>,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        #[command(flatten)]
        args: TranscodeArgs,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let verbose = self.verbose;
        match self.command {
            Commands::Convert { inputs, output, out_dir, args } => {
                let transcoder = Transcoder::new(args.options(verbose));
                convert_files(&transcoder, &inputs, output.as_deref(), out_dir.as_deref())?;
            }
            Commands::ConvertDir { dir, pattern, out_dir, args } => {
                let transcoder = Transcoder::new(args.options(verbose));
                convert_dir(&transcoder, &dir, &pattern, out_dir.as_deref())?;
            }
            Commands::Extract { urls, out_dir, args } => {
                let extractor = Extractor::new(Transcoder::new(args.options(verbose)))?;
                for url in &urls {
                    extractor.extract(url, &out_dir)?;
                }
            }
        }
        Ok(())
    }
}
