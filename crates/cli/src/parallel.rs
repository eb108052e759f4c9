//! Parallel file processing utilities.

use std::path::Path;

use anyhow::{Context, Result, bail};
use rayon::prelude::*;

/// Result of a parallel batch operation.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchResult {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    pub fn ok_or_bail(&self, operation: &str) -> Result<()> {
        if self.failed > 0 {
            bail!("{operation} failed: {} succeeded, {} failed", self.succeeded, self.failed);
        }
        Ok(())
    }
}

/// Run an operation on multiple files in parallel with consistent error reporting.
///
/// Failures are printed as they are collected and counted; they do not stop
/// the remaining items.
pub fn run_parallel<T, F>(label: &str, items: &[T], op: F) -> BatchResult
where
    T: AsRef<Path> + Sync,
    F: Fn(&Path) -> Result<()> + Sync,
{
    let results: Vec<Result<()>> = items
        .par_iter()
        .map(|item| {
            let path = item.as_ref();
            op(path).with_context(|| format!("Failed to process {}", path.display()))
        })
        .collect();

    let mut result = BatchResult::default();
    for r in &results {
        if let Err(e) = r {
            eprintln!("{e:?}");
            result.failed += 1;
        } else {
            result.succeeded += 1;
        }
    }

    println!("{label}: {} succeeded, {} failed", result.succeeded, result.failed);
    result
}
