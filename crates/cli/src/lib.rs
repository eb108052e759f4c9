//! Typelift CLI library.

pub mod cli;
pub mod config;
pub mod convert;
pub mod extract;
pub mod io;
pub mod parallel;

#[cfg(test)]
mod testing;
