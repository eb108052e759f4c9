use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};
use typelift_cli::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "info" } else { "warn" };
    Builder::from_env(Env::default().default_filter_or(default_filter)).init();
    cli.run()
}
