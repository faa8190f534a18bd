use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};
use ufo_convert_cli::cli::Cli;

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("warn")).init();
    Cli::parse().run()
}
