use anyhow::Result;
use clap::Parser;

use gphotos::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    gphotos::check::run(&cli)
}
