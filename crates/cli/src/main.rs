//! `culookup` — build and query the CU -> stock code lookup database.

mod cli;
mod commands;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    commands::run(cli)
}
