#![deny(warnings)]

use anyhow::Context;
use clap::Parser;
use hokm_app::cli::{self, Cli};
use hokm_app::logging;

fn main() -> anyhow::Result<()> {
    logging::init();
    let args = Cli::parse();
    let summary = cli::run(&args).context("simulation failed")?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
