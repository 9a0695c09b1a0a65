//! lenscheck CLI: validate lesson content before it is published.
//!
//! Checks directive usage in articles, flags directives in files where they
//! do not render, and previews article and video excerpts.

mod commands;

use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
