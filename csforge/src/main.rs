// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod commands;
mod error;
mod manifest;

use clap::Parser;
use eyre::Result;

use crate::commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    Cli::parse().run()
}
