mod check;
mod render;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use eyre::Result;
use render::RenderCommand;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for crate::error::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "csforge")]
#[command(version)]
#[command(about = "Render C# source files from TOML manifests")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Render(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render a manifest to C# source
    Render(RenderCommand),

    /// Build a manifest without writing output
    Check(CheckCommand),
}
