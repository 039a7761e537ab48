use std::path::PathBuf;

use clap::Args;
use csforge_writer::IndentStyle;
use eyre::{Context, Result};

use super::UnwrapOrExit;
use crate::manifest::Manifest;

#[derive(Args)]
pub struct RenderCommand {
    /// Path to the manifest
    pub manifest: PathBuf,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Indentation, `spaces` or `tabs` (overrides the manifest setting)
    #[arg(long)]
    pub indent: Option<IndentStyle>,
}

impl RenderCommand {
    /// Run the render command
    pub fn run(&self) -> Result<()> {
        let manifest = Manifest::open(&self.manifest).unwrap_or_exit();
        let source = manifest.render(self.indent).unwrap_or_exit();

        match &self.output {
            Some(path) => {
                std::fs::write(path, &source)
                    .wrap_err_with(|| format!("failed to write {}", path.display()))?;
                eprintln!("✓ wrote {}", path.display());
            }
            None => print!("{}", source),
        }

        Ok(())
    }
}
