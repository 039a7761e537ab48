use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::manifest::Manifest;

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the manifest
    pub manifest: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let manifest = Manifest::open(&self.manifest).unwrap_or_exit();
        let builder = manifest.to_builder(None).unwrap_or_exit();
        let source = builder
            .build()
            .map_err(crate::error::Error::builder)
            .unwrap_or_exit();

        println!("✓ {} is valid\n", self.manifest.display());
        println!(
            "  namespace {}",
            builder.namespace().unwrap_or("<global>")
        );

        let count = manifest.type_count();
        println!("  {} type{}:", count, if count == 1 { "" } else { "s" });
        for declaration in builder.types() {
            println!("    {}", declaration.name());
        }
        println!("\n  {} lines", source.lines().count());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_check_valid_manifest() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("csforge.toml");
        std::fs::write(
            &manifest,
            "namespace = \"Sample\"\n\n[[enums]]\nname = \"Color\"\nvalues = [{ name = \"Red\" }]\n",
        )
        .unwrap();

        CheckCommand { manifest }.run().unwrap();
    }
}
