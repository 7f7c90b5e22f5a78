//! List build payloads stored in a directory

use anyhow::Result;
use clap::Parser;
use console::style;
use std::path::PathBuf;

use filter_content::PresetLoader;

/// List build payloads stored in a directory
#[derive(Parser)]
pub struct Presets {
    /// Directory holding payload JSON files
    #[arg(value_name = "DIR", env = "FILTER_PRESET_DIR", default_value = "presets")]
    dir: PathBuf,
}

impl Presets {
    pub fn execute(self) -> Result<()> {
        let presets = PresetLoader::list(&self.dir)?;

        println!(
            "{} {}",
            style("Preset Directory:").bold().cyan(),
            self.dir.display()
        );
        println!();

        if presets.is_empty() {
            println!("{}", style("No presets found").yellow());
            return Ok(());
        }

        for preset in presets {
            let file_name = preset
                .path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            println!("  {}  {}", style(preset.label).bold(), style(file_name).dim());
        }

        Ok(())
    }
}
