use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use scrollsnap_core::config::ScrollsnapConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save the default ScrollsnapConfig as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let config = ScrollsnapConfig::default();
    let toml_str = toml::to_string_pretty(&config)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}

/// Load a TOML config file, or the defaults when no path is given.
pub fn load(path: Option<&Path>) -> Result<ScrollsnapConfig> {
    let config: ScrollsnapConfig = match path {
        Some(config_path) => {
            let contents = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config {}", config_path.display()))?;
            toml::from_str(&contents).context("Invalid scrollsnap config")?
        }
        None => ScrollsnapConfig::default(),
    };
    config.validate()?;
    Ok(config)
}
