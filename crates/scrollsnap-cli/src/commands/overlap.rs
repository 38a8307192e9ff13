use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use scrollsnap_core::align::find_overlap_with;
use scrollsnap_core::cancel::CancelToken;
use scrollsnap_core::io::image_io::load_frame;

use crate::summary::print_overlap;

#[derive(Args)]
pub struct OverlapArgs {
    /// Earlier (upper) still
    pub image1: PathBuf,

    /// Later (lower) still
    pub image2: PathBuf,

    /// Config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the similarity floor (0-1)
    #[arg(long)]
    pub min_similarity: Option<f64>,
}

pub fn run(args: &OverlapArgs) -> Result<()> {
    let mut config = super::config::load(args.config.as_deref())?.overlap;
    if let Some(floor) = args.min_similarity {
        config.min_similarity = floor;
    }

    let image1 = load_frame(&args.image1)
        .with_context(|| format!("Failed to load {}", args.image1.display()))?;
    let image2 = load_frame(&args.image2)
        .with_context(|| format!("Failed to load {}", args.image2.display()))?;

    let result = find_overlap_with(&image1, &image2, &config, &CancelToken::new())?;
    print_overlap(&args.image1, &args.image2, &result, config.min_similarity);
    Ok(())
}
