use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use scrollsnap_core::align::compare_frames_with;
use scrollsnap_core::cancel::CancelToken;
use scrollsnap_core::io::image_io::load_frame;

use crate::summary::print_shift;

#[derive(Args)]
pub struct ShiftArgs {
    /// Previous frame
    pub frame1: PathBuf,

    /// Current frame
    pub frame2: PathBuf,

    /// Mean pixel difference (0-255) below which the frames count as static
    #[arg(long)]
    pub static_threshold: Option<f64>,

    /// Config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &ShiftArgs) -> Result<()> {
    let session = super::config::load(args.config.as_deref())?.session;
    let threshold = args.static_threshold.unwrap_or(session.static_threshold);

    let frame1 = load_frame(&args.frame1)
        .with_context(|| format!("Failed to load {}", args.frame1.display()))?;
    let frame2 = load_frame(&args.frame2)
        .with_context(|| format!("Failed to load {}", args.frame2.display()))?;

    let result = compare_frames_with(
        &frame1,
        &frame2,
        threshold,
        &session.shift,
        &CancelToken::new(),
    )?;
    let motion = result.classify(threshold, session.shift.min_confidence);
    print_shift(&result, motion);
    Ok(())
}
