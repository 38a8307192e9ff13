use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use scrollsnap_core::align::find_overlap_with;
use scrollsnap_core::cancel::CancelToken;
use scrollsnap_core::frame::OwnedFrame;
use scrollsnap_core::io::image_io::load_frame;
use scrollsnap_core::session::{FrameDecision, ScrollSession};
use tracing::debug;

use crate::summary::{print_scan, DecisionCounts, ScanRow};

#[derive(Args)]
pub struct ScanArgs {
    /// Frames in capture order
    #[arg(required = true)]
    pub frames: Vec<PathBuf>,

    /// Compare one frame out of every N (overrides the config)
    #[arg(long)]
    pub frame_interval: Option<usize>,

    /// Mean pixel difference (0-255) below which a frame counts as static
    #[arg(long)]
    pub static_threshold: Option<f64>,

    /// Config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &ScanArgs) -> Result<()> {
    let config = super::config::load(args.config.as_deref())?;
    let mut session_config = config.session.clone();
    if let Some(n) = args.frame_interval {
        session_config.frame_interval = n;
    }
    if let Some(t) = args.static_threshold {
        session_config.static_threshold = t;
    }
    let mut session = ScrollSession::new(session_config)?;

    let pb = ProgressBar::new(args.frames.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Tracking frames");

    let mut counts = DecisionCounts::default();
    let mut committed: Vec<(PathBuf, OwnedFrame)> = Vec::new();
    for (i, path) in args.frames.iter().enumerate() {
        let frame =
            load_frame(path).with_context(|| format!("Failed to load {}", path.display()))?;
        let decision = session.push_frame(&frame)?;
        debug!(path = %path.display(), ?decision, "Frame processed");
        match decision {
            FrameDecision::Committed { .. } => {
                counts.committed += 1;
                committed.push((path.clone(), frame));
            }
            FrameDecision::Skipped => counts.skipped += 1,
            FrameDecision::Static => counts.static_frames += 1,
            FrameDecision::Held { .. } => counts.held += 1,
            FrameDecision::Uncertain { .. } => counts.uncertain += 1,
        }
        pb.set_position(i as u64 + 1);
    }
    pb.finish_with_message(format!("Tracked {} frames", args.frames.len()));

    let cancel = CancelToken::new();
    let mut rows = Vec::with_capacity(session.commits().len());
    for (i, commit) in session.commits().iter().enumerate() {
        let overlap = if i == 0 {
            None
        } else {
            let (_, previous) = &committed[i - 1];
            let (_, current) = &committed[i];
            Some(find_overlap_with(previous, current, &config.overlap, &cancel)?)
        };
        rows.push(ScanRow {
            path: committed[i].0.clone(),
            commit: *commit,
            overlap,
        });
    }

    print_scan(&rows, &counts);
    Ok(())
}
