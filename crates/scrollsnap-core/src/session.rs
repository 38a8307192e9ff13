//! Caller-side anchor bookkeeping for a live capture stream.
//!
//! The shift tracker itself is stateless. `ScrollSession` keeps the last
//! committed frame, throttles how often frames are compared against it, and
//! records every commit together with its cumulative offset.

use tracing::{debug, info};

use crate::align::shift::{compare_frames_with, Motion};
use crate::cancel::CancelToken;
use crate::config::SessionConfig;
use crate::error::Result;
use crate::frame::{OwnedFrame, PixelSource};

/// Outcome of pushing one frame into a [`ScrollSession`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameDecision {
    /// Not compared (throttled).
    Skipped,
    /// The frame became the new anchor.
    Committed { index: usize, dy: i64 },
    /// No motion since the anchor.
    Static,
    /// Confident motion that does not advance the capture: too small to be
    /// worth a new anchor, or a scroll back up.
    Held { dy: i64 },
    /// Motion could not be measured reliably.
    Uncertain { confidence: f64 },
}

/// One committed anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Commit {
    pub index: usize,
    /// Shift relative to the previous commit (0 for the first one).
    pub dy: i64,
    /// Sum of all shifts since the first commit.
    pub total_offset: i64,
}

pub struct ScrollSession {
    config: SessionConfig,
    anchor: Option<OwnedFrame>,
    frames_seen: usize,
    commits: Vec<Commit>,
    cancel: CancelToken,
}

impl ScrollSession {
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            anchor: None,
            frames_seen: 0,
            commits: Vec::new(),
            cancel: CancelToken::new(),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The last committed frame, if any.
    pub fn anchor(&self) -> Option<&OwnedFrame> {
        self.anchor.as_ref()
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    /// Token that aborts the comparison currently running in `push_frame`.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Drop the anchor and commit log and start over.
    pub fn reset(&mut self) {
        self.anchor = None;
        self.frames_seen = 0;
        self.commits.clear();
        self.cancel = CancelToken::new();
    }

    /// Feed the next frame of the stream.
    ///
    /// The frame is copied only when it becomes the new anchor, so the
    /// caller may recycle its buffer as soon as this returns.
    pub fn push_frame(&mut self, frame: &dyn PixelSource) -> Result<FrameDecision> {
        let seen = self.frames_seen;
        self.frames_seen += 1;
        if seen % self.config.frame_interval != 0 {
            return Ok(FrameDecision::Skipped);
        }

        let Some(anchor) = self.anchor.as_ref() else {
            return self.commit(frame, 0);
        };

        let result = compare_frames_with(
            anchor,
            frame,
            self.config.static_threshold,
            &self.config.shift,
            &self.cancel,
        )?;

        match result.classify(self.config.static_threshold, self.config.shift.min_confidence) {
            Motion::Static => {
                debug!(mean_diff = result.mean_diff, "Static frame discarded");
                Ok(FrameDecision::Static)
            }
            Motion::Uncertain => {
                debug!(
                    dy = result.dy,
                    confidence = result.confidence,
                    "Ambiguous motion, holding anchor"
                );
                Ok(FrameDecision::Uncertain {
                    confidence: result.confidence,
                })
            }
            Motion::Shift(dy) if dy > self.config.min_commit_shift => self.commit(frame, dy),
            Motion::Shift(dy) => {
                debug!(dy, "Shift does not advance past commit threshold, holding anchor");
                Ok(FrameDecision::Held { dy })
            }
        }
    }

    fn commit(&mut self, frame: &dyn PixelSource, dy: i64) -> Result<FrameDecision> {
        let owned = OwnedFrame::copy_from(frame)?;
        let index = self.commits.len();
        let total_offset = self.commits.last().map_or(0, |c| c.total_offset) + dy;
        self.commits.push(Commit {
            index,
            dy,
            total_offset,
        });
        self.anchor = Some(owned);
        info!(index, dy, total_offset, "Anchor committed");
        Ok(FrameDecision::Committed { index, dy })
    }
}
