//! Live frame-to-frame vertical shift estimation.

use std::collections::BTreeSet;

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::cancel::CancelToken;
use crate::color::grayscale::{to_gray, ColumnSampling};
use crate::config::ShiftConfig;
use crate::consts::{INTENSITY_SCALE, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{InputError, Result};
use crate::frame::{validate, PixelSource};

use super::profile::{banded_distances, pick_candidates};
use super::similarity::{band_similarity, mean_abs_diff, select_best, Band};

/// Vertical displacement between two consecutive frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShiftResult {
    /// Rows the content moved up between the frames, i.e. how far the view
    /// scrolled down. Positive when row `y` of the second frame shows row
    /// `y + dy` of the first; negative when scrolling back up.
    pub dy: i64,
    /// Similarity of the rows shared at `dy`, in [0.0, 1.0].
    pub confidence: f64,
    /// Mean absolute intensity difference of the unshifted frames, 0..=255.
    pub mean_diff: f64,
}

/// How a caller should treat a compared frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Motion {
    /// Nothing moved; drop the frame.
    Static,
    /// Confident shift by the given number of rows.
    Shift(i64),
    /// A shift was found but not trusted; wait for the next frame.
    Uncertain,
}

impl ShiftResult {
    pub fn is_static(&self, static_threshold: f64) -> bool {
        self.mean_diff < static_threshold
    }

    pub fn is_confident(&self, min_confidence: f64) -> bool {
        self.confidence >= min_confidence
    }

    pub fn classify(&self, static_threshold: f64, min_confidence: f64) -> Motion {
        if self.is_static(static_threshold) {
            Motion::Static
        } else if self.is_confident(min_confidence) {
            Motion::Shift(self.dy)
        } else {
            Motion::Uncertain
        }
    }
}

/// Compare two frames with the default [`ShiftConfig`].
pub fn compare_frames(
    buffer1: &dyn PixelSource,
    buffer2: &dyn PixelSource,
    static_threshold: f64,
) -> Result<ShiftResult> {
    compare_frames_with(
        buffer1,
        buffer2,
        static_threshold,
        &ShiftConfig::default(),
        &CancelToken::new(),
    )
}

/// Estimate how far the content of `buffer2` has moved relative to `buffer1`.
///
/// Frames whose mean difference is below `static_threshold` (8-bit units)
/// are reported as static: `dy = 0`, `confidence = 1.0`. Otherwise shifts up
/// to `max_shift_fraction` of the frame height are searched in both
/// directions.
///
/// # Errors
///
/// `InvalidInput` when a buffer is malformed or the two buffers differ in
/// dimensions or pixel format, `InvalidConfig` for a bad `config`,
/// `Cancelled` if `cancel` fires during the search.
pub fn compare_frames_with(
    buffer1: &dyn PixelSource,
    buffer2: &dyn PixelSource,
    static_threshold: f64,
    config: &ShiftConfig,
    cancel: &CancelToken,
) -> Result<ShiftResult> {
    validate(buffer1)?;
    validate(buffer2)?;
    if buffer1.width() != buffer2.width() || buffer1.height() != buffer2.height() {
        return Err(InputError::DimensionMismatch {
            left_width: buffer1.width(),
            left_height: buffer1.height(),
            right_width: buffer2.width(),
            right_height: buffer2.height(),
        }
        .into());
    }
    if buffer1.format() != buffer2.format() {
        return Err(InputError::FormatMismatch {
            left: buffer1.format(),
            right: buffer2.format(),
        }
        .into());
    }
    config.validate()?;

    let sampling = ColumnSampling {
        step: config.column_step,
        ignore_right: config.ignore_right_columns,
    };
    let gray1 = to_gray(buffer1, &sampling);
    let gray2 = to_gray(buffer2, &sampling);

    let mean_diff = mean_abs_diff(&gray1, &gray2, config.row_step) * INTENSITY_SCALE;
    if mean_diff < static_threshold {
        trace!(mean_diff, static_threshold, "Static frame");
        return Ok(ShiftResult {
            dy: 0,
            confidence: 1.0,
            mean_diff,
        });
    }
    cancel.check()?;

    let h = gray1.nrows();
    let min_rows = config.min_overlap_rows.clamp(1, h);
    let max_shift = ((h as f64 * config.max_shift_fraction) as usize).min(h - min_rows) as i64;

    // Coarse: shift dy aligns frame 1 row (i + dy) with frame 2 row i, i.e.
    // lag dy. Candidates are listed smallest |dy| first, positive before
    // negative, so equal distances favour the smaller motion.
    let distances = banded_distances(&gray1, &gray2, config.profile_bands);
    let preference = preference_order(max_shift);
    let ranked: Vec<(isize, f64)> = preference
        .iter()
        .filter_map(|&dy| distances.at(dy as isize).map(|d| (dy as isize, d)))
        .collect();
    let radius = config.refine_radius;
    let coarse = pick_candidates(ranked, config.coarse_candidates, 2 * radius + 1);
    debug!(?coarse, max_shift, mean_diff, "Coarse shift candidates");

    // Fine: strip similarity on the shared rows around each candidate.
    let window: BTreeSet<i64> = coarse
        .iter()
        .flat_map(|&c| {
            let c = c as i64;
            let r = radius as i64;
            (c - r).max(-max_shift)..=(c + r).min(max_shift)
        })
        .collect();
    // Kept in preference order: select_best keeps the first tied key.
    let shifts: Vec<i64> = preference
        .into_iter()
        .filter(|dy| window.contains(dy))
        .collect();

    let score = |&dy: &i64| -> Result<(i64, f64)> {
        cancel.check()?;
        let offset = dy.unsigned_abs() as usize;
        let band = if dy >= 0 {
            Band {
                top_a: offset,
                top_b: 0,
                rows: h - offset,
            }
        } else {
            Band {
                top_a: 0,
                top_b: offset,
                rows: h - offset,
            }
        };
        Ok((dy, band_similarity(&gray1, &gray2, band, config.row_step)))
    };

    let work = shifts.len() * h * gray1.ncols() / config.row_step;
    let scored: Vec<(i64, f64)> = if work >= PARALLEL_PIXEL_THRESHOLD {
        shifts.par_iter().map(score).collect::<Result<_>>()?
    } else {
        shifts.iter().map(score).collect::<Result<_>>()?
    };

    let (dy, confidence) = select_best(&scored, config.tie_epsilon).unwrap_or((0, 0.0));
    debug!(dy, confidence, mean_diff, "Frame shift estimated");

    Ok(ShiftResult {
        dy,
        confidence,
        mean_diff,
    })
}

/// 0, 1, -1, 2, -2, ... up to `max_shift`.
fn preference_order(max_shift: i64) -> Vec<i64> {
    let mut order = Vec::with_capacity(2 * max_shift as usize + 1);
    order.push(0);
    for s in 1..=max_shift {
        order.push(s);
        order.push(-s);
    }
    order
}
