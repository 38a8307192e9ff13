//! Still-image overlap detection.
//!
//! Finds how many rows at the bottom of the first image reappear at the top
//! of the second. A banded row-profile pass proposes a handful of overlap
//! heights, then full strips are compared around each proposal.

use std::collections::BTreeSet;

use rayon::prelude::*;
use tracing::debug;

use crate::cancel::CancelToken;
use crate::color::grayscale::{to_gray, ColumnSampling};
use crate::config::OverlapConfig;
use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::{InputError, Result};
use crate::frame::{validate, PixelSource};

use super::profile::{banded_distances, pick_candidates};
use super::similarity::{band_similarity, select_best, Band};

/// Region of the first image reproduced at the top of the second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlapResult {
    /// First row of the overlap inside image 1.
    pub offset_y: usize,
    /// Number of overlapping rows; 0 means no overlap was found.
    pub overlap_height: usize,
    /// Similarity of the overlapping strips, in [0.0, 1.0].
    pub confidence: f64,
}

impl OverlapResult {
    /// The "images do not overlap detectably" result.
    pub const NONE: Self = Self {
        offset_y: 0,
        overlap_height: 0,
        confidence: 0.0,
    };

    pub fn is_match(&self) -> bool {
        self.overlap_height > 0
    }
}

/// Find the overlap between two stills with the default configuration.
pub fn find_overlap(image1: &dyn PixelSource, image2: &dyn PixelSource) -> Result<OverlapResult> {
    find_overlap_with(image1, image2, &OverlapConfig::default(), &CancelToken::new())
}

/// Find the overlap between two stills.
///
/// # Errors
///
/// `InvalidInput` when either image is empty or malformed or the widths
/// differ, `InvalidConfig` for a bad `config`, `Cancelled` if `cancel`
/// fires during the search. Failing to find an overlap is not an error; it
/// yields [`OverlapResult::NONE`].
pub fn find_overlap_with(
    image1: &dyn PixelSource,
    image2: &dyn PixelSource,
    config: &OverlapConfig,
    cancel: &CancelToken,
) -> Result<OverlapResult> {
    validate(image1)?;
    validate(image2)?;
    if image1.width() != image2.width() {
        return Err(InputError::WidthMismatch {
            left: image1.width(),
            right: image2.width(),
        }
        .into());
    }
    config.validate()?;

    let sampling = ColumnSampling {
        step: config.column_step,
        ignore_right: config.ignore_right_columns,
    };
    let gray1 = to_gray(image1, &sampling);
    let gray2 = to_gray(image2, &sampling);
    cancel.check()?;

    let h1 = gray1.nrows();
    let max_h = h1.min(gray2.nrows());
    let min_h = config.min_overlap_rows.clamp(1, max_h);

    // Coarse: profile distance per height. Overlap height h aligns image 1
    // row (h1 - h + i) with image 2 row i, i.e. lag h1 - h.
    let distances = banded_distances(&gray1, &gray2, config.profile_bands);
    let ranked: Vec<(isize, f64)> = (min_h..=max_h)
        .rev()
        .filter_map(|h| distances.at((h1 - h) as isize).map(|d| (h as isize, d)))
        .collect();
    let radius = config.refine_radius;
    let coarse = pick_candidates(ranked, config.coarse_candidates, 2 * radius + 1);
    debug!(?coarse, min_h, max_h, "Coarse overlap candidates");

    // Fine: full-strip similarity around each coarse height.
    let heights: BTreeSet<usize> = coarse
        .iter()
        .flat_map(|&c| {
            let c = c as usize;
            c.saturating_sub(radius).max(min_h)..=(c + radius).min(max_h)
        })
        .collect();
    // Larger heights first: select_best keeps the first tied key, so this
    // order is what makes ties resolve toward the larger overlap.
    let heights: Vec<usize> = heights.into_iter().rev().collect();

    let score = |&h: &usize| -> Result<(usize, f64)> {
        cancel.check()?;
        let band = Band {
            top_a: h1 - h,
            top_b: 0,
            rows: h,
        };
        Ok((h, band_similarity(&gray1, &gray2, band, 1)))
    };

    let work = heights.iter().sum::<usize>() * gray1.ncols();
    let scored: Vec<(usize, f64)> = if work >= PARALLEL_PIXEL_THRESHOLD {
        heights.par_iter().map(score).collect::<Result<_>>()?
    } else {
        heights.iter().map(score).collect::<Result<_>>()?
    };

    let Some((best_h, best_score)) = select_best(&scored, config.tie_epsilon) else {
        return Ok(OverlapResult::NONE);
    };

    if best_score < config.min_similarity {
        debug!(
            best_h,
            best_score,
            floor = config.min_similarity,
            "No overlap above similarity floor"
        );
        return Ok(OverlapResult::NONE);
    }

    debug!(
        offset_y = h1 - best_h,
        overlap_height = best_h,
        confidence = best_score,
        "Overlap found"
    );
    Ok(OverlapResult {
        offset_y: h1 - best_h,
        overlap_height: best_h,
        confidence: best_score,
    })
}
