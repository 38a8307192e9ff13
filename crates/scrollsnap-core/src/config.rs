use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_COARSE_CANDIDATES, DEFAULT_FRAME_INTERVAL, DEFAULT_MAX_SHIFT_FRACTION,
    DEFAULT_MIN_COMMIT_SHIFT, DEFAULT_MIN_OVERLAP_ROWS, DEFAULT_MIN_SIMILARITY, DEFAULT_PROFILE_BANDS,
    DEFAULT_REFINE_RADIUS, DEFAULT_SHIFT_COLUMN_STEP, DEFAULT_SHIFT_MIN_CONFIDENCE,
    DEFAULT_SHIFT_ROW_STEP, DEFAULT_STATIC_THRESHOLD, DEFAULT_TIE_EPSILON,
};
use crate::error::{Result, ScrollError};

/// Top-level configuration file layout.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollsnapConfig {
    #[serde(default)]
    pub overlap: OverlapConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl ScrollsnapConfig {
    pub fn validate(&self) -> Result<()> {
        self.overlap.validate()?;
        self.session.validate()
    }
}

/// Tunables for still-image overlap detection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlapConfig {
    /// Smallest overlap height considered, in rows.
    pub min_overlap_rows: usize,
    /// Similarity floor; best matches below it are reported as no overlap.
    pub min_similarity: f64,
    /// Scores within this band of the best count as tied (larger overlap wins).
    pub tie_epsilon: f64,
    /// Number of coarse profile candidates refined at full resolution.
    pub coarse_candidates: usize,
    /// Rows searched on each side of a coarse candidate.
    pub refine_radius: usize,
    /// Column bands profiled separately by the coarse search.
    pub profile_bands: usize,
    /// Compare every n-th column.
    pub column_step: usize,
    /// Columns at the right edge excluded from comparison.
    pub ignore_right_columns: usize,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            min_overlap_rows: DEFAULT_MIN_OVERLAP_ROWS,
            min_similarity: DEFAULT_MIN_SIMILARITY,
            tie_epsilon: DEFAULT_TIE_EPSILON,
            coarse_candidates: DEFAULT_COARSE_CANDIDATES,
            refine_radius: DEFAULT_REFINE_RADIUS,
            profile_bands: DEFAULT_PROFILE_BANDS,
            column_step: 1,
            ignore_right_columns: 0,
        }
    }
}

impl OverlapConfig {
    pub fn validate(&self) -> Result<()> {
        check_unit("min_similarity", self.min_similarity)?;
        check_search(
            self.tie_epsilon,
            self.coarse_candidates,
            self.profile_bands,
            self.column_step,
        )
    }
}

/// Tunables for live frame-to-frame shift estimation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftConfig {
    /// Largest shift searched, as a fraction of the frame height.
    pub max_shift_fraction: f64,
    /// Rows the two frames must still share at the largest shift.
    pub min_overlap_rows: usize,
    /// Confidence a shift needs before a caller should commit it.
    pub min_confidence: f64,
    /// Scores within this band of the best count as tied (smaller shift wins).
    pub tie_epsilon: f64,
    pub coarse_candidates: usize,
    pub refine_radius: usize,
    pub profile_bands: usize,
    pub column_step: usize,
    /// Row sampling step for the mean difference and fine comparison.
    pub row_step: usize,
    pub ignore_right_columns: usize,
}

impl Default for ShiftConfig {
    fn default() -> Self {
        Self {
            max_shift_fraction: DEFAULT_MAX_SHIFT_FRACTION,
            min_overlap_rows: DEFAULT_MIN_OVERLAP_ROWS,
            min_confidence: DEFAULT_SHIFT_MIN_CONFIDENCE,
            tie_epsilon: DEFAULT_TIE_EPSILON,
            coarse_candidates: DEFAULT_COARSE_CANDIDATES,
            refine_radius: DEFAULT_REFINE_RADIUS,
            profile_bands: DEFAULT_PROFILE_BANDS,
            column_step: DEFAULT_SHIFT_COLUMN_STEP,
            row_step: DEFAULT_SHIFT_ROW_STEP,
            ignore_right_columns: 0,
        }
    }
}

impl ShiftConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.max_shift_fraction) {
            return Err(ScrollError::InvalidConfig(format!(
                "max_shift_fraction must be in [0, 1), got {}",
                self.max_shift_fraction
            )));
        }
        check_unit("min_confidence", self.min_confidence)?;
        if self.row_step == 0 {
            return Err(ScrollError::InvalidConfig("row_step must be > 0".into()));
        }
        check_search(
            self.tie_epsilon,
            self.coarse_candidates,
            self.profile_bands,
            self.column_step,
        )
    }
}

/// Tunables for a live capture session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Compare one frame out of every `frame_interval` pushed frames.
    pub frame_interval: usize,
    /// A confident forward shift must exceed this many rows to be committed.
    pub min_commit_shift: i64,
    /// Mean difference (8-bit units) below which a frame is static.
    pub static_threshold: f64,
    pub shift: ShiftConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frame_interval: DEFAULT_FRAME_INTERVAL,
            min_commit_shift: DEFAULT_MIN_COMMIT_SHIFT,
            static_threshold: DEFAULT_STATIC_THRESHOLD,
            shift: ShiftConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.frame_interval == 0 {
            return Err(ScrollError::InvalidConfig(
                "frame_interval must be > 0".into(),
            ));
        }
        if self.min_commit_shift < 0 {
            return Err(ScrollError::InvalidConfig(format!(
                "min_commit_shift must be >= 0, got {}",
                self.min_commit_shift
            )));
        }
        if !self.static_threshold.is_finite() || self.static_threshold < 0.0 {
            return Err(ScrollError::InvalidConfig(format!(
                "static_threshold must be a non-negative number, got {}",
                self.static_threshold
            )));
        }
        self.shift.validate()
    }
}

fn check_unit(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ScrollError::InvalidConfig(format!(
            "{name} must be in [0, 1], got {value}"
        )))
    }
}

fn check_search(
    tie_epsilon: f64,
    coarse_candidates: usize,
    profile_bands: usize,
    column_step: usize,
) -> Result<()> {
    if !tie_epsilon.is_finite() || tie_epsilon < 0.0 {
        return Err(ScrollError::InvalidConfig(format!(
            "tie_epsilon must be a non-negative number, got {tie_epsilon}"
        )));
    }
    if coarse_candidates == 0 {
        return Err(ScrollError::InvalidConfig(
            "coarse_candidates must be > 0".into(),
        ));
    }
    if profile_bands == 0 {
        return Err(ScrollError::InvalidConfig(
            "profile_bands must be > 0".into(),
        ));
    }
    if column_step == 0 {
        return Err(ScrollError::InvalidConfig("column_step must be > 0".into()));
    }
    Ok(())
}
