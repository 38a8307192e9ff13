/// Minimum pixel count (h*w) to use Rayon parallelism for strip comparisons.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Scale from normalized intensity [0, 1] to 8-bit intensity units.
pub const INTENSITY_SCALE: f64 = 255.0;

/// Lower bound on the strip spread used to normalize the mean absolute
/// difference, so nearly flat strips (blank page margins) do not blow up
/// the score. Equivalent to 8 intensity levels out of 255.
pub const MIN_SPREAD: f64 = 8.0 / 255.0;

/// Default smallest overlap height, in rows, considered by the overlap matcher.
pub const DEFAULT_MIN_OVERLAP_ROWS: usize = 8;

/// Default similarity floor below which an overlap is reported as "no match".
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.5;

/// Default score band within which candidates count as tied.
pub const DEFAULT_TIE_EPSILON: f64 = 1e-3;

/// Default number of coarse profile candidates refined at full resolution.
pub const DEFAULT_COARSE_CANDIDATES: usize = 4;

/// Default half-width (in rows) of the fine search around each coarse candidate.
pub const DEFAULT_REFINE_RADIUS: usize = 3;

/// Default largest inter-frame scroll, as a fraction of the frame height.
pub const DEFAULT_MAX_SHIFT_FRACTION: f64 = 1.0 / 3.0;

/// Default minimum shift confidence for a frame to be committed.
pub const DEFAULT_SHIFT_MIN_CONFIDENCE: f64 = 0.6;

/// Default column sampling step for live frame comparison.
pub const DEFAULT_SHIFT_COLUMN_STEP: usize = 2;

/// Default row sampling step for the live mean-difference estimate.
pub const DEFAULT_SHIFT_ROW_STEP: usize = 2;

/// Default number of pushed frames per compared frame in a capture session.
/// At 60 fps this is ten comparisons per second.
pub const DEFAULT_FRAME_INTERVAL: usize = 6;

/// Default shift (in rows) a confident match must exceed to be committed.
pub const DEFAULT_MIN_COMMIT_SHIFT: i64 = 10;

/// Default mean-difference threshold (8-bit units) for static frames.
pub const DEFAULT_STATIC_THRESHOLD: f64 = 2.0;

/// Default number of column bands profiled by the coarse search.
pub const DEFAULT_PROFILE_BANDS: usize = 8;

/// Spread of coarse profile distances below which no lag stands out and the
/// coarse search falls back to a regular candidate grid.
pub const FLAT_PROFILE_TOLERANCE: f64 = 1e-9;
