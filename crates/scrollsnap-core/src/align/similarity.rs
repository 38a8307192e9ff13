use ndarray::Array2;

use crate::consts::MIN_SPREAD;

/// A run of rows compared between two grayscale arrays: rows
/// `top_a..top_a + rows` of the first against `top_b..top_b + rows` of the
/// second.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Band {
    pub top_a: usize,
    pub top_b: usize,
    pub rows: usize,
}

/// Similarity of two equally wide strips, in [0.0, 1.0].
///
/// Computed as `1 - MAD / spread`, where MAD is the mean absolute
/// difference between the strips and spread is the mean absolute deviation
/// of the first strip around its own mean (floored at [`MIN_SPREAD`]).
/// Pixel-identical strips score exactly 1.0. Only every `row_step`-th row
/// of the band is visited.
pub fn band_similarity(a: &Array2<f32>, b: &Array2<f32>, band: Band, row_step: usize) -> f64 {
    let step = row_step.max(1);
    let rows: Vec<usize> = (0..band.rows).step_by(step).collect();
    if rows.is_empty() || a.ncols() == 0 {
        return 0.0;
    }

    let mut diff_sum = 0.0f64;
    let mut value_sum = 0.0f64;
    for &r in &rows {
        let ra = a.row(band.top_a + r);
        let rb = b.row(band.top_b + r);
        for (&va, &vb) in ra.iter().zip(rb.iter()) {
            diff_sum += (va - vb).abs() as f64;
            value_sum += va as f64;
        }
    }

    let count = (rows.len() * a.ncols()) as f64;
    let mad = diff_sum / count;
    if mad == 0.0 {
        return 1.0;
    }

    let mean = value_sum / count;
    let mut dev_sum = 0.0f64;
    for &r in &rows {
        for &va in a.row(band.top_a + r).iter() {
            dev_sum += (va as f64 - mean).abs();
        }
    }
    let spread = (dev_sum / count).max(MIN_SPREAD);

    (1.0 - mad / spread).clamp(0.0, 1.0)
}

/// Mean absolute difference between two same-shaped arrays, in normalized
/// intensity units, visiting every `row_step`-th row.
pub fn mean_abs_diff(a: &Array2<f32>, b: &Array2<f32>, row_step: usize) -> f64 {
    let (h, w) = a.dim();
    let mut sum = 0.0f64;
    let mut count = 0usize;
    for r in (0..h).step_by(row_step.max(1)) {
        for (&va, &vb) in a.row(r).iter().zip(b.row(r).iter()) {
            sum += (va - vb).abs() as f64;
        }
        count += w;
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Pick the best-scoring key.
///
/// Every key whose score lies within `epsilon` of the maximum counts as a
/// tie; the first such key in `scored` wins, so callers list keys in
/// preference order.
pub fn select_best<K: Copy>(scored: &[(K, f64)], epsilon: f64) -> Option<(K, f64)> {
    let max = scored
        .iter()
        .map(|&(_, s)| s)
        .fold(f64::NEG_INFINITY, f64::max);
    scored.iter().copied().find(|&(_, s)| s >= max - epsilon)
}
