//! Row-profile coarse search.
//!
//! Each image is split into a few vertical column bands and every band is
//! collapsed to one value per row (its mean intensity). The mean squared
//! difference between two sets of band profiles is then computed for every
//! relative lag at once with an FFT cross-correlation plus prefix sums, which
//! keeps the coarse stage at O(B H log H) instead of O(H^2).

use ndarray::{s, Array2, Axis};
use num_complex::Complex;
use rustfft::FftPlanner;

use crate::consts::FLAT_PROFILE_TOLERANCE;

/// Mean intensity of each row, for each of up to `bands` contiguous column
/// bands of equal width (the last band takes the remainder).
pub fn band_profiles(gray: &Array2<f32>, bands: usize) -> Vec<Vec<f64>> {
    let w = gray.ncols();
    if w == 0 {
        return Vec::new();
    }
    let bands = bands.clamp(1, w);
    let band_w = w / bands;

    (0..bands)
        .map(|band| {
            let lo = band * band_w;
            let hi = if band + 1 == bands { w } else { lo + band_w };
            let n = (hi - lo) as f64;
            gray.slice(s![.., lo..hi])
                .axis_iter(Axis(0))
                .map(|row| row.iter().map(|&v| v as f64).sum::<f64>() / n)
                .collect()
        })
        .collect()
}

/// Profile distances for every lag between two profiles `a` and `b`.
///
/// Lag `k` aligns `a[i + k]` with `b[i]`; valid lags run from
/// `-(b.len() - 1)` to `a.len() - 1`.
#[derive(Clone, Debug)]
pub struct LagDistances {
    min_lag: isize,
    values: Vec<f64>,
}

impl LagDistances {
    /// Mean squared difference over the rows shared at `lag`, or `None`
    /// when the profiles do not overlap at that lag.
    pub fn at(&self, lag: isize) -> Option<f64> {
        let idx = lag - self.min_lag;
        if idx < 0 {
            return None;
        }
        self.values.get(idx as usize).copied()
    }
}

/// Compute [`LagDistances`] for two non-empty profiles.
pub fn profile_distances(a: &[f64], b: &[f64]) -> LagDistances {
    let (na, nb) = (a.len(), b.len());
    if na == 0 || nb == 0 {
        return LagDistances {
            min_lag: 0,
            values: Vec::new(),
        };
    }

    let cross = cross_correlate(a, b);
    let n = cross.len();

    let sq_a = prefix_squares(a);
    let sq_b = prefix_squares(b);

    let min_lag = -(nb as isize - 1);
    let values = (min_lag..na as isize)
        .map(|lag| {
            let start = (-lag).max(0) as usize;
            let end = nb.min((na as isize - lag) as usize);
            let count = (end - start) as f64;

            let a_lo = (start as isize + lag) as usize;
            let a_hi = (end as isize + lag) as usize;
            let sum_a = sq_a[a_hi] - sq_a[a_lo];
            let sum_b = sq_b[end] - sq_b[start];

            let c = cross[lag.rem_euclid(n as isize) as usize];
            ((sum_a + sum_b - 2.0 * c) / count).max(0.0)
        })
        .collect();

    LagDistances { min_lag, values }
}

/// Band-averaged [`LagDistances`] for two equally wide grayscale arrays.
pub fn banded_distances(a: &Array2<f32>, b: &Array2<f32>, bands: usize) -> LagDistances {
    let pa = band_profiles(a, bands);
    let pb = band_profiles(b, bands);

    let mut total: Option<LagDistances> = None;
    for (ra, rb) in pa.iter().zip(pb.iter()) {
        let d = profile_distances(ra, rb);
        total = Some(match total {
            None => d,
            Some(mut acc) => {
                for (x, y) in acc.values.iter_mut().zip(d.values.iter()) {
                    *x += y;
                }
                acc
            }
        });
    }

    let mut total = total.unwrap_or(LagDistances {
        min_lag: 0,
        values: Vec::new(),
    });
    let n = pa.len().max(1) as f64;
    total.values.iter_mut().for_each(|v| *v /= n);
    total
}

/// Order candidates by distance, keeping the first `count` that lie at
/// least `separation` apart.
///
/// `ranked` must already be in preference order; ties in distance keep that
/// order, since the sort is stable.
///
/// When the distances are flat (no lag stands out) the profiles carry no
/// signal, and every `separation`-th key is returned instead so that windows
/// of radius `separation / 2` around the result cover every key.
pub fn pick_candidates(
    ranked: Vec<(isize, f64)>,
    count: usize,
    separation: usize,
) -> Vec<isize> {
    let (lo, hi) = ranked
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, d)| {
            (lo.min(d), hi.max(d))
        });
    if !ranked.is_empty() && hi - lo <= FLAT_PROFILE_TOLERANCE {
        let mut keys: Vec<isize> = ranked.iter().map(|&(k, _)| k).collect();
        keys.sort_unstable();
        let last = keys[keys.len() - 1];
        let mut grid: Vec<isize> = keys
            .iter()
            .copied()
            .skip(separation / 2)
            .step_by(separation.max(1))
            .collect();
        if grid.last().map_or(true, |&g| g.abs_diff(last) > separation / 2) {
            grid.push(last);
        }
        return grid;
    }

    let mut ranked = ranked;
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut picked: Vec<isize> = Vec::with_capacity(count);
    for (key, _) in ranked {
        if picked.len() >= count {
            break;
        }
        if picked.iter().all(|&p| p.abs_diff(key) >= separation) {
            picked.push(key);
        }
    }
    picked
}

/// Linear cross-correlation `c[k] = sum_i a[i + k] * b[i]`, stored
/// circularly: negative lags wrap to the end of the returned vector.
fn cross_correlate(a: &[f64], b: &[f64]) -> Vec<f64> {
    let n = a.len() + b.len() - 1;
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    let ifft = planner.plan_fft_inverse(n);

    let mut fa: Vec<Complex<f64>> = (0..n)
        .map(|i| Complex::new(a.get(i).copied().unwrap_or(0.0), 0.0))
        .collect();
    let mut fb: Vec<Complex<f64>> = (0..n)
        .map(|i| Complex::new(b.get(i).copied().unwrap_or(0.0), 0.0))
        .collect();
    fft.process(&mut fa);
    fft.process(&mut fb);

    let mut product: Vec<Complex<f64>> = fa
        .iter()
        .zip(fb.iter())
        .map(|(x, y)| x * y.conj())
        .collect();
    ifft.process(&mut product);

    let scale = 1.0 / n as f64;
    product.iter().map(|c| c.re * scale).collect()
}

fn prefix_squares(values: &[f64]) -> Vec<f64> {
    let mut acc = Vec::with_capacity(values.len() + 1);
    let mut total = 0.0;
    acc.push(total);
    for v in values {
        total += v * v;
        acc.push(total);
    }
    acc
}
