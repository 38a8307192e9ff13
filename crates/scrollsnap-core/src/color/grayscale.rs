use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R, PARALLEL_PIXEL_THRESHOLD};
use crate::frame::PixelSource;

/// Which columns of a source take part in a comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSampling {
    /// Keep every `step`-th column (values below 1 are treated as 1).
    pub step: usize,
    /// Drop this many columns at the right edge (scroll bars, overlays).
    /// Ignored when it would leave no columns at all.
    pub ignore_right: usize,
}

impl Default for ColumnSampling {
    fn default() -> Self {
        Self {
            step: 1,
            ignore_right: 0,
        }
    }
}

impl ColumnSampling {
    /// Source column indices selected for a source of the given width.
    pub fn columns(&self, width: usize) -> Vec<usize> {
        let effective = if self.ignore_right < width {
            width - self.ignore_right
        } else {
            width
        };
        (0..effective).step_by(self.step.max(1)).collect()
    }
}

/// Convert a validated pixel source to intensity in [0.0, 1.0] using
/// ITU-R BT.601 weights. Alpha is ignored.
///
/// The result has one column per sampled source column and one row per
/// source row.
pub fn to_gray(source: &dyn PixelSource, sampling: &ColumnSampling) -> Array2<f32> {
    let columns = sampling.columns(source.width());
    let h = source.height();
    let w = columns.len();
    let format = source.format();
    let bpp = format.bytes_per_pixel();
    let offsets = format.rgb_offsets();

    let convert_row = |row: usize| -> Vec<f32> {
        let bytes = source.row(row);
        columns
            .iter()
            .map(|&col| {
                let px = &bytes[col * bpp..col * bpp + bpp];
                match offsets {
                    None => px[0] as f32 / 255.0,
                    Some([r, g, b]) => {
                        (LUMINANCE_R * px[r] as f32
                            + LUMINANCE_G * px[g] as f32
                            + LUMINANCE_B * px[b] as f32)
                            / 255.0
                    }
                }
            })
            .collect()
    };

    let rows: Vec<Vec<f32>> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h).into_par_iter().map(convert_row).collect()
    } else {
        (0..h).map(convert_row).collect()
    };

    let mut result = Array2::<f32>::zeros((h, w));
    for (row, row_data) in rows.into_iter().enumerate() {
        for (col, val) in row_data.into_iter().enumerate() {
            result[[row, col]] = val;
        }
    }
    result
}
