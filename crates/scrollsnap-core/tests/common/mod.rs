#![allow(dead_code)]

use scrollsnap_core::frame::{OwnedFrame, PixelFormat, PixelSource};

/// Deterministic pseudo-random byte for pixel (x, y) of a content stream.
pub fn noise_value(x: usize, y: usize, seed: u64) -> u8 {
    let mut v = (x as u64)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add((y as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F))
        .wrapping_add(seed.wrapping_mul(0x1656_67B1_9E37_79F9));
    v ^= v >> 29;
    v = v.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    v ^= v >> 32;
    (v & 0xFF) as u8
}

/// Build a frame from a per-pixel function returning one pixel's bytes.
pub fn frame_from_fn<F>(width: usize, height: usize, format: PixelFormat, f: F) -> OwnedFrame
where
    F: Fn(usize, usize) -> Vec<u8>,
{
    let mut data = Vec::with_capacity(width * height * format.bytes_per_pixel());
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&f(x, y));
        }
    }
    OwnedFrame::new(data, width, height, format).expect("valid synthetic frame")
}

/// Grayscale window onto a tall scrolling document, starting at document
/// row `top`.
pub fn document_gray(width: usize, height: usize, top: usize, seed: u64) -> OwnedFrame {
    frame_from_fn(width, height, PixelFormat::Gray8, |x, y| {
        vec![noise_value(x, top + y, seed)]
    })
}

/// Same document as [`document_gray`], rendered as opaque RGBA gray.
pub fn document_rgba(width: usize, height: usize, top: usize, seed: u64) -> OwnedFrame {
    frame_from_fn(width, height, PixelFormat::Rgba8, |x, y| {
        let v = noise_value(x, top + y, seed);
        vec![v, v, v, 255]
    })
}

/// Document whose rows are all horizontal rotations of one random row, so
/// every row has the same mean intensity. Starts at document row `top`.
pub fn equal_mean_document(width: usize, height: usize, top: usize) -> OwnedFrame {
    frame_from_fn(width, height, PixelFormat::Gray8, |x, y| {
        let rotation = noise_value(0, top + y, 0x5EED) as usize;
        vec![noise_value((x + rotation) % width, 0, 0xBA5E)]
    })
}

/// Document whose rows shuffle one random row only within aligned groups of
/// `group` columns, so every column group keeps the same mean on every row.
pub fn group_shuffled_document(width: usize, height: usize, top: usize, group: usize) -> OwnedFrame {
    frame_from_fn(width, height, PixelFormat::Gray8, |x, y| {
        let base = x - x % group;
        let rotation = noise_value(base, top + y, 0x5EED) as usize;
        vec![noise_value(base + (x % group + rotation) % group, 0, 0xBA5E)]
    })
}

pub fn solid_gray(width: usize, height: usize, value: u8) -> OwnedFrame {
    frame_from_fn(width, height, PixelFormat::Gray8, |_, _| vec![value])
}

/// `base` moved down by `k` rows inside the viewport: row y shows the base
/// row y - k, and the top `k` rows show unrelated content.
pub fn shifted_down(base_top: usize, width: usize, height: usize, k: usize, seed: u64) -> OwnedFrame {
    frame_from_fn(width, height, PixelFormat::Gray8, |x, y| {
        if y < k {
            vec![noise_value(x, y, seed ^ 0xDEAD_BEEF)]
        } else {
            vec![noise_value(x, base_top + y - k, seed)]
        }
    })
}

/// `base` moved up by `k` rows: row y shows base row y + k, and the bottom
/// `k` rows show new content.
pub fn shifted_up(base_top: usize, width: usize, height: usize, k: usize, seed: u64) -> OwnedFrame {
    frame_from_fn(width, height, PixelFormat::Gray8, |x, y| {
        if y + k >= height {
            vec![noise_value(x, y, seed ^ 0xFEED_FACE)]
        } else {
            vec![noise_value(x, base_top + y + k, seed)]
        }
    })
}

/// Copy of `frame` with `pad` junk bytes appended to every row.
pub fn padded(frame: &OwnedFrame, pad: usize) -> RawSource {
    let row_len = frame.width() * frame.format().bytes_per_pixel();
    let mut data = Vec::with_capacity((row_len + pad) * frame.height());
    for y in 0..frame.height() {
        data.extend_from_slice(frame.row(y));
        data.extend(std::iter::repeat(0xAB).take(pad));
    }
    RawSource {
        data,
        width: frame.width(),
        height: frame.height(),
        stride: row_len + pad,
        format: frame.format(),
    }
}

/// Unvalidated pixel source, for feeding malformed buffers to the matchers.
pub struct RawSource {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub stride: usize,
    pub format: PixelFormat,
}

impl PixelSource for RawSource {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn stride(&self) -> usize {
        self.stride
    }

    fn format(&self) -> PixelFormat {
        self.format
    }

    fn data(&self) -> &[u8] {
        &self.data
    }
}
