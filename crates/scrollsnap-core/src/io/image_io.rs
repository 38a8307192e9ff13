use std::path::Path;

use image::{GrayImage, RgbImage, RgbaImage};

use crate::error::Result;
use crate::frame::{OwnedFrame, PixelFormat, PixelSource};

impl PixelSource for GrayImage {
    fn width(&self) -> usize {
        self.dimensions().0 as usize
    }

    fn height(&self) -> usize {
        self.dimensions().1 as usize
    }

    fn stride(&self) -> usize {
        self.dimensions().0 as usize
    }

    fn format(&self) -> PixelFormat {
        PixelFormat::Gray8
    }

    fn data(&self) -> &[u8] {
        self.as_raw()
    }
}

impl PixelSource for RgbImage {
    fn width(&self) -> usize {
        self.dimensions().0 as usize
    }

    fn height(&self) -> usize {
        self.dimensions().1 as usize
    }

    fn stride(&self) -> usize {
        self.dimensions().0 as usize * 3
    }

    fn format(&self) -> PixelFormat {
        PixelFormat::Rgb8
    }

    fn data(&self) -> &[u8] {
        self.as_raw()
    }
}

impl PixelSource for RgbaImage {
    fn width(&self) -> usize {
        self.dimensions().0 as usize
    }

    fn height(&self) -> usize {
        self.dimensions().1 as usize
    }

    fn stride(&self) -> usize {
        self.dimensions().0 as usize * 4
    }

    fn format(&self) -> PixelFormat {
        PixelFormat::Rgba8
    }

    fn data(&self) -> &[u8] {
        self.as_raw()
    }
}

/// Decode an image file into an RGBA8 frame.
pub fn load_frame(path: &Path) -> Result<OwnedFrame> {
    let img = image::open(path)?.to_rgba8();
    let (w, h) = img.dimensions();
    OwnedFrame::new(img.into_raw(), w as usize, h as usize, PixelFormat::Rgba8)
}
