use thiserror::Error;

use crate::frame::PixelFormat;

#[derive(Error, Debug)]
pub enum ScrollError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Comparison cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),
}

impl ScrollError {
    /// True for caller-side contract violations (bad buffers, mismatched inputs).
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// Reasons a pixel source or a pair of pixel sources is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("empty image: {width}x{height}")]
    EmptyImage { width: usize, height: usize },

    #[error("row stride {stride} is smaller than {min} bytes")]
    StrideTooSmall { stride: usize, min: usize },

    #[error("pixel data holds {actual} bytes, {expected} required")]
    InsufficientData { expected: usize, actual: usize },

    #[error("geometry {width}x{height} with stride {stride} overflows the address space")]
    GeometryOverflow {
        width: usize,
        height: usize,
        stride: usize,
    },

    #[error("image widths differ: {left} vs {right}")]
    WidthMismatch { left: usize, right: usize },

    #[error("frame dimensions differ: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: usize,
        left_height: usize,
        right_width: usize,
        right_height: usize,
    },

    #[error("pixel formats differ: {left:?} vs {right:?}")]
    FormatMismatch { left: PixelFormat, right: PixelFormat },
}

pub type Result<T> = std::result::Result<T, ScrollError>;
