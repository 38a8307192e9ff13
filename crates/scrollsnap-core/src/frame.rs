use crate::error::{InputError, Result};

/// Memory layout of one pixel in a raw capture buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Single 8-bit intensity channel.
    Gray8,
    /// 8-bit R, G, B.
    Rgb8,
    /// 8-bit R, G, B, A (decoded stills).
    Rgba8,
    /// 8-bit B, G, R, A (typical screen capture buffers).
    Bgra8,
}

impl PixelFormat {
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Rgb8 => 3,
            Self::Rgba8 | Self::Bgra8 => 4,
        }
    }

    /// Byte offsets of the red, green and blue channels within a pixel.
    pub(crate) const fn rgb_offsets(self) -> Option<[usize; 3]> {
        match self {
            Self::Gray8 => None,
            Self::Rgb8 | Self::Rgba8 => Some([0, 1, 2]),
            Self::Bgra8 => Some([2, 1, 0]),
        }
    }
}

/// A raw 2D pixel grid owned by the caller.
///
/// Implementors only describe the memory; the alignment routines never keep
/// a reference past the call that received the source. Rows may be read from
/// several worker threads at once.
pub trait PixelSource: Sync {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Bytes between the starts of consecutive rows. May exceed
    /// `width * bytes_per_pixel` when rows are padded.
    fn stride(&self) -> usize;
    fn format(&self) -> PixelFormat;
    fn data(&self) -> &[u8];

    /// Pixel bytes of row `y`, without padding.
    ///
    /// # Panics
    ///
    /// Panics if the source has not passed [`validate`] or `y >= height`.
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride();
        let len = self.width() * self.format().bytes_per_pixel();
        &self.data()[start..start + len]
    }
}

/// Check that a source describes a non-empty grid its byte view can back.
pub fn validate(source: &dyn PixelSource) -> Result<()> {
    check_geometry(
        source.data().len(),
        source.width(),
        source.height(),
        source.stride(),
        source.format(),
    )
}

fn check_geometry(
    len: usize,
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(InputError::EmptyImage { width, height }.into());
    }
    let overflow = || InputError::GeometryOverflow {
        width,
        height,
        stride,
    };
    let min = width
        .checked_mul(format.bytes_per_pixel())
        .ok_or_else(overflow)?;
    if stride < min {
        return Err(InputError::StrideTooSmall { stride, min }.into());
    }
    let expected = stride
        .checked_mul(height - 1)
        .and_then(|v| v.checked_add(min))
        .ok_or_else(overflow)?;
    if len < expected {
        return Err(InputError::InsufficientData {
            expected,
            actual: len,
        }
        .into());
    }
    Ok(())
}

fn packed_stride(width: usize, height: usize, format: PixelFormat) -> Result<usize> {
    width.checked_mul(format.bytes_per_pixel()).ok_or_else(|| {
        InputError::GeometryOverflow {
            width,
            height,
            stride: usize::MAX,
        }
        .into()
    })
}

/// Borrowed, validated view over caller-owned pixel memory.
#[derive(Clone, Copy, Debug)]
pub struct PixelView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
}

impl<'a> PixelView<'a> {
    /// Wrap `data` as a `width` x `height` grid with the given row stride.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the grid is empty, the stride is shorter
    /// than a row, or `data` is too small for the declared geometry.
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
        format: PixelFormat,
    ) -> Result<Self> {
        check_geometry(data.len(), width, height, stride, format)?;
        Ok(Self {
            data,
            width,
            height,
            stride,
            format,
        })
    }

    /// Wrap tightly packed rows (`stride == width * bytes_per_pixel`).
    pub fn packed(data: &'a [u8], width: usize, height: usize, format: PixelFormat) -> Result<Self> {
        let stride = packed_stride(width, height, format)?;
        Self::new(data, width, height, stride, format)
    }
}

impl PixelSource for PixelView<'_> {
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
        self.data
    }
}

/// An owned, tightly packed copy of a pixel grid.
///
/// Capture buffers are usually recycled by the platform once the callback
/// returns, so anything kept as a comparison anchor must be copied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedFrame {
    data: Vec<u8>,
    width: usize,
    height: usize,
    format: PixelFormat,
}

impl OwnedFrame {
    pub fn new(data: Vec<u8>, width: usize, height: usize, format: PixelFormat) -> Result<Self> {
        let stride = packed_stride(width, height, format)?;
        check_geometry(data.len(), width, height, stride, format)?;
        Ok(Self {
            data,
            width,
            height,
            format,
        })
    }

    /// Deep-copy any valid source, dropping row padding.
    pub fn copy_from(source: &dyn PixelSource) -> Result<Self> {
        validate(source)?;
        let (w, h) = (source.width(), source.height());
        let mut data = Vec::with_capacity(w * h * source.format().bytes_per_pixel());
        for y in 0..h {
            data.extend_from_slice(source.row(y));
        }
        Ok(Self {
            data,
            width: w,
            height: h,
            format: source.format(),
        })
    }

    pub fn view(&self) -> PixelView<'_> {
        PixelView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width * self.format.bytes_per_pixel(),
            format: self.format,
        }
    }
}

impl PixelSource for OwnedFrame {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn stride(&self) -> usize {
        self.width * self.format.bytes_per_pixel()
    }

    fn format(&self) -> PixelFormat {
        self.format
    }

    fn data(&self) -> &[u8] {
        &self.data
    }
}
