//! Bounds-checked views over planar YUV memory

use thiserror::Error;

/// Plane rejected at construction
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaneError {
    #[error("plane has zero width or height")]
    Empty,
    #[error("stride {stride} is narrower than width {width}")]
    Stride { width: usize, stride: usize },
    #[error("buffer holds {len} bytes, plane needs {needed}")]
    TooSmall { len: usize, needed: usize },
    #[error("chroma plane is {width}x{height}, expected at least {min_width}x{min_height}")]
    ChromaSize {
        width: usize,
        height: usize,
        min_width: usize,
        min_height: usize,
    },
}

/// One mutable image plane: `height` rows of `width` pixels, `stride`
/// bytes apart
#[derive(Debug)]
pub struct PlaneMut<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> PlaneMut<'a> {
    /// Wrap a plane buffer, checking that every row fits
    pub fn new(
        data: &'a mut [u8],
        width: usize,
        height: usize,
        stride: usize,
    ) -> Result<Self, PlaneError> {
        if width == 0 || height == 0 {
            return Err(PlaneError::Empty);
        }
        if stride < width {
            return Err(PlaneError::Stride { width, stride });
        }
        let needed = stride * (height - 1) + width;
        if data.len() < needed {
            return Err(PlaneError::TooSmall {
                len: data.len(),
                needed,
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Pixels of row `y`, without the stride padding
    pub fn row_mut(&mut self, y: usize) -> Option<&mut [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.stride;
        self.data.get_mut(start..start + self.width)
    }

    /// Pixel value at (`x`, `y`)
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.stride + x).copied()
    }
}

/// Luma plane plus two half-resolution chroma planes
#[derive(Debug)]
pub struct YuvFrame<'a> {
    pub luma: PlaneMut<'a>,
    pub cb: PlaneMut<'a>,
    pub cr: PlaneMut<'a>,
}

impl<'a> YuvFrame<'a> {
    /// Group three planes, checking the chroma planes cover the luma plane
    /// at 4:2:0 subsampling
    pub fn new(
        luma: PlaneMut<'a>,
        cb: PlaneMut<'a>,
        cr: PlaneMut<'a>,
    ) -> Result<Self, PlaneError> {
        let min_width = luma.width().div_ceil(2);
        let min_height = luma.height().div_ceil(2);
        for chroma in [&cb, &cr] {
            if chroma.width() < min_width || chroma.height() < min_height {
                return Err(PlaneError::ChromaSize {
                    width: chroma.width(),
                    height: chroma.height(),
                    min_width,
                    min_height,
                });
            }
        }
        Ok(Self { luma, cb, cr })
    }

    /// Frame width in luma pixels
    pub fn width(&self) -> usize {
        self.luma.width()
    }

    /// Frame height in luma pixels
    pub fn height(&self) -> usize {
        self.luma.height()
    }
}
