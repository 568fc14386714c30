//! Bar placement and sizing
//!
//! Bars respond to effort with a saturating curve so that small inputs are
//! visible and large inputs approach, but never reach, full height.

use arcade_core::config::{BarConfig, OverlayConfig};

/// Magnitude at which a bar reaches 1 - 1/e of its full height
pub const SATURATION_SCALE: f32 = 80.0;

/// Full weight for the luma taper
pub const TAPER_FULL: u16 = 256;

/// Fraction of the maximum bar height shown for a raw magnitude
pub fn height_fraction(raw: u8) -> f32 {
    1.0 - (-(raw as f32) / SATURATION_SCALE).exp()
}

fn percent_of(pct: u8, total: usize) -> usize {
    total * pct as usize / 100
}

/// Pixel rectangle of one bar in luma coordinates
///
/// The bar occupies columns `x..x + width` and rows
/// `bottom - height..bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarGeometry {
    pub x: usize,
    pub width: usize,
    /// First row below the bar
    pub bottom: usize,
    pub height: usize,
    /// Columns ramped at each edge of the luma
    pub taper: usize,
}

impl BarGeometry {
    /// Place a bar for `raw` effort on a `frame_width` x `frame_height` frame
    ///
    /// The result is clipped to the frame.
    pub fn new(
        overlay: &OverlayConfig,
        bar: &BarConfig,
        raw: u8,
        frame_width: usize,
        frame_height: usize,
    ) -> Self {
        let x = percent_of(bar.x_pct, frame_width).min(frame_width);
        let width = percent_of(overlay.width_pct, frame_width)
            .max(1)
            .min(frame_width - x);
        let bottom = percent_of(overlay.bottom_pct, frame_height).min(frame_height);
        let max_height = percent_of(overlay.max_height_pct, frame_height);
        let height = ((height_fraction(raw) * max_height as f32) as usize).min(bottom);
        let taper = percent_of(overlay.taper_pct, width).min(width / 2);

        Self {
            x,
            width,
            bottom,
            height,
            taper,
        }
    }

    /// True when nothing would be drawn
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Rows covered, bottom-up
    pub fn rows(&self) -> impl Iterator<Item = usize> {
        (self.bottom - self.height..self.bottom).rev()
    }

    /// Luma blend weight (0..=`TAPER_FULL`) for column `offset` inside the
    /// bar: a linear ramp over `taper` columns at each edge, flat between
    pub fn luma_weight(&self, offset: usize) -> u16 {
        if self.taper == 0 || offset >= self.width {
            return TAPER_FULL;
        }
        let edge = offset.min(self.width - 1 - offset);
        if edge >= self.taper {
            return TAPER_FULL;
        }
        ((edge + 1) * TAPER_FULL as usize / (self.taper + 1)) as u16
    }

    /// Chroma columns covered, at least one column wide
    pub fn chroma_columns(&self, chroma_width: usize) -> core::ops::Range<usize> {
        let start = (self.x / 2).min(chroma_width);
        let end = ((self.x + self.width) / 2)
            .max(start + 1)
            .min(chroma_width);
        start..end
    }
}
