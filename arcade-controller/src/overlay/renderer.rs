//! Per-frame effort bar rendering
//!
//! Runs on the playback engine's render path once per decoded frame. The
//! game state is copied out first so the state lock is never held while
//! touching pixels.

use std::sync::Arc;

use arcade_core::color::Yuv;
use arcade_core::config::OverlayConfig;
use arcade_core::state::ControllerBank;
use log::trace;

use super::geometry::{BarGeometry, TAPER_FULL};
use super::plane::YuvFrame;
use crate::engine::{FrameHook, VideoOverlay};
use crate::game_state::SharedGameState;

/// Holds the engine's overlay lock for the lifetime of the guard
struct OverlayGuard<'a> {
    overlay: &'a mut dyn VideoOverlay,
}

impl<'a> OverlayGuard<'a> {
    fn lock(overlay: &'a mut dyn VideoOverlay) -> Self {
        overlay.lock();
        Self { overlay }
    }

    fn planes(&mut self) -> Option<YuvFrame<'_>> {
        self.overlay.planes()
    }
}

impl Drop for OverlayGuard<'_> {
    fn drop(&mut self) {
        self.overlay.unlock();
    }
}

/// Effort bar renderer, registered as the engine's frame hook
pub struct OverlayRenderer {
    state: Arc<SharedGameState>,
    layout: OverlayConfig,
    colors: [Yuv; 2],
}

impl OverlayRenderer {
    /// Create a renderer reading from `state`
    pub fn new(state: Arc<SharedGameState>, layout: OverlayConfig) -> Self {
        let colors = layout.bars().map(|bar| bar.rgb.to_yuv(bar.conversion));
        Self {
            state,
            layout,
            colors,
        }
    }

    /// Draw the bars for the current game state, if the mode shows them
    pub fn render(&self, overlay: &mut dyn VideoOverlay) {
        let snapshot = self.state.snapshot();
        if !snapshot.mode.overlay_visible() {
            return;
        }

        let mut guard = OverlayGuard::lock(overlay);
        match guard.planes() {
            Some(mut frame) => self.paint(&mut frame, &snapshot.controllers),
            None => trace!("overlay has no pixels, skipping frame"),
        }
    }

    /// Draw both bars for the given controller values
    pub fn paint(&self, frame: &mut YuvFrame<'_>, controllers: &ControllerBank) {
        let (width, height) = (frame.width(), frame.height());
        for (index, bar) in self.layout.bars().into_iter().enumerate() {
            let geometry = BarGeometry::new(&self.layout, bar, controllers.get(index), width, height);
            if !geometry.is_empty() {
                paint_bar(frame, &geometry, self.colors[index]);
            }
        }
    }
}

impl FrameHook for OverlayRenderer {
    fn on_frame(&self, overlay: &mut dyn VideoOverlay) {
        self.render(overlay);
    }
}

/// Fill one bar bottom-up, a scanline at a time: luma first, then the
/// chroma row it shares with its neighbor
fn paint_bar(frame: &mut YuvFrame<'_>, bar: &BarGeometry, color: Yuv) {
    let full = TAPER_FULL as u32;
    let mut last_chroma_row = None;

    for y in bar.rows() {
        let pixels = frame
            .luma
            .row_mut(y)
            .and_then(|row| row.get_mut(bar.x..bar.x + bar.width));
        if let Some(pixels) = pixels {
            for (offset, pixel) in pixels.iter_mut().enumerate() {
                let weight = bar.luma_weight(offset) as u32;
                *pixel = ((*pixel as u32 * (full - weight) + color.y as u32 * weight) / full) as u8;
            }
        }

        let chroma_y = y / 2;
        if last_chroma_row == Some(chroma_y) {
            continue;
        }
        last_chroma_row = Some(chroma_y);

        for (plane, value) in [(&mut frame.cb, color.u), (&mut frame.cr, color.v)] {
            let columns = bar.chroma_columns(plane.width());
            if let Some(row) = plane.row_mut(chroma_y).and_then(|row| row.get_mut(columns)) {
                row.fill(value);
            }
        }
    }
}
