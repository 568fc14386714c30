//! Effort bar overlay
//!
//! Paints one vertical bar per controller onto planar YUV 4:2:0 frames
//! while the cabinet is in GAME mode.

pub mod geometry;
pub mod plane;
pub mod renderer;

pub use geometry::{height_fraction, BarGeometry};
pub use plane::{PlaneError, PlaneMut, YuvFrame};
pub use renderer::OverlayRenderer;
