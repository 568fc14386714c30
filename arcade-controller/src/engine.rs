//! Playback engine interface
//!
//! The engine decodes and presents the media; this crate only switches its
//! streams and draws into its frames. Implementations live with the host
//! application.

use std::sync::Arc;

use arcade_core::config::StreamIndex;
use thiserror::Error;

use crate::overlay::YuvFrame;

/// Unit for [`PlaybackEngine::seek`] positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekUnit {
    /// Presentation time
    Time,
    /// Byte offset in the container
    Bytes,
}

/// Errors reported by a playback engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("stream {0} could not be opened")]
    Open(StreamIndex),
    #[error("stream {0} could not be closed")]
    Close(StreamIndex),
    #[error("seek failed")]
    Seek,
    #[error("playback engine error: {0}")]
    Engine(String),
}

/// Stream control consumed by the mode runner
pub trait PlaybackEngine: Send {
    /// Attach one elementary stream
    fn open_stream(&mut self, stream: StreamIndex) -> Result<(), PlaybackError>;

    /// Detach one elementary stream
    fn close_stream(&mut self, stream: StreamIndex) -> Result<(), PlaybackError>;

    /// Reposition playback
    fn seek(
        &mut self,
        position: i64,
        relative_offset: i64,
        unit: SeekUnit,
    ) -> Result<(), PlaybackError>;

    /// Install a callback invoked once per decoded video frame
    fn register_frame_hook(&mut self, hook: Arc<dyn FrameHook>);
}

/// Per-frame callback, run on the engine's render path
///
/// Must finish within the frame budget: no blocking waits.
pub trait FrameHook: Send + Sync {
    fn on_frame(&self, overlay: &mut dyn VideoOverlay);
}

/// Pixel access to the frame about to be displayed
///
/// Writes are only valid between [`lock`](Self::lock) and
/// [`unlock`](Self::unlock).
pub trait VideoOverlay {
    /// Acquire the engine's overlay lock
    fn lock(&mut self);

    /// Release the engine's overlay lock
    fn unlock(&mut self);

    /// Views over the luma and chroma planes, if the frame has any pixels
    fn planes(&mut self) -> Option<YuvFrame<'_>>;
}
