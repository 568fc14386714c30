//! Arcade controller
//!
//! Host-side application for a two-player effort cabinet: a serial link
//! carries the start button and two analog effort readings, a playback
//! engine plays one clip per game mode, and an overlay paints each
//! player's effort onto the video during the game.
//!
//! Threads started by [`spawn`]:
//! - `serial-rx`: reads the device, decodes packets into the [`PacketQueue`]
//! - `dispatch`: applies queued packets to the [`SharedGameState`]
//! - `mode`: runs the ATTRACT → COUNTDOWN → GAME → WINNER cycle
//!
//! The overlay runs on the engine's own render path through the frame hook
//! registered at spawn.

#![deny(unsafe_code)]

pub mod channels;
pub mod config;
pub mod controller;
pub mod engine;
pub mod game_state;
pub mod overlay;
pub mod serial;
pub mod tasks;

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use arcade_core::config::{ArcadeConfig, ValidationError};
use arcade_hal::{UartRx, UartTx};
use log::info;
use thiserror::Error;

pub use channels::PacketQueue;
pub use controller::ModeRunner;
pub use engine::{FrameHook, PlaybackEngine, PlaybackError, SeekUnit, VideoOverlay};
pub use game_state::{GameSnapshot, SharedGameState};
pub use overlay::OverlayRenderer;
pub use serial::{FeedbackSink, IoUart, PacketWriter};

use tasks::{dispatch_task, mode_task, serial_rx_task, SerialReader};

/// Controller could not be started
#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("invalid configuration: {0}")]
    Config(ValidationError),
    #[error("failed to start thread: {0}")]
    Thread(#[from] io::Error),
}

/// Handles to a running controller
#[derive(Debug)]
pub struct ArcadeHandles {
    /// Game state shared by every thread
    pub state: Arc<SharedGameState>,
    /// Decoded packets awaiting dispatch
    pub queue: Arc<PacketQueue>,
    pub serial_rx: JoinHandle<()>,
    pub dispatch: JoinHandle<()>,
    pub mode: JoinHandle<()>,
}

/// Start the controller
///
/// `engine` must already be playing the ATTRACT streams
/// (`config.streams.initial()`). `tx` carries mode announcements when
/// `config.serial.announce_modes` is set and is dropped otherwise.
/// The threads run for the life of the process.
pub fn spawn<R, T, E>(
    config: ArcadeConfig,
    rx: R,
    tx: T,
    mut engine: E,
) -> Result<ArcadeHandles, SpawnError>
where
    R: UartRx + Send + 'static,
    T: UartTx + Send + 'static,
    E: PlaybackEngine + 'static,
{
    config.validate().map_err(SpawnError::Config)?;

    let queue = Arc::new(PacketQueue::new());
    let state = Arc::new(SharedGameState::new());

    let renderer = OverlayRenderer::new(state.clone(), config.overlay.clone());
    engine.register_frame_hook(Arc::new(renderer));

    let mut runner = ModeRunner::new(engine, state.clone(), &config);
    if config.serial.announce_modes {
        runner = runner.with_feedback(Box::new(PacketWriter::new(tx)));
    }

    let reader = SerialReader::new(rx, queue.clone(), config.serial.read_buffer);
    let idle = Duration::from_millis(config.serial.idle_poll_ms);

    let serial_rx = thread::Builder::new()
        .name("serial-rx".into())
        .spawn(move || {
            serial_rx_task(reader, idle);
        })?;

    let dispatch = {
        let queue = queue.clone();
        let state = state.clone();
        thread::Builder::new()
            .name("dispatch".into())
            .spawn(move || {
                dispatch_task(queue, state);
            })?
    };

    let mode = thread::Builder::new().name("mode".into()).spawn(move || {
        mode_task(runner);
    })?;

    info!("Arcade controller started");

    Ok(ArcadeHandles {
        state,
        queue,
        serial_rx,
        dispatch,
        mode,
    })
}
