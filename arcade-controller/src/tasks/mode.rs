//! Mode task

use log::info;

use crate::controller::ModeRunner;
use crate::engine::PlaybackEngine;

/// Mode task - owns the runner and the playback engine's stream control
pub fn mode_task<E: PlaybackEngine>(runner: ModeRunner<E>) -> ! {
    info!("Mode task started in {:?}", runner.mode());
    runner.run()
}
