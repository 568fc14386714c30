//! Mode runner driving the playback engine
//!
//! The runner is the only writer of the current mode. Each transition:
//! - picks the next mode from the shared game state
//! - swaps the engine over to that mode's streams and rewinds
//! - publishes the mode (and announces it on the serial link if enabled)
//! - dwells for the mode's configured time

use std::sync::Arc;
use std::thread;

use arcade_core::config::{ArcadeConfig, DwellConfig, StreamPair, StreamTable};
use arcade_core::state::{Dwell, GameMode};
use arcade_protocol::Feedback;
use log::{debug, info, warn};

use crate::engine::{PlaybackEngine, SeekUnit};
use crate::game_state::SharedGameState;
use crate::serial::FeedbackSink;

/// Runs the mode state machine against a playback engine
pub struct ModeRunner<E> {
    /// Engine whose streams follow the mode
    engine: E,
    /// State shared with the dispatch and render threads
    state: Arc<SharedGameState>,
    streams: StreamTable,
    timing: DwellConfig,
    /// Mode last entered
    mode: GameMode,
    /// Streams last opened, closed on the next entry
    open: StreamPair,
    feedback: Option<Box<dyn FeedbackSink>>,
}

impl<E: PlaybackEngine> ModeRunner<E> {
    /// Create a runner in the power-up mode
    ///
    /// The engine must already be playing the ATTRACT pair
    /// ([`StreamTable::initial`]).
    pub fn new(engine: E, state: Arc<SharedGameState>, config: &ArcadeConfig) -> Self {
        Self {
            engine,
            mode: state.mode(),
            state,
            streams: config.streams.clone(),
            timing: config.dwell.clone(),
            open: config.streams.initial(),
            feedback: None,
        }
    }

    /// Announce every mode entry through `sink`
    pub fn with_feedback(mut self, sink: Box<dyn FeedbackSink>) -> Self {
        self.feedback = Some(sink);
        self
    }

    /// Mode last entered
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Streams last opened
    pub fn open_streams(&self) -> StreamPair {
        self.open
    }

    /// Switch the engine to `mode` and publish it
    ///
    /// Engine failures are logged and the transition goes ahead.
    pub fn enter_mode(&mut self, mode: GameMode) {
        info!("Entering {:?}", mode);

        let previous = self.open;
        for stream in [previous.video, previous.audio] {
            if let Err(e) = self.engine.close_stream(stream) {
                warn!("Failed to close stream {}: {}", stream, e);
            }
        }

        let pair = self.streams.pair(mode);
        for stream in [pair.video, pair.audio] {
            if let Err(e) = self.engine.open_stream(stream) {
                warn!("Failed to open stream {}: {}", stream, e);
            }
        }
        self.open = pair;

        if let Err(e) = self.engine.seek(0, 0, SeekUnit::Time) {
            warn!("Failed to rewind for {:?}: {}", mode, e);
        }

        self.mode = mode;
        self.state.set_mode(mode);

        if let Some(sink) = self.feedback.as_mut() {
            sink.send_feedback(Feedback::Mode(mode.wire_code()));
        }
    }

    /// Block for the current mode's dwell
    ///
    /// ATTRACT returns early once a start request is pending; the request
    /// itself is consumed by the next transition.
    pub fn dwell(&self) {
        match self.mode.dwell(&self.timing) {
            Dwell::UntilStartOr(timeout) => {
                if self.state.wait_for_start(timeout) {
                    debug!("Start requested");
                } else {
                    debug!("Attract timeout, restarting");
                }
            }
            Dwell::Fixed(duration) => thread::sleep(duration),
        }
    }

    /// Run one transition and its dwell, returning the mode entered
    pub fn step(&mut self) -> GameMode {
        let next = self.mode.next(&*self.state);
        self.enter_mode(next);
        self.dwell();
        next
    }

    /// Dwell in the power-up mode, then cycle forever
    pub fn run(mut self) -> ! {
        self.dwell();
        loop {
            self.step();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{FrameHook, PlaybackError};
    use arcade_core::config::StreamIndex;
    use parking_lot::Mutex;
    use std::time::{Duration, Instant};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Open(StreamIndex),
        Close(StreamIndex),
        Seek(i64, i64, SeekUnit),
    }

    #[derive(Default)]
    struct RecordingEngine {
        calls: Arc<Mutex<Vec<Call>>>,
        fail_open: Option<StreamIndex>,
        fail_seek: bool,
    }

    impl PlaybackEngine for RecordingEngine {
        fn open_stream(&mut self, stream: StreamIndex) -> Result<(), PlaybackError> {
            self.calls.lock().push(Call::Open(stream));
            if self.fail_open == Some(stream) {
                return Err(PlaybackError::Open(stream));
            }
            Ok(())
        }

        fn close_stream(&mut self, stream: StreamIndex) -> Result<(), PlaybackError> {
            self.calls.lock().push(Call::Close(stream));
            Ok(())
        }

        fn seek(&mut self, position: i64, offset: i64, unit: SeekUnit) -> Result<(), PlaybackError> {
            self.calls.lock().push(Call::Seek(position, offset, unit));
            if self.fail_seek {
                return Err(PlaybackError::Seek);
            }
            Ok(())
        }

        fn register_frame_hook(&mut self, _hook: Arc<dyn FrameHook>) {}
    }

    struct RecordingSink(Arc<Mutex<Vec<Feedback>>>);

    impl FeedbackSink for RecordingSink {
        fn send_feedback(&mut self, feedback: Feedback) {
            self.0.lock().push(feedback);
        }
    }

    fn fast_config(attract_timeout_ms: u64) -> ArcadeConfig {
        ArcadeConfig {
            dwell: DwellConfig {
                attract_timeout_ms,
                countdown_ms: 1,
                game_ms: 1,
                winner_ms: 1,
            },
            ..ArcadeConfig::default()
        }
    }

    fn runner(
        engine: RecordingEngine,
        attract_timeout_ms: u64,
    ) -> (ModeRunner<RecordingEngine>, Arc<SharedGameState>) {
        let state = Arc::new(SharedGameState::new());
        let runner = ModeRunner::new(engine, state.clone(), &fast_config(attract_timeout_ms));
        (runner, state)
    }

    #[test]
    fn test_entry_closes_opens_and_rewinds() {
        let engine = RecordingEngine::default();
        let calls = engine.calls.clone();
        let (mut runner, state) = runner(engine, 20);

        state.apply_digital_input(0);
        assert_eq!(runner.step(), GameMode::Countdown);

        assert_eq!(
            *calls.lock(),
            [
                Call::Close(0),
                Call::Close(1),
                Call::Open(2),
                Call::Open(3),
                Call::Seek(0, 0, SeekUnit::Time),
            ]
        );
        assert_eq!(state.mode(), GameMode::Countdown);
        assert_eq!(runner.open_streams(), StreamPair::new(2, 3));
    }

    #[test]
    fn test_full_cycle() {
        let (mut runner, state) = runner(RecordingEngine::default(), 20);
        state.apply_analog_input(0, 10);
        state.apply_analog_input(1, 200);
        state.apply_digital_input(0);

        let modes: Vec<_> = (0..4).map(|_| runner.step()).collect();
        assert_eq!(
            modes,
            [
                GameMode::Countdown,
                GameMode::Game,
                GameMode::Winner2,
                GameMode::Attract,
            ]
        );
        assert_eq!(state.mode(), GameMode::Attract);
    }

    #[test]
    fn test_tie_goes_to_winner2() {
        let (mut runner, state) = runner(RecordingEngine::default(), 20);
        state.apply_analog_input(0, 50);
        state.apply_analog_input(1, 50);
        runner.enter_mode(GameMode::Game);

        assert_eq!(runner.step(), GameMode::Winner2);
    }

    #[test]
    fn test_first_controller_wins() {
        let (mut runner, state) = runner(RecordingEngine::default(), 20);
        state.apply_analog_input(0, 201);
        state.apply_analog_input(1, 200);
        runner.enter_mode(GameMode::Game);

        assert_eq!(runner.step(), GameMode::Winner1);
        assert_eq!(runner.open_streams(), StreamPair::new(6, 7));
    }

    #[test]
    fn test_attract_timeout_restarts_clip() {
        let engine = RecordingEngine::default();
        let calls = engine.calls.clone();
        let (mut runner, _state) = runner(engine, 10);

        assert_eq!(runner.step(), GameMode::Attract);
        assert_eq!(
            *calls.lock(),
            [
                Call::Close(0),
                Call::Close(1),
                Call::Open(0),
                Call::Open(1),
                Call::Seek(0, 0, SeekUnit::Time),
            ]
        );
    }

    #[test]
    fn test_engine_failures_do_not_stop_transition() {
        let engine = RecordingEngine {
            fail_open: Some(2),
            fail_seek: true,
            ..RecordingEngine::default()
        };
        let calls = engine.calls.clone();
        let (mut runner, state) = runner(engine, 20);

        state.apply_digital_input(0);
        assert_eq!(runner.step(), GameMode::Countdown);
        assert!(calls.lock().contains(&Call::Open(3)));
        assert_eq!(state.mode(), GameMode::Countdown);

        // Next entry still closes what was last requested
        calls.lock().clear();
        runner.enter_mode(GameMode::Game);
        assert_eq!(calls.lock()[..2], [Call::Close(2), Call::Close(3)]);
    }

    #[test]
    fn test_attract_dwell_wakes_on_start() {
        let (mut runner, state) = runner(RecordingEngine::default(), 10_000);

        let presser = {
            let state = state.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                state.apply_digital_input(0);
            })
        };

        let started = Instant::now();
        runner.dwell();
        assert!(started.elapsed() < Duration::from_secs(5));
        presser.join().unwrap();

        assert_eq!(runner.step(), GameMode::Countdown);
        assert!(!state.start_requested());
    }

    #[test]
    fn test_mode_announced() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let (runner, state) = runner(RecordingEngine::default(), 20);
        let mut runner = runner.with_feedback(Box::new(RecordingSink(sent.clone())));

        state.apply_digital_input(0);
        runner.step();
        runner.step();

        assert_eq!(*sent.lock(), [Feedback::Mode(1), Feedback::Mode(2)]);
    }
}
