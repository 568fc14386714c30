//! Shared game state
//!
//! Controller values, the pending start request and the current mode live
//! behind one lock. The condition variable is signaled whenever a start
//! request arrives or the mode changes.

use std::time::{Duration, Instant};

use arcade_core::state::{ControllerBank, GameMode, GameQuery};
use arcade_protocol::ControlInput;
use parking_lot::{Condvar, Mutex};

/// Copy of the state the overlay needs for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    pub mode: GameMode,
    pub controllers: ControllerBank,
}

#[derive(Debug)]
struct GameState {
    controllers: ControllerBank,
    start_requested: bool,
    mode: GameMode,
}

/// Game state shared by the dispatch, mode and render threads
#[derive(Debug)]
pub struct SharedGameState {
    state: Mutex<GameState>,
    changed: Condvar,
}

impl Default for SharedGameState {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedGameState {
    /// Power-up state: ATTRACT, controllers at zero, no start request
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GameState {
                controllers: ControllerBank::new(),
                start_requested: false,
                mode: GameMode::INITIAL,
            }),
            changed: Condvar::new(),
        }
    }

    /// Apply one decoded input
    pub fn apply(&self, input: ControlInput) {
        match input {
            ControlInput::Digital { level } => self.apply_digital_input(level),
            ControlInput::Analog {
                controller,
                magnitude,
            } => self.apply_analog_input(controller, magnitude),
        }
    }

    /// Start button level; active-low, so 0 requests a game
    pub fn apply_digital_input(&self, value: u8) {
        if value != 0 {
            return;
        }
        let mut state = self.state.lock();
        state.start_requested = true;
        self.changed.notify_all();
    }

    /// Store an effort magnitude; only the low bit of `index` is used
    pub fn apply_analog_input(&self, index: usize, value: u8) {
        self.state.lock().controllers.set(index, value);
    }

    /// Copy of the controller values
    pub fn snapshot_controllers(&self) -> ControllerBank {
        self.state.lock().controllers
    }

    /// Copy of the mode and controller values, taken under one lock
    pub fn snapshot(&self) -> GameSnapshot {
        let state = self.state.lock();
        GameSnapshot {
            mode: state.mode,
            controllers: state.controllers,
        }
    }

    /// Clear a pending start request, returning whether one was pending
    pub fn try_consume_start_request(&self) -> bool {
        let mut state = self.state.lock();
        std::mem::replace(&mut state.start_requested, false)
    }

    /// Returns true if a start request is pending
    pub fn start_requested(&self) -> bool {
        self.state.lock().start_requested
    }

    /// Current mode
    pub fn mode(&self) -> GameMode {
        self.state.lock().mode
    }

    /// Record a mode change and wake waiters
    pub fn set_mode(&self, mode: GameMode) {
        let mut state = self.state.lock();
        if state.mode != mode {
            state.mode = mode;
            self.changed.notify_all();
        }
    }

    /// Wait until a start request is pending or `timeout` elapses
    ///
    /// Returns whether a start request is pending. The request is left in
    /// place for [`try_consume_start_request`](Self::try_consume_start_request).
    pub fn wait_for_start(&self, timeout: Duration) -> bool {
        let deadline = Instant::now().checked_add(timeout);
        let mut state = self.state.lock();
        while !state.start_requested {
            match deadline {
                Some(deadline) => {
                    if self.changed.wait_until(&mut state, deadline).timed_out() {
                        break;
                    }
                }
                None => self.changed.wait(&mut state),
            }
        }
        state.start_requested
    }
}

impl GameQuery for SharedGameState {
    fn try_consume_start_request(&self) -> bool {
        SharedGameState::try_consume_start_request(self)
    }

    fn controllers(&self) -> ControllerBank {
        self.snapshot_controllers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_initial_state() {
        let state = SharedGameState::new();
        assert_eq!(
            state.snapshot(),
            GameSnapshot {
                mode: GameMode::Attract,
                controllers: ControllerBank::new(),
            }
        );
        assert!(!state.start_requested());
    }

    #[test]
    fn test_start_request_idempotent() {
        let state = SharedGameState::new();
        state.apply_digital_input(0);
        state.apply_digital_input(0);
        state.apply_digital_input(0);
        assert!(state.start_requested());

        assert!(state.try_consume_start_request());
        assert!(!state.try_consume_start_request());
    }

    #[test]
    fn test_released_button_ignored() {
        let state = SharedGameState::new();
        state.apply_digital_input(1);
        state.apply_digital_input(0x7F);
        assert!(!state.try_consume_start_request());
    }

    #[test]
    fn test_analog_input() {
        let state = SharedGameState::new();
        state.apply(ControlInput::Analog {
            controller: 1,
            magnitude: 200,
        });
        state.apply_analog_input(2, 10);
        assert_eq!(state.snapshot_controllers().values(), [10, 200]);
    }

    #[test]
    fn test_set_mode() {
        let state = SharedGameState::new();
        state.set_mode(GameMode::Game);
        assert_eq!(state.mode(), GameMode::Game);
        assert_eq!(state.snapshot().mode, GameMode::Game);
    }

    #[test]
    fn test_wait_for_start_times_out() {
        let state = SharedGameState::new();
        let started = Instant::now();
        assert!(!state.wait_for_start(Duration::from_millis(30)));
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_wait_for_start_woken_by_press() {
        let state = Arc::new(SharedGameState::new());

        let presser = {
            let state = Arc::clone(&state);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                state.apply_digital_input(0);
            })
        };

        let started = Instant::now();
        assert!(state.wait_for_start(Duration::from_secs(10)));
        assert!(started.elapsed() < Duration::from_secs(10));
        presser.join().unwrap();

        // The request is still pending for the transition to consume
        assert!(state.try_consume_start_request());
    }

    #[test]
    fn test_wait_for_start_ignores_mode_changes() {
        let state = Arc::new(SharedGameState::new());

        let changer = {
            let state = Arc::clone(&state);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(10));
                state.set_mode(GameMode::Countdown);
            })
        };

        assert!(!state.wait_for_start(Duration::from_millis(60)));
        changer.join().unwrap();
    }

    #[test]
    fn test_game_query_impl() {
        let state = SharedGameState::new();
        state.apply_analog_input(0, 10);
        state.apply_analog_input(1, 200);
        state.apply_digital_input(0);

        assert_eq!(GameMode::Attract.next(&state), GameMode::Countdown);
        assert_eq!(GameMode::Countdown.next(&state), GameMode::Game);
        assert_eq!(GameMode::Game.next(&state), GameMode::Winner2);
        assert_eq!(GameMode::Winner2.next(&state), GameMode::Attract);
        assert_eq!(GameMode::Attract.next(&state), GameMode::Attract);
    }
}
