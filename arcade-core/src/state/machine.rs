//! Mode state machine definition
//!
//! Which media plays, and whether the overlay draws, is a function of the
//! current mode alone.

use core::time::Duration;

use super::controllers::ControllerBank;
use crate::config::DwellConfig;

/// Cabinet modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameMode {
    /// Idle loop waiting for a player to press start
    Attract,
    /// Start pressed, counting down to the game
    Countdown,
    /// Players are pumping; the overlay shows their effort
    Game,
    /// Controller 0 won
    Winner1,
    /// Controller 1 won (also taken on a tie)
    Winner2,
}

/// How long a mode stays active before the next transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dwell {
    /// Wait for a start request, giving up after the timeout
    UntilStartOr(Duration),
    /// Wait a fixed amount of time
    Fixed(Duration),
}

/// Read access to the shared game state needed to pick the next mode
pub trait GameQuery {
    /// Clear a pending start request, returning whether one was pending
    fn try_consume_start_request(&self) -> bool;

    /// Current controller magnitudes
    fn controllers(&self) -> ControllerBank;
}

impl GameMode {
    /// Every mode, in cycle order
    pub const ALL: [GameMode; 5] = [
        GameMode::Attract,
        GameMode::Countdown,
        GameMode::Game,
        GameMode::Winner1,
        GameMode::Winner2,
    ];

    /// Mode the cabinet powers up in
    pub const INITIAL: GameMode = GameMode::Attract;

    /// Process the current state and return the next mode
    ///
    /// Leaving ATTRACT consumes the pending start request. GAME picks the
    /// winner from the controllers at decision time; a tie goes to WINNER2.
    pub fn next(self, query: &impl GameQuery) -> Self {
        match self {
            GameMode::Attract => {
                if query.try_consume_start_request() {
                    GameMode::Countdown
                } else {
                    GameMode::Attract
                }
            }
            GameMode::Countdown => GameMode::Game,
            GameMode::Game => Self::winner(&query.controllers()),
            GameMode::Winner1 | GameMode::Winner2 => GameMode::Attract,
        }
    }

    /// Winner mode for a set of final controller values
    pub fn winner(controllers: &ControllerBank) -> Self {
        if controllers.first_leads() {
            GameMode::Winner1
        } else {
            GameMode::Winner2
        }
    }

    /// Dwell policy for this mode
    pub fn dwell(&self, config: &DwellConfig) -> Dwell {
        let ms = |v: u64| Duration::from_millis(v);
        match self {
            GameMode::Attract => Dwell::UntilStartOr(ms(config.attract_timeout_ms)),
            GameMode::Countdown => Dwell::Fixed(ms(config.countdown_ms)),
            GameMode::Game => Dwell::Fixed(ms(config.game_ms)),
            GameMode::Winner1 | GameMode::Winner2 => Dwell::Fixed(ms(config.winner_ms)),
        }
    }

    /// Check if the effort overlay is drawn in this mode
    pub fn overlay_visible(&self) -> bool {
        matches!(self, GameMode::Game)
    }

    /// Check if this mode announces a winner
    pub fn is_winner(&self) -> bool {
        matches!(self, GameMode::Winner1 | GameMode::Winner2)
    }

    /// Wire code used in mode feedback packets
    pub fn wire_code(self) -> u8 {
        match self {
            GameMode::Attract => 0,
            GameMode::Countdown => 1,
            GameMode::Game => 2,
            GameMode::Winner1 => 3,
            GameMode::Winner2 => 4,
        }
    }

    /// Parse a mode from its wire code
    pub fn from_wire_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.wire_code() == code)
    }
}
