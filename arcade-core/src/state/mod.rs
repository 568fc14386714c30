//! Game mode state machine
//!
//! Defines the mode cycle of the cabinet. Every mode has a successor and
//! there is no terminal mode.

pub mod controllers;
pub mod machine;

pub use controllers::ControllerBank;
pub use machine::{Dwell, GameMode, GameQuery};
