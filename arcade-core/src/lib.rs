//! Board-agnostic game logic for the arcade controller
//!
//! This crate contains all application logic that does not depend on
//! threads, the serial device or the playback engine:
//!
//! - Game mode state machine and winner selection
//! - Controller bank (per-player effort values)
//! - Mode to media stream mapping and dwell policy
//! - RGB to YUV color conversion for the overlay
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod state;

#[cfg(test)]
extern crate std;
