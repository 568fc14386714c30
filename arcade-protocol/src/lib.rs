//! Arcade Control Protocol
//!
//! This crate defines the UART protocol between the arcade controller and
//! the control hardware (start button and two analog effort sensors).
//!
//! # Protocol Overview
//!
//! Every packet is three bytes:
//! ```text
//! ┌────────┬─────────────┬───────┐
//! │ HEADER │ INSTRUCTION │ VALUE │
//! │ 0xFF   │ 1B          │ 1B    │
//! └────────┴─────────────┴───────┘
//! ```
//!
//! The top nibble of the instruction selects its class. There is no length
//! and no checksum; a header byte always restarts framing, so neither the
//! instruction nor the value may be `0xFF`.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;

pub use frame::{FrameDecoder, Packet, PACKET_HEADER, PACKET_SIZE};
pub use messages::{ControlInput, Feedback};

#[cfg(test)]
extern crate std;
