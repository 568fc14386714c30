//! Controller threads
//!
//! Each task runs on its own thread for the life of the process and talks
//! to the others through the packet queue and the shared game state.

pub mod dispatch;
pub mod mode;
pub mod serial_rx;

pub use dispatch::{dispatch_packet, dispatch_task};
pub use mode::mode_task;
pub use serial_rx::{serial_rx_task, SerialReader};
