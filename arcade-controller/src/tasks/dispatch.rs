//! Packet dispatch task
//!
//! Applies queued packets to the shared game state in arrival order.

use std::sync::Arc;

use arcade_protocol::{ControlInput, Packet};
use log::{debug, info, trace};

use crate::channels::PacketQueue;
use crate::game_state::SharedGameState;

/// Apply one packet, returning false if its instruction was ignored
pub fn dispatch_packet(state: &SharedGameState, packet: Packet) -> bool {
    match ControlInput::from_packet(&packet) {
        Some(input) => {
            debug!("Input: {:?}", input);
            state.apply(input);
            true
        }
        None => {
            trace!("Ignoring instruction {:#04x}", packet.instruction);
            false
        }
    }
}

/// Dispatch task - blocks on the queue and applies each packet
pub fn dispatch_task(queue: Arc<PacketQueue>, state: Arc<SharedGameState>) -> ! {
    info!("Dispatch task started");

    loop {
        let packet = queue.dequeue_blocking();
        dispatch_packet(&state, packet);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::{Duration, Instant};

    #[test]
    fn test_digital_press_requests_start() {
        let state = SharedGameState::new();
        assert!(dispatch_packet(&state, Packet::new(0x10, 0x00)));
        assert!(state.start_requested());
    }

    #[test]
    fn test_analog_uses_low_bit() {
        let state = SharedGameState::new();
        assert!(dispatch_packet(&state, Packet::new(0x20, 0x40)));
        assert!(dispatch_packet(&state, Packet::new(0x23, 0x41)));
        assert_eq!(state.snapshot_controllers().values(), [0x40, 0x41]);
    }

    #[test]
    fn test_unknown_class_ignored() {
        let state = SharedGameState::new();
        for instruction in [0x00, 0x30, 0x4A, 0xF0] {
            assert!(!dispatch_packet(&state, Packet::new(instruction, 0x00)));
        }
        assert_eq!(state.snapshot_controllers().values(), [0, 0]);
        assert!(!state.start_requested());
    }

    #[test]
    fn test_task_applies_queued_start() {
        let queue = Arc::new(PacketQueue::new());
        let state = Arc::new(SharedGameState::new());

        {
            let queue = queue.clone();
            let state = state.clone();
            thread::spawn(move || {
                dispatch_task(queue, state);
            });
        }

        queue.enqueue(Packet::new(0x21, 0x99));
        queue.enqueue(Packet::new(0x10, 0x00));

        assert!(state.wait_for_start(Duration::from_secs(5)));
        let deadline = Instant::now() + Duration::from_secs(5);
        while state.snapshot_controllers().get(1) != 0x99 && Instant::now() < deadline {
            thread::yield_now();
        }
        assert_eq!(state.snapshot_controllers().get(1), 0x99);
    }
}
