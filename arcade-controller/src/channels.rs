//! Inter-thread communication channels
//!
//! The serial reader thread hands decoded packets to the dispatch thread
//! through a [`PacketQueue`]. The queue is unbounded: packets arrive far
//! slower than they are consumed.

use std::collections::VecDeque;

use arcade_protocol::Packet;
use parking_lot::{Condvar, Mutex};

/// FIFO of decoded packets between one reader and one consumer
#[derive(Debug, Default)]
pub struct PacketQueue {
    packets: Mutex<VecDeque<Packet>>,
    data_ready: Condvar,
}

impl PacketQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a packet and wake a waiting consumer
    pub fn enqueue(&self, packet: Packet) {
        let mut packets = self.packets.lock();
        packets.push_back(packet);
        self.data_ready.notify_one();
    }

    /// Remove the oldest packet, waiting until one is available
    pub fn dequeue_blocking(&self) -> Packet {
        let mut packets = self.packets.lock();
        loop {
            if let Some(packet) = packets.pop_front() {
                return packet;
            }
            // Re-checked after every wake-up, spurious or not
            self.data_ready.wait(&mut packets);
        }
    }

    /// Remove the oldest packet if there is one
    pub fn try_dequeue(&self) -> Option<Packet> {
        self.packets.lock().pop_front()
    }

    /// Number of packets waiting
    pub fn len(&self) -> usize {
        self.packets.lock().len()
    }

    /// Returns true if no packet is waiting
    pub fn is_empty(&self) -> bool {
        self.packets.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_fifo_order() {
        let queue = PacketQueue::new();
        let sent = [
            Packet::new(0x10, 0),
            Packet::new(0x20, 1),
            Packet::new(0x21, 2),
        ];
        for packet in sent {
            queue.enqueue(packet);
        }

        assert_eq!(queue.len(), 3);
        let received: Vec<Packet> = (0..3).map(|_| queue.dequeue_blocking()).collect();
        assert_eq!(received, sent);
        assert!(queue.is_empty());
        assert_eq!(queue.try_dequeue(), None);
    }

    #[test]
    fn test_dequeue_waits_for_producer() {
        let queue = Arc::new(PacketQueue::new());

        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.dequeue_blocking())
        };

        thread::sleep(Duration::from_millis(20));
        queue.enqueue(Packet::new(0x21, 0x42));

        assert_eq!(consumer.join().unwrap(), Packet::new(0x21, 0x42));
    }

    #[test]
    fn test_fifo_order_under_concurrency() {
        let queue = Arc::new(PacketQueue::new());
        let count = 2_000u16;

        let producer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                for n in 0..count {
                    queue.enqueue(Packet::new((n >> 8) as u8, n as u8));
                    if n % 128 == 0 {
                        thread::yield_now();
                    }
                }
            })
        };

        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                (0..count)
                    .map(|_| queue.dequeue_blocking())
                    .collect::<Vec<_>>()
            })
        };

        producer.join().unwrap();
        let received = consumer.join().unwrap();

        for (n, packet) in received.iter().enumerate() {
            assert_eq!(*packet, Packet::new((n >> 8) as u8, n as u8));
        }
    }
}
