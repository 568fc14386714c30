//! Serial receive task
//!
//! Reads bytes from the control hardware, reassembles packets and queues
//! them for dispatch.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use arcade_hal::UartRx;
use arcade_protocol::FrameDecoder;
use log::{info, trace, warn};

use crate::channels::PacketQueue;

/// Decoder and read buffer bound to one serial device
pub struct SerialReader<R> {
    rx: R,
    decoder: FrameDecoder,
    buf: Vec<u8>,
    queue: Arc<PacketQueue>,
}

impl<R: UartRx> SerialReader<R> {
    /// Reader using a `read_buffer`-byte chunk per read
    pub fn new(rx: R, queue: Arc<PacketQueue>, read_buffer: usize) -> Self {
        Self {
            rx,
            decoder: FrameDecoder::new(),
            buf: vec![0; read_buffer.max(1)],
            queue,
        }
    }

    /// Read one chunk and queue every packet it completes
    ///
    /// Returns the number of bytes read; zero means the line is idle.
    /// A partial packet at the end of the chunk is kept for the next call.
    pub fn poll_once(&mut self) -> Result<usize, R::Error> {
        let n = self.rx.read(&mut self.buf)?.min(self.buf.len());
        if n > 0 {
            trace!("RX: {} bytes", n);
            let queue = &self.queue;
            self.decoder
                .feed_bytes(&self.buf[..n], |packet| queue.enqueue(packet));
        }
        Ok(n)
    }
}

/// Serial RX task - polls the device, sleeping `idle` when nothing arrived
pub fn serial_rx_task<R: UartRx>(mut reader: SerialReader<R>, idle: Duration) -> ! {
    info!("Serial RX task started");

    loop {
        match reader.poll_once() {
            Ok(0) => thread::sleep(idle),
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
                thread::sleep(idle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_protocol::Packet;
    use std::collections::VecDeque;

    /// Device returning scripted chunks, then idling
    struct ScriptedRx {
        chunks: VecDeque<Result<Vec<u8>, ()>>,
    }

    impl ScriptedRx {
        fn new(chunks: Vec<Result<Vec<u8>, ()>>) -> Self {
            Self {
                chunks: chunks.into(),
            }
        }
    }

    impl UartRx for ScriptedRx {
        type Error = ();

        fn read(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
            match self.chunks.pop_front() {
                Some(Ok(chunk)) => {
                    buf[..chunk.len()].copy_from_slice(&chunk);
                    Ok(chunk.len())
                }
                Some(Err(())) => Err(()),
                None => Ok(0),
            }
        }
    }

    fn drain(queue: &PacketQueue) -> Vec<Packet> {
        std::iter::from_fn(|| queue.try_dequeue()).collect()
    }

    #[test]
    fn test_packets_split_across_reads() {
        let queue = Arc::new(PacketQueue::new());
        let rx = ScriptedRx::new(vec![
            Ok(vec![0xFF, 0x21]),
            Ok(vec![0x40, 0xFF]),
            Ok(vec![0x10, 0x00]),
        ]);
        let mut reader = SerialReader::new(rx, queue.clone(), 16);

        assert_eq!(reader.poll_once(), Ok(2));
        assert!(queue.is_empty());
        assert_eq!(reader.poll_once(), Ok(2));
        assert_eq!(reader.poll_once(), Ok(2));
        assert_eq!(reader.poll_once(), Ok(0));

        assert_eq!(
            drain(&queue),
            [Packet::new(0x21, 0x40), Packet::new(0x10, 0x00)]
        );
    }

    #[test]
    fn test_read_error_keeps_decoder_state() {
        let queue = Arc::new(PacketQueue::new());
        let rx = ScriptedRx::new(vec![Ok(vec![0xFF, 0x20]), Err(()), Ok(vec![0x7F])]);
        let mut reader = SerialReader::new(rx, queue.clone(), 16);

        reader.poll_once().unwrap();
        assert!(reader.poll_once().is_err());
        reader.poll_once().unwrap();

        assert_eq!(drain(&queue), [Packet::new(0x20, 0x7F)]);
    }

    #[test]
    fn test_noise_before_header_dropped() {
        let queue = Arc::new(PacketQueue::new());
        let rx = ScriptedRx::new(vec![Ok(vec![0x12, 0x34, 0xFF, 0x21, 0xFF, 0x20, 0x05])]);
        let mut reader = SerialReader::new(rx, queue.clone(), 16);

        reader.poll_once().unwrap();
        assert_eq!(drain(&queue), [Packet::new(0x20, 0x05)]);
    }
}
