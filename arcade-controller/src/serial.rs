//! Serial device adapters
//!
//! [`IoUart`] turns any `std::io` byte device (for example an already
//! configured tty opened non-blocking) into the HAL UART traits.
//! [`PacketWriter`] frames outbound packets onto a [`UartTx`].

use std::io::{self, ErrorKind, Read, Write};

use arcade_hal::{UartRx, UartTx};
use arcade_protocol::{Feedback, Packet, PACKET_SIZE};
use log::{trace, warn};
use thiserror::Error;

/// UART over a `std::io` device
///
/// `WouldBlock`, `TimedOut` and `Interrupted` are reported as zero bytes
/// transferred; the caller retries on its next cycle.
#[derive(Debug)]
pub struct IoUart<T> {
    inner: T,
}

impl<T> IoUart<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

fn transient_as_zero(result: io::Result<usize>) -> io::Result<usize> {
    match result {
        Err(e)
            if matches!(
                e.kind(),
                ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted
            ) =>
        {
            Ok(0)
        }
        other => other,
    }
}

impl<T: Read> UartRx for IoUart<T> {
    type Error = io::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        transient_as_zero(self.inner.read(buf))
    }
}

impl<T: Write> UartTx for IoUart<T> {
    type Error = io::Error;

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        transient_as_zero(self.inner.write(data))
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        match self.inner.flush() {
            Err(e) if e.kind() == ErrorKind::WouldBlock => Ok(()),
            other => other,
        }
    }
}

/// Attempts at pushing one frame into a device that accepts nothing
pub const MAX_STALLED_WRITES: usize = 16;

/// Outbound frame could not be written
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendError {
    #[error("serial device error: {0}")]
    Device(String),
    #[error("serial device stalled after {written} of {} bytes", PACKET_SIZE)]
    Stalled { written: usize },
}

/// Writes framed packets to the control hardware
#[derive(Debug)]
pub struct PacketWriter<T> {
    tx: T,
}

impl<T: UartTx> PacketWriter<T> {
    pub fn new(tx: T) -> Self {
        Self { tx }
    }

    /// Write one framed packet, retrying short writes
    ///
    /// Gives up on a device error or after [`MAX_STALLED_WRITES`] writes in
    /// a row that accepted nothing.
    pub fn send(&mut self, packet: Packet) -> Result<(), SendError> {
        let frame = packet.encode();
        let mut written = 0;
        let mut stalled = 0;

        while written < PACKET_SIZE {
            match self.tx.write(&frame[written..]) {
                Ok(0) => {
                    stalled += 1;
                    if stalled >= MAX_STALLED_WRITES {
                        return Err(SendError::Stalled { written });
                    }
                    std::thread::yield_now();
                }
                Ok(n) => {
                    written += n;
                    stalled = 0;
                }
                Err(e) => return Err(SendError::Device(format!("{:?}", e))),
            }
        }

        self.tx
            .flush()
            .map_err(|e| SendError::Device(format!("{:?}", e)))
    }
}

/// Destination for controller feedback
pub trait FeedbackSink: Send {
    /// Send feedback; failures are logged, never returned
    fn send_feedback(&mut self, feedback: Feedback);
}

impl<T: UartTx + Send> FeedbackSink for PacketWriter<T> {
    fn send_feedback(&mut self, feedback: Feedback) {
        match self.send(feedback.to_packet()) {
            Ok(()) => trace!("TX: {:?}", feedback),
            Err(e) => warn!("Failed to send {:?}: {}", feedback, e),
        }
    }
}
