//! Packet framing for the arcade control protocol.
//!
//! Packet format:
//! - HEADER (1 byte): 0xFF synchronization byte
//! - INSTRUCTION (1 byte): class in the top nibble, argument in the low nibble
//! - VALUE (1 byte): instruction-specific payload

/// Packet synchronization byte
pub const PACKET_HEADER: u8 = 0xFF;

/// Complete packet size on the wire (HEADER + INSTRUCTION + VALUE)
pub const PACKET_SIZE: usize = 3;

/// A decoded or outbound packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Packet {
    /// Instruction byte
    pub instruction: u8,
    /// Value byte
    pub value: u8,
}

impl Packet {
    /// Create a packet
    pub const fn new(instruction: u8, value: u8) -> Self {
        Self { instruction, value }
    }

    /// Instruction class (top nibble)
    pub const fn class(&self) -> u8 {
        self.instruction >> 4
    }

    /// Encode this packet for the wire
    ///
    /// A `0xFF` instruction or value is written as-is and will be read back
    /// as a header by the receiving side.
    pub const fn encode(&self) -> [u8; PACKET_SIZE] {
        [PACKET_HEADER, self.instruction, self.value]
    }
}

/// Framing state for incoming bytes
///
/// Tracks the position inside the current packet. A header byte restarts
/// framing from any position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum DecodeState {
    /// Waiting for HEADER; everything else is dropped
    AwaitingHeader,
    /// Got HEADER, next byte is the instruction
    AwaitingInstruction,
    /// Got the instruction, next byte completes the packet
    AwaitingValue { instruction: u8 },
}

/// Byte-at-a-time packet decoder
///
/// Malformed input is never an error: bytes that do not fit the expected
/// HEADER/INSTRUCTION/VALUE sequence are dropped until the next header.
#[derive(Debug, Clone)]
pub struct FrameDecoder {
    state: DecodeState,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder {
    /// Create a decoder waiting for its first header
    pub const fn new() -> Self {
        Self {
            state: DecodeState::AwaitingHeader,
        }
    }

    /// Drop any partially received packet
    pub fn reset(&mut self) {
        self.state = DecodeState::AwaitingHeader;
    }

    /// Returns true when the decoder is between packets
    pub fn is_idle(&self) -> bool {
        self.state == DecodeState::AwaitingHeader
    }

    /// Feed a single byte to the decoder
    ///
    /// Returns `Some(packet)` when this byte completes a packet.
    pub fn feed(&mut self, byte: u8) -> Option<Packet> {
        if byte == PACKET_HEADER {
            self.state = DecodeState::AwaitingInstruction;
            return None;
        }

        match self.state {
            DecodeState::AwaitingHeader => None,
            DecodeState::AwaitingInstruction => {
                self.state = DecodeState::AwaitingValue { instruction: byte };
                None
            }
            DecodeState::AwaitingValue { instruction } => {
                self.state = DecodeState::AwaitingHeader;
                Some(Packet::new(instruction, byte))
            }
        }
    }

    /// Feed a chunk of bytes, handing every completed packet to `sink`
    ///
    /// Returns the number of packets produced.
    pub fn feed_bytes<F>(&mut self, bytes: &[u8], mut sink: F) -> usize
    where
        F: FnMut(Packet),
    {
        let mut produced = 0;
        for &byte in bytes {
            if let Some(packet) = self.feed(byte) {
                sink(packet);
                produced += 1;
            }
        }
        produced
    }
}
