//! Message classes for the arcade control protocol
//!
//! The top nibble of the instruction byte selects the class:
//! - Hardware → Controller: digital (start button) and analog (effort) inputs
//! - Controller → Hardware: feedback such as the current mode
//!
//! Unknown classes are ignored so newer hardware can add instructions
//! without breaking older controllers.

use crate::frame::Packet;

// Instruction classes: Hardware → Controller
pub const CLASS_DIGITAL: u8 = 0x1;
pub const CLASS_ANALOG: u8 = 0x2;

// Instruction classes: Controller → Hardware
pub const CLASS_MODE: u8 = 0x3;

/// Number of analog controllers on the cabinet
pub const CONTROLLER_COUNT: usize = 2;

/// Inputs parsed from hardware-originated packets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlInput {
    /// Start button level; the line is active-low, so 0 means pressed
    Digital { level: u8 },
    /// Effort magnitude for one controller
    Analog { controller: usize, magnitude: u8 },
}

impl ControlInput {
    /// Classify a packet, returning `None` for instruction classes this
    /// controller does not understand
    pub fn from_packet(packet: &Packet) -> Option<Self> {
        match packet.class() {
            CLASS_DIGITAL => Some(ControlInput::Digital {
                level: packet.value,
            }),
            CLASS_ANALOG => Some(ControlInput::Analog {
                controller: (packet.instruction & 0x01) as usize,
                magnitude: packet.value,
            }),
            _ => None,
        }
    }

    /// Returns true if this is a start button press
    pub fn is_start_press(&self) -> bool {
        matches!(self, ControlInput::Digital { level: 0 })
    }
}

/// Feedback sent from the controller to the hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Feedback {
    /// The controller entered a new mode (wire code of the mode)
    Mode(u8),
}

impl Feedback {
    /// Encode this feedback into a packet
    pub fn to_packet(self) -> Packet {
        match self {
            Feedback::Mode(code) => Packet::new(CLASS_MODE << 4, code),
        }
    }
}
