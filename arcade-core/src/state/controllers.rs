//! Per-player effort values

use arcade_protocol::messages::CONTROLLER_COUNT;

/// Raw 8-bit magnitude for each analog controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerBank {
    values: [u8; CONTROLLER_COUNT],
}

impl ControllerBank {
    /// Bank with every controller at zero
    pub const fn new() -> Self {
        Self {
            values: [0; CONTROLLER_COUNT],
        }
    }

    /// Bank with explicit values for controller 0 and controller 1
    pub const fn from_values(values: [u8; CONTROLLER_COUNT]) -> Self {
        Self { values }
    }

    /// Store a magnitude; only the low bit of `index` is used
    pub fn set(&mut self, index: usize, value: u8) {
        self.values[index & 1] = value;
    }

    /// Magnitude of a controller; only the low bit of `index` is used
    pub fn get(&self, index: usize) -> u8 {
        self.values[index & 1]
    }

    /// All magnitudes in controller order
    pub fn values(&self) -> [u8; CONTROLLER_COUNT] {
        self.values
    }

    /// True when controller 0 is strictly ahead of controller 1
    pub fn first_leads(&self) -> bool {
        self.values[0] > self.values[1]
    }
}
