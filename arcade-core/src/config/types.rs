//! Configuration type definitions
//!
//! Every field has a default, so an empty document describes the stock
//! cabinet: ten streams in five pairs, 18/8/10/5 second dwells and two
//! bars near the left and right screen edges.

use crate::color::{ColorConversion, Rgb};
use crate::state::GameMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Index of an elementary stream inside the media container
pub type StreamIndex = u32;

/// Video and audio stream played together in one mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct StreamPair {
    /// Video stream index
    pub video: StreamIndex,
    /// Audio stream index
    pub audio: StreamIndex,
}

impl StreamPair {
    /// Create a pair
    pub const fn new(video: StreamIndex, audio: StreamIndex) -> Self {
        Self { video, audio }
    }
}

/// Stream pair for every mode
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct StreamTable {
    pub attract: StreamPair,
    pub countdown: StreamPair,
    pub game: StreamPair,
    pub winner1: StreamPair,
    pub winner2: StreamPair,
}

impl Default for StreamTable {
    fn default() -> Self {
        Self {
            attract: StreamPair::new(0, 1),
            countdown: StreamPair::new(2, 3),
            game: StreamPair::new(4, 5),
            winner1: StreamPair::new(6, 7),
            winner2: StreamPair::new(8, 9),
        }
    }
}

impl StreamTable {
    /// Streams played while in `mode`
    pub fn pair(&self, mode: GameMode) -> StreamPair {
        match mode {
            GameMode::Attract => self.attract,
            GameMode::Countdown => self.countdown,
            GameMode::Game => self.game,
            GameMode::Winner1 => self.winner1,
            GameMode::Winner2 => self.winner2,
        }
    }

    /// Streams the playback engine must open before the controller starts
    pub fn initial(&self) -> StreamPair {
        self.pair(GameMode::INITIAL)
    }

    /// Check that no stream index is used twice
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = [0 as StreamIndex; 10];
        let mut count = 0;
        for mode in GameMode::ALL {
            let pair = self.pair(mode);
            for index in [pair.video, pair.audio] {
                if seen[..count].contains(&index) {
                    return Err(ValidationError::DuplicateStream(index));
                }
                seen[count] = index;
                count += 1;
            }
        }
        Ok(())
    }
}

/// Dwell durations in milliseconds
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct DwellConfig {
    /// Longest ATTRACT wait before the attract clip restarts
    pub attract_timeout_ms: u64,
    pub countdown_ms: u64,
    pub game_ms: u64,
    /// Used for both winner modes
    pub winner_ms: u64,
}

impl Default for DwellConfig {
    fn default() -> Self {
        Self {
            attract_timeout_ms: 18_000,
            countdown_ms: 8_000,
            game_ms: 10_000,
            winner_ms: 5_000,
        }
    }
}

/// One effort bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct BarConfig {
    /// Left edge, percent of frame width
    pub x_pct: u8,
    /// Bar color
    pub rgb: Rgb,
    /// Formula used to turn `rgb` into YUV
    #[cfg_attr(feature = "serde", serde(default))]
    pub conversion: ColorConversion,
}

/// Overlay layout, all values in percent of the frame
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct OverlayConfig {
    /// Height of a fully saturated bar
    pub max_height_pct: u8,
    /// Bar width
    pub width_pct: u8,
    /// Baseline the bars grow up from
    pub bottom_pct: u8,
    /// Share of the bar width ramped at each edge of the luma
    pub taper_pct: u8,
    /// Controller 0
    pub left: BarConfig,
    /// Controller 1
    pub right: BarConfig,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            max_height_pct: 60,
            width_pct: 5,
            bottom_pct: 90,
            taper_pct: 25,
            left: BarConfig {
                x_pct: 10,
                rgb: Rgb(255, 64, 0),
                conversion: ColorConversion::Legacy,
            },
            right: BarConfig {
                x_pct: 85,
                rgb: Rgb(0, 128, 255),
                conversion: ColorConversion::Ccir,
            },
        }
    }
}

impl OverlayConfig {
    /// Bars in controller order
    pub fn bars(&self) -> [&BarConfig; 2] {
        [&self.left, &self.right]
    }

    /// Check that every percentage is in range and each bar fits the frame
    pub fn validate(&self) -> Result<(), ValidationError> {
        for pct in [
            self.max_height_pct,
            self.width_pct,
            self.bottom_pct,
            self.taper_pct,
        ] {
            if pct > 100 {
                return Err(ValidationError::PercentOutOfRange(pct));
            }
        }
        if self.max_height_pct > self.bottom_pct {
            return Err(ValidationError::BarOutOfFrame);
        }
        for bar in self.bars() {
            if bar.x_pct as u16 + self.width_pct as u16 > 100 {
                return Err(ValidationError::BarOutOfFrame);
            }
        }
        Ok(())
    }
}

/// Serial link behavior
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SerialConfig {
    /// Bytes read from the device per cycle
    pub read_buffer: usize,
    /// Sleep after a read that returned nothing
    pub idle_poll_ms: u64,
    /// Send a mode feedback packet on every mode entry
    pub announce_modes: bool,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            read_buffer: 64,
            idle_poll_ms: 5,
            announce_modes: true,
        }
    }
}

/// Complete controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ArcadeConfig {
    pub streams: StreamTable,
    pub dwell: DwellConfig,
    pub overlay: OverlayConfig,
    pub serial: SerialConfig,
}

impl ArcadeConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.streams.validate()?;
        self.overlay.validate()?;
        if self.serial.read_buffer == 0 {
            return Err(ValidationError::EmptyReadBuffer);
        }
        Ok(())
    }
}

/// Configuration rejected by validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValidationError {
    /// A stream index is mapped to more than one mode or media type
    DuplicateStream(StreamIndex),
    /// A percentage above 100
    PercentOutOfRange(u8),
    /// A bar would extend past the frame edge
    BarOutOfFrame,
    /// The serial read buffer has zero length
    EmptyReadBuffer,
}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ValidationError::DuplicateStream(index) => {
                write!(f, "stream {} is assigned more than once", index)
            }
            ValidationError::PercentOutOfRange(pct) => {
                write!(f, "percentage {} is above 100", pct)
            }
            ValidationError::BarOutOfFrame => write!(f, "overlay bar does not fit the frame"),
            ValidationError::EmptyReadBuffer => write!(f, "serial read buffer must not be empty"),
        }
    }
}
