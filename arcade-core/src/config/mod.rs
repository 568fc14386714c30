//! Configuration types for the arcade controller
//!
//! Parsing lives with the application; this module only defines the types,
//! their defaults and validation.

pub mod types;

pub use types::{
    ArcadeConfig, BarConfig, DwellConfig, OverlayConfig, SerialConfig, StreamIndex, StreamPair,
    StreamTable, ValidationError,
};
