//! Board-agnostic core logic for the gridio panel
//!
//! This crate contains everything about the panel that does not depend on
//! how pins are actually driven:
//!
//! - Matrix geometry and the row/column bit mapping
//! - Debounce gate and per-cell button edge tracking
//! - Potentiometer scaling and quantization filter
//! - LED row storage and the blink frame counter
//! - Events and listener dispatch
//! - Configuration types

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buttons;
pub mod config;
pub mod events;
pub mod geometry;
pub mod leds;
pub mod pots;

pub use buttons::{ButtonState, DebounceGate};
pub use config::{ConfigError, GridConfig};
pub use events::{Callbacks, EventQueue, GridEvent, GridListener};
pub use geometry::{COLS, POT_COUNT, ROWS};
pub use leds::{FrameCounter, LedRows};
pub use pots::{AnalogRange, PotFilter};
