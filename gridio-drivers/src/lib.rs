//! Panel drivers
//!
//! Drives the gridio panel hardware through the traits in `gridio-hal`:
//!
//! - Bit-banged shift-register codec
//! - Debounced button matrix reader (parallel-in register cascade)
//! - Blinking LED matrix writer (serial-in register chain)
//! - Multiplexed potentiometer reader
//! - [`GridPanel`] coordinator owning all of the above

#![no_std]
#![deny(unsafe_code)]

pub mod buttons;
pub mod leds;
pub mod panel;
pub mod pots;
pub mod shift;

#[cfg(test)]
mod sim;

pub use buttons::ButtonMatrix;
pub use leds::LedMatrix;
pub use panel::{GridPanel, GridPins};
pub use pots::PotReader;
pub use shift::{shift_in, shift_out, BitOrder};
