//! gridio Hardware Abstraction Layer
//!
//! The panel driver never touches registers directly. Everything it needs
//! from the board is expressed by the traits in this crate, which a chip
//! HAL (or a test double) implements.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Host application (sequencer, etc.)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  gridio-drivers (GridPanel)             │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  gridio-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │  board / sim  │
//! │   adapters    │       │  impls        │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`adc::AnalogInput`] - Analog sampling
//! - [`time::Clock`], [`time::DelayUs`] - Elapsed time and busy-wait delays

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod time;

#[cfg(feature = "embedded-hal")]
pub mod embedded;

// Re-export key traits at crate root for convenience
pub use adc::AnalogInput;
pub use gpio::{InputPin, Level, OutputPin};
pub use time::{Clock, DelayUs};
