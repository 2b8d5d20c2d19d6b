//! LED row storage and blink framing
//!
//! The panel has no per-LED brightness. A lit LED is shown on even frames
//! and blanked on odd frames, so every lit LED blinks at half the refresh
//! rate.

use crate::geometry::{check_cell, led_mask, ROWS};

/// Desired on/off state of every LED, one byte per row
///
/// Bit order follows the LED wiring: column 0 is the most significant bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedRows {
    rows: [u8; ROWS],
}

impl LedRows {
    /// All LEDs off
    pub const fn new() -> Self {
        Self { rows: [0; ROWS] }
    }

    /// Turn one LED on or off
    pub fn set(&mut self, row: u8, col: u8, on: bool) {
        check_cell(row, col);
        let mask = led_mask(col);
        let byte = &mut self.rows[row as usize];
        if on {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }

    /// Stored state of one LED
    pub fn get(&self, row: u8, col: u8) -> bool {
        check_cell(row, col);
        self.rows[row as usize] & led_mask(col) != 0
    }

    /// Replace a whole row byte
    pub fn set_row(&mut self, row: u8, bits: u8) {
        check_cell(row, 0);
        self.rows[row as usize] = bits;
    }

    /// Raw row byte
    pub fn row(&self, row: u8) -> u8 {
        check_cell(row, 0);
        self.rows[row as usize]
    }

    /// Turn every LED off
    pub fn clear(&mut self) {
        self.rows = [0; ROWS];
    }

    /// Byte to shift out for `row` during `frame`
    pub fn output(&self, row: u8, frame: FrameCounter) -> u8 {
        if frame.is_lit() {
            self.row(row)
        } else {
            0
        }
    }

    /// All row bytes, bottom row first
    pub fn as_bytes(&self) -> &[u8; ROWS] {
        &self.rows
    }
}

/// Number of LED writes performed, wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameCounter(u32);

impl FrameCounter {
    /// Counter at frame 0
    pub const fn new() -> Self {
        Self(0)
    }

    /// Current frame number
    pub fn count(&self) -> u32 {
        self.0
    }

    /// Lit LEDs are shown on even frames only
    pub fn is_lit(&self) -> bool {
        self.0 % 2 == 0
    }

    /// Move to the next frame
    pub fn advance(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}
