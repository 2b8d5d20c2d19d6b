//! LED matrix writer
//!
//! One serial-in/parallel-out register per row, chained. Row 0 is shifted
//! first; the latch's rising edge moves the whole chain to the outputs.

use gridio_core::geometry::ROWS;
use gridio_core::leds::{FrameCounter, LedRows};
use gridio_hal::OutputPin;

use crate::shift::{shift_out, BitOrder};

/// Blinking LED matrix behind a register chain
pub struct LedMatrix<O> {
    data: O,
    clock: O,
    latch: O,
    rows: LedRows,
    frame: FrameCounter,
}

impl<O: OutputPin> LedMatrix<O> {
    /// Create a writer with every LED off, at frame 0
    pub fn new(data: O, clock: O, latch: O) -> Self {
        Self {
            data,
            clock,
            latch,
            rows: LedRows::new(),
            frame: FrameCounter::new(),
        }
    }

    /// Shift the current frame out to the registers
    ///
    /// Lit rows are sent on even frames, blank rows on odd ones. Does not
    /// advance the frame.
    pub fn flush(&mut self) {
        self.latch.set_low();
        for row in 0..ROWS as u8 {
            let byte = self.rows.output(row, self.frame);
            shift_out(&mut self.data, &mut self.clock, BitOrder::LsbFirst, byte);
        }
        self.latch.set_high();
    }

    /// Flush, then move to the next frame
    pub fn write(&mut self) {
        self.flush();
        self.frame.advance();
    }

    /// Stored LED state
    pub fn rows(&self) -> &LedRows {
        &self.rows
    }

    /// Mutable LED state, applied on the next write
    pub fn rows_mut(&mut self) -> &mut LedRows {
        &mut self.rows
    }

    /// Frame the next write will show
    pub fn frame(&self) -> FrameCounter {
        self.frame
    }

    /// Give back the data, clock and latch pins
    pub fn release(self) -> (O, O, O) {
        (self.data, self.clock, self.latch)
    }
}
