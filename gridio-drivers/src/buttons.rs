//! Button matrix reader
//!
//! One 8-bit parallel-in shift register per row, cascaded. Pulling the
//! latch low freezes the parallel inputs and switches the cascade to
//! serial mode; the top row comes out first.

use gridio_core::buttons::{ButtonState, DebounceGate};
use gridio_core::geometry::ROWS;
use gridio_core::GridListener;
use gridio_hal::{DelayUs, InputPin, OutputPin};

use crate::shift::shift_in;

/// Debounced reader for the button shift-register cascade
pub struct ButtonMatrix<I, O> {
    data: I,
    clock: O,
    latch: O,
    settle_us: u32,
    gate: DebounceGate,
    state: ButtonState,
}

impl<I: InputPin, O: OutputPin> ButtonMatrix<I, O> {
    /// Create a reader with every button released
    ///
    /// The latch is left high so the registers keep capturing.
    pub fn new(data: I, clock: O, mut latch: O, gate: DebounceGate, settle_us: u32) -> Self {
        latch.set_high();
        Self {
            data,
            clock,
            latch,
            settle_us,
            gate,
            state: ButtonState::new(),
        }
    }

    /// Sample the whole matrix if the debounce gate is open
    ///
    /// Edges are reported to `listener` as they are found, rows in
    /// transmission order (top row first) and columns in ascending order.
    /// Returns false, touching neither pins nor state, when the previous
    /// accepted scan was less than the debounce interval ago.
    pub fn scan<D, L>(&mut self, now_ms: u32, delay: &mut D, listener: &mut L) -> bool
    where
        D: DelayUs,
        L: GridListener + ?Sized,
    {
        if !self.gate.try_accept(now_ms) {
            return false;
        }

        self.latch.set_low();
        let mut edges = 0u32;
        for row in (0..ROWS).rev() {
            let sample = shift_in(&mut self.data, &mut self.clock, delay, self.settle_us);
            edges += self.state.update_row(row, sample, now_ms, listener) as u32;
        }
        self.latch.set_high();

        #[cfg(feature = "defmt")]
        defmt::trace!("button scan at {}ms: {} edges", now_ms, edges);
        let _ = edges;
        true
    }

    /// Button state from the last accepted scan
    pub fn state(&self) -> &ButtonState {
        &self.state
    }

    /// Debounce gate
    pub fn gate(&self) -> &DebounceGate {
        &self.gate
    }

    /// Give back the data, clock and latch pins
    pub fn release(self) -> (I, O, O) {
        (self.data, self.clock, self.latch)
    }
}
