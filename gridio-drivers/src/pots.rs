//! Potentiometer reader
//!
//! Pots sit behind an 8-channel analog multiplexer (4051). Three select
//! lines pick the channel, one ADC input samples it.

use gridio_core::geometry::{MUX_SELECT_BITS, POT_COUNT};
use gridio_core::pots::{select_levels, AnalogRange, PotFilter};
use gridio_core::GridListener;
use gridio_hal::{AnalogInput, OutputPin};

/// Multiplexed pot bank with change filtering
pub struct PotReader<O, A> {
    select: [O; MUX_SELECT_BITS],
    input: A,
    range: AnalogRange,
    filter: PotFilter,
}

impl<O: OutputPin, A: AnalogInput> PotReader<O, A> {
    /// Create a reader; every pot starts at level 0
    pub fn new(select: [O; MUX_SELECT_BITS], input: A, range: AnalogRange, filter: PotFilter) -> Self {
        Self {
            select,
            input,
            range,
            filter,
        }
    }

    /// Sample every pot once and report the ones that moved
    ///
    /// Returns the number of changes reported.
    pub fn read<L: GridListener + ?Sized>(&mut self, listener: &mut L) -> u8 {
        let mut changes = 0;
        for pot in 0..POT_COUNT as u8 {
            let value = self.sample(pot);
            if self.filter.accept(pot, value) {
                #[cfg(feature = "defmt")]
                defmt::trace!("pot {} -> {}", pot, value);
                listener.pot_change(pot, value);
                changes += 1;
            }
        }
        changes
    }

    /// Select `channel` and return its rescaled reading
    fn sample(&mut self, channel: u8) -> u16 {
        for (pin, high) in self.select.iter_mut().zip(select_levels(channel)) {
            pin.set_state(high);
        }
        self.range.scale(self.input.sample())
    }

    /// Last accepted quantized level of `pot`
    pub fn level(&self, pot: u8) -> u16 {
        self.filter.level(pot)
    }

    /// Give back the select pins and the analog input
    pub fn release(self) -> ([O; MUX_SELECT_BITS], A) {
        (self.select, self.input)
    }
}
