//! Bit-banged shift-register codec
//!
//! Reads from a parallel-in/serial-out cascade (button side) and writes to
//! a serial-in/parallel-out chain (LED side). Latching is left to the
//! caller since a single latch pulse frames a whole multi-byte transfer.

use gridio_hal::{DelayUs, InputPin, OutputPin};

/// Order in which the bits of a byte go out on the data line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    /// Bit 0 first
    LsbFirst,
    /// Bit 7 first
    MsbFirst,
}

/// Clock one byte in from the register cascade
///
/// For each bit `i` in 0..8: clock low, wait `settle_us` for the register
/// to present the bit, sample it into bit `i`, clock high. The register
/// sends its highest stage first, so that stage ends up in bit 0.
pub fn shift_in<I, O, D>(data: &mut I, clock: &mut O, delay: &mut D, settle_us: u32) -> u8
where
    I: InputPin,
    O: OutputPin,
    D: DelayUs,
{
    let mut value = 0u8;
    for bit in 0..8 {
        clock.set_low();
        delay.delay_us(settle_us);
        if data.is_high() {
            value |= 1 << bit;
        }
        clock.set_high();
    }
    value
}

/// Clock one byte out to the register chain
///
/// Data is set up before each rising clock edge.
pub fn shift_out<O: OutputPin>(data: &mut O, clock: &mut O, order: BitOrder, value: u8) {
    for i in 0..8 {
        let bit = match order {
            BitOrder::LsbFirst => i,
            BitOrder::MsbFirst => 7 - i,
        };
        data.set_state(value >> bit & 1 != 0);
        clock.set_high();
        clock.set_low();
    }
}
