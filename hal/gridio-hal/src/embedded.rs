//! Adapters for `embedded-hal` 1.0 implementations
//!
//! Chip HALs built on `embedded-hal` can be plugged into the panel through
//! these thin wrappers. Only infallible pins are accepted, since the panel
//! treats every pin operation as total.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital;

use crate::gpio::{InputPin, OutputPin};
use crate::time::DelayUs;

/// Wraps an `embedded-hal` output pin
#[derive(Debug)]
pub struct EhOutput<P>(pub P);

/// Wraps an `embedded-hal` input pin
#[derive(Debug)]
pub struct EhInput<P>(pub P);

/// Wraps an `embedded-hal` delay provider
#[derive(Debug)]
pub struct EhDelay<D>(pub D);

impl<P> EhOutput<P> {
    /// Return the wrapped pin
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P> EhInput<P> {
    /// Return the wrapped pin
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<D> EhDelay<D> {
    /// Return the wrapped delay provider
    pub fn into_inner(self) -> D {
        self.0
    }
}

impl<P> OutputPin for EhOutput<P>
where
    P: digital::OutputPin<Error = Infallible>,
{
    fn set_high(&mut self) {
        self.0.set_high().unwrap_or_else(|never| match never {})
    }

    fn set_low(&mut self) {
        self.0.set_low().unwrap_or_else(|never| match never {})
    }
}

impl<P> InputPin for EhInput<P>
where
    P: digital::InputPin<Error = Infallible>,
{
    fn is_high(&mut self) -> bool {
        self.0.is_high().unwrap_or_else(|never| match never {})
    }
}

impl<D: DelayNs> DelayUs for EhDelay<D> {
    fn delay_us(&mut self, us: u32) {
        self.0.delay_us(us)
    }
}
