//! Time sources
//!
//! The panel only needs a free-running millisecond counter and a short
//! blocking delay for shift-register timing.

/// Free-running millisecond clock
///
/// The counter is allowed to wrap; consumers compare timestamps with
/// wrapping subtraction.
pub trait Clock {
    /// Milliseconds elapsed since an arbitrary epoch (usually boot)
    fn now_ms(&self) -> u32;
}

/// Blocking microsecond delay
pub trait DelayUs {
    /// Busy-wait for at least `us` microseconds
    fn delay_us(&mut self, us: u32);
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

impl<T: DelayUs + ?Sized> DelayUs for &mut T {
    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }
}
