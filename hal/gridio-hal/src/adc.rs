//! Analog input abstraction

/// Largest value a 10-bit conversion can produce
pub const ADC_MAX_10BIT: u16 = 1023;

/// Single analog input channel
///
/// Implementations return a 10-bit sample (0..=1023). HALs with wider
/// converters are expected to scale down before returning.
pub trait AnalogInput {
    /// Take one sample from the input
    fn sample(&mut self) -> u16;
}

impl<T: AnalogInput + ?Sized> AnalogInput for &mut T {
    fn sample(&mut self) -> u16 {
        (**self).sample()
    }
}
