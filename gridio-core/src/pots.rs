//! Potentiometer scaling and change filter
//!
//! Raw samples are clamped to the usable travel of the pot, stretched back
//! to the full 0-1023 range, then compared at reduced resolution so sensor
//! jitter in the low bits does not produce events.

use crate::geometry::{check_pot, MUX_SELECT_BITS, POT_COUNT};

/// Lowest trusted raw reading; the ends of pot travel are unreliable
pub const ANALOG_RANGE_MIN: u16 = 25;

/// Highest trusted raw reading
pub const ANALOG_RANGE_MAX: u16 = 1000;

/// Top of the rescaled output range
pub const SCALED_MAX: u16 = 1023;

/// Default number of low bits ignored when comparing readings
pub const DEFAULT_QUANTIZE_BITS: u8 = 3;

/// Raw sample band mapped onto 0..=SCALED_MAX
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogRange {
    min: u16,
    max: u16,
}

impl Default for AnalogRange {
    fn default() -> Self {
        Self {
            min: ANALOG_RANGE_MIN,
            max: ANALOG_RANGE_MAX,
        }
    }
}

impl AnalogRange {
    /// Create a range, or None unless `min < max <= SCALED_MAX`
    pub const fn new(min: u16, max: u16) -> Option<Self> {
        if min < max && max <= SCALED_MAX {
            Some(Self { min, max })
        } else {
            None
        }
    }

    /// Lower bound
    pub fn min(&self) -> u16 {
        self.min
    }

    /// Upper bound
    pub fn max(&self) -> u16 {
        self.max
    }

    /// Pin a raw sample to the range
    pub fn clamp(&self, raw: u16) -> u16 {
        raw.clamp(self.min, self.max)
    }

    /// Clamp and linearly rescale a raw sample to 0..=SCALED_MAX
    ///
    /// Integer arithmetic, truncating toward zero.
    pub fn scale(&self, raw: u16) -> u16 {
        let offset = (self.clamp(raw) - self.min) as u32;
        let span = (self.max - self.min) as u32;
        (offset * SCALED_MAX as u32 / span) as u16
    }
}

/// Levels for the multiplexer select lines addressing `channel`
///
/// Index 0 is the least significant select bit.
pub fn select_levels(channel: u8) -> [bool; MUX_SELECT_BITS] {
    core::array::from_fn(|bit| channel >> bit & 1 != 0)
}

/// Last accepted quantized level of every pot
#[derive(Debug, Clone)]
pub struct PotFilter {
    levels: [u16; POT_COUNT],
    quantize_bits: u8,
}

impl Default for PotFilter {
    fn default() -> Self {
        Self::new(DEFAULT_QUANTIZE_BITS)
    }
}

impl PotFilter {
    /// Create a filter with every level at 0
    pub const fn new(quantize_bits: u8) -> Self {
        Self {
            levels: [0; POT_COUNT],
            quantize_bits,
        }
    }

    /// Reduce a rescaled reading to its comparison level
    pub fn quantize(&self, value: u16) -> u16 {
        value >> self.quantize_bits
    }

    /// Offer a rescaled reading for `pot`
    ///
    /// Returns true, and stores the new level, if its quantized level
    /// differs from the stored one.
    pub fn accept(&mut self, pot: u8, value: u16) -> bool {
        check_pot(pot);
        let level = self.quantize(value);
        let slot = &mut self.levels[pot as usize];
        if level == *slot {
            return false;
        }
        *slot = level;
        true
    }

    /// Last accepted quantized level for `pot`
    pub fn level(&self, pot: u8) -> u16 {
        check_pot(pot);
        self.levels[pot as usize]
    }

    /// Configured quantization
    pub fn quantize_bits(&self) -> u8 {
        self.quantize_bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_scale_endpoints() {
        let range = AnalogRange::default();
        assert_eq!(range.scale(25), 0);
        assert_eq!(range.scale(1000), 1023);
        // (512 - 25) * 1023 / 975 = 510.97 -> 510
        assert_eq!(range.scale(512), 510);
    }

    #[test]
    fn test_out_of_band_samples_clamp() {
        let range = AnalogRange::default();
        assert_eq!(range.scale(10), range.scale(25));
        assert_eq!(range.scale(0), 0);
        assert_eq!(range.scale(1500), range.scale(1000));
        assert_eq!(range.scale(1023), 1023);
    }

    #[test]
    fn test_range_validation() {
        assert!(AnalogRange::new(25, 1000).is_some());
        assert!(AnalogRange::new(1000, 25).is_none());
        assert!(AnalogRange::new(10, 10).is_none());
        assert!(AnalogRange::new(0, 1024).is_none());
    }

    #[test]
    fn test_select_levels() {
        assert_eq!(select_levels(0), [false, false, false]);
        assert_eq!(select_levels(1), [true, false, false]);
        assert_eq!(select_levels(5), [true, false, true]);
        assert_eq!(select_levels(6), [false, true, true]);
    }

    #[test]
    fn test_filter_accepts_only_level_changes() {
        let mut filter = PotFilter::new(3);

        // 0..=7 share level 0, the initial stored level
        assert!(!filter.accept(0, 7));
        assert!(filter.accept(0, 8));
        assert_eq!(filter.level(0), 1);

        // Jitter within the same level is ignored
        assert!(!filter.accept(0, 15));
        assert!(!filter.accept(0, 9));

        assert!(filter.accept(0, 1023));
        assert_eq!(filter.level(0), 127);

        // Channels are independent
        assert_eq!(filter.level(1), 0);
    }

    proptest! {
        #[test]
        fn prop_scale_stays_in_range(raw in any::<u16>()) {
            let scaled = AnalogRange::default().scale(raw);
            prop_assert!(scaled <= SCALED_MAX);
        }

        #[test]
        fn prop_scale_is_monotonic(a in 0u16..1100, b in 0u16..1100) {
            let range = AnalogRange::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(range.scale(lo) <= range.scale(hi));
        }

        #[test]
        fn prop_repeat_reading_never_fires_twice(pot in 0u8..POT_COUNT as u8, value in 0u16..=SCALED_MAX) {
            let mut filter = PotFilter::default();
            filter.accept(pot, value);
            prop_assert!(!filter.accept(pot, value));
        }
    }
}
