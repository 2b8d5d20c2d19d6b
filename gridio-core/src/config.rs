//! Panel configuration
//!
//! Every field has a default matching the reference board, so an empty
//! TOML document is a valid configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::buttons::{DebounceGate, DEFAULT_DEBOUNCE_MS};
use crate::pots::{AnalogRange, PotFilter, ANALOG_RANGE_MAX, ANALOG_RANGE_MIN, DEFAULT_QUANTIZE_BITS};

/// Default settle time between shift-in clock edges
pub const DEFAULT_SHIFT_SETTLE_US: u32 = 2;

/// Largest quantization that still leaves two distinct pot levels
pub const MAX_QUANTIZE_BITS: u8 = 9;

/// Configuration error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// analog_min must be below analog_max, and analog_max at most 1023
    InvalidAnalogRange,
    /// pot_quantize_bits above MAX_QUANTIZE_BITS
    InvalidQuantizeBits,
    /// debounce_ms must be non-zero
    InvalidDebounce,
    /// TOML parsing failed
    Parse,
}

/// Tunable panel parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Minimum interval between accepted button scans
    pub debounce_ms: u32,
    /// Delay after each clock-low edge while shifting buttons in
    pub shift_settle_us: u32,
    /// Raw pot reading mapped to 0
    pub analog_min: u16,
    /// Raw pot reading mapped to 1023
    pub analog_max: u16,
    /// Low bits ignored when deciding whether a pot moved
    pub pot_quantize_bits: u8,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            shift_settle_us: DEFAULT_SHIFT_SETTLE_US,
            analog_min: ANALOG_RANGE_MIN,
            analog_max: ANALOG_RANGE_MAX,
            pot_quantize_bits: DEFAULT_QUANTIZE_BITS,
        }
    }
}

impl GridConfig {
    /// Check field ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.debounce_ms == 0 {
            return Err(ConfigError::InvalidDebounce);
        }
        if self.pot_quantize_bits > MAX_QUANTIZE_BITS {
            return Err(ConfigError::InvalidQuantizeBits);
        }
        self.analog_range()?;
        Ok(())
    }

    /// Pot clamp/rescale band
    pub fn analog_range(&self) -> Result<AnalogRange, ConfigError> {
        AnalogRange::new(self.analog_min, self.analog_max).ok_or(ConfigError::InvalidAnalogRange)
    }

    /// Fresh debounce gate for this configuration
    pub fn debounce_gate(&self) -> DebounceGate {
        DebounceGate::new(self.debounce_ms)
    }

    /// Fresh pot change filter for this configuration
    pub fn pot_filter(&self) -> PotFilter {
        PotFilter::new(self.pot_quantize_bits)
    }

    /// Parse and validate a TOML document
    #[cfg(feature = "toml")]
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|_e| {
            #[cfg(feature = "defmt")]
            defmt::warn!("grid config parse failed");
            ConfigError::Parse
        })?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GridConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.debounce_ms, 10);
        assert_eq!(config.analog_range(), Ok(AnalogRange::default()));
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let config = GridConfig {
            debounce_ms: 0,
            ..GridConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidDebounce));

        let config = GridConfig {
            pot_quantize_bits: 10,
            ..GridConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidQuantizeBits));

        let config = GridConfig {
            analog_min: 900,
            analog_max: 100,
            ..GridConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidAnalogRange));

        let config = GridConfig {
            analog_max: 2000,
            ..GridConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidAnalogRange));
    }

    #[test]
    fn test_helpers_follow_fields() {
        let config = GridConfig {
            debounce_ms: 25,
            pot_quantize_bits: 4,
            ..GridConfig::default()
        };
        assert_eq!(config.debounce_gate().interval_ms(), 25);
        assert_eq!(config.pot_filter().quantize_bits(), 4);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml_fills_defaults() {
        let config = GridConfig::from_toml("debounce_ms = 20\nanalog_max = 1010\n").unwrap();
        assert_eq!(config.debounce_ms, 20);
        assert_eq!(config.analog_max, 1010);
        assert_eq!(config.analog_min, ANALOG_RANGE_MIN);
        assert_eq!(config.shift_settle_us, DEFAULT_SHIFT_SETTLE_US);

        assert_eq!(GridConfig::from_toml(""), Ok(GridConfig::default()));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml_errors() {
        assert_eq!(GridConfig::from_toml("debounce_ms = \"fast\""), Err(ConfigError::Parse));
        assert_eq!(GridConfig::from_toml("debounce_ms = 0"), Err(ConfigError::InvalidDebounce));
    }
}
