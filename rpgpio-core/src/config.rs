//! Driver configuration
//!
//! The numbering scheme and warning switch are process-wide driver
//! settings. The owning process applies them once with [`init`] before
//! any handle claims a pin.

use rpgpio_hal::{DriverError, GpioDriver, NumberingScheme};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Process-wide driver settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriverConfig {
    /// How pin numbers are handed to the driver
    pub numbering: NumberingScheme,
    /// Let the driver print warnings (e.g. pin left claimed by a previous run)
    pub warnings: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            numbering: NumberingScheme::Bcm,
            warnings: false,
        }
    }
}

/// Apply the driver configuration
///
/// Call once, from the process that owns the driver.
pub fn init<D: GpioDriver>(driver: &D, config: &DriverConfig) -> Result<(), DriverError> {
    driver.set_mode(config.numbering)?;
    driver.set_warnings(config.warnings);

    #[cfg(feature = "defmt")]
    defmt::info!(
        "GPIO driver initialized: {} numbering, warnings {}",
        config.numbering,
        config.warnings
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpgpio_hal_sim::{SimCall, SimDriver};

    #[test]
    fn test_default_config() {
        let config = DriverConfig::default();
        assert_eq!(config.numbering, NumberingScheme::Bcm);
        assert!(!config.warnings);
    }

    #[test]
    fn test_init_applies_config_once() {
        let sim = SimDriver::new();
        init(&sim, &DriverConfig::default()).unwrap();

        assert_eq!(sim.mode(), NumberingScheme::Bcm);
        assert!(!sim.warnings());
        assert_eq!(
            sim.calls(),
            [
                SimCall::SetMode(NumberingScheme::Bcm),
                SimCall::SetWarnings(false)
            ]
        );
    }

    #[test]
    fn test_init_board_numbering() {
        let sim = SimDriver::new();
        let config = DriverConfig {
            numbering: NumberingScheme::Board,
            warnings: true,
        };
        init(&sim, &config).unwrap();
        assert_eq!(sim.mode(), NumberingScheme::Board);
        assert!(sim.warnings());
    }
}
