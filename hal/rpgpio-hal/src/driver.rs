//! GPIO driver abstraction
//!
//! One driver instance stands for the whole GPIO controller. It is a
//! process-wide resource shared by every pin handle, so all methods take
//! `&self`; backends keep their claim bookkeeping behind interior
//! mutability. The driver is the only authority on which pins are
//! claimed and in which direction.

use crate::error::DriverError;
use crate::gpio::{Direction, Level, NumberingScheme, PullMode};
use crate::pwm::PwmChannel;

/// GPIO controller
pub trait GpioDriver {
    /// PWM session type produced by [`GpioDriver::create_pwm`]
    type Pwm: PwmChannel;

    /// Select how pin numbers are interpreted
    ///
    /// Process-wide; call once before claiming any pin.
    fn set_mode(&self, scheme: NumberingScheme) -> Result<(), DriverError>;

    /// Enable or disable driver warnings (e.g. pin already in use by
    /// a previous run)
    fn set_warnings(&self, enabled: bool);

    /// Claim a pin in the given direction
    ///
    /// `pull` only applies to inputs. Fails with
    /// [`DriverError::PinBusy`] if the pin is already claimed.
    fn configure_pin(&self, pin: u8, direction: Direction, pull: PullMode)
        -> Result<(), DriverError>;

    /// Sample the current level of a claimed pin
    fn read_pin(&self, pin: u8) -> Result<Level, DriverError>;

    /// Drive an output pin
    fn write_pin(&self, pin: u8, level: Level) -> Result<(), DriverError>;

    /// Return a pin to the unclaimed pool
    ///
    /// Releasing a pin that is not claimed is not an error.
    fn release_pin(&self, pin: u8) -> Result<(), DriverError>;

    /// Create a PWM session on an output pin
    ///
    /// The session is created stopped; call [`PwmChannel::start`].
    fn create_pwm(&self, pin: u8, frequency_hz: f32) -> Result<Self::Pwm, DriverError>;
}

/// Check a frequency before handing it to hardware
pub fn check_frequency(frequency_hz: f32) -> Result<(), DriverError> {
    if frequency_hz.is_finite() && frequency_hz > 0.0 {
        Ok(())
    } else {
        Err(DriverError::InvalidFrequency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_frequency() {
        assert!(check_frequency(1000.0).is_ok());
        assert!(check_frequency(0.5).is_ok());
        assert_eq!(check_frequency(0.0), Err(DriverError::InvalidFrequency));
        assert_eq!(check_frequency(-50.0), Err(DriverError::InvalidFrequency));
        assert_eq!(check_frequency(f32::NAN), Err(DriverError::InvalidFrequency));
    }
}
