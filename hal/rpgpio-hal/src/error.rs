//! Driver error type

use core::fmt;

/// Failures surfaced by a GPIO driver backend
///
/// Pin numbers are in whatever numbering scheme the driver was set to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// Pin is already claimed by another consumer
    PinBusy(u8),
    /// Operation on a pin that was never configured
    NotConfigured(u8),
    /// Operation needs the other direction (e.g. write on an input)
    WrongDirection(u8),
    /// Pin number does not exist in the active numbering scheme
    InvalidPin(u8),
    /// Frequency must be positive and finite
    InvalidFrequency,
    /// Duty cycle outside 0-100 %
    InvalidDutyCycle,
    /// A PWM session already exists on this pin
    PwmInUse(u8),
    /// Duty/frequency change on a session that was never started
    PwmNotStarted,
    /// Backend does not support the requested numbering scheme
    UnsupportedNumbering,
    /// Backend could not reach the GPIO hardware
    Unavailable,
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::PinBusy(pin) => write!(f, "GPIO{} is already in use", pin),
            DriverError::NotConfigured(pin) => write!(f, "GPIO{} is not configured", pin),
            DriverError::WrongDirection(pin) => {
                write!(f, "GPIO{} is configured in the other direction", pin)
            }
            DriverError::InvalidPin(pin) => write!(f, "no such pin: {}", pin),
            DriverError::InvalidFrequency => f.write_str("PWM frequency must be positive"),
            DriverError::InvalidDutyCycle => f.write_str("duty cycle must be 0-100 %"),
            DriverError::PwmInUse(pin) => {
                write!(f, "a PWM session already exists on GPIO{}", pin)
            }
            DriverError::PwmNotStarted => f.write_str("PWM session was not started"),
            DriverError::UnsupportedNumbering => {
                f.write_str("numbering scheme not supported by this driver")
            }
            DriverError::Unavailable => f.write_str("GPIO hardware unavailable"),
        }
    }
}

impl core::error::Error for DriverError {}
