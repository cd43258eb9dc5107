//! PWM session abstraction

use crate::error::DriverError;

/// A driver-managed PWM signal on one pin
///
/// Duty cycles are percentages (0-100). Values are passed through to
/// the backend unvalidated.
pub trait PwmChannel {
    /// Begin output at the given duty cycle
    fn start(&mut self, duty_percent: f32) -> Result<(), DriverError>;

    /// Change the frequency of the running signal
    fn change_frequency(&mut self, frequency_hz: f32) -> Result<(), DriverError>;

    /// Change the duty cycle of the running signal
    fn change_duty_cycle(&mut self, duty_percent: f32) -> Result<(), DriverError>;

    /// Stop output
    ///
    /// The session must not be used again after this.
    fn stop(&mut self) -> Result<(), DriverError>;
}
