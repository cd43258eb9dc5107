//! Per-pin GPIO handle
//!
//! A [`GpioHandle`] binds one pin number to a driver and forwards
//! direction, digital I/O and PWM requests to it. The driver owns all pin
//! state; the handle only remembers whether it holds a claim and which
//! PWM session it owns.
//!
//! # PWM sub-state
//!
//! ```text
//!            start_pwm
//!   Idle ─────────────────▶ Active ──┐
//!    ▲                        │      │ start_pwm
//!    └── stop_pwm / release ──┘ ◀────┘ (stop old, start new)
//! ```
//!
//! At most one session is active per handle.

use rpgpio_hal::{
    Direction, DriverError, GpioDriver, Level, NumberingScheme, PullMode, PwmChannel,
};

use crate::pins::PinHeaderEntry;

/// Live binding between a pin and the GPIO driver
pub struct GpioHandle<'d, D: GpioDriver> {
    driver: &'d D,
    /// Number the driver addresses this pin by: the BCM id under
    /// [`NumberingScheme::Bcm`], the header position under
    /// [`NumberingScheme::Board`]
    address: u8,
    /// This handle holds the driver claim
    claimed: bool,
    pwm: Option<D::Pwm>,
}

impl<'d, D: GpioDriver> GpioHandle<'d, D> {
    /// Bind a handle to a driver pin number
    ///
    /// `address` is in the driver's active numbering scheme. Does not
    /// touch hardware.
    pub fn new(driver: &'d D, address: u8) -> Self {
        Self {
            driver,
            address,
            claimed: false,
            pwm: None,
        }
    }

    /// Bind a handle to a table entry under the driver's numbering scheme
    pub fn for_entry(driver: &'d D, entry: &PinHeaderEntry, scheme: NumberingScheme) -> Self {
        Self::new(driver, entry.address(scheme))
    }

    /// Pin number handed to the driver
    ///
    /// Depends on the numbering scheme the handle was built for; see
    /// [`PinHeaderEntry::address`].
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Check if this handle currently holds the pin claim
    pub fn is_claimed(&self) -> bool {
        self.claimed
    }

    /// Check if a PWM session is active
    pub fn pwm_active(&self) -> bool {
        self.pwm.is_some()
    }

    /// Check whether someone else already holds the pin
    ///
    /// Makes a real input claim, since the driver is the only authority
    /// on pin ownership. A rejected claim reports busy. A successful
    /// claim is released again, so the pin briefly becomes an input.
    /// A handle that holds the claim itself reports busy without
    /// touching the driver.
    ///
    /// Errors while releasing the probe claim are returned.
    pub fn probe_busy(&mut self) -> Result<bool, DriverError> {
        if self.claimed {
            return Ok(true);
        }

        match self.configure(Direction::Input, PullMode::Off) {
            Ok(()) => {
                self.release()?;
                Ok(false)
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("GPIO{} busy: {}", self.address, _e);
                Ok(true)
            }
        }
    }

    /// Sample the pin level
    pub fn read(&self) -> Result<Level, DriverError> {
        self.driver.read_pin(self.address)
    }

    /// Drive the pin; any non-zero value is high
    pub fn write(&self, level: impl Into<Level>) -> Result<(), DriverError> {
        self.driver.write_pin(self.address, level.into())
    }

    /// Claim the pin in the given direction
    ///
    /// `pull` applies to inputs only. If this handle already holds the
    /// claim it is released first (stopping any PWM session) and taken
    /// again in the new direction.
    pub fn configure(&mut self, direction: Direction, pull: PullMode) -> Result<(), DriverError> {
        if self.claimed {
            self.release()?;
        }

        let pull = match direction {
            Direction::Input => pull,
            Direction::Output => PullMode::Off,
        };
        self.driver.configure_pin(self.address, direction, pull)?;
        self.claimed = true;

        #[cfg(feature = "defmt")]
        defmt::debug!("GPIO{} configured as {}", self.address, direction);

        Ok(())
    }

    /// Stop any PWM session and give the pin back to the driver
    ///
    /// Calling this on a released handle does nothing.
    pub fn release(&mut self) -> Result<(), DriverError> {
        self.stop_pwm()?;

        if self.claimed {
            self.driver.release_pin(self.address)?;
            self.claimed = false;
        }
        Ok(())
    }

    /// Start PWM at 0 % duty, replacing any active session
    pub fn start_pwm(&mut self, frequency_hz: f32) -> Result<(), DriverError> {
        self.start_pwm_with_duty(frequency_hz, 0.0)
    }

    /// Start PWM at the given duty cycle, replacing any active session
    ///
    /// The previous session is stopped before the new one is created.
    pub fn start_pwm_with_duty(
        &mut self,
        frequency_hz: f32,
        duty_percent: f32,
    ) -> Result<(), DriverError> {
        self.stop_pwm()?;

        let session = self.driver.create_pwm(self.address, frequency_hz)?;
        // Owned before starting, so a failed start is still cleaned up
        // by stop_pwm/release
        let pwm = self.pwm.insert(session);
        pwm.start(duty_percent)?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "GPIO{} PWM started at {} Hz",
            self.address,
            frequency_hz
        );

        Ok(())
    }

    /// Change the duty cycle (0-100 %) of the active session
    ///
    /// Does nothing when PWM is idle.
    pub fn set_duty_cycle(&mut self, duty_percent: f32) -> Result<(), DriverError> {
        match self.pwm.as_mut() {
            Some(pwm) => pwm.change_duty_cycle(duty_percent),
            None => Ok(()),
        }
    }

    /// Change the frequency of the active session
    ///
    /// Does nothing when PWM is idle.
    pub fn set_frequency(&mut self, frequency_hz: f32) -> Result<(), DriverError> {
        match self.pwm.as_mut() {
            Some(pwm) => pwm.change_frequency(frequency_hz),
            None => Ok(()),
        }
    }

    /// Stop and discard the active session, if any
    pub fn stop_pwm(&mut self) -> Result<(), DriverError> {
        match self.pwm.take() {
            Some(mut pwm) => pwm.stop(),
            None => Ok(()),
        }
    }
}
