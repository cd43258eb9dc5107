//! Raspberry Pi GPIO driver
//!
//! Implements the [`rpgpio_hal`] traits on top of [`rppal`]. Pins are
//! addressed by BCM number only; rppal has no physical-header mode, so
//! [`NumberingScheme::Board`] is rejected.
//!
//! rppal refuses to hand out a pin twice within one process. Claims made
//! by other processes are not visible to it, so a busy probe through
//! this driver only detects contention inside the current process.
//!
//! PWM uses rppal's software PWM, which runs on a background thread per
//! pin.

#![deny(unsafe_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use log::{debug, error, warn};
use rppal::gpio::{self, Gpio, InputPin, OutputPin};
use rpgpio_hal::driver::check_frequency;
use rpgpio_hal::{
    Direction, DriverError, GpioDriver, Level, NumberingScheme, PullMode, PwmChannel,
};

enum Claim {
    Input(InputPin),
    Output(OutputPin),
}

#[derive(Default)]
struct Claims {
    pins: HashMap<u8, Claim>,
    /// Pins with a live PWM session
    pwm: HashSet<u8>,
}

impl Claims {
    fn output(&mut self, pin: u8) -> Result<&mut OutputPin, DriverError> {
        match self.pins.get_mut(&pin) {
            Some(Claim::Output(out)) => Ok(out),
            Some(Claim::Input(_)) => Err(DriverError::WrongDirection(pin)),
            None => Err(DriverError::NotConfigured(pin)),
        }
    }
}

fn driver_error(pin: u8, err: gpio::Error) -> DriverError {
    match err {
        gpio::Error::PinUsed(_) | gpio::Error::PinNotAvailable(_) => DriverError::PinBusy(pin),
        other => {
            error!("GPIO{}: {}", pin, other);
            DriverError::Unavailable
        }
    }
}

fn to_rppal(level: Level) -> gpio::Level {
    match level {
        Level::Low => gpio::Level::Low,
        Level::High => gpio::Level::High,
    }
}

fn from_rppal(level: gpio::Level) -> Level {
    match level {
        gpio::Level::Low => Level::Low,
        gpio::Level::High => Level::High,
    }
}

/// GPIO controller backed by rppal
pub struct RppalDriver {
    gpio: Gpio,
    claims: Rc<RefCell<Claims>>,
    warnings: Cell<bool>,
}

impl RppalDriver {
    /// Open the GPIO peripheral
    ///
    /// Fails with [`DriverError::Unavailable`] when not running on a
    /// supported Raspberry Pi or without access to `/dev/gpiomem`.
    pub fn new() -> Result<Self, DriverError> {
        let gpio = Gpio::new().map_err(|e| {
            error!("Failed to open GPIO peripheral: {}", e);
            DriverError::Unavailable
        })?;

        Ok(Self {
            gpio,
            claims: Rc::new(RefCell::new(Claims::default())),
            warnings: Cell::new(true),
        })
    }
}

impl GpioDriver for RppalDriver {
    type Pwm = RppalPwm;

    fn set_mode(&self, scheme: NumberingScheme) -> Result<(), DriverError> {
        match scheme {
            NumberingScheme::Bcm => Ok(()),
            NumberingScheme::Board => Err(DriverError::UnsupportedNumbering),
        }
    }

    fn set_warnings(&self, enabled: bool) {
        self.warnings.set(enabled);
    }

    fn configure_pin(
        &self,
        pin: u8,
        direction: Direction,
        pull: PullMode,
    ) -> Result<(), DriverError> {
        let mut claims = self.claims.borrow_mut();
        if claims.pins.contains_key(&pin) {
            if self.warnings.get() {
                warn!("GPIO{} is already claimed", pin);
            }
            return Err(DriverError::PinBusy(pin));
        }

        let raw = self.gpio.get(pin).map_err(|e| driver_error(pin, e))?;
        let claim = match (direction, pull) {
            (Direction::Output, _) => Claim::Output(raw.into_output()),
            (Direction::Input, PullMode::Off) => Claim::Input(raw.into_input()),
            (Direction::Input, PullMode::Up) => Claim::Input(raw.into_input_pullup()),
            (Direction::Input, PullMode::Down) => Claim::Input(raw.into_input_pulldown()),
        };
        claims.pins.insert(pin, claim);
        debug!("GPIO{} claimed as {:?}", pin, direction);
        Ok(())
    }

    fn read_pin(&self, pin: u8) -> Result<Level, DriverError> {
        let claims = self.claims.borrow();
        match claims.pins.get(&pin) {
            Some(Claim::Input(input)) => Ok(from_rppal(input.read())),
            Some(Claim::Output(out)) => Ok(Level::from(out.is_set_high())),
            None => Err(DriverError::NotConfigured(pin)),
        }
    }

    fn write_pin(&self, pin: u8, level: Level) -> Result<(), DriverError> {
        let mut claims = self.claims.borrow_mut();
        claims.output(pin)?.write(to_rppal(level));
        Ok(())
    }

    fn release_pin(&self, pin: u8) -> Result<(), DriverError> {
        let mut claims = self.claims.borrow_mut();
        claims.pwm.remove(&pin);
        // Dropping the rppal pin restores its previous mode
        if claims.pins.remove(&pin).is_some() {
            debug!("GPIO{} released", pin);
        }
        Ok(())
    }

    fn create_pwm(&self, pin: u8, frequency_hz: f32) -> Result<RppalPwm, DriverError> {
        check_frequency(frequency_hz)?;

        let mut claims = self.claims.borrow_mut();
        claims.output(pin)?;
        if !claims.pwm.insert(pin) {
            return Err(DriverError::PwmInUse(pin));
        }

        Ok(RppalPwm {
            claims: self.claims.clone(),
            pin,
            frequency_hz,
            duty_percent: 0.0,
            running: false,
        })
    }
}

/// Software PWM session on one rppal output pin
pub struct RppalPwm {
    claims: Rc<RefCell<Claims>>,
    pin: u8,
    frequency_hz: f32,
    duty_percent: f32,
    running: bool,
}

impl RppalPwm {
    fn apply(&mut self) -> Result<(), DriverError> {
        let mut claims = self.claims.borrow_mut();
        if !claims.pwm.contains(&self.pin) {
            return Err(DriverError::PwmNotStarted);
        }
        let duty = (f64::from(self.duty_percent) / 100.0).clamp(0.0, 1.0);
        claims
            .output(self.pin)?
            .set_pwm_frequency(f64::from(self.frequency_hz), duty)
            .map_err(|e| driver_error(self.pin, e))
    }
}

impl PwmChannel for RppalPwm {
    fn start(&mut self, duty_percent: f32) -> Result<(), DriverError> {
        self.duty_percent = duty_percent;
        self.running = true;
        self.apply()
    }

    fn change_frequency(&mut self, frequency_hz: f32) -> Result<(), DriverError> {
        check_frequency(frequency_hz)?;
        self.frequency_hz = frequency_hz;
        if self.running {
            self.apply()?;
        }
        Ok(())
    }

    fn change_duty_cycle(&mut self, duty_percent: f32) -> Result<(), DriverError> {
        self.duty_percent = duty_percent;
        if self.running {
            self.apply()?;
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), DriverError> {
        self.running = false;
        let mut claims = self.claims.borrow_mut();
        if !claims.pwm.remove(&self.pin) {
            // Pin was released underneath the session
            return Ok(());
        }
        match claims.output(self.pin) {
            Ok(out) => out.clear_pwm().map_err(|e| driver_error(self.pin, e)),
            Err(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(from_rppal(to_rppal(Level::High)), Level::High);
        assert_eq!(from_rppal(to_rppal(Level::Low)), Level::Low);
    }

    #[test]
    fn test_pin_used_is_busy() {
        assert_eq!(driver_error(17, gpio::Error::PinUsed(17)), DriverError::PinBusy(17));
        assert_eq!(
            driver_error(4, gpio::Error::PinNotAvailable(4)),
            DriverError::PinBusy(4)
        );
    }
}
