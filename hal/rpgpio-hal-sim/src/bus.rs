//! Shared simulator state
//!
//! Tracks which pins are claimed, their direction and level, and the
//! active PWM session per pin.

use alloc::vec::Vec;
use heapless::{FnvIndexMap, FnvIndexSet};
use rpgpio_hal::{Direction, DriverError, Level, NumberingScheme, PullMode};

/// Number of GPIO lines routed to the 40-pin header (BCM 0-27)
pub const BCM_GPIO_COUNT: u8 = 28;

/// Header positions wired to a GPIO line; the rest are power and ground
pub const BOARD_GPIO_POSITIONS: [u8; 26] = [
    3, 5, 7, 8, 10, 11, 12, 13, 15, 16, 18, 19, 21, 22, 23, 24, 26, 29, 31, 32, 33, 35, 36, 37,
    38, 40,
];

/// One call that reached the simulated driver
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SimCall {
    SetMode(NumberingScheme),
    SetWarnings(bool),
    Configure {
        pin: u8,
        direction: Direction,
        pull: PullMode,
    },
    Read {
        pin: u8,
    },
    Write {
        pin: u8,
        level: Level,
    },
    Release {
        pin: u8,
    },
    CreatePwm {
        pin: u8,
        session: u32,
        frequency_hz: f32,
    },
    PwmStart {
        session: u32,
        duty_percent: f32,
    },
    PwmChangeFrequency {
        session: u32,
        frequency_hz: f32,
    },
    PwmChangeDutyCycle {
        session: u32,
        duty_percent: f32,
    },
    PwmStop {
        session: u32,
    },
}

/// Observable state of a PWM session
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SimPwmState {
    /// Session id, unique per driver
    pub session: u32,
    pub frequency_hz: f32,
    pub duty_percent: f32,
    /// True between `start` and `stop`
    pub running: bool,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct SimPin {
    pub direction: Direction,
    pub pull: PullMode,
    /// Last driven level (outputs only)
    pub level: Level,
    pub pwm: Option<SimPwmState>,
}

pub(crate) struct SimBus {
    pub mode: NumberingScheme,
    pub warnings: bool,
    /// Pins claimed through this driver
    pub pins: FnvIndexMap<u8, SimPin, 64>,
    /// Pins claimed by another consumer
    pub external: FnvIndexSet<u8, 64>,
    /// Injected input levels
    pub inputs: FnvIndexMap<u8, Level, 64>,
    pub next_session: u32,
    pub calls: Vec<SimCall>,
}

impl SimBus {
    pub fn new() -> Self {
        Self {
            mode: NumberingScheme::Bcm,
            warnings: true,
            pins: FnvIndexMap::new(),
            external: FnvIndexSet::new(),
            inputs: FnvIndexMap::new(),
            next_session: 1,
            calls: Vec::new(),
        }
    }

    pub fn record(&mut self, call: SimCall) {
        self.calls.push(call);
    }

    /// Reject pin numbers that do not exist in the active scheme
    pub fn check_pin(&self, pin: u8) -> Result<(), DriverError> {
        let valid = match self.mode {
            NumberingScheme::Bcm => pin < BCM_GPIO_COUNT,
            NumberingScheme::Board => BOARD_GPIO_POSITIONS.contains(&pin),
        };
        if valid {
            Ok(())
        } else {
            Err(DriverError::InvalidPin(pin))
        }
    }

    pub fn claimed(&self, pin: u8) -> Result<&SimPin, DriverError> {
        self.pins.get(&pin).ok_or(DriverError::NotConfigured(pin))
    }

    pub fn claimed_mut(&mut self, pin: u8) -> Result<&mut SimPin, DriverError> {
        self.pins.get_mut(&pin).ok_or(DriverError::NotConfigured(pin))
    }

    /// Duty cycles are percentages
    pub fn check_duty(duty_percent: f32) -> Result<(), DriverError> {
        if (0.0..=100.0).contains(&duty_percent) {
            Ok(())
        } else {
            Err(DriverError::InvalidDutyCycle)
        }
    }

    /// Find the pin currently owning a session
    pub fn session_mut(&mut self, session: u32) -> Result<&mut SimPwmState, DriverError> {
        self.pins
            .values_mut()
            .filter_map(|p| p.pwm.as_mut())
            .find(|s| s.session == session)
            .ok_or(DriverError::PwmNotStarted)
    }
}
