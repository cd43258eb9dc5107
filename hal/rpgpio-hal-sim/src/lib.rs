//! Simulated GPIO driver
//!
//! Implements the [`rpgpio_hal`] traits without hardware. Claims follow
//! the same rules as a real controller (one claim per pin, PWM only on
//! outputs), and every driver call is appended to a call log so tests
//! can assert on exactly what reached the driver.
//!
//! Pins held by "someone else" are injected with
//! [`SimDriver::claim_externally`]; input levels with
//! [`SimDriver::set_input_level`].

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

mod bus;
mod driver;
mod pwm;

pub use bus::{SimCall, SimPwmState, BCM_GPIO_COUNT, BOARD_GPIO_POSITIONS};
pub use driver::SimDriver;
pub use pwm::SimPwm;
