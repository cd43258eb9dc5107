//! rpgpio Hardware Abstraction Layer
//!
//! This crate defines the driver collaborator that every GPIO backend
//! implements. Application code (`rpgpio-core`, the CLI) only talks to
//! these traits, so the same pin handling runs against real hardware or
//! the simulator.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (rpgpio-core, rpgpio-cli)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  rpgpio-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  rpgpio-hal-  │       │  rpgpio-hal-  │
//! │     rppal     │       │      sim      │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`driver::GpioDriver`] - Pin claims, digital I/O, PWM session creation
//! - [`pwm::PwmChannel`] - A live PWM session on one pin

#![no_std]
#![deny(unsafe_code)]

pub mod driver;
pub mod error;
pub mod gpio;
pub mod pwm;

// Re-export key items at crate root for convenience
pub use driver::GpioDriver;
pub use error::DriverError;
pub use gpio::{Direction, Level, NumberingScheme, PullMode};
pub use pwm::PwmChannel;
