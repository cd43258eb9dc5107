//! Board-agnostic GPIO header logic
//!
//! This crate contains everything that does not depend on a specific
//! GPIO backend:
//!
//! - The physical-to-logical pin table of the 40-pin header
//! - Human-readable pin labels (plain and rich-text)
//! - Per-pin handles for direction, digital I/O and PWM
//! - Driver configuration and the one-time initialisation step
//!
//! Hardware effects go through the [`rpgpio_hal::GpioDriver`] trait.
//!
//! ```ignore
//! let driver = RppalDriver::new()?;
//! config::init(&driver, &DriverConfig::default())?;
//!
//! let table = PinTable::reference();
//! let mut led = table.handle_by_physical_position(&driver, 11, NumberingScheme::Bcm)?;
//! led.configure(Direction::Output, PullMode::Off)?;
//! led.write(1)?;
//! led.release()?;
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod handle;
pub mod label;
pub mod pins;

pub use config::DriverConfig;
pub use error::{Error, NotFoundError};
pub use handle::GpioHandle;
pub use label::{describe, describe_rich, Rich};
pub use pins::{PinHeaderEntry, PinTable, RPI_40PIN_HEADER};
