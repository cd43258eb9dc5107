//! Error types

use core::fmt;

use rpgpio_hal::DriverError;

/// Pin table lookup miss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NotFoundError {
    /// No entry has this logical (BCM) id
    LogicalId(u32),
    /// No entry sits at this header position
    PhysicalPosition(u32),
}

impl fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundError::LogicalId(id) => write!(f, "no header pin maps to GPIO{}", id),
            NotFoundError::PhysicalPosition(pos) => {
                write!(f, "header position {} has no GPIO assignment", pos)
            }
        }
    }
}

impl core::error::Error for NotFoundError {}

/// Any failure from this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Pin table lookup failed
    NotFound(NotFoundError),
    /// The GPIO driver rejected an operation
    Driver(DriverError),
}

impl From<NotFoundError> for Error {
    fn from(e: NotFoundError) -> Self {
        Error::NotFound(e)
    }
}

impl From<DriverError> for Error {
    fn from(e: DriverError) -> Self {
        Error::Driver(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(e) => e.fmt(f),
            Error::Driver(e) => e.fmt(f),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Error::NotFound(e) => Some(e),
            Error::Driver(e) => Some(e),
        }
    }
}
