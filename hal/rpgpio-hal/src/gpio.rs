//! GPIO pin value types
//!
//! Plain data shared by every driver backend.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// Pin is sampled
    Input,
    /// Pin is driven
    Output,
}

/// Resistor bias applied to an input pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PullMode {
    /// Floating input
    #[default]
    Off,
    /// Idle level high
    Up,
    /// Idle level low
    Down,
}

/// Digital logic level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Level {
    /// Logic 0
    #[default]
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Any non-zero value is high
    pub fn from_int(value: i32) -> Self {
        if value == 0 {
            Level::Low
        } else {
            Level::High
        }
    }

    /// 0 for low, 1 for high
    pub fn as_int(self) -> i32 {
        match self {
            Level::Low => 0,
            Level::High => 1,
        }
    }

    /// Check if the level is high
    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

impl From<i32> for Level {
    fn from(value: i32) -> Self {
        Level::from_int(value)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// How pin numbers passed to the driver are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NumberingScheme {
    /// Broadcom SoC GPIO line numbers
    #[default]
    Bcm,
    /// Physical header positions (1-40)
    Board,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_int() {
        assert_eq!(Level::from_int(0), Level::Low);
        assert_eq!(Level::from_int(1), Level::High);
        assert_eq!(Level::from_int(-3), Level::High);
        assert_eq!(Level::from_int(255), Level::High);
    }

    #[test]
    fn test_level_as_int() {
        assert_eq!(Level::Low.as_int(), 0);
        assert_eq!(Level::High.as_int(), 1);
        assert_eq!(Level::from(true), Level::High);
        assert!(!Level::from(false).is_high());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(PullMode::default(), PullMode::Off);
        assert_eq!(NumberingScheme::default(), NumberingScheme::Bcm);
    }
}
