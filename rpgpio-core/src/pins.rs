//! 40-pin header table
//!
//! Maps physical header positions to the logical (BCM) GPIO numbers the
//! driver uses. Only positions with a GPIO assignment are listed; power
//! and ground pins are omitted.

use rpgpio_hal::{GpioDriver, NumberingScheme};

use crate::error::NotFoundError;
use crate::handle::GpioHandle;

/// Longest alternate function name an entry may carry
pub const MAX_ALTERNATE_LEN: usize = 16;

/// One physical pin on the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinHeaderEntry {
    physical_position: u8,
    logical_id: u8,
    alternate_function: Option<&'static str>,
}

impl PinHeaderEntry {
    /// Create a plain GPIO entry
    pub const fn new(physical_position: u8, logical_id: u8) -> Self {
        Self {
            physical_position,
            logical_id,
            alternate_function: None,
        }
    }

    /// Create an entry with a well-known secondary role (e.g. "SDA")
    ///
    /// # Panics
    /// If `alternate` is longer than [`MAX_ALTERNATE_LEN`]. In a `const`
    /// table this is a compile error.
    pub const fn with_alternate(
        physical_position: u8,
        logical_id: u8,
        alternate: &'static str,
    ) -> Self {
        assert!(
            alternate.len() <= MAX_ALTERNATE_LEN,
            "alternate function name too long"
        );
        Self {
            physical_position,
            logical_id,
            alternate_function: Some(alternate),
        }
    }

    /// Header position (1-40)
    pub const fn physical_position(&self) -> u8 {
        self.physical_position
    }

    /// BCM GPIO number
    pub const fn logical_id(&self) -> u8 {
        self.logical_id
    }

    /// Secondary role name, if any
    pub const fn alternate_function(&self) -> Option<&'static str> {
        self.alternate_function
    }

    /// Number to hand the driver under the given numbering scheme
    pub const fn address(&self, scheme: NumberingScheme) -> u8 {
        match scheme {
            NumberingScheme::Bcm => self.logical_id,
            NumberingScheme::Board => self.physical_position,
        }
    }
}

/// Reference mapping for the Raspberry Pi 40-pin header
///
/// Position 7 (GPCLK) shares logical id 3 with position 5 (SCL).
pub const RPI_40PIN_HEADER: [PinHeaderEntry; 26] = [
    PinHeaderEntry::with_alternate(3, 2, "SDA"),
    PinHeaderEntry::with_alternate(5, 3, "SCL"),
    PinHeaderEntry::with_alternate(7, 3, "GPCLK"),
    PinHeaderEntry::with_alternate(8, 14, "TXD"),
    PinHeaderEntry::with_alternate(10, 15, "RXD"),
    PinHeaderEntry::new(11, 17),
    PinHeaderEntry::with_alternate(12, 18, "PCM_CLK"),
    PinHeaderEntry::new(13, 27),
    PinHeaderEntry::new(15, 22),
    PinHeaderEntry::new(16, 23),
    PinHeaderEntry::new(18, 24),
    PinHeaderEntry::with_alternate(19, 10, "SPI_MOSI"),
    PinHeaderEntry::with_alternate(21, 9, "SPI_MISO"),
    PinHeaderEntry::new(22, 25),
    PinHeaderEntry::with_alternate(23, 11, "SPI_SCLK"),
    PinHeaderEntry::with_alternate(24, 8, "SPI_CE0"),
    PinHeaderEntry::with_alternate(26, 7, "SPI_CE1"),
    PinHeaderEntry::new(29, 5),
    PinHeaderEntry::new(31, 6),
    PinHeaderEntry::new(32, 12),
    PinHeaderEntry::new(33, 13),
    PinHeaderEntry::new(35, 19),
    PinHeaderEntry::new(36, 16),
    PinHeaderEntry::new(37, 26),
    PinHeaderEntry::new(38, 20),
    PinHeaderEntry::new(40, 21),
];

/// Read-only, ordered list of header entries
#[derive(Debug, Clone, Copy)]
pub struct PinTable {
    entries: &'static [PinHeaderEntry],
}

impl PinTable {
    /// Wrap a fixed entry list
    pub const fn new(entries: &'static [PinHeaderEntry]) -> Self {
        Self { entries }
    }

    /// The Raspberry Pi 40-pin header
    pub const fn reference() -> Self {
        Self::new(&RPI_40PIN_HEADER)
    }

    /// All entries in table order
    pub fn entries(&self) -> &'static [PinHeaderEntry] {
        self.entries
    }

    pub fn iter(&self) -> core::slice::Iter<'static, PinHeaderEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the entry for a logical (BCM) id
    ///
    /// When several positions share an id, the first in table order wins.
    pub fn lookup_by_logical_id(
        &self,
        id: u32,
    ) -> Result<&'static PinHeaderEntry, NotFoundError> {
        self.entries
            .iter()
            .find(|e| u32::from(e.logical_id) == id)
            .ok_or(NotFoundError::LogicalId(id))
    }

    /// Find the entry at a header position
    pub fn lookup_by_physical_position(
        &self,
        pos: u32,
    ) -> Result<&'static PinHeaderEntry, NotFoundError> {
        self.entries
            .iter()
            .find(|e| u32::from(e.physical_position) == pos)
            .ok_or(NotFoundError::PhysicalPosition(pos))
    }

    /// Look up a header position and bind a handle to it
    pub fn handle_by_physical_position<'d, D: GpioDriver>(
        &self,
        driver: &'d D,
        pos: u32,
        scheme: NumberingScheme,
    ) -> Result<GpioHandle<'d, D>, NotFoundError> {
        let entry = self.lookup_by_physical_position(pos)?;
        Ok(GpioHandle::for_entry(driver, entry, scheme))
    }

    /// Look up a logical id and bind a handle to it
    pub fn handle_by_logical_id<'d, D: GpioDriver>(
        &self,
        driver: &'d D,
        id: u32,
        scheme: NumberingScheme,
    ) -> Result<GpioHandle<'d, D>, NotFoundError> {
        let entry = self.lookup_by_logical_id(id)?;
        Ok(GpioHandle::for_entry(driver, entry, scheme))
    }
}

impl Default for PinTable {
    fn default() -> Self {
        Self::reference()
    }
}

impl IntoIterator for PinTable {
    type Item = &'static PinHeaderEntry;
    type IntoIter = core::slice::Iter<'static, PinHeaderEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
