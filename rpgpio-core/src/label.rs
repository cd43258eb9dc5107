//! Pin labels for display
//!
//! Three renderings of a [`PinHeaderEntry`]:
//!
//! - [`describe`]: `"03 GPIO2 (SDA)"`, for lists and terminals
//! - [`describe_rich`]: the same fields as styled markup for rich-text views
//! - [`PinHeaderEntry::name`]: `"Pin  3: GPIO2"`, a short label for prompts
//!
//! All return fixed-capacity strings sized for the longest entry
//! [`PinHeaderEntry::with_alternate`] accepts.

use core::fmt::{self, Write};

use heapless::String;

use crate::pins::{PinHeaderEntry, MAX_ALTERNATE_LEN};

/// Capacity of a plain label
pub const LABEL_LEN: usize = 16 + MAX_ALTERNATE_LEN;

/// Capacity of a rich-text label
pub const RICH_LABEL_LEN: usize = 144 + MAX_ALTERNATE_LEN;

/// Capacity of a short pin name
pub const NAME_LEN: usize = 24;

pub type Label = String<LABEL_LEN>;
pub type RichLabel = String<RICH_LABEL_LEN>;
pub type Name = String<NAME_LEN>;

const POSITION_COLOR: &str = "Blue";
const GPIO_COLOR: &str = "Green";
const ALTERNATE_COLOR: &str = "Purple";

/// Plain label: two-digit position, GPIO number, alternate in parentheses
impl fmt::Display for PinHeaderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02} GPIO{}", self.physical_position(), self.logical_id())?;
        if let Some(alt) = self.alternate_function() {
            write!(f, " ({})", alt)?;
        }
        Ok(())
    }
}

/// Rich-text rendering of an entry
///
/// Three colored spans: position, GPIO number (right-aligned to width 2)
/// and alternate function (empty when there is none).
#[derive(Debug, Clone, Copy)]
pub struct Rich<'a>(pub &'a PinHeaderEntry);

impl fmt::Display for Rich<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entry = self.0;
        write!(
            f,
            "<pre><span style=\"color:{}\">{:02}</span> \
             <span style=\"color:{}\">GPIO{:2}</span> \
             <span style=\"color:{}\">{}</span></pre>",
            POSITION_COLOR,
            entry.physical_position(),
            GPIO_COLOR,
            entry.logical_id(),
            ALTERNATE_COLOR,
            entry.alternate_function().unwrap_or(""),
        )
    }
}

fn render<const N: usize>(value: impl fmt::Display) -> String<N> {
    let mut out = String::new();
    // Capacities cover the longest entry the constructors allow
    let _ = write!(out, "{}", value);
    out
}

/// Plain label for an entry
pub fn describe(entry: &PinHeaderEntry) -> Label {
    render(entry)
}

/// Rich-text label for an entry
pub fn describe_rich(entry: &PinHeaderEntry) -> RichLabel {
    render(Rich(entry))
}

impl PinHeaderEntry {
    /// Short name, e.g. `"Pin 11: GPIO17"`
    pub fn name(&self) -> Name {
        let mut out = Name::new();
        let _ = write!(
            out,
            "Pin {:2}: GPIO{}",
            self.physical_position(),
            self.logical_id()
        );
        out
    }

    /// Rich-text view of this entry
    pub fn rich(&self) -> Rich<'_> {
        Rich(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pins::PinTable;
    use proptest::prelude::*;

    fn entry_at(pos: u32) -> &'static PinHeaderEntry {
        PinTable::reference().lookup_by_physical_position(pos).unwrap()
    }

    #[test]
    fn test_describe_with_alternate() {
        assert_eq!(describe(entry_at(3)).as_str(), "03 GPIO2 (SDA)");
        assert_eq!(describe(entry_at(19)).as_str(), "19 GPIO10 (SPI_MOSI)");
    }

    #[test]
    fn test_describe_without_alternate() {
        assert_eq!(describe(entry_at(11)).as_str(), "11 GPIO17");
        assert_eq!(describe(entry_at(29)).as_str(), "29 GPIO5");
    }

    #[test]
    fn test_display_matches_describe() {
        let entry = entry_at(12);
        assert_eq!(std::format!("{}", entry), describe(entry).as_str());
    }

    #[test]
    fn test_describe_rich() {
        assert_eq!(
            describe_rich(entry_at(3)).as_str(),
            "<pre><span style=\"color:Blue\">03</span> \
             <span style=\"color:Green\">GPIO 2</span> \
             <span style=\"color:Purple\">SDA</span></pre>"
        );
        assert_eq!(
            describe_rich(entry_at(40)).as_str(),
            "<pre><span style=\"color:Blue\">40</span> \
             <span style=\"color:Green\">GPIO21</span> \
             <span style=\"color:Purple\"></span></pre>"
        );
    }

    #[test]
    fn test_rich_display_matches_describe_rich() {
        let entry = entry_at(24);
        assert_eq!(
            std::format!("{}", entry.rich()),
            describe_rich(entry).as_str()
        );
    }

    #[test]
    fn test_name() {
        assert_eq!(entry_at(3).name().as_str(), "Pin  3: GPIO2");
        assert_eq!(entry_at(11).name().as_str(), "Pin 11: GPIO17");
    }

    #[test]
    fn test_longest_alternate_fits() {
        let entry = PinHeaderEntry::with_alternate(40, 255, "ABCDEFGHIJKLMNOP");
        assert_eq!(describe(&entry).as_str(), "40 GPIO255 (ABCDEFGHIJKLMNOP)");
        assert!(describe_rich(&entry).ends_with("ABCDEFGHIJKLMNOP</span></pre>"));
        assert_eq!(entry.name().as_str(), "Pin 40: GPIO255");
    }

    proptest! {
        #[test]
        fn prop_describe_never_truncates(
            pos in any::<u8>(),
            id in any::<u8>(),
            alt in "[A-Z_0-9]{0,16}",
        ) {
            let alt: &'static str = std::boxed::Box::leak(alt.into_boxed_str());
            let entry = if alt.is_empty() {
                PinHeaderEntry::new(pos, id)
            } else {
                PinHeaderEntry::with_alternate(pos, id, alt)
            };

            let plain = describe(&entry);
            let rich = describe_rich(&entry);
            prop_assert_eq!(plain.as_str(), std::format!("{}", entry));
            prop_assert_eq!(rich.as_str(), std::format!("{}", Rich(&entry)));
            prop_assert_eq!(plain.contains('('), !alt.is_empty());
        }
    }
}
