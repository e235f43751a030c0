//! Fixed vocabulary tables: the named color palette and brightness bounds.
//!
//! These are read-only process-wide tables shared by the interpreter and the
//! light defaults applied to generated layouts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Named colors understood by voice commands, mapped to hex values.
pub const PALETTE: [(&str, &str); 9] = [
    ("red", "#FF4136"),
    ("blue", "#0074D9"),
    ("green", "#2ECC40"),
    ("yellow", "#FFDC00"),
    ("orange", "#FF851B"),
    ("purple", "#B10DC9"),
    ("white", "#FFFFFF"),
    ("pink", "#F012BE"),
    ("cyan", "#39CCCC"),
];

/// Color assigned to lights that arrive without one.
pub const DEFAULT_LIGHT_COLOR: &str = "#FFFFFF";

/// Look up a color word (case-insensitive) in [`PALETTE`].
#[must_use]
pub fn lookup_color(word: &str) -> Option<&'static str> {
    let word = word.to_lowercase();
    PALETTE
        .iter()
        .find(|(name, _)| *name == word)
        .map(|(_, hex)| *hex)
}

/// Whether `value` is a `#RGB` or `#RRGGBB` hex color.
#[must_use]
pub fn is_hex_color(value: &str) -> bool {
    value.strip_prefix('#').is_some_and(|digits| {
        matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
    })
}

/// Light brightness percentage, always within `0..=100` once clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Brightness(u8);

impl Brightness {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(100);

    /// Saturate an arbitrary integer into the valid range.
    #[must_use]
    pub fn clamped(value: u64) -> Self {
        let max = Self::MAX.0;
        Self(u8::try_from(value).map_or(max, |v| v.min(max)))
    }

    /// Raw percentage value.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether a deserialized value respects the bounds.
    #[must_use]
    pub fn is_in_range(self) -> bool {
        self <= Self::MAX
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self == Self::MIN
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::MAX
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
