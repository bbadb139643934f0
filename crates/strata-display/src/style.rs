// SPDX-License-Identifier: MIT
//
// Style values carried by display atoms.
//
// The palette is deliberately the eight classic terminal colors plus
// `Default` (inherit). Filters assign these by name; mapping them to actual
// escape codes or theme colors is the painter's business, not ours.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

// ─── Color ───────────────────────────────────────────────────────────────────

/// A named display color.
///
/// `Default` means "unset": the atom inherits whatever the painter uses for
/// normal text. Every freshly built atom starts with `Default` foreground and
/// background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    /// Every color, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Default,
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
    ];

    /// The lowercase name used in filter parameters.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
        }
    }

    /// Whether this is the inherit color.
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.name() == lower)
            .ok_or_else(|| Error::InvalidColor(s.to_string()))
    }
}

// ─── Attributes ──────────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Rendering attributes stored as a compact bitfield.
    ///
    /// Attributes accumulate: a filter ORs in the bits it owns and never
    /// clears bits set by another filter.
    ///
    /// ```
    /// use strata_display::style::Attr;
    ///
    /// let style = Attr::UNDERLINE | Attr::BOLD;
    /// assert!(style.contains(Attr::UNDERLINE));
    /// assert!(!style.contains(Attr::REVERSE));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        /// Selected text.
        const UNDERLINE = 1 << 0;
        /// Swap foreground and background.
        const REVERSE   = 1 << 1;
        const BLINK     = 1 << 2;
        const BOLD      = 1 << 3;
    }
}

impl fmt::Display for Attr {
    /// `UNDERLINE|BOLD` style, or `-` when empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        bitflags::parser::to_writer(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn color_defaults_to_inherit() {
        assert_eq!(Color::default(), Color::Default);
        assert!(Color::Default.is_default());
        assert!(!Color::Red.is_default());
    }

    #[test]
    fn color_parses_case_insensitively() {
        assert_eq!("Magenta".parse::<Color>().unwrap(), Color::Magenta);
        assert_eq!(" cyan ".parse::<Color>().unwrap(), Color::Cyan);
        assert_eq!("default".parse::<Color>().unwrap(), Color::Default);
    }

    #[test]
    fn color_rejects_unknown_names() {
        let err = "mauve".parse::<Color>().unwrap_err();
        assert!(err.to_string().contains("mauve"));
    }

    #[test]
    fn color_name_round_trips() {
        for color in Color::ALL {
            assert_eq!(color.to_string().parse::<Color>().unwrap(), color);
        }
    }

    #[test]
    fn attr_display() {
        assert_eq!(Attr::empty().to_string(), "-");
        assert_eq!(Attr::UNDERLINE.to_string(), "UNDERLINE");
        assert_eq!((Attr::UNDERLINE | Attr::BOLD).to_string(), "UNDERLINE | BOLD");
    }
}
