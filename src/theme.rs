//! Theme modes, accent hues and their fixed color tables.
//!
//! Every lookup here is a total function over an exhaustive enum, so the
//! rendering layer can never receive an undefined color.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Opaque 24-bit RGB color handed to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Builds a color from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Returns the color packed as `0xRRGGBB`.
    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.to_hex())
    }
}

/// Warning band color, shared by every mode and accent.
pub const WARNING_COLOR: Rgb = Rgb::from_hex(0xdf8e1d);
/// Critical band color, shared by every mode and accent.
pub const CRITICAL_COLOR: Rgb = Rgb::from_hex(0xd20f39);

/// A name that matched no theme mode or accent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} name: '{name}'")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

/// Light or dark base palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeMode {
    Dark,
    Light,
}

/// Per-mode base colors: background, text, bar background.
struct ModeColors {
    bg: Rgb,
    text: Rgb,
    bar_bg: Rgb,
}

const DARK_COLORS: ModeColors = ModeColors {
    bg: Rgb::from_hex(0x000000),
    text: Rgb::from_hex(0xeff1f5),
    bar_bg: Rgb::from_hex(0x4c4f69),
};

const LIGHT_COLORS: ModeColors = ModeColors {
    bg: Rgb::from_hex(0xeff1f5),
    text: Rgb::from_hex(0x4c4f69),
    bar_bg: Rgb::from_hex(0xdce0e8),
};

impl ThemeMode {
    /// All modes in ordinal order.
    pub const ALL: [ThemeMode; 2] = [ThemeMode::Dark, ThemeMode::Light];

    /// Integer written to persistent storage.
    pub const fn ordinal(self) -> i32 {
        match self {
            ThemeMode::Dark => 1,
            ThemeMode::Light => 2,
        }
    }

    /// Decodes a stored integer, or `None` when it names no mode.
    pub fn from_ordinal(value: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.ordinal() == value)
    }

    /// Lowercase display name, as used on the link and in settings.
    pub const fn name(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    /// The other mode.
    pub const fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    const fn colors(self) -> &'static ModeColors {
        match self {
            ThemeMode::Dark => &DARK_COLORS,
            ThemeMode::Light => &LIGHT_COLORS,
        }
    }

    pub const fn bg_color(self) -> Rgb {
        self.colors().bg
    }

    pub const fn text_color(self) -> Rgb {
        self.colors().text
    }

    pub const fn bar_bg_color(self) -> Rgb {
        self.colors().bar_bg
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThemeMode {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownName {
                kind: "theme",
                name: s.to_string(),
            })
    }
}

/// Named accent hue used for normal-band gauges and highlights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccentColor {
    Sapphire,
    Mauve,
    Green,
    Peach,
    Sky,
    Teal,
    Maroon,
    Pink,
    Flamingo,
    Lavender,
}

/// Accent table indexed by `ordinal - 1`.
const ACCENT_TABLE: [(AccentColor, &str, Rgb); 10] = [
    (AccentColor::Sapphire, "sapphire", Rgb::from_hex(0x209fb5)),
    (AccentColor::Mauve, "mauve", Rgb::from_hex(0x8839ef)),
    (AccentColor::Green, "green", Rgb::from_hex(0x40a02b)),
    (AccentColor::Peach, "peach", Rgb::from_hex(0xfe640b)),
    (AccentColor::Sky, "sky", Rgb::from_hex(0x04a5e5)),
    (AccentColor::Teal, "teal", Rgb::from_hex(0x179299)),
    (AccentColor::Maroon, "maroon", Rgb::from_hex(0xe64553)),
    (AccentColor::Pink, "pink", Rgb::from_hex(0xea76cb)),
    (AccentColor::Flamingo, "flamingo", Rgb::from_hex(0xdd7878)),
    (AccentColor::Lavender, "lavender", Rgb::from_hex(0x7287fd)),
];

impl AccentColor {
    /// All accents in ordinal order.
    pub const ALL: [AccentColor; 10] = [
        AccentColor::Sapphire,
        AccentColor::Mauve,
        AccentColor::Green,
        AccentColor::Peach,
        AccentColor::Sky,
        AccentColor::Teal,
        AccentColor::Maroon,
        AccentColor::Pink,
        AccentColor::Flamingo,
        AccentColor::Lavender,
    ];

    /// Integer written to persistent storage (1-based).
    pub const fn ordinal(self) -> i32 {
        self as i32 + 1
    }

    /// Decodes a stored integer, or `None` when it names no accent.
    pub fn from_ordinal(value: i32) -> Option<Self> {
        value
            .checked_sub(1)
            .and_then(|idx| usize::try_from(idx).ok())
            .and_then(|idx| ACCENT_TABLE.get(idx))
            .map(|(accent, _, _)| *accent)
    }

    pub const fn name(self) -> &'static str {
        ACCENT_TABLE[self as usize].1
    }

    pub const fn rgb(self) -> Rgb {
        ACCENT_TABLE[self as usize].2
    }

    /// Next accent in ordinal order, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self as usize + 1) % Self::ALL.len()]
    }

    /// Previous accent in ordinal order, wrapping around.
    pub fn prev(self) -> Self {
        Self::ALL[(self as usize + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AccentColor {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|accent| accent.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownName {
                kind: "accent",
                name: s.to_string(),
            })
    }
}

/// Color for a raw stored accent ordinal; unknown values map to Sapphire.
pub fn accent_color_value(ordinal: i32) -> Rgb {
    AccentColor::from_ordinal(ordinal)
        .unwrap_or(AccentColor::Sapphire)
        .rgb()
}
