//! RGB colours for lines and labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque RGB colour, written as `#rrggbb` in documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Light grey used for the connecting line and bullets.
    pub const LIGHT_GRAY: Self = Self::rgb(170, 170, 170);

    /// Teal used for date labels.
    pub const TEAL: Self = Self::rgb(0, 180, 160);

    /// Mid grey used for body text.
    pub const DETAIL_GRAY: Self = Self::rgb(110, 110, 110);

    pub const BLACK: Self = Self::rgb(0, 0, 0);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ColorParseError::Length(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ColorParseError::Digit(s.to_string()))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Errors from parsing a `#rrggbb` colour.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("colour {0:?} must start with '#'")]
    MissingHash(String),

    #[error("colour {0:?} must have exactly six hex digits")]
    Length(String),

    #[error("colour {0:?} contains a non-hex digit")]
    Digit(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_display_round_trip() {
        assert_eq!(Color::TEAL.to_string(), "#00b4a0");
        assert_eq!("#00b4a0".parse::<Color>(), Ok(Color::TEAL));
        assert_eq!("#AAAAAA".parse::<Color>(), Ok(Color::LIGHT_GRAY));
    }

    #[test]
    fn test_color_parse_errors() {
        assert!(matches!(
            "00b4a0".parse::<Color>(),
            Err(ColorParseError::MissingHash(_))
        ));
        assert!(matches!(
            "#fff".parse::<Color>(),
            Err(ColorParseError::Length(_))
        ));
        assert!(matches!(
            "#gg0000".parse::<Color>(),
            Err(ColorParseError::Digit(_))
        ));
    }

    #[test]
    fn test_color_serde_as_hex_string() {
        let json = serde_json::to_string(&Color::DETAIL_GRAY).unwrap();
        assert_eq!(json, "\"#6e6e6e\"");
        let parsed: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Color::DETAIL_GRAY);
        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
    }
}
