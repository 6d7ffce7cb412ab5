//! Tag colors for day markers.
//!
//! The palette is a product detail, not a structural invariant: callers may
//! also tag a day with any `#RRGGBB` custom value.

use super::ModelError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid hex color regex"));

static PALETTE: [TagColor; 7] = [
    TagColor::Red,
    TagColor::Orange,
    TagColor::Yellow,
    TagColor::Green,
    TagColor::Blue,
    TagColor::Purple,
    TagColor::Pink,
];

/// Color tag attached to a day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TagColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    /// Uppercase `#RRGGBB` value.
    Custom(String),
}

impl TagColor {
    /// Named colors in picker order.
    pub fn palette() -> &'static [TagColor] {
        &PALETTE
    }

    /// Parses a palette name (case-insensitive) or a `#RRGGBB` value.
    pub fn parse(value: &str) -> Result<Self, ModelError> {
        let trimmed = value.trim();
        let named = match trimmed.to_ascii_lowercase().as_str() {
            "red" => Some(Self::Red),
            "orange" => Some(Self::Orange),
            "yellow" => Some(Self::Yellow),
            "green" => Some(Self::Green),
            "blue" => Some(Self::Blue),
            "purple" => Some(Self::Purple),
            "pink" => Some(Self::Pink),
            _ => None,
        };
        if let Some(color) = named {
            return Ok(color);
        }
        if HEX_COLOR_RE.is_match(trimmed) {
            return Ok(Self::Custom(trimmed.to_ascii_uppercase()));
        }
        Err(ModelError::InvalidColor(value.to_string()))
    }

    /// Wire/export form: palette name, or the hex value for custom colors.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Pink => "pink",
            Self::Custom(hex) => hex.as_str(),
        }
    }

    /// Strong swatch used for the day marker.
    pub fn hex(&self) -> &str {
        match self {
            Self::Red => "#FF4D4F",
            Self::Orange => "#FF7A45",
            Self::Yellow => "#FFC53D",
            Self::Green => "#73D13D",
            Self::Blue => "#40A9FF",
            Self::Purple => "#9254DE",
            Self::Pink => "#F759AB",
            Self::Custom(hex) => hex.as_str(),
        }
    }

    /// Light background swatch. Custom colors have none.
    pub fn light_hex(&self) -> Option<&'static str> {
        match self {
            Self::Red => Some("#FFF1F0"),
            Self::Orange => Some("#FFF7E6"),
            Self::Yellow => Some("#FFFBE6"),
            Self::Green => Some("#F6FFED"),
            Self::Blue => Some("#E6F7FF"),
            Self::Purple => Some("#F9F0FF"),
            Self::Pink => Some("#FFF0F6"),
            Self::Custom(_) => None,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl Display for TagColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagColor {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for TagColor {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TagColor> for String {
    fn from(value: TagColor) -> Self {
        value.as_str().to_string()
    }
}
