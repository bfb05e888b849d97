use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// The string is not a recognised color notation.
    Format(String),
    /// A channel lies outside of its range.
    Channel(String),
}

impl Display for ColorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorError::Format(value) => write!(f, "unrecognised color {value:?}"),
            ColorError::Channel(value) => write!(f, "channel out of range in {value:?}"),
        }
    }
}

impl std::error::Error for ColorError {}

/// An 8-bit RGB color with a floating point alpha.
///
/// Parsed from `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
/// `rgba(r, g, b, a)` and `transparent`. Always written as `rgba(...)`,
/// the notation understood by style expressions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0.0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    fn from_hex(value: &str, hex: &str) -> Result<Self, ColorError> {
        let format = || ColorError::Format(value.to_string());

        if !hex.is_ascii() {
            return Err(format());
        }

        let channel = |index: usize, width: usize| -> Result<u8, ColorError> {
            let digits = &hex[index * width..(index + 1) * width];
            let parsed = u8::from_str_radix(digits, 16).map_err(|_| format())?;
            // Short notation repeats each digit, `f` becomes `ff`.
            Ok(if width == 1 { parsed * 17 } else { parsed })
        };

        match hex.len() {
            3 => Ok(Self::rgb(channel(0, 1)?, channel(1, 1)?, channel(2, 1)?)),
            6 => Ok(Self::rgb(channel(0, 2)?, channel(1, 2)?, channel(2, 2)?)),
            8 => Ok(Self::rgba(
                channel(0, 2)?,
                channel(1, 2)?,
                channel(2, 2)?,
                f32::from(channel(3, 2)?) / 255.0,
            )),
            _ => Err(format()),
        }
    }

    fn from_function(value: &str, arguments: &str, has_alpha: bool) -> Result<Self, ColorError> {
        let parts = arguments.split(',').map(str::trim).collect::<Vec<_>>();
        let expected = if has_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(ColorError::Format(value.to_string()));
        }

        let channel = |part: &str| -> Result<u8, ColorError> {
            let parsed = part
                .parse::<f32>()
                .map_err(|_| ColorError::Format(value.to_string()))?;

            if !(0.0..=255.0).contains(&parsed) {
                return Err(ColorError::Channel(value.to_string()));
            }

            Ok(parsed.round() as u8)
        };

        let alpha = match parts.get(3) {
            Some(part) => {
                let alpha = part
                    .parse::<f32>()
                    .map_err(|_| ColorError::Format(value.to_string()))?;

                if !(0.0..=1.0).contains(&alpha) {
                    return Err(ColorError::Channel(value.to_string()));
                }

                alpha
            }
            None => 1.0,
        };

        Ok(Self::rgba(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            alpha,
        ))
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();

        if trimmed.eq_ignore_ascii_case("transparent") {
            return Ok(Color::TRANSPARENT);
        }

        if let Some(hex) = trimmed.strip_prefix('#') {
            return Self::from_hex(value, hex);
        }

        if let Some(arguments) = trimmed
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Self::from_function(value, arguments, true);
        }

        if let Some(arguments) = trimmed
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Self::from_function(value, arguments, false);
        }

        Err(ColorError::Format(value.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let alpha = (self.a * 1000.0).round() / 1000.0;
        write!(f, "rgba({}, {}, {}, {alpha})", self.r, self.g, self.b)
    }
}

impl From<Color> for serde_json::Value {
    fn from(value: Color) -> Self {
        serde_json::Value::String(value.to_string())
    }
}
