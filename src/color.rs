use image::Rgba;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ColorParseError {
    #[error("color must start with '#': {0}")]
    MissingHash(String),

    #[error("color must have 3, 6 or 8 hex digits: {0}")]
    BadLength(String),

    #[error("invalid hex digit in color: {0}")]
    BadDigit(String),
}

/// Solid fill used for the padding canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundColor(pub Rgba<u8>);

impl BackgroundColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Rgba([r, g, b, 255]))
    }

    pub fn pixel(&self) -> Rgba<u8> {
        self.0
    }
}

impl FromStr for BackgroundColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;

        let (width, count) = match digits.len() {
            3 => (1, 3),
            6 => (2, 3),
            8 => (2, 4),
            _ => return Err(ColorParseError::BadLength(s.to_string())),
        };
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(s.to_string()));
        }

        let mut rgba = [255u8; 4];
        for (i, channel) in rgba.iter_mut().take(count).enumerate() {
            let value = u8::from_str_radix(&digits[i * width..(i + 1) * width], 16)
                .map_err(|_| ColorParseError::BadDigit(s.to_string()))?;
            *channel = if width == 1 { value * 17 } else { value };
        }

        Ok(Self(Rgba(rgba)))
    }
}

impl fmt::Display for BackgroundColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0 .0;
        if a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", r, g, b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
        }
    }
}
