/// Accent color parsing
use crate::error::{CadenceError, Result};
use serde::{Deserialize, Serialize};

/// An RGB accent color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccentColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl AccentColor {
    /// Fallback when a song has no usable accent
    pub const BLACK: AccentColor = AccentColor { r: 0, g: 0, b: 0 };

    /// Parse `#RRGGBB` or `#AARRGGBB`; alpha is discarded
    pub fn parse(hex: &str) -> Result<Self> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| CadenceError::invalid_input(format!("accent must start with '#': {hex}")))?;

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CadenceError::invalid_input(format!(
                "accent is not hexadecimal: {hex}"
            )));
        }

        let rgb = match digits.len() {
            6 => digits,
            8 => &digits[2..],
            _ => {
                return Err(CadenceError::invalid_input(format!(
                    "accent must have 6 or 8 hex digits: {hex}"
                )))
            }
        };

        let channel = |i: usize| {
            u8::from_str_radix(&rgb[i..i + 2], 16)
                .map_err(|e| CadenceError::invalid_input(e.to_string()))
        };

        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Parse, falling back to black
    pub fn parse_or_black(hex: &str) -> Self {
        Self::parse(hex).unwrap_or(Self::BLACK)
    }
}
