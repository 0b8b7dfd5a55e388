use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{PicEditError, PicEditResult};
use crate::foundation::math::{mul_div255_u8, unit_to_u8};

/// Straight-alpha sRGB color.
///
/// Channels are bytes; `alpha` is a `0.0..=1.0` coverage factor. Both are clamped on construction.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha in `0.0..=1.0`.
    pub alpha: f32,
}

impl Color {
    /// Opaque white, the default canvas background.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque color from byte channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    /// Color with explicit alpha, clamped to `0.0..=1.0` (NaN becomes opaque).
    pub fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        let alpha = if alpha.is_nan() {
            1.0
        } else {
            alpha.clamp(0.0, 1.0)
        };
        Self { r, g, b, alpha }
    }

    /// Parse `#RGB`, `#RRGGBB`, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
    pub fn parse(input: &str) -> PicEditResult<Self> {
        parse_color(input)
    }

    /// Alpha as a byte.
    pub fn alpha_u8(self) -> u8 {
        unit_to_u8(self.alpha)
    }

    /// Premultiplied RGBA8 representation.
    pub fn to_premul_rgba8(self) -> [u8; 4] {
        let a = self.alpha_u8();
        let a16 = u16::from(a);
        [
            mul_div255_u8(u16::from(self.r), a16),
            mul_div255_u8(u16::from(self.g), a16),
            mul_div255_u8(u16::from(self.b), a16),
            a,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Color {
    type Err = PicEditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}

impl TryFrom<String> for Color {
    type Error = PicEditError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_color(&value)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.alpha)
    }
}

fn parse_color(input: &str) -> PicEditResult<Color> {
    let s = input.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| {
            PicEditError::invalid_color(format!(
                "'{input}': hex colors must be #RGB or #RRGGBB"
            ))
        });
    }

    let lower = s.to_ascii_lowercase();
    let functional = lower
        .strip_prefix("rgba(")
        .map(|rest| (rest, 4))
        .or_else(|| lower.strip_prefix("rgb(").map(|rest| (rest, 3)))
        .and_then(|(rest, arity)| Some((rest.strip_suffix(')')?, arity)));
    if let Some((body, arity)) = functional {
        return parse_functional(input, body, arity);
    }

    Err(PicEditError::invalid_color(format!(
        "'{input}': expected #RGB, #RRGGBB, rgb(r,g,b) or rgba(r,g,b,a)"
    )))
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut ch = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            let r = ch.next()??;
            let g = ch.next()??;
            let b = ch.next()??;
            Some(Color::rgb(r, g, b))
        }
        6 => {
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}

/// `arity` is 3 for `rgb()` and 4 for `rgba()`.
fn parse_functional(input: &str, body: &str, arity: usize) -> PicEditResult<Color> {
    let values = body
        .split(',')
        .map(|part| {
            part.trim().parse::<f64>().map_err(|_| {
                PicEditError::invalid_color(format!(
                    "'{input}': component '{}' is not a number",
                    part.trim()
                ))
            })
        })
        .collect::<PicEditResult<Vec<f64>>>()?;

    if values.len() != arity {
        return Err(PicEditError::invalid_color(format!(
            "'{input}': expected {arity} components, got {}",
            values.len()
        )));
    }

    let channel = |v: f64| -> u8 {
        if v.is_nan() {
            0
        } else {
            v.round().clamp(0.0, 255.0) as u8
        }
    };
    let alpha = values.get(3).copied().unwrap_or(1.0) as f32;
    Ok(Color::rgba(
        channel(values[0]),
        channel(values[1]),
        channel(values[2]),
        alpha,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
