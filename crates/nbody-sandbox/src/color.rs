use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SandboxError;

/// RGB color carried by every body
///
/// The engine treats color as an opaque token except when two bodies merge,
/// where the channels are blended. On the wire it is a `#rrggbb` string;
/// `hsl(h, s%, l%)` strings are accepted when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend from `self` toward `other`
    ///
    /// `t = 0` yields `self`, `t = 1` yields `other`. Each channel is rounded
    /// to the nearest integer after interpolation.
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody_sandbox::color::Color;
    ///
    /// let black = Color::new(0, 0, 0);
    /// let white = Color::WHITE;
    /// assert_eq!(black.lerp(white, 0.5), Color::new(128, 128, 128));
    /// ```
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let channel = |a: u8, b: u8| {
            let (a, b) = (a as f64, b as f64);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };
        Color {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }

    /// Convert HSL to RGB
    ///
    /// # Arguments
    /// * `hue` - Hue in degrees (wrapped into [0, 360))
    /// * `saturation` - Saturation in [0, 1]
    /// * `lightness` - Lightness in [0, 1]
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 360.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        if s == 0.0 {
            let v = (l * 255.0).round() as u8;
            return Self::new(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        let hue_to_channel = |t: f64| {
            let t = t.rem_euclid(1.0);
            let v = match t {
                t if t < 1.0 / 6.0 => p + (q - p) * 6.0 * t,
                t if t < 0.5 => q,
                t if t < 2.0 / 3.0 => p + (q - p) * (2.0 / 3.0 - t) * 6.0,
                _ => p,
            };
            (v * 255.0).round().clamp(0.0, 255.0) as u8
        };

        Self {
            r: hue_to_channel(h + 1.0 / 3.0),
            g: hue_to_channel(h),
            b: hue_to_channel(h - 1.0 / 3.0),
        }
    }

    /// Returns the color as a lowercase hex string (e.g., "#ff9944")
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse a hex color string (e.g., "#FF9944" or "ff9944")
    pub fn from_hex(s: &str) -> Result<Self, SandboxError> {
        let digits = s.strip_prefix('#').unwrap_or(s);

        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(SandboxError::InvalidColor(s.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| SandboxError::InvalidColor(s.to_string()))
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Parse a CSS `hsl(h, s%, l%)` string as stored by older galaxy saves
    fn from_css_hsl(s: &str) -> Result<Self, SandboxError> {
        let invalid = || SandboxError::InvalidColor(s.to_string());

        let args = s
            .strip_prefix("hsl(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;

        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let [hue, saturation, lightness] = parts.as_slice() else {
            return Err(invalid());
        };

        let number = |text: &str| {
            text.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(invalid)
        };
        let percent = |text: &str| {
            text.strip_suffix('%')
                .ok_or_else(invalid)
                .and_then(number)
                .map(|v| v / 100.0)
        };

        Ok(Self::from_hsl(
            number(hue)?,
            percent(saturation)?,
            percent(lightness)?,
        ))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = SandboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "white" => Ok(Self::WHITE),
            other if other.starts_with("hsl(") => Self::from_css_hsl(other),
            other => Self::from_hex(other),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = SandboxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}
