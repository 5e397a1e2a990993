//! Color values and references.
//!
//! Supports these literal formats:
//!
//! - Hex: `"#0d7680"`, `"#fff"`, and the alpha forms `"#0d768080"`, `"#fff8"`
//! - Functional: `"rgb(13, 118, 128)"`, `"rgba(13, 118, 128, 0.5)"`
//! - Sentinels: `"transparent"`, and `"undefined"` / `"none"`
//!
//! Anything else in a color position is read as a palette name, so a
//! [`ColorRef`] can carry either a literal value or a reference to look up.
//!
//! # Example
//!
//! ```rust
//! use tincture::{ColorRef, ColorValue, Rgba};
//!
//! let teal = ColorValue::parse("#0d7680").unwrap();
//! assert_eq!(teal, ColorValue::Rgba(Rgba::new(13, 118, 128)));
//!
//! assert_eq!(ColorRef::from("teal"), ColorRef::Name("teal".into()));
//! assert_eq!(ColorRef::from("transparent"), ColorRef::Value(ColorValue::Transparent));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TinctureError};

/// An sRGB color with alpha.
///
/// Channels are 0–255; alpha is 0.0 (fully transparent) to 1.0 (opaque).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255);

    /// Creates an opaque color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Returns this color with the given alpha, clamped to 0.0–1.0.
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// True for pure black regardless of alpha.
    pub fn is_black(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }

    /// Lowercase `#rrggbb`, ignoring alpha.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Converts to the nearest ANSI 256-color palette index.
    ///
    /// ```rust
    /// use tincture::Rgba;
    ///
    /// assert_eq!(Rgba::new(255, 0, 0).to_ansi256(), 196);
    /// assert_eq!(Rgba::new(0, 255, 0).to_ansi256(), 46);
    /// ```
    pub fn to_ansi256(&self) -> u8 {
        let (r, g, b) = (self.r, self.g, self.b);
        if r == g && g == b {
            if r < 8 {
                16
            } else if r > 248 {
                231
            } else {
                232 + ((r as u16 - 8) * 24 / 247) as u8
            }
        } else {
            let red = (r as u16 * 5 / 255) as u8;
            let green = (g as u16 * 5 / 255) as u8;
            let blue = (b as u16 * 5 / 255) as u8;
            16 + 36 * red + 6 * green + blue
        }
    }

    /// Parses a hex code without the leading `#`.
    fn parse_hex(hex: &str) -> std::result::Result<Self, String> {
        if !hex.is_ascii() {
            return Err(format!("invalid hex color: #{}", hex));
        }
        let digit = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| format!("invalid hex color: #{}", hex))
        };
        match hex.len() {
            // #rgb and #rgba: each digit is doubled
            3 | 4 => {
                let r = digit(&hex[0..1])? * 17;
                let g = digit(&hex[1..2])? * 17;
                let b = digit(&hex[2..3])? * 17;
                let a = if hex.len() == 4 {
                    (digit(&hex[3..4])? * 17) as f64 / 255.0
                } else {
                    1.0
                };
                Ok(Rgba::new(r, g, b).with_alpha(a))
            }
            6 | 8 => {
                let r = digit(&hex[0..2])?;
                let g = digit(&hex[2..4])?;
                let b = digit(&hex[4..6])?;
                let a = if hex.len() == 8 {
                    digit(&hex[6..8])? as f64 / 255.0
                } else {
                    1.0
                };
                Ok(Rgba::new(r, g, b).with_alpha(a))
            }
            _ => Err(format!(
                "invalid hex color: #{} (must be 3, 4, 6 or 8 digits)",
                hex
            )),
        }
    }

    /// Parses the argument list of `rgb(...)` or `rgba(...)`.
    fn parse_functional(inner: &str, with_alpha: bool) -> std::result::Result<Self, String> {
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        let expected = if with_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(format!(
                "expected {} components, got {}",
                expected,
                parts.len()
            ));
        }

        let mut channels = [0u8; 3];
        for (i, part) in parts.iter().take(3).enumerate() {
            let n: u16 = part
                .parse()
                .map_err(|_| format!("channel '{}' is not an integer", part))?;
            if n > 255 {
                return Err(format!("channel {} out of range (0-255): {}", i, n));
            }
            channels[i] = n as u8;
        }

        let alpha = if with_alpha {
            let a: f64 = parts[3]
                .parse()
                .map_err(|_| format!("alpha '{}' is not a number", parts[3]))?;
            if !(0.0..=1.0).contains(&a) {
                return Err(format!("alpha out of range (0-1): {}", a));
            }
            a
        } else {
            1.0
        };

        Ok(Rgba::new(channels[0], channels[1], channels[2]).with_alpha(alpha))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "{}", self.to_hex())
        } else {
            write!(
                f,
                "rgba({}, {}, {}, {})",
                self.r,
                self.g,
                self.b,
                format_alpha(self.a)
            )
        }
    }
}

/// Formats alpha with at most three decimals and no trailing zeros.
fn format_alpha(a: f64) -> String {
    let s = format!("{:.3}", a);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// A resolved palette value: a concrete color or one of the sentinels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorValue {
    Rgba(Rgba),
    /// Explicitly transparent.
    Transparent,
    /// No color at all; consumers emit nothing for it.
    Undefined,
}

impl ColorValue {
    /// Parses a color literal.
    ///
    /// Returns a configuration error when `s` is not a color.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();

        let parsed = if let Some(hex) = lower.strip_prefix('#') {
            Rgba::parse_hex(hex).map(ColorValue::Rgba)
        } else if let Some(inner) = function_args(&lower, "rgba") {
            Rgba::parse_functional(inner, true).map(ColorValue::Rgba)
        } else if let Some(inner) = function_args(&lower, "rgb") {
            Rgba::parse_functional(inner, false).map(ColorValue::Rgba)
        } else {
            match lower.as_str() {
                "transparent" => Ok(ColorValue::Transparent),
                "undefined" | "none" => Ok(ColorValue::Undefined),
                _ => Err("not a color literal".to_string()),
            }
        };

        parsed.map_err(|reason| {
            TinctureError::configuration(format!("'{}' is not a color: {}", trimmed, reason))
        })
    }

    /// Returns true if `s` is written as a color literal rather than a name.
    pub fn is_literal(s: &str) -> bool {
        let lower = s.trim().to_ascii_lowercase();
        lower.starts_with('#')
            || lower.starts_with("rgb(")
            || lower.starts_with("rgba(")
            || matches!(lower.as_str(), "transparent" | "undefined" | "none")
    }

    pub fn as_rgba(&self) -> Option<Rgba> {
        match self {
            ColorValue::Rgba(rgba) => Some(*rgba),
            _ => None,
        }
    }

    /// Returns the concrete color, or a configuration error naming `what`
    /// when this is a sentinel.
    pub fn require_rgba(&self, what: &str) -> Result<Rgba> {
        self.as_rgba().ok_or_else(|| {
            TinctureError::configuration(format!(
                "{} must be a concrete color, got '{}'",
                what, self
            ))
        })
    }

    pub fn is_defined(&self) -> bool {
        !matches!(self, ColorValue::Undefined)
    }
}

impl FromStr for ColorValue {
    type Err = TinctureError;

    fn from_str(s: &str) -> Result<Self> {
        ColorValue::parse(s)
    }
}

fn function_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorValue::Rgba(rgba) => rgba.fmt(f),
            ColorValue::Transparent => write!(f, "transparent"),
            ColorValue::Undefined => write!(f, "undefined"),
        }
    }
}

impl From<Rgba> for ColorValue {
    fn from(rgba: Rgba) -> Self {
        ColorValue::Rgba(rgba)
    }
}

/// A color position in an API call: a literal value or a palette name.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorRef {
    Value(ColorValue),
    Name(String),
}

impl ColorRef {
    /// Parses text input strictly: literals must be well formed.
    pub fn parse(s: &str) -> Result<Self> {
        if ColorValue::is_literal(s) {
            ColorValue::parse(s).map(ColorRef::Value)
        } else if s.trim().is_empty() {
            Err(TinctureError::configuration("color reference must not be empty"))
        } else {
            Ok(ColorRef::Name(s.trim().to_string()))
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            ColorRef::Name(name) => Some(name),
            ColorRef::Value(_) => None,
        }
    }
}

impl fmt::Display for ColorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorRef::Value(value) => value.fmt(f),
            ColorRef::Name(name) => write!(f, "{}", name),
        }
    }
}

/// Lenient conversion: a malformed literal falls back to a name, which then
/// fails lookup with a not-found error naming the input.
impl From<&str> for ColorRef {
    fn from(s: &str) -> Self {
        ColorRef::parse(s).unwrap_or_else(|_| ColorRef::Name(s.to_string()))
    }
}

impl From<String> for ColorRef {
    fn from(s: String) -> Self {
        ColorRef::from(s.as_str())
    }
}

impl From<&String> for ColorRef {
    fn from(s: &String) -> Self {
        ColorRef::from(s.as_str())
    }
}

impl From<ColorValue> for ColorRef {
    fn from(value: ColorValue) -> Self {
        ColorRef::Value(value)
    }
}

impl From<Rgba> for ColorRef {
    fn from(rgba: Rgba) -> Self {
        ColorRef::Value(ColorValue::Rgba(rgba))
    }
}
