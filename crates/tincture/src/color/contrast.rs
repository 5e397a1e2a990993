//! WCAG 2.1 contrast checks.
//!
//! Relative luminance comes from gamma-corrected sRGB channels weighted
//! `0.2126 / 0.7152 / 0.0722`; the contrast ratio of two colors is
//! `(L_lighter + 0.05) / (L_darker + 0.05)` and always lies in 1.0–21.0.
//!
//! | Ratio | [`Rating`] | Outcome when validating |
//! |-------|------------|--------------------------|
//! | ≥ 7.0 | `Aaa` | passes |
//! | ≥ 4.5 | `Aa` | passes |
//! | ≥ 3.0 | `AaLargeText` | passes with a warning (text must be 18px or larger) |
//! | < 3.0 | `Fail` | [`TinctureError::Contrast`] |

use std::fmt;

use super::value::Rgba;
use crate::error::{Result, TinctureError};

/// Convert an sRGB component (0–255) to linear light (0.0–1.0).
fn srgb_to_linear(c: u8) -> f64 {
    let c = c as f64 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of a color per WCAG 2.1, ignoring alpha.
///
/// Returns a value in 0.0 (black) to 1.0 (white).
pub fn relative_luminance(color: Rgba) -> f64 {
    0.2126 * srgb_to_linear(color.r)
        + 0.7152 * srgb_to_linear(color.g)
        + 0.0722 * srgb_to_linear(color.b)
}

/// WCAG contrast ratio between two opaque colors, independent of order.
pub fn contrast_ratio(a: Rgba, b: Rgba) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// WCAG compliance level of a contrast ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rating {
    Fail,
    /// AA for large text (18px and up) only.
    AaLargeText,
    Aa,
    Aaa,
}

impl Rating {
    /// Classifies a ratio. Each boundary belongs to the higher class.
    ///
    /// ```rust
    /// use tincture::Rating;
    ///
    /// assert_eq!(Rating::classify(4.5), Rating::Aa);
    /// assert_eq!(Rating::classify(3.0), Rating::AaLargeText);
    /// assert_eq!(Rating::classify(2.99), Rating::Fail);
    /// ```
    pub fn classify(ratio: f64) -> Self {
        if ratio >= 7.0 {
            Rating::Aaa
        } else if ratio >= 4.5 {
            Rating::Aa
        } else if ratio >= 3.0 {
            Rating::AaLargeText
        } else {
            Rating::Fail
        }
    }

    pub fn passes(&self) -> bool {
        *self != Rating::Fail
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Aaa => write!(f, "AAA"),
            Rating::Aa => write!(f, "AA"),
            Rating::AaLargeText => write!(f, "AA large text only"),
            Rating::Fail => write!(f, "fail"),
        }
    }
}

/// Outcome of measuring a foreground against a background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastReport {
    pub background: Rgba,
    /// The foreground as measured, flattened onto the background.
    pub foreground: Rgba,
    pub ratio: f64,
    pub rating: Rating,
}

/// Flattens a translucent foreground onto an opaque background.
fn flatten(foreground: Rgba, background: Rgba) -> Rgba {
    if foreground.is_opaque() {
        return foreground;
    }
    let alpha = foreground.a;
    let over = |fg: u8, bg: u8| (fg as f64 * alpha + bg as f64 * (1.0 - alpha)).round() as u8;
    Rgba::new(
        over(foreground.r, background.r),
        over(foreground.g, background.g),
        over(foreground.b, background.b),
    )
}

/// Measures a pair without judging it.
pub fn check_contrast(background: Rgba, foreground: Rgba) -> ContrastReport {
    let background = background.with_alpha(1.0);
    let foreground = flatten(foreground, background);
    let ratio = contrast_ratio(background, foreground);
    ContrastReport {
        background,
        foreground,
        ratio,
        rating: Rating::classify(ratio),
    }
}

/// Measures a pair and fails when it is below the 3:1 minimum.
///
/// A large-text-only pass is returned as `Ok`; surfacing the warning is the
/// caller's job.
pub fn validate_contrast(background: Rgba, foreground: Rgba) -> Result<ContrastReport> {
    let report = check_contrast(background, foreground);
    if report.rating == Rating::Fail {
        return Err(TinctureError::Contrast {
            background: report.background.to_string(),
            foreground: report.foreground.to_string(),
            ratio: report.ratio,
        });
    }
    Ok(report)
}
