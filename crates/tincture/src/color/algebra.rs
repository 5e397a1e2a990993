//! Color algebra: mixing and brightness tones.
//!
//! Everything here is pure arithmetic on [`Rgba`] values. The registry-aware
//! forms that accept palette names live on
//! [`PaletteStore`](crate::PaletteStore) and
//! [`BuildContext`](crate::BuildContext).
//!
//! # Mixing
//!
//! [`mix`] interpolates channels linearly in sRGB, the way stylesheet
//! preprocessors do. `percentage` is the distance travelled from the first
//! color toward the second:
//!
//! ```rust
//! use tincture::color::{mix, blend};
//! use tincture::Rgba;
//!
//! assert_eq!(mix(Rgba::WHITE, Rgba::BLACK, 20).to_hex(), "#cccccc");
//! // Palette mix tables read the other way round: 20% black over white.
//! assert_eq!(blend(Rgba::BLACK, Rgba::WHITE, 20), mix(Rgba::WHITE, Rgba::BLACK, 20));
//! ```
//!
//! # Tones
//!
//! [`tone_from_brightness`] keeps hue and saturation and replaces the HSB
//! brightness. Black is special: its hue and saturation carry no
//! information, so for black the brightness is read as density and a higher
//! value gives a darker shade.

use super::value::Rgba;

/// A color in hue/saturation/brightness form.
///
/// `h` is in degrees (0–360), `s` and `b` are fractions (0.0–1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsb {
    pub h: f64,
    pub s: f64,
    pub b: f64,
}

/// Converts an sRGB color to HSB. Alpha is dropped.
pub fn rgb_to_hsb(rgba: Rgba) -> Hsb {
    let r = rgba.r as f64 / 255.0;
    let g = rgba.g as f64 / 255.0;
    let b = rgba.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    let s = if max == 0.0 { 0.0 } else { delta / max };

    Hsb { h, s, b: max }
}

/// Converts HSB back to an opaque sRGB color.
pub fn hsb_to_rgb(hsb: Hsb) -> Rgba {
    let h = hsb.h.rem_euclid(360.0);
    let s = hsb.s.clamp(0.0, 1.0);
    let v = hsb.b.clamp(0.0, 1.0);

    let c = v * s;
    let sector = h / 60.0;
    let x = c * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());

    let (r1, g1, b1) = match sector as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let m = v - c;
    Rgba::new(to_channel(r1 + m), to_channel(g1 + m), to_channel(b1 + m))
}

fn to_channel(fraction: f64) -> u8 {
    (fraction.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Linearly interpolates from `a` toward `b`.
///
/// `percentage` is clamped to 0–100: `0` returns `a`, `100` returns `b`.
/// Channels round to the nearest integer; alpha interpolates unrounded.
pub fn mix(a: Rgba, b: Rgba, percentage: impl Into<f64>) -> Rgba {
    let t = percentage.into().clamp(0.0, 100.0) / 100.0;
    if t <= 0.0 {
        return a;
    }
    if t >= 1.0 {
        return b;
    }

    let lerp = |from: u8, to: u8| {
        let from = from as f64;
        (from + (to as f64 - from) * t).round() as u8
    };

    Rgba {
        r: lerp(a.r, b.r),
        g: lerp(a.g, b.g),
        b: lerp(a.b, b.b),
        a: a.a + (b.a - a.a) * t,
    }
}

/// Lays `percentage`% of `color` over `background`.
///
/// This is the reading used by palette mix tables (`black-20` is 20% black
/// over the page background) and is `mix(background, color, percentage)`.
pub fn blend(color: Rgba, background: Rgba, percentage: impl Into<f64>) -> Rgba {
    mix(background, color, percentage)
}

/// Replaces the HSB brightness of `base` with `brightness` (0–100).
///
/// For pure black the brightness is read as density: the result is a
/// neutral gray at `100 - brightness`% brightness, so increasing the
/// brightness produces a darker shade. Alpha is preserved.
pub fn tone_from_brightness(base: Rgba, brightness: impl Into<f64>) -> Rgba {
    let brightness = brightness.into().clamp(0.0, 100.0) / 100.0;

    if base.is_black() {
        let level = to_channel(1.0 - brightness);
        return Rgba::new(level, level, level).with_alpha(base.a);
    }

    let hsb = rgb_to_hsb(base);
    hsb_to_rgb(Hsb {
        b: brightness,
        ..hsb
    })
    .with_alpha(base.a)
}
