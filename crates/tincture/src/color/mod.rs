//! Color values, color algebra and contrast measurement.
//!
//! - [`value`]: [`Rgba`], [`ColorValue`] and [`ColorRef`], with literal parsing
//! - [`algebra`]: [`mix`], [`blend`] and [`tone_from_brightness`] over RGB/HSB
//! - [`contrast`]: WCAG luminance, contrast ratio and [`Rating`]
//!
//! Nothing in this module knows about registries. Functions that accept
//! palette names are on [`BuildContext`](crate::BuildContext).

pub mod algebra;
pub mod contrast;
pub mod value;

pub use algebra::{blend, hsb_to_rgb, mix, rgb_to_hsb, tone_from_brightness, Hsb};
pub use contrast::{
    check_contrast, contrast_ratio, relative_luminance, validate_contrast, ContrastReport, Rating,
};
pub use value::{ColorRef, ColorValue, Rgba};
