//! Usecase resolution and text color synthesis.
//!
//! Queries take a preference list of usecase names. The list is searched in
//! order and the first usecase that defines the requested property wins;
//! later entries are never consulted. Names are checked as the search reaches
//! them, so an unknown usecase after the winning one is not reported.
//!
//! ```rust
//! use tincture::{Brand, BuildContext, ColorValue, Property, ResolveOptions};
//!
//! let ctx = BuildContext::with_brand(Brand::Core).unwrap();
//! let page = ctx
//!     .resolve_color_for(&["page"], Property::Background, &ResolveOptions::new())
//!     .unwrap();
//! assert_eq!(page.value.to_string(), "#fff1e5");
//!
//! let set = ctx.resolve_for(&["page"], None, None).unwrap();
//! assert!(set.text_synthesized);
//! ```

use crate::color::{self, ColorRef, ColorValue, ContrastReport, Rating, Rgba};
use crate::context::BuildContext;
use crate::diagnostics::Warning;
use crate::error::{Result, TinctureError};
use crate::usecase::Property;

/// Brightness midpoint above which a background counts as light.
const BRIGHTNESS_MIDPOINT: f64 = 128.0;

/// Options for [`BuildContext::resolve_color_for`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveOptions {
    /// Returned when no usecase defines the property. A palette name or a
    /// sentinel literal such as `undefined`.
    pub default: Option<ColorRef>,
}

impl ResolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_to(mut self, color: impl Into<ColorRef>) -> Self {
        self.default = Some(color.into());
        self
    }
}

/// A color produced by a query.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColor {
    pub value: ColorValue,
    /// Qualified name of the usecase that supplied the color. `None` when a
    /// default was used or the color was synthesized.
    pub usecase: Option<String>,
}

/// The result of resolving several properties at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedSet {
    pub background: Option<ResolvedColor>,
    pub border: Option<ResolvedColor>,
    pub text: Option<ResolvedColor>,
    pub outline: Option<ResolvedColor>,
    /// Whether `text` was computed from the background.
    pub text_synthesized: bool,
    /// Contrast of the synthesized text against the background.
    pub text_contrast: Option<ContrastReport>,
}

impl ResolvedSet {
    pub fn get(&self, property: Property) -> Option<&ResolvedColor> {
        match property {
            Property::Background => self.background.as_ref(),
            Property::Border => self.border.as_ref(),
            Property::Text => self.text.as_ref(),
            Property::Outline => self.outline.as_ref(),
        }
    }

    fn slot(&mut self, property: Property) -> &mut Option<ResolvedColor> {
        match property {
            Property::Background => &mut self.background,
            Property::Border => &mut self.border,
            Property::Text => &mut self.text,
            Property::Outline => &mut self.outline,
        }
    }

    /// Resolved properties in [`Property::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Property, &ResolvedColor)> {
        Property::ALL
            .into_iter()
            .filter_map(move |property| self.get(property).map(|color| (property, color)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// A synthesized text color and its measured contrast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextColor {
    pub value: Rgba,
    pub contrast: ContrastReport,
}

/// Perceived brightness (0–255) of a color.
fn perceived_brightness(color: Rgba) -> f64 {
    (299.0 * color.r as f64 + 587.0 * color.g as f64 + 114.0 * color.b as f64) / 1000.0
}

impl BuildContext {
    /// Resolves one property against a usecase preference list.
    ///
    /// Returns the color of the first usecase defining `property`. With no
    /// match, returns `options.default` or `transparent`. Never synthesizes
    /// text.
    ///
    /// # Errors
    ///
    /// - [`TinctureError::NotFound`] for an unknown usecase reached by the
    ///   search, or an unknown palette name in the default
    pub fn resolve_color_for<U: AsRef<str>>(
        &self,
        usecases: &[U],
        property: Property,
        options: &ResolveOptions,
    ) -> Result<ResolvedColor> {
        if let Some(found) = self.find(usecases, property)? {
            return Ok(found);
        }
        let value = match &options.default {
            Some(default) => self.resolve_ref(default)?,
            None => ColorValue::Transparent,
        };
        Ok(ResolvedColor {
            value,
            usecase: None,
        })
    }

    /// Resolves background, border and text from the first usecase defining
    /// any of them.
    ///
    /// Returns an empty set when no usecase in the list defines one.
    pub fn resolve_all_for<U: AsRef<str>>(&self, usecases: &[U]) -> Result<ResolvedSet> {
        let mut set = ResolvedSet::default();
        for name in usecases {
            let entry = self
                .usecases
                .get_use_case(name.as_ref())
                .ok_or_else(|| TinctureError::usecase_not_found(name.as_ref()))?;
            if !Property::COLOR_SET
                .iter()
                .any(|property| entry.color(*property).is_some())
            {
                continue;
            }
            let usecase = name.as_ref();
            for property in Property::COLOR_SET {
                *set.slot(property) = self.find(&[usecase], property)?;
            }
            return Ok(set);
        }
        Ok(set)
    }

    /// Resolves several properties, synthesizing text when needed.
    ///
    /// `properties` defaults to background, border and text. A text color
    /// defined by a usecase always wins. Otherwise, if text was requested and
    /// an opaque background was found, text is synthesized with
    /// [`get_text_color`](Self::get_text_color) at `text_opacity` (or the
    /// configured default).
    ///
    /// # Errors
    ///
    /// Everything [`resolve_color_for`](Self::resolve_color_for) and
    /// [`get_text_color`](Self::get_text_color) can return.
    pub fn resolve_for<U: AsRef<str>>(
        &self,
        usecases: &[U],
        properties: Option<&[Property]>,
        text_opacity: Option<f64>,
    ) -> Result<ResolvedSet> {
        let properties = properties.unwrap_or(&Property::COLOR_SET[..]);
        let mut set = ResolvedSet::default();

        for &property in properties {
            *set.slot(property) = self.find(usecases, property)?;
        }

        if !properties.contains(&Property::Text) || set.text.is_some() {
            return Ok(set);
        }
        let background = if properties.contains(&Property::Background) {
            set.background.as_ref().and_then(|bg| bg.value.as_rgba())
        } else {
            self.find(usecases, Property::Background)?
                .and_then(|bg| bg.value.as_rgba())
        };
        let Some(background) = background.filter(Rgba::is_opaque) else {
            return Ok(set);
        };

        let opacity = text_opacity.unwrap_or(self.config().default_text_opacity);
        let text = self.get_text_color(background, opacity)?;
        set.text = Some(ResolvedColor {
            value: text.value.into(),
            usecase: None,
        });
        set.text_synthesized = true;
        set.text_contrast = Some(text.contrast);
        Ok(set)
    }

    /// Synthesizes a text color for `background` at `opacity` percent.
    ///
    /// Light backgrounds get black text, dark ones white, blended toward the
    /// background by `100 - opacity`. The pair is validated: a failing ratio
    /// is an error and a large-text-only pass records a warning.
    ///
    /// # Errors
    ///
    /// - [`TinctureError::Configuration`] if `opacity` is outside 0–100 or the
    ///   background is not a concrete color
    /// - [`TinctureError::Contrast`] if the result is below 3:1
    pub fn get_text_color(&self, background: impl Into<ColorRef>, opacity: f64) -> Result<TextColor> {
        if !(0.0..=100.0).contains(&opacity) {
            return Err(TinctureError::configuration(format!(
                "text opacity must be between 0 and 100, got {}",
                opacity
            )));
        }
        let background = background.into();
        let background = self
            .resolve_ref(&background)?
            .require_rgba(&format!("background '{}'", background))?;

        let base = if perceived_brightness(background) > BRIGHTNESS_MIDPOINT {
            Rgba::BLACK
        } else {
            Rgba::WHITE
        };
        let value = color::mix(base, background, 100.0 - opacity);
        let contrast = color::validate_contrast(background, value)?;

        tracing::debug!(
            background = %background,
            text = %value,
            ratio = contrast.ratio,
            "synthesized text color"
        );
        if contrast.rating == Rating::AaLargeText {
            self.diagnostics().record(Warning::LargeTextOnly {
                background: contrast.background.to_string(),
                foreground: contrast.foreground.to_string(),
                ratio: contrast.ratio,
            });
        }
        Ok(TextColor { value, contrast })
    }

    fn find<U: AsRef<str>>(&self, usecases: &[U], property: Property) -> Result<Option<ResolvedColor>> {
        for name in usecases {
            let entry = self
                .usecases
                .get_use_case(name.as_ref())
                .ok_or_else(|| TinctureError::usecase_not_found(name.as_ref()))?;
            let Some(color) = entry.color(property) else {
                continue;
            };
            if let Some(message) = entry.deprecation_for(property) {
                self.diagnostics().record(Warning::DeprecatedUsecase {
                    name: entry.name.to_string(),
                    property,
                    message: message.to_string(),
                });
            }
            return Ok(Some(ResolvedColor {
                value: self.resolve_ref(color)?,
                usecase: Some(entry.name.to_string()),
            }));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EntryKind;
    use crate::palette::ColorOptions;
    use crate::usecase::UsecaseOptions;

    fn context() -> BuildContext {
        let mut ctx = BuildContext::new();
        for (name, value) in [
            ("o-colors/black", Rgba::BLACK),
            ("o-colors/white", Rgba::WHITE),
            ("o-colors/paper", Rgba::new(255, 241, 229)),
            ("o-colors/teal", Rgba::new(13, 118, 128)),
            ("o-colors/claret", Rgba::new(153, 15, 61)),
            ("o-colors/slate", Rgba::new(38, 42, 51)),
        ] {
            ctx.set_color(name, value.into(), ColorOptions::new()).unwrap();
        }
        ctx.set_color(
            "o-colors/nothing",
            ColorValue::Undefined,
            ColorOptions::new(),
        )
        .unwrap();
        ctx.set_use_case("o-colors/page", [("background", "paper")], UsecaseOptions::new())
            .unwrap();
        ctx.set_use_case("o-colors/plain", [("outline", "teal")], UsecaseOptions::new())
            .unwrap();
        ctx.set_use_case(
            "o-colors/link",
            [("text", "teal"), ("border", "claret")],
            UsecaseOptions::new(),
        )
        .unwrap();
        ctx.set_use_case(
            "o-colors/hidden",
            [("background", "transparent")],
            UsecaseOptions::new(),
        )
        .unwrap();
        ctx
    }

    // =========================================================================
    // resolve_color_for
    // =========================================================================

    #[test]
    fn test_first_usecase_wins() {
        let ctx = context();
        let resolved = ctx
            .resolve_color_for(&["page", "hidden"], Property::Background, &ResolveOptions::new())
            .unwrap();
        assert_eq!(resolved.value, ColorValue::Rgba(Rgba::new(255, 241, 229)));
        assert_eq!(resolved.usecase.as_deref(), Some("o-colors/page"));
    }

    #[test]
    fn test_falls_back_to_later_usecase() {
        let ctx = context();
        let resolved = ctx
            .resolve_color_for(&["link", "page"], Property::Background, &ResolveOptions::new())
            .unwrap();
        assert_eq!(resolved.usecase.as_deref(), Some("o-colors/page"));
    }

    #[test]
    fn test_no_match_is_transparent() {
        let ctx = context();
        let resolved = ctx
            .resolve_color_for(&["page"], Property::Border, &ResolveOptions::new())
            .unwrap();
        assert_eq!(resolved.value, ColorValue::Transparent);
        assert_eq!(resolved.usecase, None);
    }

    #[test]
    fn test_no_match_uses_given_default() {
        let ctx = context();
        let sentinel = ctx
            .resolve_color_for(
                &["page"],
                Property::Border,
                &ResolveOptions::new().default_to(ColorValue::Undefined),
            )
            .unwrap();
        assert_eq!(sentinel.value, ColorValue::Undefined);

        let named = ctx
            .resolve_color_for(
                &["page"],
                Property::Border,
                &ResolveOptions::new().default_to("claret"),
            )
            .unwrap();
        assert_eq!(named.value, ColorValue::Rgba(Rgba::new(153, 15, 61)));
    }

    #[test]
    fn test_unknown_usecase_is_not_found() {
        let err = context()
            .resolve_color_for(&["ghost"], Property::Background, &ResolveOptions::new())
            .unwrap_err();
        assert!(matches!(
            err,
            TinctureError::NotFound {
                kind: EntryKind::Usecase,
                ..
            }
        ));
    }

    #[test]
    fn test_search_stops_at_first_match() {
        let ctx = context();
        let resolved = ctx
            .resolve_color_for(&["page", "ghost"], Property::Background, &ResolveOptions::new())
            .unwrap();
        assert_eq!(resolved.usecase.as_deref(), Some("o-colors/page"));
    }

    #[test]
    fn test_resolve_color_for_never_synthesizes_text() {
        let ctx = context();
        let resolved = ctx
            .resolve_color_for(&["page"], Property::Text, &ResolveOptions::new())
            .unwrap();
        assert_eq!(resolved.value, ColorValue::Transparent);
    }

    #[test]
    fn test_deprecated_property_records_warning() {
        let mut ctx = context();
        ctx.set_use_case(
            "o-colors/old-link",
            [("text", "claret")],
            UsecaseOptions::new().deprecate_property(Property::Text, "use link"),
        )
        .unwrap();
        ctx.resolve_color_for(&["old-link"], Property::Text, &ResolveOptions::new())
            .unwrap();
        assert_eq!(
            ctx.take_warnings(),
            vec![Warning::DeprecatedUsecase {
                name: "o-colors/old-link".to_string(),
                property: Property::Text,
                message: "use link".to_string(),
            }]
        );
    }

    // =========================================================================
    // resolve_all_for
    // =========================================================================

    #[test]
    fn test_all_takes_first_usecase_with_any_color() {
        let ctx = context();
        let set = ctx.resolve_all_for(&["plain", "link", "page"]).unwrap();
        assert_eq!(set.background, None);
        assert_eq!(
            set.text.as_ref().map(|c| c.value),
            Some(ColorValue::Rgba(Rgba::new(13, 118, 128)))
        );
        assert!(set.border.is_some());
        assert!(set.outline.is_none());
    }

    #[test]
    fn test_all_with_no_colors_is_empty() {
        let set = context().resolve_all_for(&["plain"]).unwrap();
        assert!(set.is_empty());
    }

    // =========================================================================
    // resolve_for
    // =========================================================================

    #[test]
    fn test_synthesizes_text_on_opaque_background() {
        let ctx = context();
        let set = ctx.resolve_for(&["page"], None, None).unwrap();
        assert!(set.text_synthesized);
        // 90% black over paper.
        assert_eq!(
            set.text.as_ref().map(|c| c.value.to_string()).as_deref(),
            Some("#1a1817")
        );
        assert_eq!(set.text_contrast.map(|c| c.rating), Some(Rating::Aaa));
        assert_eq!(set.border, None);
    }

    #[test]
    fn test_explicit_text_wins() {
        let ctx = context();
        let set = ctx.resolve_for(&["link", "page"], None, Some(5.0)).unwrap();
        assert!(!set.text_synthesized);
        assert_eq!(
            set.text.as_ref().and_then(|c| c.usecase.as_deref()),
            Some("o-colors/link")
        );
    }

    #[test]
    fn test_transparent_background_skips_synthesis() {
        let set = context().resolve_for(&["hidden"], None, None).unwrap();
        assert!(!set.text_synthesized);
        assert_eq!(set.text, None);
    }

    #[test]
    fn test_translucent_background_skips_synthesis() {
        let mut ctx = context();
        ctx.set_use_case(
            "o-colors/overlay",
            [("background", "rgba(0, 0, 0, 0.5)")],
            UsecaseOptions::new(),
        )
        .unwrap();

        let set = ctx.resolve_for(&["overlay"], None, None).unwrap();
        assert_eq!(
            set.background.as_ref().map(|bg| bg.value.to_string()),
            Some(ColorValue::parse("rgba(0, 0, 0, 0.5)").unwrap().to_string())
        );
        assert!(!set.text_synthesized);
        assert_eq!(set.text, None);
        assert!(set.text_contrast.is_none());
    }

    #[test]
    fn test_text_only_request_still_synthesizes() {
        let ctx = context();
        let set = ctx
            .resolve_for(&["page"], Some(&[Property::Text]), None)
            .unwrap();
        assert!(set.text_synthesized);
        assert_eq!(set.background, None);
    }

    #[test]
    fn test_no_text_requested_no_synthesis() {
        let ctx = context();
        let set = ctx
            .resolve_for(&["page"], Some(&[Property::Background]), None)
            .unwrap();
        assert!(!set.text_synthesized);
        assert_eq!(set.text, None);
    }

    #[test]
    fn test_low_opacity_fails_contrast() {
        let err = context().resolve_for(&["page"], None, Some(10.0)).unwrap_err();
        assert!(matches!(err, TinctureError::Contrast { .. }));
    }

    // =========================================================================
    // get_text_color
    // =========================================================================

    #[test]
    fn test_dark_background_gets_white_text() {
        let ctx = context();
        let text = ctx.get_text_color("slate", 100.0).unwrap();
        assert_eq!(text.value, Rgba::WHITE);
    }

    #[test]
    fn test_light_background_gets_black_text() {
        let ctx = context();
        let text = ctx.get_text_color("white", 100.0).unwrap();
        assert_eq!(text.value, Rgba::BLACK);
        assert_eq!(text.contrast.rating, Rating::Aaa);
        assert!(ctx.warnings().is_empty());
    }

    #[test]
    fn test_teal_tint_is_large_text_only() {
        let ctx = context();
        let text = ctx.get_text_color("teal", 80.0).unwrap();
        assert_eq!(text.value.to_hex(), "#cfe4e6");
        assert_eq!(text.contrast.rating, Rating::AaLargeText);
        assert!(matches!(
            ctx.warnings().as_slice(),
            [Warning::LargeTextOnly { .. }]
        ));
    }

    #[test]
    fn test_opacity_out_of_range() {
        let ctx = context();
        for opacity in [-1.0, 100.5, f64::NAN] {
            let err = ctx.get_text_color("paper", opacity).unwrap_err();
            assert!(matches!(err, TinctureError::Configuration { .. }));
        }
    }

    #[test]
    fn test_sentinel_background_is_rejected() {
        let err = context().get_text_color("nothing", 90.0).unwrap_err();
        assert!(matches!(err, TinctureError::Configuration { .. }));
    }

    #[test]
    fn test_perceived_brightness_midpoint() {
        assert_eq!(perceived_brightness(Rgba::WHITE), 255.0);
        assert_eq!(perceived_brightness(Rgba::BLACK), 0.0);
        // Teal sits well below the midpoint.
        assert!(perceived_brightness(Rgba::new(13, 118, 128)) < BRIGHTNESS_MIDPOINT);
    }
}
