//! The build context: registries, configuration and diagnostics of one build.
//!
//! A build has three phases. Brand tables are loaded first, then components
//! and projects register their own namespaced colors and usecases, and only
//! then are queries made. [`BuildContext`] owns everything a build needs so
//! builds (and tests) never share state.
//!
//! # Example
//!
//! ```rust
//! use tincture::{Brand, BuildContext, ColorOptions, ColorValue, Property, UsecaseOptions};
//!
//! let mut ctx = BuildContext::with_brand(Brand::Core).unwrap();
//! ctx.set_color("o-example/brand", "#0d7680".parse().unwrap(), ColorOptions::new()).unwrap();
//! ctx.set_use_case(
//!     "o-example/stripe",
//!     [(Property::Background, "o-example/brand")],
//!     UsecaseOptions::new(),
//! ).unwrap();
//!
//! let mixed = ctx.mix("white", "black", 20.0).unwrap();
//! assert_eq!(mixed.to_hex(), "#cccccc");
//! ```

use crate::color::{self, ColorRef, ColorValue, ContrastReport, Rating, Rgba};
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::{require_finite, Result, TinctureError};
use crate::name::DEFAULT_NAMESPACE;
use crate::palette::{ColorEntry, ColorOptions, PaletteStore};
use crate::usecase::{UsecaseOptions, UsecaseStore};

/// Text opacity used when a query does not give one.
pub const DEFAULT_TEXT_OPACITY: f64 = 90.0;

/// Build-wide settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextConfig {
    /// Namespace whose entries may be overridden and are stored unprefixed.
    pub default_namespace: String,
    /// Opacity (0–100) used to synthesize text colors when none is given.
    pub default_text_opacity: f64,
}

impl ContextConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = namespace.into();
        self
    }

    pub fn with_default_text_opacity(mut self, opacity: f64) -> Self {
        self.default_text_opacity = opacity;
        self
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            default_text_opacity: DEFAULT_TEXT_OPACITY,
        }
    }
}

/// Registries and diagnostics for a single build.
#[derive(Debug, Clone)]
pub struct BuildContext {
    config: ContextConfig,
    pub(crate) palette: PaletteStore,
    pub(crate) usecases: UsecaseStore,
    diagnostics: Diagnostics,
}

impl BuildContext {
    /// Creates an empty context with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ContextConfig::default())
    }

    /// Creates an empty context.
    pub fn with_config(config: ContextConfig) -> Self {
        Self {
            palette: PaletteStore::new(config.default_namespace.clone()),
            usecases: UsecaseStore::new(config.default_namespace.clone()),
            diagnostics: Diagnostics::new(),
            config,
        }
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn palette(&self) -> &PaletteStore {
        &self.palette
    }

    pub fn usecases(&self) -> &UsecaseStore {
        &self.usecases
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Warnings recorded so far.
    pub fn warnings(&self) -> Vec<Warning> {
        self.diagnostics.warnings()
    }

    /// Removes and returns the warnings recorded so far.
    pub fn take_warnings(&self) -> Vec<Warning> {
        self.diagnostics.take()
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers a palette color. See [`PaletteStore::set_color`].
    pub fn set_color(&mut self, name: &str, value: ColorValue, options: ColorOptions) -> Result<()> {
        self.palette.set_color(name, value, options)
    }

    /// Registers or extends a usecase. See [`UsecaseStore::set_use_case`].
    pub fn set_use_case<I, K, V>(&mut self, name: &str, colors: I, options: UsecaseOptions) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<ColorRef>,
    {
        self.usecases
            .set_use_case(name, colors, options, &self.palette)
    }

    /// Registers brightness tones of a palette color.
    ///
    /// Each tone is registered as `<namespace>/<identifier>-<brightness>`,
    /// e.g. `o-colors/teal-40`. The call is atomic: either every tone is
    /// registered or none is. Returns the registered names.
    ///
    /// # Errors
    ///
    /// - [`TinctureError::NotFound`] if the color does not exist
    /// - [`TinctureError::Configuration`] if the color does not allow tones or
    ///   is not a concrete color
    /// - [`TinctureError::OverrideConflict`] if a tone name is taken in a
    ///   non-default namespace
    pub fn set_tones(&mut self, color: &str, brightnesses: &[f64]) -> Result<Vec<String>> {
        let base = self.table_base(color)?;
        if !base.allow_tones {
            return Err(TinctureError::configuration(format!(
                "color '{}' does not allow tones",
                base.name
            )));
        }
        let rgba = base.value.require_rgba(&format!("color '{}'", base.name))?;

        let tones = brightnesses
            .iter()
            .map(|&brightness| {
                let brightness = require_finite(brightness, "tone brightness")?;
                Ok((
                    format!("{}-{}", base.name, brightness),
                    color::tone_from_brightness(rgba, brightness),
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        self.register_table(tones)
    }

    /// Registers mixes of a palette color over a background.
    ///
    /// Each mix is `percentage`% of `color` over `background`, registered as
    /// `<namespace>/<identifier>-<percentage>`, e.g. `o-colors/black-20`.
    /// Atomic like [`set_tones`](Self::set_tones). Returns the registered
    /// names.
    pub fn set_mixes(
        &mut self,
        color: &str,
        background: impl Into<ColorRef>,
        percentages: &[f64],
    ) -> Result<Vec<String>> {
        let base = self.table_base(color)?;
        let rgba = base.value.require_rgba(&format!("color '{}'", base.name))?;
        let background = self.palette.resolve_rgba(&background.into())?;

        let mixes = percentages
            .iter()
            .map(|&percentage| {
                let percentage = require_finite(percentage, "mix percentage")?;
                Ok((
                    format!("{}-{}", base.name, percentage),
                    color::blend(rgba, background, percentage),
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        self.register_table(mixes)
    }

    fn table_base(&self, color: &str) -> Result<ColorEntry> {
        self.palette
            .entry(color)
            .cloned()
            .ok_or_else(|| TinctureError::color_not_found(color))
    }

    fn register_table(&mut self, colors: Vec<(String, Rgba)>) -> Result<Vec<String>> {
        let mut staged = self.palette.clone();
        let mut names = Vec::with_capacity(colors.len());
        for (name, value) in colors {
            staged.set_color(&name, value.into(), ColorOptions::new())?;
            names.push(name);
        }
        self.palette = staged;
        Ok(names)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns a palette value, recording a warning if it is deprecated.
    pub fn get_by_name(&self, name: &str) -> Result<ColorValue> {
        let entry = self
            .palette
            .entry(name)
            .ok_or_else(|| TinctureError::color_not_found(name))?;
        if let Some(message) = &entry.deprecated {
            self.diagnostics.record(Warning::DeprecatedColor {
                name: entry.name.to_string(),
                message: message.clone(),
            });
        }
        Ok(entry.value)
    }

    /// Resolves a reference, recording deprecation warnings for names.
    pub fn resolve_ref(&self, color: &ColorRef) -> Result<ColorValue> {
        match color {
            ColorRef::Value(value) => Ok(*value),
            ColorRef::Name(name) => self.get_by_name(name),
        }
    }

    fn resolve_rgba(&self, color: &ColorRef) -> Result<Rgba> {
        self.resolve_ref(color)?
            .require_rgba(&format!("color '{}'", color))
    }

    /// Mixes `a` toward `b` by `percentage` (0 = `a`, 100 = `b`).
    ///
    /// Either side may be a literal or a palette name. The result is not
    /// registered. Out-of-range percentages are clamped; NaN and infinities
    /// are a [`TinctureError::Configuration`].
    pub fn mix(&self, a: impl Into<ColorRef>, b: impl Into<ColorRef>, percentage: f64) -> Result<Rgba> {
        let percentage = require_finite(percentage, "mix percentage")?;
        Ok(color::mix(
            self.resolve_rgba(&a.into())?,
            self.resolve_rgba(&b.into())?,
            percentage,
        ))
    }

    /// Lays `percentage`% of `color` over `background`.
    pub fn blend(
        &self,
        color: impl Into<ColorRef>,
        background: impl Into<ColorRef>,
        percentage: f64,
    ) -> Result<Rgba> {
        let percentage = require_finite(percentage, "blend percentage")?;
        Ok(color::blend(
            self.resolve_rgba(&color.into())?,
            self.resolve_rgba(&background.into())?,
            percentage,
        ))
    }

    /// Computes a brightness tone (0–100) of a literal or palette color.
    pub fn tone(&self, base: impl Into<ColorRef>, brightness: f64) -> Result<Rgba> {
        let brightness = require_finite(brightness, "tone brightness")?;
        Ok(color::tone_from_brightness(
            self.resolve_rgba(&base.into())?,
            brightness,
        ))
    }

    /// Measures contrast without judging it.
    pub fn check_contrast(
        &self,
        background: impl Into<ColorRef>,
        foreground: impl Into<ColorRef>,
    ) -> Result<ContrastReport> {
        Ok(color::check_contrast(
            self.resolve_rgba(&background.into())?,
            self.resolve_rgba(&foreground.into())?,
        ))
    }

    /// Validates contrast: fails below 3:1 and records a warning for a
    /// large-text-only pass.
    pub fn validate_contrast(
        &self,
        background: impl Into<ColorRef>,
        foreground: impl Into<ColorRef>,
    ) -> Result<ContrastReport> {
        let report = color::validate_contrast(
            self.resolve_rgba(&background.into())?,
            self.resolve_rgba(&foreground.into())?,
        )?;
        if report.rating == Rating::AaLargeText {
            self.diagnostics.record(Warning::LargeTextOnly {
                background: report.background.to_string(),
                foreground: report.foreground.to_string(),
                ratio: report.ratio,
            });
        }
        Ok(report)
    }
}

impl Default for BuildContext {
    fn default() -> Self {
        Self::new()
    }
}
