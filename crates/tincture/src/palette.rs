//! The palette registry: named colors.
//!
//! A [`PaletteStore`] maps namespaced names to [`ColorEntry`] values. The
//! override policy depends on who owns the name:
//!
//! | Existing entry | Same value | Different value |
//! |----------------|------------|-----------------|
//! | none | stored | stored |
//! | default namespace | no-op | overwritten (user customisation) |
//! | any other namespace | no-op | [`OverrideConflict`](TinctureError::OverrideConflict) |
//!
//! Default-namespace entries are stored under their bare identifier, so
//! `"paper"` and `"o-colors/paper"` are the same lookup.
//!
//! # Example
//!
//! ```rust
//! use tincture::{ColorOptions, ColorValue, PaletteStore, Rgba};
//!
//! let mut palette = PaletteStore::new("o-colors");
//! let teal = ColorValue::Rgba(Rgba::new(13, 118, 128));
//!
//! palette.set_color("o-colors/teal", teal, ColorOptions::new().allow_tones()).unwrap();
//! // Identical re-registration is harmless.
//! palette.set_color("o-colors/teal", teal, ColorOptions::new()).unwrap();
//!
//! assert_eq!(palette.get_by_name("teal").unwrap(), &teal);
//! assert!(palette.exists("o-colors/teal"));
//! ```

use std::collections::BTreeMap;

use crate::color::{self, ColorRef, ColorValue, Rgba};
use crate::error::{require_finite, EntryKind, Result, TinctureError};
use crate::name::{lookup_key, QualifiedName};

/// Options for [`PaletteStore::set_color`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorOptions {
    /// Deprecation message reported whenever the color is resolved.
    pub deprecated: Option<String>,
    /// Whether brightness tones may be generated from this color.
    pub allow_tones: bool,
}

impl ColorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deprecated(mut self, message: impl Into<String>) -> Self {
        self.deprecated = Some(message.into());
        self
    }

    pub fn allow_tones(mut self) -> Self {
        self.allow_tones = true;
        self
    }
}

/// A registered palette color.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorEntry {
    pub name: QualifiedName,
    pub value: ColorValue,
    pub deprecated: Option<String>,
    pub allow_tones: bool,
}

/// Registry of named colors for one build.
#[derive(Debug, Clone)]
pub struct PaletteStore {
    default_namespace: String,
    entries: BTreeMap<String, ColorEntry>,
}

impl PaletteStore {
    /// Creates an empty palette whose default namespace is `default_namespace`.
    pub fn new(default_namespace: impl Into<String>) -> Self {
        Self {
            default_namespace: default_namespace.into(),
            entries: BTreeMap::new(),
        }
    }

    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    /// Registers a color.
    ///
    /// # Errors
    ///
    /// - [`TinctureError::Configuration`] if `name` is not `namespace/identifier`,
    ///   or is a default-namespace name whose bare identifier reads as a color
    ///   literal (`none`, `transparent`, `undefined`)
    /// - [`TinctureError::OverrideConflict`] if a non-default-namespace color
    ///   already exists with a different value
    pub fn set_color(&mut self, name: &str, value: ColorValue, options: ColorOptions) -> Result<()> {
        let name = QualifiedName::parse(name)?;
        if name.is_default(&self.default_namespace) && ColorValue::is_literal(name.identifier()) {
            return Err(TinctureError::configuration(format!(
                "'{}' would be read as a color literal when referenced as '{}'",
                name,
                name.identifier()
            )));
        }
        let key = name.storage_key(&self.default_namespace);

        if let Some(existing) = self.entries.get(&key) {
            if existing.value == value {
                return Ok(());
            }
            if !name.is_default(&self.default_namespace) {
                return Err(TinctureError::OverrideConflict {
                    kind: EntryKind::Color,
                    name: name.to_string(),
                    existing: existing.value.to_string(),
                    attempted: value.to_string(),
                });
            }
            tracing::debug!(
                color = %name,
                from = %existing.value,
                to = %value,
                "overriding default color"
            );
        }

        self.entries.insert(
            key,
            ColorEntry {
                name,
                value,
                deprecated: options.deprecated,
                allow_tones: options.allow_tones,
            },
        );
        Ok(())
    }

    /// Returns the value registered under `name`.
    ///
    /// # Errors
    ///
    /// [`TinctureError::NotFound`] if no such color exists.
    pub fn get_by_name(&self, name: &str) -> Result<&ColorValue> {
        self.entry(name)
            .map(|entry| &entry.value)
            .ok_or_else(|| TinctureError::color_not_found(name))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    pub fn entry(&self, name: &str) -> Option<&ColorEntry> {
        self.entries.get(&lookup_key(name, &self.default_namespace))
    }

    /// Resolves a reference: literals pass through, names are looked up.
    pub fn resolve_ref(&self, color: &ColorRef) -> Result<ColorValue> {
        match color {
            ColorRef::Value(value) => Ok(*value),
            ColorRef::Name(name) => self.get_by_name(name).copied(),
        }
    }

    /// Resolves a reference that must be a concrete color.
    pub fn resolve_rgba(&self, color: &ColorRef) -> Result<Rgba> {
        self.resolve_ref(color)?
            .require_rgba(&format!("color '{}'", color))
    }

    /// Mixes two colors given as literals or palette names.
    ///
    /// The result is not registered.
    pub fn mix(&self, a: &ColorRef, b: &ColorRef, percentage: f64) -> Result<Rgba> {
        let percentage = require_finite(percentage, "mix percentage")?;
        Ok(color::mix(
            self.resolve_rgba(a)?,
            self.resolve_rgba(b)?,
            percentage,
        ))
    }

    /// Computes a brightness tone of a literal or palette color.
    ///
    /// The result is not registered.
    pub fn tone(&self, base: &ColorRef, brightness: f64) -> Result<Rgba> {
        let brightness = require_finite(brightness, "tone brightness")?;
        Ok(color::tone_from_brightness(
            self.resolve_rgba(base)?,
            brightness,
        ))
    }

    /// Iterates entries in storage-key order.
    pub fn iter(&self) -> impl Iterator<Item = &ColorEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teal() -> ColorValue {
        ColorValue::Rgba(Rgba::new(13, 118, 128))
    }

    fn claret() -> ColorValue {
        ColorValue::Rgba(Rgba::new(153, 15, 61))
    }

    fn palette() -> PaletteStore {
        PaletteStore::new("o-colors")
    }

    #[test]
    fn test_set_and_get() {
        let mut palette = palette();
        palette
            .set_color("o-colors/teal", teal(), ColorOptions::new())
            .unwrap();
        assert_eq!(palette.get_by_name("o-colors/teal").unwrap(), &teal());
        assert_eq!(palette.get_by_name("teal").unwrap(), &teal());
        assert_eq!(palette.len(), 1);
    }

    #[test]
    fn test_default_namespace_is_stripped() {
        let mut palette = palette();
        palette
            .set_color("o-colors/teal", teal(), ColorOptions::new())
            .unwrap();
        let entry = palette.entry("teal").unwrap();
        assert_eq!(entry.name.to_string(), "o-colors/teal");
        assert!(!palette.exists("o-example/teal"));
    }

    #[test]
    fn test_custom_namespace_keeps_full_name() {
        let mut palette = palette();
        palette
            .set_color("o-example/brand", teal(), ColorOptions::new())
            .unwrap();
        assert!(palette.exists("o-example/brand"));
        assert!(!palette.exists("brand"));
    }

    #[test]
    fn test_rejects_unnamespaced_name() {
        let mut palette = palette();
        let err = palette
            .set_color("teal", teal(), ColorOptions::new())
            .unwrap_err();
        assert!(matches!(err, TinctureError::Configuration { .. }));
        assert!(palette.is_empty());
    }

    #[test]
    fn test_identical_reregistration_is_noop() {
        let mut palette = palette();
        palette
            .set_color("o-example/brand", teal(), ColorOptions::new().deprecated("old"))
            .unwrap();
        palette
            .set_color("o-example/brand", teal(), ColorOptions::new())
            .unwrap();
        // The first registration's options survive.
        assert_eq!(
            palette.entry("o-example/brand").unwrap().deprecated.as_deref(),
            Some("old")
        );
    }

    #[test]
    fn test_default_namespace_can_be_overridden() {
        let mut palette = palette();
        palette
            .set_color("o-colors/teal", teal(), ColorOptions::new())
            .unwrap();
        palette
            .set_color("o-colors/teal", claret(), ColorOptions::new())
            .unwrap();
        assert_eq!(palette.get_by_name("teal").unwrap(), &claret());
    }

    #[test]
    fn test_custom_namespace_conflict() {
        let mut palette = palette();
        palette
            .set_color("o-example/brand", teal(), ColorOptions::new())
            .unwrap();
        let err = palette
            .set_color("o-example/brand", claret(), ColorOptions::new())
            .unwrap_err();
        assert!(matches!(err, TinctureError::OverrideConflict { .. }));
        assert_eq!(palette.get_by_name("o-example/brand").unwrap(), &teal());
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let err = palette().get_by_name("teal").unwrap_err();
        assert!(matches!(
            err,
            TinctureError::NotFound {
                kind: EntryKind::Color,
                ..
            }
        ));
    }

    #[test]
    fn test_sentinel_values_are_storable() {
        let mut palette = palette();
        palette
            .set_color("o-colors/unset", ColorValue::Undefined, ColorOptions::new())
            .unwrap();
        assert_eq!(palette.get_by_name("unset").unwrap(), &ColorValue::Undefined);
    }

    #[test]
    fn test_rejects_literal_identifier_in_default_namespace() {
        let mut palette = palette();
        for name in ["o-colors/none", "o-colors/Transparent", "o-colors/undefined"] {
            let err = palette
                .set_color(name, teal(), ColorOptions::new())
                .unwrap_err();
            assert!(matches!(err, TinctureError::Configuration { .. }), "{}", name);
        }
        assert!(palette.is_empty());

        // Qualified references stay unambiguous outside the default namespace.
        palette
            .set_color("o-example/none", teal(), ColorOptions::new())
            .unwrap();
        assert!(palette.exists("o-example/none"));
    }

    #[test]
    fn test_default_namespace_cannot_shadow_component_color() {
        let mut palette = palette();
        palette
            .set_color("o-example/brand", teal(), ColorOptions::new())
            .unwrap();
        let err = palette
            .set_color("o-colors/o-example/brand", claret(), ColorOptions::new())
            .unwrap_err();
        assert!(matches!(err, TinctureError::Configuration { .. }));
        assert_eq!(palette.get_by_name("o-example/brand").unwrap(), &teal());
    }

    #[test]
    fn test_component_color_after_nested_default_attempt() {
        let mut palette = palette();
        assert!(palette
            .set_color("o-colors/o-example/brand", claret(), ColorOptions::new())
            .is_err());
        palette
            .set_color("o-example/brand", teal(), ColorOptions::new())
            .unwrap();
        assert_eq!(palette.get_by_name("o-example/brand").unwrap(), &teal());
    }

    #[test]
    fn test_mix_by_name() {
        let mut palette = palette();
        palette
            .set_color("o-colors/black", Rgba::BLACK.into(), ColorOptions::new())
            .unwrap();
        palette
            .set_color("o-colors/white", Rgba::WHITE.into(), ColorOptions::new())
            .unwrap();
        let mixed = palette
            .mix(&"white".into(), &"black".into(), 20.0)
            .unwrap();
        assert_eq!(mixed.to_hex(), "#cccccc");
    }

    #[test]
    fn test_mix_unknown_name_is_not_found() {
        let err = palette()
            .mix(&"ghost".into(), &"#000".into(), 50.0)
            .unwrap_err();
        assert!(matches!(err, TinctureError::NotFound { .. }));
    }

    #[test]
    fn test_mix_rejects_sentinels() {
        let err = palette()
            .mix(&"transparent".into(), &"#000".into(), 50.0)
            .unwrap_err();
        assert!(matches!(err, TinctureError::Configuration { .. }));
    }
}
