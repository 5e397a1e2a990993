//! The usecase registry: semantic names mapped to palette colors.
//!
//! A usecase ("page", "link", "o-example/stripe") assigns colors to up to
//! four [`Property`] slots. Values are palette names or literal colors;
//! names are checked against the [`PaletteStore`] at registration time but
//! stored unresolved, so later overrides of default colors still show
//! through at resolution time.
//!
//! # Re-registration
//!
//! - Default namespace: the new property map is merged over the existing one
//!   (last write wins per property, other properties kept).
//! - Any other namespace: registering the same configuration again is a
//!   no-op; anything whose merged result would differ from what is stored is
//!   an [`OverrideConflict`](TinctureError::OverrideConflict).
//!
//! Validation happens before any mutation, so a failed call leaves the
//! registry untouched.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::ColorRef;
use crate::error::{EntryKind, Result, TinctureError};
use crate::name::{lookup_key, QualifiedName};
use crate::palette::PaletteStore;

/// A color slot of a usecase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    Background,
    Border,
    Text,
    Outline,
}

impl Property {
    pub const ALL: [Property; 4] = [
        Property::Background,
        Property::Border,
        Property::Text,
        Property::Outline,
    ];

    /// The properties covered by an `all` query and by default
    /// [`resolve_for`](crate::BuildContext::resolve_for) requests.
    pub const COLOR_SET: [Property; 3] = [Property::Background, Property::Border, Property::Text];

    pub fn as_str(&self) -> &'static str {
        match self {
            Property::Background => "background",
            Property::Border => "border",
            Property::Text => "text",
            Property::Outline => "outline",
        }
    }

    /// The CSS property this slot is emitted as.
    pub fn css_property(&self) -> &'static str {
        match self {
            Property::Background => "background-color",
            Property::Border => "border-color",
            Property::Text => "color",
            Property::Outline => "outline-color",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl AsRef<str> for Property {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for Property {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "background" => Ok(Property::Background),
            "border" => Ok(Property::Border),
            "text" => Ok(Property::Text),
            "outline" => Ok(Property::Outline),
            other => Err(other.to_string()),
        }
    }
}

/// Options for [`UsecaseStore::set_use_case`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsecaseOptions {
    /// Deprecation message for the whole usecase.
    pub deprecated: Option<String>,
    /// Deprecation messages for individual properties.
    pub deprecated_properties: BTreeMap<Property, String>,
}

impl UsecaseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deprecated(mut self, message: impl Into<String>) -> Self {
        self.deprecated = Some(message.into());
        self
    }

    pub fn deprecate_property(mut self, property: Property, message: impl Into<String>) -> Self {
        self.deprecated_properties.insert(property, message.into());
        self
    }

    /// `other` layered over `self`.
    fn merged(&self, other: &UsecaseOptions) -> UsecaseOptions {
        let mut deprecated_properties = self.deprecated_properties.clone();
        deprecated_properties.extend(other.deprecated_properties.clone());
        UsecaseOptions {
            deprecated: other.deprecated.clone().or_else(|| self.deprecated.clone()),
            deprecated_properties,
        }
    }
}

/// A registered usecase.
#[derive(Debug, Clone, PartialEq)]
pub struct UsecaseEntry {
    pub name: QualifiedName,
    pub colors: BTreeMap<Property, ColorRef>,
    pub options: UsecaseOptions,
}

impl UsecaseEntry {
    pub fn color(&self, property: Property) -> Option<&ColorRef> {
        self.colors.get(&property)
    }

    /// The deprecation message that applies to `property`, if any.
    ///
    /// A property-level message takes precedence over the usecase-level one.
    pub fn deprecation_for(&self, property: Property) -> Option<&str> {
        self.options
            .deprecated_properties
            .get(&property)
            .or(self.options.deprecated.as_ref())
            .map(String::as_str)
    }
}

fn describe(colors: &BTreeMap<Property, ColorRef>) -> String {
    let pairs: Vec<String> = colors
        .iter()
        .map(|(property, color)| format!("{}: {}", property, color))
        .collect();
    format!("{{{}}}", pairs.join(", "))
}

/// Registry of usecases for one build.
#[derive(Debug, Clone)]
pub struct UsecaseStore {
    default_namespace: String,
    entries: BTreeMap<String, UsecaseEntry>,
}

impl UsecaseStore {
    pub fn new(default_namespace: impl Into<String>) -> Self {
        Self {
            default_namespace: default_namespace.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Registers or extends a usecase.
    ///
    /// `colors` pairs property names with colors; typed [`Property`] keys
    /// and plain strings are both accepted.
    ///
    /// # Errors
    ///
    /// - [`TinctureError::Configuration`] for a malformed name or an empty map
    /// - [`TinctureError::InvalidProperty`] for a key outside the four properties
    /// - [`TinctureError::NotFound`] for a palette name that does not exist
    /// - [`TinctureError::OverrideConflict`] for a conflicting non-default redefinition
    ///
    /// # Example
    ///
    /// ```rust
    /// use tincture::{ColorOptions, PaletteStore, Property, UsecaseOptions, UsecaseStore};
    ///
    /// let mut palette = PaletteStore::new("o-colors");
    /// palette.set_color("o-colors/paper", "#fff1e5".parse().unwrap(), ColorOptions::new()).unwrap();
    ///
    /// let mut usecases = UsecaseStore::new("o-colors");
    /// usecases
    ///     .set_use_case("o-colors/page", [(Property::Background, "paper")], UsecaseOptions::new(), &palette)
    ///     .unwrap();
    ///
    /// let page = usecases.get_use_case("page").unwrap();
    /// assert_eq!(page.color(Property::Background).unwrap().to_string(), "paper");
    /// ```
    pub fn set_use_case<I, K, V>(
        &mut self,
        name: &str,
        colors: I,
        options: UsecaseOptions,
        palette: &PaletteStore,
    ) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<ColorRef>,
    {
        let name = QualifiedName::parse(name)?;

        let mut incoming = BTreeMap::new();
        for (property, color) in colors {
            let property: Property =
                property
                    .as_ref()
                    .parse()
                    .map_err(|property| TinctureError::InvalidProperty {
                        usecase: name.to_string(),
                        property,
                    })?;
            let color = color.into();
            if let Some(color_name) = color.as_name() {
                if !palette.exists(color_name) {
                    return Err(TinctureError::color_not_found(color_name));
                }
            }
            incoming.insert(property, color);
        }

        if incoming.is_empty() {
            return Err(TinctureError::configuration(format!(
                "usecase '{}' defines no colors",
                name
            )));
        }

        let key = name.storage_key(&self.default_namespace);
        let is_default = name.is_default(&self.default_namespace);

        let entry = match self.entries.get(&key) {
            None => UsecaseEntry {
                name,
                colors: incoming,
                options,
            },
            Some(existing) => {
                let mut colors = existing.colors.clone();
                colors.extend(incoming);
                let merged = UsecaseEntry {
                    name,
                    colors,
                    options: existing.options.merged(&options),
                };

                if merged == *existing {
                    return Ok(());
                }
                if !is_default {
                    return Err(TinctureError::OverrideConflict {
                        kind: EntryKind::Usecase,
                        name: merged.name.to_string(),
                        existing: describe(&existing.colors),
                        attempted: describe(&merged.colors),
                    });
                }
                tracing::debug!(usecase = %merged.name, "merging default usecase");
                merged
            }
        };

        self.entries.insert(key, entry);
        Ok(())
    }

    /// Returns the usecase registered under `name`, if any.
    pub fn get_use_case(&self, name: &str) -> Option<&UsecaseEntry> {
        self.entries.get(&lookup_key(name, &self.default_namespace))
    }

    pub fn iter(&self) -> impl Iterator<Item = &UsecaseEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
