//! Brand tables: palette, tone, mix and usecase data loaded from YAML.
//!
//! A brand table is the static data layer of a build. The built-in brands
//! are embedded in the crate; projects layer their own tables on top with
//! the normal registration rules, so a table may customise default-namespace
//! entries but cannot silently clobber another namespace.
//!
//! # Format
//!
//! ```yaml
//! palette:
//!   paper: "#fff1e5"
//!   teal: { value: "#0d7680", allow-tones: true }
//!   pink: { value: "#ffcdc9", deprecated: "use paper" }
//!
//! tones:
//!   teal: [40, 60, 80]
//!
//! mixes:
//!   black: { background: paper, percentages: [5, 10, 20] }
//!
//! usecases:
//!   page: { background: paper }
//!   link:
//!     text: teal
//!     deprecated-properties: { text: "use link-text" }
//! ```
//!
//! Keys without a `/` belong to the context's default namespace. Sections are
//! applied in the order shown, and a table is applied atomically: if any entry
//! fails, the context is left as it was.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::color::{ColorRef, ColorValue};
use crate::context::BuildContext;
use crate::error::{Result, TinctureError};
use crate::name::qualify;
use crate::palette::ColorOptions;
use crate::usecase::{Property, UsecaseOptions};

/// A parsed brand table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrandConfig {
    pub palette: BTreeMap<String, PaletteEntryDef>,
    pub tones: BTreeMap<String, Vec<f64>>,
    pub mixes: BTreeMap<String, MixDef>,
    pub usecases: BTreeMap<String, UsecaseDef>,
}

/// A palette entry: a bare color string or a map with options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PaletteEntryDef {
    Value(String),
    Detailed(PaletteColorDef),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PaletteColorDef {
    pub value: String,
    #[serde(default)]
    pub deprecated: Option<String>,
    #[serde(default)]
    pub allow_tones: bool,
}

impl PaletteEntryDef {
    pub fn value(&self) -> &str {
        match self {
            PaletteEntryDef::Value(value) => value,
            PaletteEntryDef::Detailed(def) => &def.value,
        }
    }

    fn options(&self) -> ColorOptions {
        match self {
            PaletteEntryDef::Value(_) => ColorOptions::new(),
            PaletteEntryDef::Detailed(def) => ColorOptions {
                deprecated: def.deprecated.clone(),
                allow_tones: def.allow_tones,
            },
        }
    }
}

/// A mix table: the color laid over `background` at each percentage.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MixDef {
    pub background: String,
    pub percentages: Vec<f64>,
}

/// A usecase: property colors plus deprecation notes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UsecaseDef {
    #[serde(default)]
    pub deprecated: Option<String>,
    #[serde(default)]
    pub deprecated_properties: BTreeMap<String, String>,
    /// Property name to color literal or palette name.
    #[serde(flatten)]
    pub colors: BTreeMap<String, String>,
}

impl BrandConfig {
    /// Parses a brand table from YAML.
    ///
    /// # Errors
    ///
    /// [`TinctureError::Brand`] with origin `inline` if parsing fails.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a brand table from a YAML file.
    ///
    /// # Errors
    ///
    /// [`TinctureError::Brand`] naming the path if the file cannot be read
    /// or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let brand_error = |message: String| TinctureError::Brand {
            origin: path.display().to_string(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| brand_error(e.to_string()))?;
        serde_yaml::from_str(&content).map_err(|e| brand_error(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.palette.is_empty()
            && self.tones.is_empty()
            && self.mixes.is_empty()
            && self.usecases.is_empty()
    }
}

/// The brands shipped with the crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Brand {
    /// Full palette: paper background, accent colors, tone and mix tables.
    #[default]
    Core,
    /// Neutral palette for unbranded products.
    Whitelabel,
}

impl Brand {
    pub const ALL: [Brand; 2] = [Brand::Core, Brand::Whitelabel];

    pub fn name(&self) -> &'static str {
        match self {
            Brand::Core => "core",
            Brand::Whitelabel => "whitelabel",
        }
    }

    fn source(&self) -> &'static str {
        match self {
            Brand::Core => include_str!("../brands/core.yaml"),
            Brand::Whitelabel => include_str!("../brands/whitelabel.yaml"),
        }
    }

    /// Parses the embedded table.
    pub fn config(&self) -> Result<BrandConfig> {
        serde_yaml::from_str(self.source()).map_err(|e| TinctureError::Brand {
            origin: format!("<builtin {}>", self.name()),
            message: e.to_string(),
        })
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Brand {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Brand::ALL
            .into_iter()
            .find(|brand| brand.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown brand '{}' (expected core or whitelabel)", s))
    }
}

impl BuildContext {
    /// Creates a context with the default configuration and `brand` loaded.
    pub fn with_brand(brand: Brand) -> Result<Self> {
        let mut ctx = BuildContext::new();
        ctx.load_brand(&brand.config()?)?;
        Ok(ctx)
    }

    /// Applies a brand table: palette, tones, mixes, then usecases.
    ///
    /// # Errors
    ///
    /// Any registration error; the context is unchanged on failure.
    pub fn load_brand(&mut self, config: &BrandConfig) -> Result<()> {
        let mut staged = self.clone();
        staged.apply_brand(config)?;
        tracing::debug!(
            colors = staged.palette().len() - self.palette().len(),
            usecases = staged.usecases().len() - self.usecases().len(),
            "loaded brand table"
        );
        *self = staged;
        Ok(())
    }

    fn apply_brand(&mut self, config: &BrandConfig) -> Result<()> {
        let namespace = self.config().default_namespace.clone();

        for (name, def) in &config.palette {
            let value = ColorValue::parse(def.value())?;
            self.set_color(&qualify(name, &namespace), value, def.options())?;
        }

        for (name, brightnesses) in &config.tones {
            self.set_tones(&qualify(name, &namespace), brightnesses)?;
        }

        for (name, mix) in &config.mixes {
            let background = ColorRef::parse(&mix.background)?;
            self.set_mixes(&qualify(name, &namespace), background, &mix.percentages)?;
        }

        for (name, def) in &config.usecases {
            let name = qualify(name, &namespace);
            let colors = def
                .colors
                .iter()
                .map(|(property, color)| {
                    ColorRef::parse(color).map(|color| (property.as_str(), color))
                })
                .collect::<Result<Vec<_>>>()?;

            let mut options = UsecaseOptions {
                deprecated: def.deprecated.clone(),
                ..UsecaseOptions::default()
            };
            for (property, message) in &def.deprecated_properties {
                let property: Property =
                    property
                        .parse()
                        .map_err(|property| TinctureError::InvalidProperty {
                            usecase: name.clone(),
                            property,
                        })?;
                options = options.deprecate_property(property, message.clone());
            }

            self.set_use_case(&name, colors, options)?;
        }
        Ok(())
    }
}
