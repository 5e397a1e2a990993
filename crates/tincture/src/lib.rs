//! # Tincture - Design-Token Color Resolution
//!
//! `tincture` keeps a registry of named colors and of semantic usecases
//! ("page background", "link text"), resolves usecases to concrete colors
//! through ordered fallback, derives new colors by mixing and brightness
//! tones, and checks generated text colors against WCAG contrast thresholds.
//!
//! ## Core Concepts
//!
//! - [`BuildContext`]: the registries, configuration and warnings of one build
//! - [`PaletteStore`]: named colors with namespace-aware override rules
//! - [`UsecaseStore`]: property-to-color maps that merge in the default namespace
//! - [`ColorValue`] / [`ColorRef`]: concrete colors, sentinels and palette references
//! - [`Rating`]: WCAG classification of a contrast ratio
//! - [`Brand`]: built-in brand tables loaded from embedded YAML
//!
//! ## Quick Start
//!
//! ```rust
//! use tincture::{Brand, BuildContext, Property, Rating, ResolveOptions};
//!
//! let ctx = BuildContext::with_brand(Brand::Core).unwrap();
//!
//! // Usecases resolve through the palette.
//! let page = ctx
//!     .resolve_color_for(&["page"], Property::Background, &ResolveOptions::new())
//!     .unwrap();
//! assert_eq!(page.value.to_string(), "#fff1e5");
//!
//! // Text is synthesized when a usecase does not define it.
//! let set = ctx.resolve_for(&["page"], None, Some(90.0)).unwrap();
//! assert_eq!(set.text_contrast.unwrap().rating, Rating::Aaa);
//!
//! // Mix tables are registered by the brand: 20% black over paper.
//! assert_eq!(ctx.get_by_name("black-20").unwrap().to_string(), "#ccc1b7");
//! ```
//!
//! ## Namespaces
//!
//! Every entry is registered as `namespace/identifier`. The default namespace
//! (`o-colors` unless configured) holds the brand tables and may be
//! customised; other namespaces belong to components and may not be
//! redefined with different values.
//!
//! ```rust
//! use tincture::{BuildContext, ColorOptions, TinctureError};
//!
//! let mut ctx = BuildContext::new();
//! ctx.set_color("o-example/brand", "#0d7680".parse().unwrap(), ColorOptions::new()).unwrap();
//!
//! let err = ctx
//!     .set_color("o-example/brand", "#990f3d".parse().unwrap(), ColorOptions::new())
//!     .unwrap_err();
//! assert!(matches!(err, TinctureError::OverrideConflict { .. }));
//! ```

pub mod brand;
pub mod color;
pub mod context;
pub mod diagnostics;
pub mod emit;
mod error;
pub mod name;
pub mod palette;
pub mod resolve;
pub mod usecase;

pub use brand::{Brand, BrandConfig, MixDef, PaletteColorDef, PaletteEntryDef, UsecaseDef};
pub use color::{ColorRef, ColorValue, ContrastReport, Rating, Rgba};
pub use context::{BuildContext, ContextConfig, DEFAULT_TEXT_OPACITY};
pub use diagnostics::{Diagnostics, Warning};
pub use error::{EntryKind, Result, TinctureError};
pub use name::{QualifiedName, DEFAULT_NAMESPACE};
pub use palette::{ColorEntry, ColorOptions, PaletteStore};
pub use resolve::{ResolveOptions, ResolvedColor, ResolvedSet, TextColor};
pub use usecase::{Property, UsecaseEntry, UsecaseOptions, UsecaseStore};
