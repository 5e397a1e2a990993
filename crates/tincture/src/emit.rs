//! Output for stylesheet builds.
//!
//! These run after registration is complete and only read the registries.

use serde_json::{Map, Value};

use crate::color::ColorValue;
use crate::context::BuildContext;
use crate::error::Result;
use crate::palette::PaletteStore;
use crate::usecase::Property;

/// One CSS custom property per palette entry, sorted by storage key.
///
/// ```text
/// --o-colors-paper: #fff1e5;
/// --o-example-brand: #0d7680;
/// ```
///
/// Undefined entries are skipped.
pub fn custom_properties(palette: &PaletteStore) -> String {
    let mut out = String::new();
    for entry in palette.iter().filter(|entry| entry.value.is_defined()) {
        out.push_str(&format!(
            "--{}-{}: {};\n",
            entry.name.namespace(),
            entry.name.identifier(),
            entry.value
        ));
    }
    out
}

/// The palette as a JSON object of qualified name to CSS value.
pub fn tokens_json(palette: &PaletteStore) -> Value {
    let tokens: Map<String, Value> = palette
        .iter()
        .filter(|entry| entry.value.is_defined())
        .map(|entry| (entry.name.to_string(), Value::String(entry.value.to_string())))
        .collect();
    Value::Object(tokens)
}

/// CSS declarations for a usecase preference list.
///
/// Resolves with [`BuildContext::resolve_for`], so text may be synthesized.
/// Undefined colors produce no declaration.
pub fn usecase_rules<U: AsRef<str>>(
    ctx: &BuildContext,
    usecases: &[U],
    properties: Option<&[Property]>,
    text_opacity: Option<f64>,
) -> Result<String> {
    let set = ctx.resolve_for(usecases, properties, text_opacity)?;
    let mut out = String::new();
    for (property, color) in set.iter() {
        if color.value == ColorValue::Undefined {
            continue;
        }
        out.push_str(&format!("{}: {};\n", property.css_property(), color.value));
    }
    Ok(out)
}
