//! End-to-end scenarios against the built-in brands and layered brand files.

use std::fs;

use tempfile::TempDir;
use tincture::{
    Brand, BrandConfig, BuildContext, ColorOptions, ColorValue, ContextConfig, EntryKind,
    Property, Rating, ResolveOptions, TinctureError, UsecaseOptions, Warning,
};

fn core() -> BuildContext {
    BuildContext::with_brand(Brand::Core).unwrap()
}

// ============================================================================
// Color algebra through the registry
// ============================================================================

#[test]
fn test_black_over_white_at_twenty_percent() {
    let ctx = core();
    assert_eq!(ctx.blend("black", "white", 20.0).unwrap().to_hex(), "#cccccc");
    assert_eq!(ctx.mix("white", "black", 20.0).unwrap().to_hex(), "#cccccc");
}

#[test]
fn test_teal_text_tint() {
    let mut ctx = BuildContext::new();
    ctx.set_color(
        "o-colors/teal",
        "#0d7680".parse().unwrap(),
        ColorOptions::new(),
    )
    .unwrap();

    let text = ctx.get_text_color("#0d7680", 80.0).unwrap();
    assert_eq!(text.value.to_hex(), "#cfe4e6");
    assert_eq!(text.contrast.rating, Rating::AaLargeText);
    assert!(text.contrast.ratio >= 3.0 && text.contrast.ratio < 4.5);

    match ctx.take_warnings().as_slice() {
        [Warning::LargeTextOnly {
            background,
            foreground,
            ..
        }] => {
            assert_eq!(background, "#0d7680");
            assert_eq!(foreground, "#cfe4e6");
        }
        other => panic!("expected one large-text warning, got {:?}", other),
    }
}

#[test]
fn test_core_tone_tables() {
    let ctx = core();
    for name in ["teal-40", "claret-50", "oxford-100"] {
        assert!(ctx.palette().exists(name), "missing {}", name);
    }
    let dark = ctx.get_by_name("teal-20").unwrap().as_rgba().unwrap();
    let light = ctx.get_by_name("teal-90").unwrap().as_rgba().unwrap();
    assert!(tincture::color::relative_luminance(dark) < tincture::color::relative_luminance(light));
}

// ============================================================================
// Usecase registration
// ============================================================================

#[test]
fn test_stripe_merges_in_its_default_namespace() {
    let mut ctx =
        BuildContext::with_config(ContextConfig::new().with_default_namespace("o-example"));
    ctx.set_color("o-example/paper", "#fff1e5".parse().unwrap(), ColorOptions::new())
        .unwrap();
    ctx.set_color("o-example/ink", "#33302e".parse().unwrap(), ColorOptions::new())
        .unwrap();

    ctx.set_use_case(
        "o-example/stripe",
        [(Property::Background, "paper")],
        UsecaseOptions::new(),
    )
    .unwrap();
    ctx.set_use_case(
        "o-example/stripe",
        [(Property::Background, "paper"), (Property::Text, "ink")],
        UsecaseOptions::new(),
    )
    .unwrap();

    let stripe = ctx.usecases().get_use_case("o-example/stripe").unwrap();
    assert!(stripe.color(Property::Background).is_some());
    assert!(stripe.color(Property::Text).is_some());
}

#[test]
fn test_stripe_conflicts_outside_default_namespace() {
    let mut ctx = core();
    ctx.set_use_case(
        "o-example/stripe",
        [(Property::Background, "paper")],
        UsecaseOptions::new(),
    )
    .unwrap();

    let err = ctx
        .set_use_case(
            "o-example/stripe",
            [(Property::Background, "paper"), (Property::Text, "black")],
            UsecaseOptions::new(),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        TinctureError::OverrideConflict {
            kind: EntryKind::Usecase,
            ..
        }
    ));
    let stripe = ctx.usecases().get_use_case("o-example/stripe").unwrap();
    assert!(stripe.color(Property::Text).is_none());
}

#[test]
fn test_failed_usecase_registers_nothing() {
    let mut ctx = core();
    let err = ctx
        .set_use_case(
            "o-example/card",
            [("background", "paper"), ("shadow", "black")],
            UsecaseOptions::new(),
        )
        .unwrap_err();
    assert!(matches!(err, TinctureError::InvalidProperty { .. }));
    assert!(ctx.usecases().get_use_case("o-example/card").is_none());
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_fallback_to_second_usecase() {
    let mut ctx = core();
    ctx.set_use_case("o-example/u1", [("text", "teal")], UsecaseOptions::new())
        .unwrap();
    ctx.set_use_case("o-example/u2", [("background", "wheat")], UsecaseOptions::new())
        .unwrap();

    let resolved = ctx
        .resolve_color_for(
            &["o-example/u1", "o-example/u2"],
            Property::Background,
            &ResolveOptions::new(),
        )
        .unwrap();
    assert_eq!(resolved.value.to_string(), "#f2dfce");
    assert_eq!(resolved.usecase.as_deref(), Some("o-example/u2"));
}

#[test]
fn test_default_sentinel_beats_builtin_transparent() {
    let ctx = core();
    let resolved = ctx
        .resolve_color_for(
            &["body"],
            Property::Background,
            &ResolveOptions::new().default_to("undefined"),
        )
        .unwrap();
    assert_eq!(resolved.value, ColorValue::Undefined);

    let builtin = ctx
        .resolve_color_for(&["body"], Property::Background, &ResolveOptions::new())
        .unwrap();
    assert_eq!(builtin.value, ColorValue::Transparent);
}

#[test]
fn test_explicit_text_skips_synthesis_at_any_opacity() {
    let ctx = core();
    for opacity in [0.0, 10.0, 90.0, 100.0] {
        let set = ctx.resolve_for(&["button"], None, Some(opacity)).unwrap();
        assert!(!set.text_synthesized);
        assert_eq!(set.text.unwrap().value.to_string(), "#ffffff");
    }
}

#[test]
fn test_synthesized_text_on_inverse_background() {
    let ctx = core();
    let set = ctx.resolve_for(&["inverse"], None, None).unwrap();
    assert!(set.text_synthesized);
    assert!(set.text_contrast.unwrap().rating >= Rating::Aa);
}

#[test]
fn test_low_opacity_text_is_contrast_error() {
    let ctx = core();
    let err = ctx.resolve_for(&["page"], None, Some(15.0)).unwrap_err();
    assert!(matches!(err, TinctureError::Contrast { .. }));
}

#[test]
fn test_deprecations_are_reported() {
    let ctx = core();
    ctx.get_by_name("pink").unwrap();
    ctx.resolve_color_for(&["link"], Property::Text, &ResolveOptions::new())
        .unwrap();

    let warnings = ctx.take_warnings();
    assert_eq!(warnings.len(), 2);
    assert!(matches!(&warnings[0], Warning::DeprecatedColor { name, .. } if name == "o-colors/pink"));
    assert!(matches!(
        &warnings[1],
        Warning::DeprecatedUsecase { property: Property::Text, .. }
    ));
}

// ============================================================================
// Layered brand files
// ============================================================================

#[test]
fn test_project_file_layers_over_brand() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("project.yaml");
    fs::write(
        &path,
        r##"
        palette:
          paper: "#ffffff"
          o-example/brand: { value: "#0d7680", allow-tones: true }
        tones:
          o-example/brand: [30]
        usecases:
          o-example/stripe: { background: o-example/brand-30, border: black-20 }
        "##,
    )
    .unwrap();

    let mut ctx = core();
    ctx.load_brand(&BrandConfig::from_file(&path).unwrap())
        .unwrap();

    assert_eq!(ctx.get_by_name("paper").unwrap().to_string(), "#ffffff");
    assert!(ctx.palette().exists("o-example/brand-30"));
    let set = ctx.resolve_for(&["o-example/stripe"], None, None).unwrap();
    assert!(set.background.is_some());
    assert!(set.border.is_some());
}

#[test]
fn test_second_file_cannot_redefine_component_color() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("first.yaml");
    let second = temp_dir.path().join("second.yaml");
    fs::write(&first, "palette: { o-example/brand: '#0d7680' }\n").unwrap();
    fs::write(&second, "palette: { o-example/brand: '#990f3d' }\n").unwrap();

    let mut ctx = core();
    ctx.load_brand(&BrandConfig::from_file(&first).unwrap())
        .unwrap();
    let err = ctx
        .load_brand(&BrandConfig::from_file(&second).unwrap())
        .unwrap_err();
    assert!(matches!(err, TinctureError::OverrideConflict { .. }));
    assert_eq!(
        ctx.get_by_name("o-example/brand").unwrap().to_string(),
        "#0d7680"
    );
}

#[test]
fn test_missing_brand_file_names_path() {
    let err = BrandConfig::from_file("/nonexistent/brand.yaml").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/brand.yaml"));
}
