use anyhow::{Context, Result};
use console::Style;
use tincture::{
    emit, BrandConfig, BuildContext, ColorRef, ColorValue, ContextConfig, ContrastReport,
    Property, Rating, Rgba,
};

use crate::cli::{Cli, Command, EmitFormat, ResolveArgs};

/// Builds the registry for `cli` and runs its command.
pub fn run(cli: &Cli) -> Result<String> {
    let ctx = build_context(cli)?;
    let out = match &cli.command {
        Command::Mix { a, b, percentage } => {
            swatch_line(ctx.mix(color_arg(a)?, color_arg(b)?, *percentage)?)
        }
        Command::Blend {
            color,
            background,
            percentage,
        } => swatch_line(ctx.blend(color_arg(color)?, color_arg(background)?, *percentage)?),
        Command::Tone { color, brightness } => {
            swatch_line(ctx.tone(color_arg(color)?, *brightness)?)
        }
        Command::Contrast {
            background,
            foreground,
            strict,
        } => {
            let (background, foreground) = (color_arg(background)?, color_arg(foreground)?);
            let report = if *strict {
                ctx.validate_contrast(background, foreground)?
            } else {
                ctx.check_contrast(background, foreground)?
            };
            contrast_line(&report)
        }
        Command::TextColor {
            background,
            opacity,
        } => {
            let text = ctx.get_text_color(color_arg(background)?, *opacity)?;
            format!("{}{}", swatch_line(text.value), contrast_line(&text.contrast))
        }
        Command::Resolve(args) => resolve(&ctx, args)?,
        Command::Emit { format } => match format {
            EmitFormat::Css => emit::custom_properties(ctx.palette()),
            EmitFormat::Json => {
                let mut json = serde_json::to_string_pretty(&emit::tokens_json(ctx.palette()))?;
                json.push('\n');
                json
            }
        },
    };
    Ok(out)
}

fn build_context(cli: &Cli) -> Result<BuildContext> {
    let config = ContextConfig::new().with_default_namespace(cli.namespace.clone());
    let mut ctx = BuildContext::with_config(config);
    ctx.load_brand(&cli.brand.config()?)
        .with_context(|| format!("failed to load brand '{}'", cli.brand))?;
    for path in &cli.configs {
        let table = BrandConfig::from_file(path)?;
        ctx.load_brand(&table)
            .with_context(|| format!("failed to apply {}", path.display()))?;
        tracing::debug!(
            config = %path.display(),
            colors = ctx.palette().len(),
            "applied config layer"
        );
    }
    Ok(ctx)
}

fn color_arg(raw: &str) -> Result<ColorRef> {
    Ok(ColorRef::parse(raw)?)
}

fn resolve(ctx: &BuildContext, args: &ResolveArgs) -> Result<String> {
    let properties = (!args.properties.is_empty()).then_some(args.properties.as_slice());
    if args.css {
        return Ok(emit::usecase_rules(
            ctx,
            args.usecases.as_slice(),
            properties,
            args.opacity,
        )?);
    }

    let set = ctx.resolve_for(args.usecases.as_slice(), properties, args.opacity)?;
    let label = Style::new().bold();
    let dim = Style::new().dim();
    let mut out = String::new();
    for (property, color) in set.iter() {
        let source = match (&color.usecase, property) {
            (Some(usecase), _) => usecase.clone(),
            (None, Property::Text) if set.text_synthesized => "synthesized".to_string(),
            (None, _) => "default".to_string(),
        };
        out.push_str(&format!(
            "{:<11} {} {}\n",
            label.apply_to(property),
            value_swatch(&color.value),
            dim.apply_to(format!("({})", source))
        ));
    }
    if let Some(report) = &set.text_contrast {
        out.push_str(&contrast_line(report));
    }
    if out.is_empty() {
        out.push_str(&format!("{}\n", dim.apply_to("no colors defined")));
    }
    Ok(out)
}

fn swatch(color: Rgba) -> String {
    Style::new()
        .on_color256(color.to_ansi256())
        .apply_to("  ")
        .to_string()
}

fn value_swatch(value: &ColorValue) -> String {
    match value.as_rgba() {
        Some(rgba) => format!("{} {}", swatch(rgba), value),
        None => format!("   {}", value),
    }
}

fn swatch_line(color: Rgba) -> String {
    format!("{} {}\n", swatch(color), color)
}

fn rating_style(rating: Rating) -> Style {
    match rating {
        Rating::Aaa | Rating::Aa => Style::new().green().bold(),
        Rating::AaLargeText => Style::new().yellow().bold(),
        Rating::Fail => Style::new().red().bold(),
    }
}

fn contrast_line(report: &ContrastReport) -> String {
    format!(
        "{} on {}: {:.2}:1 {}\n",
        report.foreground,
        report.background,
        report.ratio,
        rating_style(report.rating).apply_to(report.rating)
    )
}
