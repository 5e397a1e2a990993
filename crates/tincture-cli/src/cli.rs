use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tincture::{Brand, Property, DEFAULT_NAMESPACE, DEFAULT_TEXT_OPACITY};

/// Resolve, mix and contrast-check design-token colors.
///
/// The registry is built from a built-in brand, then from each `--config`
/// file in order. Colors may be given as literals (`#0d7680`,
/// `rgb(13, 118, 128)`) or as palette names (`teal`, `o-example/brand`).
#[derive(Debug, Parser)]
#[command(name = "tincture")]
#[command(version)]
#[command(about = "Resolve, mix and contrast-check design-token colors")]
pub struct Cli {
    /// Built-in brand loaded first (core, whitelabel)
    #[arg(short, long, global = true, default_value = "core")]
    pub brand: Brand,

    /// Brand table layered over the brand; may be repeated
    #[arg(short, long = "config", value_name = "FILE", global = true)]
    pub configs: Vec<PathBuf>,

    /// Namespace whose entries may be overridden
    #[arg(long, global = true, default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Mix A toward B (0 = A, 100 = B)
    Mix {
        a: String,
        b: String,
        percentage: f64,
    },

    /// Lay PERCENTAGE of COLOR over BACKGROUND
    Blend {
        color: String,
        background: String,
        percentage: f64,
    },

    /// Set the HSB brightness (0-100) of a color
    Tone { color: String, brightness: f64 },

    /// Measure the WCAG contrast of a pair
    Contrast {
        background: String,
        foreground: String,

        /// Exit with an error when the pair fails
        #[arg(long)]
        strict: bool,
    },

    /// Synthesize a text color for a background
    TextColor {
        background: String,

        /// Text opacity in percent
        #[arg(short, long, default_value_t = DEFAULT_TEXT_OPACITY)]
        opacity: f64,
    },

    /// Resolve a usecase preference list
    Resolve(ResolveArgs),

    /// Print the palette
    Emit {
        #[arg(short, long, value_enum, default_value_t = EmitFormat::Css)]
        format: EmitFormat,
    },
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Usecases in preference order
    #[arg(required = true)]
    pub usecases: Vec<String>,

    /// Properties to resolve (default: background, border, text)
    #[arg(short, long = "property", value_name = "PROPERTY")]
    pub properties: Vec<Property>,

    /// Opacity for synthesized text
    #[arg(short, long)]
    pub opacity: Option<f64>,

    /// Print CSS declarations instead of a report
    #[arg(long)]
    pub css: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EmitFormat {
    /// CSS custom properties
    Css,
    /// JSON object of name to value
    Json,
}
