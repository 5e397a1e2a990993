//! Error types for registration and resolution.
//!
//! Every fatal condition in a build maps to one [`TinctureError`] variant.
//! These are configuration bugs, not runtime faults: callers are expected to
//! abort the build and report the message, which always names the offending
//! color, usecase or property.

use std::fmt;

use thiserror::Error;

/// The kind of registry entry an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A palette color.
    Color,
    /// A semantic usecase.
    Usecase,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Color => write!(f, "color"),
            EntryKind::Usecase => write!(f, "usecase"),
        }
    }
}

/// Errors raised by registration calls and resolution queries.
#[derive(Debug, Error)]
pub enum TinctureError {
    /// Malformed input to a registration or query call.
    #[error("invalid configuration: {message}")]
    Configuration { message: String },

    /// Attempt to redefine a color or usecase owned by a non-default namespace.
    #[error("{kind} '{name}' is already registered as {existing}; refusing to redefine it as {attempted}")]
    OverrideConflict {
        kind: EntryKind,
        name: String,
        existing: String,
        attempted: String,
    },

    /// Reference to a color or usecase that does not exist.
    #[error("{kind} '{name}' does not exist")]
    NotFound { kind: EntryKind, name: String },

    /// Usecase property outside `background`, `border`, `text`, `outline`.
    #[error("usecase '{usecase}' uses unknown property '{property}' (expected background, border, text or outline)")]
    InvalidProperty { usecase: String, property: String },

    /// A synthesized text color does not reach the minimum contrast ratio.
    #[error("text color {foreground} on {background} has a contrast ratio of {ratio:.2}:1, below the 3:1 minimum")]
    Contrast {
        background: String,
        foreground: String,
        ratio: f64,
    },

    /// A brand table could not be read or parsed.
    ///
    /// `origin` is the file path, or `inline` for tables parsed from a string.
    #[error("failed to load brand table {origin}: {message}")]
    Brand { origin: String, message: String },
}

impl TinctureError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        TinctureError::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn color_not_found(name: impl Into<String>) -> Self {
        TinctureError::NotFound {
            kind: EntryKind::Color,
            name: name.into(),
        }
    }

    pub(crate) fn usecase_not_found(name: impl Into<String>) -> Self {
        TinctureError::NotFound {
            kind: EntryKind::Usecase,
            name: name.into(),
        }
    }
}

impl From<serde_yaml::Error> for TinctureError {
    fn from(err: serde_yaml::Error) -> Self {
        TinctureError::Brand {
            origin: "inline".to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, TinctureError>;

/// Rejects NaN and infinite percentages before they reach the color math.
pub(crate) fn require_finite(value: f64, what: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TinctureError::configuration(format!(
            "{} must be a finite number, got {}",
            what, value
        )))
    }
}
