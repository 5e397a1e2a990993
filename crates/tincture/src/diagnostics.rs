//! Non-fatal build warnings.
//!
//! Fatal conditions are errors; everything a build should mention but not
//! stop for is a [`Warning`]. Warnings are logged through `tracing` as they
//! happen and also kept, so a build tool can print a summary at the end.

use std::cell::RefCell;
use std::fmt;

use crate::usecase::Property;

/// Something worth reporting that does not block output.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// A deprecated palette color was resolved.
    DeprecatedColor { name: String, message: String },
    /// A deprecated usecase, or a deprecated property of one, was resolved.
    DeprecatedUsecase {
        name: String,
        property: Property,
        message: String,
    },
    /// A synthesized text color passes WCAG AA for large text only.
    LargeTextOnly {
        background: String,
        foreground: String,
        ratio: f64,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DeprecatedColor { name, message } => {
                write!(f, "color '{}' is deprecated: {}", name, message)
            }
            Warning::DeprecatedUsecase {
                name,
                property,
                message,
            } => write!(
                f,
                "usecase '{}' ({}) is deprecated: {}",
                name, property, message
            ),
            Warning::LargeTextOnly {
                background,
                foreground,
                ratio,
            } => write!(
                f,
                "text color {} on {} has a contrast ratio of {:.2}:1 and only passes WCAG AA for large text (18px and up)",
                foreground, background, ratio
            ),
        }
    }
}

/// Collector for the warnings of one build.
///
/// Interior mutability keeps resolution queries on `&self`; a build is
/// single-threaded, so the collector is not `Sync`.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: RefCell<Vec<Warning>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs and keeps a warning.
    pub fn record(&self, warning: Warning) {
        tracing::warn!("{}", warning);
        self.warnings.borrow_mut().push(warning);
    }

    /// Returns a copy of the warnings recorded so far.
    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings.borrow().clone()
    }

    /// Removes and returns the warnings recorded so far.
    pub fn take(&self) -> Vec<Warning> {
        self.warnings.take()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.borrow().is_empty()
    }
}

impl Clone for Diagnostics {
    fn clone(&self) -> Self {
        Self {
            warnings: RefCell::new(self.warnings()),
        }
    }
}
