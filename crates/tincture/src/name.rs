//! Namespaced entry names.
//!
//! Colors and usecases are registered under `"<namespace>/<identifier>"`
//! names. The namespace tells the registries who owns an entry: the
//! build's default namespace holds the built-in brand tables and may be
//! customised, while every other namespace belongs to an independent
//! component or project that must not silently clobber anyone else.
//!
//! Entries in the default namespace are stored under their bare identifier,
//! so `"teal"` and `"o-colors/teal"` find the same built-in color.

use std::fmt;

use crate::error::{Result, TinctureError};

/// Namespace used when a build context is not configured otherwise.
pub const DEFAULT_NAMESPACE: &str = "o-colors";

/// A parsed `namespace/identifier` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    namespace: String,
    identifier: String,
}

impl QualifiedName {
    /// Parses a registration name.
    ///
    /// The name must contain exactly one `/`. Both halves must be non-empty
    /// and free of whitespace.
    ///
    /// ```rust
    /// use tincture::QualifiedName;
    ///
    /// let name = QualifiedName::parse("o-example/stripe").unwrap();
    /// assert_eq!(name.namespace(), "o-example");
    /// assert_eq!(name.identifier(), "stripe");
    ///
    /// assert!(QualifiedName::parse("stripe").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(TinctureError::configuration("name must not be empty"));
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(TinctureError::configuration(format!(
                "name '{}' must not contain whitespace",
                raw
            )));
        }

        let (namespace, identifier) = raw.split_once('/').ok_or_else(|| {
            TinctureError::configuration(format!(
                "name '{}' has no namespace (expected '<namespace>/<identifier>')",
                raw
            ))
        })?;

        if namespace.is_empty() || identifier.is_empty() {
            return Err(TinctureError::configuration(format!(
                "cannot determine namespace of '{}' (expected '<namespace>/<identifier>')",
                raw
            )));
        }
        if identifier.contains('/') {
            return Err(TinctureError::configuration(format!(
                "identifier '{}' in '{}' must not contain '/'",
                identifier, raw
            )));
        }

        Ok(Self {
            namespace: namespace.to_string(),
            identifier: identifier.to_string(),
        })
    }

    /// Builds a name from parts that are already known to be valid.
    pub(crate) fn from_parts(namespace: &str, identifier: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            identifier: identifier.to_string(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns true if this name belongs to `default_namespace`.
    pub fn is_default(&self, default_namespace: &str) -> bool {
        self.namespace == default_namespace
    }

    /// The key this name is stored under: the bare identifier for the
    /// default namespace, the full name otherwise.
    pub fn storage_key(&self, default_namespace: &str) -> String {
        if self.is_default(default_namespace) {
            self.identifier.clone()
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.identifier)
    }
}

/// Normalises a lookup name to its storage key.
///
/// Lookups are lenient where registration is strict: a bare identifier
/// refers to the default namespace.
pub fn lookup_key(raw: &str, default_namespace: &str) -> String {
    let raw = raw.trim();
    match raw.split_once('/') {
        Some((namespace, identifier)) if namespace == default_namespace => identifier.to_string(),
        _ => raw.to_string(),
    }
}

/// Qualifies a brand-table key: keys without a namespace land in
/// `default_namespace`.
pub fn qualify(raw: &str, default_namespace: &str) -> String {
    if raw.contains('/') {
        raw.to_string()
    } else {
        format!("{}/{}", default_namespace, raw)
    }
}
