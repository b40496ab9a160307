//! Epoch identifier registry
//!
//! The set of legal epoch identifiers is owned by the epochs module, not by
//! incentives. This module defines the interface incentives consults and an
//! in-memory registry used at genesis, by the CLI and in tests.

use std::collections::BTreeSet;

use crate::error::{ParamsError, Result};
use crate::keys::ParamValue;

/// Epoch identifiers registered by default
pub const DEFAULT_EPOCH_IDENTIFIERS: [&str; 2] = ["day", "week"];

/// Source of truth for recurring-period names
pub trait EpochIdentifierRegistry: Send + Sync {
    /// Generic shape check used by the key table: the candidate must be a
    /// non-empty string
    fn validate_identifier_value(&self, value: &ParamValue) -> Result<()> {
        match value {
            ParamValue::String(s) if s.trim().is_empty() => Err(ParamsError::EmptyIdentifier),
            ParamValue::String(_) => Ok(()),
            other => Err(ParamsError::invalid_type(other.type_name())),
        }
    }

    /// Strict check that `identifier` is currently a legal epoch identifier
    fn validate_identifier(&self, identifier: &str) -> Result<()>;
}

/// Registry backed by a fixed in-memory set of identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticEpochRegistry {
    identifiers: BTreeSet<String>,
}

impl Default for StaticEpochRegistry {
    fn default() -> Self {
        Self::with_identifiers(DEFAULT_EPOCH_IDENTIFIERS)
    }
}

impl StaticEpochRegistry {
    /// Create a registry with no identifiers
    pub fn empty() -> Self {
        Self {
            identifiers: BTreeSet::new(),
        }
    }

    /// Create a registry from a list of identifiers
    ///
    /// Blank entries are skipped.
    pub fn with_identifiers<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::empty();
        for id in identifiers {
            registry.register(id);
        }
        registry
    }

    /// Add an identifier; returns false if it was blank or already present
    pub fn register(&mut self, identifier: impl AsRef<str>) -> bool {
        let trimmed = identifier.as_ref().trim();
        if trimmed.is_empty() {
            return false;
        }
        self.identifiers.insert(trimmed.to_string())
    }

    /// Registered identifiers in sorted order
    pub fn identifiers(&self) -> Vec<&str> {
        self.identifiers.iter().map(String::as_str).collect()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.identifiers.contains(identifier)
    }
}

impl EpochIdentifierRegistry for StaticEpochRegistry {
    fn validate_identifier(&self, identifier: &str) -> Result<()> {
        if identifier.trim().is_empty() {
            return Err(ParamsError::EmptyIdentifier);
        }
        if !self.contains(identifier) {
            return Err(ParamsError::UnknownIdentifier(identifier.to_string()));
        }
        Ok(())
    }
}
