//! In-memory parameter subspace
//!
//! Stand-in for the host's durable parameter namespace. Values are kept
//! JSON-encoded under `<subspace>/<key>`, and every write is gated by the
//! installed [`KeyTable`] plus aggregate validation of the resulting
//! [`Params`]. A rejected write leaves the committed values untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ParamsError, Result};
use crate::key_table::KeyTable;
use crate::keys::{ParamKey, ParamValue};
use crate::params::{Params, MODULE_NAME};

/// One change of a governance parameter-change proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamChange {
    pub subspace: String,
    pub key: String,
    /// JSON-encoded candidate value
    pub value: String,
}

impl ParamChange {
    pub fn new(
        subspace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            subspace: subspace.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    /// Change addressed to the incentives subspace
    pub fn incentives(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(MODULE_NAME, key, value)
    }
}

/// Parameter subspace of a single module
#[derive(Debug, Clone)]
pub struct ParamStore {
    name: String,
    table: KeyTable,
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl ParamStore {
    /// Create an empty incentives subspace with its key table installed
    pub fn new(table: KeyTable) -> Self {
        Self::with_name(MODULE_NAME, table)
    }

    pub fn with_name(name: impl Into<String>, table: KeyTable) -> Self {
        Self {
            name: name.into(),
            table,
            entries: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key_table(&self) -> &KeyTable {
        &self.table
    }

    fn store_key(&self, key: ParamKey) -> Vec<u8> {
        let mut full = Vec::with_capacity(self.name.len() + 1 + key.as_bytes().len());
        full.extend_from_slice(self.name.as_bytes());
        full.push(b'/');
        full.extend_from_slice(key.as_bytes());
        full
    }

    pub fn has(&self, key: ParamKey) -> bool {
        self.entries.contains_key(&self.store_key(key))
    }

    /// Read and decode the value under `key`
    pub fn get(&self, key: ParamKey) -> Result<ParamValue> {
        let raw = self
            .entries
            .get(&self.store_key(key))
            .ok_or_else(|| ParamsError::NotInitialized(key.to_string()))?;
        key.decode_value(raw)
    }

    /// Read the full param set
    pub fn get_params(&self) -> Result<Params> {
        let mut params = Params::default();
        for pair in self.table.pairs() {
            let value = self.get(pair.key)?;
            (pair.set)(&mut params, value)?;
        }
        Ok(params)
    }

    /// Validate and write a full param set
    pub fn set_params(&mut self, params: &Params) -> Result<()> {
        for pair in self.table.pairs() {
            (pair.validator)(&(pair.get)(params), self.table.registry())?;
        }
        params.validate(self.table.registry())?;

        self.commit(params)?;
        tracing::info!(subspace = %self.name, "Parameter set committed");
        Ok(())
    }

    /// Apply a single raw update to the value under `key`
    pub fn update(&mut self, key: &[u8], raw: &[u8]) -> Result<()> {
        let mut params = self.get_params()?;
        let key = self.stage(&mut params, key, raw)?;
        self.commit(&params)?;
        tracing::info!(subspace = %self.name, key = %key, "Parameter updated");
        Ok(())
    }

    /// Apply all changes of a parameter-change proposal, or none of them
    pub fn apply_changes(&mut self, changes: &[ParamChange]) -> Result<()> {
        let mut params = self.get_params()?;
        for change in changes {
            if change.subspace != self.name {
                let err = ParamsError::Subspace {
                    expected: self.name.clone(),
                    actual: change.subspace.clone(),
                };
                tracing::debug!(error = %err, "Parameter change rejected");
                return Err(err);
            }
            self.stage(&mut params, change.key.as_bytes(), change.value.as_bytes())?;
        }
        self.commit(&params)?;
        tracing::info!(
            subspace = %self.name,
            changes = changes.len(),
            "Parameter change proposal applied"
        );
        Ok(())
    }

    /// Decode, validate and write one candidate into `params`
    fn stage(&self, params: &mut Params, key: &[u8], raw: &[u8]) -> Result<ParamKey> {
        let result = self.stage_inner(params, key, raw);
        if let Err(err) = &result {
            tracing::debug!(
                key = %String::from_utf8_lossy(key),
                error = %err,
                kind = %err.kind(),
                "Parameter change rejected"
            );
        }
        result
    }

    fn stage_inner(&self, params: &mut Params, key: &[u8], raw: &[u8]) -> Result<ParamKey> {
        let pair = self
            .table
            .pair(key)
            .ok_or_else(|| ParamsError::UnknownKey(String::from_utf8_lossy(key).into_owned()))?;

        let value = pair.key.decode_value(raw)?;
        (pair.validator)(&value, self.table.registry())?;

        let mut candidate = params.clone();
        (pair.set)(&mut candidate, value)?;
        candidate.validate(self.table.registry())?;

        *params = candidate;
        Ok(pair.key)
    }

    fn commit(&mut self, params: &Params) -> Result<()> {
        let mut staged = Vec::with_capacity(self.table.pairs().len());
        for pair in self.table.pairs() {
            staged.push((pair.key, (pair.get)(params).encode()?));
        }
        for (key, raw) in staged {
            self.entries.insert(self.store_key(key), raw);
        }
        Ok(())
    }
}
