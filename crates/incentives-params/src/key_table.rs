//! Parameter key table
//!
//! Binds each [`Params`] field to its store key and validator. The host store
//! installs the table once at module initialization and consults it on every
//! write. Registering a key twice or leaving one out is a programming error
//! and panics at startup.

use std::fmt;
use std::sync::Arc;

use crate::epoch::EpochIdentifierRegistry;
use crate::error::{ParamsError, Result};
use crate::keys::{ParamKey, ParamValue};
use crate::params::Params;
use crate::validators::{validate_bool_value, validate_percentage_value, validate_period_value};

/// Validator bound to a key
pub type ValueValidator = fn(&ParamValue, &dyn EpochIdentifierRegistry) -> Result<()>;

/// Binding of one parameter field to its key and validator
#[derive(Clone, Copy)]
pub struct ParamSetPair {
    pub key: ParamKey,
    /// Read the field out of a param set
    pub get: fn(&Params) -> ParamValue,
    /// Write an already-validated value into a param set
    pub set: fn(&mut Params, ParamValue) -> Result<()>,
    pub validator: ValueValidator,
}

impl fmt::Debug for ParamSetPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamSetPair").field("key", &self.key).finish()
    }
}

impl ParamSetPair {
    pub fn new(
        key: ParamKey,
        get: fn(&Params) -> ParamValue,
        set: fn(&mut Params, ParamValue) -> Result<()>,
        validator: ValueValidator,
    ) -> Self {
        Self {
            key,
            get,
            set,
            validator,
        }
    }
}

fn bool_validator(value: &ParamValue, _registry: &dyn EpochIdentifierRegistry) -> Result<()> {
    validate_bool_value(value)
}

fn period_validator(value: &ParamValue, _registry: &dyn EpochIdentifierRegistry) -> Result<()> {
    validate_period_value(value)
}

fn percentage_validator(value: &ParamValue, _registry: &dyn EpochIdentifierRegistry) -> Result<()> {
    validate_percentage_value(value)
}

fn identifier_validator(value: &ParamValue, registry: &dyn EpochIdentifierRegistry) -> Result<()> {
    registry.validate_identifier_value(value)
}

fn mismatch(value: ParamValue) -> ParamsError {
    ParamsError::invalid_type(value.type_name())
}

impl Params {
    /// Field bindings in [`ParamKey::ALL`] order
    pub fn param_set_pairs() -> [ParamSetPair; 4] {
        [
            ParamSetPair::new(
                ParamKey::EnableIncentives,
                |p| ParamValue::Bool(p.enable_incentives),
                |p, v| match v {
                    ParamValue::Bool(b) => {
                        p.enable_incentives = b;
                        Ok(())
                    }
                    other => Err(mismatch(other)),
                },
                bool_validator,
            ),
            ParamSetPair::new(
                ParamKey::EpochDuration,
                |p| ParamValue::Duration(p.epoch_duration),
                |p, v| match v {
                    ParamValue::Duration(d) => {
                        p.epoch_duration = d;
                        Ok(())
                    }
                    other => Err(mismatch(other)),
                },
                period_validator,
            ),
            ParamSetPair::new(
                ParamKey::AllocationLimit,
                |p| ParamValue::Dec(p.allocation_limit),
                |p, v| match v {
                    ParamValue::Dec(d) => {
                        p.allocation_limit = d;
                        Ok(())
                    }
                    other => Err(mismatch(other)),
                },
                percentage_validator,
            ),
            ParamSetPair::new(
                ParamKey::EpochIdentifier,
                |p| ParamValue::String(p.incentives_epoch_identifier.clone()),
                |p, v| match v {
                    ParamValue::String(s) => {
                        p.incentives_epoch_identifier = s;
                        Ok(())
                    }
                    other => Err(mismatch(other)),
                },
                identifier_validator,
            ),
        ]
    }

    /// Registration table for the host parameter store
    pub fn key_table(registry: Arc<dyn EpochIdentifierRegistry>) -> KeyTable {
        KeyTable::new(registry).register_param_set(Params::param_set_pairs())
    }
}

/// Ordered, immutable set of key bindings
#[derive(Clone)]
pub struct KeyTable {
    pairs: Vec<ParamSetPair>,
    registry: Arc<dyn EpochIdentifierRegistry>,
}

impl fmt::Debug for KeyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyTable").field("pairs", &self.pairs).finish()
    }
}

impl KeyTable {
    /// Create an empty table
    pub fn new(registry: Arc<dyn EpochIdentifierRegistry>) -> Self {
        Self {
            pairs: Vec::with_capacity(ParamKey::ALL.len()),
            registry,
        }
    }

    /// Register a single binding
    ///
    /// # Panics
    ///
    /// Panics if the key is already registered.
    pub fn register_type(mut self, pair: ParamSetPair) -> Self {
        if self.pairs.iter().any(|p| p.key == pair.key) {
            panic!("duplicate parameter key: {}", pair.key);
        }
        self.pairs.push(pair);
        self
    }

    /// Register a complete param set
    ///
    /// # Panics
    ///
    /// Panics on a duplicate key or if any key of [`ParamKey::ALL`] is missing
    /// once the set is registered.
    pub fn register_param_set<I>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = ParamSetPair>,
    {
        let table = pairs
            .into_iter()
            .fold(self, |table, pair| table.register_type(pair));
        for key in ParamKey::ALL {
            if table.get(key).is_none() {
                panic!("parameter key not registered: {}", key);
            }
        }
        table
    }

    /// Binding for a raw store key
    pub fn pair(&self, key: &[u8]) -> Option<&ParamSetPair> {
        self.pairs.iter().find(|p| p.key.as_bytes() == key)
    }

    /// Binding for a typed key
    pub fn get(&self, key: ParamKey) -> Option<&ParamSetPair> {
        self.pairs.iter().find(|p| p.key == key)
    }

    /// Registered keys in registration order
    pub fn keys(&self) -> impl Iterator<Item = ParamKey> + '_ {
        self.pairs.iter().map(|p| p.key)
    }

    pub fn pairs(&self) -> &[ParamSetPair] {
        &self.pairs
    }

    pub fn registry(&self) -> &dyn EpochIdentifierRegistry {
        self.registry.as_ref()
    }

    /// Run the validator bound to `key`
    pub fn validate_value(&self, key: ParamKey, value: &ParamValue) -> Result<()> {
        let pair = self
            .get(key)
            .ok_or_else(|| ParamsError::UnknownKey(key.to_string()))?;
        (pair.validator)(value, self.registry())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dec::Dec;
    use crate::epoch::StaticEpochRegistry;
    use chrono::Duration;

    fn registry() -> Arc<dyn EpochIdentifierRegistry> {
        Arc::new(StaticEpochRegistry::default())
    }

    #[test]
    fn test_key_table_order() {
        let table = Params::key_table(registry());
        let keys: Vec<ParamKey> = table.keys().collect();
        assert_eq!(keys, ParamKey::ALL.to_vec());
        assert!(table.pair(b"AllocationLimit").is_some());
        assert!(table.pair(b"allocationlimit").is_none());
    }

    #[test]
    #[should_panic(expected = "duplicate parameter key: EpochDuration")]
    fn test_duplicate_key_panics() {
        let pairs = Params::param_set_pairs();
        let _ = KeyTable::new(registry())
            .register_param_set(pairs)
            .register_type(pairs[1]);
    }

    #[test]
    #[should_panic(expected = "parameter key not registered: EpochIdentifier")]
    fn test_missing_key_panics() {
        let pairs = Params::param_set_pairs();
        let _ = KeyTable::new(registry()).register_param_set(pairs.into_iter().take(3));
    }

    #[test]
    fn test_get_and_set_bind_fields() {
        let mut params = Params::default();
        for pair in Params::param_set_pairs() {
            let value = (pair.get)(&params);
            (pair.set)(&mut params, value).unwrap();
        }
        assert_eq!(params, Params::default());

        let pair = Params::param_set_pairs()[2];
        (pair.set)(&mut params, ParamValue::Dec(Dec::one())).unwrap();
        assert_eq!(params.allocation_limit, Dec::one());

        let err = (pair.set)(&mut params, ParamValue::Bool(true)).unwrap_err();
        assert_eq!(err, ParamsError::invalid_type("bool"));
        assert_eq!(params.allocation_limit, Dec::one());
    }

    #[test]
    fn test_validate_value() {
        let table = Params::key_table(registry());
        assert!(table
            .validate_value(ParamKey::EpochDuration, &ParamValue::Duration(Duration::hours(1)))
            .is_ok());
        assert!(table
            .validate_value(ParamKey::EpochDuration, &ParamValue::Duration(Duration::zero()))
            .is_err());
        assert_eq!(
            table.validate_value(ParamKey::EnableIncentives, &ParamValue::String("true".into())),
            Err(ParamsError::invalid_type("string"))
        );
        // Registration accepts any non-empty string; the strict check runs
        // during aggregate validation.
        assert!(table
            .validate_value(ParamKey::EpochIdentifier, &ParamValue::String("fortnight".into()))
            .is_ok());
        assert_eq!(
            table.validate_value(ParamKey::EpochIdentifier, &ParamValue::String(String::new())),
            Err(ParamsError::EmptyIdentifier)
        );
    }
}
