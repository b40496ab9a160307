//! Genesis state of the incentives parameters

use serde::{Deserialize, Serialize};

use crate::epoch::EpochIdentifierRegistry;
use crate::error::Result;
use crate::params::Params;
use crate::store::ParamStore;

/// Parameters the module starts with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenesisState {
    pub params: Params,
}

impl GenesisState {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    pub fn validate(&self, registry: &dyn EpochIdentifierRegistry) -> Result<()> {
        self.params.validate(registry)
    }
}

/// Genesis state built from [`Params::default`]
pub fn default_genesis() -> GenesisState {
    GenesisState::default()
}

impl ParamStore {
    /// Install the genesis parameters
    pub fn init_genesis(&mut self, genesis: &GenesisState) -> Result<()> {
        genesis.validate(self.key_table().registry())?;
        self.set_params(&genesis.params)
    }

    /// Export the committed parameters as genesis state
    pub fn export_genesis(&self) -> Result<GenesisState> {
        Ok(GenesisState::new(self.get_params()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dec::Dec;
    use crate::epoch::StaticEpochRegistry;
    use chrono::Duration;
    use std::sync::Arc;

    fn empty_store() -> ParamStore {
        ParamStore::new(Params::key_table(Arc::new(StaticEpochRegistry::default())))
    }

    #[test]
    fn test_default_genesis_is_valid() {
        let registry = StaticEpochRegistry::default();
        assert!(default_genesis().validate(&registry).is_ok());
    }

    #[test]
    fn test_init_and_export_genesis() {
        let mut store = empty_store();
        let genesis = GenesisState::new(Params::new(
            false,
            Duration::hours(1),
            Dec::new_with_prec(25, 2),
            "day",
        ));
        store.init_genesis(&genesis).unwrap();
        assert_eq!(store.export_genesis().unwrap(), genesis);
    }

    #[test]
    fn test_init_genesis_rejects_invalid() {
        let mut store = empty_store();
        let genesis = GenesisState::new(Params::new(true, Duration::zero(), Dec::one(), "week"));
        assert!(store.init_genesis(&genesis).is_err());
        assert!(!store.has(crate::keys::ParamKey::EnableIncentives));
    }

    #[test]
    fn test_genesis_json() {
        let genesis: GenesisState = serde_json::from_str(
            r#"{"params": {"enable_incentives": true, "epoch_duration": "604800s",
                "allocation_limit": "0.1", "incentives_epoch_identifier": "week"}}"#,
        )
        .unwrap();
        assert_eq!(genesis.params.epoch_duration, Duration::weeks(1));
        assert_eq!(genesis.params.allocation_limit, Dec::new_with_prec(1, 1));
    }
}
