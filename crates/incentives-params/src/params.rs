//! Incentives module parameters
//!
//! [`Params`] holds the four governance-adjustable settings. Construction and
//! validation are separate steps: [`Params::new`] accepts any values so that
//! candidate states can be inspected before [`Params::validate`] decides
//! whether they may be committed.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::dec::Dec;
use crate::epoch::{EpochIdentifierRegistry, StaticEpochRegistry};
use crate::error::Result;
use crate::validators::{validate_bool, validate_percentage, validate_period};

/// Name of the module and of its parameter subspace
pub const MODULE_NAME: &str = "incentives";

/// Epoch identifier used when none is configured
pub const DEFAULT_EPOCH_IDENTIFIER: &str = "week";

/// One day
pub fn default_epoch_duration() -> Duration {
    Duration::hours(24)
}

/// 5%
pub fn default_allocation_limit() -> Dec {
    Dec::new_with_prec(5, 2)
}

/// Governance-adjustable parameters of the incentives module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Params {
    /// Whether incentives are distributed at all
    pub enable_incentives: bool,
    /// Length of an incentives epoch
    #[serde(with = "crate::duration::serde_duration")]
    pub epoch_duration: Duration,
    /// Upper bound on the share of rewards a single incentive may allocate
    pub allocation_limit: Dec,
    /// Epoch whose end triggers incentive distribution
    pub incentives_epoch_identifier: String,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            enable_incentives: true,
            epoch_duration: default_epoch_duration(),
            allocation_limit: default_allocation_limit(),
            incentives_epoch_identifier: DEFAULT_EPOCH_IDENTIFIER.to_string(),
        }
    }
}

impl Params {
    /// Create params from explicit values without validating them
    pub fn new(
        enable_incentives: bool,
        epoch_duration: Duration,
        allocation_limit: Dec,
        incentives_epoch_identifier: impl Into<String>,
    ) -> Self {
        Self {
            enable_incentives,
            epoch_duration,
            allocation_limit,
            incentives_epoch_identifier: incentives_epoch_identifier.into(),
        }
    }

    /// Check every field in declaration order, returning the first violation
    pub fn validate(&self, registry: &dyn EpochIdentifierRegistry) -> Result<()> {
        validate_bool(self.enable_incentives)?;
        validate_period(&self.epoch_duration)?;
        validate_percentage(&self.allocation_limit)?;
        registry.validate_identifier(&self.incentives_epoch_identifier)
    }

    /// [`Params::validate`] against the default `day`/`week` registry
    pub fn validate_default_registry(&self) -> Result<()> {
        self.validate(&StaticEpochRegistry::default())
    }
}

/// Default parameters
pub fn default_params() -> Params {
    Params::default()
}
