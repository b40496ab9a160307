//! Incentives module parameters
//!
//! Declares, defaults and validates the four governance-adjustable settings of
//! the incentives module, and binds each of them to a stable parameter store
//! key.
//!
//! ## Architecture
//!
//! 1. **Validators** (`validators`): pure per-field checks. Each stops at the
//!    first violation.
//!
//! 2. **Key table** (`key_table`): the closed, ordered set of bindings from
//!    store key to field accessor and validator, installed once by the host
//!    store.
//!
//! 3. **Params** (`params`): the parameter aggregate with its default and
//!    explicit constructors and the aggregate validation entry point.
//!
//! 4. **Store** (`store`, `genesis`): an in-memory parameter subspace that
//!    gates every write on the key table and applies governance
//!    parameter-change proposals all-or-nothing.
//!
//! The set of legal epoch identifiers is owned by the epochs module and is
//! consulted through [`EpochIdentifierRegistry`].
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::Duration;
//! use incentives_params::{Dec, ErrorKind, ParamStore, Params, StaticEpochRegistry};
//!
//! let registry = StaticEpochRegistry::default();
//! assert!(Params::default().validate(&registry).is_ok());
//!
//! let candidate = Params::new(true, Duration::hours(-1), Dec::new_with_prec(5, 2), "week");
//! let err = candidate.validate(&registry).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::RangeViolation);
//!
//! let mut store = ParamStore::new(Params::key_table(Arc::new(registry)));
//! store.set_params(&Params::default()).unwrap();
//! store.update(b"EpochDuration", b"\"3600s\"").unwrap();
//! assert_eq!(store.get_params().unwrap().epoch_duration, Duration::hours(1));
//! ```

pub mod cli;
pub mod dec;
pub mod duration;
pub mod epoch;
pub mod error;
pub mod genesis;
pub mod key_table;
pub mod keys;
pub mod params;
pub mod store;
pub mod validators;

pub use dec::Dec;
pub use epoch::{EpochIdentifierRegistry, StaticEpochRegistry, DEFAULT_EPOCH_IDENTIFIERS};
pub use error::{ErrorKind, ParamsError, Result};
pub use genesis::{default_genesis, GenesisState};
pub use key_table::{KeyTable, ParamSetPair, ValueValidator};
pub use keys::{ParamKey, ParamValue};
pub use params::{default_params, Params, DEFAULT_EPOCH_IDENTIFIER, MODULE_NAME};
pub use store::{ParamChange, ParamStore};
pub use validators::{validate_bool, validate_percentage, validate_period};

pub use cli::{CliError, ExitCode, OutputFormat, ParamsCli, ParamsCommands};

/// Run the CLI application
///
/// This is the main entry point for the CLI binary.
pub fn run_cli(cli: ParamsCli) -> ExitCode {
    match cli::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from_error(&e)
        }
    }
}
