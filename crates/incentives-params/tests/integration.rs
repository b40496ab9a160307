//! Integration tests for incentives parameters
//!
//! Covers:
//! - Default and explicit construction
//! - Check order of aggregate validation
//! - Key table registration and store writes
//! - Parameter-change proposals entering as raw JSON
//! - CLI commands against parameter files

use chrono::Duration;
use clap::Parser;
use incentives_params::cli::commands::{execute_propose, execute_validate, load_params};
use incentives_params::{
    default_genesis, default_params, run_cli, CliError, Dec, ErrorKind, ExitCode, OutputFormat,
    ParamChange, ParamKey, ParamStore, ParamValue, Params, ParamsCli, ParamsError,
    StaticEpochRegistry,
};
use std::io::Write;
use std::sync::Arc;

/// Helper to create a store initialized with the default genesis
fn create_test_store() -> ParamStore {
    let registry = Arc::new(StaticEpochRegistry::default());
    let mut store = ParamStore::new(Params::key_table(registry));
    store.init_genesis(&default_genesis()).unwrap();
    store
}

/// Helper to write a parameter file with the given extension
fn write_params_file(extension: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(&format!(".{}", extension))
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_default_params_validate() {
    assert!(default_params().validate_default_registry().is_ok());
}

#[test]
fn test_explicit_construction_round_trip() {
    let limit: Dec = "0.123456789".parse().unwrap();
    let params = Params::new(false, Duration::minutes(90), limit, "day");

    assert!(!params.enable_incentives);
    assert_eq!(params.epoch_duration, Duration::minutes(90));
    assert_eq!(params.allocation_limit, limit);
    assert_eq!(params.incentives_epoch_identifier, "day");
}

#[test]
fn test_negative_period_is_reported_first() {
    let params = Params::new(true, Duration::hours(-1), Dec::new_with_prec(5, 2), "week");
    let err = params.validate_default_registry().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RangeViolation);
    assert_eq!(err.to_string(), "epoch duration must be positive: -3600s");
}

#[test]
fn test_only_first_violation_is_reported() {
    let params = Params::new(true, Duration::zero(), Dec::nil(), "");
    let err = params.validate_default_registry().unwrap_err();
    assert!(matches!(err, ParamsError::NonPositive { field: "epoch duration", .. }));
}

#[test]
fn test_allocation_limit_bounds() {
    let over = Params::new(true, Duration::hours(24), Dec::new_with_prec(15, 1), "week");
    assert_eq!(
        over.validate_default_registry().unwrap_err().kind(),
        ErrorKind::RangeViolation
    );

    let full = Params::new(true, Duration::hours(24), Dec::one(), "week");
    assert!(full.validate_default_registry().is_ok());
}

#[test]
fn test_unregistered_identifier_fails() {
    let params = Params::new(true, Duration::hours(24), Dec::new_with_prec(5, 2), "fortnight");
    let err = params.validate_default_registry().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IdentifierGrammar);
    assert_eq!(err.to_string(), "unknown epoch identifier: fortnight");
}

#[test]
fn test_store_holds_each_key() {
    let store = create_test_store();
    for key in ParamKey::ALL {
        assert!(store.has(key), "missing {}", key);
    }
    assert_eq!(
        store.get(ParamKey::AllocationLimit).unwrap(),
        ParamValue::Dec(Dec::new_with_prec(5, 2))
    );
    assert_eq!(store.export_genesis().unwrap(), default_genesis());
}

#[test]
fn test_bool_candidate_must_be_bool() {
    let mut store = create_test_store();
    for raw in ["0", "1", "\"true\""] {
        let err = store
            .update(b"EnableIncentives", raw.as_bytes())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch, "raw {}", raw);
    }
    store.update(b"EnableIncentives", b"false").unwrap();
    assert!(!store.get_params().unwrap().enable_incentives);
}

#[test]
fn test_rejected_proposal_keeps_committed_values() {
    let mut store = create_test_store();
    let changes = vec![
        ParamChange::incentives("AllocationLimit", "\"0.5\""),
        ParamChange::incentives("EpochIdentifier", "\"fortnight\""),
    ];

    let err = store.apply_changes(&changes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IdentifierGrammar);
    assert_eq!(store.get_params().unwrap(), default_params());
}

#[test]
fn test_accepted_proposal_commits_all_changes() {
    let mut store = create_test_store();
    let changes = vec![
        ParamChange::incentives("AllocationLimit", "\"1\""),
        ParamChange::incentives("EpochIdentifier", "\"day\""),
        ParamChange::incentives("EpochDuration", "\"3600s\""),
    ];

    store.apply_changes(&changes).unwrap();
    let params = store.get_params().unwrap();
    assert_eq!(params.allocation_limit, Dec::one());
    assert_eq!(params.incentives_epoch_identifier, "day");
    assert_eq!(params.epoch_duration, Duration::hours(1));
}

#[test]
fn test_custom_registry_accepts_new_identifier() {
    let registry = Arc::new(StaticEpochRegistry::with_identifiers(["day", "week", "fortnight"]));
    let mut store = ParamStore::new(Params::key_table(registry));
    store.set_params(&default_params()).unwrap();

    store.update(b"EpochIdentifier", b"\"fortnight\"").unwrap();
    assert_eq!(
        store.get_params().unwrap().incentives_epoch_identifier,
        "fortnight"
    );
}

#[test]
fn test_load_params_file() {
    let file = write_params_file(
        "yaml",
        "enable_incentives: true\nepoch_duration: 604800s\nallocation_limit: \"0.25\"\nincentives_epoch_identifier: week\n",
    );
    let params = load_params(file.path()).unwrap();
    assert_eq!(params.epoch_duration, Duration::weeks(1));
    assert_eq!(params.allocation_limit, Dec::new_with_prec(25, 2));
}

#[test]
fn test_cli_validate_exit_codes() {
    let registry = Arc::new(StaticEpochRegistry::default());

    let valid = write_params_file("json", &serde_json::to_string(&default_params()).unwrap());
    let code = execute_validate(valid.path().to_path_buf(), registry.clone(), OutputFormat::Json)
        .unwrap();
    assert_eq!(code, ExitCode::Success);

    let invalid = write_params_file(
        "toml",
        "enable_incentives = true\nepoch_duration = \"86400s\"\nallocation_limit = \"1.5\"\nincentives_epoch_identifier = \"week\"\n",
    );
    let code =
        execute_validate(invalid.path().to_path_buf(), registry, OutputFormat::Json).unwrap();
    assert_eq!(code, ExitCode::ValidationError);
}

#[test]
fn test_cli_propose_exit_codes() {
    let registry = Arc::new(StaticEpochRegistry::default());
    let file = write_params_file("json", &serde_json::to_string(&default_params()).unwrap());

    let code = execute_propose(
        file.path().to_path_buf(),
        vec!["EpochDuration=\"3600s\"".to_string()],
        registry.clone(),
        OutputFormat::Json,
    )
    .unwrap();
    assert_eq!(code, ExitCode::Success);

    let code = execute_propose(
        file.path().to_path_buf(),
        vec!["EpochDuration=\"-1s\"".to_string()],
        registry.clone(),
        OutputFormat::Json,
    )
    .unwrap();
    assert_eq!(code, ExitCode::ValidationError);

    let err = execute_propose(
        file.path().to_path_buf(),
        vec!["NoSuchKey=true".to_string()],
        registry,
        OutputFormat::Json,
    )
    .unwrap_err();
    assert!(matches!(err, CliError::InvalidInput(_)));
    assert_eq!(ExitCode::from_error(&err), ExitCode::InvalidInput);
}

#[test]
fn test_cli_unknown_change_key_is_invalid_input() {
    let file = write_params_file("json", &serde_json::to_string(&default_params()).unwrap());
    let cli = ParamsCli::try_parse_from([
        "incentives-params",
        "propose",
        "--params",
        file.path().to_str().unwrap(),
        "--change",
        "NoSuchKey=true",
        "--format",
        "json",
    ])
    .unwrap();
    assert_eq!(run_cli(cli), ExitCode::InvalidInput);
}
