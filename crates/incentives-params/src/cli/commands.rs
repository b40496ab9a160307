//! CLI command definitions for the incentives parameters tool
//!
//! Provides Clap-based commands for printing defaults, listing the key
//! table, validating parameter files and dry-running parameter changes.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::output::{render_params, KeysReport, OutputFormat, ParamsReport};
use super::{CliError, ExitCode};
use crate::epoch::{EpochIdentifierRegistry, StaticEpochRegistry};
use crate::error::ParamsError;
use crate::params::{default_params, Params, MODULE_NAME};
use crate::store::{ParamChange, ParamStore};

/// Incentives parameters CLI
///
/// Inspect, validate and dry-run changes to the incentives module parameters.
#[derive(Parser, Debug)]
#[command(name = "incentives-params")]
#[command(about = "Validate incentives module parameters", long_about = None)]
#[command(version)]
pub struct ParamsCli {
    /// Output verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Registered epoch identifiers (comma-separated)
    #[arg(
        long,
        global = true,
        env = "INCENTIVES_EPOCH_IDENTIFIERS",
        value_delimiter = ',',
        default_value = "day,week"
    )]
    pub epoch_identifiers: Vec<String>,

    #[command(subcommand)]
    pub command: ParamsCommands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum ParamsCommands {
    /// Print the default parameters
    Defaults {
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// List the registered parameter keys
    Keys {
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Validate a parameter file (json, yaml or toml)
    Validate {
        /// Path to the parameter file
        #[arg(short, long)]
        params: PathBuf,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Dry-run a parameter-change proposal against a parameter file
    ///
    /// Changes are applied in order; the first rejected change aborts the
    /// proposal and no change is kept.
    Propose {
        /// Path to the current parameter file
        #[arg(short, long)]
        params: PathBuf,

        /// Change as KEY=JSON, e.g. EpochDuration='"3600s"'
        #[arg(short, long = "change", required = true)]
        change: Vec<String>,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

/// Build the epoch registry from the configured identifiers
pub fn build_registry(identifiers: &[String]) -> Arc<dyn EpochIdentifierRegistry> {
    Arc::new(StaticEpochRegistry::with_identifiers(identifiers))
}

/// Execute the defaults command
pub fn execute_defaults(format: OutputFormat) -> Result<ExitCode, CliError> {
    render_params(&default_params(), format)?;
    Ok(ExitCode::Success)
}

/// Execute the keys command
pub fn execute_keys(identifiers: &[String], format: OutputFormat) -> Result<ExitCode, CliError> {
    let registry = StaticEpochRegistry::with_identifiers(identifiers);
    let registered = registry.identifiers().into_iter().map(String::from).collect();
    let table = Params::key_table(Arc::new(registry));
    KeysReport::from_table(MODULE_NAME, &table, registered).render(format)?;
    Ok(ExitCode::Success)
}

/// Execute the validate command
pub fn execute_validate(
    path: PathBuf,
    registry: Arc<dyn EpochIdentifierRegistry>,
    format: OutputFormat,
) -> Result<ExitCode, CliError> {
    let params = load_params(&path)?;

    let report = match params.validate(registry.as_ref()) {
        Ok(()) => ParamsReport::accepted("Parameters are valid", params),
        Err(err) => {
            tracing::debug!(error = %err, path = %path.display(), "Parameter validation failed");
            ParamsReport::rejected("Parameters are invalid", &err, Some(params))
        }
    };
    report.render(format)?;

    Ok(ExitCode::from_validation(report.valid))
}

/// Execute the propose command
pub fn execute_propose(
    path: PathBuf,
    changes: Vec<String>,
    registry: Arc<dyn EpochIdentifierRegistry>,
    format: OutputFormat,
) -> Result<ExitCode, CliError> {
    let params = load_params(&path)?;
    let changes = changes
        .iter()
        .map(String::as_str)
        .map(parse_change)
        .collect::<Result<Vec<_>, _>>()?;

    let mut store = ParamStore::new(Params::key_table(registry));
    if let Err(err) = store.set_params(&params) {
        let report = ParamsReport::rejected("Current parameters are invalid", &err, Some(params));
        report.render(format)?;
        return Ok(ExitCode::ValidationError);
    }

    let report = match store.apply_changes(&changes) {
        Ok(()) => ParamsReport::accepted(
            format!("Proposal accepted ({} change(s))", changes.len()),
            store.get_params()?,
        ),
        Err(err) if err.is_validation_error() => {
            ParamsReport::rejected("Proposal rejected", &err, Some(store.get_params()?))
        }
        Err(err @ (ParamsError::UnknownKey(_) | ParamsError::Subspace { .. })) => {
            return Err(CliError::InvalidInput(err.to_string()))
        }
        Err(err) => return Err(err.into()),
    };
    report.render(format)?;

    Ok(ExitCode::from_validation(report.valid))
}

/// Parse a `KEY=JSON` change argument
pub fn parse_change(arg: &str) -> Result<ParamChange, CliError> {
    let (key, value) = arg.split_once('=').ok_or_else(|| {
        CliError::InvalidInput(format!("Change '{}' must have the form KEY=JSON", arg))
    })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "Change '{}' has an empty key",
            arg
        )));
    }
    Ok(ParamChange::incentives(key, value))
}

/// Load parameters from a file, choosing the format by extension
pub fn load_params(path: &Path) -> Result<Params, CliError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        CliError::FileError(format!(
            "Failed to read params file '{}': {}",
            path.display(),
            e
        ))
    })?;
    parse_params(path, &content)
}

fn parse_params(path: &Path, content: &str) -> Result<Params, CliError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "json" => serde_json::from_str(content)
            .map_err(|e| CliError::ParseError(format!("Invalid JSON: {}", e))),
        "yaml" | "yml" => serde_yaml::from_str(content)
            .map_err(|e| CliError::ParseError(format!("Invalid YAML: {}", e))),
        "toml" => {
            toml::from_str(content).map_err(|e| CliError::ParseError(format!("Invalid TOML: {}", e)))
        }
        _ => Err(CliError::InvalidInput(format!(
            "Unsupported file format: {}. Supported formats: json, yaml, yml, toml",
            extension
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dec::Dec;
    use chrono::Duration;

    #[test]
    fn test_cli_parsing() {
        let cli = ParamsCli::try_parse_from([
            "incentives-params",
            "--epoch-identifiers",
            "day,week,month",
            "validate",
            "--params",
            "params.json",
        ])
        .unwrap();
        assert_eq!(cli.epoch_identifiers, vec!["day", "week", "month"]);
        assert!(matches!(cli.command, ParamsCommands::Validate { .. }));
    }

    #[test]
    fn test_propose_requires_change() {
        let result =
            ParamsCli::try_parse_from(["incentives-params", "propose", "--params", "p.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_change() {
        let change = parse_change("EpochDuration=\"3600s\"").unwrap();
        assert_eq!(change, ParamChange::incentives("EpochDuration", "\"3600s\""));

        assert!(matches!(parse_change("EpochDuration"), Err(CliError::InvalidInput(_))));
        assert!(matches!(parse_change("=true"), Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_parse_params_formats() {
        let json = r#"{"enable_incentives": true, "epoch_duration": "86400s",
            "allocation_limit": "0.05", "incentives_epoch_identifier": "week"}"#;
        assert_eq!(parse_params(Path::new("p.json"), json).unwrap(), default_params());

        let yaml = "enable_incentives: false\nepoch_duration: 3600s\nallocation_limit: \"0.5\"\nincentives_epoch_identifier: day\n";
        let params = parse_params(Path::new("p.yaml"), yaml).unwrap();
        assert!(!params.enable_incentives);
        assert_eq!(params.epoch_duration, Duration::hours(1));
        assert_eq!(params.allocation_limit, Dec::new_with_prec(5, 1));

        let toml = "enable_incentives = true\nepoch_duration = \"86400s\"\nallocation_limit = \"0.05\"\nincentives_epoch_identifier = \"week\"\n";
        assert_eq!(parse_params(Path::new("p.toml"), toml).unwrap(), default_params());

        assert!(matches!(
            parse_params(Path::new("p.ini"), ""),
            Err(CliError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_params(Path::new("p.json"), "{"),
            Err(CliError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_params_missing_file() {
        let err = load_params(Path::new("/nonexistent/params.json")).unwrap_err();
        assert!(matches!(err, CliError::FileError(_)));
    }
}
