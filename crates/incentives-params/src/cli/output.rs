//! Output formatting for the incentives parameters CLI
//!
//! Reports render as JSON, YAML, or a colored human-readable table.

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use super::CliError;
use crate::duration::format_duration;
use crate::error::ParamsError;
use crate::key_table::KeyTable;
use crate::params::Params;

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable table format with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
    /// YAML format
    Yaml,
}

/// Outcome of validating a parameter set or applying a proposal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamsReport {
    pub valid: bool,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
}

impl ParamsReport {
    /// Report for accepted parameters
    pub fn accepted(summary: impl Into<String>, params: Params) -> Self {
        Self {
            valid: true,
            summary: summary.into(),
            error: None,
            error_kind: None,
            params: Some(params),
        }
    }

    /// Report for a rejection; `params` are the values left in place
    pub fn rejected(summary: impl Into<String>, err: &ParamsError, params: Option<Params>) -> Self {
        Self {
            valid: false,
            summary: summary.into(),
            error: Some(err.to_string()),
            error_kind: Some(err.kind().to_string()),
            params,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<(), CliError> {
        match format {
            OutputFormat::Json => render_json(self),
            OutputFormat::Yaml => render_yaml(self),
            OutputFormat::Table => self.render_table(),
        }
    }

    fn render_table(&self) -> Result<(), CliError> {
        let mut stdout = io::stdout();

        writeln!(stdout).ok();
        writeln!(stdout, "{}", "Incentives Parameters".cyan().bold()).ok();
        writeln!(stdout, "{}", "=".repeat(60)).ok();
        writeln!(stdout).ok();

        let status = if self.valid { "+".green() } else { "x".red() };
        writeln!(stdout, "{} {}", status, self.summary).ok();

        if let Some(error) = &self.error {
            let kind = self.error_kind.as_deref().unwrap_or("error");
            writeln!(stdout, "  {} [{}] {}", "x".red(), kind.dimmed(), error.red()).ok();
        }

        if let Some(params) = &self.params {
            writeln!(stdout).ok();
            write_params_table(&mut stdout, params);
        }

        stdout.flush().ok();
        Ok(())
    }
}

fn write_params_table(stdout: &mut io::Stdout, params: &Params) {
    let rows = [
        ("enable_incentives", params.enable_incentives.to_string()),
        ("epoch_duration", format_duration(&params.epoch_duration)),
        ("allocation_limit", params.allocation_limit.to_string()),
        (
            "incentives_epoch_identifier",
            params.incentives_epoch_identifier.clone(),
        ),
    ];
    for (name, value) in rows {
        writeln!(stdout, "  {:<30} {}", name.dimmed(), value).ok();
    }
}

/// One row of the key table listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyEntry {
    pub key: String,
    pub value_type: String,
}

/// Listing of the registered key table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeysReport {
    pub subspace: String,
    pub keys: Vec<KeyEntry>,
    pub epoch_identifiers: Vec<String>,
}

impl KeysReport {
    pub fn from_table(subspace: &str, table: &KeyTable, epoch_identifiers: Vec<String>) -> Self {
        Self {
            subspace: subspace.to_string(),
            keys: table
                .keys()
                .map(|k| KeyEntry {
                    key: k.to_string(),
                    value_type: k.expected_type().to_string(),
                })
                .collect(),
            epoch_identifiers,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<(), CliError> {
        match format {
            OutputFormat::Json => render_json(self),
            OutputFormat::Yaml => render_yaml(self),
            OutputFormat::Table => {
                let mut stdout = io::stdout();
                writeln!(
                    stdout,
                    "{}",
                    format!("Parameter keys ({})", self.subspace).cyan().bold()
                )
                .ok();
                writeln!(stdout, "{}", "-".repeat(60)).ok();
                for entry in &self.keys {
                    writeln!(stdout, "  {:<30} {}", entry.key, entry.value_type.dimmed()).ok();
                }
                writeln!(stdout).ok();
                writeln!(
                    stdout,
                    "{} {}",
                    "Epoch identifiers:".dimmed(),
                    self.epoch_identifiers.join(", ")
                )
                .ok();
                stdout.flush().ok();
                Ok(())
            }
        }
    }
}

/// Print a parameter set without a status line
pub fn render_params(params: &Params, format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => render_json(params),
        OutputFormat::Yaml => render_yaml(params),
        OutputFormat::Table => {
            let mut stdout = io::stdout();
            write_params_table(&mut stdout, params);
            stdout.flush().ok();
            Ok(())
        }
    }
}

fn render_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::SerializationError(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn render_yaml<T: Serialize>(value: &T) -> Result<(), CliError> {
    let yaml =
        serde_yaml::to_string(value).map_err(|e| CliError::SerializationError(e.to_string()))?;
    println!("{}", yaml);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_report() {
        let err = ParamsError::UnknownIdentifier("fortnight".to_string());
        let report = ParamsReport::rejected("Parameters are invalid", &err, None);
        assert!(!report.valid);
        assert_eq!(report.error.as_deref(), Some("unknown epoch identifier: fortnight"));
        assert_eq!(report.error_kind.as_deref(), Some("identifier_grammar"));

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("params").is_none());
    }

    #[test]
    fn test_accepted_report_serializes_params() {
        let report = ParamsReport::accepted("Parameters are valid", Params::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["valid"], true);
        assert_eq!(json["params"]["epoch_duration"], "86400s");
        assert!(json.get("error").is_none());
    }
}
