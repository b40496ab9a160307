//! CLI module for inspecting and validating incentives parameters
//!
//! Loads parameter files, validates them against an epoch identifier
//! registry, and dry-runs governance parameter-change proposals against an
//! in-memory store.

pub mod commands;
pub mod output;

pub use commands::{ParamsCli, ParamsCommands};
pub use output::{OutputFormat, ParamsReport};

use thiserror::Error;

use crate::error::ParamsError;

/// Errors raised by CLI commands
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid input data or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File access or I/O error
    #[error("File error: {0}")]
    FileError(String),

    /// Parameter file could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Result could not be rendered
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Store or parameter error outside of validation
    #[error("Parameter error: {0}")]
    Params(#[from] ParamsError),
}

impl CliError {
    /// Check if this is a user-facing error (vs internal)
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CliError::InvalidInput(_) | CliError::FileError(_) | CliError::ParseError(_)
        )
    }
}

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Parameters are valid / change accepted
    Success = 0,
    /// Parameters or proposed change rejected
    ValidationError = 1,
    /// Invalid input or arguments
    InvalidInput = 3,
    /// File not found or inaccessible
    FileError = 4,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    pub fn from_validation(valid: bool) -> Self {
        if valid {
            ExitCode::Success
        } else {
            ExitCode::ValidationError
        }
    }

    /// Exit code for a command that failed before producing a report
    pub fn from_error(err: &CliError) -> Self {
        match err {
            CliError::FileError(_) => ExitCode::FileError,
            e if e.is_user_error() => ExitCode::InvalidInput,
            _ => ExitCode::InternalError,
        }
    }
}

/// Run the CLI with the given arguments and return the exit code
pub fn run(cli: ParamsCli) -> Result<ExitCode, CliError> {
    let registry = commands::build_registry(&cli.epoch_identifiers);
    match cli.command {
        ParamsCommands::Defaults { format } => commands::execute_defaults(format),
        ParamsCommands::Keys { format } => commands::execute_keys(&cli.epoch_identifiers, format),
        ParamsCommands::Validate { params, format } => {
            commands::execute_validate(params, registry, format)
        }
        ParamsCommands::Propose {
            params,
            change,
            format,
        } => commands::execute_propose(params, change, registry, format),
    }
}
