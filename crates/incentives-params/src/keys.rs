//! Parameter store keys and untyped candidate values
//!
//! The four keys are the durable storage addresses of the incentives
//! parameters. Their byte spelling must never change once deployed.
//!
//! Values proposed by governance arrive as raw JSON bytes. [`ParamKey::decode_value`]
//! is the boundary where such a value is given its static type; a value of the
//! wrong JSON kind is reported as a type mismatch.

use chrono::Duration;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::dec::Dec;
use crate::duration::{format_duration, parse_duration};
use crate::error::{ParamsError, Result};

/// Store key of `enable_incentives`
pub const PARAM_STORE_KEY_ENABLE_INCENTIVES: &[u8] = b"EnableIncentives";
/// Store key of `epoch_duration`
pub const PARAM_STORE_KEY_EPOCH_DURATION: &[u8] = b"EpochDuration";
/// Store key of `allocation_limit`
pub const PARAM_STORE_KEY_ALLOCATION_LIMIT: &[u8] = b"AllocationLimit";
/// Store key of `incentives_epoch_identifier`
pub const PARAM_STORE_KEY_EPOCH_IDENTIFIER: &[u8] = b"EpochIdentifier";

/// Closed set of incentives parameter keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamKey {
    EnableIncentives,
    EpochDuration,
    AllocationLimit,
    EpochIdentifier,
}

impl ParamKey {
    /// All keys in registration order
    pub const ALL: [ParamKey; 4] = [
        ParamKey::EnableIncentives,
        ParamKey::EpochDuration,
        ParamKey::AllocationLimit,
        ParamKey::EpochIdentifier,
    ];

    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            ParamKey::EnableIncentives => PARAM_STORE_KEY_ENABLE_INCENTIVES,
            ParamKey::EpochDuration => PARAM_STORE_KEY_EPOCH_DURATION,
            ParamKey::AllocationLimit => PARAM_STORE_KEY_ALLOCATION_LIMIT,
            ParamKey::EpochIdentifier => PARAM_STORE_KEY_EPOCH_IDENTIFIER,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKey::EnableIncentives => "EnableIncentives",
            ParamKey::EpochDuration => "EpochDuration",
            ParamKey::AllocationLimit => "AllocationLimit",
            ParamKey::EpochIdentifier => "EpochIdentifier",
        }
    }

    /// Look up a key by its store spelling
    pub fn from_bytes(bytes: &[u8]) -> Option<ParamKey> {
        ParamKey::ALL.into_iter().find(|k| k.as_bytes() == bytes)
    }

    /// Name of the static type stored under this key
    pub fn expected_type(&self) -> &'static str {
        match self {
            ParamKey::EnableIncentives => "bool",
            ParamKey::EpochDuration => "duration",
            ParamKey::AllocationLimit => "dec",
            ParamKey::EpochIdentifier => "string",
        }
    }

    /// Decode a raw JSON-encoded candidate into this key's static type
    pub fn decode_value(&self, raw: &[u8]) -> Result<ParamValue> {
        let json: Value =
            serde_json::from_slice(raw).map_err(|e| ParamsError::decode(self.as_str(), e))?;

        match (self, json) {
            (ParamKey::EnableIncentives, Value::Bool(b)) => Ok(ParamValue::Bool(b)),
            (ParamKey::EpochDuration, Value::String(s)) => parse_duration(&s)
                .map(ParamValue::Duration)
                .map_err(|e| ParamsError::decode(self.as_str(), e)),
            (ParamKey::AllocationLimit, Value::String(s)) => s
                .parse::<Dec>()
                .map(ParamValue::Dec)
                .map_err(|e| ParamsError::decode(self.as_str(), e)),
            (ParamKey::AllocationLimit, Value::Null) => Ok(ParamValue::Dec(Dec::nil())),
            (ParamKey::EpochIdentifier, Value::String(s)) => Ok(ParamValue::String(s)),
            (_, other) => Err(ParamsError::invalid_type(json_kind(&other))),
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamKey {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self> {
        ParamKey::from_bytes(s.as_bytes()).ok_or_else(|| ParamsError::UnknownKey(s.to_string()))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A parameter value whose type is only known at runtime
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Duration(Duration),
    Dec(Dec),
    String(String),
}

impl ParamValue {
    /// Runtime type name, as reported in type mismatch errors
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Bool(_) => "bool",
            ParamValue::Duration(_) => "duration",
            ParamValue::Dec(_) => "dec",
            ParamValue::String(_) => "string",
        }
    }

    /// Encode as the JSON bytes accepted by [`ParamKey::decode_value`]
    pub fn encode(&self) -> Result<Vec<u8>> {
        let json = match self {
            ParamValue::Bool(b) => Value::Bool(*b),
            ParamValue::Duration(d) => Value::String(format_duration(d)),
            ParamValue::Dec(d) => serde_json::to_value(d)?,
            ParamValue::String(s) => Value::String(s.clone()),
        };
        Ok(serde_json::to_vec(&json)?)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Duration(d) => f.write_str(&format_duration(d)),
            ParamValue::Dec(d) => write!(f, "{}", d),
            ParamValue::String(s) => f.write_str(s),
        }
    }
}
