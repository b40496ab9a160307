//! Per-field validators
//!
//! The typed validators check ranges only; the type is already guaranteed by
//! the signature. The `*_value` wrappers are what the key table binds: they
//! check the runtime type of an untyped candidate first and then delegate.
//!
//! Every validator stops at the first violation.

use chrono::Duration;

use crate::dec::Dec;
use crate::duration::format_duration;
use crate::error::{ParamsError, Result};
use crate::keys::ParamValue;

const EPOCH_DURATION_FIELD: &str = "epoch duration";
const ALLOCATION_LIMIT_FIELD: &str = "allocation limit";

/// Any boolean is acceptable
pub fn validate_bool(_value: bool) -> Result<()> {
    Ok(())
}

/// Duration must be strictly positive
pub fn validate_period(value: &Duration) -> Result<()> {
    if *value <= Duration::zero() {
        return Err(ParamsError::NonPositive {
            field: EPOCH_DURATION_FIELD,
            value: format_duration(value),
        });
    }
    Ok(())
}

/// Fraction must be set and within `[0, 1]`
pub fn validate_percentage(value: &Dec) -> Result<()> {
    if value.is_nil() {
        return Err(ParamsError::NilValue {
            field: ALLOCATION_LIMIT_FIELD,
        });
    }
    if value.is_negative() {
        return Err(ParamsError::NonPositive {
            field: ALLOCATION_LIMIT_FIELD,
            value: value.to_string(),
        });
    }
    if value.gt(&Dec::one()) {
        return Err(ParamsError::AboveMaximum {
            field: ALLOCATION_LIMIT_FIELD,
            value: value.to_string(),
        });
    }
    Ok(())
}

pub fn validate_bool_value(value: &ParamValue) -> Result<()> {
    match value {
        ParamValue::Bool(b) => validate_bool(*b),
        other => Err(ParamsError::invalid_type(other.type_name())),
    }
}

pub fn validate_period_value(value: &ParamValue) -> Result<()> {
    match value {
        ParamValue::Duration(d) => validate_period(d),
        other => Err(ParamsError::invalid_type(other.type_name())),
    }
}

pub fn validate_percentage_value(value: &ParamValue) -> Result<()> {
    match value {
        ParamValue::Dec(d) => validate_percentage(d),
        other => Err(ParamsError::invalid_type(other.type_name())),
    }
}
