//! Coercion of raw argument text into typed values.
//!
//! Every resolved argument ends up as a [`serde_json::Value`] so dispatch
//! can hand tasks a uniform payload regardless of where a token came from.

use serde_json::Value;
use thiserror::Error;

use crate::error::ResolveError;
use crate::types::ParamType;

/// Errors produced while coercing a single token.
///
/// Carries no parameter name; callers attach one via
/// [`into_resolve`](CoerceError::into_resolve) when they know which
/// parameter was being filled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoerceError {
    /// The token is well-formed but not of the declared type.
    #[error("expected {expected}, got '{raw}'")]
    TypeMismatch {
        /// Declared type of the parameter.
        expected: ParamType,
        /// Raw token that failed to coerce.
        raw: String,
    },

    /// The token was supposed to be JSON but did not parse at all.
    #[error("malformed JSON payload: {detail}")]
    InvalidPayload {
        /// Parser message describing the malformation.
        detail: String,
    },
}

impl CoerceError {
    /// Attaches a parameter name, lifting this into a [`ResolveError`].
    pub fn into_resolve(self, param: &str) -> ResolveError {
        match self {
            CoerceError::TypeMismatch { expected, raw } => ResolveError::TypeMismatch {
                param: param.to_string(),
                expected,
                raw,
            },
            CoerceError::InvalidPayload { detail } => ResolveError::InvalidPayload {
                param: param.to_string(),
                detail,
            },
        }
    }
}

/// Coerces raw argument text into a typed JSON value.
///
/// Numbers prefer integer representation and fall back to finite floats.
/// Booleans accept exactly `"true"`, `"1"`, `"false"`, and `"0"`. Objects
/// and arrays are parsed as JSON literals and checked for the right shape.
/// Strings pass through unchanged.
///
/// # Examples
///
/// ```
/// use runfile_core::{ParamType, coerce};
/// use serde_json::json;
///
/// assert_eq!(coerce("8080", ParamType::Number).unwrap(), json!(8080));
/// assert_eq!(coerce("1", ParamType::Boolean).unwrap(), json!(true));
/// assert_eq!(
///     coerce(r#"{"deep": true}"#, ParamType::Object).unwrap(),
///     json!({"deep": true})
/// );
/// assert!(coerce("abc", ParamType::Number).is_err());
/// ```
pub fn coerce(raw: &str, target: ParamType) -> Result<Value, CoerceError> {
    match target {
        ParamType::String => Ok(Value::String(raw.to_string())),
        ParamType::Number => coerce_number(raw),
        ParamType::Boolean => coerce_boolean(raw),
        ParamType::Object => coerce_json(raw, ParamType::Object),
        ParamType::Array => coerce_json(raw, ParamType::Array),
    }
}

fn coerce_number(raw: &str) -> Result<Value, CoerceError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(mismatch(ParamType::Number, raw));
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Ok(Value::Number(int.into()));
    }
    let float: f64 = trimmed
        .parse()
        .map_err(|_| mismatch(ParamType::Number, raw))?;
    // from_f64 rejects NaN and infinities, which are not numeric literals.
    serde_json::Number::from_f64(float)
        .map(Value::Number)
        .ok_or_else(|| mismatch(ParamType::Number, raw))
}

fn coerce_boolean(raw: &str) -> Result<Value, CoerceError> {
    match raw {
        "true" | "1" => Ok(Value::Bool(true)),
        "false" | "0" => Ok(Value::Bool(false)),
        _ => Err(mismatch(ParamType::Boolean, raw)),
    }
}

fn coerce_json(raw: &str, target: ParamType) -> Result<Value, CoerceError> {
    let value: Value = serde_json::from_str(raw).map_err(|err| CoerceError::InvalidPayload {
        detail: err.to_string(),
    })?;
    let shape_ok = match target {
        ParamType::Object => value.is_object(),
        ParamType::Array => value.is_array(),
        _ => false,
    };
    if shape_ok {
        Ok(value)
    } else {
        Err(mismatch(target, raw))
    }
}

fn mismatch(expected: ParamType, raw: &str) -> CoerceError {
    CoerceError::TypeMismatch {
        expected,
        raw: raw.to_string(),
    }
}
