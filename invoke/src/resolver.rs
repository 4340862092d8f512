//! Argument resolution against a parameter list.
//!
//! Walks a task's parameter schemas in declaration order, pulling a raw
//! value for each from the tokenized argv and coercing it to its declared
//! type. The output is the flat, ordered value list handed to the
//! dispatcher.

use runfile_core::{
    FlagValue, ParamSchema, ParamType, ParsedArgv, ResolveError, Result, coerce,
};
use serde_json::Value;
use tracing::debug;

/// Resolves the ordered argument values for one task invocation.
///
/// For each parameter, the raw value is looked up by long flag key, then
/// short key, then each alias in declaration order, then the next
/// unconsumed positional token. A rest parameter absorbs every positional
/// token still unconsumed, appending each as a string, and ends
/// resolution.
///
/// A missing required parameter fails with
/// [`ResolveError::MissingArgument`]. A missing *optional* parameter stops
/// resolution of everything after it: later parameters are not resolved
/// even when tokens remain for them.
///
/// # Examples
///
/// ```
/// use runfile_core::{ParamSchema, ParamType};
/// use runfile_invoke::{resolve_args, tokenize};
/// use serde_json::Value;
///
/// let params = vec![
///     ParamSchema::required("name", ParamType::String),
///     ParamSchema::required("count", ParamType::Number),
/// ];
/// let args: Vec<String> = ["--count=2", "World"].iter().map(|s| s.to_string()).collect();
///
/// let values = resolve_args(&params, &tokenize(&args)).unwrap();
/// assert_eq!(values, vec![Value::String("World".into()), Value::from(2)]);
/// ```
pub fn resolve_args(params: &[ParamSchema], argv: &ParsedArgv) -> Result<Vec<Value>> {
    let mut values = Vec::new();
    let mut consumed = vec![false; argv.positional.len()];

    for param in params {
        if param.rest {
            for (i, token) in argv.positional.iter().enumerate() {
                if !consumed[i] {
                    consumed[i] = true;
                    values.push(Value::String(token.clone()));
                }
            }
            break;
        }

        let Some(raw) = lookup_value(param, argv, &mut consumed) else {
            if param.required {
                return Err(ResolveError::MissingArgument {
                    param: param.name.clone(),
                });
            }
            debug!(param = %param.name, "optional parameter unresolved, halting");
            break;
        };

        // A switch bound to a boolean parameter needs no coercion; any
        // other pairing coerces from the textual form.
        let value = match (&raw, param.param_type) {
            (FlagValue::Switch(state), ParamType::Boolean) => Value::Bool(*state),
            _ => coerce(&raw.to_text(), param.param_type)
                .map_err(|e| e.into_resolve(&param.name))?,
        };
        values.push(value);
    }

    Ok(values)
}

/// Pulls the raw value for one parameter: flag forms first, positional
/// fallback last.
fn lookup_value(param: &ParamSchema, argv: &ParsedArgv, consumed: &mut [bool]) -> Option<FlagValue> {
    if let Some(flag) = &param.flag {
        if let Some(value) = argv.flag(flag.long_key()) {
            return Some(value.clone());
        }
        if let Some(key) = flag.short_key() {
            if let Some(value) = argv.flag(key) {
                return Some(value.clone());
            }
        }
        for key in flag.alias_keys() {
            if let Some(value) = argv.flag(key) {
                return Some(value.clone());
            }
        }
    }

    let next = consumed.iter().position(|used| !used)?;
    consumed[next] = true;
    Some(FlagValue::Text(argv.positional[next].clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn parse(tokens: &[&str]) -> ParsedArgv {
        let owned: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        tokenize(&owned)
    }

    #[test]
    fn test_flag_and_positional_mix() {
        let params = vec![
            ParamSchema::required("name", ParamType::String),
            ParamSchema::required("count", ParamType::Number),
        ];
        let values = resolve_args(&params, &parse(&["--count=2", "World"])).unwrap();
        assert_eq!(values, vec![Value::String("World".into()), Value::from(2)]);
    }

    #[test]
    fn test_positional_and_flag_forms_resolve_identically() {
        let params = vec![
            ParamSchema::required("env", ParamType::String),
            ParamSchema::required("retries", ParamType::Number),
        ];

        let positional = resolve_args(&params, &parse(&["prod", "3"])).unwrap();
        let flagged = resolve_args(&params, &parse(&["--retries=3", "--env=prod"])).unwrap();
        assert_eq!(positional, flagged);
    }

    #[test]
    fn test_lookup_priority_long_short_alias_positional() {
        let params = vec![
            ParamSchema::required("env", ParamType::String)
                .with_short_flag("-e")
                .with_flag_alias("--environment"),
        ];

        let long = resolve_args(&params, &parse(&["--env=a", "-e=b", "--environment=c", "d"]));
        assert_eq!(long.unwrap(), vec![Value::String("a".into())]);

        let short = resolve_args(&params, &parse(&["-e=b", "--environment=c", "d"]));
        assert_eq!(short.unwrap(), vec![Value::String("b".into())]);

        let alias = resolve_args(&params, &parse(&["--environment=c", "d"]));
        assert_eq!(alias.unwrap(), vec![Value::String("c".into())]);

        let positional = resolve_args(&params, &parse(&["d"]));
        assert_eq!(positional.unwrap(), vec![Value::String("d".into())]);
    }

    #[test]
    fn test_missing_required_fails() {
        let params = vec![ParamSchema::required("env", ParamType::String)];
        let err = resolve_args(&params, &parse(&[])).unwrap_err();
        assert_eq!(
            err,
            ResolveError::MissingArgument {
                param: "env".into()
            }
        );
    }

    #[test]
    fn test_missing_optional_halts_remaining_chain() {
        let params = vec![
            ParamSchema::required("a", ParamType::String),
            ParamSchema::optional("b", ParamType::String),
            ParamSchema::required("c", ParamType::String),
        ];

        // `b` resolves only by flag; the lone positional binds to `a`.
        // Flagging `c`'s value does not help: the chain halts at `b`.
        let values = resolve_args(&params, &parse(&["first", "--c=third"])).unwrap();
        assert_eq!(values, vec![Value::String("first".into())]);
    }

    #[test]
    fn test_rest_absorbs_unconsumed_positionals() {
        let params = vec![
            ParamSchema::required("env", ParamType::String),
            ParamSchema::rest("extra", ParamType::Array),
        ];
        let values = resolve_args(&params, &parse(&["prod", "one", "two"])).unwrap();
        assert_eq!(
            values,
            vec![
                Value::String("prod".into()),
                Value::String("one".into()),
                Value::String("two".into()),
            ]
        );
    }

    #[test]
    fn test_rest_with_no_tokens_resolves_empty() {
        let params = vec![ParamSchema::rest("packages", ParamType::Array)];
        let values = resolve_args(&params, &parse(&[])).unwrap();
        assert_eq!(values, Vec::<Value>::new());
    }

    #[test]
    fn test_negation_always_yields_false() {
        let params = vec![ParamSchema::optional("verbose", ParamType::Boolean)];
        let values = resolve_args(&params, &parse(&["--no-verbose", "true"])).unwrap();
        assert_eq!(values, vec![Value::Bool(false)]);
    }

    #[test]
    fn test_switch_on_boolean_passes_through() {
        let params = vec![ParamSchema::optional("force", ParamType::Boolean)];
        let values = resolve_args(&params, &parse(&["--force"])).unwrap();
        assert_eq!(values, vec![Value::Bool(true)]);
    }

    #[test]
    fn test_switch_on_number_is_a_type_mismatch() {
        let params = vec![ParamSchema::required("count", ParamType::Number)];
        let err = resolve_args(&params, &parse(&["--count"])).unwrap_err();
        assert_eq!(
            err,
            ResolveError::TypeMismatch {
                param: "count".into(),
                expected: ParamType::Number,
                raw: "true".into(),
            }
        );
    }

    #[test]
    fn test_object_payload_coerces() {
        let params = vec![ParamSchema::required("query", ParamType::Object)];
        let values = resolve_args(&params, &parse(&[r#"{"query":"x"}"#])).unwrap();
        assert_eq!(values, vec![serde_json::json!({"query": "x"})]);

        let err = resolve_args(&params, &parse(&["[1,2]"])).unwrap_err();
        assert!(matches!(err, ResolveError::TypeMismatch { .. }));
    }

    #[test]
    fn test_stop_marker_tokens_stay_positional() {
        let params = vec![
            ParamSchema::required("first", ParamType::String),
            ParamSchema::rest("extra", ParamType::Array),
        ];
        let values = resolve_args(&params, &parse(&["--", "--env=prod", "-x"])).unwrap();
        assert_eq!(
            values,
            vec![
                Value::String("--env=prod".into()),
                Value::String("-x".into()),
            ]
        );
    }
}
