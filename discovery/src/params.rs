//! Parameter classification from signature text.
//!
//! Turns the raw parameter-list text of a task signature (everything after
//! the execution-context parameter) into ordered [`ParamSchema`] entries.
//! Classification is purely textual: names, type annotations, default
//! markers, and the rest ellipsis are all recognized without evaluating
//! any code.

use std::sync::LazyLock;

use regex::Regex;
use runfile_core::{ParamSchema, ParamType};

use crate::annotations::{FlagHints, parse_flag_directives};
use crate::boundaries::split_top_level;

/// One parsed signature entry before classification.
#[derive(Debug, Default)]
struct ParamDecl {
    name: String,
    annotation: Option<String>,
    has_default: bool,
}

/// Classifies the parameter-list text of a task signature.
///
/// `raw` is the signature text after the execution-context parameter, or
/// `None` when the signature declared nothing else. The owning doc
/// comment supplies `@flag` directives for short forms and aliases.
///
/// A signature consisting of a single ellipsis entry (`...files:
/// string[]`) produces exactly one rest descriptor and skips everything
/// else. Otherwise, each comma-separated entry produces one descriptor:
/// required unless a default value is present, typed by the annotation,
/// and bound to a long flag derived from its name.
///
/// # Examples
///
/// ```
/// use runfile_core::ParamType;
/// use runfile_discovery::params::classify_params;
///
/// let params = classify_params(Some("env: string, retries: number = 1"), "");
/// assert_eq!(params.len(), 2);
/// assert!(params[0].required);
/// assert_eq!(params[1].param_type, ParamType::Number);
/// assert!(!params[1].required);
/// ```
pub fn classify_params(raw: Option<&str>, doc: &str) -> Vec<ParamSchema> {
    let text = raw.map(str::trim).unwrap_or("");
    if text.is_empty() {
        return Vec::new();
    }

    static REST_ONLY: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^\.\.\.\s*([A-Za-z_$][A-Za-z0-9_$]*)\s*:\s*(.+)$")
            .expect("static regex must compile")
    });

    if let Some(caps) = REST_ONLY.captures(text) {
        return vec![ParamSchema::rest(&caps[1], rest_type(Some(&caps[2])))];
    }

    let hints = parse_flag_directives(doc);
    let mut params = Vec::new();
    for entry in split_top_level(text, ',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        if let Some(stripped) = entry.strip_prefix("...") {
            let decl = split_declaration(stripped);
            params.push(ParamSchema::rest(
                &decl.name,
                rest_type(decl.annotation.as_deref()),
            ));
            continue;
        }

        let decl = split_declaration(entry);
        if decl.name.is_empty() {
            continue;
        }
        let param_type = classify_annotation(decl.annotation.as_deref());
        let schema = if decl.has_default {
            ParamSchema::optional(&decl.name, param_type)
        } else {
            ParamSchema::required(&decl.name, param_type)
        };
        params.push(apply_hints(schema, hints.get(decl.name.as_str())));
    }
    params
}

fn apply_hints(mut schema: ParamSchema, hints: Option<&FlagHints>) -> ParamSchema {
    let Some(hints) = hints else {
        return schema;
    };
    if let Some(short) = &hints.short {
        schema = schema.with_short_flag(short);
    }
    for alias in &hints.aliases {
        schema = schema.with_flag_alias(alias);
    }
    schema
}

/// Splits one signature entry into name, type annotation, and default
/// marker. The first top-level `:` separates name from annotation; the
/// first top-level `=` that is not part of an arrow or comparison starts
/// the default expression.
fn split_declaration(entry: &str) -> ParamDecl {
    let bytes = entry.as_bytes();
    let mut depth = 0usize;
    let mut angle = 0usize;
    let mut colon: Option<usize> = None;
    let mut eq: Option<usize> = None;
    let mut prev = b' ';
    let mut i = 0;

    while i < bytes.len() && eq.is_none() {
        let b = bytes[i];
        match b {
            b'\'' | b'"' | b'`' => {
                i = skip_quoted(bytes, b, i);
                prev = b;
                continue;
            }
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b'<' => angle += 1,
            b'>' if prev != b'=' => angle = angle.saturating_sub(1),
            b':' if depth == 0 && angle == 0 && colon.is_none() => colon = Some(i),
            b'=' if depth == 0 && angle == 0 => {
                let next = bytes.get(i + 1).copied();
                let comparison = matches!(prev, b'!' | b'<' | b'>' | b'=')
                    || matches!(next, Some(b'=') | Some(b'>'));
                if !comparison {
                    eq = Some(i);
                }
            }
            _ => {}
        }
        prev = b;
        i += 1;
    }

    let name_end = colon.or(eq).unwrap_or(entry.len());
    let name = entry[..name_end].trim().trim_end_matches('?').trim_end();
    let annotation = colon.map(|c| {
        let end = eq.unwrap_or(entry.len());
        entry[c + 1..end].trim().to_string()
    });

    ParamDecl {
        name: name.to_string(),
        annotation: annotation.filter(|a| !a.is_empty()),
        has_default: eq.is_some(),
    }
}

fn skip_quoted(bytes: &[u8], quote: u8, start: usize) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Maps a type annotation to a parameter type. Rules apply in order and
/// the first match wins; an unannotated parameter reads as a string.
fn classify_annotation(annotation: Option<&str>) -> ParamType {
    let Some(annotation) = annotation.map(str::trim) else {
        return ParamType::String;
    };
    if is_list_shape(annotation) {
        ParamType::Array
    } else if annotation.starts_with("Map<") || annotation.starts_with("Record<") {
        ParamType::Object
    } else if annotation.starts_with('{') {
        ParamType::Object
    } else {
        match annotation {
            "string" => ParamType::String,
            "number" => ParamType::Number,
            "boolean" => ParamType::Boolean,
            _ => ParamType::Object,
        }
    }
}

/// Rest parameters collect repeated tokens, so only a list-shaped
/// annotation keeps them an array; anything else degrades to string.
fn rest_type(annotation: Option<&str>) -> ParamType {
    match annotation.map(str::trim) {
        Some(annotation) if is_list_shape(annotation) => ParamType::Array,
        _ => ParamType::String,
    }
}

fn is_list_shape(annotation: &str) -> bool {
    annotation.ends_with("[]") || annotation.starts_with("Array<")
}
