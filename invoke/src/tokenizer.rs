//! Command-line token classification.
//!
//! Splits the argument list following a task name into positional tokens
//! and a flag map. Classification is purely syntactic — no task schema is
//! consulted here, so the same argv tokenizes identically for every task.

use runfile_core::{FlagValue, ParsedArgv};

/// Tokenizes the arguments following the selected task name.
///
/// Each token is classified by the first matching rule:
///
/// 1. a literal `--` enters stop mode: the marker itself is dropped and
///    every later token is positional verbatim, flag-shaped or not;
/// 2. `--key=value` stores `value` (possibly empty) under `key`;
/// 3. `--no-key` stores `false` under `key`;
/// 4. `--key` consumes the next token as its value when one exists and is
///    not flag-shaped, otherwise stores `true`;
/// 5. `-k=value` (longer than two characters) stores `value` under the
///    single character after the dash;
/// 6. `-k` (exactly two characters) consumes a value like rule 4;
/// 7. anything else is positional. Bundled shorts (`-abc`) are not flag
///    syntax and land here.
///
/// A key written more than once keeps its last value.
///
/// # Examples
///
/// ```
/// use runfile_core::FlagValue;
/// use runfile_invoke::tokenize;
///
/// let args: Vec<String> = ["web", "--env=prod", "-r", "3", "--force"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// let argv = tokenize(&args);
///
/// assert_eq!(argv.positional, vec!["web"]);
/// assert_eq!(argv.flag("env"), Some(&FlagValue::Text("prod".into())));
/// assert_eq!(argv.flag("r"), Some(&FlagValue::Text("3".into())));
/// assert_eq!(argv.flag("force"), Some(&FlagValue::Switch(true)));
/// ```
pub fn tokenize(args: &[String]) -> ParsedArgv {
    let mut argv = ParsedArgv::new();
    let mut stopped = false;
    let mut i = 0;

    while i < args.len() {
        let token = args[i].as_str();
        i += 1;

        if stopped {
            argv.positional.push(token.to_string());
            continue;
        }
        if token == "--" {
            stopped = true;
            continue;
        }

        if let Some(body) = token.strip_prefix("--") {
            if let Some((key, value)) = body.split_once('=') {
                argv.set_flag(key, FlagValue::Text(value.to_string()));
            } else if let Some(name) = body.strip_prefix("no-") {
                argv.set_flag(name, FlagValue::Switch(false));
            } else if let Some(value) = value_lookahead(args, i) {
                argv.set_flag(body, FlagValue::Text(value.to_string()));
                i += 1;
            } else {
                argv.set_flag(body, FlagValue::Switch(true));
            }
            continue;
        }

        if let Some(body) = token.strip_prefix('-') {
            if body.chars().count() > 1 {
                if let Some((key, value)) = body.split_once('=') {
                    let key: String = key.chars().take(1).collect();
                    argv.set_flag(&key, FlagValue::Text(value.to_string()));
                    continue;
                }
            } else if body.chars().count() == 1 {
                if let Some(value) = value_lookahead(args, i) {
                    argv.set_flag(body, FlagValue::Text(value.to_string()));
                    i += 1;
                } else {
                    argv.set_flag(body, FlagValue::Switch(true));
                }
                continue;
            }
        }

        argv.positional.push(token.to_string());
    }

    argv
}

/// A flag's value token is the following token, when it exists and is not
/// itself flag-shaped.
fn value_lookahead(args: &[String], next: usize) -> Option<&str> {
    let token = args.get(next)?;
    if token.starts_with('-') {
        return None;
    }
    Some(token.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(tokens: &[&str]) -> ParsedArgv {
        let owned: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        tokenize(&owned)
    }

    #[test]
    fn test_plain_positionals() {
        let parsed = argv(&["web", "prod", "3"]);
        assert_eq!(parsed.positional, vec!["web", "prod", "3"]);
        assert!(parsed.flags.is_empty());
    }

    #[test]
    fn test_long_flag_with_equals() {
        let parsed = argv(&["--env=prod", "--note="]);
        assert_eq!(parsed.flag("env"), Some(&FlagValue::Text("prod".into())));
        assert_eq!(parsed.flag("note"), Some(&FlagValue::Text("".into())));
    }

    #[test]
    fn test_long_flag_consumes_next_token() {
        let parsed = argv(&["--env", "prod", "web"]);
        assert_eq!(parsed.flag("env"), Some(&FlagValue::Text("prod".into())));
        assert_eq!(parsed.positional, vec!["web"]);
    }

    #[test]
    fn test_long_flag_before_another_flag_is_a_switch() {
        let parsed = argv(&["--force", "--env=prod"]);
        assert_eq!(parsed.flag("force"), Some(&FlagValue::Switch(true)));
        assert_eq!(parsed.flag("env"), Some(&FlagValue::Text("prod".into())));
    }

    #[test]
    fn test_trailing_long_flag_is_a_switch() {
        let parsed = argv(&["--verbose"]);
        assert_eq!(parsed.flag("verbose"), Some(&FlagValue::Switch(true)));
    }

    #[test]
    fn test_negation_prefix() {
        let parsed = argv(&["--no-verbose"]);
        assert_eq!(parsed.flag("verbose"), Some(&FlagValue::Switch(false)));
        assert!(parsed.flag("no-verbose").is_none());
    }

    #[test]
    fn test_equals_beats_negation() {
        // Rule 2 fires before rule 3: the key keeps its `no-` prefix.
        let parsed = argv(&["--no-cache=disk"]);
        assert_eq!(parsed.flag("no-cache"), Some(&FlagValue::Text("disk".into())));
    }

    #[test]
    fn test_short_flag_with_equals() {
        let parsed = argv(&["-e=prod"]);
        assert_eq!(parsed.flag("e"), Some(&FlagValue::Text("prod".into())));
    }

    #[test]
    fn test_short_flag_consumes_next_token() {
        let parsed = argv(&["-r", "3", "-v"]);
        assert_eq!(parsed.flag("r"), Some(&FlagValue::Text("3".into())));
        assert_eq!(parsed.flag("v"), Some(&FlagValue::Switch(true)));
    }

    #[test]
    fn test_bundled_shorts_are_positional() {
        let parsed = argv(&["-abc"]);
        assert!(parsed.flags.is_empty());
        assert_eq!(parsed.positional, vec!["-abc"]);
    }

    #[test]
    fn test_lone_dash_is_positional() {
        let parsed = argv(&["-"]);
        assert_eq!(parsed.positional, vec!["-"]);
    }

    #[test]
    fn test_stop_marker_keeps_flag_shaped_tokens_verbatim() {
        let parsed = argv(&["--env", "prod", "--", "--not-a-flag", "-x", "--"]);
        assert_eq!(parsed.flag("env"), Some(&FlagValue::Text("prod".into())));
        assert_eq!(parsed.positional, vec!["--not-a-flag", "-x", "--"]);
    }

    #[test]
    fn test_negative_number_is_not_consumed_as_value() {
        // `-1` is flag-shaped, so `--offset` becomes a switch and `-1`
        // classifies on its own (single-dash, length 2, trailing).
        let parsed = argv(&["--offset", "-1"]);
        assert_eq!(parsed.flag("offset"), Some(&FlagValue::Switch(true)));
        assert_eq!(parsed.flag("1"), Some(&FlagValue::Switch(true)));
    }

    #[test]
    fn test_repeated_key_last_write_wins() {
        let parsed = argv(&["--env=dev", "--env", "prod", "--force", "--no-force"]);
        assert_eq!(parsed.flag("env"), Some(&FlagValue::Text("prod".into())));
        assert_eq!(parsed.flag("force"), Some(&FlagValue::Switch(false)));
    }
}
