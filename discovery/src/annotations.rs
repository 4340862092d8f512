//! Doc comment text extraction and flag directives.
//!
//! Doc comments gate task discovery and carry two kinds of information:
//! the human description (the first plain line) and `@flag` directives
//! that attach short forms and aliases to parameter flags.

use std::collections::HashMap;

/// Marker that starts a directive line inside a doc comment.
pub const DIRECTIVE_MARKER: char = '@';

/// Flag directive for one task parameter.
///
/// Parsed from a line of the form `@flag <param> <tokens...>`, where a
/// single-dash token of exactly two characters sets the short form and
/// double-dash tokens accumulate as aliases in order of appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagHints {
    /// Short form including its dash (e.g. "-e")
    pub short: Option<String>,
    /// Long aliases including their dashes, in declaration order
    pub aliases: Vec<String>,
}

/// Strips comment decoration from the inner text of a doc comment.
///
/// Each line is trimmed and loses at most one leading `*`. The input is
/// the text between the `/**` and `*/` markers.
pub fn doc_lines(doc: &str) -> Vec<String> {
    doc.lines()
        .map(|line| {
            let trimmed = line.trim();
            trimmed
                .strip_prefix('*')
                .map(str::trim)
                .unwrap_or(trimmed)
                .to_string()
        })
        .collect()
}

/// Extracts the task description: the first non-empty line that is not a
/// directive. Returns an empty string when the doc comment has no plain
/// text.
///
/// # Examples
///
/// ```
/// use runfile_discovery::annotations::description;
///
/// let doc = "\n * Push the current build.\n * @flag env -e\n ";
/// assert_eq!(description(doc), "Push the current build.");
/// assert_eq!(description(" * @flag env -e "), "");
/// ```
pub fn description(doc: &str) -> String {
    doc_lines(doc)
        .into_iter()
        .find(|line| !line.is_empty() && !line.starts_with(DIRECTIVE_MARKER))
        .unwrap_or_default()
}

/// Extracts the full descriptive text of a doc comment: every
/// non-directive line, with leading and trailing blank lines dropped.
pub fn doc_body(doc: &str) -> String {
    let lines: Vec<String> = doc_lines(doc)
        .into_iter()
        .filter(|line| !line.starts_with(DIRECTIVE_MARKER))
        .collect();

    let start = lines.iter().position(|l| !l.is_empty());
    let end = lines.iter().rposition(|l| !l.is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}

/// Parses `@flag` directives out of a doc comment.
///
/// Each directive names a parameter and lists flag tokens for it. A later
/// directive for the same parameter replaces the earlier one wholesale.
/// Tokens that are neither a short form nor a double-dash alias are
/// ignored.
///
/// # Examples
///
/// ```
/// use runfile_discovery::annotations::parse_flag_directives;
///
/// let doc = " * Deploy somewhere.\n * @flag retries -r --attempts --tries";
/// let hints = parse_flag_directives(doc);
/// let retries = &hints["retries"];
/// assert_eq!(retries.short.as_deref(), Some("-r"));
/// assert_eq!(retries.aliases, vec!["--attempts", "--tries"]);
/// ```
pub fn parse_flag_directives(doc: &str) -> HashMap<String, FlagHints> {
    let mut hints = HashMap::new();
    for line in doc_lines(doc) {
        let Some(rest) = line.strip_prefix("@flag") else {
            continue;
        };
        // Require a space so e.g. "@flags" does not match.
        if !rest.starts_with(char::is_whitespace) {
            continue;
        }
        let mut tokens = rest.split_whitespace();
        let Some(param) = tokens.next() else {
            continue;
        };

        let mut hint = FlagHints::default();
        for token in tokens {
            if token.starts_with("--") {
                if token.len() > 2 {
                    hint.aliases.push(token.to_string());
                }
            } else if token.starts_with('-') && token.chars().count() == 2 {
                hint.short = Some(token.to_string());
            }
        }
        hints.insert(param.to_string(), hint);
    }
    hints
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_lines_strip_decoration() {
        let doc = "\n * Compile the bundle.\n *\n *   indented detail\n ";
        assert_eq!(
            doc_lines(doc),
            vec!["", "Compile the bundle.", "", "indented detail", ""]
        );
    }

    #[test]
    fn test_description_skips_directives_and_blanks() {
        let doc = "\n * @flag env -e\n *\n * Push the build.\n * Second line.\n";
        assert_eq!(description(doc), "Push the build.");
    }

    #[test]
    fn test_description_empty_when_only_directives() {
        assert_eq!(description(" * @flag env -e "), "");
        assert_eq!(description(""), "");
    }

    #[test]
    fn test_doc_body_joins_plain_lines() {
        let doc = "\n * Build tasks for the client.\n *\n * Run `build` first.\n * @flag x -x\n";
        assert_eq!(
            doc_body(doc),
            "Build tasks for the client.\n\nRun `build` first."
        );
    }

    #[test]
    fn test_flag_directive_short_and_aliases() {
        let hints = parse_flag_directives(" * @flag target -t --triple");
        let target = &hints["target"];
        assert_eq!(target.short.as_deref(), Some("-t"));
        assert_eq!(target.aliases, vec!["--triple"]);
    }

    #[test]
    fn test_flag_directive_alias_order_preserved() {
        let hints = parse_flag_directives("@flag retries --attempts -r --tries");
        let retries = &hints["retries"];
        assert_eq!(retries.aliases, vec!["--attempts", "--tries"]);
        assert_eq!(retries.short.as_deref(), Some("-r"));
    }

    #[test]
    fn test_later_directive_replaces_wholesale() {
        let doc = "@flag env -e --environment\n@flag env --env-name";
        let hints = parse_flag_directives(doc);
        let env = &hints["env"];
        assert!(env.short.is_none());
        assert_eq!(env.aliases, vec!["--env-name"]);
    }

    #[test]
    fn test_malformed_tokens_ignored() {
        // "-long" is neither a short form nor a long alias; "--" is too short.
        let hints = parse_flag_directives("@flag env -long -- plain");
        let env = &hints["env"];
        assert!(env.short.is_none());
        assert!(env.aliases.is_empty());

        // A directive with no parameter name is dropped entirely.
        assert!(parse_flag_directives("@flag").is_empty());
        assert!(parse_flag_directives("@flags env -e").is_empty());
    }
}
