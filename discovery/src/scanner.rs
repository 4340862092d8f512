//! Task group scanning.
//!
//! A task group is a class whose documented methods become callable tasks.
//! The scanner locates a group by name, walks its body, and extracts one
//! [`TaskSchema`] per documented method. Methods are gated hard on the doc
//! comment: an undocumented method is invisible, however well-formed its
//! signature.
//!
//! Extraction is textual. Nothing is executed, and malformed stretches of
//! source degrade into recorded warnings rather than failures.

use std::sync::LazyLock;

use regex::Regex;
use runfile_core::{TaskSchema, is_reserved_name};
use tracing::{debug, warn};

use crate::annotations;
use crate::boundaries::{doc_spans, matching_delimiter, split_once_top_level};
use crate::params::classify_params;

static CLASS_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:export\s+(?:default\s+)?)?class\s+([A-Za-z_$][A-Za-z0-9_$]*)(?:\s+extends\s+[A-Za-z_$][A-Za-z0-9_$]*)?\s*\{",
    )
    .expect("static regex must compile")
});

/// Byte positions of a located task group header.
#[derive(Debug, Clone, Copy)]
struct GroupBounds {
    /// Where the class header (including any `export` prefix) starts
    header_start: usize,
    /// Position of the opening brace of the class body
    open_brace: usize,
}

fn find_group(source: &str, group: &str) -> Option<GroupBounds> {
    for caps in CLASS_HEADER.captures_iter(source) {
        if &caps[1] == group {
            let mat = caps.get(0)?;
            return Some(GroupBounds {
                header_start: mat.start(),
                open_brace: mat.end() - 1,
            });
        }
    }
    None
}

/// Scans task groups out of a single source text.
///
/// The scanner owns the source and accumulates warnings across every group
/// it visits, so one scanner can serve the root group and all namespace
/// groups of the same runfile.
///
/// # Examples
///
/// ```
/// use runfile_discovery::scanner::GroupScanner;
///
/// let source = r#"
/// class Tasks {
///     /** Compile the project. */
///     build(sh: Shell, target: string) {}
///
///     untracked(sh: Shell) {}
/// }
/// "#;
///
/// let mut scanner = GroupScanner::new(source, "Shell");
/// let tasks = scanner.scan_group("Tasks");
/// assert_eq!(tasks.len(), 1);
/// assert_eq!(tasks[0].name, "build");
/// assert_eq!(tasks[0].params.len(), 1);
/// ```
#[derive(Debug)]
pub struct GroupScanner {
    source: String,
    context_type: String,
    warnings: Vec<String>,
}

impl GroupScanner {
    /// Creates a scanner over the given source text.
    ///
    /// `context_type` names the execution-context type that must annotate
    /// the first parameter of every task signature (e.g. `Shell`).
    pub fn new(source: impl Into<String>, context_type: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            context_type: context_type.into(),
            warnings: Vec::new(),
        }
    }

    /// Extracts the tasks of one group, in declaration order.
    ///
    /// Returns an empty list when the group does not exist or its body
    /// never closes; the latter also records a warning. A method name
    /// declared twice keeps its first position with the later schema.
    pub fn scan_group(&mut self, group: &str) -> Vec<TaskSchema> {
        let Some(bounds) = find_group(&self.source, group) else {
            debug!(group = %group, "task group not found");
            return Vec::new();
        };
        let Some(close) = matching_delimiter(&self.source, bounds.open_brace) else {
            warn!(group = %group, "task group body never closes");
            self.warnings
                .push(format!("unterminated body for task group '{group}'"));
            return Vec::new();
        };

        let mut local = Vec::new();
        let body = &self.source[bounds.open_brace + 1..close];
        let tasks = scan_body(body, &self.context_type, &mut local);
        debug!(group = %group, tasks = tasks.len(), "scanned task group");
        self.warnings.extend(local);
        tasks
    }

    /// Returns the doc comment immediately preceding a group header, with
    /// comment markers stripped, or `None` when the group is undocumented.
    /// A plain `/* ... */` comment above the header does not count, and
    /// blocks any doc comment further up.
    pub fn header_doc(&self, group: &str) -> Option<String> {
        let bounds = find_group(&self.source, group)?;
        let before = self.source[..bounds.header_start].trim_end();
        if !before.ends_with("*/") {
            return None;
        }
        let start = before.rfind("/*")?;
        if !before[start..].starts_with("/**") {
            return None;
        }
        let inner = before.get(start + 3..before.len() - 2)?;
        let text = annotations::doc_body(inner);
        if text.is_empty() { None } else { Some(text) }
    }

    pub(crate) fn source(&self) -> &str {
        &self.source
    }

    /// Warnings recorded so far, in the order they were hit.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Consumes the scanner, yielding its accumulated warnings.
    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }
}

/// Walks a group body, extracting one task per documented method.
fn scan_body(body: &str, context_type: &str, warnings: &mut Vec<String>) -> Vec<TaskSchema> {
    let mut tasks: Vec<TaskSchema> = Vec::new();

    for (doc_start, doc_end) in doc_spans(body) {
        let doc = body.get(doc_start + 3..doc_end - 2).unwrap_or("");
        let after_doc = &body[doc_end..];

        let Some((name, paren_offset)) = method_head(after_doc) else {
            continue;
        };
        if is_reserved_name(&name) {
            continue;
        }

        let paren_at = doc_end + paren_offset;
        let Some(close) = matching_delimiter(body, paren_at) else {
            warn!(method = %name, "parameter list never closes");
            warnings.push(format!("unterminated parameter list for '{name}'"));
            continue;
        };
        let signature = &body[paren_at + 1..close];

        let (context, remainder) = match split_once_top_level(signature, ',') {
            Some((first, rest)) => (first, Some(rest)),
            None => (signature, None),
        };
        let context_matches = context
            .split_once(':')
            .map(|(_, annotation)| annotation.trim() == context_type)
            .unwrap_or(false);
        if !context_matches {
            continue;
        }

        let mut schema = TaskSchema::new(&name)
            .with_description(&annotations::description(doc));
        for param in classify_params(remainder, doc) {
            schema = schema.with_param(param);
        }

        match tasks.iter_mut().find(|t| t.name == name) {
            Some(existing) => *existing = schema,
            None => tasks.push(schema),
        }
    }

    tasks
}

/// Reads the method name directly after a doc comment.
///
/// Accepts an optional `async` modifier, then an identifier followed by an
/// opening parenthesis. Returns the name and the byte offset of the `(`.
/// A doc comment attached to anything else (a field, a nested statement)
/// yields `None`.
fn method_head(text: &str) -> Option<(String, usize)> {
    let mut offset = skip_whitespace(text, 0);
    let (first, after_first) = read_identifier(text, offset)?;

    if first == "async" {
        let probe = skip_whitespace(text, after_first);
        if !text[probe..].starts_with('(') {
            offset = probe;
            let (name, after_name) = read_identifier(text, offset)?;
            let paren = skip_whitespace(text, after_name);
            return text[paren..].starts_with('(').then(|| (name, paren));
        }
    }

    let paren = skip_whitespace(text, after_first);
    text[paren..].starts_with('(').then(|| (first, paren))
}

fn skip_whitespace(text: &str, mut at: usize) -> usize {
    let bytes = text.as_bytes();
    while at < bytes.len() && bytes[at].is_ascii_whitespace() {
        at += 1;
    }
    at
}

fn read_identifier(text: &str, at: usize) -> Option<(String, usize)> {
    let rest = &text[at..];
    let mut chars = rest.char_indices();
    let (_, first) = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_' || first == '$') {
        return None;
    }
    let mut end = rest.len();
    for (i, c) in chars {
        if !(c.is_ascii_alphanumeric() || c == '_' || c == '$') {
            end = i;
            break;
        }
    }
    Some((rest[..end].to_string(), at + end))
}
