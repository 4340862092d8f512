//! Namespace detection.
//!
//! A namespace is a property initialized with an instance of another task
//! group (`deploy = new DeployTasks()`). Each detected property is scanned
//! like the root group; properties whose group yields no tasks, and
//! properties carrying the privacy marker, are never registered.
//!
//! Detection runs over the whole source, not just the root group body, so
//! an instantiation written outside the root class still registers. This
//! matches how runfiles are written in practice (one file, one root), and
//! keeps detection independent of where the scan started.

use std::sync::LazyLock;

use regex::Regex;
use runfile_core::{NamespaceSchema, is_private_name};
use tracing::debug;

use crate::scanner::GroupScanner;

static INSTANTIATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z_$][A-Za-z0-9_$]*)\s*=\s*new\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*\(\s*\)")
        .expect("static regex must compile")
});

/// Detects namespaces across the scanner's whole source.
///
/// Namespaces appear in declaration order. When the same property name is
/// assigned more than once, the later assignment replaces the earlier
/// schema in place, keeping the original position.
///
/// # Examples
///
/// ```
/// use runfile_discovery::namespaces::detect_namespaces;
/// use runfile_discovery::scanner::GroupScanner;
///
/// let source = r#"
/// class Tasks {
///     deploy = new DeployTasks();
/// }
///
/// class DeployTasks {
///     /** Push a build out. */
///     push(sh: Shell, env: string) {}
/// }
/// "#;
///
/// let mut scanner = GroupScanner::new(source, "Shell");
/// let namespaces = detect_namespaces(&mut scanner);
/// assert_eq!(namespaces.len(), 1);
/// assert_eq!(namespaces[0].name, "deploy");
/// assert_eq!(namespaces[0].tasks[0].name, "push");
/// ```
pub fn detect_namespaces(scanner: &mut GroupScanner) -> Vec<NamespaceSchema> {
    let assignments: Vec<(String, String)> = INSTANTIATION
        .captures_iter(scanner.source())
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect();

    let mut namespaces: Vec<NamespaceSchema> = Vec::new();
    for (property, group) in assignments {
        if is_private_name(&property) {
            continue;
        }
        let tasks = scanner.scan_group(&group);
        if tasks.is_empty() {
            continue;
        }
        debug!(namespace = %property, group = %group, tasks = tasks.len(), "registered namespace");

        let mut schema = NamespaceSchema::new(&property);
        schema.tasks = tasks;
        match namespaces.iter_mut().find(|n| n.name == property) {
            Some(existing) => *existing = schema,
            None => namespaces.push(schema),
        }
    }
    namespaces
}
