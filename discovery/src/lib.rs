//! Task discovery from runfile source text.
//!
//! This crate locates callable tasks in a runfile: a source file whose root
//! task group (a class, `Tasks` by convention) declares one method per
//! task. Discovery is purely textual — nothing is compiled or executed —
//! and is gated on doc comments: a method becomes a task only when a
//! `/** ... */` comment sits directly above it and its first parameter is
//! annotated with the execution-context type.
//!
//! # Main entry points
//!
//! - [`build_registry`] — scan source text into a [`TaskRegistry`] of root
//!   tasks and namespaces.
//! - [`build_registry_with_surface`] — same, then merge a host-provided
//!   [`capability::RuntimeSurface`] for methods the scanner cannot see.
//! - [`scanner::GroupScanner`] — lower-level, per-group scanning.
//!
//! # Example
//!
//! ```
//! use runfile_discovery::{ScanOptions, build_registry};
//!
//! let source = r#"
//! /** Everyday project chores. */
//! class Tasks {
//!     deploy = new DeployTasks();
//!
//!     /**
//!      * Say hello.
//!      * @flag count -c
//!      */
//!     greet(sh: Shell, name: string, count: number = 1) {}
//! }
//!
//! class DeployTasks {
//!     /** Push a build out. */
//!     push(sh: Shell, env: string) {}
//! }
//! "#;
//!
//! let outcome = build_registry(source, &ScanOptions::default());
//! assert_eq!(outcome.registry.task_count(), 2);
//! assert_eq!(outcome.registry.header_doc.as_deref(), Some("Everyday project chores."));
//!
//! let greet = outcome.registry.find_task("greet").unwrap();
//! assert_eq!(greet.params.len(), 2);
//! assert!(outcome.registry.find_namespace("deploy").is_some());
//! ```
//!
//! # Crate type
//!
//! This is a **library-only crate** with no binary targets. For CLI usage,
//! use the `runfile-cli` crate, which provides the `runfile` binary.
//!
//! [`TaskRegistry`]: runfile_core::TaskRegistry

pub mod annotations;
mod boundaries;
pub mod capability;
pub mod namespaces;
pub mod params;
pub mod scanner;

use runfile_core::TaskRegistry;

use capability::RuntimeSurface;
use namespaces::detect_namespaces;
use scanner::GroupScanner;

/// Options controlling a registry scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Name of the root task group class
    pub root_group: String,
    /// Execution-context type annotation required on the first parameter
    pub context_type: String,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            root_group: "Tasks".to_string(),
            context_type: "Shell".to_string(),
        }
    }
}

/// Result of scanning one runfile.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Everything discovered, in declaration order
    pub registry: TaskRegistry,
    /// Human-readable scan warnings, in the order they were hit
    pub warnings: Vec<String>,
}

/// Scans runfile source text into a task registry.
///
/// The root group's documented methods become root tasks; properties
/// initialized with other group instances become namespaces; the doc
/// comment above the root group header, if any, becomes the registry
/// header. Scanning never fails — missing groups yield an empty registry
/// and malformed stretches degrade into [`ScanOutcome::warnings`].
pub fn build_registry(source: &str, options: &ScanOptions) -> ScanOutcome {
    let mut scanner = GroupScanner::new(source, options.context_type.as_str());

    let mut registry = TaskRegistry::new();
    registry.header_doc = scanner.header_doc(&options.root_group);
    for task in scanner.scan_group(&options.root_group) {
        registry.upsert_task(task);
    }
    for namespace in detect_namespaces(&mut scanner) {
        registry.upsert_namespace(namespace);
    }

    ScanOutcome {
        registry,
        warnings: scanner.into_warnings(),
    }
}

/// Scans runfile source text, then merges a runtime capability surface.
///
/// Scanned schemas always win; the surface only contributes names the
/// scanner missed. See [`capability::augment_registry`] for the merge
/// rules.
///
/// # Examples
///
/// ```
/// use runfile_discovery::capability::StaticSurface;
/// use runfile_discovery::{ScanOptions, build_registry_with_surface};
///
/// let source = r#"
/// class Tasks {
///     /** Compile. */
///     build(sh: Shell) {}
/// }
/// "#;
/// let surface = StaticSurface::from_json(r#"{ "methods": ["sync"] }"#).unwrap();
///
/// let outcome = build_registry_with_surface(source, &ScanOptions::default(), &surface);
/// assert!(outcome.registry.find_task("build").is_some());
/// assert!(outcome.registry.find_task("sync").is_some());
/// ```
pub fn build_registry_with_surface(
    source: &str,
    options: &ScanOptions,
    surface: &dyn RuntimeSurface,
) -> ScanOutcome {
    let mut outcome = build_registry(source, options);
    capability::augment_registry(&mut outcome.registry, surface);
    outcome
}
