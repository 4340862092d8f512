//! Runtime capability fallback.
//!
//! Signature scanning only sees what is written in the runfile source. A
//! host that can introspect the live task object — dynamically attached
//! methods, members built by a constructor — can describe that surface
//! through [`RuntimeSurface`] and have it merged into a scanned registry.
//!
//! Surface-supplied tasks carry no parameter schemas, so invoking them
//! passes the raw trailing argv through verbatim. Scanned schemas always
//! win: a name the scanner already registered is never overwritten by the
//! surface.

use runfile_core::{NamespaceSchema, TaskRegistry, TaskSchema, is_private_name, is_reserved_name};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Introspected capabilities of a live task object.
///
/// `method_names` lists callable method names on the root object itself;
/// `member_objects` lists object-valued properties together with the
/// method names reachable on them.
pub trait RuntimeSurface {
    /// Callable method names on the root object.
    fn method_names(&self) -> Vec<String>;

    /// Object-valued properties and their callable methods.
    fn member_objects(&self) -> Vec<MemberObject>;
}

/// One object-valued property of the root task object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberObject {
    /// Property name the object hangs off
    pub name: String,
    /// Callable method names on the object
    #[serde(default)]
    pub methods: Vec<String>,
}

/// A capability table loaded from data rather than live introspection.
///
/// # Examples
///
/// ```
/// use runfile_discovery::capability::StaticSurface;
///
/// let surface = StaticSurface::from_json(
///     r#"{ "methods": ["sync"], "members": [{ "name": "ops", "methods": ["push"] }] }"#,
/// ).unwrap();
/// assert_eq!(surface.methods, vec!["sync"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticSurface {
    /// Root-level method names
    #[serde(default)]
    pub methods: Vec<String>,
    /// Object-valued members
    #[serde(default)]
    pub members: Vec<MemberObject>,
}

impl StaticSurface {
    /// Parses a capability table from its JSON form.
    pub fn from_json(raw: &str) -> Result<Self, String> {
        serde_json::from_str(raw).map_err(|e| format!("invalid capability surface: {e}"))
    }
}

impl RuntimeSurface for StaticSurface {
    fn method_names(&self) -> Vec<String> {
        self.methods.clone()
    }

    fn member_objects(&self) -> Vec<MemberObject> {
        self.members.clone()
    }
}

/// Merges a capability surface into a scanned registry.
///
/// Member objects become namespaces when the scanner did not already
/// register the name and at least one method survives the reserved-name
/// filter. Root method names the scanner missed become root tasks. All
/// added tasks have empty parameter lists.
///
/// # Examples
///
/// ```
/// use runfile_core::TaskRegistry;
/// use runfile_discovery::capability::{StaticSurface, augment_registry};
///
/// let mut registry = TaskRegistry::default();
/// let surface = StaticSurface::from_json(
///     r#"{ "methods": ["sync"], "members": [] }"#,
/// ).unwrap();
///
/// augment_registry(&mut registry, &surface);
/// assert!(registry.find_task("sync").is_some());
/// ```
pub fn augment_registry(registry: &mut TaskRegistry, surface: &dyn RuntimeSurface) {
    for member in surface.member_objects() {
        if is_private_name(&member.name) || registry.find_namespace(&member.name).is_some() {
            continue;
        }
        let tasks: Vec<TaskSchema> = member
            .methods
            .iter()
            .filter(|m| !is_reserved_name(m))
            .map(|m| TaskSchema::new(m))
            .collect();
        if tasks.is_empty() {
            continue;
        }
        debug!(namespace = %member.name, tasks = tasks.len(), "namespace from capability surface");

        let mut schema = NamespaceSchema::new(&member.name);
        schema.tasks = tasks;
        registry.upsert_namespace(schema);
    }

    for name in surface.method_names() {
        if is_reserved_name(&name) || registry.find_task(&name).is_some() {
            continue;
        }
        debug!(task = %name, "task from capability surface");
        registry.upsert_task(TaskSchema::new(&name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runfile_core::{ParamSchema, ParamType};

    fn surface(json: &str) -> StaticSurface {
        StaticSurface::from_json(json).unwrap()
    }

    #[test]
    fn test_root_methods_become_empty_param_tasks() {
        let mut registry = TaskRegistry::default();
        augment_registry(&mut registry, &surface(r#"{ "methods": ["sync", "prune"] }"#));

        let sync = registry.find_task("sync").unwrap();
        assert!(sync.params.is_empty());
        assert!(sync.description.is_empty());
        assert!(registry.find_task("prune").is_some());
    }

    #[test]
    fn test_scanned_task_is_never_overwritten() {
        let mut registry = TaskRegistry::default();
        registry.upsert_task(
            TaskSchema::new("sync")
                .with_description("Scanned")
                .with_param(ParamSchema::required("env", ParamType::String)),
        );

        augment_registry(&mut registry, &surface(r#"{ "methods": ["sync"] }"#));

        let sync = registry.find_task("sync").unwrap();
        assert_eq!(sync.description, "Scanned");
        assert_eq!(sync.params.len(), 1);
    }

    #[test]
    fn test_members_become_namespaces() {
        let mut registry = TaskRegistry::default();
        augment_registry(
            &mut registry,
            &surface(
                r#"{ "members": [{ "name": "ops", "methods": ["push", "constructor", "_hidden"] }] }"#,
            ),
        );

        let ops = registry.find_namespace("ops").unwrap();
        assert_eq!(ops.tasks.len(), 1);
        assert_eq!(ops.tasks[0].name, "push");
    }

    #[test]
    fn test_private_and_empty_members_are_skipped() {
        let mut registry = TaskRegistry::default();
        augment_registry(
            &mut registry,
            &surface(
                r#"{ "members": [
                    { "name": "_vault", "methods": ["rotate"] },
                    { "name": "bare", "methods": ["constructor"] }
                ] }"#,
            ),
        );

        assert!(registry.find_namespace("_vault").is_none());
        assert!(registry.find_namespace("bare").is_none());
    }

    #[test]
    fn test_scanned_namespace_is_never_overwritten() {
        let mut registry = TaskRegistry::default();
        let mut scanned = NamespaceSchema::new("ops");
        scanned.tasks = vec![TaskSchema::new("push").with_description("Scanned")];
        registry.upsert_namespace(scanned);

        augment_registry(
            &mut registry,
            &surface(r#"{ "members": [{ "name": "ops", "methods": ["shove"] }] }"#),
        );

        let ops = registry.find_namespace("ops").unwrap();
        assert_eq!(ops.tasks.len(), 1);
        assert_eq!(ops.tasks[0].description, "Scanned");
    }

    #[test]
    fn test_surface_json_errors_are_reported() {
        let err = StaticSurface::from_json("{ not json").unwrap_err();
        assert!(err.starts_with("invalid capability surface:"));
    }
}
