//! Task registry and invocation-target lookup.

use serde::{Deserialize, Serialize};

use crate::error::ResolveError;
use crate::types::{NamespaceSchema, TaskSchema, is_private_name};

/// Separator between the namespace and task segments of a target.
pub const TARGET_SEPARATOR: char = ':';

/// Parsed invocation target.
///
/// A target is either a bare task name (`build`) or a namespace-qualified
/// name (`deploy:push`). Parsing splits at the first separator; it never
/// fails, and malformed targets surface later as lookup errors.
///
/// # Examples
///
/// ```
/// use runfile_core::TaskTarget;
///
/// let target = TaskTarget::parse("deploy:push");
/// assert_eq!(target.namespace.as_deref(), Some("deploy"));
/// assert_eq!(target.task, "push");
/// assert_eq!(target.qualified(), "deploy:push");
///
/// let bare = TaskTarget::parse("build");
/// assert!(bare.namespace.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTarget {
    /// Namespace segment, if the target was qualified
    pub namespace: Option<String>,
    /// Task name segment
    pub task: String,
}

impl TaskTarget {
    /// Parses a raw target token.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(TARGET_SEPARATOR) {
            Some((namespace, task)) => Self {
                namespace: Some(namespace.to_string()),
                task: task.to_string(),
            },
            None => Self {
                namespace: None,
                task: raw.to_string(),
            },
        }
    }

    /// Returns the display form of the target.
    pub fn qualified(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}{TARGET_SEPARATOR}{}", self.task),
            None => self.task.clone(),
        }
    }
}

impl std::fmt::Display for TaskTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.qualified())
    }
}

/// Registry of every task and namespace discovered in one runfile.
///
/// Root tasks and namespaces keep their declaration order. Re-registering a
/// name replaces the earlier entry in place, so the position of the first
/// registration is preserved.
///
/// # Examples
///
/// ```
/// use runfile_core::{NamespaceSchema, TaskRegistry, TaskSchema, TaskTarget};
///
/// let mut registry = TaskRegistry::new();
/// registry.upsert_task(TaskSchema::new("build"));
/// registry.upsert_namespace(
///     NamespaceSchema::new("deploy").with_task(TaskSchema::new("push")),
/// );
///
/// assert_eq!(registry.task_count(), 2);
/// let push = registry.lookup(&TaskTarget::parse("deploy:push")).unwrap();
/// assert_eq!(push.name, "push");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRegistry {
    /// Tasks declared directly on the root group
    pub root: Vec<TaskSchema>,
    /// Namespaces in declaration order
    pub namespaces: Vec<NamespaceSchema>,
    /// Doc comment preceding the root group declaration, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_doc: Option<String>,
}

impl TaskRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds a root task by name.
    pub fn find_task(&self, name: &str) -> Option<&TaskSchema> {
        self.root.iter().find(|t| t.name == name)
    }

    /// Finds a namespace by name.
    pub fn find_namespace(&self, name: &str) -> Option<&NamespaceSchema> {
        self.namespaces.iter().find(|n| n.name == name)
    }

    /// Registers a root task, replacing any earlier task of the same name
    /// in place.
    pub fn upsert_task(&mut self, task: TaskSchema) {
        match self.root.iter_mut().find(|t| t.name == task.name) {
            Some(existing) => *existing = task,
            None => self.root.push(task),
        }
    }

    /// Registers a namespace, replacing any earlier namespace of the same
    /// name in place.
    pub fn upsert_namespace(&mut self, namespace: NamespaceSchema) {
        match self
            .namespaces
            .iter_mut()
            .find(|n| n.name == namespace.name)
        {
            Some(existing) => *existing = namespace,
            None => self.namespaces.push(namespace),
        }
    }

    /// Total number of callable tasks, root and namespaced.
    pub fn task_count(&self) -> usize {
        self.root.len() + self.namespaces.iter().map(|n| n.tasks.len()).sum::<usize>()
    }

    /// Returns `true` if nothing was discovered.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty() && self.namespaces.is_empty()
    }

    /// Resolves an invocation target to its task schema.
    ///
    /// Privacy is checked on both target segments before existence: a
    /// private name is denied whether or not anything is registered under
    /// it. A bare target naming a namespace is rejected as not callable.
    ///
    /// # Examples
    ///
    /// ```
    /// use runfile_core::{ResolveError, TaskRegistry, TaskTarget};
    ///
    /// let registry = TaskRegistry::new();
    /// let err = registry.lookup(&TaskTarget::parse("_secret")).unwrap_err();
    /// assert_eq!(err, ResolveError::PrivateAccessDenied("_secret".into()));
    /// ```
    pub fn lookup(&self, target: &TaskTarget) -> Result<&TaskSchema, ResolveError> {
        if let Some(namespace) = &target.namespace {
            if is_private_name(namespace) {
                return Err(ResolveError::PrivateAccessDenied(namespace.clone()));
            }
            if is_private_name(&target.task) {
                return Err(ResolveError::PrivateAccessDenied(target.task.clone()));
            }
            let ns = self
                .find_namespace(namespace)
                .ok_or_else(|| ResolveError::UnknownNamespace(namespace.clone()))?;
            return ns
                .find_task(&target.task)
                .ok_or_else(|| ResolveError::UnknownTask(target.qualified()));
        }

        if is_private_name(&target.task) {
            return Err(ResolveError::PrivateAccessDenied(target.task.clone()));
        }
        if let Some(task) = self.find_task(&target.task) {
            return Ok(task);
        }
        if self.find_namespace(&target.task).is_some() {
            return Err(ResolveError::NotCallable(target.task.clone()));
        }
        Err(ResolveError::UnknownTask(target.task.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ParamSchema, ParamType};

    fn sample_registry() -> TaskRegistry {
        let mut registry = TaskRegistry::new();
        registry.upsert_task(
            TaskSchema::new("build")
                .with_param(ParamSchema::required("target", ParamType::String)),
        );
        registry.upsert_task(TaskSchema::new("test"));
        registry.upsert_namespace(
            NamespaceSchema::new("deploy")
                .with_task(TaskSchema::new("push"))
                .with_task(TaskSchema::new("rollback")),
        );
        registry
    }

    #[test]
    fn test_target_parse_splits_at_first_separator() {
        let target = TaskTarget::parse("deploy:push");
        assert_eq!(target.namespace.as_deref(), Some("deploy"));
        assert_eq!(target.task, "push");

        let odd = TaskTarget::parse("a:b:c");
        assert_eq!(odd.namespace.as_deref(), Some("a"));
        assert_eq!(odd.task, "b:c");

        let bare = TaskTarget::parse("build");
        assert!(bare.namespace.is_none());
        assert_eq!(bare.qualified(), "build");
    }

    #[test]
    fn test_lookup_root_task() {
        let registry = sample_registry();
        let task = registry.lookup(&TaskTarget::parse("build")).unwrap();
        assert_eq!(task.name, "build");
    }

    #[test]
    fn test_lookup_namespaced_task() {
        let registry = sample_registry();
        let task = registry.lookup(&TaskTarget::parse("deploy:push")).unwrap();
        assert_eq!(task.name, "push");
    }

    #[test]
    fn test_lookup_unknown_names() {
        let registry = sample_registry();
        assert_eq!(
            registry.lookup(&TaskTarget::parse("nope")).unwrap_err(),
            ResolveError::UnknownTask("nope".into())
        );
        assert_eq!(
            registry.lookup(&TaskTarget::parse("ops:push")).unwrap_err(),
            ResolveError::UnknownNamespace("ops".into())
        );
        assert_eq!(
            registry.lookup(&TaskTarget::parse("deploy:nope")).unwrap_err(),
            ResolveError::UnknownTask("deploy:nope".into())
        );
    }

    #[test]
    fn test_lookup_bare_namespace_not_callable() {
        let registry = sample_registry();
        assert_eq!(
            registry.lookup(&TaskTarget::parse("deploy")).unwrap_err(),
            ResolveError::NotCallable("deploy".into())
        );
    }

    #[test]
    fn test_privacy_checked_before_existence() {
        let registry = sample_registry();

        // Nothing called "_anything" exists, but the denial comes first.
        assert_eq!(
            registry.lookup(&TaskTarget::parse("_anything")).unwrap_err(),
            ResolveError::PrivateAccessDenied("_anything".into())
        );
        assert_eq!(
            registry.lookup(&TaskTarget::parse("_ops:push")).unwrap_err(),
            ResolveError::PrivateAccessDenied("_ops".into())
        );
        assert_eq!(
            registry
                .lookup(&TaskTarget::parse("deploy:_hidden"))
                .unwrap_err(),
            ResolveError::PrivateAccessDenied("_hidden".into())
        );
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut registry = sample_registry();
        let original_order: Vec<String> =
            registry.root.iter().map(|t| t.name.clone()).collect();

        registry.upsert_task(TaskSchema::new("build").with_description("rebuilt"));

        let after: Vec<String> = registry.root.iter().map(|t| t.name.clone()).collect();
        assert_eq!(after, original_order);
        assert_eq!(registry.find_task("build").unwrap().description, "rebuilt");
    }

    #[test]
    fn test_task_count_spans_namespaces() {
        let registry = sample_registry();
        assert_eq!(registry.task_count(), 4);
        assert!(!registry.is_empty());
        assert!(TaskRegistry::new().is_empty());
    }
}
