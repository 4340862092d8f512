//! Registry validation.
//!
//! Validates structural invariants of a discovered task registry, catching
//! problems such as private names leaking into the callable surface, rest
//! parameters declared anywhere but last, and duplicate flag tokens before
//! they cause downstream issues.
//!
//! # Examples
//!
//! ```
//! use runfile_core::*;
//!
//! let mut registry = TaskRegistry::new();
//! registry.upsert_task(
//!     TaskSchema::new("build").with_param(ParamSchema::required("target", ParamType::String)),
//! );
//! assert!(validate_registry(&registry).is_empty());
//!
//! // Invalid: a private name must never be registered as callable
//! registry.upsert_task(TaskSchema::new("_cleanup"));
//! assert!(!validate_registry(&registry).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::TaskRegistry;
use crate::types::{NamespaceSchema, ParamSchema, TaskSchema, is_private_name};

/// Registry validation errors.
///
/// Each variant describes a specific structural problem found during
/// validation. The `Display` impl provides a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Task name is empty or whitespace-only.
    #[error("task name cannot be empty")]
    EmptyTaskName,
    /// Two tasks in the same scope share a name.
    #[error("duplicate task in scope: {0}")]
    DuplicateTask(String),
    /// Two namespaces share a name.
    #[error("duplicate namespace: {0}")]
    DuplicateNamespace(String),
    /// A private name was registered as callable.
    #[error("private name registered as callable: {0}")]
    PrivateName(String),
    /// Parameter name is empty.
    #[error("parameter name cannot be empty in task: {0}")]
    EmptyParamName(String),
    /// A rest parameter is not the last parameter of its task.
    #[error("rest parameter must be last: {0}")]
    RestNotLast(String),
    /// A task declares more than one rest parameter.
    #[error("multiple rest parameters in task: {0}")]
    MultipleRest(String),
    /// A rest parameter carries a flag binding.
    #[error("rest parameter cannot bind a flag: {0}")]
    RestWithFlag(String),
    /// Short flag does not have the single-dash, single-character form.
    #[error("invalid short flag format: {0}")]
    InvalidShortFlag(String),
    /// Long flag or alias does not start with `--` or is too short.
    #[error("invalid long flag format: {0}")]
    InvalidLongFlag(String),
    /// Two flag tokens in the same task collide.
    #[error("duplicate flag in task: {0}")]
    DuplicateFlag(String),
}

/// Validates a full task registry.
///
/// Checks root tasks, namespace names, and every namespaced task. Returns
/// on the first problem found.
///
/// # Examples
///
/// ```
/// use runfile_core::*;
///
/// let mut registry = TaskRegistry::new();
/// registry.upsert_namespace(
///     NamespaceSchema::new("deploy").with_task(TaskSchema::new("push")),
/// );
/// assert!(validate_registry(&registry).is_empty());
/// ```
pub fn validate_registry(registry: &TaskRegistry) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut seen_tasks: HashSet<&str> = HashSet::new();
    for task in &registry.root {
        if !seen_tasks.insert(task.name.as_str()) {
            errors.push(ValidationError::DuplicateTask(task.name.clone()));
            return errors;
        }
        errors.extend(validate_task(task));
        if !errors.is_empty() {
            return errors;
        }
    }

    let mut seen_namespaces: HashSet<&str> = HashSet::new();
    for namespace in &registry.namespaces {
        if !seen_namespaces.insert(namespace.name.as_str()) {
            errors.push(ValidationError::DuplicateNamespace(namespace.name.clone()));
            return errors;
        }
        errors.extend(validate_namespace(namespace));
        if !errors.is_empty() {
            return errors;
        }
    }

    errors
}

fn validate_namespace(namespace: &NamespaceSchema) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if is_private_name(&namespace.name) {
        errors.push(ValidationError::PrivateName(namespace.name.clone()));
        return errors;
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for task in &namespace.tasks {
        if !seen.insert(task.name.as_str()) {
            errors.push(ValidationError::DuplicateTask(format!(
                "{}:{}",
                namespace.name, task.name
            )));
            return errors;
        }
        errors.extend(validate_task(task));
        if !errors.is_empty() {
            return errors;
        }
    }

    errors
}

/// Validates a single task schema.
///
/// Checks the task name, rest-parameter placement, and flag bindings.
///
/// # Examples
///
/// ```
/// use runfile_core::*;
///
/// let task = TaskSchema::new("install")
///     .with_param(ParamSchema::required("registry", ParamType::String))
///     .with_param(ParamSchema::rest("packages", ParamType::Array));
/// assert!(validate_task(&task).is_empty());
/// ```
pub fn validate_task(task: &TaskSchema) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if task.name.trim().is_empty() {
        errors.push(ValidationError::EmptyTaskName);
        return errors;
    }

    if is_private_name(&task.name) {
        errors.push(ValidationError::PrivateName(task.name.clone()));
        return errors;
    }

    let rest_count = task.params.iter().filter(|p| p.rest).count();
    if rest_count > 1 {
        errors.push(ValidationError::MultipleRest(task.name.clone()));
        return errors;
    }
    if let Some(position) = task.params.iter().position(|p| p.rest) {
        if position + 1 != task.params.len() {
            errors.push(ValidationError::RestNotLast(format!(
                "{}.{}",
                task.name, task.params[position].name
            )));
            return errors;
        }
    }

    errors.extend(validate_params(task, &task.params));
    errors
}

fn validate_params(task: &TaskSchema, params: &[ParamSchema]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for param in params {
        if param.name.trim().is_empty() {
            errors.push(ValidationError::EmptyParamName(task.name.clone()));
            return errors;
        }

        let Some(flag) = &param.flag else {
            continue;
        };

        if param.rest {
            errors.push(ValidationError::RestWithFlag(format!(
                "{}.{}",
                task.name, param.name
            )));
            return errors;
        }

        if !flag.long.starts_with("--") || flag.long.len() < 3 {
            errors.push(ValidationError::InvalidLongFlag(flag.long.clone()));
            return errors;
        }
        if !seen.insert(flag.long.clone()) {
            errors.push(ValidationError::DuplicateFlag(flag.long.clone()));
            return errors;
        }

        if let Some(short) = &flag.short {
            if !short.starts_with('-') || short.starts_with("--") || short.chars().count() != 2 {
                errors.push(ValidationError::InvalidShortFlag(short.clone()));
                return errors;
            }
            if !seen.insert(short.clone()) {
                errors.push(ValidationError::DuplicateFlag(short.clone()));
                return errors;
            }
        }

        for alias in &flag.aliases {
            if !alias.starts_with("--") || alias.len() < 3 {
                errors.push(ValidationError::InvalidLongFlag(alias.clone()));
                return errors;
            }
            if !seen.insert(alias.clone()) {
                errors.push(ValidationError::DuplicateFlag(alias.clone()));
                return errors;
            }
        }
    }

    errors
}
