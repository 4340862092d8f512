//! Error taxonomy for task lookup and argument resolution.

use thiserror::Error;

use crate::types::ParamType;

/// Errors produced while resolving a task invocation.
///
/// Every variant carries enough context to print a single human-readable
/// line; callers that know the task can add a usage hint alongside.
///
/// # Examples
///
/// ```
/// use runfile_core::ResolveError;
///
/// let err = ResolveError::UnknownTask("deploy:nope".to_string());
/// assert_eq!(err.to_string(), "unknown task: deploy:nope");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The target names a task that is not registered.
    #[error("unknown task: {0}")]
    UnknownTask(String),

    /// The target names a namespace that is not registered.
    #[error("unknown namespace: {0}")]
    UnknownNamespace(String),

    /// The target names a private task or namespace. Reported without
    /// checking whether the name exists at all.
    #[error("'{0}' is private and cannot be invoked")]
    PrivateAccessDenied(String),

    /// A required parameter matched neither a flag nor a positional token.
    #[error("missing required argument: {param}")]
    MissingArgument {
        /// Name of the unresolved parameter.
        param: String,
    },

    /// A token was present but cannot be read as the declared type.
    #[error("argument '{param}' expects {expected}, got '{raw}'")]
    TypeMismatch {
        /// Name of the parameter being coerced.
        param: String,
        /// Declared type of the parameter.
        expected: ParamType,
        /// Raw token that failed to coerce.
        raw: String,
    },

    /// A structured argument was not parseable JSON at all.
    #[error("argument '{param}' is not valid JSON: {detail}")]
    InvalidPayload {
        /// Name of the parameter being coerced.
        param: String,
        /// Parser message describing the malformation.
        detail: String,
    },

    /// The target names a namespace where a task was expected.
    #[error("'{0}' is a namespace, not a task")]
    NotCallable(String),

    /// The task body itself failed after dispatch.
    #[error("task '{task}' failed: {message}")]
    TaskFailed {
        /// Qualified name of the failing task.
        task: String,
        /// Message reported by the task body.
        message: String,
    },
}

/// Convenience alias for resolution results.
pub type Result<T> = std::result::Result<T, ResolveError>;
