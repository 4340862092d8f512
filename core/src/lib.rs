//! Core task schema types and shared invocation primitives.
//!
//! This crate defines the foundational types for modeling callable tasks
//! discovered in a runfile:
//!
//! - [`TaskSchema`] — a callable task with its description and parameters.
//! - [`ParamSchema`] — a single parameter with type, requiredness, rest
//!   marker, and flag binding.
//! - [`NamespaceSchema`] — a named group of tasks reached through
//!   `namespace:task` targets.
//! - [`TaskRegistry`] — everything discovered in one runfile, with
//!   privacy-aware target lookup.
//!
//! Coercion ([`coerce`]) turns raw argument text into typed
//! [`serde_json::Value`] payloads. Validation ([`validate_registry`],
//! [`validate_task`]) catches structural errors such as private names in
//! the callable surface, misplaced rest parameters, and flag collisions.
//!
//! # Example
//!
//! ```
//! use runfile_core::*;
//!
//! // Model a small runfile registry by hand
//! let mut registry = TaskRegistry::new();
//! registry.upsert_task(
//!     TaskSchema::new("build")
//!         .with_description("Compile the client bundle")
//!         .with_param(ParamSchema::required("target", ParamType::String))
//!         .with_param(ParamSchema::optional("release", ParamType::Boolean)),
//! );
//! registry.upsert_namespace(
//!     NamespaceSchema::new("deploy").with_task(TaskSchema::new("push")),
//! );
//!
//! let build = registry.lookup(&TaskTarget::parse("build")).unwrap();
//! assert_eq!(build.params.len(), 2);
//! assert!(validate_registry(&registry).is_empty());
//! ```

mod coerce;
mod error;
mod registry;
mod types;
mod validate;

pub use coerce::{CoerceError, coerce};
pub use error::{ResolveError, Result};
pub use registry::{TARGET_SEPARATOR, TaskRegistry, TaskTarget};
pub use types::*;
pub use validate::{ValidationError, validate_registry, validate_task};
