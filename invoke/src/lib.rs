//! Argument resolution for runfile task invocations.
//!
//! Given a [`TaskRegistry`] (usually produced by `runfile-discovery`) and
//! the raw command-line arguments that follow a task name, this crate
//! tokenizes the arguments, matches them against the task's parameter
//! schemas, coerces each value to its declared type, and produces an
//! [`InvocationPlan`] ready for dispatch. It also renders task help and
//! formats registries, tasks, and plans for output.
//!
//! # Main entry points
//!
//! - [`resolve_invocation`] — target lookup + tokenize + resolve in one
//!   call.
//! - [`tokenize`] / [`resolve_args`] — the two pipeline halves,
//!   separately.
//! - [`dispatch`] — hand a finished plan to a [`TaskDispatcher`].
//!
//! # Example
//!
//! ```
//! use runfile_core::{ParamSchema, ParamType, TaskRegistry, TaskSchema};
//! use runfile_invoke::{InvocationOutcome, resolve_invocation};
//! use serde_json::json;
//!
//! let mut registry = TaskRegistry::new();
//! registry.upsert_task(
//!     TaskSchema::new("greet")
//!         .with_description("Say hello")
//!         .with_param(ParamSchema::required("name", ParamType::String))
//!         .with_param(ParamSchema::optional("count", ParamType::Number)),
//! );
//!
//! let args: Vec<String> = ["World", "--count=2"].iter().map(|s| s.to_string()).collect();
//! let outcome = resolve_invocation(&registry, "greet", &args).unwrap();
//!
//! if let InvocationOutcome::Plan(plan) = outcome {
//!     assert_eq!(plan.args, vec![json!("World"), json!(2)]);
//! }
//! ```
//!
//! [`TaskRegistry`]: runfile_core::TaskRegistry

pub mod help;
pub mod invocation;
pub mod output;
pub mod resolver;
pub mod tokenizer;

pub use help::{render_task_help, usage_line};
pub use invocation::{
    DispatchFailure, InvocationOutcome, InvocationPlan, PlanPrinter, TaskDispatcher, dispatch,
    resolve_invocation, wants_help,
};
pub use output::{OutputFormat, format_plan, format_registry, format_task};
pub use resolver::resolve_args;
pub use tokenizer::tokenize;
