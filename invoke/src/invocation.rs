//! Invocation orchestration.
//!
//! Ties the pipeline together for one task invocation: parse the target,
//! look it up in the registry, tokenize and resolve the trailing
//! arguments, and hand the finished [`InvocationPlan`] to a
//! [`TaskDispatcher`]. Task execution itself lives behind the dispatcher
//! trait — this crate never runs task bodies.

use runfile_core::{ResolveError, Result, TaskRegistry, TaskTarget};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::help::render_task_help;
use crate::output::{OutputFormat, format_plan};
use crate::resolver::resolve_args;
use crate::tokenizer::tokenize;

/// A fully resolved invocation: the qualified target plus its ordered,
/// coerced argument values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationPlan {
    /// Qualified target name (`build` or `deploy:push`)
    pub target: String,
    /// Argument values in parameter order
    pub args: Vec<Value>,
}

/// What an invocation resolved to: a dispatchable plan, or help text when
/// the arguments asked for it.
#[derive(Debug, Clone, PartialEq)]
pub enum InvocationOutcome {
    /// Ready to dispatch.
    Plan(InvocationPlan),
    /// Rendered task help requested via `--help` / `-h`.
    Help(String),
}

/// Returns `true` when the argument list requests help.
///
/// Only `--help` or `-h` tokens before a `--` stop marker count; after the
/// marker they are plain data.
///
/// # Examples
///
/// ```
/// use runfile_invoke::wants_help;
///
/// let help = vec!["--help".to_string()];
/// assert!(wants_help(&help));
///
/// let data = vec!["--".to_string(), "--help".to_string()];
/// assert!(!wants_help(&data));
/// ```
pub fn wants_help(args: &[String]) -> bool {
    for token in args {
        if token == "--" {
            return false;
        }
        if token == "--help" || token == "-h" {
            return true;
        }
    }
    false
}

/// Resolves one invocation against a registry.
///
/// The target is parsed and looked up (privacy checked before existence),
/// then the trailing arguments are tokenized and resolved against the
/// task's parameters. A task with no declared parameters skips tokenizing
/// entirely and receives every argument verbatim as a positional string.
///
/// # Examples
///
/// ```
/// use runfile_core::{ParamSchema, ParamType, TaskRegistry, TaskSchema};
/// use runfile_invoke::{InvocationOutcome, resolve_invocation};
/// use serde_json::Value;
///
/// let mut registry = TaskRegistry::new();
/// registry.upsert_task(
///     TaskSchema::new("greet")
///         .with_param(ParamSchema::required("name", ParamType::String))
///         .with_param(ParamSchema::required("count", ParamType::Number)),
/// );
///
/// let args: Vec<String> = ["--count=2", "World"].iter().map(|s| s.to_string()).collect();
/// let outcome = resolve_invocation(&registry, "greet", &args).unwrap();
///
/// match outcome {
///     InvocationOutcome::Plan(plan) => {
///         assert_eq!(plan.target, "greet");
///         assert_eq!(plan.args, vec![Value::String("World".into()), Value::from(2)]);
///     }
///     InvocationOutcome::Help(_) => unreachable!(),
/// }
/// ```
pub fn resolve_invocation(
    registry: &TaskRegistry,
    target: &str,
    args: &[String],
) -> Result<InvocationOutcome> {
    let target = TaskTarget::parse(target);
    let task = registry.lookup(&target)?;
    let qualified = target.qualified();

    if wants_help(args) {
        return Ok(InvocationOutcome::Help(render_task_help(&qualified, task)));
    }

    let values = if task.params.is_empty() {
        args.iter().map(|a| Value::String(a.clone())).collect()
    } else {
        resolve_args(&task.params, &tokenize(args))?
    };
    debug!(target = %qualified, args = values.len(), "invocation resolved");

    Ok(InvocationOutcome::Plan(InvocationPlan {
        target: qualified,
        args: values,
    }))
}

/// Failure reported by a task dispatcher.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DispatchFailure {
    /// Human-readable failure message
    pub message: String,
}

impl DispatchFailure {
    /// Creates a failure from any message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The execution boundary. Implementations receive finished plans; what
/// "running" means (spawning a shell, posting a job, printing) is up to
/// them.
pub trait TaskDispatcher {
    /// Executes one resolved plan.
    fn dispatch(&self, plan: &InvocationPlan) -> std::result::Result<(), DispatchFailure>;
}

/// Dispatches a plan, wrapping any failure with the task's qualified name.
pub fn dispatch(dispatcher: &dyn TaskDispatcher, plan: &InvocationPlan) -> Result<()> {
    dispatcher.dispatch(plan).map_err(|failure| ResolveError::TaskFailed {
        task: plan.target.clone(),
        message: failure.to_string(),
    })
}

/// Default dispatcher: renders the plan in a fixed output format and
/// prints it to stdout.
#[derive(Debug, Clone, Copy)]
pub struct PlanPrinter {
    /// Rendering format for dispatched plans
    pub format: OutputFormat,
}

impl TaskDispatcher for PlanPrinter {
    fn dispatch(&self, plan: &InvocationPlan) -> std::result::Result<(), DispatchFailure> {
        let rendered = format_plan(plan, self.format).map_err(DispatchFailure::new)?;
        println!("{}", rendered.trim_end());
        Ok(())
    }
}
