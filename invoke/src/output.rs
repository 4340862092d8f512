//! Output formatting for registries, tasks, and invocation plans.

use runfile_core::{TaskRegistry, TaskSchema};

use crate::help::render_task_help;
use crate::invocation::InvocationPlan;

/// Supported output formats.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
}

/// Formats a whole registry in the requested output format.
pub fn format_registry(registry: &TaskRegistry, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(registry)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(registry).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(registry_to_markdown(registry)),
        OutputFormat::Table => Ok(registry_to_table(registry)),
    }
}

/// Formats a single task in the requested output format.
///
/// The table format renders the same help text shown for `--help`.
pub fn format_task(target: &str, task: &TaskSchema, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(task)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(task).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(task_to_markdown(target, task)),
        OutputFormat::Table => Ok(render_task_help(target, task)),
    }
}

/// Formats a resolved invocation plan in the requested output format.
pub fn format_plan(plan: &InvocationPlan, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(plan)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(plan).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(plan_to_markdown(plan)),
        OutputFormat::Table => Ok(plan_to_table(plan)),
    }
}

fn registry_to_markdown(registry: &TaskRegistry) -> String {
    let mut out = String::new();

    out.push_str("# Runfile Tasks\n\n");
    if let Some(ref doc) = registry.header_doc {
        out.push_str(&format!("{doc}\n\n"));
    }

    if !registry.root.is_empty() {
        out.push_str("## Tasks\n\n");
        out.push_str("| Task | Description |\n");
        out.push_str("|------|-------------|\n");
        for task in &registry.root {
            out.push_str(&format!("| `{}` | {} |\n", task.name, task.description));
        }
        out.push('\n');
    }

    for namespace in &registry.namespaces {
        out.push_str(&format!("## {}\n\n", namespace.name));
        out.push_str("| Task | Description |\n");
        out.push_str("|------|-------------|\n");
        for task in &namespace.tasks {
            out.push_str(&format!(
                "| `{}:{}` | {} |\n",
                namespace.name, task.name, task.description
            ));
        }
        out.push('\n');
    }

    out
}

fn registry_to_table(registry: &TaskRegistry) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Runfile: {} task(s), {} namespace(s)\n",
        registry.task_count(),
        registry.namespaces.len()
    ));
    if let Some(ref doc) = registry.header_doc {
        for line in doc.lines() {
            out.push_str(&format!("  {line}\n"));
        }
    }

    if !registry.root.is_empty() {
        out.push_str("\nTasks:\n");
        push_task_rows(&mut out, &registry.root, None);
    }

    for namespace in &registry.namespaces {
        out.push_str(&format!("\n{}:\n", namespace.name));
        push_task_rows(&mut out, &namespace.tasks, Some(&namespace.name));
    }

    out
}

fn push_task_rows(out: &mut String, tasks: &[TaskSchema], namespace: Option<&str>) {
    let name_of = |task: &TaskSchema| match namespace {
        Some(ns) => format!("{ns}:{}", task.name),
        None => task.name.clone(),
    };
    let max_name = tasks.iter().map(|t| name_of(t).len()).max().unwrap_or(4);

    for task in tasks {
        out.push_str(&format!(
            "  {:<width$}  {}\n",
            name_of(task),
            task.description,
            width = max_name
        ));
    }
}

fn task_to_markdown(target: &str, task: &TaskSchema) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {target}\n\n"));
    if !task.description.is_empty() {
        out.push_str(&format!("{}\n\n", task.description));
    }

    if task.params.is_empty() {
        out.push_str("Arguments are passed through verbatim.\n");
        return out;
    }

    out.push_str("| Parameter | Type | Required | Flags |\n");
    out.push_str("|-----------|------|----------|-------|\n");
    for param in &task.params {
        let kind = if param.rest {
            format!("{}...", param.param_type)
        } else {
            param.param_type.to_string()
        };
        let required = if param.required { "yes" } else { "no" };
        let flags = param
            .flag
            .as_ref()
            .map(|f| f.tokens().join(", "))
            .unwrap_or_default();
        out.push_str(&format!(
            "| `{}` | {kind} | {required} | {flags} |\n",
            param.name
        ));
    }

    out
}

fn plan_to_markdown(plan: &InvocationPlan) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", plan.target));
    if plan.args.is_empty() {
        out.push_str("No arguments.\n");
        return out;
    }
    for arg in &plan.args {
        out.push_str(&format!("- `{arg}`\n"));
    }
    out
}

fn plan_to_table(plan: &InvocationPlan) -> String {
    let mut out = String::new();
    out.push_str(&format!("Task: {}\n", plan.target));
    if plan.args.is_empty() {
        out.push_str("Args: (none)\n");
        return out;
    }
    out.push_str("Args:\n");
    for arg in &plan.args {
        out.push_str(&format!("  {arg}\n"));
    }
    out
}
