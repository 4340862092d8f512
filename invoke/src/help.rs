//! Task help rendering.
//!
//! Formats one task schema into the usage line and parameter table shown
//! for `--help` and by the `show` subcommand.

use runfile_core::TaskSchema;

/// Builds the usage line for a task: the target followed by one token per
/// parameter (`<name>` required, `[name]` optional, `[name...]` rest).
///
/// # Examples
///
/// ```
/// use runfile_core::{ParamSchema, ParamType, TaskSchema};
/// use runfile_invoke::usage_line;
///
/// let task = TaskSchema::new("push")
///     .with_param(ParamSchema::required("env", ParamType::String))
///     .with_param(ParamSchema::optional("retries", ParamType::Number));
///
/// assert_eq!(usage_line("deploy:push", &task), "deploy:push <env> [retries]");
/// ```
pub fn usage_line(target: &str, task: &TaskSchema) -> String {
    let mut line = target.to_string();
    for param in &task.params {
        line.push(' ');
        line.push_str(&param.usage_token());
    }
    line
}

/// Renders the full help text for a task: usage line, description, and an
/// aligned parameter table with each parameter's type, requirement, and
/// flag tokens.
pub fn render_task_help(target: &str, task: &TaskSchema) -> String {
    let mut out = String::new();
    out.push_str(&format!("Usage: {}\n", usage_line(target, task)));

    if !task.description.is_empty() {
        out.push_str(&format!("\n{}\n", task.description));
    }

    if task.params.is_empty() {
        out.push_str("\nArguments are passed through verbatim.\n");
        return out;
    }

    out.push_str("\nParameters:\n");
    let max_name = task.params.iter().map(|p| p.name.len()).max().unwrap_or(4);
    let max_type = task
        .params
        .iter()
        .map(|p| type_cell(p).len())
        .max()
        .unwrap_or(6);

    for param in &task.params {
        let requirement = if param.required { "required" } else { "optional" };
        let flags = param
            .flag
            .as_ref()
            .map(|f| f.tokens().join(", "))
            .unwrap_or_default();
        out.push_str(&format!(
            "  {:<name_width$}  {:<type_width$}  {requirement:<8}  {flags}\n",
            param.name,
            type_cell(param),
            name_width = max_name,
            type_width = max_type,
        ));
    }

    out
}

fn type_cell(param: &runfile_core::ParamSchema) -> String {
    if param.rest {
        format!("{}...", param.param_type)
    } else {
        param.param_type.to_string()
    }
}
