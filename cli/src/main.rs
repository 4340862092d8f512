use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use runfile_core::{TaskRegistry, TaskTarget, validate_registry};
use runfile_discovery::capability::StaticSurface;
use runfile_discovery::{ScanOptions, build_registry, build_registry_with_surface};
use runfile_invoke::{
    InvocationOutcome, OutputFormat, PlanPrinter, dispatch, format_registry, format_task,
    resolve_invocation, usage_line,
};

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(fmt: CliOutputFormat) -> Self {
        match fmt {
            CliOutputFormat::Json => Self::Json,
            CliOutputFormat::Yaml => Self::Yaml,
            CliOutputFormat::Markdown => Self::Markdown,
            CliOutputFormat::Table => Self::Table,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "runfile")]
#[command(about = "Discover and invoke tasks defined in a runfile")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every callable task and namespace in the runfile.
    List(ListArgs),
    /// Show help for a single task.
    Show(ShowArgs),
    /// Resolve a task invocation and print the dispatched plan.
    Run(RunArgs),
    /// Validate the discovered registry.
    Check(CheckArgs),
}

/// Options shared by every subcommand that scans a runfile.
#[derive(Debug, Args)]
struct SourceArgs {
    /// Path to the runfile source.
    #[arg(long, default_value = "runfile.ts")]
    file: PathBuf,
    /// Name of the root task group class.
    #[arg(long, default_value = "Tasks")]
    root: String,
    /// Execution-context type required on each task's first parameter.
    #[arg(long, default_value = "Shell")]
    context_type: String,
    /// JSON file with a runtime capability surface to merge after the scan.
    #[arg(long)]
    surface: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ListArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Task target (`build` or `deploy:push`).
    target: String,
    #[command(flatten)]
    source: SourceArgs,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
#[command(disable_help_flag = true)]
struct RunArgs {
    /// Task target (`build` or `deploy:push`).
    target: String,
    /// Arguments forwarded to the task, captured verbatim.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
    #[command(flatten)]
    source: SourceArgs,
    /// Output format for the resolved plan.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct CheckArgs {
    #[command(flatten)]
    source: SourceArgs,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::List(args) => run_list(args),
        Command::Show(args) => run_show(args),
        Command::Run(args) => run_run(args),
        Command::Check(args) => run_check(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_list(args: ListArgs) -> Result<(), String> {
    let registry = load_registry(&args.source)?;
    let rendered = format_registry(&registry, args.format.into())?;
    println!("{}", rendered.trim_end());
    Ok(())
}

fn run_show(args: ShowArgs) -> Result<(), String> {
    let registry = load_registry(&args.source)?;
    let target = TaskTarget::parse(&args.target);
    let task = registry.lookup(&target).map_err(|err| err.to_string())?;
    let rendered = format_task(&args.target, task, args.format.into())?;
    println!("{}", rendered.trim_end());
    Ok(())
}

fn run_run(args: RunArgs) -> Result<(), String> {
    let registry = load_registry(&args.source)?;

    match resolve_invocation(&registry, &args.target, &args.args) {
        Ok(InvocationOutcome::Help(help)) => {
            print!("{help}");
            Ok(())
        }
        Ok(InvocationOutcome::Plan(plan)) => {
            let printer = PlanPrinter {
                format: args.format.into(),
            };
            dispatch(&printer, &plan).map_err(|err| err.to_string())
        }
        Err(err) => {
            if let Some(hint) = usage_hint(&registry, &args.target) {
                eprintln!("{hint}");
            }
            Err(err.to_string())
        }
    }
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let registry = load_registry(&args.source)?;
    let errors = validate_registry(&registry);

    if errors.is_empty() {
        println!(
            "Registry OK: {} task(s), {} namespace(s).",
            registry.task_count(),
            registry.namespaces.len()
        );
        return Ok(());
    }

    for error in &errors {
        eprintln!("{error}");
    }
    Err(format!("{} validation error(s) found", errors.len()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reads and scans the runfile named by `source`, merging the capability
/// surface when one was given. Scan warnings go to stderr.
fn load_registry(source: &SourceArgs) -> Result<TaskRegistry, String> {
    let raw = fs::read_to_string(&source.file)
        .map_err(|err| format!("Failed to read '{}': {err}", source.file.display()))?;

    let options = ScanOptions {
        root_group: source.root.clone(),
        context_type: source.context_type.clone(),
    };

    let outcome = match &source.surface {
        Some(path) => {
            let surface_raw = fs::read_to_string(path)
                .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
            let surface = StaticSurface::from_json(&surface_raw)?;
            build_registry_with_surface(&raw, &options, &surface)
        }
        None => build_registry(&raw, &options),
    };

    for warning in &outcome.warnings {
        eprintln!("warning: {warning}");
    }

    Ok(outcome.registry)
}

/// Builds the usage hint printed alongside resolution failures. Returns
/// `None` when the target itself does not resolve to a task, since there
/// is no signature to show for unknown or private names.
fn usage_hint(registry: &TaskRegistry, raw_target: &str) -> Option<String> {
    let target = TaskTarget::parse(raw_target);
    let task = registry.lookup(&target).ok()?;
    Some(format!("usage: {}", usage_line(raw_target, task)))
}
