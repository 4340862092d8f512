//! Capability surface merging example.
//!
//! Demonstrates how a runtime capability table fills in tasks the static
//! scanner missed, and how those bare tasks receive their arguments
//! verbatim when invoked.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p runfile-demos --example capability_surface
//! ```

use runfile_discovery::capability::StaticSurface;
use runfile_discovery::{ScanOptions, build_registry_with_surface};
use runfile_invoke::{InvocationOutcome, resolve_invocation};

fn main() {
    // The scanner only sees documented methods with a context parameter.
    let source = r#"
export class Tasks {
    /** Compile the project. */
    build(sh: Shell, target: string) {}
}
"#;

    // A capability table, as a loader that actually instantiated the task
    // object would report it. `sync` was invisible to the scanner; `ops`
    // is a member object that becomes a namespace.
    let surface = match StaticSurface::from_json(
        r#"{
            "methods": ["build", "sync"],
            "members": [
                { "name": "ops", "methods": ["restart", "constructor", "_drain"] }
            ]
        }"#,
    ) {
        Ok(surface) => surface,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };

    let outcome = build_registry_with_surface(source, &ScanOptions::default(), &surface);
    let registry = outcome.registry;

    println!("Callable surface after merge:");
    for task in &registry.root {
        let origin = if task.params.is_empty() {
            "from surface"
        } else {
            "scanned"
        };
        println!("  {}  ({origin})", task.name);
    }
    for namespace in &registry.namespaces {
        for task in &namespace.tasks {
            println!("  {}:{}  (from surface)", namespace.name, task.name);
        }
    }

    // Bare tasks have no parameter schema, so arguments pass through
    // verbatim, flag-shaped tokens included.
    let args: Vec<String> = ["--remote", "origin", "--force"]
        .iter()
        .map(ToString::to_string)
        .collect();

    match resolve_invocation(&registry, "sync", &args) {
        Ok(InvocationOutcome::Plan(plan)) => {
            println!("\nVerbatim arguments for '{}':", plan.target);
            for value in &plan.args {
                println!("  {value}");
            }
        }
        Ok(InvocationOutcome::Help(help)) => print!("{help}"),
        Err(err) => eprintln!("resolution failed: {err}"),
    }
}
