//! End-to-end invocation pipeline example.
//!
//! Demonstrates the full flow: scan runfile source into a registry,
//! resolve a command line against a task schema, and hand the finished
//! plan to a dispatcher.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p runfile-demos --example resolve_invocation
//! ```

use runfile_discovery::{ScanOptions, build_registry};
use runfile_invoke::{
    InvocationOutcome, OutputFormat, PlanPrinter, dispatch, resolve_invocation,
};
use serde_json::Value;

fn main() {
    let source = r#"
export class Tasks {
    deploy = new DeployTasks();

    /**
     * Greet someone by name.
     * @flag count -c
     */
    greet(sh: Shell, name: string, count: number = 1) {}
}

class DeployTasks {
    /**
     * Push a release to an environment.
     * @flag env -e
     */
    push(sh: Shell, env: string, retries: number = 3, verbose: boolean = false) {}
}
"#;

    let outcome = build_registry(source, &ScanOptions::default());
    let registry = outcome.registry;

    // A command line as it would arrive after the target name:
    //   runfile run deploy:push --env prod 5 --verbose
    let args: Vec<String> = ["--env", "prod", "5", "--verbose"]
        .iter()
        .map(ToString::to_string)
        .collect();

    println!("Resolving: deploy:push {}", args.join(" "));

    match resolve_invocation(&registry, "deploy:push", &args) {
        Ok(InvocationOutcome::Plan(plan)) => {
            println!("\nResolved plan for '{}':", plan.target);
            for (index, value) in plan.args.iter().enumerate() {
                let kind = match value {
                    Value::String(_) => "string",
                    Value::Number(_) => "number",
                    Value::Bool(_) => "boolean",
                    Value::Array(_) => "array",
                    Value::Object(_) => "object",
                    Value::Null => "null",
                };
                println!("  [{index}] {value} ({kind})");
            }

            // Dispatch to the built-in plan printer, JSON rendering
            println!("\nDispatching:");
            let printer = PlanPrinter {
                format: OutputFormat::Json,
            };
            if let Err(err) = dispatch(&printer, &plan) {
                eprintln!("dispatch failed: {err}");
            }
        }
        Ok(InvocationOutcome::Help(help)) => {
            print!("{help}");
        }
        Err(err) => {
            eprintln!("resolution failed: {err}");
        }
    }

    // The same values can also be expressed positionally
    let positional: Vec<String> = ["prod", "5", "--verbose"]
        .iter()
        .map(ToString::to_string)
        .collect();

    if let Ok(InvocationOutcome::Plan(plan)) =
        resolve_invocation(&registry, "deploy:push", &positional)
    {
        println!("\nPositional spelling resolves to the same arguments:");
        println!("  {:?}", plan.args);
    }
}
