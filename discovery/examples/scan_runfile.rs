//! Basic runfile scanning example.
//!
//! Demonstrates how to use `build_registry()` to extract a task registry
//! from runfile source text without loading or executing any modules.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p runfile-discovery --example scan_runfile
//! ```

use runfile_discovery::{ScanOptions, build_registry};

fn main() {
    // Example runfile source (TypeScript-flavoured task definitions)
    let source = r#"
/**
 * Build and release tasks for the demo project.
 */
export class Tasks {
    deploy = new DeployTasks();

    /**
     * Compile the project.
     * @flag target -t
     * @flag release -r
     */
    build(sh: Shell, target: string, release: boolean = false) {
        sh.exec(`compile --target ${target}`);
    }

    /** Greet someone by name. */
    greet(sh: Shell, name: string, count: number = 1) {}

    /** Install packages into the workspace. */
    install(sh: Shell, ...packages: string[]) {}

    _cleanup(sh: Shell) {}
}

class DeployTasks {
    /** Push a release to an environment. */
    push(sh: Shell, env: string, retries: number = 3) {}
}
"#;

    // Scan the source
    let outcome = build_registry(source, &ScanOptions::default());
    let registry = &outcome.registry;

    println!("Discovered {} callable task(s)", registry.task_count());

    if !outcome.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &outcome.warnings {
            println!("  - {warning}");
        }
    }

    // Inspect the registry
    if let Some(doc) = &registry.header_doc {
        println!("\nRunfile: {doc}");
    }

    println!("\nRoot tasks ({}):", registry.root.len());
    for task in &registry.root {
        let desc = if task.description.is_empty() {
            "(no description)"
        } else {
            task.description.as_str()
        };
        println!("  {}  -  {desc}", task.name);
        for param in &task.params {
            let req = if param.required { "required" } else { "optional" };
            let flag = param
                .flag
                .as_ref()
                .map(|f| format!(", {}", f.tokens().join(" / ")))
                .unwrap_or_default();
            println!("    {} ({req}, {:?}{flag})", param.name, param.param_type);
        }
    }

    println!("\nNamespaces ({}):", registry.namespaces.len());
    for namespace in &registry.namespaces {
        println!("  {}:", namespace.name);
        for task in &namespace.tasks {
            let desc = if task.description.is_empty() {
                "(no description)"
            } else {
                task.description.as_str()
            };
            println!("    {}  -  {desc}", task.name);
        }
    }
}
