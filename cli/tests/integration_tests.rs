use std::fs;
use std::path::PathBuf;

/// Helper to create a temp directory that is cleaned up on drop.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(name: &str) -> Self {
        let path =
            std::env::temp_dir().join(format!("runfile_cli_test_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("failed to create temp dir");
        Self { path }
    }

    fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Small but representative runfile used by most tests.
fn write_runfile(dir: &TempDir) -> PathBuf {
    let source = r#"/**
 * Demo project tasks.
 */
export class Tasks {
    deploy = new DeployTasks();
    _secrets = new SecretTasks();

    /**
     * Greet someone by name.
     * @flag count -c
     */
    greet(sh: Shell, name: string, count: number = 1) {
        sh.exec(`echo hello ${name}`);
    }

    /** Compile the project. */
    build(sh: Shell, target: string) {
        sh.exec(`compile --target ${target}`);
    }

    _cleanup(sh: Shell) {}
}

class DeployTasks {
    /** Push a release to an environment. */
    push(sh: Shell, env: string, retries: number = 3) {}
}

class SecretTasks {
    /** Rotate credentials. */
    rotate(sh: Shell) {}
}
"#;
    let path = dir.join("runfile.ts");
    fs::write(&path, source).expect("failed to write runfile");
    path
}

fn run_cli(args: &[&str]) -> std::process::Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_runfile"))
        .args(args)
        .output()
        .expect("failed to run runfile binary")
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

#[test]
fn list_prints_tasks_and_namespaces() {
    let dir = TempDir::new("list_table");
    let runfile = write_runfile(&dir);

    let out = run_cli(&["list", "--file", runfile.to_str().unwrap()]);

    assert!(out.status.success(), "list should succeed");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("Runfile: 3 task(s), 1 namespace(s)"),
        "header should count callable tasks. stdout: {stdout}"
    );
    assert!(stdout.contains("Demo project tasks."));
    assert!(stdout.contains("greet"));
    assert!(stdout.contains("deploy:"));
    assert!(
        !stdout.contains("_secrets") && !stdout.contains("_cleanup"),
        "private names must not be listed. stdout: {stdout}"
    );
}

#[test]
fn list_json_output_is_parseable() {
    let dir = TempDir::new("list_json");
    let runfile = write_runfile(&dir);

    let out = run_cli(&["list", "--file", runfile.to_str().unwrap(), "--format", "json"]);

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(stdout.trim()).expect("list --format json should emit valid JSON");
    assert_eq!(parsed["root"].as_array().map(Vec::len), Some(2));
    assert_eq!(parsed["namespaces"].as_array().map(Vec::len), Some(1));
    assert_eq!(parsed["namespaces"][0]["name"], "deploy");
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn show_renders_task_help() {
    let dir = TempDir::new("show_help");
    let runfile = write_runfile(&dir);

    let out = run_cli(&["show", "greet", "--file", runfile.to_str().unwrap()]);

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("Usage: greet <name> [count]"),
        "usage line expected. stdout: {stdout}"
    );
    assert!(stdout.contains("Greet someone by name."));
    assert!(stdout.contains("--count, -c"));
}

#[test]
fn show_unknown_target_fails() {
    let dir = TempDir::new("show_unknown");
    let runfile = write_runfile(&dir);

    let out = run_cli(&["show", "ghost", "--file", runfile.to_str().unwrap()]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("error: unknown task: ghost"),
        "stderr: {stderr}"
    );
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn run_emits_resolved_plan_as_json() {
    let dir = TempDir::new("run_plan");
    let runfile = write_runfile(&dir);

    let out = run_cli(&[
        "run",
        "--file",
        runfile.to_str().unwrap(),
        "greet",
        "Alice",
        "--count",
        "3",
    ]);

    assert!(out.status.success(), "run should succeed");
    let stdout = String::from_utf8_lossy(&out.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(stdout.trim()).expect("plan should be valid JSON");
    assert_eq!(parsed["target"], "greet");
    assert_eq!(parsed["args"], serde_json::json!(["Alice", 3]));
}

#[test]
fn run_namespaced_target_halts_at_missing_optional() {
    let dir = TempDir::new("run_namespaced");
    let runfile = write_runfile(&dir);

    let out = run_cli(&["run", "--file", runfile.to_str().unwrap(), "deploy:push", "prod"]);

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(stdout.trim()).expect("plan should be valid JSON");
    assert_eq!(parsed["target"], "deploy:push");
    assert_eq!(parsed["args"], serde_json::json!(["prod"]));
}

#[test]
fn run_missing_required_argument_prints_usage_hint() {
    let dir = TempDir::new("run_missing");
    let runfile = write_runfile(&dir);

    let out = run_cli(&["run", "--file", runfile.to_str().unwrap(), "greet"]);

    assert!(!out.status.success(), "missing argument should exit 1");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("usage: greet <name> [count]"),
        "usage hint expected. stderr: {stderr}"
    );
    assert!(stderr.contains("error: missing required argument: name"));
}

#[test]
fn run_private_target_is_denied() {
    let dir = TempDir::new("run_private");
    let runfile = write_runfile(&dir);

    let out = run_cli(&["run", "--file", runfile.to_str().unwrap(), "_cleanup"]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("error: '_cleanup' is private and cannot be invoked"),
        "stderr: {stderr}"
    );
    assert!(
        !stderr.contains("usage:"),
        "no usage hint for names outside the callable surface. stderr: {stderr}"
    );
}

#[test]
fn run_namespace_target_is_not_callable() {
    let dir = TempDir::new("run_namespace");
    let runfile = write_runfile(&dir);

    let out = run_cli(&["run", "--file", runfile.to_str().unwrap(), "deploy"]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("error: 'deploy' is a namespace, not a task"),
        "stderr: {stderr}"
    );
}

#[test]
fn run_help_flag_renders_task_help() {
    let dir = TempDir::new("run_help");
    let runfile = write_runfile(&dir);

    let out = run_cli(&["run", "--file", runfile.to_str().unwrap(), "greet", "--help"]);

    assert!(out.status.success(), "help request should exit 0");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("Usage: greet <name> [count]"),
        "task help expected instead of a plan. stdout: {stdout}"
    );
}

#[test]
fn run_surface_task_receives_verbatim_args() {
    let dir = TempDir::new("run_surface");
    let runfile = write_runfile(&dir);
    let surface = dir.join("surface.json");
    fs::write(&surface, r#"{ "methods": ["sync"] }"#).expect("failed to write surface");

    let out = run_cli(&[
        "run",
        "--file",
        runfile.to_str().unwrap(),
        "--surface",
        surface.to_str().unwrap(),
        "sync",
        "one",
        "--two",
    ]);

    assert!(out.status.success(), "surface task should resolve");
    let stdout = String::from_utf8_lossy(&out.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(stdout.trim()).expect("plan should be valid JSON");
    assert_eq!(parsed["target"], "sync");
    assert_eq!(parsed["args"], serde_json::json!(["one", "--two"]));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_reports_valid_registry() {
    let dir = TempDir::new("check_ok");
    let runfile = write_runfile(&dir);

    let out = run_cli(&["check", "--file", runfile.to_str().unwrap()]);

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("Registry OK: 3 task(s), 1 namespace(s)."),
        "stdout: {stdout}"
    );
}

// ---------------------------------------------------------------------------
// diagnostics
// ---------------------------------------------------------------------------

#[test]
fn scan_warnings_go_to_stderr() {
    let dir = TempDir::new("warnings");
    let truncated = dir.join("runfile.ts");
    fs::write(
        &truncated,
        "class Tasks {\n    /** Greet. */\n    greet(sh: Shell) {\n",
    )
    .expect("failed to write runfile");

    let out = run_cli(&["list", "--file", truncated.to_str().unwrap()]);

    assert!(out.status.success(), "warnings alone should not fail");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("warning: unterminated body for task group 'Tasks'"),
        "stderr: {stderr}"
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Runfile: 0 task(s), 0 namespace(s)"));
}

#[test]
fn missing_runfile_is_an_error() {
    let dir = TempDir::new("missing_file");
    let missing = dir.join("nope.ts");

    let out = run_cli(&["list", "--file", missing.to_str().unwrap()]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("error: Failed to read"),
        "stderr: {stderr}"
    );
}
