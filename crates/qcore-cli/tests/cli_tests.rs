//! End-to-end tests that run the `qcore` binary.
//!
//! Each test runs in its own temp directory with `QCORE_*` variables cleared,
//! so neither a developer's `.env` nor their shell leaks into the results.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

const CATALOG: &str = r#"{
    "exercises": [
        {
            "id": "bell-state",
            "title": "Create a Bell state",
            "num_qubits": 2,
            "target_type": "state_vector",
            "target_data": {"state_vector": [0.7071067811865476, 0, 0, 0.7071067811865476]},
            "tolerance": 0.01
        },
        {
            "id": "superposition",
            "title": "Equal superposition",
            "num_qubits": 1,
            "target_type": "probabilities",
            "target_data": {"measurement_probabilities": {"0": 0.5, "1": 0.5}}
        }
    ]
}"#;

const BELL: &str = r#"{
    "num_qubits": 2,
    "operations": [
        {"name": "H", "qubit": 0},
        {"name": "CNOT", "qubit": 1, "control_qubit": 0}
    ]
}"#;

const ENV_VARS: &[&str] = &[
    "QCORE_CONFIG",
    "QCORE_MAX_QUBITS",
    "QCORE_DEFAULT_SHOTS",
    "QCORE_MAX_SHOTS",
    "QCORE_SEED",
    "QCORE_SAMPLING",
    "QCORE_EXERCISES_PATH",
    "QCORE_LOG_LEVEL",
    "QCORE_LOG_FORMAT",
    "RUST_LOG",
];

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn qcore(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_qcore"));
        cmd.current_dir(self.dir.path());
        for var in ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.qcore().args(args).output().unwrap()
    }
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_version() {
    let ws = Workspace::new();
    let output = ws.run(&["version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(concat!("v", env!("CARGO_PKG_VERSION"))));
    assert!(stdout.contains("qcore-sim"));
}

#[test]
fn test_gates_json_lists_catalog() {
    let ws = Workspace::new();
    let json = stdout_json(&ws.run(&["gates", "--format", "json"]));
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"H"));
    assert!(names.contains(&"CNOT"));
    assert!(names.contains(&"RZ"));
}

#[test]
fn test_gate_lookup_by_alias() {
    let ws = Workspace::new();
    let json = stdout_json(&ws.run(&["gates", "cx", "-f", "json"]));
    assert_eq!(json["name"], "CNOT");
    assert_eq!(json["arity"], "controlled");

    let output = ws.run(&["gates", "toffoli"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown gate"));
}

#[test]
fn test_simulate_bell_exact() {
    let ws = Workspace::new();
    ws.write("bell.json", BELL);
    let json = stdout_json(&ws.run(&[
        "simulate", "-i", "bell.json", "--shots", "1000", "--exact", "-f", "json",
    ]));

    assert_eq!(json["num_qubits"], 2);
    assert_eq!(json["total_shots"], 1000);
    assert_eq!(json["sampling"], "exact");
    assert_eq!(json["measurement_counts"]["00"], 500);
    assert_eq!(json["measurement_counts"]["11"], 500);
    assert!(json["measurement_counts"].get("01").is_none());

    let p00 = json["probabilities"]["00"].as_f64().unwrap();
    assert!((p00 - 0.5).abs() < 1e-9);
    assert_eq!(json["probabilities"]["01"].as_f64().unwrap(), 0.0);
}

#[test]
fn test_simulate_seed_is_reproducible() {
    let ws = Workspace::new();
    ws.write("bell.json", BELL);
    let args = [
        "simulate", "-i", "bell.json", "--shots", "200", "--seed", "42", "-f", "json",
    ];
    let first = stdout_json(&ws.run(&args));
    let second = stdout_json(&ws.run(&args));
    assert_eq!(first["measurement_counts"], second["measurement_counts"]);
}

#[test]
fn test_simulate_table_output() {
    let ws = Workspace::new();
    ws.write("bell.json", BELL);
    let output = ws.run(&["simulate", "-i", "bell.json", "--exact"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("|00⟩"));
    assert!(stdout.contains("Results (1024 shots, exact sampling)"));
}

#[test]
fn test_simulate_bare_array_needs_qubits() {
    let ws = Workspace::new();
    ws.write("ops.json", r#"[{"name": "X", "qubit": 0}]"#);

    let output = ws.run(&["simulate", "-i", "ops.json"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--qubits"));

    let json = stdout_json(&ws.run(&[
        "simulate", "-i", "ops.json", "-q", "1", "--exact", "-f", "json",
    ]));
    assert_eq!(json["measurement_counts"]["1"], 1024);
}

#[test]
fn test_simulate_invalid_qubit_index() {
    let ws = Workspace::new();
    ws.write(
        "bad.json",
        r#"{"num_qubits": 3, "operations": [{"name": "H", "qubit": 5}]}"#,
    );
    let output = ws.run(&["simulate", "-i", "bad.json"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error:"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_simulate_unknown_gate() {
    let ws = Workspace::new();
    ws.write(
        "bad.json",
        r#"{"num_qubits": 1, "operations": [{"name": "FOO", "qubit": 0}]}"#,
    );
    let output = ws.run(&["simulate", "-i", "bad.json"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("FOO"));
}

#[test]
fn test_simulate_missing_file() {
    let ws = Workspace::new();
    let output = ws.run(&["simulate", "-i", "nope.json"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("File not found"));
}

#[test]
fn test_algorithm_preset() {
    let ws = Workspace::new();
    let json = stdout_json(&ws.run(&["algorithm", "grover", "-q", "3", "-f", "json"]));
    assert_eq!(json["num_qubits"], 3);
    let total: f64 = json["probabilities"]
        .as_object()
        .unwrap()
        .values()
        .map(|p| p.as_f64().unwrap())
        .sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn test_algorithm_listing_and_unknown_name() {
    let ws = Workspace::new();
    let output = ws.run(&["algorithm"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("bernstein-vazirani"));

    let output = ws.run(&["algorithm", "shor"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("shor"));
}

#[test]
fn test_exercises_list_and_show() {
    let ws = Workspace::new();
    ws.write("catalog.json", CATALOG);

    let json = stdout_json(&ws.run(&[
        "exercises",
        "list",
        "--exercises",
        "catalog.json",
        "-f",
        "json",
    ]));
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[0]["id"], "bell-state");

    let json = stdout_json(&ws.run(&[
        "exercises",
        "show",
        "superposition",
        "--exercises",
        "catalog.json",
        "-f",
        "json",
    ]));
    assert_eq!(json["num_qubits"], 1);
    assert_eq!(json["tolerance"], 0.001);

    let output = ws.run(&["exercises", "show", "nope", "--exercises", "catalog.json"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Exercise not found: nope"));
}

#[test]
fn test_grade_passing_submission() {
    let ws = Workspace::new();
    ws.write("catalog.json", CATALOG);
    ws.write("bell.json", BELL);

    let json = stdout_json(&ws.run(&[
        "grade",
        "bell-state",
        "-i",
        "bell.json",
        "--exercises",
        "catalog.json",
        "-f",
        "json",
    ]));
    assert_eq!(json["passed"], true);
    assert_eq!(json["score"], 100);
    assert_eq!(json["exercise_id"], "bell-state");
    assert!(json["target_data"]["state_vector"].is_array());
}

#[test]
fn test_grade_failing_submission_exits_zero() {
    let ws = Workspace::new();
    ws.write("catalog.json", CATALOG);
    ws.write("empty.json", r#"{"operations": []}"#);

    let output = ws.run(&[
        "grade",
        "superposition",
        "-i",
        "empty.json",
        "--exercises",
        "catalog.json",
    ]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("FAILED"));
}

#[test]
fn test_grade_catalog_from_env() {
    let ws = Workspace::new();
    let catalog = ws.write("catalog.json", CATALOG);
    ws.write("h.json", r#"[{"name": "H", "qubit": 0}]"#);

    let output = ws
        .qcore()
        .env("QCORE_EXERCISES_PATH", &catalog)
        .args(["grade", "superposition", "-i", "h.json", "-f", "json"])
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["passed"], true);
}

#[test]
fn test_grade_without_catalog() {
    let ws = Workspace::new();
    ws.write("bell.json", BELL);
    let output = ws.run(&["grade", "bell-state", "-i", "bell.json"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("No exercise catalog configured"));
}

#[test]
fn test_grade_missing_catalog_file() {
    let ws = Workspace::new();
    ws.write("bell.json", BELL);
    let output = ws.run(&[
        "grade",
        "bell-state",
        "-i",
        "bell.json",
        "--exercises",
        "missing.json",
    ]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to load exercises"));
}

#[test]
fn test_preview_returns_target() {
    let ws = Workspace::new();
    ws.write("catalog.json", CATALOG);
    ws.write("h.json", r#"[{"name": "H", "qubit": 0}]"#);

    let json = stdout_json(&ws.run(&[
        "preview",
        "superposition",
        "-i",
        "h.json",
        "--exercises",
        "catalog.json",
        "-f",
        "json",
    ]));
    assert_eq!(json["exercise_id"], "superposition");
    assert_eq!(json["simulation_result"]["num_qubits"], 1);
    assert_eq!(json["target_data"]["measurement_probabilities"]["0"], 0.5);
    assert!(json.get("passed").is_none());
}

#[test]
fn test_config_file_and_env_precedence() {
    let ws = Workspace::new();
    ws.write("bell.json", BELL);
    ws.write(
        "qcore.yaml",
        "simulator:\n  default_shots: 64\n  sampling: exact\n",
    );

    let json = stdout_json(&ws.run(&[
        "-c", "qcore.yaml", "simulate", "-i", "bell.json", "-f", "json",
    ]));
    assert_eq!(json["total_shots"], 64);
    assert_eq!(json["measurement_counts"]["00"], 32);

    let output = ws
        .qcore()
        .env("QCORE_DEFAULT_SHOTS", "10")
        .args(["-c", "qcore.yaml", "simulate", "-i", "bell.json", "-f", "json"])
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["total_shots"], 10);
    assert_eq!(json["sampling"], "exact");
}

#[test]
fn test_invalid_config_is_reported() {
    let ws = Workspace::new();
    ws.write("qcore.yaml", "logging:\n  level: loud\n");
    let output = ws.run(&["-c", "qcore.yaml", "gates"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid log level"));
}

#[test]
fn test_qubit_cap_from_env() {
    let ws = Workspace::new();
    ws.write(
        "big.json",
        r#"{"num_qubits": 4, "operations": [{"name": "H", "qubit": 3}]}"#,
    );
    let output = ws
        .qcore()
        .env("QCORE_MAX_QUBITS", "3")
        .args(["simulate", "-i", "big.json"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Error:"));
}
