//! End-to-end tests running the built `qcge` binary on temporary scripts.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::NamedTempFile;

const BELL: &str = "\
# Bell pair
place h
move right
move down
place x
ctrl
";

fn script(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(source.as_bytes()).unwrap();
    file
}

fn qcge(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_qcge"))
        .args(args)
        .env_remove("QCGE_NUM_QUBITS")
        .env_remove("QCGE_NUM_COLUMNS")
        .env_remove("QCGE_ROTATION_STEP")
        .env_remove("QCGE_LOG_LEVEL")
        .env_remove("QCGE_CONTROLLED_ROTATION")
        .output()
        .unwrap()
}

fn run_script(path: &Path, extra: &[&str]) -> Output {
    let path = path.to_str().unwrap();
    let mut args = vec!["run", "--script", path];
    args.extend_from_slice(extra);
    qcge(&args)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_run_emits_qasm3() {
    let file = script(BELL);
    let output = run_script(file.path(), &[]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "OPENQASM 3.0;\n\
         include \"stdgates.inc\";\n\
         \n\
         qubit[3] q;\n\
         \n\
         h q[0];\n\
         cx q[0], q[1];\n"
    );
}

#[test]
fn test_run_qasm2_with_dimensions() {
    let file = script(BELL);
    let output = run_script(
        file.path(),
        &["--format", "qasm2", "--qubits", "2", "--columns", "2"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("qreg q[2];"));
    assert!(text.contains("cx q[0], q[1];"));
}

#[test]
fn test_run_json() {
    let file = script(BELL);
    let output = run_script(file.path(), &["--format", "json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["num_qubits"], 3);
    assert_eq!(json["operations"][0]["kind"], "h");
    assert_eq!(json["operations"][1]["kind"], "cx");
    assert_eq!(json["operations"][1]["controls"][0], 0);
}

#[test]
fn test_run_ops_to_file() {
    let file = script(BELL);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("bell.ops");
    let output = run_script(
        file.path(),
        &["--format", "ops", "--output", out.to_str().unwrap()],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).is_empty());
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "h [0]\ncx [0, 1]\n");
}

#[test]
fn test_rejected_action_is_a_warning() {
    let file = script("place h\nplace x\n");
    let output = run_script(file.path(), &[]);

    assert!(output.status.success());
    assert!(stderr(&output).contains("line 2"));
    let text = stdout(&output);
    assert!(text.contains("h q[0];"));
    assert!(!text.contains("x q[0];"));
}

#[test]
fn test_strict_aborts_on_rejection() {
    let file = script("place h\nplace x\n");
    let output = run_script(file.path(), &["--strict"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Line 2"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_parse_error_reports_line() {
    let file = script("place h\n\nplace q\n");
    let output = run_script(file.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Line 3"), "stderr: {err}");
    assert!(err.contains("unknown gate 'q'"), "stderr: {err}");
}

#[test]
fn test_missing_script() {
    let output = qcge(&["run", "--script", "/nonexistent/script.qcge"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("File not found"));
}

#[test]
fn test_config_file_and_controlled_rotation() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(
        config,
        "grid:\n  num_qubits: 2\n  num_columns: 1\ncompile:\n  controlled_rotation: controlled"
    )
    .unwrap();
    let file = script("move down\nplace x\nctrl\nrotate pi/2\n");

    let output = run_script(
        file.path(),
        &["--config", config.path().to_str().unwrap()],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("qubit[2] q;"));
    assert!(text.contains("crx(pi/2) q[0], q[1];"));
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "grid:\n  num_qubits: 0").unwrap();
    let file = script(BELL);

    let output = run_script(
        file.path(),
        &["--config", config.path().to_str().unwrap()],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Validation error"));
}

#[test]
fn test_show_prints_grid_and_cursor() {
    let file = script(BELL);
    let output = qcge(&[
        "show",
        "--script",
        file.path().to_str().unwrap(),
        "--qubits",
        "2",
        "--columns",
        "2",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.starts_with("CircuitGridModel:\nH, CTRL\nEMPTY, X\n"));
    assert!(text.contains("wire 1, column 1"));
}

#[test]
fn test_version() {
    let output = qcge(&["version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}
