use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "wordmaze-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_boards_writes_output() {
    let exe = env!("CARGO_BIN_EXE_wordmaze");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-boards", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Embedded boards:"));
    assert!(content.contains("paws"));
    assert!(content.contains("cellar"));
}

#[test]
fn cli_scripted_run_emits_json_report() {
    let exe = env!("CARGO_BIN_EXE_wordmaze");
    let output_path = temp_path("json");
    let status = Command::new(exe)
        .args([
            "--board",
            "paws",
            "--commands",
            "dd",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read report");
    assert!(content.contains("\"board\": \"paws\""));
    assert!(content.contains("\"won\": true"));
    assert!(content.contains("\"score\": 230"));
}

#[test]
fn cli_scripted_quit_reports_an_abandoned_run() {
    let exe = env!("CARGO_BIN_EXE_wordmaze");
    let output_path = temp_path("quit");
    let status = Command::new(exe)
        .args(["--board", "paws", "--commands", "d;quit", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read report");
    assert!(content.contains("Run summary"));
    assert!(content.contains("abandoned"));
}

#[test]
fn cli_fails_on_an_unknown_board() {
    let exe = env!("CARGO_BIN_EXE_wordmaze");
    let output = Command::new(exe)
        .args(["--board", "atlantis", "--commands", "d"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("atlantis"));
}
