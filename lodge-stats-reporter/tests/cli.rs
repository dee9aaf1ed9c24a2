use std::path::PathBuf;
use std::process::Command;

fn temp_path(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "lodge-stats-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

const HALL_A: &str = r#"{
  "data": {
    "eventSessions": {
      "nodes": [
        {
          "startsAt": "2024-03-02T14:00:00Z",
          "status": "PUBLISHED",
          "uuid": "s-1",
          "scenario": { "name": "PFS2 #1-01", "campaign": { "name": "Pathfinder Society" } },
          "slot": { "venue": { "name": "Hall A" } },
          "playerSignups": [
            { "user": { "id": "p1" } },
            { "user": { "id": "p2" } },
            { "user": { "id": "p3" } }
          ],
          "gmSignups": [{ "user": { "id": "g1" } }]
        },
        {
          "startsAt": "2024-03-02T14:00:00Z",
          "status": "ARCHIVED",
          "uuid": "s-2",
          "scenario": { "name": "PFS2 #1-02", "campaign": { "name": "Pathfinder Society" } },
          "slot": { "venue": { "name": "Hall A" } },
          "playerSignups": [{ "user": { "id": "p4" } }],
          "gmSignups": [{ "user": { "id": "g2" } }]
        }
      ]
    }
  }
}"#;

fn write_fixture(label: &str, contents: &str) -> PathBuf {
    let path = temp_path(label);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn cli_writes_text_report_from_saved_response() {
    let exe = env!("CARGO_BIN_EXE_lodge-stats");
    let input = write_fixture("input", HALL_A);
    let output_path = temp_path("report");
    let status = Command::new(exe)
        .arg("--input")
        .arg(&input)
        .arg("--output-file")
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());

    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Total venues: 1\n"));
    assert!(content.contains("Total unique participants: 4\n"));
    assert!(content.contains("Total unique GMs: 1\n"));
    assert!(content.contains("Total seats: 4\n"));
    assert!(content.contains("Total sessions: 1\n"));
    assert!(content.contains("\tPathfinder Society: 1 sessions\n\t\t\tPFS2 #1-01\n"));
    assert!(content.contains("Hall A\n\tUnique participants: 4\n\tUnique GMs: 1\n\tSessions: 1\n"));
}

#[test]
fn cli_window_excludes_sessions_outside_range() {
    let exe = env!("CARGO_BIN_EXE_lodge-stats");
    let input = write_fixture("window", HALL_A);
    let output = Command::new(exe)
        .arg("-i")
        .arg(&input)
        .args(["-s", "2024-03-03", "-o", "-"])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total venues: 0\n"));
}

#[test]
fn cli_emits_json_summary_to_stdout() {
    let exe = env!("CARGO_BIN_EXE_lodge-stats");
    let input = write_fixture("json", HALL_A);
    let output = Command::new(exe)
        .arg("--input")
        .arg(&input)
        .args(["--format", "json", "--output-file", "-"])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let summary: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is json");
    assert_eq!(summary["lodge"]["total_venues"], 1);
    assert_eq!(summary["venues"][0]["name"], "Hall A");
    assert_eq!(summary["venues"][0]["seats"], 4);
}

#[test]
fn cli_fails_without_report_on_malformed_session() {
    let exe = env!("CARGO_BIN_EXE_lodge-stats");
    let input = write_fixture("bad", &HALL_A.replace(r#""uuid": "s-1","#, ""));
    let output_path = temp_path("bad-report");
    let output = Command::new(exe)
        .arg("--input")
        .arg(&input)
        .arg("--output-file")
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(!output_path.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("session data is malformed"));
    assert!(stderr.contains("uuid"));
}

#[test]
fn cli_requires_event_slug_or_input() {
    let exe = env!("CARGO_BIN_EXE_lodge-stats");
    let output = Command::new(exe).output().expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--event-slug"));
}
