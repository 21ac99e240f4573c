//! Integration tests for the prism-bundle CLI
//!
//! Runs the built binary against the demo fiber, the bundled fiber files and
//! a few malformed inputs.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_prism-bundle"));
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"));
    cmd
}

fn run(args: &[&str]) -> Output {
    bin().args(args).output().expect("Failed to execute prism-bundle")
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write fixture");
    path
}

fn read_json(path: &Path) -> serde_json::Value {
    let content = fs::read_to_string(path).expect("Failed to read output file");
    serde_json::from_str(&content).expect("Failed to parse output JSON")
}

#[test]
fn test_demo_mode() {
    let output = run(&[]);
    assert!(
        output.status.success(),
        "demo failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Fiber_0:\n  {0: 1, 1: 2, (0, 1): 3}"));
    assert!(stdout.contains("Fiber_1:\n  {0: 2, 1: 3, (0, 1): 1}"));
    assert!(stdout.contains("Fiber_2:\n  {0: 3, 1: 1, (0, 1): 2}"));
    assert!(stdout.contains("E_join_0_to_1:\n  {((0, 0), (1, 0)): 4, ((0, 0), (1, 1)): 5"));
    assert!(stdout.contains("E_join_1_to_2:"));
    assert!(!stdout.contains("E_join_2_to_3"));
}

#[test]
fn test_json_output_with_audit() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("bundle.json");

    let output = run(&["--fibers", "2", "--verify", "--output", out.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let doc = read_json(&out);
    assert_eq!(doc["summary"]["fibers"], 2);
    assert_eq!(doc["summary"]["bundle_max_degree"], 5);
    assert_eq!(doc["summary"]["palette_size"], 6);
    assert_eq!(doc["summary"]["fiber_colors"], serde_json::json!([1, 2, 3]));

    assert_eq!(doc["coloring"]["Fiber_0"]["(0, 1)"], 3);
    assert_eq!(doc["coloring"]["Fiber_1"]["0"], 2);
    assert_eq!(doc["coloring"]["Fiber_1"]["(0, 1)"], 1);
    assert_eq!(doc["coloring"]["E_join_0_to_1"]["((0, 0), (1, 0))"], 4);
    assert_eq!(doc["coloring"]["E_join_0_to_1"]["((0, 1), (1, 0))"], 5);
    assert!(doc["coloring"].get("Fiber_2").is_none());

    assert_eq!(doc["audit"]["fiber"], 0);
    assert_eq!(doc["audit"]["join"], 0);
    assert_eq!(doc["audit"]["seam"], 1);
    assert_eq!(doc["audit"]["extraneous"], 0);
}

#[test]
fn test_json_key_order() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("bundle.json");

    let output = run(&["--fibers", "3", "--output", out.to_str().unwrap()]);
    assert!(output.status.success());

    let raw = fs::read_to_string(&out).unwrap();
    let positions: Vec<usize> = ["Fiber_0", "Fiber_1", "Fiber_2", "E_join_0_to_1", "E_join_1_to_2"]
        .iter()
        .map(|key| raw.find(&format!("\"{}\"", key)).expect(key))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{:?}", positions);
    assert!(raw.find("\"audit\"").is_none());
}

#[test]
fn test_config_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("triangle.json");

    let output = run(&["--config", "configs/default.toml", "--output", out.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "config run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let doc = read_json(&out);
    assert_eq!(doc["summary"]["fibers"], 4);
    assert_eq!(doc["summary"]["fiber_vertices"], 3);
    assert_eq!(doc["summary"]["fiber_max_degree"], 2);
    assert_eq!(doc["audit"]["fiber"], 0);
    assert_eq!(doc["audit"]["join"], 0);
    assert!(doc["coloring"].get("E_join_2_to_3").is_some());
}

#[test]
fn test_flags_override_config() {
    let output = run(&[
        "--config",
        "configs/default.toml",
        "--fibers",
        "2",
        "--graph",
        "fibers/star4.col",
        "--coloring",
        "fibers/star4.tc",
    ]);
    assert!(
        output.status.success(),
        "override run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("P2 x F (n = 4)"));
    assert!(stdout.contains("E_join_0_to_1:"));
    assert!(!stdout.contains("E_join_1_to_2:"));
}

#[test]
fn test_empty_fiber_graph_fails() {
    let dir = TempDir::new().unwrap();
    let graph = write_file(dir.path(), "empty.col", "p edge 0 0\n");
    let coloring = write_file(dir.path(), "empty.tc", "c nothing to color\n");

    let output = run(&[
        "--graph",
        graph.to_str().unwrap(),
        "--coloring",
        coloring.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Fiber graph cannot be empty"), "stderr: {}", stderr);
}

#[test]
fn test_insufficient_join_colors_fails() {
    let dir = TempDir::new().unwrap();
    let graph = write_file(dir.path(), "c4.col", "p edge 4 4\ne 1 2\ne 2 3\ne 3 4\ne 4 1\n");
    let coloring = write_file(
        dir.path(),
        "c4.tc",
        "v 1 1\nv 2 3\nv 3 5\nv 4 7\ne 1 2 2\ne 2 3 4\ne 3 4 6\ne 4 1 8\n",
    );

    let output = run(&[
        "--graph",
        graph.to_str().unwrap(),
        "--coloring",
        coloring.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("between F_0 and F_1"), "stderr: {}", stderr);
}

#[test]
fn test_graph_without_coloring_fails() {
    let output = run(&["--graph", "fibers/triangle.col"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("without a total coloring"), "stderr: {}", stderr);
}

#[test]
fn test_zero_fibers_fails() {
    let output = run(&["--fibers", "0"]);
    assert!(!output.status.success());
}

#[test]
fn test_coloring_with_non_edge_fails() {
    let dir = TempDir::new().unwrap();
    let graph = write_file(dir.path(), "p3.col", "p edge 3 2\ne 1 2\ne 2 3\n");
    let coloring = write_file(
        dir.path(),
        "p3.tc",
        "v 1 1\nv 2 2\nv 3 1\ne 1 2 3\ne 2 3 4\ne 1 3 9\n",
    );

    let output = run(&[
        "--graph",
        graph.to_str().unwrap(),
        "--coloring",
        coloring.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not an edge of the fiber graph"), "stderr: {}", stderr);
}

#[test]
fn test_single_color_fiber_warns() {
    let dir = TempDir::new().unwrap();
    let graph = write_file(dir.path(), "k1.col", "p edge 1 0\n");
    let coloring = write_file(dir.path(), "k1.tc", "v 1 1\n");

    let output = run(&[
        "--fibers",
        "2",
        "--graph",
        graph.to_str().unwrap(),
        "--coloring",
        coloring.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("fewer than two colors"), "stderr: {}", stderr);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Fiber_1:\n  {0: 1}"), "stdout: {}", stdout);
}
