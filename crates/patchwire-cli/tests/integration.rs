//! Integration tests for patchwire-cli.
//!
//! Runs the built binary against rack and scenario files in a temp dir.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const RACK: &str = r#"
name = "voice"

[[devices]]
name = "osc"
position = [50.0, 50.0]
outputs = 1

[[devices.ports]]
name = "out"
offset = [30.0, 0.0]
output = 0

[[devices]]
name = "vca"
position = [250.0, 50.0]
inputs = 1
outputs = 1
params = ["gain"]

[[devices.ports]]
name = "in"
offset = [-30.0, 0.0]
input = 0

[[devices.ports]]
name = "gain"
offset = [-30.0, 30.0]
param = "gain"
"#;

const SCENARIO: &str = r#"
name = "patch"

[[steps]]
action = "drag"
from = "osc.out"
to = "vca.in"

[[steps]]
action = "drag"
from = "vca.gain"
to = [400.0, 400.0]
"#;

/// Temp dir holding `voice.toml`, `patch.toml` and a settings path that does
/// not exist (so the user's real settings are never read).
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("voice.toml"), RACK).unwrap();
        std::fs::write(dir.path().join("patch.toml"), SCENARIO).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn run(&self, args: &[&str]) -> Output {
        patchwire_bin()
            .arg("--settings")
            .arg(self.path("settings.toml"))
            .args(args)
            .env_remove("RUST_LOG")
            .output()
            .expect("failed to run patchwire")
    }
}

/// Helper to get the path to the `patchwire` binary built by cargo.
fn patchwire_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_patchwire"))
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ---------------------------------------------------------------------------
// `patchwire replay`
// ---------------------------------------------------------------------------

#[test]
fn cli_replay_prints_events_and_connections() {
    let fx = Fixture::new();
    let rack = fx.path("voice.toml");
    let scenario = fx.path("patch.toml");
    let output = fx.run(&["replay", arg(&rack), arg(&scenario)]);

    assert!(output.status.success(), "replay failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Rack: voice (2 devices, 3 ports)"), "got: {stdout}");
    assert!(stdout.contains("[0] drag osc.out → vca.in"), "got: {stdout}");
    assert!(stdout.contains("spawned"), "got: {stdout}");
    assert!(stdout.contains("connected"), "got: {stdout}");
    assert!(stdout.contains("discarded"), "got: {stdout}");
    assert!(stdout.contains("  osc:0 → vca:0"), "got: {stdout}");
}

#[test]
fn cli_replay_quiet_prints_only_connections() {
    let fx = Fixture::new();
    let rack = fx.path("voice.toml");
    let scenario = fx.path("patch.toml");
    let output = fx.run(&["replay", "--quiet", arg(&rack), arg(&scenario)]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "Connections:\n  osc:0 → vca:0\n");
}

#[test]
fn cli_replay_unknown_port_fails() {
    let fx = Fixture::new();
    std::fs::write(
        fx.path("bad.toml"),
        "name = \"bad\"\n[[steps]]\naction = \"press\"\nat = \"lfo.out\"\n",
    )
    .unwrap();
    let rack = fx.path("voice.toml");
    let scenario = fx.path("bad.toml");
    let output = fx.run(&["replay", arg(&rack), arg(&scenario)]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown port: lfo.out"), "got: {stderr}");
}

// ---------------------------------------------------------------------------
// `patchwire check`
// ---------------------------------------------------------------------------

#[test]
fn cli_check_accepts_valid_rack() {
    let fx = Fixture::new();
    let rack = fx.path("voice.toml");
    let output = fx.run(&["check", "--verbose", arg(&rack)]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ok: rack 'voice'"), "got: {stdout}");
    assert!(stdout.contains("osc.out"), "got: {stdout}");
    assert!(stdout.contains("sink"), "got: {stdout}");
}

#[test]
fn cli_check_rejects_input_and_param() {
    let fx = Fixture::new();
    let broken = RACK.replace("param = \"gain\"", "param = \"gain\"\ninput = 0");
    std::fs::write(fx.path("broken.toml"), broken).unwrap();
    let rack = fx.path("broken.toml");
    let output = fx.run(&["check", arg(&rack)]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("vca.gain"), "got: {stderr}");
}

#[test]
fn cli_check_missing_rack_fails() {
    let fx = Fixture::new();
    let output = fx.run(&["check", "no_such_rack_12345"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("rack not found"), "got: {stderr}");
}

// ---------------------------------------------------------------------------
// `patchwire paths`
// ---------------------------------------------------------------------------

#[test]
fn cli_paths_shows_directories() {
    let fx = Fixture::new();
    let output = fx.run(&["paths"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("patchwire"), "got: {stdout}");
    assert!(stdout.contains("settings.toml"), "got: {stdout}");
}

#[test]
fn cli_bad_settings_only_fail_commands_that_use_them() {
    let fx = Fixture::new();
    std::fs::write(fx.path("settings.toml"), "port_radius = nan\n").unwrap();

    let output = fx.run(&["paths"]);
    assert!(output.status.success(), "paths failed: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("settings unusable"), "got: {stderr}");

    let rack = fx.path("voice.toml");
    let output = fx.run(&["check", arg(&rack)]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("port_radius"), "got: {stderr}");
}
