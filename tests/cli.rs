use assert_cmd::prelude::*;
use predicates::str::contains;
use std::process::Command;

// With no display server reachable the runtime must fall back to the
// headless mode: advance 60 frames, print the final entity state, exit 0.
#[test]
fn falls_back_to_headless_summary_without_display() {
    let mut cmd = Command::cargo_bin("spincube").expect("binary exists");
    cmd.env_remove("DISPLAY").env_remove("WAYLAND_DISPLAY");
    cmd.assert()
        .success()
        .stdout(contains("Built scene with 2 meshes and 2 lights"))
        .stdout(contains(" - Cube (solid)"))
        .stdout(contains(" - WireframeCube (wireframe)"))
        .stdout(contains(" - Cube rotation=(2.40, 2.40, 0.00)"))
        .stdout(contains(" - WireframeCube rotation=(-0.60, -0.60, 0.00)"))
        .stdout(contains(" - Ambient intensity=0.50"))
        .stdout(contains(" - Point intensity=3.00"));
}
