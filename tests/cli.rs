use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

#[test]
fn prints_closed_form_and_simulated_results() {
    Command::cargo_bin("parabolic_archery")
        .expect("parabolic_archery bin")
        .args(["45", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Range R = v0^2*sin(2θ)/g: 255.102 m"))
        .stdout(predicate::str::contains("Max height H = v0^2*sin^2(θ)/(2g): 63.776 m"))
        .stdout(predicate::str::contains("Time of flight T = 2*v0*sin(θ)/g: 7.215 s"))
        .stdout(predicate::str::contains("Simulated landing"));
}

#[test]
fn accepts_gravity_presets_by_name() {
    Command::cargo_bin("parabolic_archery")
        .expect("parabolic_archery bin")
        .args(["45", "50", "Moon"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gravity: 1.62 m/s^2"));
}

#[test]
fn near_zero_gravity_reports_time_limit() {
    Command::cargo_bin("parabolic_archery")
        .expect("parabolic_archery bin")
        .args(["45", "50", "1e-7"])
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::contains("did not land within 600 s"));
}

#[test]
fn rejects_malformed_numbers() {
    Command::cargo_bin("parabolic_archery")
        .expect("parabolic_archery bin")
        .args(["forty-five", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid angle: 'forty-five'"));
}

#[test]
fn renders_trajectory_png() {
    let dir = tempfile::tempdir().expect("tempdir");
    let png_path = dir.path().join("plots").join("shot.png");

    Command::cargo_bin("parabolic_archery")
        .expect("parabolic_archery bin")
        .args(["30", "80", "mars", "--plot", png_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plot written to"));

    let metadata = fs::metadata(png_path).expect("png metadata");
    assert!(metadata.len() > 0, "PNG output should not be empty");
}
