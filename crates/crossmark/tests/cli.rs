use std::process::Command;

#[test]
fn help_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_crossmark"));
    cmd.arg("--help");

    // Act
    let output = cmd.output().expect("failed to execute crossmark");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("crosshair overlay"));
    assert!(stdout.contains("run"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("init"));
}

#[test]
fn version_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_crossmark"));
    cmd.arg("--version");

    // Act
    let output = cmd.output().expect("failed to execute crossmark");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("crossmark"));
}

#[test]
fn init_stdout_prints_parseable_template() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_crossmark"));
    cmd.args(["init", "--stdout"]);

    // Act
    let output = cmd.output().expect("failed to execute crossmark");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[target]"));
    assert!(stdout.contains("[style]"));
    assert!(stdout.contains("[refresh]"));
}

#[test]
fn init_rejects_force_with_stdout() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_crossmark"));
    cmd.args(["init", "--stdout", "--force"]);

    // Act
    let output = cmd.output().expect("failed to execute crossmark");

    // Assert
    assert!(!output.status.success());
}

#[test]
fn run_with_unknown_title_fails_without_overlay() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_crossmark"));
    cmd.args(["run", "--exact", "crossmark-cli-test-no-such-window-8d2e"]);

    // Act
    let output = cmd.output().expect("failed to execute crossmark");

    // Assert
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("crossmark-cli-test-no-such-window-8d2e"));
}
